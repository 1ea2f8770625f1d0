use crate::error::PipelineError;
use crate::types::report::ReportResult;

/// 合成过程中的一次精修进度
#[derive(Debug, Clone, PartialEq)]
pub struct ReportProgress {
    /// 第几次尝试，从1开始计数
    pub attempt: usize,
    /// 当前草稿的字数
    pub word_count: usize,
}

/// 阶段事件 - 流水线对调用方的增量输出
///
/// 每个阶段完成时立即产出对应事件，调用方可以边执行边渲染进度，
/// 终止事件为`Final`或`Error`，之后不再有后续事件。
#[derive(Debug, Clone, PartialEq)]
pub enum StageEvent {
    /// 分类结果：输入是否为可识别的行业
    Validation(bool),
    /// 检索到的参考页面URL，保持相关度顺序
    Sources(Vec<String>),
    /// 合成阶段的精修进度
    Progress(ReportProgress),
    /// 最终报告
    Final(ReportResult),
    /// 终止错误
    Error(PipelineError),
}
