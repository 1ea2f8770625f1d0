use serde::{Deserialize, Serialize};

/// 参考文档 - 知识库检索得到的一个页面
///
/// 由检索器按相关度顺序产出，进入合成阶段后只读不改，
/// 合成器仅消费`text`的有限前缀。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceDocument {
    /// 页面的规范URL
    pub url: String,
    /// 页面正文全文
    pub text: String,
}

/// 报告的字数合规状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStatus {
    /// 字数落在目标区间内
    #[serde(rename = "ok")]
    Ok,
    /// 精修次数耗尽后仍低于下限，文本原样返回
    #[serde(rename = "too_short")]
    TooShort,
    /// 超过上限后被硬性截断
    #[serde(rename = "truncated")]
    Truncated,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Ok => write!(f, "ok"),
            ReportStatus::TooShort => write!(f, "too_short"),
            ReportStatus::Truncated => write!(f, "truncated"),
        }
    }
}

/// 最终报告产物，每次请求构造一次，之后不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportResult {
    /// 报告正文
    pub text: String,
    /// 按统一口径统计的字数
    pub word_count: usize,
    /// 字数合规状态
    pub status: ReportStatus,
}
