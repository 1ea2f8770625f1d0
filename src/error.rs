use thiserror::Error;

/// 报告流水线的错误分类
///
/// 每个终止条件对应一条具体、可操作的用户提示；`OutOfRange`不在此列，
/// 它作为报告状态（`ReportStatus`）返回，而不是硬性失败。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// 语法门禁失败（长度不足、纯数字、非法字符）
    #[error("输入不合法: {0}，请输入至少3个字符的英文行业名称")]
    InvalidInput(String),

    /// 分类器给出否定裁决
    #[error("“{0}”不是可识别的行业名称，请换用常见的行业、板块或细分领域")]
    NotAnIndustry(String),

    /// 检索器返回空结果
    #[error("未找到与“{0}”相关的参考页面，请尝试更宽泛的行业名称")]
    NoSourcesFound(String),

    /// 网络、超时或传输层错误
    #[error("模型或知识库服务不可用: {0}")]
    ProviderUnavailable(String),

    /// 生成服务返回了空内容
    #[error("模型返回了空内容，无法生成报告")]
    EmptyGeneration,

    /// 凭证已过期，由调用方在派发前检查
    #[error("API凭证已过期，请重新提供有效凭证")]
    CredentialExpired,
}
