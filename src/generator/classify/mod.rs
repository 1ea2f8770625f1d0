//! 行业分类器 - 判定自由文本是否指称一个真实的经济行业
//!
//! 三段式决策，命中确认信号即短路：
//! 1. 语法门禁（本地，失败即拒绝，不发起任何网络调用）
//! 2. 参考名录模糊匹配（命中直接放行，不触发付费的模型调用）
//! 3. 模型兜底裁决（温度钉死最低档，严格二元裁决）

use std::sync::Arc;

use crate::config::ClassifierConfig;
use crate::error::PipelineError;
use crate::llm::{GenerationParams, GenerationProvider};

pub mod taxonomy;

use taxonomy::TaxonomyCache;

/// 通过语法门禁的行业查询
///
/// 不变量：非空、修剪后长度≥3、非纯数字、字符限于
/// 拉丁字母/数字/空白/`& , . - /`。按请求创建，从不持久化。
#[derive(Debug, Clone, PartialEq)]
pub struct IndustryQuery(String);

impl IndustryQuery {
    /// 语法门禁：把廉价可判的非候选输入挡在任何付费调用之前
    pub fn parse(raw: &str) -> Result<Self, PipelineError> {
        let trimmed = raw.trim();

        if trimmed.chars().count() < 3 {
            return Err(PipelineError::InvalidInput(trimmed.to_string()));
        }

        let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
        if !compact.is_empty() && compact.chars().all(|c| c.is_ascii_digit()) {
            return Err(PipelineError::InvalidInput(trimmed.to_string()));
        }

        if !trimmed.chars().all(is_allowed_char) {
            return Err(PipelineError::InvalidInput(trimmed.to_string()));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IndustryQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace() || matches!(c, '&' | ',' | '.' | '-' | '/')
}

/// 分类器的模型兜底系统提示词
const VALIDATION_SYSTEM_PROMPT: &str =
    "You are a strict validation gate for a market research tool. You answer ONLY with 'YES' or 'NO'.";

/// 构建严格二元裁决的用户提示词
fn build_validation_prompt(query: &str) -> String {
    format!(
        r#"Analyze the following input: "{}"

Rules for a "YES" verdict:
1. The input must be in the ENGLISH language.
2. The input must use the Latin/English alphabet (No Cyrillic, Kanji, Arabic, etc.).
3. The input must represent a recognizable industry, sector, or business niche.

Rules for a "NO" verdict:
1. If the input is in a foreign language (e.g., 'Автомобили', '汽车').
2. If the input is a random string of numbers or symbols.
3. If the input is a person's name or a non-business concept.

Answer ONLY with 'YES' or 'NO'."#,
        query
    )
}

/// 解析模型裁决
///
/// 刻意使用全等比较而不是子串包含：宽松解析（"contains YES"）在早期
/// 迭代中造成过误放行，例如模型回复"YES is not appropriate here"。
pub(crate) fn parse_verdict(reply: &str) -> bool {
    reply.trim().to_uppercase() == "YES"
}

/// 行业分类器
pub struct IndustryClassifier {
    provider: Arc<dyn GenerationProvider>,
    taxonomy: Arc<TaxonomyCache>,
    config: ClassifierConfig,
}

impl IndustryClassifier {
    pub fn new(
        provider: Arc<dyn GenerationProvider>,
        taxonomy: Arc<TaxonomyCache>,
        config: ClassifierConfig,
    ) -> Self {
        Self {
            provider,
            taxonomy,
            config,
        }
    }

    /// 判定查询是否指称一个可识别的行业
    ///
    /// 模型服务出错时默认拒绝（fail-closed），返回可恢复的
    /// `ProviderUnavailable`；部署侧可通过`fail_open`覆盖为放行。
    pub async fn is_valid_industry(&self, query: &IndustryQuery) -> Result<bool, PipelineError> {
        // 阶段2：参考名录模糊匹配。名录抓取失败不是终止条件，
        // 降级为仅模型裁决。
        match self.taxonomy.industry_names().await {
            Ok(names) => {
                let best = taxonomy::best_similarity(names, query.as_str());
                if best >= self.config.similarity_cutoff {
                    return Ok(true);
                }
            }
            Err(e) => {
                eprintln!("⚠️ 行业名录不可用，跳过名录匹配: {}", e);
            }
        }

        // 阶段3：模型兜底裁决
        match self.model_verdict(query).await {
            Ok(verdict) => Ok(verdict),
            Err(e) if self.config.fail_open => {
                eprintln!("⚠️ 模型裁决失败，按fail-open配置放行: {}", e);
                Ok(true)
            }
            Err(e) => Err(e),
        }
    }

    async fn model_verdict(&self, query: &IndustryQuery) -> Result<bool, PipelineError> {
        let user_prompt = build_validation_prompt(query.as_str());
        let reply = self
            .provider
            .generate(
                VALIDATION_SYSTEM_PROMPT,
                &user_prompt,
                &GenerationParams::deterministic(),
            )
            .await?;
        Ok(parse_verdict(&reply))
    }
}
