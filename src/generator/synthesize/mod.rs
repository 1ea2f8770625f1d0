//! 报告合成器 - 基于参考文档起草并精修行业报告
//!
//! 合成分三步：拼装上下文、首轮起草、围绕字数区间的精修循环。
//! 精修交给模型做语义级增删，循环耗尽后由本地的硬性字数裁剪兜底，
//! 保证离开本模块的文本永远不超过字数上限。

use std::sync::Arc;

use crate::config::ReportConfig;
use crate::error::PipelineError;
use crate::llm::{GenerationParams, GenerationProvider};
use crate::types::{ReferenceDocument, ReportProgress, ReportResult};
use crate::utils::text_metrics::{enforce_word_limits, strip_preamble, truncate_to_chars, word_count};

pub mod prompts;

use prompts::{SOURCE_SEPARATOR, SYNTHESIS_SYSTEM_PROMPT};

/// 报告合成器
pub struct ReportSynthesizer {
    provider: Arc<dyn GenerationProvider>,
    config: ReportConfig,
}

impl ReportSynthesizer {
    pub fn new(provider: Arc<dyn GenerationProvider>, config: ReportConfig) -> Self {
        Self { provider, config }
    }

    /// 合成一份落在目标字数区间内的行业报告
    ///
    /// 每次字数测量都会通过`on_progress`上报一次（尝试序号与当时字数），
    /// 草稿落入区间即提前退出。精修耗尽仍偏长时做句边界硬裁剪，
    /// 偏短时原样放行并在结果状态中标记。
    pub async fn synthesize(
        &self,
        industry: &str,
        documents: &[ReferenceDocument],
        mut on_progress: impl FnMut(ReportProgress),
    ) -> Result<ReportResult, PipelineError> {
        let min_words = self.config.min_words;
        let max_words = self.config.max_words;
        let target_words = (min_words + max_words) / 2;

        let context = build_context(documents, self.config.context_chars_per_source);

        let initial_prompt =
            prompts::build_initial_prompt(industry, min_words, max_words, target_words, &context);
        let raw = self
            .provider
            .generate(SYNTHESIS_SYSTEM_PROMPT, &initial_prompt, &GenerationParams::drafting())
            .await?;
        let mut draft = strip_preamble(&raw).trim().to_string();

        if draft.is_empty() {
            return Err(PipelineError::EmptyGeneration);
        }

        for attempt in 1..=self.config.refine_attempts {
            let current_words = word_count(&draft);
            on_progress(ReportProgress {
                attempt,
                word_count: current_words,
            });

            if (min_words..=max_words).contains(&current_words) {
                break;
            }

            let refine_prompt = prompts::build_refine_prompt(
                industry,
                &draft,
                current_words,
                min_words,
                max_words,
                &context,
            );
            let raw = self
                .provider
                .generate(SYNTHESIS_SYSTEM_PROMPT, &refine_prompt, &GenerationParams::refining())
                .await?;
            let refined = strip_preamble(&raw).trim().to_string();

            if refined.is_empty() {
                eprintln!("⚠️ 精修返回空文本，保留上一轮草稿");
                break;
            }
            // 精修稿整体替换，不做增量合并
            draft = refined;
        }

        // 本地兜底：无论精修结果如何，超限文本在这里被硬性裁掉
        let (text, status) = enforce_word_limits(&draft, min_words, max_words);
        let final_words = word_count(&text);

        Ok(ReportResult {
            text,
            word_count: final_words,
            status,
        })
    }
}

/// 把参考文档拼装为模型上下文
///
/// 每份文档按字符预算截断后用固定分隔符连接，保留检索排名顺序。
pub(crate) fn build_context(documents: &[ReferenceDocument], chars_per_source: usize) -> String {
    documents
        .iter()
        .map(|doc| truncate_to_chars(&doc.text, chars_per_source))
        .collect::<Vec<_>>()
        .join(SOURCE_SEPARATOR)
}
