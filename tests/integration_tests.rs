//! 端到端流水线集成测试
//!
//! 用注入的替身后端跑完整的提交-事件流路径，不触达真实网络服务。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_stream::StreamExt;

use deepreport_rs::Config;
use deepreport_rs::error::PipelineError;
use deepreport_rs::generator::classify::taxonomy::TaxonomyCache;
use deepreport_rs::generator::context::GeneratorContext;
use deepreport_rs::generator::retrieve::KnowledgeBase;
use deepreport_rs::generator::workflow::submit;
use deepreport_rs::llm::{GenerationParams, GenerationProvider};
use deepreport_rs::types::{Credential, ReferenceDocument, ReportStatus, StageEvent};

/// 裁决走固定答案、长文按预置字数出稿的替身模型服务
struct StubProvider {
    verdict: &'static str,
    report_words: usize,
}

#[async_trait]
impl GenerationProvider for StubProvider {
    async fn generate(
        &self,
        _system_prompt: &str,
        user_prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, PipelineError> {
        if params.max_output_tokens <= 64 {
            return Ok(self.verdict.to_string());
        }
        // 长文生成必须拿到拼装好的参考上下文
        assert!(user_prompt.contains("WIKIPEDIA DATA"));
        let words: Vec<String> = (0..self.report_words).map(|i| format!("term{}", i)).collect();
        Ok(format!("Here is the report:\n\n{}.", words.join(" ")))
    }
}

struct StubKnowledgeBase {
    titles: Vec<String>,
    pages: HashMap<String, ReferenceDocument>,
}

impl StubKnowledgeBase {
    fn with_sources(count: usize) -> Self {
        let titles: Vec<String> = (0..count).map(|i| format!("Topic {}", i)).collect();
        let pages = titles
            .iter()
            .map(|t| {
                (
                    t.clone(),
                    ReferenceDocument {
                        url: format!("https://en.wikipedia.org/wiki/{}", t.replace(' ', "_")),
                        text: format!("Encyclopedia text about {}.", t),
                    },
                )
            })
            .collect();
        Self { titles, pages }
    }

    fn empty() -> Self {
        Self {
            titles: Vec::new(),
            pages: HashMap::new(),
        }
    }
}

#[async_trait]
impl KnowledgeBase for StubKnowledgeBase {
    async fn search(&self, _query: &str, limit: usize) -> Result<Vec<String>, PipelineError> {
        Ok(self.titles.iter().take(limit).cloned().collect())
    }

    async fn resolve(&self, title: &str) -> Result<Option<ReferenceDocument>, PipelineError> {
        Ok(self.pages.get(title).cloned())
    }
}

fn pipeline_context(
    verdict: &'static str,
    report_words: usize,
    knowledge_base: StubKnowledgeBase,
) -> Arc<GeneratorContext> {
    let config = Config::default();
    Arc::new(GeneratorContext::with_providers(
        config,
        Arc::new(StubProvider {
            verdict,
            report_words,
        }),
        Arc::new(knowledge_base),
        Arc::new(TaxonomyCache::with_names(vec![])),
    ))
}

async fn run(context: Arc<GeneratorContext>, industry: &str) -> Vec<StageEvent> {
    let credential = Credential::with_ttl_minutes("integration-test-key", 30);
    submit(context, industry.to_string(), credential)
        .collect()
        .await
}

#[tokio::test]
async fn test_full_pipeline_produces_report_in_band() {
    let ctx = pipeline_context("YES", 475, StubKnowledgeBase::with_sources(5));
    let events = run(ctx, "Cybersecurity").await;

    assert_eq!(events[0], StageEvent::Validation(true));
    match &events[1] {
        StageEvent::Sources(urls) => {
            assert_eq!(urls.len(), 5);
            assert!(urls[0].starts_with("https://en.wikipedia.org/wiki/"));
        }
        other => panic!("expected Sources, got {:?}", other),
    }
    match events.last().unwrap() {
        StageEvent::Final(result) => {
            assert_eq!(result.status, ReportStatus::Ok);
            assert!((450..=500).contains(&result.word_count));
            // 对话式开场白在进入结果前被剥离
            assert!(!result.text.starts_with("Here is"));
        }
        other => panic!("expected Final, got {:?}", other),
    }
}

#[tokio::test]
async fn test_overlong_report_is_truncated_to_band() {
    let ctx = pipeline_context("YES", 620, StubKnowledgeBase::with_sources(2));
    let events = run(ctx, "Renewable Energy").await;

    match events.last().unwrap() {
        StageEvent::Final(result) => {
            assert_eq!(result.status, ReportStatus::Truncated);
            assert!(result.word_count <= 500);
            assert!(!result.text.is_empty());
        }
        other => panic!("expected Final, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_input_yields_single_error_event() {
    let ctx = pipeline_context("YES", 475, StubKnowledgeBase::with_sources(5));
    let events = run(ctx, "007").await;

    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0],
        StageEvent::Error(PipelineError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn test_non_industry_is_rejected_after_validation() {
    let ctx = pipeline_context("NO", 475, StubKnowledgeBase::with_sources(5));
    let events = run(ctx, "my neighbour Dave").await;

    assert_eq!(events[0], StageEvent::Validation(false));
    assert!(matches!(
        events[1],
        StageEvent::Error(PipelineError::NotAnIndustry(_))
    ));
}

#[tokio::test]
async fn test_no_sources_is_a_recoverable_error() {
    let ctx = pipeline_context("YES", 475, StubKnowledgeBase::empty());
    let events = run(ctx, "Underwater basket weaving").await;

    assert_eq!(events[0], StageEvent::Validation(true));
    assert_eq!(events[1], StageEvent::Sources(vec![]));
    assert!(matches!(
        events[2],
        StageEvent::Error(PipelineError::NoSourcesFound(_))
    ));
}
