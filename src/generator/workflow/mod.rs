//! 报告生成工作流 - 驱动校验、检索、合成的阶段事件流
//!
//! `submit`把一次报告请求变成异步阶段事件流，消费端按事件渲染进度；
//! `launch`是命令行入口用的便捷封装，组装真实后端、消费事件并落盘。

use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::{StreamExt, wrappers::ReceiverStream};

use crate::config::Config;
use crate::error::PipelineError;
use crate::generator::classify::{IndustryClassifier, IndustryQuery};
use crate::generator::context::GeneratorContext;
use crate::generator::retrieve::get_reference_documents;
use crate::generator::synthesize::ReportSynthesizer;
use crate::types::{Credential, ReportResult, StageEvent};

/// 提交一次报告请求，返回阶段事件流
///
/// 事件顺序：`Validation` → `Sources` → 零或多个`Progress` → `Final`；
/// 任一阶段失败时以单个`Error`事件收尾，流随即结束。
pub fn submit(
    context: Arc<GeneratorContext>,
    industry: String,
    credential: Credential,
) -> ReceiverStream<StageEvent> {
    let (tx, rx) = mpsc::channel(16);

    tokio::spawn(async move {
        if let Err(e) = run_pipeline(context, &industry, &credential, &tx).await {
            let _ = tx.send(StageEvent::Error(e)).await;
        }
    });

    ReceiverStream::new(rx)
}

async fn run_pipeline(
    context: Arc<GeneratorContext>,
    industry: &str,
    credential: &Credential,
    tx: &mpsc::Sender<StageEvent>,
) -> Result<(), PipelineError> {
    if credential.is_expired(Utc::now()) {
        return Err(PipelineError::CredentialExpired);
    }

    // 阶段1：输入校验（语法门禁 + 行业分类）
    let query = IndustryQuery::parse(industry)?;
    let classifier = IndustryClassifier::new(
        context.generation.clone(),
        context.taxonomy.clone(),
        context.config.classifier.clone(),
    );
    let valid = classifier.is_valid_industry(&query).await?;
    let _ = tx.send(StageEvent::Validation(valid)).await;
    if !valid {
        return Err(PipelineError::NotAnIndustry(query.as_str().to_string()));
    }

    // 阶段2：参考文档检索
    let documents = get_reference_documents(
        context.knowledge_base.as_ref(),
        query.as_str(),
        context.config.report.max_sources,
    )
    .await?;
    let urls: Vec<String> = documents.iter().map(|d| d.url.clone()).collect();
    let _ = tx.send(StageEvent::Sources(urls)).await;
    if documents.is_empty() {
        return Err(PipelineError::NoSourcesFound(query.as_str().to_string()));
    }

    // 阶段3：报告合成与精修
    let synthesizer = ReportSynthesizer::new(
        context.generation.clone(),
        context.config.report.clone(),
    );
    let result = synthesizer
        .synthesize(query.as_str(), &documents, |progress| {
            // 进度事件尽力投递，消费端滞后不阻塞合成
            let _ = tx.try_send(StageEvent::Progress(progress));
        })
        .await?;

    let _ = tx.send(StageEvent::Final(result)).await;
    Ok(())
}

/// 命令行入口：组装真实后端、消费事件流并输出报告
pub async fn launch(config: Config, industry: &str) -> Result<()> {
    println!("🚀 启动行业报告生成: {}", industry);

    let credential = Credential::with_ttl_minutes(
        config.llm.api_key.clone(),
        config.credential_ttl_minutes,
    );
    if credential.api_key.is_empty() {
        anyhow::bail!(
            "缺少API密钥：请设置环境变量 DEEPREPORT_LLM_API_KEY，或通过 --api-key 传入"
        );
    }

    let context = Arc::new(GeneratorContext::new(config.clone(), &credential)?);
    crate::llm::check_connection(context.generation.as_ref()).await?;
    let mut events = submit(context, industry.to_string(), credential);

    let mut report: Option<ReportResult> = None;
    while let Some(event) = events.next().await {
        match event {
            StageEvent::Validation(true) => println!("✅ 行业校验通过"),
            StageEvent::Validation(false) => println!("❌ 行业校验未通过"),
            StageEvent::Sources(urls) => {
                println!("📚 获取到 {} 个参考来源", urls.len());
                if config.verbose {
                    for url in &urls {
                        println!("   - {}", url);
                    }
                }
            }
            StageEvent::Progress(p) => {
                println!("🔄 第 {} 轮字数检查: {} 词", p.attempt, p.word_count);
            }
            StageEvent::Final(result) => report = Some(result),
            StageEvent::Error(e) => return Err(e.into()),
        }
    }

    let report = report.context("流水线在产出报告前终止")?;

    println!("📊 最终字数: {} ({})", report.word_count, report.status);
    if report.word_count < config.report.min_words || report.word_count > config.report.max_words {
        println!(
            "⚠️ 最终字数落在目标区间 {}-{} 之外",
            config.report.min_words, config.report.max_words
        );
    }

    match &config.output_path {
        Some(path) => {
            std::fs::write(path, &report.text)
                .context(format!("Failed to write report to {:?}", path))?;
            println!("✅ 报告已写入 {:?}", path);
        }
        None => {
            println!("\n{}", report.text);
        }
    }

    Ok(())
}
