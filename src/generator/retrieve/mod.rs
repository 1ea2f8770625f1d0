//! 知识库检索 - 按行业检索参考文档
//!
//! 默认实现走MediaWiki Action API：先做关键词搜索拿到条目标题，
//! 再逐条解析纯文本摘录与规范URL。单个条目解析失败静默丢弃，
//! 排名顺序保留，空结果不是错误。

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::config::RetrieverConfig;
use crate::error::PipelineError;
use crate::types::ReferenceDocument;

/// 知识库检索接口
///
/// 流水线只依赖这个接口，具体后端（MediaWiki或测试替身）在组装时注入。
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    /// 关键词搜索，返回按相关度排序的条目标题
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, PipelineError>;

    /// 按标题解析为参考文档，条目不存在时返回None
    async fn resolve(&self, title: &str) -> Result<Option<ReferenceDocument>, PipelineError>;
}

/// MediaWiki知识库客户端
pub struct WikipediaClient {
    api_base_url: String,
    http: reqwest::Client,
}

impl WikipediaClient {
    pub fn new(config: &RetrieverConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to build knowledge base HTTP client")?;

        Ok(Self {
            api_base_url: config.api_base_url.clone(),
            http,
        })
    }

    async fn get_json(&self, params: &[(&str, &str)]) -> Result<Value, PipelineError> {
        let response = self
            .http
            .get(&self.api_base_url)
            .query(params)
            .send()
            .await
            .map_err(|e| PipelineError::ProviderUnavailable(format!("知识库请求失败: {}", e)))?
            .error_for_status()
            .map_err(|e| PipelineError::ProviderUnavailable(format!("知识库响应异常: {}", e)))?;

        response
            .json::<Value>()
            .await
            .map_err(|e| PipelineError::ProviderUnavailable(format!("知识库响应解析失败: {}", e)))
    }
}

#[async_trait]
impl KnowledgeBase for WikipediaClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, PipelineError> {
        let limit_str = limit.to_string();
        let params = [
            ("action", "query"),
            ("format", "json"),
            ("list", "search"),
            ("srsearch", query),
            ("srlimit", limit_str.as_str()),
        ];

        let body = self.get_json(&params).await?;
        Ok(parse_search_titles(&body))
    }

    async fn resolve(&self, title: &str) -> Result<Option<ReferenceDocument>, PipelineError> {
        let params = [
            ("action", "query"),
            ("format", "json"),
            ("prop", "extracts|info"),
            ("titles", title),
            ("explaintext", "1"),
            ("inprop", "url"),
            ("redirects", "1"),
        ];

        let body = self.get_json(&params).await?;
        Ok(parse_page_document(&body))
    }
}

/// 从搜索响应里提取条目标题，保留API返回的相关度顺序
pub(crate) fn parse_search_titles(body: &Value) -> Vec<String> {
    body["query"]["search"]
        .as_array()
        .map(|hits| {
            hits.iter()
                .filter_map(|hit| hit["title"].as_str())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

/// 从条目响应里提取纯文本摘录与规范URL
///
/// 缺页（pageid为-1或带missing标记）和空摘录都归一化为None，
/// 上层据此静默丢弃该来源。
pub(crate) fn parse_page_document(body: &Value) -> Option<ReferenceDocument> {
    let pages = body["query"]["pages"].as_object()?;
    let (page_id, page) = pages.iter().next()?;

    if page_id == "-1" || page.get("missing").is_some() {
        return None;
    }

    let text = page["extract"].as_str()?.trim();
    if text.is_empty() {
        return None;
    }

    let url = page["fullurl"].as_str()?.to_string();

    Some(ReferenceDocument {
        url,
        text: text.to_string(),
    })
}

/// 按行业检索参考文档
///
/// 搜索命中按排名逐个解析；解析失败或缺页的条目直接跳过，不影响
/// 其余来源。返回空列表由调用方决定是否终止。
pub async fn get_reference_documents(
    knowledge_base: &dyn KnowledgeBase,
    industry: &str,
    max_sources: usize,
) -> Result<Vec<ReferenceDocument>, PipelineError> {
    // 查询原样下发，不做改写：附加词会改变相关度排序，进而改变取回的页面
    let titles = knowledge_base.search(industry, max_sources).await?;

    let mut documents = Vec::with_capacity(titles.len());
    for title in &titles {
        match knowledge_base.resolve(title).await {
            Ok(Some(doc)) => documents.push(doc),
            Ok(None) => {}
            Err(e) => {
                eprintln!("⚠️ 参考文档解析失败，跳过 {}: {}", title, e);
            }
        }
    }

    Ok(documents)
}

// Include tests
#[cfg(test)]
mod tests;
