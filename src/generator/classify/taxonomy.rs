//! 行业参考名录 - 进程生命周期缓存的已知行业名称列表
//!
//! 名录来自一个公开的行业大纲页，首次使用时抓取一次，之后常驻内存。
//! 抓取失败只是降级信号，分类器会跳过名录匹配直接走模型裁决。

use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use regex::Regex;
use tokio::sync::OnceCell;

use crate::config::ClassifierConfig;
use crate::error::PipelineError;

/// 行业参考名录缓存
pub struct TaxonomyCache {
    url: String,
    http: reqwest::Client,
    names: OnceCell<Vec<String>>,
}

impl TaxonomyCache {
    pub fn new(config: &ClassifierConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.taxonomy_timeout_seconds))
            .user_agent("MarketResearchAssistant 101 (deepreport-rs)")
            .build()
            .context("Failed to build taxonomy HTTP client")?;

        Ok(Self {
            url: config.taxonomy_url.clone(),
            http,
            names: OnceCell::new(),
        })
    }

    /// 用固定名称列表构造，供测试与离线场景使用
    pub fn with_names(names: Vec<String>) -> Self {
        Self {
            url: String::new(),
            http: reqwest::Client::new(),
            names: OnceCell::new_with(Some(names)),
        }
    }

    /// 返回名录，首次调用触发抓取，之后直接命中缓存
    ///
    /// 注意：首次抓取失败不会毒化缓存，下一次调用会重新尝试。
    pub async fn industry_names(&self) -> Result<&[String], PipelineError> {
        let names = self
            .names
            .get_or_try_init(|| async { self.fetch().await })
            .await?;
        Ok(names.as_slice())
    }

    async fn fetch(&self) -> Result<Vec<String>, PipelineError> {
        let body = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| PipelineError::ProviderUnavailable(format!("行业名录请求失败: {}", e)))?
            .error_for_status()
            .map_err(|e| PipelineError::ProviderUnavailable(format!("行业名录响应异常: {}", e)))?
            .text()
            .await
            .map_err(|e| PipelineError::ProviderUnavailable(format!("行业名录读取失败: {}", e)))?;

        Ok(extract_list_anchors(&body))
    }
}

/// 从HTML中提取列表项里的链接文本作为候选行业名称
///
/// 只做锚文本级别的粗提取，不解析完整DOM。页面噪声（导航、脚注）
/// 混进来没有危害，模糊匹配只关心是否存在足够相似的条目。
pub(crate) fn extract_list_anchors(html: &str) -> Vec<String> {
    static ANCHOR_RE: OnceLock<Regex> = OnceLock::new();
    let re =
        ANCHOR_RE.get_or_init(|| Regex::new(r#"(?i)<li>\s*<a\b[^>]*>([^<]+)</a>"#).unwrap());

    re.captures_iter(html)
        .map(|cap| cap[1].trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .collect()
}

/// 查询与名录中最接近条目的相似度
pub fn best_similarity(names: &[String], query: &str) -> f64 {
    let query = query.to_lowercase();
    names
        .iter()
        .map(|name| similarity(&query, name))
        .fold(0.0, f64::max)
}

/// 归一化编辑距离相似度，1.0为完全一致
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - (levenshtein_distance(a, b) as f64 / max_len as f64)
}

fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0usize; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b_len {
        matrix[0][j] = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[a_len][b_len]
}
