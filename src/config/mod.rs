use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "gemini")]
    #[default]
    Gemini,
    #[serde(rename = "ollama")]
    Ollama,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::DeepSeek => write!(f, "deepseek"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
            LLMProvider::Gemini => write!(f, "gemini"),
            LLMProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LLMProvider::OpenAI),
            "deepseek" => Ok(LLMProvider::DeepSeek),
            "anthropic" => Ok(LLMProvider::Anthropic),
            "gemini" => Ok(LLMProvider::Gemini),
            "ollama" => Ok(LLMProvider::Ollama),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// 报告输出文件路径，不设置则仅打印到标准输出
    pub output_path: Option<PathBuf>,

    /// 凭证有效期（分钟）
    pub credential_ttl_minutes: i64,

    /// LLM模型配置
    pub llm: LLMConfig,

    /// 报告合成配置
    pub report: ReportConfig,

    /// 行业分类器配置
    pub classifier: ClassifierConfig,

    /// 知识库检索配置
    pub retriever: RetrieverConfig,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API KEY
    pub api_key: String,

    /// LLM API基地址（openai兼容provider使用）
    pub api_base_url: String,

    /// 高能效模型，用于行业分类裁决
    pub model_efficient: String,

    /// 高质量模型，用于报告合成与精修
    pub model_powerful: String,

    /// 重试次数
    pub retry_attempts: u32,

    /// 重试间隔（毫秒）
    pub retry_delay_ms: u64,

    /// 超时时间（秒）
    pub timeout_seconds: u64,
}

/// 报告合成配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReportConfig {
    /// 目标字数下限
    pub min_words: usize,

    /// 目标字数上限
    pub max_words: usize,

    /// 每份参考文档进入上下文的字符预算
    pub context_chars_per_source: usize,

    /// 精修循环的最大尝试次数
    pub refine_attempts: usize,

    /// 参考文档数量上限
    pub max_sources: usize,
}

/// 行业分类器配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ClassifierConfig {
    /// 模型服务出错时放行而不是拒绝（默认拒绝，部署时可覆盖）
    pub fail_open: bool,

    /// 参考名录模糊匹配的相似度阈值
    pub similarity_cutoff: f64,

    /// 行业名录页地址
    pub taxonomy_url: String,

    /// 名录抓取超时（秒）
    pub taxonomy_timeout_seconds: u64,
}

/// 知识库检索配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RetrieverConfig {
    /// 知识库API基地址
    pub api_base_url: String,

    /// 请求的User-Agent
    pub user_agent: String,

    /// 请求超时（秒）
    pub timeout_seconds: u64,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: None,
            credential_ttl_minutes: 30,
            llm: LLMConfig::default(),
            report: ReportConfig::default(),
            classifier: ClassifierConfig::default(),
            retriever: RetrieverConfig::default(),
            verbose: false,
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::default(),
            api_key: std::env::var("DEEPREPORT_LLM_API_KEY").unwrap_or_default(),
            api_base_url: String::new(),
            model_efficient: String::from("gemini-2.5-flash"),
            model_powerful: String::from("gemini-2.5-flash"),
            retry_attempts: 2,
            retry_delay_ms: 2000,
            timeout_seconds: 120,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            min_words: 450,
            max_words: 500,
            context_chars_per_source: 6000,
            refine_attempts: 3,
            max_sources: 5,
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            fail_open: false,
            similarity_cutoff: 0.6,
            taxonomy_url: String::from("https://en.wikipedia.org/wiki/Outline_of_industry"),
            taxonomy_timeout_seconds: 10,
        }
    }
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::from("https://en.wikipedia.org/w/api.php"),
            user_agent: String::from("MarketResearchAssistant 101 (deepreport-rs)"),
            timeout_seconds: 30,
        }
    }
}
