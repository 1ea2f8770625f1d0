use crate::config::{Config, LLMProvider};
use clap::Parser;
use std::path::PathBuf;

/// DeepReport-RS - 由Rust与AI驱动的行业调研报告生成引擎
#[derive(Parser, Debug)]
#[command(name = "Briefo (deepreport-rs)")]
#[command(
    about = "AI-based industry report drafting assistant. It validates an industry name, retrieves encyclopedia reference material, and synthesizes a word-count constrained market research report."
)]
#[command(version)]
pub struct Args {
    /// 目标行业名称，例如 "Cybersecurity"
    pub industry: String,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 报告输出文件路径，不指定则打印到标准输出
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// LLM API KEY
    #[arg(long)]
    pub api_key: Option<String>,

    /// LLM Provider (openai, deepseek, anthropic, gemini, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// 高能效模型，用于行业分类裁决
    #[arg(long)]
    pub model_efficient: Option<String>,

    /// 高质量模型，用于报告合成与精修
    #[arg(long)]
    pub model_powerful: Option<String>,

    /// 目标字数下限
    #[arg(long)]
    pub min_words: Option<usize>,

    /// 目标字数上限
    #[arg(long)]
    pub max_words: Option<usize>,

    /// 每份参考文档进入上下文的字符预算
    #[arg(long)]
    pub context_chars: Option<usize>,

    /// 精修循环的最大尝试次数
    #[arg(long)]
    pub refine_attempts: Option<usize>,

    /// 分类器在模型服务出错时放行而不是拒绝
    #[arg(long)]
    pub fail_open: bool,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 将CLI参数转换为配置，命令行参数优先级高于配置文件
    pub fn into_config(self) -> Config {
        let mut config = if let Some(config_path) = &self.config {
            // 显式指定配置文件路径时必须可读
            Config::from_file(config_path).unwrap_or_else(|e| {
                panic!("⚠️ 无法读取配置文件 {:?}: {}", config_path, e)
            })
        } else {
            // 未显式指定时尝试默认位置，不存在则使用默认配置
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join("deepreport.toml");

            if default_config_path.exists() {
                Config::from_file(&default_config_path).unwrap_or_else(|e| {
                    panic!(
                        "⚠️ 无法读取默认配置文件 {:?}: {}",
                        default_config_path, e
                    )
                })
            } else {
                Config::default()
            }
        };

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            if let Ok(provider) = provider_str.parse::<LLMProvider>() {
                config.llm.provider = provider;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的provider: {}，使用默认provider",
                    provider_str
                );
            }
        }
        if let Some(api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = api_base_url;
        }
        if let Some(api_key) = self.api_key {
            config.llm.api_key = api_key;
        }
        if let Some(model_efficient) = self.model_efficient {
            config.llm.model_efficient = model_efficient;
        }
        if let Some(model_powerful) = self.model_powerful {
            config.llm.model_powerful = model_powerful;
        }

        // 覆盖报告合成配置
        if let Some(min_words) = self.min_words {
            config.report.min_words = min_words;
        }
        if let Some(max_words) = self.max_words {
            config.report.max_words = max_words;
        }
        if let Some(context_chars) = self.context_chars {
            config.report.context_chars_per_source = context_chars;
        }
        if let Some(refine_attempts) = self.refine_attempts {
            config.report.refine_attempts = refine_attempts;
        }

        // 覆盖分类器与输出配置
        if self.fail_open {
            config.classifier.fail_open = true;
        }
        if let Some(output_path) = self.output_path {
            config.output_path = Some(output_path);
        }
        config.verbose = self.verbose;

        config
    }
}
