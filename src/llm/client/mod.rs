//! LLM客户端 - 提供统一的生成服务接口

use anyhow::Result;
use async_trait::async_trait;
use std::future::Future;

use crate::config::Config;
use crate::error::PipelineError;
use crate::llm::{GenerationParams, GenerationProvider};

mod providers;
pub mod utils;

use providers::ProviderClient;
use utils::normalize_response;

/// LLM客户端 - 提供统一的生成服务接口
#[derive(Clone)]
pub struct LLMClient {
    config: Config,
    client: ProviderClient,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(config: Config) -> Result<Self> {
        let client = ProviderClient::new(&config.llm)?;
        Ok(Self { client, config })
    }

    /// 通用重试逻辑，用于处理异步操作的重试机制
    async fn retry_with_backoff<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, anyhow::Error>>,
    {
        let llm_config = &self.config.llm;
        let max_retries = llm_config.retry_attempts;
        let retry_delay_ms = llm_config.retry_delay_ms;
        let mut retries = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(err) => {
                    retries += 1;
                    eprintln!(
                        "❌ 调用模型服务出错，重试中 (第 {} / {}次尝试): {}",
                        retries, max_retries, err
                    );
                    if retries >= max_retries {
                        return Err(err);
                    }
                    tokio::time::sleep(std::time::Duration::from_millis(retry_delay_ms)).await;
                }
            }
        }
    }

    /// 单轮对话，返回归一化后的文本
    async fn prompt_model(
        &self,
        model: &str,
        system_prompt: &str,
        user_prompt: &str,
        params: &GenerationParams,
    ) -> Result<String> {
        let agent = self.client.create_agent(model, system_prompt, params);
        let timeout = std::time::Duration::from_secs(self.config.llm.timeout_seconds);
        let raw = self
            .retry_with_backoff(|| async {
                tokio::time::timeout(timeout, agent.prompt(user_prompt))
                    .await
                    .map_err(|_| {
                        anyhow::anyhow!("模型调用超时 ({}秒)", self.config.llm.timeout_seconds)
                    })?
            })
            .await?;
        Ok(normalize_response(&raw))
    }

    /// 快速裁决类调用，走高能效模型
    pub async fn prompt_efficient(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        params: &GenerationParams,
    ) -> Result<String> {
        self.prompt_model(&self.config.llm.model_efficient, system_prompt, user_prompt, params)
            .await
    }

    /// 长文生成类调用，走高质量模型
    pub async fn prompt_powerful(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        params: &GenerationParams,
    ) -> Result<String> {
        self.prompt_model(&self.config.llm.model_powerful, system_prompt, user_prompt, params)
            .await
    }
}

#[async_trait]
impl GenerationProvider for LLMClient {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, PipelineError> {
        // 裁决类调用（温度钉0、回复极短）走高能效模型，其余走高质量模型
        let result = if params.max_output_tokens <= 64 {
            self.prompt_efficient(system_prompt, user_prompt, params).await
        } else {
            self.prompt_powerful(system_prompt, user_prompt, params).await
        };

        result.map_err(|e| PipelineError::ProviderUnavailable(e.to_string()))
    }
}
