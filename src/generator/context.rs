//! 生成上下文 - 流水线各阶段共享的依赖集合
//!
//! 生成服务与知识库都以接口形式持有，真实后端在这里组装一次，
//! 测试通过`with_providers`注入替身，流水线代码对两者无感。

use anyhow::Result;
use std::sync::Arc;

use crate::config::Config;
use crate::generator::classify::taxonomy::TaxonomyCache;
use crate::generator::retrieve::{KnowledgeBase, WikipediaClient};
use crate::llm::GenerationProvider;
use crate::llm::client::LLMClient;
use crate::types::Credential;

/// 生成上下文
pub struct GeneratorContext {
    pub config: Config,
    pub generation: Arc<dyn GenerationProvider>,
    pub knowledge_base: Arc<dyn KnowledgeBase>,
    pub taxonomy: Arc<TaxonomyCache>,
}

impl GeneratorContext {
    /// 用运行时配置与会话凭证组装真实后端
    pub fn new(config: Config, credential: &Credential) -> Result<Self> {
        let mut llm_config = config.clone();
        llm_config.llm.api_key = credential.api_key.clone();

        let client = LLMClient::new(llm_config)?;
        let knowledge_base = Arc::new(WikipediaClient::new(&config.retriever)?);
        let taxonomy = Arc::new(TaxonomyCache::new(&config.classifier)?);

        Ok(Self {
            config,
            generation: Arc::new(client),
            knowledge_base,
            taxonomy,
        })
    }

    /// 注入替身后端，供测试使用
    pub fn with_providers(
        config: Config,
        generation: Arc<dyn GenerationProvider>,
        knowledge_base: Arc<dyn KnowledgeBase>,
        taxonomy: Arc<TaxonomyCache>,
    ) -> Self {
        Self {
            config,
            generation,
            knowledge_base,
            taxonomy,
        }
    }
}
