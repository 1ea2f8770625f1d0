//! LLM生成服务 - 统一的生成接口与采样参数

use async_trait::async_trait;

use crate::error::PipelineError;

pub mod client;

/// 单次生成调用的采样参数
///
/// 三种预设对应流水线的三类调用，温度与回复上限在创建时一次性确定，
/// 调用途中不做调整。
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// 采样温度
    pub temperature: f64,
    /// 核采样阈值，None表示使用provider默认值
    pub top_p: Option<f64>,
    /// 回复token上限
    pub max_output_tokens: u32,
}

impl GenerationParams {
    /// 裁决类调用：温度钉死最低档，回复限制在一个单词的量级
    pub fn deterministic() -> Self {
        Self {
            temperature: 0.0,
            top_p: None,
            max_output_tokens: 16,
        }
    }

    /// 首轮起草：中等温度，给足长文回复空间
    pub fn drafting() -> Self {
        Self {
            temperature: 0.5,
            top_p: Some(0.95),
            max_output_tokens: 3000,
        }
    }

    /// 精修调用：温度同起草，回复上限放宽以容纳扩写
    pub fn refining() -> Self {
        Self {
            temperature: 0.5,
            top_p: None,
            max_output_tokens: 4000,
        }
    }
}

/// 生成服务接口
///
/// 流水线只通过这个接口发起模型调用，真实客户端与测试替身在
/// `GeneratorContext`组装时注入。
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// 单轮生成，返回归一化后的文本
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, PipelineError>;
}

/// 检查生成服务连接和功能是否正常
///
/// 在流水线启动前执行一次最小调用，尽早暴露密钥或网络问题。
pub async fn check_connection(provider: &dyn GenerationProvider) -> Result<(), PipelineError> {
    println!("🔄 正在检查模型连接...");
    match provider
        .generate(
            "You are a helpful assistant.",
            "Hello",
            &GenerationParams::deterministic(),
        )
        .await
    {
        Ok(_) => {
            println!("✅ 模型连接正常");
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ 模型连接失败: {}", e);
            Err(e)
        }
    }
}

// Include tests
#[cfg(test)]
mod tests;
