//! 报告生成引擎 - 校验、检索、合成三段流水线

pub mod classify;
pub mod context;
pub mod retrieve;
pub mod synthesize;
pub mod workflow;

pub use context::GeneratorContext;
pub use workflow::{launch, submit};
