//! Kampus - 校园问答助手
//!
//! 模块划分：
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **core**: 错误类型、问答管线、组件构建
//! - **directory**: 教职工目录（JSON 数据集，只读）
//! - **llm**: LLM 客户端抽象与实现（OpenAI 兼容 / 智谱 / Mock）
//! - **matcher**: NIP 精确命中 + 姓名模糊匹配
//! - **observability**: 日志
//! - **reply**: 模板回复与远程兜底
//! - **stats**: 每日提问计数

pub mod config;
pub mod core;
pub mod directory;
pub mod llm;
pub mod matcher;
pub mod observability;
pub mod reply;
pub mod stats;

pub use crate::core::{AskReply, PipelineBuilder, ResolutionPipeline, ResolvedAnswer};
