//! 核心编排层：错误类型、问答管线、组件构建

pub mod builder;
pub mod error;
pub mod pipeline;

pub use builder::{create_llm_from_config, PipelineBuilder};
pub use error::{CounterError, DatasetError, LlmError};
pub use pipeline::{AskReply, ResolutionPipeline, ResolvedAnswer};
