//! LLM 层：客户端抽象与实现（OpenAI 兼容 / 智谱 / Mock）

pub mod mock;
pub mod openai;
pub mod traits;
pub mod zhipu;

pub use mock::MockLlmClient;
pub use openai::{OpenAiClient, TokenUsage};
pub use traits::{ChatRequest, LlmClient};
pub use zhipu::{create_zhipu_client, GLM_4_5, ZHIPU_BASE_URL};
