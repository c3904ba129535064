//! LLM 客户端抽象
//!
//! 所有后端（OpenAI 兼容 / 智谱 / Mock）实现 LlmClient：一次 system + user 的非流式补全。

use async_trait::async_trait;

use crate::core::LlmError;

/// 单轮补全请求：固定 system 提示 + 用户原文，输出上限与温度由调用方给定
#[derive(Clone, Debug, PartialEq)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// LLM 客户端 trait
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// 非流式完成，返回生成文本
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError>;

    /// 获取累计 token 使用统计：(prompt_tokens, completion_tokens, total_tokens)
    /// 默认返回 (0, 0, 0)，具体实现可覆盖
    fn token_usage(&self) -> (u64, u64, u64) {
        (0, 0, 0)
    }
}
