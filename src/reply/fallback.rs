//! 远程兜底：目录未命中时把原始提问交给大模型
//!
//! 固定 system 提示（人设 + 只答学术相关），固定输出上限与温度；最多调用一次、不重试。
//! 任何失败（网络、空回复、超时）都转为固定道歉文案，绝不向调用方抛错。

use std::sync::Arc;
use std::time::Duration;

use crate::core::LlmError;
use crate::llm::{ChatRequest, LlmClient};

pub const DEFAULT_SYSTEM_PROMPT: &str = "Lo sekarang jadi chatbot akademik Universitas Diponegoro (UNDIP). \
Jawaban lo wajib pake bahasa santai, gaul, ala anak muda jaman sekarang 🤙, \
tapi tetep sopan, singkat, jelas, dan gak keluar konteks akademik.";

pub const APOLOGY_TEXT: &str = "⚠️ Maaf bro, ada error pas kita ngehubungin Server🙏";

pub const DEFAULT_MAX_TOKENS: u32 = 800;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

pub struct RemoteFallback {
    llm: Arc<dyn LlmClient>,
    system_prompt: String,
    max_tokens: u32,
    temperature: f32,
    timeout_secs: u64,
}

impl RemoteFallback {
    /// 默认 system 提示、800 tokens、温度 0.7、60 秒超时
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: 60,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_generation(mut self, max_tokens: u32, temperature: f32) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// 生成回复；成功时去掉首尾空白，失败时返回 APOLOGY_TEXT
    pub async fn generate(&self, user_message: &str) -> String {
        match self.try_generate(user_message).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Remote model call failed: {}", e);
                APOLOGY_TEXT.to_string()
            }
        }
    }

    async fn try_generate(&self, user_message: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            system: self.system_prompt.clone(),
            user: user_message.to_string(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let text = tokio::time::timeout(
            Duration::from_secs(self.timeout_secs),
            self.llm.complete(&request),
        )
        .await
        .map_err(|_| LlmError::Timeout(self.timeout_secs))??;

        let (prompt_tokens, completion_tokens, total_tokens) = self.llm.token_usage();
        tracing::debug!(prompt_tokens, completion_tokens, total_tokens, "Cumulative LLM token usage");

        let text = text.trim();
        if text.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text.to_string())
    }
}
