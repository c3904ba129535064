//! Mock LLM 客户端（用于测试或未配置 API Key 时，无需网络）
//!
//! 返回固定回复或固定错误，并记录调用次数与最后一次请求。

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::LlmError;
use crate::llm::{ChatRequest, LlmClient};

#[derive(Debug)]
enum MockBehavior {
    Reply(String),
    Fail(String),
}

/// Mock 客户端：可配置成功回复或失败
#[derive(Debug)]
pub struct MockLlmClient {
    behavior: MockBehavior,
    calls: AtomicUsize,
    last_request: Mutex<Option<ChatRequest>>,
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::replying("Mock: layanan AI belum dikonfigurasi.")
    }
}

impl MockLlmClient {
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_behavior(MockBehavior::Reply(text.into()))
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_behavior(MockBehavior::Fail(message.into()))
    }

    fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// 累计调用次数
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ChatRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap_or_else(|e| e.into_inner()) = Some(request.clone());
        match &self.behavior {
            MockBehavior::Reply(text) => Ok(text.clone()),
            MockBehavior::Fail(message) => Err(LlmError::Request(message.clone())),
        }
    }
}
