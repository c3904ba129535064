//! 问答管线
//!
//! 每次提问：先计数（失败只记日志），再查目录；命中走模板，未命中走远程兜底。
//! SQLite 读写在 spawn_blocking 线程上执行，不占用异步 worker；计数完成后才调用远程模型。

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::directory::StaffDirectory;
use crate::matcher::FuzzyMatcher;
use crate::reply::{RemoteFallback, ResponseTemplater};
use crate::stats::QueryCounter;

/// 管线输出
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedAnswer {
    pub text: String,
}

/// 对外接口 `ask` 的返回体：`{ "reply": "..." }`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskReply {
    pub reply: String,
}

pub struct ResolutionPipeline {
    directory: Arc<StaffDirectory>,
    matcher: FuzzyMatcher,
    templater: ResponseTemplater,
    fallback: RemoteFallback,
    counter: Arc<dyn QueryCounter>,
}

impl ResolutionPipeline {
    pub fn new(
        directory: Arc<StaffDirectory>,
        matcher: FuzzyMatcher,
        templater: ResponseTemplater,
        fallback: RemoteFallback,
        counter: Arc<dyn QueryCounter>,
    ) -> Self {
        Self {
            directory,
            matcher,
            templater,
            fallback,
            counter,
        }
    }

    pub async fn resolve(&self, user_message: &str) -> ResolvedAnswer {
        let counter = Arc::clone(&self.counter);
        match tokio::task::spawn_blocking(move || counter.record_query()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!("Failed to record query: {}", e),
            Err(e) => tracing::warn!("Counter task failed: {}", e),
        }

        let text = match self.matcher.find_match(user_message, &self.directory) {
            Some(m) => {
                tracing::debug!(nip = %m.record.identifier, score = m.score, "Directory match");
                self.templater.render(m.record)
            }
            None => {
                tracing::debug!("No directory match, delegating to remote model");
                self.fallback.generate(user_message).await
            }
        };

        ResolvedAnswer { text }
    }

    pub async fn ask(&self, message: &str) -> AskReply {
        AskReply {
            reply: self.resolve(message).await.text,
        }
    }

    /// 今日提问数（运营面板）；任务失败时为 0
    pub async fn today_count(&self) -> u64 {
        let counter = Arc::clone(&self.counter);
        tokio::task::spawn_blocking(move || counter.today_count())
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Counter task failed: {}", e);
                0
            })
    }

    pub fn directory(&self) -> &StaffDirectory {
        &self.directory
    }
}
