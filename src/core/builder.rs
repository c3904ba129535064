//! 管线构建器：从配置组装目录、匹配器、模板、远程兜底与计数器
//!
//! CLI 与 Web 共用同一套初始化逻辑；测试可绕过构建器直接调用 ResolutionPipeline::new 注入替身。

use std::sync::Arc;

use anyhow::Context;

use crate::config::AppConfig;
use crate::core::ResolutionPipeline;
use crate::directory::StaffDirectory;
use crate::llm::{create_zhipu_client, LlmClient, MockLlmClient, OpenAiClient};
use crate::matcher::FuzzyMatcher;
use crate::reply::{RemoteFallback, ResponseTemplater};
use crate::stats::{QueryCounter, SqliteQueryCounter};

/// 按 provider 与环境变量中的 API Key 选择后端；缺 Key 时退回 Mock，进程照常启动
pub fn create_llm_from_config(cfg: &AppConfig) -> Arc<dyn LlmClient> {
    let provider = cfg.llm.provider.to_lowercase();
    let base = cfg.llm.base_url.as_deref();

    match provider.as_str() {
        "zhipu" => match std::env::var("ZHIPU_API_KEY") {
            Ok(key) => {
                let client = create_zhipu_client(base, Some(&cfg.llm.model), Some(&key));
                tracing::info!("Using Zhipu LLM ({})", client.model());
                Arc::new(client)
            }
            Err(_) => {
                tracing::warn!("ZHIPU_API_KEY not set, using Mock LLM");
                Arc::new(MockLlmClient::default())
            }
        },
        "openai" => match std::env::var("OPENAI_API_KEY") {
            Ok(key) => {
                let client = OpenAiClient::new(base, &cfg.llm.model, Some(&key));
                tracing::info!("Using OpenAI LLM ({})", client.model());
                Arc::new(client)
            }
            Err(_) => {
                tracing::warn!("OPENAI_API_KEY not set, using Mock LLM");
                Arc::new(MockLlmClient::default())
            }
        },
        "mock" => Arc::new(MockLlmClient::default()),
        other => {
            tracing::warn!("Unknown LLM provider '{}', using Mock LLM", other);
            Arc::new(MockLlmClient::default())
        }
    }
}

pub struct PipelineBuilder {
    config: AppConfig,
    llm: Option<Arc<dyn LlmClient>>,
    counter: Option<Arc<dyn QueryCounter>>,
}

impl PipelineBuilder {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            llm: None,
            counter: None,
        }
    }

    /// 指定 LLM 客户端（不指定则按配置创建）
    pub fn with_llm(mut self, llm: Arc<dyn LlmClient>) -> Self {
        self.llm = Some(llm);
        self
    }

    /// 指定计数器（不指定则打开配置中的 SQLite 文件）
    pub fn with_counter(mut self, counter: Arc<dyn QueryCounter>) -> Self {
        self.counter = Some(counter);
        self
    }

    pub fn build_fallback(&self, llm: Arc<dyn LlmClient>) -> RemoteFallback {
        let llm_cfg = &self.config.llm;
        let fallback = RemoteFallback::new(llm)
            .with_generation(llm_cfg.max_tokens, llm_cfg.temperature)
            .with_timeout_secs(llm_cfg.timeouts.request);
        match &llm_cfg.system_prompt {
            Some(prompt) => fallback.with_system_prompt(prompt.clone()),
            None => fallback,
        }
    }

    /// 只有计数库打不开会导致启动失败；数据集问题退化为空目录
    pub fn build(self) -> anyhow::Result<ResolutionPipeline> {
        tracing::info!(
            "Starting {}",
            self.config.app.name.as_deref().unwrap_or("kampus")
        );
        let directory = Arc::new(StaffDirectory::load_or_empty(&self.config.app.dataset_path));

        let counter: Arc<dyn QueryCounter> = match self.counter.clone() {
            Some(c) => c,
            None => {
                let path = &self.config.app.counter_db_path;
                Arc::new(
                    SqliteQueryCounter::open(path)
                        .with_context(|| format!("Failed to open counter db {}", path.display()))?,
                )
            }
        };

        let llm = self
            .llm
            .clone()
            .unwrap_or_else(|| create_llm_from_config(&self.config));

        Ok(ResolutionPipeline::new(
            directory,
            FuzzyMatcher::new(self.config.matcher.confidence_floor),
            ResponseTemplater::new(),
            self.build_fallback(llm),
            counter,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_with_missing_dataset_falls_back() {
        let tmp = tempfile::tempdir().unwrap();
        let mut cfg = AppConfig::default();
        cfg.app.dataset_path = tmp.path().join("missing.json");
        cfg.app.counter_db_path = tmp.path().join("questions.db");
        cfg.app.name = Some("kampus-test".into());

        let llm = Arc::new(MockLlmClient::replying("dari model"));
        let pipeline = PipelineBuilder::new(cfg).with_llm(llm.clone()).build().unwrap();

        assert!(pipeline.directory().is_empty());
        assert_eq!(pipeline.resolve("budi santoso").await.text, "dari model");
        assert_eq!(llm.calls(), 1);
        assert_eq!(pipeline.today_count().await, 1);
    }

    #[tokio::test]
    async fn test_system_prompt_override() {
        let mut cfg = AppConfig::default();
        cfg.llm.system_prompt = Some("custom persona".into());
        cfg.llm.max_tokens = 100;
        let llm = Arc::new(MockLlmClient::replying("ok"));
        let fallback = PipelineBuilder::new(cfg).build_fallback(llm.clone());
        fallback.generate("halo").await;
        let request = llm.last_request().unwrap();
        assert_eq!(request.system, "custom persona");
        assert_eq!(request.max_tokens, 100);
    }

    #[test]
    fn test_mock_provider() {
        let mut cfg = AppConfig::default();
        cfg.llm.provider = "mock".into();
        assert_eq!(create_llm_from_config(&cfg).token_usage(), (0, 0, 0));
    }
}
