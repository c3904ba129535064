//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `KAMPUS__*` 覆盖（双下划线表示嵌套，如 `KAMPUS__LLM__PROVIDER=openai`）。
//! API Key 不放配置文件，只读环境变量（`ZHIPU_API_KEY` / `OPENAI_API_KEY`）。

use std::path::PathBuf;

use serde::Deserialize;

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSection,
    #[serde(default)]
    pub matcher: MatcherSection,
    #[serde(default)]
    pub llm: LlmSection,
    #[serde(default)]
    pub web: WebSection,
}

/// [app] 段：应用名、数据集路径、计数库路径
#[derive(Debug, Clone, Deserialize)]
pub struct AppSection {
    pub name: Option<String>,
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,
    #[serde(default = "default_counter_db_path")]
    pub counter_db_path: PathBuf,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: None,
            dataset_path: default_dataset_path(),
            counter_db_path: default_counter_db_path(),
        }
    }
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/dataset_dosen.json")
}

fn default_counter_db_path() -> PathBuf {
    PathBuf::from("questions.db")
}

/// [matcher] 段：模糊匹配置信下限（严格大于才算命中）
#[derive(Debug, Clone, Deserialize)]
pub struct MatcherSection {
    #[serde(default = "default_confidence_floor")]
    pub confidence_floor: u8,
}

impl Default for MatcherSection {
    fn default() -> Self {
        Self {
            confidence_floor: default_confidence_floor(),
        }
    }
}

fn default_confidence_floor() -> u8 {
    crate::matcher::DEFAULT_CONFIDENCE_FLOOR
}

/// [llm] 段：后端选择、生成参数与超时
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSection {
    /// 后端：zhipu / openai / mock
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    pub base_url: Option<String>,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// 覆盖内置人设提示
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub timeouts: LlmTimeoutsSection,
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            base_url: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            system_prompt: None,
            timeouts: LlmTimeoutsSection::default(),
        }
    }
}

fn default_provider() -> String {
    "zhipu".to_string()
}

fn default_model() -> String {
    crate::llm::GLM_4_5.to_string()
}

fn default_max_tokens() -> u32 {
    crate::reply::fallback::DEFAULT_MAX_TOKENS
}

fn default_temperature() -> f32 {
    crate::reply::fallback::DEFAULT_TEMPERATURE
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmTimeoutsSection {
    #[serde(default = "default_request_timeout")]
    pub request: u64,
}

impl Default for LlmTimeoutsSection {
    fn default() -> Self {
        Self {
            request: default_request_timeout(),
        }
    }
}

fn default_request_timeout() -> u64 {
    60
}

/// [web] 段：kampus-web 监听端口
#[derive(Debug, Clone, Deserialize)]
pub struct WebSection {
    #[serde(default = "default_web_port")]
    pub port: u16,
}

impl Default for WebSection {
    fn default() -> Self {
        Self {
            port: default_web_port(),
        }
    }
}

fn default_web_port() -> u16 {
    8080
}

/// 从 config 目录加载配置，环境变量 KAMPUS__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml、default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 KAMPUS__*（双下划线表示嵌套键）
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(
                config::File::with_name(name).required(false),
            );
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("KAMPUS")
            .separator("__")
            .try_parsing(true),
    );

    let c = builder.build()?;
    c.try_deserialize()
}

/// 加载失败时记录警告并回退到默认配置
pub fn load_config_or_default(config_path: Option<PathBuf>) -> AppConfig {
    load_config(config_path).unwrap_or_else(|e| {
        tracing::warn!("Config load failed ({}), using defaults", e);
        AppConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.matcher.confidence_floor, 70);
        assert_eq!(cfg.llm.provider, "zhipu");
        assert_eq!(cfg.llm.model, "glm-4.5");
        assert_eq!(cfg.llm.max_tokens, 800);
        assert_eq!(cfg.llm.timeouts.request, 60);
        assert_eq!(cfg.app.dataset_path, PathBuf::from("data/dataset_dosen.json"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[llm]\nprovider = \"mock\"\n\n[matcher]\nconfidence_floor = 80").unwrap();
        let cfg: AppConfig = config::Config::builder()
            .add_source(config::File::from(file.path().to_path_buf()))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(cfg.llm.provider, "mock");
        assert_eq!(cfg.llm.model, "glm-4.5");
        assert_eq!(cfg.matcher.confidence_floor, 80);
        assert_eq!(cfg.app.counter_db_path, PathBuf::from("questions.db"));
    }
}
