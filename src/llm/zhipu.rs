//! 智谱 GLM 客户端（OpenAI 兼容格式）
//!
//! - Base URL: https://open.bigmodel.cn/api/paas/v4
//! - 模型: glm-4.5（默认）

use crate::llm::OpenAiClient;

/// 智谱 API 常量
pub const ZHIPU_BASE_URL: &str = "https://open.bigmodel.cn/api/paas/v4";
pub const GLM_4_5: &str = "glm-4.5";

/// 创建智谱客户端
///
/// - `api_key` 未传入时读取环境变量 `ZHIPU_API_KEY`
/// - `base_url` 未传入时使用官方端点
pub fn create_zhipu_client(base_url: Option<&str>, model: Option<&str>, api_key: Option<&str>) -> OpenAiClient {
    let api_key = api_key
        .map(String::from)
        .or_else(|| std::env::var("ZHIPU_API_KEY").ok())
        .unwrap_or_else(|| "sk-placeholder".to_string());

    let model = model.unwrap_or(GLM_4_5);

    OpenAiClient::new(Some(base_url.unwrap_or(ZHIPU_BASE_URL)), model, Some(api_key.as_str()))
}
