//! 回复生成：命中时模板渲染，未命中时远程大模型兜底

pub mod fallback;
pub mod templater;

pub use fallback::{RemoteFallback, APOLOGY_TEXT, DEFAULT_SYSTEM_PROMPT};
pub use templater::{ResponseTemplater, DEFAULT_TEMPLATES};
