//! 错误类型
//!
//! 三类错误各自在边界处被消化：数据集加载失败退化为空目录，远程调用失败转为道歉文案，
//! 计数失败只记日志。管线对调用方永远返回文本。

use thiserror::Error;

/// 数据集加载错误（启动期）
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Dataset read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// 远程大模型调用错误（每次查询）
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    Request(String),

    #[error("LLM returned empty response")]
    EmptyResponse,

    #[error("LLM request timed out after {0}s")]
    Timeout(u64),
}

/// 计数存储错误（每次查询）
#[derive(Error, Debug)]
pub enum CounterError {
    #[error("Counter store error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Counter store path error: {0}")]
    Io(#[from] std::io::Error),

    /// 持锁线程 panic 导致连接不可用
    #[error("Counter store lock poisoned")]
    Lock,
}
