//! 每日提问计数（SQLite）
//!
//! 表 `question_count(date TEXT PRIMARY KEY, count INTEGER)`，date 为本地时区 `YYYY-MM-DD`。
//! 自增用单条 upsert 完成，且整个连接由 Mutex 串行化，同一天的并发首问不会冲突也不会丢计数。

use std::path::Path;
use std::sync::Mutex;

use chrono::{Local, NaiveDate};
use rusqlite::{params, Connection, OptionalExtension};

use crate::core::CounterError;

/// 计数存储抽象：管线只依赖此 trait，测试可替换
pub trait QueryCounter: Send + Sync {
    /// 给指定日期计数 +1（不存在则插入 1）
    fn record_query_on(&self, date: NaiveDate) -> Result<(), CounterError>;

    /// 指定日期的计数；无记录或读取失败时为 0
    fn count_for(&self, date: NaiveDate) -> u64;

    /// 给今天计数 +1
    fn record_query(&self) -> Result<(), CounterError> {
        self.record_query_on(today())
    }

    fn today_count(&self) -> u64 {
        self.count_for(today())
    }
}

/// 本地时区的今天
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub struct SqliteQueryCounter {
    conn: Mutex<Connection>,
}

impl SqliteQueryCounter {
    /// 打开（或创建）数据库文件并建表；父目录不存在时自动创建
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CounterError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, CounterError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, CounterError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS question_count (
                date TEXT PRIMARY KEY,
                count INTEGER NOT NULL
            );",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn try_count_for(&self, date: NaiveDate) -> Result<u64, CounterError> {
        let conn = self.conn.lock().map_err(|_| CounterError::Lock)?;
        let count: Option<i64> = conn
            .query_row(
                "SELECT count FROM question_count WHERE date = ?1",
                params![date_key(date)],
                |row| row.get(0),
            )
            .optional()?;
        Ok(count.unwrap_or(0).max(0) as u64)
    }
}

impl QueryCounter for SqliteQueryCounter {
    fn record_query_on(&self, date: NaiveDate) -> Result<(), CounterError> {
        let conn = self.conn.lock().map_err(|_| CounterError::Lock)?;
        conn.execute(
            "INSERT INTO question_count (date, count) VALUES (?1, 1)
             ON CONFLICT(date) DO UPDATE SET count = count + 1",
            params![date_key(date)],
        )?;
        Ok(())
    }

    fn count_for(&self, date: NaiveDate) -> u64 {
        self.try_count_for(date).unwrap_or_else(|e| {
            tracing::warn!("Counter read failed for {}: {}", date, e);
            0
        })
    }
}
