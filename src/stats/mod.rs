//! 运营统计：每日提问量

pub mod counter;

pub use counter::{today, QueryCounter, SqliteQueryCounter};
