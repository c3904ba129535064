//! 模糊匹配：在目录中找与提问最匹配的教职工
//!
//! 顺序扫描目录：
//! 1. 记录的 NIP（小写）是提问（小写）的子串 → 立即返回该记录，分数 100；
//! 2. 否则计算提问与姓名的 partial ratio，严格大于当前最佳且严格大于置信下限才替换（同分先到先得）。

pub mod similarity;

pub use similarity::partial_ratio;

use crate::directory::{StaffDirectory, StaffRecord};

/// 默认置信下限：分数需严格大于此值
pub const DEFAULT_CONFIDENCE_FLOOR: u8 = 70;

/// 单次匹配结果，借用目录中的记录
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchResult<'a> {
    pub record: &'a StaffRecord,
    /// 0-100
    pub score: u8,
}

#[derive(Clone, Debug)]
pub struct FuzzyMatcher {
    confidence_floor: u8,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_FLOOR)
    }
}

impl FuzzyMatcher {
    pub fn new(confidence_floor: u8) -> Self {
        Self { confidence_floor }
    }

    pub fn confidence_floor(&self) -> u8 {
        self.confidence_floor
    }

    /// 返回最佳匹配；NIP 命中优先于任何姓名分数，未超过下限返回 None
    pub fn find_match<'a>(&self, query: &str, directory: &'a StaffDirectory) -> Option<MatchResult<'a>> {
        let query = query.to_lowercase();
        let mut best: Option<MatchResult<'a>> = None;

        for record in directory.records() {
            // 空 NIP 是任何字符串的子串，不参与精确命中
            if !record.identifier.is_empty() && query.contains(&record.identifier.to_lowercase()) {
                return Some(MatchResult { record, score: 100 });
            }

            let score = partial_ratio(&query, &record.name.to_lowercase());
            let best_score = best.map(|m| m.score).unwrap_or(0);
            if score > self.confidence_floor && score > best_score {
                best = Some(MatchResult { record, score });
            }
        }

        best
    }
}
