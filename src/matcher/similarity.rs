//! 字符串相似度：partial ratio
//!
//! 短串与长串中每个等长子串做归一化编辑距离相似度（strsim），取最大值，换算为 0-100 的整数。
//! 按 char 切窗，非 ASCII 姓名同样适用。

/// 0-100：短串与长串最佳对齐子串的相似度；任一为空时为 0
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let (shorter, longer) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    let shorter: String = shorter.iter().collect();

    let mut best = 0.0f64;
    for window in longer.windows(shorter.chars().count()) {
        let window: String = window.iter().collect();
        let r = strsim::normalized_levenshtein(&shorter, &window);
        if r > best {
            best = r;
            if best >= 1.0 {
                break;
            }
        }
    }
    (best * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contained_is_full_score() {
        assert_eq!(partial_ratio("siapa budi santoso itu", "budi santoso"), 100);
        assert_eq!(partial_ratio("budi santoso", "siapa budi santoso itu"), 100);
    }

    #[test]
    fn test_identical() {
        assert_eq!(partial_ratio("siti aminah", "siti aminah"), 100);
    }

    #[test]
    fn test_one_letter_typo_stays_high() {
        let score = partial_ratio("budi santosoo", "budi santoso");
        assert!(score > 90, "score = {}", score);
        assert_eq!(partial_ratio("budi santosa", "budi santoso"), 92);
    }

    #[test]
    fn test_unrelated_is_low() {
        let score = partial_ratio("jadwal ujian semester depan", "budi santoso");
        assert!(score <= 70, "score = {}", score);
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(partial_ratio("", "budi"), 0);
        assert_eq!(partial_ratio("budi", ""), 0);
    }

    #[test]
    fn test_non_ascii_windows_by_char() {
        assert_eq!(partial_ratio("dosen jürgen müller", "jürgen müller"), 100);
    }
}
