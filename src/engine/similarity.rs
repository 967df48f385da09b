//! Fuzzy token-similarity metric.
//!
//! Every trigger comparison in the engine goes through this module: category
//! detection and per-rule scoring both count tokens whose similarity to a
//! trigger word exceeds [`SIMILARITY_THRESHOLD`]. Keeping the ratio and the
//! threshold here, as one shared definition, means a tuning change applies
//! everywhere at once.
//!
//! The ratio is a longest-common-subsequence sequence-matching ratio over
//! characters:
//!
//! ```text
//! similarity(a, b) = 2 * lcs(a, b) / (|a| + |b|)
//! ```
//!
//! Two equal strings score `1.0`; strings with no characters in common score
//! `0.0`. "Is a match" is a *strict* inequality against the threshold.

/// Similarity above which a token counts as matching a trigger word
/// (strictly greater; `0.8` exactly is not a match).
pub const SIMILARITY_THRESHOLD: f64 = 0.8;

/// Sequence-matching ratio between two strings, in the closed range `[0, 1]`.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    (2.0 * lcs_len(&a, &b) as f64) / ((a.len() + b.len()) as f64)
}

/// Longest-common-subsequence length (two-row dynamic programming).
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb { prev[j] + 1 } else { prev[j + 1].max(curr[j]) };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// True when `token` fuzzy-matches `trigger` at the given threshold.
pub(crate) fn is_fuzzy_match(token: &str, trigger: &str, threshold: f64) -> bool {
    similarity_ratio(token, trigger) > threshold
}

/// Count the tokens for which *any* trigger word is a fuzzy match.
///
/// This single count is the evidence used by both category detection and
/// rule scoring.
pub(crate) fn fuzzy_match_count(tokens: &[String], triggers: &[String], threshold: f64) -> usize {
    tokens.iter().filter(|token| triggers.iter().any(|trigger| is_fuzzy_match(token, trigger, threshold))).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_strings_score_one() {
        assert_eq!(similarity_ratio("update", "update"), 1.0);
        assert_eq!(similarity_ratio("", ""), 1.0);
    }

    #[test]
    fn disjoint_strings_score_zero() {
        assert_eq!(similarity_ratio("abc", "xyz"), 0.0);
        assert_eq!(similarity_ratio("ping", ""), 0.0);
    }

    #[test]
    fn near_miss_scores_high() {
        // "updat" vs "update": lcs = 5, ratio = 10/11.
        let ratio = similarity_ratio("updat", "update");
        assert!(ratio > 0.9 && ratio < 1.0);
        assert!(is_fuzzy_match("updat", "update", SIMILARITY_THRESHOLD));
    }

    #[test]
    fn threshold_is_strict() {
        // "abcd" vs "abcdxy": lcs = 4, ratio = 8/10 = 0.8 exactly.
        assert_eq!(similarity_ratio("abcd", "abcdxy"), 0.8);
        assert!(!is_fuzzy_match("abcd", "abcdxy", SIMILARITY_THRESHOLD));
    }

    #[test]
    fn ratio_is_symmetric() {
        assert_eq!(similarity_ratio("mobile", "mobil"), similarity_ratio("mobil", "mobile"));
    }

    #[test]
    fn counts_tokens_not_triggers() {
        let tokens: Vec<String> = ["when", "is", "the", "mobile", "update"].iter().map(|s| s.to_string()).collect();
        let triggers: Vec<String> = ["mobile", "update"].iter().map(|s| s.to_string()).collect();
        // Two tokens match; the count is over tokens even though each token
        // is checked against every trigger.
        assert_eq!(fuzzy_match_count(&tokens, &triggers, SIMILARITY_THRESHOLD), 2);
    }
}
