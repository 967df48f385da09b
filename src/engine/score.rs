//! Exact-token matching and rule scoring.
//!
//! Two selection passes live here, in priority order:
//!
//! 1. **Non-smart exact scan**: rules with `smart_detection == false` match
//!    on exact whole-token containment, with no question-word or scoring
//!    requirement. They encode an unconditional-match author intent, so the
//!    first hit (document order) short-circuits the scored path entirely.
//! 2. **Scored pass**: every smart rule gets a normalized fuzzy-match density
//!    score, `matched tokens / trigger count`. Once a category is pinned by
//!    detection, rules carrying a different non-empty category label are
//!    excluded. The strictly highest score wins; ties keep the earliest rule.

use crate::engine::similarity::{fuzzy_match_count, is_fuzzy_match};
use crate::ruleset::RuleSet;
use crate::{Detection, ScoredRule, Selection, Stage};

/// First non-smart rule (document order) with any trigger present as a whole
/// token in the message.
pub(crate) fn exact_match(tokens: &[String], rules: &RuleSet) -> Option<Selection> {
    for named in &rules.responses {
        if named.rule.smart_detection {
            continue;
        }
        let hit = named.rule.triggers.iter().any(|trigger| tokens.iter().any(|token| token == trigger));
        if hit {
            return Some(Selection {
                rule: named.name.clone(),
                category: named.rule.category.clone(),
                response: named.response_text(),
                stage: Stage::Exact,
                score: 1.0,
            });
        }
    }
    None
}

/// Score every smart rule and return the strictly-best selection (if any rule
/// scored above zero) together with the full per-rule record.
pub(crate) fn score_rules(
    tokens: &[String],
    rules: &RuleSet,
    detection: Option<&Detection>,
    threshold: f64,
) -> (Option<Selection>, Vec<ScoredRule>) {
    let mut best: Option<Selection> = None;
    let mut scores: Vec<ScoredRule> = Vec::new();

    for named in &rules.responses {
        if !named.rule.smart_detection {
            continue;
        }

        // Once a category is pinned, cross-category rules are mutually
        // exclusive. Rules with an empty label are never excluded.
        let excluded = detection
            .is_some_and(|d| !named.rule.category.is_empty() && named.rule.category != d.category);
        if excluded {
            scores.push(ScoredRule {
                rule: named.name.clone(),
                category: named.rule.category.clone(),
                matches: 0,
                score: 0.0,
                skipped: true,
            });
            continue;
        }

        let trigger_count = named.rule.triggers.len();
        let matches = if trigger_count == 0 { 0 } else { fuzzy_match_count(tokens, &named.rule.triggers, threshold) };
        let score = if trigger_count == 0 { 0.0 } else { matches as f64 / trigger_count as f64 };

        scores.push(ScoredRule {
            rule: named.name.clone(),
            category: named.rule.category.clone(),
            matches,
            score,
            skipped: false,
        });

        // Strict inequality keeps the earliest rule on ties; zero-score rules
        // never become the best match.
        if score > best.as_ref().map_or(0.0, |b| b.score) {
            best = Some(Selection {
                rule: named.name.clone(),
                category: named.rule.category.clone(),
                response: named.response_text(),
                stage: Stage::Scored,
                score,
            });
        }
    }

    (best, scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::similarity::SIMILARITY_THRESHOLD;
    use crate::engine::tokenize::tokenize;
    use crate::ruleset::{NamedRule, Rule};

    fn named(name: &str, triggers: &[&str], category: &str, smart: bool) -> NamedRule {
        NamedRule {
            name: name.to_string(),
            rule: Rule {
                triggers: triggers.iter().map(|s| s.to_string()).collect(),
                category: category.to_string(),
                response: None,
                smart_detection: smart,
            },
        }
    }

    #[test]
    fn exact_scan_requires_whole_tokens() {
        let rules =
            RuleSet { responses: vec![named("ping", &["ping"], "", false)], ..RuleSet::default() };
        assert!(exact_match(&tokenize("ping"), &rules).is_some());
        // Substrings of a token do not count.
        assert!(exact_match(&tokenize("pinging the server"), &rules).is_none());
    }

    #[test]
    fn exact_scan_ignores_smart_rules() {
        let rules = RuleSet { responses: vec![named("ping", &["ping"], "", true)], ..RuleSet::default() };
        assert!(exact_match(&tokenize("ping"), &rules).is_none());
    }

    #[test]
    fn exact_scan_first_match_wins() {
        let rules = RuleSet {
            responses: vec![named("a", &["ping"], "", false), named("b", &["ping"], "", false)],
            ..RuleSet::default()
        };
        assert_eq!(exact_match(&tokenize("ping everyone"), &rules).unwrap().rule, "a");
    }

    #[test]
    fn score_is_match_density() {
        let rules = RuleSet {
            responses: vec![named("mobile", &["mobile", "update"], "mobile", true)],
            ..RuleSet::default()
        };
        let tokens = tokenize("when is the mobile update");
        let (best, scores) = score_rules(&tokens, &rules, None, SIMILARITY_THRESHOLD);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].matches, 2);
        assert_eq!(best.unwrap().score, 1.0);
    }

    #[test]
    fn pinned_category_excludes_other_labels() {
        let rules = RuleSet {
            responses: vec![
                named("pc", &["when", "is", "the", "release"], "pc", true),
                named("mobile", &["mobile"], "mobile", true),
            ],
            ..RuleSet::default()
        };
        let tokens = tokenize("when is the mobile release");
        let detection =
            Detection { category: "mobile".to_string(), rule: "mobile".to_string(), matches: 1 };
        let (best, scores) = score_rules(&tokens, &rules, Some(&detection), SIMILARITY_THRESHOLD);
        // "pc" would have scored 4/4 but is excluded by the pinned category.
        assert!(scores[0].skipped);
        assert_eq!(best.unwrap().rule, "mobile");
    }

    #[test]
    fn empty_category_labels_are_never_excluded() {
        let rules = RuleSet { responses: vec![named("misc", &["mobile"], "", true)], ..RuleSet::default() };
        let detection = Detection { category: "mobile".to_string(), rule: "m".to_string(), matches: 1 };
        let (best, _) = score_rules(&tokenize("mobile stuff"), &rules, Some(&detection), SIMILARITY_THRESHOLD);
        assert!(best.is_some());
    }

    #[test]
    fn ties_keep_the_earliest_rule() {
        let rules = RuleSet {
            responses: vec![named("first", &["update"], "", true), named("second", &["update"], "", true)],
            ..RuleSet::default()
        };
        let (best, _) = score_rules(&tokenize("the update"), &rules, None, SIMILARITY_THRESHOLD);
        assert_eq!(best.unwrap().rule, "first");
    }

    #[test]
    fn zero_triggers_score_zero() {
        let rules = RuleSet { responses: vec![named("empty", &[], "", true)], ..RuleSet::default() };
        let (best, scores) = score_rules(&tokenize("anything here"), &rules, None, SIMILARITY_THRESHOLD);
        assert!(best.is_none());
        assert_eq!(scores[0].score, 0.0);
    }
}
