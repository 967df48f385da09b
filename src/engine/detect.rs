//! Category detection.
//!
//! For every rule with a non-empty trigger list, count the tokens that
//! fuzzy-match one of its triggers, then keep the rule with the strictly
//! highest count. Ties keep the earliest rule, which makes the document
//! order of `responses` an observable contract rather than an implementation
//! detail.
//!
//! The output is the winning rule's *category label*, not its key: several
//! keyed rules can share one label, and a later stage uses the label for
//! cross-rule mutual exclusion.

use crate::Detection;
use crate::engine::similarity::fuzzy_match_count;
use crate::ruleset::RuleSet;

/// Detect the dominant category for `tokens`, or `None` when no rule matched
/// a single token.
pub(crate) fn detect_category(tokens: &[String], rules: &RuleSet, threshold: f64) -> Option<Detection> {
    let mut best: Option<Detection> = None;

    for named in &rules.responses {
        // Rules without triggers cannot contribute evidence.
        if named.rule.triggers.is_empty() {
            continue;
        }
        let matches = fuzzy_match_count(tokens, &named.rule.triggers, threshold);
        if matches == 0 {
            continue;
        }
        let strictly_better = best.as_ref().is_none_or(|b| matches > b.matches);
        if strictly_better {
            best = Some(Detection { category: named.rule.category.clone(), rule: named.name.clone(), matches });
        }
    }

    best
}
