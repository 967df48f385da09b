//! Force-trigger resolution.
//!
//! Force entries exist so that certain safety- or support-related phrases
//! always receive a specific answer regardless of scoring noise. Matching is
//! plain substring containment against the lower-cased raw message, not
//! token-based: `"exploit"` fires inside `"There's an exploiter"`.
//!
//! Entries are checked in document order and the first hit wins, so the order
//! of the `force` mapping in the rule-set document is an observable contract.

use crate::ruleset::RuleSet;
use crate::{Selection, Stage};

/// Scan `lowered` (the lower-cased raw message) against the rule set's force
/// entries. A hit short-circuits the whole pipeline.
pub(crate) fn forced_response(lowered: &str, rules: &RuleSet) -> Option<Selection> {
    for entry in &rules.force {
        for needle in &entry.needles {
            let needle = needle.to_lowercase();
            if !needle.is_empty() && lowered.contains(&needle) {
                let (rule, response) = resolve_reply(&entry.category, rules);
                return Some(Selection {
                    rule,
                    category: entry.category.clone(),
                    response,
                    stage: Stage::Forced,
                    score: 1.0,
                });
            }
        }
    }
    None
}

/// Resolve the fixed reply for a forced category.
///
/// The force mapping carries only substrings, so the reply text comes from
/// the first rule (document order) whose key or category label equals the
/// force category. A force key that references no rule is tolerated: the
/// category name itself is the reply, mirroring the absent-`response`
/// fallback used everywhere else.
fn resolve_reply(category: &str, rules: &RuleSet) -> (String, String) {
    for named in &rules.responses {
        if named.name == category || named.rule.category == category {
            return (named.name.clone(), named.response_text());
        }
    }
    (category.to_string(), category.to_string())
}
