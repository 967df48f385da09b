//! Rule-set data model.
//!
//! A `RuleSet` is the full configuration the engine consumes: keyed response
//! rules, the question-word vocabulary, force-trigger overrides, and the
//! channel allow-list used by the caller-side gate. It is conceptually a JSON
//! document supplied by an external configuration store; the engine only
//! assumes this in-memory shape, never a persistence mechanism.
//!
//! Two properties of the document are load-bearing:
//!
//! - **Order**: tie-breaks keep the earliest rule, so `responses` and `force`
//!   are ordered sequences here, not maps. Deserialization reads the JSON
//!   objects entry by entry and preserves document order end to end.
//! - **Tolerance**: a partially populated document is never an error. Absent
//!   collections are empty, absent `smart_detection` is `true`, and an absent
//!   `response` falls back to the rule's key.
//!
//! The engine is read-only over a `RuleSet`; callers that reload
//! configuration swap in a fresh snapshot between classifications (for
//! example behind an `Arc`), which is safe because classification never
//! mutates the set.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading a rule-set document.
///
/// These belong to the configuration collaborator, not the engine: once a
/// `RuleSet` exists, classification itself is infallible.
#[derive(Debug, Error)]
pub enum RuleSetError {
    #[error("failed to read rule set {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse rule set {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One autoresponder rule.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Rule {
    /// Lower-cased trigger words. A rule with no triggers never matches.
    pub triggers: Vec<String>,
    /// Grouping label for cross-rule mutual exclusion; distinct from the
    /// rule's key, and several keyed rules may share one label. May be empty.
    pub category: String,
    /// Reply text. Absent falls back to the rule's key.
    pub response: Option<String>,
    /// When false, the rule matches on exact token containment with no
    /// question-word or scoring requirement.
    pub smart_detection: bool,
}

impl Default for Rule {
    fn default() -> Self {
        Rule { triggers: Vec::new(), category: String::new(), response: None, smart_detection: true }
    }
}

/// A rule together with its key in the `responses` object.
#[derive(Debug, Clone)]
pub struct NamedRule {
    /// Unique key in the rule-set document.
    pub name: String,
    pub rule: Rule,
}

impl NamedRule {
    /// Reply text for this rule, falling back to the key when the document
    /// carries no `response`.
    pub fn response_text(&self) -> String {
        self.rule.response.clone().unwrap_or_else(|| self.name.clone())
    }
}

/// One force-trigger entry: a category and the literal substrings that force
/// its fixed reply.
#[derive(Debug, Clone)]
pub struct ForceEntry {
    /// Category the forced reply is tied to. May reference no rule; the
    /// engine tolerates the mismatch.
    pub category: String,
    /// Literal substrings matched against the lower-cased raw message.
    pub needles: Vec<String>,
}

/// The full configuration consumed by the engine.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Keyed rules in document order.
    #[serde(deserialize_with = "rules_in_document_order")]
    pub responses: Vec<NamedRule>,
    /// Tokens recognized as question-indicating.
    pub question_words: HashSet<String>,
    /// Force-trigger entries in document order.
    #[serde(deserialize_with = "force_in_document_order")]
    pub force: Vec<ForceEntry>,
    /// Channel allow-list for the caller-side gate. Empty means every
    /// channel. Never consulted by the engine itself.
    pub channel_ids: Vec<String>,
}

impl RuleSet {
    /// Parse a rule-set document from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Load a rule-set document from a file.
    pub fn load(path: &Path) -> Result<Self, RuleSetError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| RuleSetError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&text).map_err(|source| RuleSetError::Parse { path: path.to_path_buf(), source })
    }
}

/// Deserialize the `responses` JSON object into an ordered sequence.
///
/// `serde_json` yields map entries in document order, which is exactly the
/// ordering contract the engine's tie-breaks rely on.
fn rules_in_document_order<'de, D>(deserializer: D) -> Result<Vec<NamedRule>, D::Error>
where
    D: Deserializer<'de>,
{
    struct RulesVisitor;

    impl<'de> Visitor<'de> for RulesVisitor {
        type Value = Vec<NamedRule>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of rule name to rule")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut rules = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, rule)) = map.next_entry::<String, Rule>()? {
                rules.push(NamedRule { name, rule });
            }
            Ok(rules)
        }
    }

    deserializer.deserialize_map(RulesVisitor)
}

/// Deserialize the `force` JSON object into an ordered sequence.
fn force_in_document_order<'de, D>(deserializer: D) -> Result<Vec<ForceEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ForceVisitor;

    impl<'de> Visitor<'de> for ForceVisitor {
        type Value = Vec<ForceEntry>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of category to substring list")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((category, needles)) = map.next_entry::<String, Vec<String>>()? {
                entries.push(ForceEntry { category, needles });
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(ForceVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_document_order() {
        let set = RuleSet::from_json_str(
            r#"{
                "responses": {
                    "zeta": {"triggers": ["z"]},
                    "alpha": {"triggers": ["a"]},
                    "mid": {"triggers": ["m"]}
                },
                "force": {
                    "second": ["b"],
                    "first": ["a"]
                }
            }"#,
        )
        .unwrap();

        let names: Vec<&str> = set.responses.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        let categories: Vec<&str> = set.force.iter().map(|f| f.category.as_str()).collect();
        assert_eq!(categories, vec!["second", "first"]);
    }

    #[test]
    fn absent_collections_are_empty() {
        let set = RuleSet::from_json_str("{}").unwrap();
        assert!(set.responses.is_empty());
        assert!(set.question_words.is_empty());
        assert!(set.force.is_empty());
        assert!(set.channel_ids.is_empty());
    }

    #[test]
    fn rule_defaults_apply_per_field() {
        let set = RuleSet::from_json_str(
            r#"{"responses": {"bare": {}}}"#,
        )
        .unwrap();
        let rule = &set.responses[0].rule;
        assert!(rule.triggers.is_empty());
        assert!(rule.category.is_empty());
        assert!(rule.response.is_none());
        assert!(rule.smart_detection, "smart_detection defaults to true");
    }

    #[test]
    fn response_falls_back_to_the_rule_key() {
        let set = RuleSet::from_json_str(
            r#"{"responses": {"faq": {"triggers": ["faq"]}}}"#,
        )
        .unwrap();
        assert_eq!(set.responses[0].response_text(), "faq");
    }

    #[test]
    fn load_reports_missing_file_with_path() {
        let err = RuleSet::load(Path::new("/nonexistent/triggers.json")).unwrap_err();
        assert!(matches!(err, RuleSetError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/triggers.json"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(RuleSet::from_json_str("{not json").is_err());
    }
}
