extern crate self as autoreply;

#[macro_use]
mod macros;
mod api;
mod engine;
mod ruleset;

pub use api::{
    ClassifyDetails, ClassifyResult, ClassifyResultVerbose, Context, Options, Reply, RuleScore, classify,
    classify_verbose, classify_verbose_with, classify_with,
};
pub use engine::{MIN_MESSAGE_TOKENS, SIMILARITY_THRESHOLD, similarity_ratio};
pub use ruleset::{ForceEntry, NamedRule, Rule, RuleSet, RuleSetError};

// --- Internal types ---------------------------------------------------------

/// Derived reading of a message, used to gate whether a scored match is
/// actually emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// The message is a question about a detected category.
    Asking,
    /// The message mentions a detected category without asking anything.
    Informing,
    /// No category was detected.
    Neutral,
}

impl Intent {
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Asking => "asking",
            Intent::Informing => "informing",
            Intent::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Which pipeline stage produced a reply.
///
/// The stages are mutually exclusive per invocation: the first terminal stage
/// wins and everything downstream is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// A force-trigger substring matched (bypasses everything else).
    Forced,
    /// A non-smart rule matched on exact token containment.
    Exact,
    /// The intent/scoring pipeline selected the best-scoring rule.
    Scored,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Forced => "forced",
            Stage::Exact => "exact",
            Stage::Scored => "scored",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Internal selected reply: the winning rule's response plus enough metadata
/// for the public API to explain *why* it won. Converted to the public
/// [`Reply`] by `api.rs`.
#[derive(Debug, Clone)]
pub(crate) struct Selection {
    /// Key of the winning rule in the rule set (or the force category when no
    /// rule backs a force entry).
    pub rule: String,
    /// Category label of the winning rule (may be empty).
    pub category: String,
    /// Response text to send verbatim.
    pub response: String,
    /// Stage that selected this reply.
    pub stage: Stage,
    /// Normalized match score for `Stage::Scored`; `1.0` for the
    /// unconditional stages (`Forced`, `Exact`).
    pub score: f64,
}

/// Outcome of category detection: the winning rule's category label and the
/// evidence behind it.
#[derive(Debug, Clone)]
pub(crate) struct Detection {
    /// Category label of the winning rule (may be empty).
    pub category: String,
    /// Key of the winning rule.
    pub rule: String,
    /// Number of tokens that fuzzy-matched one of the rule's triggers.
    pub matches: usize,
}

/// Per-rule scoring record collected during the scored pass (for debugging
/// and the verbose API).
#[derive(Debug, Clone)]
pub(crate) struct ScoredRule {
    pub rule: String,
    pub category: String,
    pub matches: usize,
    pub score: f64,
    /// True when the rule was excluded because its category label disagreed
    /// with the detected category.
    pub skipped: bool,
}
