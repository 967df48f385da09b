use crate::engine;
use crate::ruleset::RuleSet;
use crate::{Intent, Selection, Stage};
use std::time::{Duration, Instant};

/// Classification context.
///
/// This holds the message's originating-channel identity. The engine itself
/// never reads it; it feeds the caller-side channel gate applied before the
/// engine is invoked.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Identifier of the channel the message arrived on, if known.
    pub channel: Option<String>,
}

/// Options that affect classification behavior.
///
/// The defaults are the engine's named tunables; overriding them here changes
/// behavior for every stage at once, since detection and scoring share the
/// same threshold.
#[derive(Debug, Clone)]
pub struct Options {
    /// Fuzzy similarity above which a token matches a trigger word
    /// (strictly greater).
    pub similarity_threshold: f64,
    /// Minimum token count before the scored path runs.
    pub min_message_tokens: usize,
    /// Emit the best-scoring reply on `Informing` intent too (statements
    /// about a detected category), not only on questions.
    pub reply_on_informing: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            similarity_threshold: engine::SIMILARITY_THRESHOLD,
            min_message_tokens: engine::MIN_MESSAGE_TOKENS,
            reply_on_informing: false,
        }
    }
}

/// A selected canned reply.
#[derive(Debug, Clone)]
pub struct Reply {
    /// Response text to send verbatim.
    pub text: String,
    /// Key of the rule that produced the reply (or the force category when no
    /// rule backs a force entry).
    pub rule: String,
    /// Category label of the winning rule (may be empty).
    pub category: String,
    /// Pipeline stage that selected the reply.
    pub stage: Stage,
    /// Normalized match score for `Stage::Scored`; `1.0` for the
    /// unconditional stages.
    pub score: f64,
}

/// Result from [`classify`] and [`classify_with`].
#[derive(Debug, Clone)]
pub struct ClassifyResult {
    /// The classified message text.
    pub text: String,
    /// The selected reply, or `None` for "no response".
    pub reply: Option<Reply>,
    /// Total elapsed time spent classifying.
    pub elapsed: Duration,
}

/// Per-rule score record in verbose output.
#[derive(Debug, Clone)]
pub struct RuleScore {
    /// Key of the rule.
    pub rule: String,
    /// Category label of the rule.
    pub category: String,
    /// Tokens that fuzzy-matched one of the rule's triggers.
    pub matches: usize,
    /// Normalized score (`matches / trigger count`).
    pub score: f64,
    /// True when the rule was excluded by the pinned category.
    pub skipped: bool,
}

/// Additional details returned by [`classify_verbose`] and
/// [`classify_verbose_with`].
///
/// This is intentionally compact: it is meant for debugging rule sets and
/// inspecting why a message did (or did not) get a reply, without dumping the
/// entire internal state.
#[derive(Debug, Clone)]
pub struct ClassifyDetails {
    /// Total elapsed time.
    pub total: Duration,
    /// Time spent in the force-trigger and exact-token scans.
    pub scan: Duration,
    /// Time spent in category detection.
    pub detect: Duration,
    /// Time spent scoring and deriving the decision.
    pub resolve: Duration,
    /// The normalized token sequence.
    pub tokens: Vec<String>,
    /// Whether the message read as a question.
    pub is_question: bool,
    /// Derived intent; `None` when the pipeline ended before the intent
    /// stage (force hit, exact hit, or the minimum-length gate).
    pub intent: Option<Intent>,
    /// Detected category label, when detection ran and found one.
    pub detected_category: Option<String>,
    /// Scores for every rule the scored pass considered.
    pub scores: Vec<RuleScore>,
}

/// Result from [`classify_verbose`] and [`classify_verbose_with`].
#[derive(Debug, Clone)]
pub struct ClassifyResultVerbose {
    pub text: String,
    pub reply: Option<Reply>,
    pub elapsed: Duration,
    pub details: ClassifyDetails,
}

/// Classify `text` against `rules` with a default [`Context`] and
/// [`Options`].
///
/// # Example
/// ```
/// use autoreply::{RuleSet, classify};
///
/// let rules = RuleSet::from_json_str(
///     r#"{
///         "responses": {
///             "mobile": {
///                 "triggers": ["mobile", "update"],
///                 "category": "mobile",
///                 "response": "The mobile update ships next week."
///             }
///         },
///         "question_words": ["when"]
///     }"#,
/// )
/// .unwrap();
///
/// let out = classify("when is the mobile update", &rules);
/// assert_eq!(out.reply.unwrap().text, "The mobile update ships next week.");
/// ```
pub fn classify(text: &str, rules: &RuleSet) -> ClassifyResult {
    classify_with(text, &Context::default(), &Options::default(), rules)
}

/// Classify `text` with the provided `context`/`options` against a rule-set
/// snapshot.
///
/// The channel gate runs first: when the rule set carries a non-empty channel
/// allow-list and the context's channel is absent from it, the engine is
/// never invoked and the result is "no response".
pub fn classify_with(text: &str, context: &Context, options: &Options, rules: &RuleSet) -> ClassifyResult {
    let start = Instant::now();
    if channel_gated(context, rules) {
        return ClassifyResult { text: text.to_string(), reply: None, elapsed: start.elapsed() };
    }

    let run = engine::Classifier::new(text, rules).run_with_metrics(options);
    ClassifyResult { text: text.to_string(), reply: run.reply.map(selection_to_reply), elapsed: run.metrics.total }
}

#[allow(dead_code)]
pub fn classify_verbose(text: &str, rules: &RuleSet) -> ClassifyResultVerbose {
    classify_verbose_with(text, &Context::default(), &Options::default(), rules)
}

/// Classify `text` and return extra (compact) debug details.
///
/// This is useful for rule-set debugging and for the CLI's stage report. The
/// default [`classify_with`] path does not allocate these extra traces.
pub fn classify_verbose_with(
    text: &str,
    context: &Context,
    options: &Options,
    rules: &RuleSet,
) -> ClassifyResultVerbose {
    let start = Instant::now();
    if channel_gated(context, rules) {
        let details = ClassifyDetails {
            total: start.elapsed(),
            scan: Duration::ZERO,
            detect: Duration::ZERO,
            resolve: Duration::ZERO,
            tokens: Vec::new(),
            is_question: false,
            intent: None,
            detected_category: None,
            scores: Vec::new(),
        };
        return ClassifyResultVerbose { text: text.to_string(), reply: None, elapsed: details.total, details };
    }

    let run = engine::Classifier::new(text, rules).run_with_metrics(options);

    let details = ClassifyDetails {
        total: run.metrics.total,
        scan: run.metrics.scan,
        detect: run.metrics.detect,
        resolve: run.metrics.resolve,
        tokens: run.tokens,
        is_question: !run.signals.is_empty(),
        intent: run.intent,
        detected_category: run.detection.map(|d| d.category),
        scores: run
            .scores
            .into_iter()
            .map(|s| RuleScore { rule: s.rule, category: s.category, matches: s.matches, score: s.score, skipped: s.skipped })
            .collect(),
    };

    ClassifyResultVerbose {
        text: text.to_string(),
        reply: run.reply.map(selection_to_reply),
        elapsed: details.total,
        details,
    }
}

/// True when a non-empty allow-list does not contain the message's channel.
fn channel_gated(context: &Context, rules: &RuleSet) -> bool {
    if rules.channel_ids.is_empty() {
        return false;
    }
    match &context.channel {
        Some(channel) => !rules.channel_ids.iter().any(|id| id == channel),
        None => true,
    }
}

fn selection_to_reply(selection: Selection) -> Reply {
    Reply {
        text: selection.response,
        rule: selection.rule,
        category: selection.category,
        stage: selection.stage,
        score: selection.score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mobile_rules() -> RuleSet {
        RuleSet::from_json_str(
            r#"{
                "responses": {
                    "mobile": {
                        "triggers": ["mobile", "update"],
                        "category": "mobile",
                        "response": "mobile msg"
                    }
                },
                "question_words": ["when"],
                "channel_ids": ["general"]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn allowed_channel_reaches_the_engine() {
        let rules = mobile_rules();
        let ctx = Context { channel: Some("general".to_string()) };
        let out = classify_with("when is the mobile update", &ctx, &Options::default(), &rules);
        assert_eq!(out.reply.unwrap().text, "mobile msg");
    }

    #[test]
    fn other_channels_are_gated() {
        let rules = mobile_rules();
        let ctx = Context { channel: Some("off-topic".to_string()) };
        let out = classify_with("when is the mobile update", &ctx, &Options::default(), &rules);
        assert!(out.reply.is_none());
    }

    #[test]
    fn unknown_channel_is_gated_when_list_is_non_empty() {
        let rules = mobile_rules();
        let out = classify_with("when is the mobile update", &Context::default(), &Options::default(), &rules);
        assert!(out.reply.is_none());
    }

    #[test]
    fn empty_allow_list_means_every_channel() {
        let mut rules = mobile_rules();
        rules.channel_ids.clear();
        let out = classify_with("when is the mobile update", &Context::default(), &Options::default(), &rules);
        assert!(out.reply.is_some());
    }

    #[test]
    fn verbose_reports_evidence() {
        let mut rules = mobile_rules();
        rules.channel_ids.clear();
        let out = classify_verbose("when is the mobile update", &rules);

        assert_eq!(out.text, "when is the mobile update");
        assert_eq!(out.elapsed, out.details.total);
        assert!(out.details.is_question);
        assert_eq!(out.details.intent, Some(crate::Intent::Asking));
        assert_eq!(out.details.detected_category.as_deref(), Some("mobile"));
        assert_eq!(out.details.scores.len(), 1);

        let reply = out.reply.unwrap();
        assert_eq!(reply.stage, crate::Stage::Scored);
        assert_eq!(reply.score, 1.0);
    }
}
