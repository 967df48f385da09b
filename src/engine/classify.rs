//! Classification pipeline orchestration.
//!
//! This module is the operational core of the engine: it owns the fixed stage
//! order and the short-circuit semantics. Every stage is pure over the
//! message and the rule-set snapshot, so the whole run is deterministic and
//! safe to execute concurrently against one shared `RuleSet`.
//!
//! ## Stage order
//!
//! ```text
//! (1) force-trigger scan      -> terminal on hit        (force.rs)
//! (2) non-smart exact scan    -> terminal on hit        (score.rs)
//! (3) minimum-length gate     -> terminal on fail
//! (4) category detection                                 (detect.rs)
//! (5) intent derivation       -> asking/informing/neutral (signals.rs)
//! (6) rule scoring                                       (score.rs)
//! (7) intent-gated emission   -> terminal either way
//! ```
//!
//! The non-smart scan deliberately runs *before* the minimum-length gate:
//! non-smart rules encode an unconditional-match author intent, so a
//! one-token message like `"ping"` must still be able to hit one. The
//! sub-minimum rejection therefore governs the scored path only.
//!
//! ## Debugging
//!
//! Set `AUTOREPLY_DEBUG_RULES=1` to print stage-by-stage trace information.

use super::detect::detect_category;
use super::force::forced_response;
use super::metrics::{RunMetrics, RunResult};
use super::score::{exact_match, score_rules};
use super::signals::MessageSignals;
use super::tokenize::tokenize;
use crate::api::Options;
use crate::ruleset::RuleSet;
use crate::{Intent, Selection};
use std::time::Instant;

/// Minimum number of tokens a message needs before the scored path runs.
/// Shorter utterances are rejected to avoid false positives.
pub const MIN_MESSAGE_TOKENS: usize = 2;

/// Classifier orchestrates running the rule set against one message.
///
/// Usage: create with `Classifier::new(input, &rules)` then call
/// `run(&options)`. The classifier holds only state derived from the input;
/// the rule set is an immutable snapshot borrowed for the duration of the
/// run and is never mutated.
#[derive(Debug)]
pub struct Classifier<'a> {
    /// Raw message text.
    input: &'a str,
    /// Lower-cased message, used for substring (force) matching.
    lowered: String,
    /// Normalized token sequence, used by every token-based stage.
    tokens: Vec<String>,
    /// Rule-set snapshot.
    rules: &'a RuleSet,
}

impl<'a> Classifier<'a> {
    /// Create a new `Classifier` for `input` over a rule-set snapshot.
    pub fn new(input: &'a str, rules: &'a RuleSet) -> Self {
        let lowered = input.to_lowercase();
        let tokens = tokenize(input);

        if std::env::var_os("AUTOREPLY_DEBUG_RULES").is_some() {
            eprintln!("[tokenize] tokens={:?}", tokens);
        }

        Classifier { input, lowered, tokens, rules }
    }

    /// Run the pipeline and return the selection plus evidence and timings.
    pub fn run_with_metrics(self, options: &Options) -> RunResult {
        let total_start = Instant::now();
        let debug = std::env::var_os("AUTOREPLY_DEBUG_RULES").is_some();

        let signals = MessageSignals::scan(self.input, &self.tokens, &self.rules.question_words);
        let mut metrics = RunMetrics::default();

        let done = |reply: Option<Selection>,
                    intent: Option<Intent>,
                    detection: Option<crate::Detection>,
                    scores: Vec<crate::ScoredRule>,
                    mut metrics: RunMetrics,
                    tokens: Vec<String>| {
            metrics.total = total_start.elapsed();
            RunResult { reply, intent, detection, scores, signals: signals.mask, tokens, metrics }
        };

        // (1) + (2): unconditional scans.
        let scan_start = Instant::now();
        let forced = forced_response(&self.lowered, self.rules);
        if let Some(selection) = forced {
            if debug {
                eprintln!("[force] hit category=\"{}\" response=\"{}\"", selection.category, selection.response);
            }
            metrics.scan = scan_start.elapsed();
            return done(Some(selection), None, None, Vec::new(), metrics, self.tokens);
        }

        let exact = exact_match(&self.tokens, self.rules);
        metrics.scan = scan_start.elapsed();
        if let Some(selection) = exact {
            if debug {
                eprintln!("[exact] hit rule=\"{}\" trigger token matched", selection.rule);
            }
            return done(Some(selection), None, None, Vec::new(), metrics, self.tokens);
        }

        // (3): minimum-length gate.
        if self.tokens.len() < options.min_message_tokens {
            if debug {
                eprintln!("[gate] {} token(s) < minimum {}, no reply", self.tokens.len(), options.min_message_tokens);
            }
            return done(None, None, None, Vec::new(), metrics, self.tokens);
        }

        // (4): category detection.
        let detect_start = Instant::now();
        let detection = detect_category(&self.tokens, self.rules, options.similarity_threshold);
        metrics.detect = detect_start.elapsed();
        if debug {
            match &detection {
                Some(d) => eprintln!("[detect] category=\"{}\" rule=\"{}\" matches={}", d.category, d.rule, d.matches),
                None => eprintln!("[detect] no category"),
            }
        }

        // (5): intent derivation.
        let intent = match (&detection, signals.is_question()) {
            (Some(_), true) => Intent::Asking,
            (Some(_), false) => Intent::Informing,
            (None, _) => Intent::Neutral,
        };

        // (6): scoring.
        let resolve_start = Instant::now();
        let (best, scores) = score_rules(&self.tokens, self.rules, detection.as_ref(), options.similarity_threshold);

        // (7): intent-gated emission.
        let emit = match intent {
            Intent::Asking => true,
            Intent::Informing => options.reply_on_informing,
            Intent::Neutral => false,
        };
        let reply = if emit { best } else { None };
        metrics.resolve = resolve_start.elapsed();

        if debug {
            match &reply {
                Some(sel) => eprintln!("[emit] intent={} rule=\"{}\" score={:.3}", intent, sel.rule, sel.score),
                None => eprintln!("[emit] intent={} no reply", intent),
            }
        }

        done(reply, Some(intent), detection, scores, metrics, self.tokens)
    }

    /// Run the pipeline and return only the selected reply.
    ///
    /// Convenience wrapper that discards evidence and timing details. Use
    /// [`Classifier::run_with_metrics`] to inspect the full run.
    #[allow(dead_code)]
    pub fn run(self, options: &Options) -> Option<Selection> {
        self.run_with_metrics(options).reply
    }
}
