//! Message-matching and intent-resolution engine.
//!
//! This module is the *decision core* of the crate: it turns raw message text
//! plus a rule-set snapshot into either "no reply" or a single selected
//! response string. It is split into focused submodules under `src/engine/`
//! while keeping public paths stable (for example `crate::engine::Classifier`).
//!
//! ## How the parts work together
//!
//! Classifying a message is a linear pipeline with no retries and no retained
//! state between invocations:
//!
//! ```text
//! rule set ─────────────┐
//!                       │
//! input ── tokenize ────┼── force-trigger scan     (force.rs, terminal on hit)
//!        (tokenize.rs)  │── non-smart exact scan   (score.rs, terminal on hit)
//!                       │── minimum-length gate    (terminal on fail)
//!                       │── category detection     (detect.rs)
//!                       │── intent derivation      (signals.rs)
//!                       │── rule scoring           (score.rs)
//!                       v
//!            intent-gated emission -> Option<Selection>
//! ```
//!
//! ## Responsibilities by module
//!
//! - `tokenize.rs`: lower-casing and word extraction; the word-boundary
//!   contract every token comparison relies on.
//! - `similarity.rs`: the fuzzy sequence-matching ratio and the single shared
//!   match threshold used by detection and scoring alike.
//! - `signals.rs`: cheap question-signal scan over the raw text and tokens.
//! - `force.rs`: unconditional substring overrides checked before anything
//!   else.
//! - `detect.rs`: picks the dominant rule category by fuzzy match count.
//! - `score.rs`: non-smart exact-token scan plus normalized per-rule scoring.
//! - `classify.rs`: the `Classifier` orchestrator owning stage order,
//!   short-circuits, and timings.
//! - `metrics.rs`: opt-in timing/evidence data for runs.
//!
//! ## Determinism
//!
//! Tie-breaks everywhere keep the earliest rule in the rule set's document
//! order, so iteration order over `responses` and `force` is an observable
//! contract. Given the same input and rule set, a run always produces the
//! same output.
//!
//! ## Debugging
//!
//! Set `AUTOREPLY_DEBUG_RULES=1` to print tokenization, stage, and emission
//! traces.

#[path = "engine/classify.rs"]
mod classify;
#[path = "engine/detect.rs"]
mod detect;
#[path = "engine/force.rs"]
mod force;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/score.rs"]
mod score;
#[path = "engine/signals.rs"]
mod signals;
#[path = "engine/similarity.rs"]
mod similarity;
#[path = "engine/tokenize.rs"]
mod tokenize;


#[allow(unused_imports)]
pub use classify::{Classifier, MIN_MESSAGE_TOKENS};
#[allow(unused_imports)]
pub use metrics::{RunMetrics, RunResult};
#[allow(unused_imports)]
pub use signals::{MessageSignals, SignalMask};
#[allow(unused_imports)]
pub use similarity::{SIMILARITY_THRESHOLD, similarity_ratio};
#[allow(unused_imports)]
pub use tokenize::tokenize;
