//! Engine run metrics.
//!
//! A classification run is bounded by the message length and the rule-set
//! size and completes in microseconds, but per-stage timings are still worth
//! having: they make threshold or vocabulary regressions visible without a
//! profiler.
//!
//! Metrics are intentionally simple and opt-in:
//!
//! - `Classifier::run` for normal operation.
//! - `Classifier::run_with_metrics` when the caller wants stage timings and
//!   the per-rule score table.

use crate::engine::signals::SignalMask;
use crate::{Detection, Intent, ScoredRule, Selection};
use std::time::Duration;

/// Per-stage timings for one classification run.
///
/// Stages that were skipped because an earlier stage was terminal report a
/// zero duration.
#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for [`Classifier::run_with_metrics`].
    pub total: Duration,
    /// Time spent in the force-trigger and exact-token scans.
    pub scan: Duration,
    /// Time spent in category detection.
    pub detect: Duration,
    /// Time spent scoring rules and deriving the final decision.
    pub resolve: Duration,
}

/// Classifier output bundled with evidence and timing information.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// The selected reply, if any stage produced one.
    pub reply: Option<Selection>,
    /// Derived intent; `None` when the pipeline terminated before the
    /// intent stage (force hit, exact hit, or the minimum-length gate).
    pub intent: Option<Intent>,
    /// Category detection outcome (when the detection stage ran).
    pub detection: Option<Detection>,
    /// Per-rule score records from the scored pass.
    pub scores: Vec<ScoredRule>,
    /// Question signals detected in the message.
    pub signals: SignalMask,
    /// The normalized token sequence the engine operated on.
    pub tokens: Vec<String>,
    /// Timing measurements for the run.
    pub metrics: RunMetrics,
}
