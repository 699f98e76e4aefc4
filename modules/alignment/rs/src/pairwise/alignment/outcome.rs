use std::time::Duration;

use derive_getters::{Dissolve, Getters};
use derive_more::{Constructor, IsVariant};

use crate::Score;

use super::alignment::AlignmentResult;

/// Per-call traceback diagnostics. Call-scoped by construction: returned
/// with the outcome instead of living on the engine, so overlapping calls
/// on one engine cannot corrupt each other's bookkeeping. Callers tracking
/// the historical maximum fold it over returned values.
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug, Getters, Dissolve, Constructor)]
pub struct TraceStats {
    /// Work-stack steps performed during traceback.
    tracebacks: u64,
    /// Wall-clock time from the call's start to its outcome.
    elapsed: Duration,
}

/// The outcome of a local alignment call. A timeout is a distinct variant,
/// never confusable with a legitimate zero or low score.
#[derive(Clone, PartialEq, Debug, IsVariant)]
pub enum Outcome<S: Score> {
    /// At least one region scored above the restart value.
    Aligned {
        /// The table-wide maximum.
        score: S,
        /// One result per traceback root.
        alignments: Vec<AlignmentResult<S>>,
        stats: TraceStats,
    },
    /// The wall-clock budget expired. Partial results are never reported.
    TimedOut { stats: TraceStats },
    /// Nothing scored above the restart value, or an input was empty.
    NoAlignment,
}

impl<S: Score> Outcome<S> {
    pub fn score(&self) -> Option<S> {
        match self {
            Outcome::Aligned { score, .. } => Some(*score),
            _ => None,
        }
    }

    pub fn alignments(&self) -> &[AlignmentResult<S>] {
        match self {
            Outcome::Aligned { alignments, .. } => alignments,
            _ => &[],
        }
    }

    pub fn stats(&self) -> Option<&TraceStats> {
        match self {
            Outcome::Aligned { stats, .. } | Outcome::TimedOut { stats } => Some(stats),
            Outcome::NoAlignment => None,
        }
    }
}
