use std::time::Duration;

use eyre::Result;
use log::warn;

use phrasal_core_rs::phrase::Sequence;

use super::alignment::{Outcome, TraceStats};
use super::deadline::{Deadline, Expired};
use super::scoring::Scorer;
use super::table;
use super::traceback::Walker;

/// Default wall-clock budget per call.
pub const DEFAULT_BUDGET: Duration = Duration::from_millis(2000);

/// Local phrase aligner: finds the best-scoring contiguous sub-regions of
/// two sequences. Smith-Waterman generalized from the classical zero floor
/// to an arbitrary acceptance baseline (the restart value): an optimal
/// sub-alignment restarts wherever continuing would drop below the floor.
///
/// Engines hold only scoring and configuration; all call state is scoped to
/// [`Engine::align`], so a single engine is safe to share between calls.
pub struct Engine<F: Scorer> {
    scoring: F,
    restart: F::Score,
    budget: Duration,
}

impl<F: Scorer> Engine<F> {
    pub fn new(scoring: F) -> Self {
        Self {
            scoring,
            restart: F::Score::zero(),
            budget: DEFAULT_BUDGET,
        }
    }

    pub fn with_scoring(&mut self, scoring: F) {
        self.scoring = scoring;
    }

    /// Sets the acceptance floor. Must be finite.
    pub fn with_restart(&mut self, restart: F::Score) -> Result<()> {
        eyre::ensure!(
            restart.is_finite(),
            "restart value must be finite, got {:?}",
            restart
        );
        self.restart = restart;
        Ok(())
    }

    /// Sets the wall-clock budget covering table construction and traceback.
    pub fn with_budget(&mut self, budget: Duration) {
        self.budget = budget;
    }

    /// Aligns the best-scoring regions of two sequences.
    ///
    /// Every cell attaining the table-wide maximum roots an independent
    /// traceback, so one call can yield several disjoint alignments. Each
    /// traceback stops at the first cell holding the restart value or
    /// recording no predecessors; the stop coordinates become that
    /// alignment's start offsets.
    ///
    /// On budget expiry the whole call aborts with [`Outcome::TimedOut`]:
    /// partial results are never reported.
    pub fn align(&self, seq1: &Sequence, seq2: &Sequence) -> Outcome<F::Score> {
        if seq1.is_empty() || seq2.is_empty() {
            return Outcome::NoAlignment;
        }

        let deadline = Deadline::start(self.budget);
        let tables = match table::fill(
            seq1,
            seq2,
            &self.scoring,
            Some(self.restart),
            Some(&deadline),
        ) {
            Ok(x) => x,
            Err(Expired) => return abort(deadline, 0),
        };

        // Every cell attaining the table-wide maximum is a traceback root.
        let mut best = self.restart;
        let mut roots = Vec::new();
        for row in 0..=seq1.len() {
            for col in 0..=seq2.len() {
                let score = tables.scores[(row, col)];
                if score > best {
                    best = score;
                    roots.clear();
                    roots.push((row, col));
                } else if score == best && !roots.is_empty() {
                    roots.push((row, col));
                }
            }
        }
        if roots.is_empty() {
            return Outcome::NoAlignment;
        }

        let mut walker = Walker::new(&tables.scores, &tables.pointers, seq1, seq2)
            .with_floor(self.restart)
            .with_deadline(deadline);
        for (row, col) in roots {
            walker.push_root(row, col);
        }

        let mut alignments = Vec::new();
        loop {
            match walker.next() {
                None => break,
                Some(Ok(x)) => alignments.push(x),
                Some(Err(Expired)) => return abort(deadline, walker.steps()),
            }
        }

        let stats = TraceStats::new(walker.steps(), deadline.elapsed());
        Outcome::Aligned {
            score: best,
            alignments,
            stats,
        }
    }
}

fn abort<S: crate::Score>(deadline: Deadline, tracebacks: u64) -> Outcome<S> {
    let elapsed = deadline.elapsed();
    warn!(
        "local alignment timed out after {:?} ({} traceback steps)",
        elapsed, tracebacks
    );
    Outcome::TimedOut {
        stats: TraceStats::new(tracebacks, elapsed),
    }
}
