use phrasal_core_rs::phrase::Sequence;

use crate::Score;

use super::alignment::AlignmentResult;
use super::scoring::Scorer;
use super::table::{self, Tables};
use super::traceback::Walker;

/// Global (end-to-end) phrase aligner, Needleman-Wunsch style.
///
/// Holds only the scoring function; every call builds fresh tables, so one
/// engine serves any number of sequential or concurrent calls.
pub struct Engine<F: Scorer> {
    scoring: F,
}

impl<F: Scorer> Engine<F> {
    pub fn new(scoring: F) -> Self {
        Self { scoring }
    }

    pub fn with_scoring(&mut self, scoring: F) {
        self.scoring = scoring;
    }

    /// Aligns two sequences end to end. The returned value owns the tables
    /// and exposes the optimal score plus a lazy enumeration of every
    /// tied-optimal alignment.
    pub fn align<'a>(
        &self,
        seq1: &'a Sequence,
        seq2: &'a Sequence,
    ) -> GlobalAlignment<'a, F::Score> {
        self.build(seq1, seq2, None)
    }

    /// Like [`Engine::align`], but traceback branches accumulating more than
    /// `max_gaps` non-diagonal moves are pruned, so the enumerated set may
    /// be empty. The reported score is unchanged.
    pub fn align_with_gap_limit<'a>(
        &self,
        seq1: &'a Sequence,
        seq2: &'a Sequence,
        max_gaps: usize,
    ) -> GlobalAlignment<'a, F::Score> {
        self.build(seq1, seq2, Some(max_gaps))
    }

    /// Returns one optimal alignment, committing to a single predecessor per
    /// cell by fixed precedence (diagonal, then left, then up). The walk is
    /// O(n+m); use [`Engine::align`] when the full tie set matters.
    pub fn align_one(&self, seq1: &Sequence, seq2: &Sequence) -> AlignmentResult<F::Score> {
        let tables = match table::fill(seq1, seq2, &self.scoring, None, None) {
            Ok(x) => x,
            Err(_) => unreachable!("global table construction has no deadline"),
        };

        let mut walker =
            Walker::new(&tables.scores, &tables.pointers, seq1, seq2).first_move_only();
        walker.push_root(seq1.len(), seq2.len());
        match walker.next() {
            Some(Ok(x)) => x,
            _ => unreachable!("an unpruned global traceback yields exactly one path"),
        }
    }

    fn build<'a>(
        &self,
        seq1: &'a Sequence,
        seq2: &'a Sequence,
        gap_limit: Option<usize>,
    ) -> GlobalAlignment<'a, F::Score> {
        let tables = match table::fill(seq1, seq2, &self.scoring, None, None) {
            Ok(x) => x,
            Err(_) => unreachable!("global table construction has no deadline"),
        };
        let score = tables.scores[(seq1.len(), seq2.len())];
        GlobalAlignment {
            score,
            tables,
            seq1,
            seq2,
            gap_limit,
        }
    }
}

/// The outcome of a global alignment call: the optimal end-to-end score plus
/// lazily enumerable optimal alignments. Built fresh per call and owned by
/// the caller; nothing is cached on the engine.
pub struct GlobalAlignment<'a, S: Score> {
    score: S,
    tables: Tables<S>,
    seq1: &'a Sequence,
    seq2: &'a Sequence,
    gap_limit: Option<usize>,
}

impl<'a, S: Score> GlobalAlignment<'a, S> {
    /// The optimal score: the sum of pairwise scores along any optimal path.
    pub fn score(&self) -> S {
        self.score
    }

    /// Lazily enumerates the optimal alignments. A cell with k tied
    /// predecessors multiplies the branch count, so the total can grow
    /// combinatorially; pull only what you need.
    pub fn iter(&self) -> Alignments<'_, S> {
        let mut walker = Walker::new(&self.tables.scores, &self.tables.pointers, self.seq1, self.seq2);
        if let Some(max_gaps) = self.gap_limit {
            walker = walker.with_gap_budget(max_gaps);
        }
        walker.push_root(self.seq1.len(), self.seq2.len());
        Alignments { walker }
    }
}

impl<'s, 'a, S: Score> IntoIterator for &'s GlobalAlignment<'a, S> {
    type Item = AlignmentResult<S>;
    type IntoIter = Alignments<'s, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over tied-optimal global alignments.
pub struct Alignments<'a, S: Score> {
    walker: Walker<'a, S>,
}

impl<'a, S: Score> Iterator for Alignments<'a, S> {
    type Item = AlignmentResult<S>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.walker.next() {
            None => None,
            Some(Ok(x)) => Some(x),
            Some(Err(_)) => unreachable!("global traceback has no deadline"),
        }
    }
}
