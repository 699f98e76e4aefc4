use std::fmt::{self, Display};

use derive_getters::{Dissolve, Getters};
use eyre::Result;

use phrasal_core_rs::phrase::Sequence;

use crate::Score;

/// A scored alignment between two sequences: two equal-length gapped
/// renditions of the aligned region, plus the region's start offset in each
/// input sequence. Global alignments always start at (0, 0); local ones
/// start wherever their traceback stopped.
#[derive(Clone, PartialEq, Debug, Getters, Dissolve)]
pub struct AlignmentResult<S: Score> {
    score: S,
    seq1: Sequence,
    seq2: Sequence,
    start1: usize,
    start2: usize,
}

impl<S: Score> AlignmentResult<S> {
    /// Builds a validated result. The renditions must have equal lengths and
    /// no position may pair a gap with a gap.
    pub fn new(
        score: S,
        seq1: Sequence,
        seq2: Sequence,
        start1: usize,
        start2: usize,
    ) -> Result<Self> {
        eyre::ensure!(
            seq1.len() == seq2.len(),
            "aligned renditions must have equal lengths, got {} and {}",
            seq1.len(),
            seq2.len()
        );
        eyre::ensure!(
            !seq1.iter().zip(seq2.iter()).any(|(a, b)| a.is_gap() && b.is_gap()),
            "no position may pair a gap with a gap"
        );
        Ok(Self {
            score,
            seq1,
            seq2,
            start1,
            start2,
        })
    }

    pub(crate) fn from_parts(
        score: S,
        seq1: Sequence,
        seq2: Sequence,
        start1: usize,
        start2: usize,
    ) -> Self {
        debug_assert_eq!(seq1.len(), seq2.len());
        debug_assert!(!seq1.iter().zip(seq2.iter()).any(|(a, b)| a.is_gap() && b.is_gap()));
        Self {
            score,
            seq1,
            seq2,
            start1,
            start2,
        }
    }

    /// Number of aligned positions.
    pub fn len(&self) -> usize {
        self.seq1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq1.is_empty()
    }
}

impl<S: Score> Display for AlignmentResult<S> {
    /// Renders the two gapped renditions as column-padded rows.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut top = String::new();
        let mut bottom = String::new();
        for (a, b) in self.seq1.iter().zip(self.seq2.iter()) {
            let (a, b) = (a.to_string(), b.to_string());
            let width = a.chars().count().max(b.chars().count());
            if !top.is_empty() {
                top.push(' ');
                bottom.push(' ');
            }
            top.push_str(&format!("{a:width$}"));
            bottom.push_str(&format!("{b:width$}"));
        }
        write!(f, "{}\n{}", top.trim_end(), bottom.trim_end())
    }
}
