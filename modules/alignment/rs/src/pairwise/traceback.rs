use phrasal_core_rs::phrase::{Sequence, Token};

use crate::Score;

use super::alignment::AlignmentResult;
use super::deadline::{Deadline, Expired};
use super::table::{BackPointerTable, Move, ScoreTable};

/// One pending traceback branch: the cell to resume from, the moves taken
/// from the root down to it, and the non-diagonal moves accumulated so far.
struct Branch {
    row: usize,
    col: usize,
    gaps: usize,
    taken: Vec<Move>,
}

/// Lazy enumerator of optimal alignments: a depth-first walk over the
/// back-pointer table on an explicit work stack, so recursion depth never
/// scales with sequence length. A cell with k tied predecessors forks the
/// current branch k ways; the number of complete paths can grow
/// combinatorially, which is why enumeration is pull-based.
///
/// A branch stops at the first cell that records no predecessors (the
/// origin, or a restart point where the floor clamp won) or whose value
/// equals the configured floor. The stop coordinates become the emitted
/// alignment's start offsets.
pub(crate) struct Walker<'a, S: Score> {
    scores: &'a ScoreTable<S>,
    pointers: &'a BackPointerTable,
    seq1: &'a Sequence,
    seq2: &'a Sequence,
    floor: Option<S>,
    gap_budget: Option<usize>,
    deadline: Option<Deadline>,
    first_only: bool,
    stack: Vec<Branch>,
    steps: u64,
}

impl<'a, S: Score> Walker<'a, S> {
    pub fn new(
        scores: &'a ScoreTable<S>,
        pointers: &'a BackPointerTable,
        seq1: &'a Sequence,
        seq2: &'a Sequence,
    ) -> Self {
        debug_assert_eq!(scores.rows(), seq1.len() + 1);
        debug_assert_eq!(scores.cols(), seq2.len() + 1);
        Self {
            scores,
            pointers,
            seq1,
            seq2,
            floor: None,
            gap_budget: None,
            deadline: None,
            first_only: false,
            stack: Vec::new(),
            steps: 0,
        }
    }

    /// Branches stop at the first cell holding exactly this value.
    pub fn with_floor(mut self, floor: S) -> Self {
        self.floor = Some(floor);
        self
    }

    /// Branches accumulating more than `budget` non-diagonal moves are
    /// pruned: they yield nothing, which is not an error.
    pub fn with_gap_budget(mut self, budget: usize) -> Self {
        self.gap_budget = Some(budget);
        self
    }

    /// Checked once per work-stack pop; on expiry the walk aborts as a whole.
    pub fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Commits to the first recorded predecessor per cell (fixed precedence
    /// diagonal, left, up): one branch, no forks, O(rows + cols) per root.
    pub fn first_move_only(mut self) -> Self {
        self.first_only = true;
        self
    }

    /// Queues a traceback root.
    pub fn push_root(&mut self, row: usize, col: usize) {
        self.stack.push(Branch {
            row,
            col,
            gaps: 0,
            taken: Vec::new(),
        });
    }

    /// Cells visited so far across all branches.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    fn stops_at(&self, row: usize, col: usize) -> bool {
        self.pointers[(row, col)].is_empty()
            || self
                .floor
                .is_some_and(|floor| self.scores[(row, col)] == floor)
    }

    fn step(branch: &mut Branch, mv: Move) {
        branch.taken.push(mv);
        match mv {
            Move::Diagonal => {
                branch.row -= 1;
                branch.col -= 1;
            }
            Move::Left => {
                branch.col -= 1;
                branch.gaps += 1;
            }
            Move::Up => {
                branch.row -= 1;
                branch.gaps += 1;
            }
        }
    }

    /// Materializes a finished branch: replays the taken moves upward from
    /// the stop cell, pairing consumed tokens and gaps position by position.
    fn emit(&self, branch: &Branch) -> AlignmentResult<S> {
        let (mut row, mut col) = (branch.row, branch.col);
        let mut seq1 = Sequence::with_capacity(branch.taken.len());
        let mut seq2 = Sequence::with_capacity(branch.taken.len());

        for mv in branch.taken.iter().rev() {
            match mv {
                Move::Diagonal => {
                    seq1.push(self.seq1[row].clone());
                    seq2.push(self.seq2[col].clone());
                    row += 1;
                    col += 1;
                }
                Move::Left => {
                    seq1.push(Token::Gap);
                    seq2.push(self.seq2[col].clone());
                    col += 1;
                }
                Move::Up => {
                    seq1.push(self.seq1[row].clone());
                    seq2.push(Token::Gap);
                    row += 1;
                }
            }
        }

        // (row, col) is the root again; its value is the reported score.
        AlignmentResult::from_parts(
            self.scores[(row, col)],
            seq1,
            seq2,
            branch.row,
            branch.col,
        )
    }
}

impl<'a, S: Score> Iterator for Walker<'a, S> {
    type Item = Result<AlignmentResult<S>, Expired>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut branch) = self.stack.pop() {
            if self.deadline.is_some_and(|x| x.expired()) {
                self.stack.clear();
                return Some(Err(Expired));
            }

            loop {
                self.steps += 1;

                if self.stops_at(branch.row, branch.col) {
                    return Some(Ok(self.emit(&branch)));
                }

                let moves = self.pointers[(branch.row, branch.col)];
                let mut keep = None;
                for mv in moves.iter() {
                    let gaps = branch.gaps + usize::from(!mv.is_diagonal());
                    if self.gap_budget.is_some_and(|budget| gaps > budget) {
                        continue;
                    }
                    match keep {
                        None => keep = Some(mv),
                        Some(_) if self.first_only => break,
                        Some(_) => {
                            let mut fork = Branch {
                                row: branch.row,
                                col: branch.col,
                                gaps: branch.gaps,
                                taken: branch.taken.clone(),
                            };
                            Self::step(&mut fork, mv);
                            self.stack.push(fork);
                        }
                    }
                }

                match keep {
                    // Every predecessor ran over the gap budget
                    None => break,
                    Some(mv) => Self::step(&mut branch, mv),
                }
            }
        }
        None
    }
}
