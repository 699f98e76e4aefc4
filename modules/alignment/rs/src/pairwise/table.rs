use std::ops::{Index, IndexMut};

use phrasal_core_rs::phrase::{Sequence, Token};

use crate::Score;

use super::deadline::{Deadline, Expired};
use super::scoring::Scorer;

/// A single predecessor move in the dynamic-programming table.
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub(crate) enum Move {
    /// Consumes one token from each sequence.
    Diagonal,
    /// Consumes one token from the second sequence against a gap.
    Left,
    /// Consumes one token from the first sequence against a gap.
    Up,
}

impl Move {
    fn mask(self) -> u8 {
        match self {
            Move::Diagonal => 0b001,
            Move::Left => 0b010,
            Move::Up => 0b100,
        }
    }

    pub fn is_diagonal(self) -> bool {
        matches!(self, Move::Diagonal)
    }
}

/// The predecessor moves recorded for one cell. Every move whose recurrence
/// term equals the cell's final value is kept: ties are retained, not broken.
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug, Hash)]
pub(crate) struct MoveSet(u8);

impl MoveSet {
    pub fn insert(&mut self, mv: Move) {
        self.0 |= mv.mask();
    }

    pub fn contains(self, mv: Move) -> bool {
        self.0 & mv.mask() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Moves in fixed precedence order: diagonal, then left, then up.
    pub fn iter(self) -> impl Iterator<Item = Move> {
        [Move::Diagonal, Move::Left, Move::Up]
            .into_iter()
            .filter(move |x| self.contains(*x))
    }
}

/// Dense row-major matrix.
pub(crate) struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Copy + Default> Matrix<T> {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![T::default(); rows * cols],
        }
    }
}

impl<T> Matrix<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        debug_assert!(row < self.rows && col < self.cols);
        &self.data[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline(always)]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        debug_assert!(row < self.rows && col < self.cols);
        &mut self.data[row * self.cols + col]
    }
}

/// (n+1) x (m+1) table of cell scores. Cell (i, j) depends only on cells
/// with strictly smaller indices.
pub(crate) type ScoreTable<S> = Matrix<S>;

/// Same shape as the score table; records every tied predecessor per cell.
pub(crate) type BackPointerTable = Matrix<MoveSet>;

pub(crate) struct Tables<S: Score> {
    pub scores: ScoreTable<S>,
    pub pointers: BackPointerTable,
}

/// Builds the score and back-pointer tables for `seq1` x `seq2`.
///
/// The base row and column accumulate per-token gap penalties; interior
/// cells take the maximum of the three recurrence terms. `floor` clamps
/// every cell to `max(floor, computed)`; a move is recorded only when its
/// term equals the final value, so a cell where the clamp wins records no
/// predecessors and acts as a restart point. `deadline` is checked once per
/// row.
pub(crate) fn fill<F: Scorer>(
    seq1: &Sequence,
    seq2: &Sequence,
    scoring: &F,
    floor: Option<F::Score>,
    deadline: Option<&Deadline>,
) -> Result<Tables<F::Score>, Expired> {
    let (rows, cols) = (seq1.len() + 1, seq2.len() + 1);
    let mut scores = ScoreTable::new(rows, cols);
    let mut pointers = BackPointerTable::new(rows, cols);

    let clamp = |value: F::Score| match floor {
        Some(floor) if floor > value => floor,
        _ => value,
    };

    scores[(0, 0)] = clamp(F::Score::zero());

    for row in 1..rows {
        let term = scores[(row - 1, 0)] + scoring.score(&seq1[row - 1], &Token::Gap);
        let value = clamp(term);
        scores[(row, 0)] = value;
        if term == value {
            pointers[(row, 0)].insert(Move::Up);
        }
    }
    for col in 1..cols {
        let term = scores[(0, col - 1)] + scoring.score(&Token::Gap, &seq2[col - 1]);
        let value = clamp(term);
        scores[(0, col)] = value;
        if term == value {
            pointers[(0, col)].insert(Move::Left);
        }
    }

    for row in 1..rows {
        if let Some(deadline) = deadline {
            if deadline.expired() {
                return Err(Expired);
            }
        }

        let token1 = &seq1[row - 1];
        for col in 1..cols {
            let token2 = &seq2[col - 1];

            let diagonal = scores[(row - 1, col - 1)] + scoring.score(token1, token2);
            let left = scores[(row, col - 1)] + scoring.score(&Token::Gap, token2);
            let up = scores[(row - 1, col)] + scoring.score(token1, &Token::Gap);

            let mut value = diagonal;
            if left > value {
                value = left;
            }
            if up > value {
                value = up;
            }
            let value = clamp(value);
            debug_assert!(!value.is_nan(), "scoring functions must not produce NaN");

            scores[(row, col)] = value;
            let moves = &mut pointers[(row, col)];
            if diagonal == value {
                moves.insert(Move::Diagonal);
            }
            if left == value {
                moves.insert(Move::Left);
            }
            if up == value {
                moves.insert(Move::Up);
            }
        }
    }

    Ok(Tables { scores, pointers })
}
