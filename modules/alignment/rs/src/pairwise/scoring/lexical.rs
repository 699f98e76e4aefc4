use phrasal_core_rs::phrase::Token;

use super::{Score, Scorer};

/// Scores exact token equality: text and tag must both match.
pub struct Equality<S: Score> {
    pub equal: S,
    pub different: S,
    pub gap: S,
}

impl<S: Score> Equality<S> {
    pub fn new(equal: S, different: S, gap: S) -> Self {
        Self {
            equal,
            different,
            gap,
        }
    }
}

impl<S: Score> Scorer for Equality<S> {
    type Score = S;

    #[inline(always)]
    fn score(&self, a: &Token, b: &Token) -> S {
        debug_assert!(!(a.is_gap() && b.is_gap()));
        if a.is_gap() || b.is_gap() {
            self.gap
        } else if a == b {
            self.equal
        } else {
            self.different
        }
    }
}

/// Scores tokens by ASCII-case-insensitive text comparison, ignoring tags.
pub struct CaseFold<S: Score> {
    pub equal: S,
    pub different: S,
    pub gap: S,
}

impl<S: Score> CaseFold<S> {
    pub fn new(equal: S, different: S, gap: S) -> Self {
        Self {
            equal,
            different,
            gap,
        }
    }
}

impl<S: Score> Scorer for CaseFold<S> {
    type Score = S;

    #[inline(always)]
    fn score(&self, a: &Token, b: &Token) -> S {
        debug_assert!(!(a.is_gap() && b.is_gap()));
        match (a.text(), b.text()) {
            (Some(a), Some(b)) if a.eq_ignore_ascii_case(b) => self.equal,
            (Some(_), Some(_)) => self.different,
            _ => self.gap,
        }
    }
}
