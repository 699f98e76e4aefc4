use std::fmt::{self, Display};
use std::ops::{Index, Range};

use derive_more::{From, Into, IntoIterator};
use eyre::Result;

use super::token::Token;

/// An ordered, mutable list of tokens with position-wise equality.
#[derive(Clone, Default, Eq, PartialEq, Hash, Debug, From, Into, IntoIterator)]
pub struct Sequence {
    #[into_iterator(owned, ref)]
    tokens: Vec<Token>,
}

impl Sequence {
    pub fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tokens: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn get(&self, pos: usize) -> Option<&Token> {
        self.tokens.get(pos)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns a new sequence with the tokens in reverse order.
    pub fn reversed(&self) -> Self {
        Self {
            tokens: self.tokens.iter().rev().cloned().collect(),
        }
    }

    /// Returns a copy of the `range` region of the sequence.
    pub fn slice(&self, range: Range<usize>) -> Result<Self> {
        eyre::ensure!(
            range.start <= range.end && range.end <= self.tokens.len(),
            "slice {:?} is out of bounds for a sequence of {} tokens",
            range,
            self.tokens.len()
        );
        Ok(Self {
            tokens: self.tokens[range].to_vec(),
        })
    }
}

impl Index<usize> for Sequence {
    type Output = Token;

    fn index(&self, pos: usize) -> &Self::Output {
        &self.tokens[pos]
    }
}

impl Extend<Token> for Sequence {
    fn extend<I: IntoIterator<Item = Token>>(&mut self, tokens: I) {
        self.tokens.extend(tokens);
    }
}

impl FromIterator<Token> for Sequence {
    fn from_iter<I: IntoIterator<Item = Token>>(tokens: I) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }
}

impl Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (ind, token) in self.tokens.iter().enumerate() {
            if ind > 0 {
                f.write_str(" ")?;
            }
            token.fmt(f)?;
        }
        Ok(())
    }
}
