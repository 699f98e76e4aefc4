use std::fmt::{self, Display};

/// `Token` is the smallest alignable unit: a surface form plus an optional tag.
///
/// `Gap` is the sentinel for "no token aligned at this position". It compares
/// unequal to every lexeme, and the engines never pair a gap with a gap.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Token {
    /// No token aligned at this position.
    Gap,
    /// A surface token, e.g. a word or punctuation mark, with its tag.
    Lexeme {
        text: String,
        tag: Option<String>,
    },
}

impl Token {
    pub fn new(text: impl Into<String>, tag: impl Into<String>) -> Self {
        Token::Lexeme {
            text: text.into(),
            tag: Some(tag.into()),
        }
    }

    pub fn untagged(text: impl Into<String>) -> Self {
        Token::Lexeme {
            text: text.into(),
            tag: None,
        }
    }

    pub fn is_gap(&self) -> bool {
        matches!(self, Token::Gap)
    }

    /// Surface text of the token; `None` for the gap sentinel.
    pub fn text(&self) -> Option<&str> {
        match self {
            Token::Gap => None,
            Token::Lexeme { text, .. } => Some(text),
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Token::Gap => None,
            Token::Lexeme { tag, .. } => tag.as_deref(),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Gap => f.write_str("-"),
            Token::Lexeme { text, .. } => f.write_str(text),
        }
    }
}

impl From<&str> for Token {
    fn from(text: &str) -> Self {
        Token::untagged(text)
    }
}
