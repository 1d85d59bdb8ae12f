//! Error types for search operations

use thiserror::Error;

/// A search term that could not be turned into a matcher
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid regex pattern: {message}")]
pub struct PatternError {
    pub message: String,
}

impl PatternError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<regex_lite::Error> for PatternError {
    fn from(err: regex_lite::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Input missing before any matching could start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EmptyInput {
    #[error("Please enter some text.")]
    Buffer,

    #[error("Please enter a search term.")]
    Term,

    #[error("Please enter text and both search terms.")]
    ProximityTerms,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    EmptyInput(#[from] EmptyInput),
}

pub type Result<T> = std::result::Result<T, SearchError>;
