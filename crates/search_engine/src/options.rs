//! Search options validated once at the input boundary

use crate::{EmptyInput, Result};
use serde::Serialize;

/// Options for a search, highlight or replace operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOptions {
    /// The search term, already trimmed and non-empty
    term: String,
    /// Case-sensitive search
    pub case_sensitive: bool,
    /// Interpret the term as a regular expression
    pub regex_enabled: bool,
    /// Match whole words only (ignored in regex mode)
    pub whole_word: bool,
}

impl SearchOptions {
    /// Create options for a term with every flag off.
    ///
    /// The term is trimmed; an empty result is rejected.
    pub fn new(term: &str) -> Result<Self> {
        let term = term.trim();
        if term.is_empty() {
            return Err(EmptyInput::Term.into());
        }
        Ok(Self {
            term: term.to_string(),
            case_sensitive: false,
            regex_enabled: false,
            whole_word: false,
        })
    }

    /// Set case sensitivity
    pub fn case_sensitive(mut self, value: bool) -> Self {
        self.case_sensitive = value;
        self
    }

    /// Enable regex mode
    pub fn regex(mut self, value: bool) -> Self {
        self.regex_enabled = value;
        self
    }

    /// Set whole word matching
    pub fn whole_word(mut self, value: bool) -> Self {
        self.whole_word = value;
        self
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Whether whole-word wrapping actually applies to the compiled pattern
    pub fn uses_word_boundaries(&self) -> bool {
        self.whole_word && !self.regex_enabled
    }
}
