//! Pattern compilation
//!
//! Every consumer (line search, highlighting, replacement, proximity)
//! goes through [`compile`] so that what highlights is exactly what
//! matches and what gets replaced.

use crate::{PatternError, SearchOptions};
use regex_lite::{Match, Regex, RegexBuilder};

/// A validated, ready-to-execute matcher
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    case_sensitive: bool,
    regex_enabled: bool,
}

impl CompiledPattern {
    /// Whether the pattern matches anywhere in `haystack`
    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }

    /// First match starting at or after byte offset `start`.
    ///
    /// Text before `start` is still visible to boundary assertions.
    pub fn find_at<'h>(&self, haystack: &'h str, start: usize) -> Option<Match<'h>> {
        self.regex.find_at(haystack, start)
    }

    /// All non-overlapping matches, left to right
    pub fn find_iter<'r, 'h>(&'r self, haystack: &'h str) -> regex_lite::Matches<'r, 'h> {
        self.regex.find_iter(haystack)
    }

    /// Pattern source after escaping and boundary wrapping
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Whether capture-group syntax in replacements is honoured
    pub fn expands_captures(&self) -> bool {
        self.regex_enabled
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// Compile validated search options into a matcher
pub fn compile(options: &SearchOptions) -> Result<CompiledPattern, PatternError> {
    compile_term(
        options.term(),
        options.case_sensitive,
        options.regex_enabled,
        options.whole_word,
    )
}

/// Compile a raw term.
///
/// In regex mode the term is used as-is and `whole_word` is ignored.
/// Otherwise every metacharacter is escaped and `whole_word` wraps the
/// literal in `\b` assertions.
pub fn compile_term(
    term: &str,
    case_sensitive: bool,
    regex_enabled: bool,
    whole_word: bool,
) -> Result<CompiledPattern, PatternError> {
    let source = if regex_enabled {
        term.to_string()
    } else if whole_word {
        format!(r"\b{}\b", regex_lite::escape(term))
    } else {
        regex_lite::escape(term)
    };

    let regex = RegexBuilder::new(&source)
        .case_insensitive(!case_sensitive)
        .build()
        .map_err(|e| {
            tracing::debug!(pattern = %source, "pattern rejected: {}", e);
            PatternError::from(e)
        })?;

    Ok(CompiledPattern {
        regex,
        case_sensitive,
        regex_enabled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_metacharacters_are_escaped() {
        let pattern = compile_term("a.b*(c)", true, false, false).unwrap();
        assert!(pattern.is_match("x a.b*(c) y"));
        assert!(!pattern.is_match("aXbbc"));
    }

    #[test]
    fn test_regex_mode_compiles_term_directly() {
        let pattern = compile_term(r"\d{3}-\d{4}", true, true, false).unwrap();
        assert!(pattern.is_match("call 555-1234 now"));
        assert!(pattern.expands_captures());
    }

    #[test]
    fn test_invalid_regex_is_pattern_error() {
        let err = compile_term("(unclosed", false, true, false).unwrap_err();
        assert!(!err.message.is_empty());
        assert!(err.to_string().starts_with("Invalid regex pattern"));
    }

    #[test]
    fn test_unbalanced_paren_is_fine_when_literal() {
        let pattern = compile_term("(unclosed", false, false, false).unwrap();
        assert!(pattern.is_match("an (unclosed group"));
    }

    #[test]
    fn test_case_insensitive_flag() {
        let insensitive = compile_term("Hello", false, false, false).unwrap();
        assert!(insensitive.is_match("HELLO there"));

        let sensitive = compile_term("Hello", true, false, false).unwrap();
        assert!(!sensitive.is_match("HELLO there"));
        assert!(sensitive.is_case_sensitive());
    }

    #[test]
    fn test_whole_word_wraps_boundaries() {
        let pattern = compile_term("cat", false, false, true).unwrap();
        assert_eq!(pattern.as_str(), r"\bcat\b");
        assert!(pattern.is_match("a cat sat"));
        assert!(!pattern.is_match("concatenate"));
    }

    #[test]
    fn test_whole_word_ignored_under_regex() {
        let pattern = compile_term("cat", false, true, true).unwrap();
        assert_eq!(pattern.as_str(), "cat");
        assert!(pattern.is_match("concatenate"));
    }

    #[test]
    fn test_compile_from_options() {
        let options = SearchOptions::new("Fox").unwrap().case_sensitive(true);
        let pattern = compile(&options).unwrap();
        assert!(pattern.is_match("The Fox"));
        assert!(!pattern.is_match("the fox"));
    }
}
