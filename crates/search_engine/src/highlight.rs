//! Match highlighting
//!
//! Produces a span-annotated view of a text rather than markup for any
//! particular toolkit. Callers pick the markers when rendering.

use crate::{compile, CompiledPattern, ProximityMatchRecord, SearchOptions};
use serde::Serialize;

/// What a highlighted span represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightTag {
    /// A hit of the search pattern
    Match,
    /// The first term of a proximity pair
    Term1,
    /// The second term of a proximity pair
    Term2,
}

/// A marked byte range of the original text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
    pub tag: HighlightTag,
}

/// Text plus ascending, non-overlapping, non-empty spans
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlighted<'a> {
    pub text: &'a str,
    pub spans: Vec<HighlightSpan>,
}

impl<'a> Highlighted<'a> {
    /// Text with no spans
    pub fn plain(text: &'a str) -> Self {
        Self {
            text,
            spans: Vec::new(),
        }
    }

    /// Wrap every span in `open`/`close` markers.
    pub fn render(&self, open: &str, close: &str) -> String {
        self.render_with(|_| (open, close))
    }

    /// Wrap every span in markers chosen per tag
    pub fn render_with<'m, F>(&self, markers: F) -> String
    where
        F: Fn(HighlightTag) -> (&'m str, &'m str),
    {
        let mut out = String::with_capacity(self.text.len() + self.spans.len() * 16);
        let mut last = 0;

        for span in &self.spans {
            let (open, close) = markers(span.tag);
            out.push_str(&self.text[last..span.start]);
            out.push_str(open);
            out.push_str(&self.text[span.start..span.end]);
            out.push_str(close);
            last = span.end;
        }
        out.push_str(&self.text[last..]);
        out
    }
}

/// Mark every non-overlapping match of `pattern` in `text`.
///
/// Zero-width matches are skipped since there is nothing to mark.
pub fn highlight<'a>(text: &'a str, pattern: &CompiledPattern) -> Highlighted<'a> {
    let spans = pattern
        .find_iter(text)
        .filter(|m| !m.is_empty())
        .map(|m| HighlightSpan {
            start: m.start(),
            end: m.end(),
            tag: HighlightTag::Match,
        })
        .collect();

    Highlighted { text, spans }
}

/// Best-effort highlight straight from options.
///
/// A pattern that fails to compile yields the text unmarked.
pub fn highlight_with_options<'a>(text: &'a str, options: &SearchOptions) -> Highlighted<'a> {
    match compile(options) {
        Ok(pattern) => highlight(text, &pattern),
        Err(e) => {
            tracing::debug!("highlight skipped: {}", e);
            Highlighted::plain(text)
        }
    }
}

/// Render `text` with matches wrapped in `open`/`close`, or unmarked when
/// the options do not compile.
pub fn render_highlighted(text: &str, options: &SearchOptions, open: &str, close: &str) -> String {
    highlight_with_options(text, options).render(open, close)
}

/// Spans for both terms of a proximity record, over its snippet
pub fn highlight_proximity(record: &ProximityMatchRecord) -> Highlighted<'_> {
    let mut spans = vec![
        HighlightSpan {
            start: record.term1_span.start,
            end: record.term1_span.end,
            tag: HighlightTag::Term1,
        },
        HighlightSpan {
            start: record.term2_span.start,
            end: record.term2_span.end,
            tag: HighlightTag::Term2,
        },
    ];
    spans.sort_by_key(|s| s.start);

    Highlighted {
        text: &record.snippet,
        spans,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compile_term, find_proximity};

    #[test]
    fn test_wraps_each_match_once() {
        let pattern = compile_term("an", false, false, false).unwrap();
        let rendered = highlight("banana and An", &pattern).render("[", "]");
        assert_eq!(rendered, "b[an][an]a [an]d [An]");
    }

    #[test]
    fn test_spans_ordered_and_disjoint() {
        let pattern = compile_term("aa", true, false, false).unwrap();
        let highlighted = highlight("aaaaa", &pattern);

        assert_eq!(highlighted.spans.len(), 2);
        assert_eq!((highlighted.spans[0].start, highlighted.spans[0].end), (0, 2));
        assert_eq!((highlighted.spans[1].start, highlighted.spans[1].end), (2, 4));
    }

    #[test]
    fn test_no_match_leaves_text() {
        let pattern = compile_term("zzz", false, false, false).unwrap();
        let highlighted = highlight("plain text", &pattern);
        assert!(highlighted.spans.is_empty());
        assert_eq!(highlighted.render("<b>", "</b>"), "plain text");
    }

    #[test]
    fn test_empty_matches_not_marked() {
        let pattern = compile_term("x*", true, true, false).unwrap();
        let rendered = highlight("axxb", &pattern).render("<", ">");
        assert_eq!(rendered, "a<xx>b");
    }

    #[test]
    fn test_invalid_pattern_renders_plain() {
        let options = SearchOptions::new("(broken").unwrap().regex(true);
        let rendered = render_highlighted("some (broken text", &options, "<", ">");
        assert_eq!(rendered, "some (broken text");
    }

    #[test]
    fn test_render_highlighted_whole_word() {
        let options = SearchOptions::new("cat").unwrap().whole_word(true);
        let rendered = render_highlighted("concatenate cat scatter", &options, "<", ">");
        assert_eq!(rendered, "concatenate <cat> scatter");
    }

    #[test]
    fn test_proximity_tags() {
        let records = find_proximity("alpha one beta", "alpha", "beta", 3, false).unwrap();
        let highlighted = highlight_proximity(&records[0]);

        let rendered = highlighted.render_with(|tag| match tag {
            HighlightTag::Term1 => ("{", "}"),
            _ => ("[", "]"),
        });
        assert_eq!(rendered, "{alpha} one [beta]");
    }
}
