//! Line-oriented match engine
//!
//! The display model is one entry per line: a line qualifies when the
//! pattern matches anywhere inside it.

use crate::CompiledPattern;
use serde::Serialize;

/// A line containing at least one match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    /// 1-based line number
    pub line_number: usize,
    /// The full line text
    pub content: String,
    /// Start of the first hit within `content` (character index)
    pub start_offset: usize,
    /// End of the first hit within `content` (character index)
    pub end_offset: usize,
}

/// A single hit anywhere in the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchSpan {
    /// 1-based line number of the match start
    pub line_number: usize,
    /// Byte offset of the match start in the buffer
    pub start: usize,
    /// Byte offset one past the match end
    pub end: usize,
}

impl MatchSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Find every line the pattern matches, in ascending line order.
///
/// Lines are split on `'\n'`, so a trailing newline yields a final empty
/// line that takes part in matching like any other.
pub fn find_line_matches(buffer: &str, pattern: &CompiledPattern) -> Vec<MatchRecord> {
    let records: Vec<MatchRecord> = buffer
        .split('\n')
        .enumerate()
        .filter_map(|(index, line)| {
            let hit = pattern.find_at(line, 0)?;
            Some(MatchRecord {
                line_number: index + 1,
                content: line.to_string(),
                start_offset: char_offset(line, hit.start()),
                end_offset: char_offset(line, hit.end()),
            })
        })
        .collect();

    tracing::debug!(
        pattern = pattern.as_str(),
        lines = records.len(),
        "line search complete"
    );
    records
}

/// Every non-overlapping match in the buffer with its line number
pub fn find_all(buffer: &str, pattern: &CompiledPattern) -> Vec<MatchSpan> {
    let mut line_number = 1;
    let mut scanned = 0;

    pattern
        .find_iter(buffer)
        .map(|m| {
            line_number += buffer[scanned..m.start()].matches('\n').count();
            scanned = m.start();
            MatchSpan {
                line_number,
                start: m.start(),
                end: m.end(),
            }
        })
        .collect()
}

/// Byte offset where a 1-based line starts.
///
/// Lines past the end clamp to the buffer length; line 0 is treated as 1.
pub fn line_start_offset(buffer: &str, line_number: usize) -> usize {
    if line_number <= 1 {
        return 0;
    }
    buffer
        .match_indices('\n')
        .nth(line_number - 2)
        .map(|(idx, _)| idx + 1)
        .unwrap_or(buffer.len())
}

/// 1-based line number containing byte offset `offset`
pub fn line_number_at(buffer: &str, offset: usize) -> usize {
    let offset = offset.min(buffer.len());
    buffer.as_bytes()[..offset].iter().filter(|&&b| b == b'\n').count() + 1
}

fn char_offset(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile_term;

    #[test]
    fn test_one_record_per_line() {
        let pattern = compile_term("one", false, false, false).unwrap();
        let records = find_line_matches("one two one\nthree\none", &pattern);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line_number, 1);
        assert_eq!(records[0].content, "one two one");
        assert_eq!((records[0].start_offset, records[0].end_offset), (0, 3));
        assert_eq!(records[1].line_number, 3);
    }

    #[test]
    fn test_whole_word_line_match() {
        let pattern = compile_term("cat", false, false, true).unwrap();
        let buffer = "concatenate\ncat\nscatter";
        let records = find_line_matches(buffer, &pattern);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].line_number, 2);
        assert_eq!(records[0].content, "cat");
    }

    #[test]
    fn test_whole_word_single_line() {
        let pattern = compile_term("cat", false, false, true).unwrap();
        let records = find_line_matches("concatenate cat scatter", &pattern);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].start_offset, 12);
        assert_eq!(records[0].end_offset, 15);
    }

    #[test]
    fn test_offsets_are_characters() {
        let pattern = compile_term("fox", false, false, false).unwrap();
        let records = find_line_matches("héllo fox", &pattern);

        assert_eq!(records[0].start_offset, 6);
        assert_eq!(records[0].end_offset, 9);
    }

    #[test]
    fn test_trailing_empty_line_counts() {
        let pattern = compile_term("^$", true, true, false).unwrap();
        let records = find_line_matches("a\nb\n", &pattern);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].line_number, 3);
        assert_eq!(records[0].content, "");
    }

    #[test]
    fn test_idempotent() {
        let pattern = compile_term("b", false, false, false).unwrap();
        let buffer = "abc\nbcd\ncde\nb";
        assert_eq!(
            find_line_matches(buffer, &pattern),
            find_line_matches(buffer, &pattern)
        );
    }

    #[test]
    fn test_find_all_tracks_lines() {
        let pattern = compile_term("x", true, false, false).unwrap();
        let spans = find_all("x x\n\nax", &pattern);

        let lines: Vec<usize> = spans.iter().map(|s| s.line_number).collect();
        assert_eq!(lines, vec![1, 1, 3]);
        assert_eq!((spans[2].start, spans[2].end), (6, 7));
    }

    #[test]
    fn test_line_start_offset() {
        let buffer = "first\nsecond\nthird";
        assert_eq!(line_start_offset(buffer, 1), 0);
        assert_eq!(line_start_offset(buffer, 2), 6);
        assert_eq!(line_start_offset(buffer, 3), 13);
        assert_eq!(line_start_offset(buffer, 9), buffer.len());
    }

    #[test]
    fn test_line_number_at() {
        let buffer = "a\nb\nc";
        assert_eq!(line_number_at(buffer, 0), 1);
        assert_eq!(line_number_at(buffer, 2), 2);
        assert_eq!(line_number_at(buffer, 100), 3);
    }
}
