//! Replace engine
//!
//! Both operations take the buffer by reference and hand back a new one;
//! the input is never modified.

use crate::CompiledPattern;
use regex_lite::NoExpand;
use serde::Serialize;

/// Outcome of a replace operation.
///
/// `found == false` is the "no more occurrences" outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplacementResult {
    pub new_buffer: String,
    pub occurrences_replaced: usize,
    pub found: bool,
    /// Byte offset just past the inserted replacement. After an empty
    /// match this also steps over one character of the buffer, and may
    /// point one past the end once the buffer is exhausted.
    pub next_offset: usize,
}

impl ReplacementResult {
    fn unchanged(buffer: &str, offset: usize) -> Self {
        Self {
            new_buffer: buffer.to_string(),
            occurrences_replaced: 0,
            found: false,
            next_offset: offset,
        }
    }
}

/// Replace every non-overlapping match, scanning left to right.
///
/// Inserted text is never rescanned. In regex mode `$1`/`${name}` in the
/// replacement expand to capture groups; in literal mode it is inserted
/// verbatim.
pub fn replace_all(buffer: &str, pattern: &CompiledPattern, replacement: &str) -> ReplacementResult {
    let count = pattern.find_iter(buffer).count();
    if count == 0 {
        return ReplacementResult::unchanged(buffer, 0);
    }

    let new_buffer = if pattern.expands_captures() {
        pattern.regex().replace_all(buffer, replacement).into_owned()
    } else {
        pattern.regex().replace_all(buffer, NoExpand(replacement)).into_owned()
    };

    tracing::debug!(count, "replaced all occurrences");
    let next_offset = new_buffer.len();
    ReplacementResult {
        new_buffer,
        occurrences_replaced: count,
        found: true,
        next_offset,
    }
}

/// Replace the first match at or after byte offset `from_offset`.
///
/// The offset is clamped to the buffer and moved forward to a character
/// boundary. Feeding `next_offset` back in walks through the buffer one
/// occurrence at a time. An offset past the end of the buffer finds
/// nothing.
pub fn replace_next(
    buffer: &str,
    pattern: &CompiledPattern,
    replacement: &str,
    from_offset: usize,
) -> ReplacementResult {
    if from_offset > buffer.len() {
        return ReplacementResult::unchanged(buffer, buffer.len());
    }
    let from = ceil_char_boundary(buffer, from_offset);

    let Some(caps) = pattern.regex().captures_at(buffer, from) else {
        return ReplacementResult::unchanged(buffer, from);
    };
    let Some(hit) = caps.get(0) else {
        return ReplacementResult::unchanged(buffer, from);
    };

    let mut inserted = String::new();
    if pattern.expands_captures() {
        caps.expand(replacement, &mut inserted);
    } else {
        inserted.push_str(replacement);
    }

    let mut new_buffer = String::with_capacity(buffer.len() + inserted.len());
    new_buffer.push_str(&buffer[..hit.start()]);
    new_buffer.push_str(&inserted);
    new_buffer.push_str(&buffer[hit.end()..]);

    let mut next_offset = hit.start() + inserted.len();
    if hit.is_empty() {
        // an empty match would be found again at the same spot
        next_offset += buffer[hit.end()..].chars().next().map_or(1, char::len_utf8);
    }

    ReplacementResult {
        new_buffer,
        occurrences_replaced: 1,
        found: true,
        next_offset,
    }
}

fn ceil_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset += 1;
    }
    offset
}
