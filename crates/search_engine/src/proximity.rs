//! Proximity search
//!
//! Finds a second term within a bounded number of whitespace-separated
//! tokens after a first term. The scan is forward only: term2 must come
//! after term1.

use crate::matcher::line_number_at;
use crate::{compile_term, CompiledPattern, EmptyInput, Result};
use serde::Serialize;
use std::ops::Range;

/// Token distance used when the configured value is unusable
pub const DEFAULT_DISTANCE: usize = 5;

/// Tokens of context kept on each side of a proximity hit
const CONTEXT_TOKENS: usize = 5;

/// A term1/term2 pair found within the distance window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProximityMatchRecord {
    /// 1-based line number recovered from the snippet position
    pub line_number: usize,
    /// Surrounding tokens joined by single spaces
    pub snippet: String,
    /// Byte range of the term1 hit inside `snippet`
    pub term1_span: Range<usize>,
    /// Byte range of the term2 hit inside `snippet`
    pub term2_span: Range<usize>,
}

/// Parse a user-supplied distance, falling back to [`DEFAULT_DISTANCE`]
pub fn parse_distance(raw: &str) -> usize {
    match raw.trim().parse::<i64>() {
        Ok(n) if n > 0 => positive_distance(usize::try_from(n).unwrap_or(usize::MAX)),
        _ => DEFAULT_DISTANCE,
    }
}

/// Replace a zero distance with [`DEFAULT_DISTANCE`]
pub fn positive_distance(distance: usize) -> usize {
    if distance == 0 {
        DEFAULT_DISTANCE
    } else {
        distance
    }
}

struct Token<'a> {
    text: &'a str,
    offset: usize,
}

fn tokenize(buffer: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = None;

    for (idx, ch) in buffer.char_indices() {
        match (ch.is_whitespace(), start) {
            (true, Some(s)) => {
                tokens.push(Token {
                    text: &buffer[s..idx],
                    offset: s,
                });
                start = None;
            }
            (false, None) => start = Some(idx),
            _ => {}
        }
    }
    if let Some(s) = start {
        tokens.push(Token {
            text: &buffer[s..],
            offset: s,
        });
    }

    tokens
}

/// Find term2 within `distance` tokens after each term1 token.
///
/// Both terms are literal, case-(in)sensitive substring tests against each
/// token. For every term1 token only the first term2 hit is reported.
///
/// The line number is recovered by locating the snippet text in the
/// buffer, so a snippet that also occurs earlier reports the earlier line.
/// When the snippet text does not occur verbatim (it crossed a line break
/// or irregular spacing) a plain lookup has no line to report; the line of
/// the term1 token is used instead.
///
/// A `distance` of 0 is treated as [`DEFAULT_DISTANCE`].
pub fn find_proximity(
    buffer: &str,
    term1: &str,
    term2: &str,
    distance: usize,
    case_sensitive: bool,
) -> Result<Vec<ProximityMatchRecord>> {
    let (term1, term2) = (term1.trim(), term2.trim());
    if buffer.is_empty() || term1.is_empty() || term2.is_empty() {
        return Err(EmptyInput::ProximityTerms.into());
    }

    let first = compile_term(term1, case_sensitive, false, false)?;
    let second = compile_term(term2, case_sensitive, false, false)?;
    let distance = positive_distance(distance);
    let tokens = tokenize(buffer);
    let mut records = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        if !first.is_match(token.text) {
            continue;
        }

        let window_end = i.saturating_add(distance).saturating_add(1).min(tokens.len());
        let partner = (i + 1..window_end).find(|&j| second.is_match(tokens[j].text));

        if let Some(j) = partner {
            records.push(build_record(buffer, &tokens, i, j, &first, &second));
        }
    }

    tracing::debug!(
        distance,
        tokens = tokens.len(),
        matches = records.len(),
        "proximity search complete"
    );
    Ok(records)
}

fn build_record(
    buffer: &str,
    tokens: &[Token<'_>],
    i: usize,
    j: usize,
    first: &CompiledPattern,
    second: &CompiledPattern,
) -> ProximityMatchRecord {
    let start = i.saturating_sub(CONTEXT_TOKENS);
    let end = (j + CONTEXT_TOKENS).min(tokens.len());

    let mut snippet = String::new();
    let mut term1_span = 0..0;
    let mut term2_span = 0..0;

    for (k, token) in tokens[start..end].iter().enumerate() {
        if k > 0 {
            snippet.push(' ');
        }
        let base = snippet.len();
        snippet.push_str(token.text);

        let index = start + k;
        if index == i {
            term1_span = span_within(first, token.text, base);
        } else if index == j {
            term2_span = span_within(second, token.text, base);
        }
    }

    let line_number = match buffer.find(&snippet) {
        Some(pos) => line_number_at(buffer, pos),
        None => line_number_at(buffer, tokens[i].offset),
    };

    ProximityMatchRecord {
        line_number,
        snippet,
        term1_span,
        term2_span,
    }
}

fn span_within(pattern: &CompiledPattern, token: &str, base: usize) -> Range<usize> {
    pattern
        .find_at(token, 0)
        .map(|m| base + m.start()..base + m.end())
        .unwrap_or(base..base + token.len())
}
