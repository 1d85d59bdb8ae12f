//! Text extraction from PDF content streams
//!
//! This is not a general PDF parser. It scans the file for stream
//! objects, inflates the ones that are unfiltered or Flate-encoded, and
//! interprets the text-showing operators of each content stream. Strings
//! are decoded as single-byte Latin-1, which covers the standard fonts.

use super::writer::{PdfError, Result};
use flate2::read::ZlibDecoder;
use std::io::Read;

/// Extract the text of every page, pages separated by a blank line
pub fn extract_text(data: &[u8]) -> Result<String> {
    if !data.starts_with(b"%PDF-") {
        return Err(PdfError::InvalidDocument("missing %PDF header".to_string()));
    }

    let mut pages = Vec::new();
    for stream in content_streams(data)? {
        let text = stream_text(&stream);
        let text = text.trim();
        if !text.is_empty() {
            pages.push(text.to_string());
        }
    }
    Ok(pages.join("\n\n"))
}

/// How far before a `stream` keyword its dictionary is looked for
const DICT_WINDOW: usize = 4096;

/// Decoded bodies of the streams that can hold page content
fn content_streams(data: &[u8]) -> Result<Vec<Vec<u8>>> {
    let mut streams = Vec::new();
    let mut cursor = 0;

    while let Some(found) = find(&data[cursor..], b"stream") {
        let keyword = cursor + found;
        cursor = keyword + b"stream".len();

        // Skip the "endstream" keyword itself
        if data[..keyword].ends_with(b"end") {
            continue;
        }

        let window = keyword.saturating_sub(DICT_WINDOW);
        let dict_start = window + rfind(&data[window..keyword], b"<<").unwrap_or(0);
        let dict = &data[dict_start..keyword];

        let mut body_start = cursor;
        if data[body_start..].starts_with(b"\r\n") {
            body_start += 2;
        } else if data[body_start..].starts_with(b"\n") || data[body_start..].starts_with(b"\r") {
            body_start += 1;
        }
        let Some(len) = find(&data[body_start..], b"endstream") else {
            break;
        };
        let body = &data[body_start..body_start + len];
        cursor = body_start + len;

        if !is_page_content(dict) {
            continue;
        }
        if contains(dict, b"/FlateDecode") {
            streams.push(inflate(body)?);
        } else if !contains(dict, b"/Filter") {
            streams.push(body.to_vec());
        } else {
            tracing::debug!("Skipping stream with unsupported filter");
        }
    }

    Ok(streams)
}

fn is_page_content(dict: &[u8]) -> bool {
    const NON_CONTENT: [&[u8]; 6] = [
        b"/XObject",
        b"/Metadata",
        b"/XRef",
        b"/ObjStm",
        b"/Length1",
        b"/FontFile",
    ];
    !NON_CONTENT.iter().any(|marker| contains(dict, marker))
}

fn inflate(body: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    ZlibDecoder::new(body)
        .read_to_end(&mut out)
        .map_err(|e| PdfError::Compression(e.to_string()))?;
    Ok(out)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    find(haystack, needle).is_some()
}

#[derive(Debug, Clone)]
enum Operand {
    Str(Vec<u8>),
    Num(f64),
    Array(Vec<Operand>),
    Other,
}

/// Kerning below this (in 1/1000 em) inside a TJ array reads as a space
const TJ_SPACE_THRESHOLD: f64 = -200.0;

/// Interpret the text operators of one content stream
fn stream_text(content: &[u8]) -> String {
    let mut lexer = Lexer::new(content);
    let mut operands: Vec<Operand> = Vec::new();
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();

    while let Some(token) = lexer.next_token() {
        match token {
            Token::Operand(operand) => operands.push(operand),
            Token::Operator(op) => {
                match op.as_slice() {
                    b"Tj" => {
                        if let Some(Operand::Str(s)) = operands.last() {
                            line.push_str(&decode(s));
                        }
                    }
                    b"TJ" => {
                        if let Some(Operand::Array(items)) = operands.last() {
                            for item in items {
                                match item {
                                    Operand::Str(s) => line.push_str(&decode(s)),
                                    Operand::Num(n) if *n < TJ_SPACE_THRESHOLD => line.push(' '),
                                    _ => {}
                                }
                            }
                        }
                    }
                    b"'" | b"\"" => {
                        break_line(&mut line, &mut lines);
                        if let Some(Operand::Str(s)) = operands.last() {
                            line.push_str(&decode(s));
                        }
                    }
                    b"Td" | b"TD" | b"Tm" | b"T*" | b"ET" => break_line(&mut line, &mut lines),
                    _ => {}
                }
                operands.clear();
            }
        }
    }
    break_line(&mut line, &mut lines);

    lines.join("\n")
}

fn break_line(line: &mut String, lines: &mut Vec<String>) {
    if !line.trim().is_empty() {
        lines.push(line.trim_end().to_string());
    }
    line.clear();
}

fn decode(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

enum Token {
    Operand(Operand),
    Operator(Vec<u8>),
}

/// Tokenizer for content stream syntax
struct Lexer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || b == 0 {
                self.pos += 1;
            } else if b == b'%' {
                while let Some(c) = self.peek() {
                    if c == b'\n' || c == b'\r' {
                        break;
                    }
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> Option<Token> {
        self.skip_whitespace_and_comments();
        let b = self.peek()?;

        let token = match b {
            b'(' => Token::Operand(Operand::Str(self.literal_string())),
            b'<' if self.data.get(self.pos + 1) == Some(&b'<') => {
                self.pos += 2;
                Token::Operand(Operand::Other)
            }
            b'>' if self.data.get(self.pos + 1) == Some(&b'>') => {
                self.pos += 2;
                Token::Operand(Operand::Other)
            }
            b'<' => Token::Operand(Operand::Str(self.hex_string())),
            b'[' => {
                self.pos += 1;
                Token::Operand(Operand::Array(self.array()))
            }
            b']' => {
                self.pos += 1;
                Token::Operand(Operand::Other)
            }
            b'/' => {
                self.pos += 1;
                self.regular_run();
                Token::Operand(Operand::Other)
            }
            b'+' | b'-' | b'.' | b'0'..=b'9' => {
                let run = self.regular_run();
                match std::str::from_utf8(run).ok().and_then(|s| s.parse().ok()) {
                    Some(n) => Token::Operand(Operand::Num(n)),
                    None => Token::Operand(Operand::Other),
                }
            }
            b'\'' | b'"' => {
                self.pos += 1;
                Token::Operator(vec![b])
            }
            _ => {
                let run = self.regular_run();
                if run.is_empty() {
                    // Stray delimiter
                    self.pos += 1;
                    Token::Operand(Operand::Other)
                } else {
                    Token::Operator(run.to_vec())
                }
            }
        };
        Some(token)
    }

    fn regular_run(&mut self) -> &'a [u8] {
        let data = self.data;
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || b"()<>[]{}/%".contains(&b) {
                break;
            }
            self.pos += 1;
        }
        &data[start..self.pos]
    }

    fn array(&mut self) -> Vec<Operand> {
        let mut items = Vec::new();
        loop {
            self.skip_whitespace_and_comments();
            match self.peek() {
                None => break,
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => match self.next_token() {
                    Some(Token::Operand(operand)) => items.push(operand),
                    Some(Token::Operator(_)) | None => {}
                },
            }
        }
        items
    }

    fn literal_string(&mut self) -> Vec<u8> {
        // Opening paren
        self.pos += 1;
        let mut out = Vec::new();
        let mut depth = 1;

        while let Some(b) = self.peek() {
            self.pos += 1;
            match b {
                b'\\' => {
                    let Some(esc) = self.peek() else { break };
                    self.pos += 1;
                    match esc {
                        b'n' => out.push(b'\n'),
                        b'r' => out.push(b'\r'),
                        b't' => out.push(b'\t'),
                        b'b' => out.push(0x08),
                        b'f' => out.push(0x0C),
                        b'0'..=b'7' => {
                            let mut value = u32::from(esc - b'0');
                            for _ in 0..2 {
                                match self.peek() {
                                    Some(d @ b'0'..=b'7') => {
                                        value = value * 8 + u32::from(d - b'0');
                                        self.pos += 1;
                                    }
                                    _ => break,
                                }
                            }
                            out.push(value as u8);
                        }
                        b'\r' => {
                            if self.peek() == Some(b'\n') {
                                self.pos += 1;
                            }
                        }
                        b'\n' => {}
                        other => out.push(other),
                    }
                }
                b'(' => {
                    depth += 1;
                    out.push(b);
                }
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                    out.push(b);
                }
                _ => out.push(b),
            }
        }
        out
    }

    fn hex_string(&mut self) -> Vec<u8> {
        self.pos += 1;
        let mut digits = Vec::new();
        while let Some(b) = self.peek() {
            self.pos += 1;
            if b == b'>' {
                break;
            }
            if let Some(d) = (b as char).to_digit(16) {
                digits.push(d as u8);
            }
        }
        if digits.len() % 2 == 1 {
            digits.push(0);
        }
        digits.chunks(2).map(|pair| pair[0] << 4 | pair[1]).collect()
    }
}
