//! PDF Writer
//!
//! Lays plain text out on A4 pages in 12pt Helvetica and writes a
//! single-revision PDF with a classic cross-reference table. Page
//! content streams are Flate-compressed.

use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{self, Write};
use thiserror::Error;

/// Error type for PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Invalid document structure
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    /// Compression error
    #[error("Compression error: {0}")]
    Compression(String),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// A4 page width in points
pub const PAGE_WIDTH: f32 = 595.0;
/// A4 page height in points
pub const PAGE_HEIGHT: f32 = 842.0;
pub const FONT_SIZE: f32 = 12.0;
pub const MARGIN: f32 = 50.0;
/// Baseline-to-baseline distance
pub const LINE_HEIGHT: f32 = FONT_SIZE + 5.0;

/// Helvetica advance widths for ' '..='~', in 1/1000 em
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

const DEFAULT_GLYPH_WIDTH: u16 = 556;

/// Width of `text` set in Helvetica at `size` points
pub fn text_width(text: &str, size: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| match c {
            ' '..='~' => HELVETICA_WIDTHS[c as usize - 0x20] as u32,
            _ => DEFAULT_GLYPH_WIDTH as u32,
        })
        .sum();
    units as f32 * size / 1000.0
}

/// A positioned line of text on a page
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub y: f32,
}

/// Break `text` into pages of baseline-positioned lines.
///
/// Each source line is filled greedily word by word up to the text width;
/// a word wider than a whole line is placed on its own line. A new page
/// starts when the next baseline would fall inside the bottom margin.
pub fn layout_pages(text: &str) -> Vec<Vec<PlacedLine>> {
    let max_width = PAGE_WIDTH - 2.0 * MARGIN;
    let top = PAGE_HEIGHT - MARGIN;

    let mut pages = vec![Vec::new()];
    let mut y = top;

    let mut place = |pages: &mut Vec<Vec<PlacedLine>>, line: &str| {
        if y < MARGIN + LINE_HEIGHT {
            pages.push(Vec::new());
            y = top;
        }
        if let Some(page) = pages.last_mut() {
            page.push(PlacedLine {
                text: line.trim().to_string(),
                y,
            });
        }
        y -= LINE_HEIGHT;
    };

    for source in text.split('\n') {
        let source = source.strip_suffix('\r').unwrap_or(source);
        let mut current = String::new();

        for word in source.split(' ') {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if text_width(&candidate, FONT_SIZE) > max_width && !current.is_empty() {
                place(&mut pages, &current);
                current = word.to_string();
            } else {
                current = candidate;
            }
        }
        place(&mut pages, &current);
    }

    pages
}

/// Encode text as a PDF literal string in WinAnsi-compatible bytes
fn literal_string(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() + 2);
    out.push(b'(');
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push(b'\\');
                out.push(c as u8);
            }
            '\t' => out.push(b' '),
            c if (c as u32) < 0x100 => out.push(c as u32 as u8),
            _ => out.push(b'?'),
        }
    }
    out.push(b')');
    out
}

fn page_content(lines: &[PlacedLine]) -> Vec<u8> {
    let mut content = Vec::new();
    for line in lines.iter().filter(|l| !l.text.is_empty()) {
        content.extend_from_slice(
            format!("BT /F1 {} Tf {} {} Td ", FONT_SIZE, MARGIN, line.y).as_bytes(),
        );
        content.extend_from_slice(&literal_string(&line.text));
        content.extend_from_slice(b" Tj ET\n");
    }
    content
}

/// PDF file writer
pub struct PdfWriter<W: Write> {
    /// Output writer
    writer: W,
    /// Current byte position
    position: u64,
    /// Byte offset of each object, indexed by object number - 1
    offsets: Vec<u64>,
    /// Whether to compress streams
    compress: bool,
}

impl<W: Write> PdfWriter<W> {
    /// Create a new PDF writer
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            position: 0,
            offsets: Vec::new(),
            compress: true,
        }
    }

    /// Set whether to compress streams
    pub fn set_compression(&mut self, compress: bool) {
        self.compress = compress;
    }

    /// Write bytes and update position
    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }

    /// Write a string and update position
    fn write_str(&mut self, s: &str) -> Result<()> {
        self.write_bytes(s.as_bytes())
    }

    /// Record the offset of object `obj_num`; objects must be written in order
    fn begin_object(&mut self, obj_num: usize) -> Result<()> {
        if obj_num != self.offsets.len() + 1 {
            return Err(PdfError::InvalidDocument(format!(
                "object {} written out of order",
                obj_num
            )));
        }
        self.offsets.push(self.position);
        self.write_str(&format!("{} 0 obj\n", obj_num))
    }

    fn write_object(&mut self, obj_num: usize, body: &str) -> Result<()> {
        self.begin_object(obj_num)?;
        self.write_str(body)?;
        self.write_str("\nendobj\n")
    }

    fn write_stream_object(&mut self, obj_num: usize, data: &[u8]) -> Result<()> {
        let (data, filter) = if self.compress {
            (compress(data)?, " /Filter /FlateDecode")
        } else {
            (data.to_vec(), "")
        };

        self.begin_object(obj_num)?;
        self.write_str(&format!("<< /Length {}{} >>\nstream\n", data.len(), filter))?;
        self.write_bytes(&data)?;
        self.write_str("\nendstream\nendobj\n")
    }

    /// Lay out `text` and write the complete file
    pub fn write_text(mut self, text: &str) -> Result<W> {
        let pages = layout_pages(text);

        // 1 catalog, 2 page tree, 3 font, then a page and its content per page
        let page_obj = |i: usize| 4 + 2 * i;
        let kids = (0..pages.len())
            .map(|i| format!("{} 0 R", page_obj(i)))
            .collect::<Vec<_>>()
            .join(" ");

        self.write_str("%PDF-1.4\n")?;
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])?;

        self.write_object(1, "<< /Type /Catalog /Pages 2 0 R >>")?;
        self.write_object(
            2,
            &format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, pages.len()),
        )?;
        self.write_object(
            3,
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
        )?;

        for (i, lines) in pages.iter().enumerate() {
            let obj = page_obj(i);
            self.write_object(
                obj,
                &format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                     /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                    PAGE_WIDTH,
                    PAGE_HEIGHT,
                    obj + 1
                ),
            )?;
            self.write_stream_object(obj + 1, &page_content(lines))?;
        }

        self.write_xref_and_trailer()?;
        self.writer.flush()?;
        Ok(self.writer)
    }

    /// Write the cross-reference table and trailer
    fn write_xref_and_trailer(&mut self) -> Result<()> {
        let xref_offset = self.position;
        let count = self.offsets.len() + 1;

        self.write_str(&format!("xref\n0 {}\n", count))?;
        self.write_str("0000000000 65535 f \n")?;
        let entries: String = self
            .offsets
            .iter()
            .map(|offset| format!("{:010} 00000 n \n", offset))
            .collect();
        self.write_str(&entries)?;

        self.write_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            count, xref_offset
        ))
    }
}

fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| PdfError::Compression(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| PdfError::Compression(e.to_string()))
}
