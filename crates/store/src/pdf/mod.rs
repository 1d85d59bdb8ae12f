//! PDF import and export

pub mod reader;
pub mod writer;

pub use reader::extract_text;
pub use writer::{layout_pages, text_width, PdfError, PdfWriter, PlacedLine};

/// Render `text` as a PDF file in memory
pub fn text_to_pdf(text: &str) -> writer::Result<Vec<u8>> {
    PdfWriter::new(Vec::new()).write_text(text)
}

/// Extract page text from a PDF file held in memory
pub fn pdf_to_text(bytes: &[u8]) -> writer::Result<String> {
    extract_text(bytes)
}
