//! DOCX import and export
//!
//! Only the text content of the main document part is read. Export
//! produces the smallest package Word will open: content types, the root
//! relationships and one paragraph per line.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{DocxError, DocxResult};
pub use reader::{document_text, DocxReader};
pub use writer::{document_xml, DocxWriter};

use std::io::Cursor;

pub(crate) const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
pub(crate) const ROOT_RELS_PART: &str = "_rels/.rels";
pub(crate) const DOCUMENT_PART: &str = "word/document.xml";

/// Extract the raw text of a DOCX file held in memory
pub fn docx_to_text(bytes: &[u8]) -> DocxResult<String> {
    DocxReader::new(Cursor::new(bytes))?.extract_text()
}

/// Package `text` as a DOCX file in memory
pub fn text_to_docx(text: &str) -> DocxResult<Vec<u8>> {
    Ok(DocxWriter::new(Cursor::new(Vec::new()))
        .write_text(text)?
        .into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_a_zip() {
        assert!(matches!(docx_to_text(b"plain text"), Err(DocxError::Zip(_))));
    }

    #[test]
    fn test_missing_document_part() {
        use std::io::Write;
        use zip::write::SimpleFileOptions;

        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("other.xml", SimpleFileOptions::default()).unwrap();
        zip.write_all(b"<x/>").unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        assert!(matches!(
            docx_to_text(&bytes),
            Err(DocxError::MissingPart(part)) if part == DOCUMENT_PART
        ));
    }
}
