//! DOCX Writer
//!
//! Packages plain text as a minimal WordprocessingML document.

use crate::docx::error::DocxResult;
use crate::docx::{CONTENT_TYPES_PART, DOCUMENT_PART, ROOT_RELS_PART};
use quick_xml::escape::escape;
use std::io::{Seek, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// Minimal DOCX writer
pub struct DocxWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
}

impl<W: Write + Seek> DocxWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
        }
    }

    /// Write `text` as one paragraph per line and finish the archive
    pub fn write_text(mut self, text: &str) -> DocxResult<W> {
        self.write_file(CONTENT_TYPES_PART, CONTENT_TYPES_XML)?;
        self.write_file(ROOT_RELS_PART, ROOT_RELS_XML)?;
        self.write_file(DOCUMENT_PART, &document_xml(text))?;
        Ok(self.zip.finish()?)
    }

    /// Write a file to the ZIP archive
    fn write_file(&mut self, path: &str, content: &str) -> DocxResult<()> {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        self.zip.start_file(path, options)?;
        self.zip.write_all(content.as_bytes())?;
        Ok(())
    }
}

/// Build `word/document.xml` for `text`
pub fn document_xml(text: &str) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
    );

    for line in text.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            xml.push_str("<w:p/>");
            continue;
        }
        xml.push_str("<w:p><w:r>");
        for (i, part) in line.split('\t').enumerate() {
            if i > 0 {
                xml.push_str("<w:tab/>");
            }
            if !part.is_empty() {
                xml.push_str(r#"<w:t xml:space="preserve">"#);
                xml.push_str(&escape(part));
                xml.push_str("</w:t>");
            }
        }
        xml.push_str("</w:r></w:p>");
    }

    xml.push_str("</w:body></w:document>");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::reader::{document_text, DocxReader};
    use std::io::Cursor;

    #[test]
    fn test_document_xml_escapes_text() {
        let xml = document_xml("a < b & c");
        assert!(xml.contains("a &lt; b &amp; c"));
    }

    #[test]
    fn test_package_parts() {
        let bytes = DocxWriter::new(Cursor::new(Vec::new()))
            .write_text("line one\nline two")
            .unwrap()
            .into_inner();

        let mut reader = DocxReader::new(Cursor::new(bytes)).unwrap();
        assert!(reader.file_exists(CONTENT_TYPES_PART));
        assert!(reader.file_exists(ROOT_RELS_PART));
        assert_eq!(reader.extract_text().unwrap(), "line one\nline two");
    }

    #[test]
    fn test_tabs_and_blank_lines_survive() {
        let text = "col1\tcol2\n\n  indented";
        assert_eq!(document_text(&document_xml(text)).unwrap(), text);
    }
}
