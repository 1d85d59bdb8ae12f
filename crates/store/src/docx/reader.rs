//! Raw text extraction from DOCX packages

use crate::docx::error::{DocxError, DocxResult};
use crate::docx::DOCUMENT_PART;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// A wrapper around a ZIP archive for reading DOCX files
pub struct DocxReader<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl<R: Read + Seek> DocxReader<R> {
    /// Create a new DOCX reader from a source that implements Read + Seek
    pub fn new(reader: R) -> DocxResult<Self> {
        let archive = ZipArchive::new(reader)?;
        Ok(Self { archive })
    }

    /// Read a file from the archive as a string
    pub fn read_file_as_string(&mut self, path: &str) -> DocxResult<String> {
        let mut file = self.archive.by_name(path).map_err(|e| {
            if matches!(e, zip::result::ZipError::FileNotFound) {
                DocxError::MissingPart(path.to_string())
            } else {
                DocxError::from(e)
            }
        })?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Ok(contents)
    }

    /// Check if a file exists in the archive
    pub fn file_exists(&self, path: &str) -> bool {
        self.archive.file_names().any(|name| name == path)
    }

    /// Raw text of the main document, one line per paragraph
    pub fn extract_text(&mut self) -> DocxResult<String> {
        let xml = self.read_file_as_string(DOCUMENT_PART)?;
        document_text(&xml)
    }
}

/// Pull the text runs out of `word/document.xml`.
///
/// `w:t` contributes its text, `w:tab` a tab and `w:br`/`w:cr` a newline.
/// Paragraphs are joined with newlines.
pub fn document_text(xml: &str) -> DocxResult<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_paragraph = false;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => {
                    in_paragraph = true;
                    current.clear();
                }
                b"t" => in_text = true,
                b"tab" => current.push('\t'),
                b"br" | b"cr" => current.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"p" => paragraphs.push(String::new()),
                b"tab" => current.push('\t'),
                b"br" | b"cr" => current.push('\n'),
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"p" if in_paragraph => {
                    in_paragraph = false;
                    paragraphs.push(std::mem::take(&mut current));
                }
                b"t" => in_text = false,
                _ => {}
            },
            Event::Text(e) if in_text => {
                let text = e.unescape().map_err(|e| DocxError::XmlParse(e.to_string()))?;
                current.push_str(&text);
            }
            Event::CData(e) if in_text => {
                current.push_str(&String::from_utf8_lossy(&e));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#;

    #[test]
    fn test_paragraphs_become_lines() {
        let xml = format!(
            r#"<w:document {NS}><w:body>
                <w:p><w:r><w:t>Hello</w:t></w:r><w:r><w:t xml:space="preserve"> world</w:t></w:r></w:p>
                <w:p/>
                <w:p><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t></w:r></w:p>
            </w:body></w:document>"#
        );

        assert_eq!(document_text(&xml).unwrap(), "Hello world\n\na\tb\nc");
    }

    #[test]
    fn test_entities_are_unescaped() {
        let xml = format!(r#"<w:document {NS}><w:body><w:p><w:r><w:t>Fish &amp; chips</w:t></w:r></w:p></w:body></w:document>"#);
        assert_eq!(document_text(&xml).unwrap(), "Fish & chips");
    }

    #[test]
    fn test_ignores_non_text_elements() {
        let xml = format!(
            r#"<w:document {NS}><w:body><w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t>Bold</w:t></w:r></w:p></w:body></w:document>"#
        );
        assert_eq!(document_text(&xml).unwrap(), "Bold");
    }
}
