//! Supported document formats

use crate::{Result, StoreError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Base name used when exporting without an explicit path
pub const EXPORT_BASE_NAME: &str = "search_replace_text";

/// Document formats that can be imported and exported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Txt,
    Csv,
    Docx,
    Pdf,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 4] = [
        DocumentFormat::Txt,
        DocumentFormat::Csv,
        DocumentFormat::Docx,
        DocumentFormat::Pdf,
    ];

    /// Resolve a format from a file extension, case-insensitively
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "txt" => Some(DocumentFormat::Txt),
            "csv" => Some(DocumentFormat::Csv),
            "docx" => Some(DocumentFormat::Docx),
            "pdf" => Some(DocumentFormat::Pdf),
            _ => None,
        }
    }

    /// Resolve a format from the extension of `path`
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_extension(ext).ok_or_else(|| {
            StoreError::UnsupportedFormat(if ext.is_empty() {
                path.display().to_string()
            } else {
                ext.to_string()
            })
        })
    }

    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Txt => "txt",
            DocumentFormat::Csv => "csv",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Pdf => "pdf",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            DocumentFormat::Txt => "text/plain",
            DocumentFormat::Csv => "text/csv",
            DocumentFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            DocumentFormat::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for DocumentFormat {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim_start_matches('.');
        Self::from_extension(s).ok_or_else(|| StoreError::UnsupportedFormat(s.to_string()))
    }
}

/// File name used for an export in `format` when none is given
pub fn default_export_name(format: DocumentFormat) -> String {
    format!("{}.{}", EXPORT_BASE_NAME, format.extension())
}
