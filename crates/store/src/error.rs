//! Error types for storage operations

use crate::docx::DocxError;
use crate::pdf::PdfError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Error processing DOCX: {0}")]
    Docx(#[from] DocxError),

    #[error("Error processing PDF: {0}")]
    Pdf(#[from] PdfError),

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("No text to export!")]
    EmptyDocument,

    #[error("Background task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
