//! Document import and export
//!
//! The format is chosen from the file extension. Async variants do the
//! file I/O with `tokio::fs` and decode on the blocking pool.

use crate::csv_io::{csv_to_text, text_to_csv};
use crate::docx::{docx_to_text, text_to_docx};
use crate::format::DocumentFormat;
use crate::pdf::{pdf_to_text, text_to_pdf};
use crate::{Result, StoreError};
use std::path::Path;

/// Decode file contents in `format` to plain text
pub fn decode_document(format: DocumentFormat, bytes: &[u8]) -> Result<String> {
    let text = match format {
        DocumentFormat::Txt => String::from_utf8_lossy(bytes).into_owned(),
        DocumentFormat::Csv => csv_to_text(bytes)?,
        DocumentFormat::Docx => docx_to_text(bytes)?,
        DocumentFormat::Pdf => pdf_to_text(bytes)?,
    };
    Ok(text)
}

/// Encode plain text as file contents in `format`
pub fn encode_document(format: DocumentFormat, text: &str) -> Result<Vec<u8>> {
    if text.is_empty() {
        return Err(StoreError::EmptyDocument);
    }
    let bytes = match format {
        DocumentFormat::Txt => text.as_bytes().to_vec(),
        DocumentFormat::Csv => text_to_csv(text)?,
        DocumentFormat::Docx => text_to_docx(text)?,
        DocumentFormat::Pdf => text_to_pdf(text)?,
    };
    Ok(bytes)
}

/// Import a document as plain text
pub async fn import_document(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path)?;

    if !tokio::fs::try_exists(path).await? {
        return Err(StoreError::FileNotFound(path.display().to_string()));
    }

    let bytes = tokio::fs::read(path).await?;
    let text = tokio::task::spawn_blocking(move || decode_document(format, &bytes))
        .await
        .map_err(|e| StoreError::Task(e.to_string()))??;

    tracing::info!("Imported {} ({}, {} chars)", path.display(), format, text.len());
    Ok(text)
}

/// Export plain text to `path` in the format its extension names
pub async fn export_document(text: &str, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path)?;

    let owned = text.to_string();
    let bytes = tokio::task::spawn_blocking(move || encode_document(format, &owned))
        .await
        .map_err(|e| StoreError::Task(e.to_string()))??;

    tokio::fs::write(path, &bytes).await?;
    tracing::info!("Exported {} ({}, {} bytes)", path.display(), format, bytes.len());
    Ok(())
}

/// Import a document synchronously
pub fn import_document_sync(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path)?;

    if !path.exists() {
        return Err(StoreError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    decode_document(format, &bytes)
}

/// Export a document synchronously
pub fn export_document_sync(text: &str, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path)?;
    let bytes = encode_document(format, text)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = "The quick brown fox\njumps over the lazy dog";

    #[test]
    fn test_sync_round_trip_every_format() {
        let temp_dir = TempDir::new().unwrap();
        for format in DocumentFormat::ALL {
            let path = temp_dir.path().join(format!("doc.{}", format.extension()));
            export_document_sync(SAMPLE, &path).unwrap();
            assert_eq!(import_document_sync(&path).unwrap(), SAMPLE, "{}", format);
        }
    }

    #[test]
    fn test_empty_text_not_exported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.txt");

        let err = export_document_sync("", &path).unwrap_err();
        assert!(matches!(err, StoreError::EmptyDocument));
        assert_eq!(err.to_string(), "No text to export!");
        assert!(!path.exists());
    }

    #[test]
    fn test_unsupported_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.odt");
        std::fs::write(&path, "x").unwrap();

        assert!(matches!(
            import_document_sync(&path),
            Err(StoreError::UnsupportedFormat(ext)) if ext == "odt"
        ));
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        assert!(matches!(
            import_document_sync(temp_dir.path().join("absent.txt")),
            Err(StoreError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_corrupt_docx_reports_docx_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.docx");
        std::fs::write(&path, "not a zip").unwrap();

        let err = import_document_sync(&path).unwrap_err();
        assert!(err.to_string().starts_with("Error processing DOCX:"));
    }

    #[test]
    fn test_csv_import_joins_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("table.csv");
        std::fs::write(&path, "name,age\nalice,30\n").unwrap();

        assert_eq!(import_document_sync(&path).unwrap(), "name age\nalice 30");
    }

    #[tokio::test]
    async fn test_async_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.docx");

        export_document(SAMPLE, &path).await.unwrap();
        assert_eq!(import_document(&path).await.unwrap(), SAMPLE);
    }

    #[tokio::test]
    async fn test_async_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = import_document(temp_dir.path().join("none.pdf")).await;
        assert!(matches!(result, Err(StoreError::FileNotFound(_))));
    }
}
