//! Persistence and document conversion
//!
//! Settings, key-value storage for small state such as the search-term
//! history, and import/export of plain text as TXT, CSV, DOCX and PDF.

mod csv_io;
pub mod docx;
mod error;
mod file_io;
mod format;
mod kv;
pub mod pdf;
mod search_history;
mod settings;

pub use csv_io::*;
pub use docx::DocxError;
pub use error::*;
pub use file_io::*;
pub use format::*;
pub use kv::*;
pub use pdf::PdfError;
pub use search_history::*;
pub use settings::*;
