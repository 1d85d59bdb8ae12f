//! Error types for session operations

use search_engine::SearchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("Nothing to undo")]
    UndoStackEmpty,

    #[error("Nothing to redo")]
    RedoStackEmpty,
}

pub type Result<T> = std::result::Result<T, EditError>;
