use std::path::PathBuf;

use thiserror::Error;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Corrupt user document: {0}")]
    CorruptDocument(String),

    #[error("User with Id {0} already exists")]
    DuplicateId(u16),

    #[error("Input stream closed")]
    InputClosed,
}

impl AppError {
    /// Whether the error comes from user data rather than the environment
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::FileNotFound(_)
                | AppError::CorruptDocument(_)
                | AppError::Json(_)
                | AppError::DuplicateId(_)
        )
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;
