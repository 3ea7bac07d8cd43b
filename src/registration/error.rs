//! Registration error types
//!
//! Field validation failures are not errors; they come back as
//! `FieldError` values. These are the widget-level rejections.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistrationError {
    /// Upload rejected by the extension allow-list
    #[error("Unsupported picture '{file_name}', allowed types: {allowed}")]
    UnsupportedPicture { file_name: String, allowed: String },

    /// Date input could not be parsed
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Reading the uploaded file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for registration operations
pub type RegistrationResult<T> = Result<T, RegistrationError>;
