use std::path::PathBuf;
use thiserror::Error;

/// Failure building a [`Document`](crate::document::Document) from loose field values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("invalid document field `{field}`: {message}")]
    Validation { field: String, message: String },
}

impl DocumentError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DocumentError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Construction-time failure of a file reader. Raised before any file I/O.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReaderError {
    /// Path argument missing or empty.
    #[error("you must provide an `input_file` path")]
    InvalidArgument,
    /// Path does not reference an existing regular file.
    #[error("file `{}` does not exist", .path.display())]
    NotFound { path: PathBuf },
}

/// Errors raised by the HTML loading backend. `load_data` passes them through as-is.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read html file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("html file '{}' is not valid UTF-8: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },
}
