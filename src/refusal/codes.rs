use crate::error::ReaderError;
use serde::Serialize;

/// Refusal and per-file failure codes emitted by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RefusalCode {
    /// Empty input path.
    #[serde(rename = "E_INVALID_ARGUMENT")]
    InvalidArgument,
    /// Input path is not an existing file.
    #[serde(rename = "E_NOT_FOUND")]
    NotFound,
    /// The HTML backend failed to read or decode the file.
    #[serde(rename = "E_LOAD_FAILED")]
    LoadFailed,
    /// No input files were given.
    #[serde(rename = "E_NO_INPUT")]
    NoInput,
}

impl RefusalCode {
    pub fn as_str(self) -> &'static str {
        match self {
            RefusalCode::InvalidArgument => "E_INVALID_ARGUMENT",
            RefusalCode::NotFound => "E_NOT_FOUND",
            RefusalCode::LoadFailed => "E_LOAD_FAILED",
            RefusalCode::NoInput => "E_NO_INPUT",
        }
    }
}

impl From<&ReaderError> for RefusalCode {
    fn from(error: &ReaderError) -> Self {
        match error {
            ReaderError::InvalidArgument => RefusalCode::InvalidArgument,
            ReaderError::NotFound { .. } => RefusalCode::NotFound,
        }
    }
}
