pub mod html;

pub use html::HtmlReader;

use crate::error::ReaderError;
use std::path::{Path, PathBuf};

/// Check a reader's input path eagerly: it must be given, non-empty, and an existing file.
pub fn validate_input_file(input_file: Option<&Path>) -> Result<PathBuf, ReaderError> {
    let input_file = match input_file {
        Some(path) if !path.as_os_str().is_empty() => path,
        _ => return Err(ReaderError::InvalidArgument),
    };

    if !input_file.is_file() {
        return Err(ReaderError::NotFound {
            path: input_file.to_path_buf(),
        });
    }

    Ok(input_file.to_path_buf())
}
