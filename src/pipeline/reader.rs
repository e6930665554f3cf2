use crate::document::Document;
use crate::loaders::LoadMode;
use crate::readers::{BaseReader, HtmlReader};
use crate::refusal::RefusalCode;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A file the CLI could not turn into documents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub code: RefusalCode,
    pub message: String,
}

pub type FileOutcome = Result<Vec<Document>, FileFailure>;

/// Build a reader for one file and load it. Failures carry the refusal code they map to.
pub fn load_file(path: &Path, mode: LoadMode) -> FileOutcome {
    let reader = HtmlReader::with_mode(path, mode).map_err(|error| FileFailure {
        path: path.to_path_buf(),
        code: RefusalCode::from(&error),
        message: error.to_string(),
    })?;

    reader.load_data(None).map_err(|error| FileFailure {
        path: path.to_path_buf(),
        code: RefusalCode::LoadFailed,
        message: error.to_string(),
    })
}
