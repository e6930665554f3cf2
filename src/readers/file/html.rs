use crate::document::{Document, Metadata};
use crate::error::ReaderError;
use crate::loaders::{DocumentLoader, HtmlLoader, LoadMode};
use crate::readers::BaseReader;
use crate::readers::file::validate_input_file;
use std::path::{Path, PathBuf};

/// Reads one HTML file into documents.
///
/// The path is validated when the reader is built, so a reader that exists
/// always points at a file that existed at construction time.
#[derive(Debug, Clone)]
pub struct HtmlReader<L = HtmlLoader> {
    input_file: PathBuf,
    loader: L,
}

impl HtmlReader<HtmlLoader> {
    /// Fails with `InvalidArgument` for a missing or empty path and `NotFound`
    /// when the path is not an existing file.
    pub fn new<P: AsRef<Path>>(input_file: Option<P>) -> Result<Self, ReaderError> {
        let input_file = validate_input_file(input_file.as_ref().map(|path| path.as_ref()))?;
        Ok(Self {
            input_file,
            loader: HtmlLoader::default(),
        })
    }

    pub fn open(input_file: impl AsRef<Path>) -> Result<Self, ReaderError> {
        Self::new(Some(input_file))
    }

    pub fn with_mode(input_file: impl AsRef<Path>, mode: LoadMode) -> Result<Self, ReaderError> {
        Self::with_loader(input_file, HtmlLoader::new(mode))
    }
}

impl<L: DocumentLoader> HtmlReader<L> {
    /// Build a reader over any loader backend.
    pub fn with_loader(input_file: impl AsRef<Path>, loader: L) -> Result<Self, ReaderError> {
        let input_file = validate_input_file(Some(input_file.as_ref()))?;
        Ok(Self { input_file, loader })
    }

    pub fn input_file(&self) -> &Path {
        &self.input_file
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }
}

impl<L: DocumentLoader> BaseReader for HtmlReader<L> {
    type Error = L::Error;

    fn load_data(&self, _extra_info: Option<&Metadata>) -> Result<Vec<Document>, L::Error> {
        let loaded = self.loader.load(&self.input_file)?;
        Ok(loaded
            .iter()
            .map(|external| Document::from_external(external))
            .collect())
    }
}
