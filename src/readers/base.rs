use crate::document::{Document, Metadata};

/// A component that loads one source and produces internal documents.
pub trait BaseReader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load every document from the source, in source order.
    ///
    /// `extra_info` is reserved; readers accept it but do not merge it into metadata.
    fn load_data(&self, extra_info: Option<&Metadata>) -> Result<Vec<Document>, Self::Error>;
}
