use crate::document::Metadata;

/// Capability set shared by every document variant.
pub trait BaseDocument {
    /// Get document content.
    fn get_content(&self) -> &str;

    /// Get document metadata.
    fn get_metadata(&self) -> &Metadata;
}

/// Document representation produced outside this crate, e.g. by a loader backend.
///
/// This is the whole interop contract: a content string and a flat metadata map.
pub trait ExternalDocument {
    fn page_content(&self) -> &str;

    fn metadata(&self) -> &Metadata;
}

impl<T: ExternalDocument + ?Sized> ExternalDocument for &T {
    fn page_content(&self) -> &str {
        (**self).page_content()
    }

    fn metadata(&self) -> &Metadata {
        (**self).metadata()
    }
}
