pub mod base;
pub mod text;

pub use base::{BaseDocument, ExternalDocument};
pub use text::{Document, DocumentBuilder};

/// Flat metadata map attached to every document.
pub type Metadata = serde_json::Map<String, serde_json::Value>;
