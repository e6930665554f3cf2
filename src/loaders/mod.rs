pub mod html;

pub use html::HtmlLoader;

use crate::document::{ExternalDocument, Metadata};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Backend that turns a file into a sequence of external documents.
///
/// Readers depend only on this capability, so the concrete parser can be
/// swapped (or stubbed in tests) without touching the document model.
pub trait DocumentLoader {
    type Document: ExternalDocument;
    type Error: std::error::Error + Send + Sync + 'static;

    fn load(&self, path: &Path) -> Result<Vec<Self::Document>, Self::Error>;
}

/// Plain external document: page content plus metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadedDocument {
    pub page_content: String,
    #[serde(default)]
    pub metadata: Metadata,
}

impl LoadedDocument {
    pub fn new(page_content: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            page_content: page_content.into(),
            metadata,
        }
    }
}

impl ExternalDocument for LoadedDocument {
    fn page_content(&self) -> &str {
        &self.page_content
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

/// How a loader splits one file into documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    /// Whole file as a single document.
    #[default]
    Single,
    /// One document per text element (heading, paragraph, list item, cell).
    Elements,
}

impl fmt::Display for LoadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadMode::Single => f.write_str("single"),
            LoadMode::Elements => f.write_str("elements"),
        }
    }
}
