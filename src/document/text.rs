use crate::document::{BaseDocument, ExternalDocument, Metadata};
use crate::error::DocumentError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Text document: an identifier, a flat metadata map and a text payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Document {
    doc_id: String,
    metadata: Metadata,
    text: String,
}

impl Document {
    /// Build a document with a freshly generated id. `None` metadata becomes an empty map.
    pub fn new(text: impl Into<String>, metadata: Option<Metadata>) -> Self {
        Self {
            doc_id: generate_doc_id(),
            metadata: metadata.unwrap_or_default(),
            text: text.into(),
        }
    }

    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::default()
    }

    pub fn class_name() -> &'static str {
        "Document"
    }

    pub fn doc_id(&self) -> &str {
        &self.doc_id
    }

    /// Validate loose field values (a JSON object) into a document.
    ///
    /// `doc_id` and `text` must be strings when present, `metadata` an object or
    /// `null`. Missing fields take their defaults; unknown fields are ignored.
    pub fn from_fields(fields: Value) -> Result<Self, DocumentError> {
        let mut fields = match fields {
            Value::Object(fields) => fields,
            other => {
                return Err(DocumentError::validation(
                    "document",
                    format!("expected an object, found {}", value_kind(&other)),
                ));
            }
        };

        let mut builder = DocumentBuilder::default();

        if let Some(doc_id) = fields.remove("doc_id") {
            match doc_id {
                Value::String(doc_id) => builder = builder.doc_id(doc_id),
                other => {
                    return Err(DocumentError::validation(
                        "doc_id",
                        format!("expected a string, found {}", value_kind(&other)),
                    ));
                }
            }
        }

        match fields.remove("metadata") {
            None | Some(Value::Null) => {}
            Some(Value::Object(metadata)) => builder = builder.metadata(Some(metadata)),
            Some(other) => {
                return Err(DocumentError::validation(
                    "metadata",
                    format!("expected an object, found {}", value_kind(&other)),
                ));
            }
        }

        if let Some(text) = fields.remove("text") {
            match text {
                Value::String(text) => builder = builder.text(text),
                other => {
                    return Err(DocumentError::validation(
                        "text",
                        format!("expected a string, found {}", value_kind(&other)),
                    ));
                }
            }
        }

        builder.build()
    }

    /// Convert an external document, copying its content and metadata under a fresh id.
    pub fn from_external<D: ExternalDocument + ?Sized>(doc: &D) -> Self {
        Self::new(doc.page_content(), Some(doc.metadata().clone()))
    }

    /// Same contract as [`Document::from_external`]; kept for LangChain-shaped callers.
    pub fn from_langchain_format<D: ExternalDocument + ?Sized>(doc: &D) -> Self {
        Self::from_external(doc)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(String::new(), None)
    }
}

impl BaseDocument for Document {
    fn get_content(&self) -> &str {
        &self.text
    }

    fn get_metadata(&self) -> &Metadata {
        &self.metadata
    }
}

impl TryFrom<Value> for Document {
    type Error = DocumentError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_fields(value)
    }
}

/// Optional-field constructor for [`Document`].
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    doc_id: Option<String>,
    metadata: Option<Metadata>,
    text: Option<String>,
}

impl DocumentBuilder {
    pub fn doc_id(mut self, doc_id: impl Into<String>) -> Self {
        self.doc_id = Some(doc_id.into());
        self
    }

    pub fn metadata(mut self, metadata: Option<Metadata>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Fails only when an explicit `doc_id` is empty.
    pub fn build(self) -> Result<Document, DocumentError> {
        let doc_id = match self.doc_id {
            Some(doc_id) if doc_id.is_empty() => {
                return Err(DocumentError::validation("doc_id", "must not be empty"));
            }
            Some(doc_id) => doc_id,
            None => generate_doc_id(),
        };

        Ok(Document {
            doc_id,
            metadata: self.metadata.unwrap_or_default(),
            text: self.text.unwrap_or_default(),
        })
    }
}

fn generate_doc_id() -> String {
    Uuid::new_v4().to_string()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
