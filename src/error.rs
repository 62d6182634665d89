/// Error types for document, query and property operations
use thiserror::Error;

use crate::artifacts::ArtifactKind;

/// Errors raised while mutating or persisting a diagram document
#[derive(Debug, Error)]
pub enum DocumentError {
    /// No record of the given kind carries this id
    #[error("{kind} not found: {id}")]
    NotFound { kind: ArtifactKind, id: String },

    /// An artifact was dropped onto something it cannot live inside
    #[error("{child} cannot be dropped onto {target}")]
    InvalidDropTarget { child: ArtifactKind, target: String },

    /// Reading or writing the document file failed
    #[error("Document I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document file is not valid JSON for the schema
    #[error("Document JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur while querying the backend for resources
#[derive(Debug, Error)]
pub enum QueryError {
    /// Transport-level failure
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status
    #[error("Backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not the expected JSON list
    #[error("Invalid response body: {0}")]
    Decode(String),
}

/// Errors raised by property sheet edits
#[derive(Debug, Error)]
pub enum PropertyError {
    #[error("Unknown property field: {0}")]
    UnknownField(String),

    #[error("Field {field} expects {expected}")]
    InvalidValue { field: String, expected: &'static str },

    #[error(transparent)]
    Document(#[from] DocumentError),
}
