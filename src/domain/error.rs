//! Domain-level errors (no I/O concerns)

use thiserror::Error;

use crate::domain::component::ComponentType;

/// Decode errors describe why a JSON payload is not a valid component tree.
///
/// `path` is a JSON pointer to the offending node, empty for the root.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("missing discriminator 'type' at {}", display_path(.path))]
    MissingDiscriminator { path: String },

    #[error("unknown component type {value:?} at {}", display_path(.path))]
    UnknownType { value: String, path: String },

    #[error("invalid {tag} payload: field '{field}' missing or mistyped at {}", display_path(.path))]
    InvalidPayload {
        tag: ComponentType,
        field: &'static str,
        path: String,
    },

    #[error("component tree nested deeper than {limit} at {}", display_path(.path))]
    TooDeep { limit: usize, path: String },

    #[error("malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl DecodeError {
    /// JSON pointer of the node that failed, if the failure is node-specific.
    pub fn path(&self) -> Option<&str> {
        match self {
            DecodeError::MissingDiscriminator { path }
            | DecodeError::UnknownType { path, .. }
            | DecodeError::InvalidPayload { path, .. }
            | DecodeError::TooDeep { path, .. } => Some(path),
            DecodeError::Malformed(_) => None,
        }
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "<root>"
    } else {
        path
    }
}
