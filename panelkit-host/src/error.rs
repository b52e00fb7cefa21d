//! Error types for the panel host.

use panelkit_model::{ElementKind, ModelError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("{kind} not found: {uri_key}")]
    NotFound { kind: ElementKind, uri_key: String },

    #[error("{kind} '{uri_key}' is not visible to the current request")]
    Forbidden { kind: ElementKind, uri_key: String },

    #[error("{kind} uri key already registered: {uri_key}")]
    DuplicateUriKey { kind: ElementKind, uri_key: String },

    #[error("policy denied: {0}")]
    PolicyDenied(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("validation failed: {0}")]
    Invalid(#[from] ModelError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PanelError {
    /// True for errors a host should map to "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True for errors a host should map to "forbidden".
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden { .. })
    }
}
