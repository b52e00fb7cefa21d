//! Error types for the entity model.

use crate::ElementKind;
use thiserror::Error;

/// Configuration errors surfaced by explicit validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("{kind} '{class}' declares no component")]
    MissingComponent { kind: ElementKind, class: String },

    #[error("{kind} '{class}' has an empty component at position {index}")]
    EmptyComponent {
        kind: ElementKind,
        class: String,
        index: usize,
    },

    #[error("{kind} '{class}' has an invalid uri key '{uri_key}'")]
    InvalidUriKey {
        kind: ElementKind,
        class: String,
        uri_key: String,
    },

    #[error("{kind} '{class}' has an empty name")]
    EmptyName { kind: ElementKind, class: String },
}
