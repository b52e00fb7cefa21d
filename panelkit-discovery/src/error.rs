//! Error types for manifest loading.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("manifest {path} declares class '{declared}' but its file name is '{expected}'")]
    ClassMismatch {
        path: PathBuf,
        declared: String,
        expected: String,
    },

    #[error("invalid manifest path: {0}")]
    InvalidPath(PathBuf),
}
