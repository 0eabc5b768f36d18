use std::path::PathBuf;

use thiserror::Error;

/// Conditions a catalog query reports back to its caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The requested category has no catalogued images.
    #[error("{0}")]
    NotFound(String),

    /// A filter parameter failed validation.
    #[error("{0}")]
    InvalidArgument(String),
}

impl CatalogError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Stable machine-readable kind for structured failures.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::InvalidArgument(_) => "invalid_argument",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(msg) | Self::InvalidArgument(msg) => msg,
        }
    }
}

/// Reasons the tag store could not be read. Never surfaced to callers;
/// see [`crate::tags::TagLoad`].
#[derive(Error, Debug)]
pub enum TagStoreError {
    #[error("failed to read tag store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("tag store {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("tag store {path} must hold a JSON object at the top level")]
    Shape { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, CatalogError>;
