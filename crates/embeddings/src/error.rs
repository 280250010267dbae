//! Error types for the embeddings crate

use std::fmt;

/// Errors that can occur during embedding operations
#[derive(Debug)]
pub enum EmbeddingError {
    /// Backend initialization failed
    ModelLoadError(String),

    /// Inference failed
    InferenceError(String),

    /// Returned vector had the wrong dimension
    DimensionMismatch { expected: usize, got: usize },

    /// Configuration error
    ConfigError(String),

    /// IO error
    IoError(std::io::Error),

    /// Other error
    Other(String),
}

impl fmt::Display for EmbeddingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModelLoadError(msg) => write!(f, "Failed to load model: {msg}"),
            Self::InferenceError(msg) => write!(f, "Inference failed: {msg}"),
            Self::DimensionMismatch { expected, got } => {
                write!(f, "Dimension mismatch: expected {expected}, got {got}")
            }
            Self::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            Self::IoError(err) => write!(f, "IO error: {err}"),
            Self::Other(msg) => write!(f, "Embedding error: {msg}"),
        }
    }
}

impl std::error::Error for EmbeddingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EmbeddingError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err)
    }
}

impl From<EmbeddingError> for ragscore_core::error::Error {
    fn from(err: EmbeddingError) -> Self {
        ragscore_core::error::Error::ModelUnavailable(err.to_string())
    }
}
