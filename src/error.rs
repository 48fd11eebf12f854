//! Error type shared by the reconstruction pipeline, its backends and the CLI.

use thiserror::Error;

/// Errors surfaced to callers of the reconstruction pipeline.
///
/// Only terminal conditions live here. Recoverable situations (short staffs
/// padded to six strings, the OCR anchor fallback, unrecognised tokens) are
/// handled inside the stages and only show up in logs and the trace.
#[derive(Error, Debug)]
pub enum TabError {
    /// Pixel data could not be decoded.
    #[error("failed to load image {path}")]
    ImageLoad {
        path: String,
        #[source]
        source: image::ImageError,
    },

    /// Neither line segmentation nor the tuning-label fallback produced a system.
    #[error("could not detect tab structure (lines or tuning keys)")]
    StructuralDetection,

    /// A line or OCR backend call failed.
    #[error("{backend} backend failed: {message}")]
    Backend {
        backend: &'static str,
        message: String,
    },

    /// Invalid configuration values.
    #[error("configuration: {message}")]
    Config { message: String },

    #[error("io")]
    Io(#[from] std::io::Error),

    #[error("json")]
    Json(#[from] serde_json::Error),
}

impl TabError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn backend(backend: &'static str, message: impl Into<String>) -> Self {
        Self::Backend {
            backend,
            message: message.into(),
        }
    }
}
