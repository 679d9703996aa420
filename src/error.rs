// src/error.rs
use crate::render::RenderError;
use deckpress_layout::LayoutError;
use deckpress_traits::{OutputError, ResourceError};
use std::fmt;
use thiserror::Error;

/// A comprehensive error type for atlas and print-sheet runs.
///
/// Every variant aborts the run. Empty groups and runs without sheets are not
/// errors; they are reported through the run summaries.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("{context} (missing asset: '{path}')")]
    MissingAsset { path: String, context: String },

    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("Failed to decode image '{path}': {message}")]
    Decode { path: String, message: String },

    #[error("Failed to encode '{target}': {message}")]
    Encode { target: String, message: String },

    #[error("Write failed: {0}")]
    Write(#[from] OutputError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("{0}")]
    Other(String),
}

impl PipelineError {
    pub(crate) fn missing(path: impl Into<String>, context: impl Into<String>) -> Self {
        PipelineError::MissingAsset {
            path: path.into(),
            context: context.into(),
        }
    }

    /// An encoding failure for the file that would have been written at `target`.
    pub(crate) fn encode(target: impl Into<String>, err: impl fmt::Display) -> Self {
        PipelineError::Encode {
            target: target.into(),
            message: err.to_string(),
        }
    }
}
