// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A content transform rejected a file. Non-fatal by policy: the owning
    /// task logs it and omits the file's output from the batch.
    #[error("transform '{transform}' failed on {file:?}: {message}")]
    Transform {
        transform: String,
        file: PathBuf,
        message: String,
    },

    /// A member of a `sequence` / `concurrent` group failed.
    #[error("composed group '{group}' failed; failing members: {failed:?}")]
    Composition { group: String, failed: Vec<String> },

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, PipelineError>;
