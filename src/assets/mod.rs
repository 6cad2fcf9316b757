// src/assets/mod.rs

//! In-memory file batches and the pattern resolver that produces them.

use std::path::PathBuf;

pub mod resolver;

pub use resolver::Resolver;

/// A file flowing through a task pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFile {
    /// Path relative to the pattern's base directory; this is where the file
    /// lands under the task's output location.
    pub rel: PathBuf,
    /// Absolute source path on disk, when the file came straight from the
    /// resolver. Transforms that shell out to tools which resolve their own
    /// imports (stylesheet compiler, bundler) operate on this path.
    /// `None` for files synthesised mid-pipeline.
    pub src: Option<PathBuf>,
    pub contents: Vec<u8>,
}

impl AssetFile {
    pub fn new(rel: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            rel: rel.into(),
            src: None,
            contents: contents.into(),
        }
    }
}

/// Ordered set of files handed between pipeline stages.
pub type AssetBatch = Vec<AssetFile>;
