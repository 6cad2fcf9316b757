// src/assets/resolver.rs

//! File set resolution: glob patterns to concrete file lists.
//!
//! Patterns are compiled and the tree walked fresh on **every** call, never
//! cached across runs, so files added between runs are picked up.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::debug;

use crate::assets::{AssetBatch, AssetFile};
use crate::errors::{PipelineError, Result};
use crate::fs::FileSystem;

/// Resolves patterns (relative to a project root) against a filesystem.
#[derive(Clone)]
pub struct Resolver {
    fs: Arc<dyn FileSystem>,
    root: PathBuf,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl Resolver {
    pub fn new(fs: Arc<dyn FileSystem>, root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            root: root.into(),
        }
    }

    /// Resolve a pattern to the absolute paths of matching files, in
    /// deterministic (sorted) order.
    ///
    /// Zero matches produce an empty list, not an error: a task over an
    /// empty input set is a no-op.
    pub fn resolve(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let glob_set = compile(pattern)?;

        let mut files = Vec::new();
        let mut stack = vec![self.root.clone()];

        while let Some(dir) = stack.pop() {
            // A missing directory just means nothing matches there.
            let entries = match self.fs.read_dir(&dir) {
                Ok(entries) => entries,
                Err(_) => continue,
            };

            for path in entries {
                if self.fs.is_dir(&path) {
                    stack.push(path);
                } else if self.fs.is_file(&path) {
                    if let Ok(rel) = path.strip_prefix(&self.root) {
                        let rel_str = rel.to_string_lossy().replace('\\', "/");
                        if glob_set.is_match(&rel_str) {
                            files.push(path);
                        }
                    }
                }
            }
        }

        files.sort();
        debug!(pattern, matched = files.len(), "resolved file set");
        Ok(files)
    }

    /// Resolve a pattern and read the matched files into a batch.
    ///
    /// `base` (relative to the project root) is stripped from each match to
    /// form the batch-relative path, preserving any remaining directory
    /// structure.
    pub fn load(&self, pattern: &str, base: &Path) -> Result<AssetBatch> {
        let base_abs = self.root.join(base);
        let mut batch = Vec::new();

        for path in self.resolve(pattern)? {
            let contents = self.fs.read(&path)?;
            let rel = match path.strip_prefix(&base_abs) {
                Ok(rel) => rel.to_path_buf(),
                // Matches outside the base keep just their filename.
                Err(_) => PathBuf::from(path.file_name().unwrap_or_default()),
            };

            batch.push(AssetFile {
                rel,
                src: Some(path),
                contents,
            });
        }

        Ok(batch)
    }
}

fn compile(pattern: &str) -> Result<GlobSet> {
    let glob = Glob::new(pattern)
        .map_err(|e| PipelineError::Config(format!("invalid glob pattern '{pattern}': {e}")))?;

    let mut builder = GlobSetBuilder::new();
    builder.add(glob);
    builder
        .build()
        .map_err(|e| PipelineError::Config(format!("building glob set for '{pattern}': {e}")))
}
