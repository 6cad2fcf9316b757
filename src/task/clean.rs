// src/task/clean.rs

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{debug, info};

use crate::assets::Resolver;
use crate::errors::Result;
use crate::task::{Task, TaskContext};

/// Deletes a path or glob under the output root.
///
/// Runs before the tasks it protects so no stale artifacts survive a build.
/// Deleting an absent target is a success, never an error.
pub struct CleanTask {
    name: String,
    /// Target relative to the output root. Empty removes the whole output
    /// root; a glob removes matching files; anything else removes the file
    /// or directory tree at that path.
    target: String,
    enabled: bool,
}

impl CleanTask {
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    fn is_glob(&self) -> bool {
        self.target.contains(['*', '?', '[', '{'])
    }
}

impl Task for CleanTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn run<'a>(
        &'a self,
        ctx: &'a TaskContext,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            if !self.enabled {
                debug!(task = %self.name, "task disabled; skipping");
                return Ok(());
            }

            if self.is_glob() {
                let resolver = Resolver::new(Arc::clone(&ctx.fs), ctx.out_root.clone());
                let matches = resolver.resolve(&self.target)?;
                for path in &matches {
                    ctx.fs.remove_file(path)?;
                }
                info!(task = %self.name, pattern = %self.target, removed = matches.len(), "cleaned matching files");
                return Ok(());
            }

            let target = if self.target.is_empty() {
                ctx.out_root.clone()
            } else {
                ctx.out_root.join(&self.target)
            };

            if ctx.fs.is_file(&target) {
                ctx.fs.remove_file(&target)?;
            } else {
                ctx.fs.remove_dir_all(&target)?;
            }

            info!(task = %self.name, path = ?target, "cleaned");
            Ok(())
        })
    }
}
