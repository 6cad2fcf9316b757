// src/task/pipeline.rs

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::assets::Resolver;
use crate::errors::Result;
use crate::task::{Task, TaskContext};
use crate::transform::{self, Transform};

/// Where a pipeline writes its results.
#[derive(Debug, Clone, Default)]
pub struct OutputSpec {
    /// Directory under the output root; empty means the output root itself.
    pub dir: PathBuf,
    /// Rename the pipeline's single result to a fixed canonical filename,
    /// regardless of the entry file's name.
    pub rename: Option<String>,
}

impl OutputSpec {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            rename: None,
        }
    }

    pub fn renamed(name: impl Into<String>) -> Self {
        Self {
            dir: PathBuf::new(),
            rename: Some(name.into()),
        }
    }
}

/// Resolve an input pattern, apply zero or more transforms in declared
/// order, and write the results under the output root.
///
/// With no transforms this is a pure copy preserving relative structure.
/// Existing files at the same relative path are replaced, not merged.
pub struct PipelineTask {
    name: String,
    /// Resolved fresh on every run.
    input: String,
    /// Base (relative to the project root) stripped from matches to form
    /// output-relative paths.
    base: PathBuf,
    transforms: Vec<Arc<dyn Transform>>,
    output: OutputSpec,
    /// Feature toggle; a disabled task succeeds without side effects.
    enabled: bool,
}

impl PipelineTask {
    pub fn new(
        name: impl Into<String>,
        input: impl Into<String>,
        base: impl Into<PathBuf>,
        transforms: Vec<Arc<dyn Transform>>,
        output: OutputSpec,
    ) -> Self {
        Self {
            name: name.into(),
            input: input.into(),
            base: base.into(),
            transforms,
            output,
            enabled: true,
        }
    }

    /// Pure copy task: no transforms, no rename.
    pub fn copy(
        name: impl Into<String>,
        input: impl Into<String>,
        base: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self::new(
            name,
            input,
            base,
            Vec::new(),
            OutputSpec::in_dir(output_dir),
        )
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl Task for PipelineTask {
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

            let resolver = Resolver::new(Arc::clone(&ctx.fs), ctx.root.clone());
            let batch = resolver.load(&self.input, &self.base)?;

            if batch.is_empty() {
                debug!(task = %self.name, pattern = %self.input, "no inputs matched; nothing to do");
                return Ok(());
            }

            let inputs = batch.len();
            let out = transform::apply_all(&self.transforms, batch, ctx.mode).await;

            for (index, file) in out.iter().enumerate() {
                let rel = match (&self.output.rename, index) {
                    (Some(name), 0) => PathBuf::from(name),
                    (Some(_), _) => {
                        // Rename only makes sense for single-result pipelines.
                        warn!(
                            task = %self.name,
                            file = ?file.rel,
                            "rename configured but pipeline produced multiple files; keeping original name"
                        );
                        file.rel.clone()
                    }
                    (None, _) => file.rel.clone(),
                };

                let dest = ctx.out_root.join(&self.output.dir).join(rel);
                ctx.fs.write(&dest, &file.contents)?;
            }

            info!(
                task = %self.name,
                inputs,
                outputs = out.len(),
                "task finished"
            );
            Ok(())
        })
    }
}
