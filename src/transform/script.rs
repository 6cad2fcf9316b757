// src/transform/script.rs

//! Script adapter: syntax down-leveling plus module bundling via an external
//! `esbuild`-compatible CLI.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use anyhow::Context;
use tracing::warn;

use crate::assets::{AssetBatch, AssetFile};
use crate::config::Mode;
use crate::errors::Result;
use crate::transform::command::run_tool;
use crate::transform::Transform;

/// Down-levels and bundles the script tree into one combined output.
///
/// The bundler resolves inter-file module references from the entry's real
/// location on disk; the batch declares the input set (so an empty script
/// tree is a no-op) and locates the entry within it.
///
/// - development: inline source map.
/// - production: minified, comments stripped, no source map.
pub struct ScriptBundle {
    program: String,
    /// Entry path relative to the project root, e.g. `src/js/main.js`.
    entry: PathBuf,
    /// Syntax profile the output is down-leveled to.
    target: String,
}

impl ScriptBundle {
    pub fn new(entry: impl Into<PathBuf>) -> Self {
        Self {
            program: "esbuild".to_string(),
            entry: entry.into(),
            target: "es2015".to_string(),
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }
}

impl Transform for ScriptBundle {
    fn name(&self) -> &str {
        "script-bundle"
    }

    fn apply(
        &self,
        batch: AssetBatch,
        mode: Mode,
    ) -> Pin<Box<dyn Future<Output = Result<AssetBatch>> + Send + '_>> {
        Box::pin(async move {
            // The entry must be part of the resolved input set; a script tree
            // without it has nothing to bundle.
            let entry_abs = batch
                .iter()
                .filter_map(|f| f.src.as_deref())
                .find(|src| src.ends_with(&self.entry));

            let entry_abs = match entry_abs {
                Some(path) => path.to_path_buf(),
                None => {
                    warn!(
                        entry = ?self.entry,
                        "script entry not found in input set; skipping bundle"
                    );
                    return Ok(Vec::new());
                }
            };

            let scratch = tempfile::tempdir().context("creating scratch dir for bundle output")?;
            let out_path = scratch.path().join("bundle.js");

            let mut args = vec![
                entry_abs.to_string_lossy().into_owned(),
                "--bundle".to_string(),
                format!("--target={}", self.target),
                format!("--outfile={}", out_path.to_string_lossy()),
            ];
            match mode {
                Mode::Development => args.push("--sourcemap=inline".to_string()),
                Mode::Production => {
                    args.push("--minify".to_string());
                    args.push("--legal-comments=none".to_string());
                }
            }

            run_tool(&self.program, &args, None).await?;

            let contents = tokio::fs::read(&out_path)
                .await
                .context("reading bundled script")?;

            Ok(vec![AssetFile::new("bundle.js", contents)])
        })
    }
}
