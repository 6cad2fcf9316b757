// src/transform/style.rs

//! Stylesheet adapters: the preprocessor CLI and the prefixer CLI.

use std::future::Future;
use std::pin::Pin;

use anyhow::{anyhow, Context};
use tracing::warn;

use crate::assets::{AssetBatch, AssetFile};
use crate::config::Mode;
use crate::errors::Result;
use crate::transform::command::run_tool;
use crate::transform::Transform;

/// Compiles the entry stylesheet with an external `sass`-compatible CLI.
///
/// The compiler resolves its own nested `@use`/`@import` partials from the
/// entry's real location, so the batch only needs to carry the entry file.
///
/// - development: the source map is embedded in the emitted CSS.
/// - production: compressed output, no source map.
pub struct StyleCompile {
    program: String,
}

impl StyleCompile {
    pub fn new() -> Self {
        Self {
            program: "sass".to_string(),
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl Default for StyleCompile {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform for StyleCompile {
    fn name(&self) -> &str {
        "style-compile"
    }

    fn apply(
        &self,
        batch: AssetBatch,
        mode: Mode,
    ) -> Pin<Box<dyn Future<Output = Result<AssetBatch>> + Send + '_>> {
        Box::pin(async move {
            let entry = batch
                .first()
                .and_then(|f| f.src.clone())
                .ok_or_else(|| anyhow!("style entry has no on-disk source path"))?;

            let scratch = tempfile::tempdir().context("creating scratch dir for sass output")?;
            let out_path = scratch.path().join("out.css");

            let mut args: Vec<String> = match mode {
                Mode::Development => vec!["--embed-source-map".to_string()],
                Mode::Production => vec![
                    "--style=compressed".to_string(),
                    "--no-source-map".to_string(),
                ],
            };
            args.push(entry.to_string_lossy().into_owned());
            args.push(out_path.to_string_lossy().into_owned());

            run_tool(&self.program, &args, None).await?;

            let contents = tokio::fs::read(&out_path)
                .await
                .context("reading compiled stylesheet")?;

            let rel = entry
                .file_stem()
                .map(|stem| {
                    let mut name = stem.to_string_lossy().into_owned();
                    name.push_str(".css");
                    name
                })
                .unwrap_or_else(|| "out.css".to_string());

            Ok(vec![AssetFile::new(rel, contents)])
        })
    }
}

/// Runs each stylesheet through an external `postcss` autoprefixer,
/// file by file over stdin/stdout.
///
/// In development the compiler upstream embeds a source map in the CSS;
/// the prefixer is told to keep it inline. In production maps are off.
///
/// A file the prefixer rejects is logged and omitted from the batch; the
/// remaining files continue through the pipeline.
pub struct Autoprefix {
    program: String,
}

impl Autoprefix {
    pub fn new() -> Self {
        Self {
            program: "postcss".to_string(),
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl Default for Autoprefix {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform for Autoprefix {
    fn name(&self) -> &str {
        "autoprefix"
    }

    fn apply(
        &self,
        batch: AssetBatch,
        mode: Mode,
    ) -> Pin<Box<dyn Future<Output = Result<AssetBatch>> + Send + '_>> {
        Box::pin(async move {
            let map_flag = match mode {
                // Keep the map the compiler embedded upstream.
                Mode::Development => "--map".to_string(),
                Mode::Production => "--no-map".to_string(),
            };
            let args = vec!["--use".to_string(), "autoprefixer".to_string(), map_flag];

            let mut out = Vec::with_capacity(batch.len());

            for file in batch {
                match run_tool(&self.program, &args, Some(&file.contents)).await {
                    Ok(prefixed) => out.push(AssetFile::new(file.rel, prefixed)),
                    Err(err) => {
                        warn!(
                            file = ?file.rel,
                            error = %err,
                            "autoprefix failed; omitting file from batch"
                        );
                    }
                }
            }

            Ok(out)
        })
    }
}
