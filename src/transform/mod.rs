// src/transform/mod.rs

//! Transform adapters: uniform wrappers around external content tools.
//!
//! The pipeline never parses CSS or JavaScript itself. Each adapter hands a
//! batch of files to an external tool (stylesheet compiler, prefixer,
//! bundler) and collects the tool's output. The adapters only decide which
//! flags to pass for the current [`Mode`] and how failures are contained.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::warn;

pub mod command;
pub mod script;
pub mod style;

pub use command::run_tool;
pub use script::ScriptBundle;
pub use style::{Autoprefix, StyleCompile};

use crate::assets::AssetBatch;
use crate::config::Mode;
use crate::errors::Result;

/// External content transform applied to a batch of files.
///
/// `apply` consumes the batch and returns the transformed one. An adapter
/// must contain per-file failures itself (log, omit the file, keep going);
/// returning `Err` means the whole batch produced no usable output.
pub trait Transform: Send + Sync {
    fn name(&self) -> &str;

    fn apply(
        &self,
        batch: AssetBatch,
        mode: Mode,
    ) -> Pin<Box<dyn Future<Output = Result<AssetBatch>> + Send + '_>>;
}

/// Apply adapters in their declared order.
///
/// A failing adapter drops the batch's output and is logged; it never aborts
/// the owning task. A watch session must survive an author's syntax typo.
pub async fn apply_all(
    transforms: &[Arc<dyn Transform>],
    mut batch: AssetBatch,
    mode: Mode,
) -> AssetBatch {
    for transform in transforms {
        if batch.is_empty() {
            return batch;
        }

        match transform.apply(batch, mode).await {
            Ok(next) => batch = next,
            Err(err) => {
                warn!(
                    transform = transform.name(),
                    error = %err,
                    "transform failed; omitting batch output"
                );
                return Vec::new();
            }
        }
    }

    batch
}
