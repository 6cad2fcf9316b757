use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use sitepipe::assets::{AssetBatch, AssetFile};
use sitepipe::config::Mode;
use sitepipe::errors::Result;
use sitepipe::transform::Transform;

/// Record of a single `apply` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedBatch {
    pub files: usize,
    pub mode: Mode,
}

/// A fake transform that:
/// - records each applied batch (file count and mode)
/// - emits a single fixed output file, tagged with the mode so tests can
///   assert the mode was threaded through.
pub struct FakeTransform {
    name: String,
    output_rel: String,
    applied: Arc<Mutex<Vec<AppliedBatch>>>,
}

impl FakeTransform {
    pub fn new(
        name: impl Into<String>,
        output_rel: impl Into<String>,
        applied: Arc<Mutex<Vec<AppliedBatch>>>,
    ) -> Self {
        Self {
            name: name.into(),
            output_rel: output_rel.into(),
            applied,
        }
    }
}

impl Transform for FakeTransform {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(
        &self,
        batch: AssetBatch,
        mode: Mode,
    ) -> Pin<Box<dyn Future<Output = Result<AssetBatch>> + Send + '_>> {
        Box::pin(async move {
            {
                let mut guard = self.applied.lock().unwrap();
                guard.push(AppliedBatch {
                    files: batch.len(),
                    mode,
                });
            }

            let contents = format!("{} output ({mode})", self.name);
            Ok(vec![AssetFile::new(self.output_rel.clone(), contents)])
        })
    }
}

/// A transform that always fails, for exercising the skip-and-log policy.
pub struct FailingTransform;

impl Transform for FailingTransform {
    fn name(&self) -> &str {
        "failing-transform"
    }

    fn apply(
        &self,
        _batch: AssetBatch,
        _mode: Mode,
    ) -> Pin<Box<dyn Future<Output = Result<AssetBatch>> + Send + '_>> {
        Box::pin(async move { Err(anyhow!("simulated transform failure").into()) })
    }
}
