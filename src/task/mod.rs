// src/task/mod.rs

//! Tasks and their composition.
//!
//! - [`pipeline`] is the general resolve → transform → write task.
//! - [`clean`] deletes output paths before a build.
//! - [`compose`] combines tasks sequentially or concurrently.
//! - [`graph`] builds the explicit task graph the CLI and watcher run
//!   against.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

pub mod clean;
pub mod compose;
pub mod graph;
pub mod pipeline;

pub use clean::CleanTask;
pub use compose::{concurrent, sequence};
pub use graph::TaskGraph;
pub use pipeline::{OutputSpec, PipelineTask};

use crate::config::Mode;
use crate::errors::Result;
use crate::fs::FileSystem;

/// Canonical task name type.
pub type TaskName = String;

/// Shared context threaded into every task run.
///
/// The mode is an explicit field here; tasks and transforms never read it
/// from ambient process state.
#[derive(Debug, Clone)]
pub struct TaskContext {
    pub fs: Arc<dyn FileSystem>,
    /// Project root against which input patterns are resolved.
    pub root: PathBuf,
    /// Output root that emit tasks write under and clean tasks delete under.
    pub out_root: PathBuf,
    pub mode: Mode,
}

/// A named, idempotent unit of build work.
///
/// Tasks are stateless between invocations; running one twice with unchanged
/// inputs yields identical output.
pub trait Task: Send + Sync {
    fn name(&self) -> &str;

    fn run<'a>(
        &'a self,
        ctx: &'a TaskContext,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}
