// src/watch/binding.rs

use std::fmt;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::errors::{PipelineError, Result};
use crate::serve::ReloadKind;
use crate::task::TaskName;

/// What to do when a path covered by a binding changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchAction {
    /// Re-run a named task; optionally notify clients once it completes.
    Run {
        task: TaskName,
        reload: Option<ReloadKind>,
    },
    /// Notify connected clients without running anything.
    Reload(ReloadKind),
}

/// Association between a path pattern and the action to fire when any
/// matching path changes.
///
/// Bindings with overlapping patterns all fire independently for the same
/// change; there is no mutual exclusion between them.
#[derive(Clone)]
pub struct WatchBinding {
    pattern: String,
    glob: GlobSet,
    action: WatchAction,
}

impl fmt::Debug for WatchBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchBinding")
            .field("pattern", &self.pattern)
            .field("action", &self.action)
            .finish_non_exhaustive()
    }
}

impl WatchBinding {
    pub fn new(pattern: impl Into<String>, action: WatchAction) -> Result<Self> {
        let pattern = pattern.into();
        let glob = Glob::new(&pattern)
            .map_err(|e| PipelineError::Config(format!("invalid watch pattern '{pattern}': {e}")))?;

        let mut builder = GlobSetBuilder::new();
        builder.add(glob);
        let glob = builder
            .build()
            .map_err(|e| PipelineError::Config(format!("building watch pattern '{pattern}': {e}")))?;

        Ok(Self {
            pattern,
            glob,
            action,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn action(&self) -> &WatchAction {
        &self.action
    }

    /// True if this binding covers the given path (relative to the project
    /// root, forward slashes).
    pub fn matches(&self, rel_path: &str) -> bool {
        self.glob.is_match(rel_path)
    }
}
