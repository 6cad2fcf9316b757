// src/watch/controller.rs

//! The resident watch loop.
//!
//! Once started there are two states: the loop is either waiting for the
//! next filesystem change or draining debounced firings. It never returns
//! to idle; the only exit is the event channel closing (process shutdown).

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::task::{TaskContext, TaskGraph};
use crate::serve::ReloadHub;
use crate::watch::binding::{WatchAction, WatchBinding};
use crate::watch::debounce::Debouncer;
use crate::watch::path_utils::relative_str;

/// Default quiet window before a binding fires. Editors that write a file
/// several times per save land well inside this.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(50);

/// A single filesystem change observed under the project root.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub path: PathBuf,
}

/// Matches change events against the graph's watch bindings and fires the
/// bound actions after debouncing.
///
/// Holds the graph by reference only; it never owns task lifecycles. Task
/// failures during a watch session are logged and the session stays alive.
pub struct WatchController {
    graph: Arc<TaskGraph>,
    ctx: TaskContext,
    hub: ReloadHub,
    window: Duration,
}

impl WatchController {
    pub fn new(graph: Arc<TaskGraph>, ctx: TaskContext, hub: ReloadHub) -> Self {
        Self {
            graph,
            ctx,
            hub,
            window: DEBOUNCE_WINDOW,
        }
    }

    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Consume change events until the channel closes.
    ///
    /// Every binding whose pattern covers a changed path is armed
    /// independently; a single change may both re-run a task and push a
    /// reload notification.
    pub async fn run_loop(&self, mut rx: mpsc::UnboundedReceiver<ChangeEvent>) {
        let bindings = self.graph.watch_bindings();
        let mut debouncer = Debouncer::new(self.window);

        info!(
            bindings = bindings.len(),
            window_ms = self.window.as_millis() as u64,
            "watch loop started"
        );

        loop {
            let deadline = debouncer.next_deadline();

            tokio::select! {
                event = rx.recv() => {
                    match event {
                        Some(event) => self.note_change(bindings, &mut debouncer, &event),
                        None => {
                            debug!("change event channel closed; leaving watch loop");
                            break;
                        }
                    }
                }
                _ = wait_until(deadline) => {
                    for index in debouncer.take_due(Instant::now()) {
                        self.fire(&bindings[index]).await;
                    }
                }
            }
        }
    }

    fn note_change(
        &self,
        bindings: &[WatchBinding],
        debouncer: &mut Debouncer,
        event: &ChangeEvent,
    ) {
        let Some(rel) = relative_str(&self.ctx.root, &event.path) else {
            debug!(path = ?event.path, "change outside project root; ignoring");
            return;
        };

        let now = Instant::now();
        for (index, binding) in bindings.iter().enumerate() {
            if binding.matches(&rel) {
                debug!(path = %rel, pattern = %binding.pattern(), "change matched binding");
                debouncer.record(index, now);
            }
        }
    }

    async fn fire(&self, binding: &WatchBinding) {
        match binding.action() {
            WatchAction::Run { task, reload } => {
                info!(task = %task, pattern = %binding.pattern(), "change detected; re-running task");
                match self.graph.run(task, &self.ctx).await {
                    Ok(()) => {
                        if let Some(kind) = reload {
                            self.hub.broadcast(*kind);
                        }
                    }
                    Err(err) => {
                        // Never fatal while watching; the session survives
                        // broken edits.
                        warn!(task = %task, error = %err, "task failed during watch; session continues");
                    }
                }
            }
            WatchAction::Reload(kind) => {
                debug!(pattern = %binding.pattern(), ?kind, "change detected; notifying clients");
                self.hub.broadcast(*kind);
            }
        }
    }
}

/// Sleep until `deadline`, or forever when nothing is pending.
async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
        None => std::future::pending().await,
    }
}
