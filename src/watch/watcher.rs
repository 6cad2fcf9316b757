// src/watch/watcher.rs

use std::path::PathBuf;

use anyhow::Result;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::info;

use crate::watch::controller::ChangeEvent;

/// Handle for the filesystem observer.
///
/// Exists so the underlying `RecommendedWatcher` is kept alive for as long
/// as the watch session runs. Dropping this handle stops file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Observe `root` recursively and forward every changed path as a
/// [`ChangeEvent`] into the controller's channel.
///
/// Binding patterns do the filtering downstream; the watcher itself stays
/// dumb and forwards everything under the watched tree.
pub fn spawn_fs_watcher(
    root: impl Into<PathBuf>,
    tx: mpsc::UnboundedSender<ChangeEvent>,
) -> Result<WatcherHandle> {
    let root = root.into();
    let root = root.canonicalize().unwrap_or(root);

    // Closure called synchronously by notify whenever an event arrives.
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                for path in event.paths {
                    if tx.send(ChangeEvent { path }).is_err() {
                        // Controller gone; nothing left to notify.
                        return;
                    }
                }
            }
            Err(err) => {
                // tracing isn't reliable inside the notify callback thread.
                eprintln!("sitepipe: file watch error: {err}");
            }
        },
        Config::default(),
    )?;

    watcher.watch(&root, RecursiveMode::Recursive)?;

    info!(root = ?root, "file watcher started");

    Ok(WatcherHandle { _inner: watcher })
}
