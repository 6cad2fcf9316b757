// src/lib.rs

pub mod assets;
pub mod cli;
pub mod config;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod serve;
pub mod task;
pub mod transform;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info};

use crate::cli::{CliArgs, Command};
use crate::errors::{PipelineError, Result};
use crate::fs::RealFileSystem;
use crate::serve::ReloadHub;
use crate::task::{TaskContext, TaskGraph};
use crate::watch::{ChangeEvent, WatchController};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the explicit task graph
/// - the one-shot full build
/// - (default command) the dev server, file watcher, and reload channel
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = config::load_or_default(args.config.as_deref().map(Path::new))?;
    let graph = Arc::new(TaskGraph::from_config(&cfg)?);

    let root = std::env::current_dir().map_err(PipelineError::Io)?;
    let ctx = TaskContext {
        fs: Arc::new(RealFileSystem),
        root: root.clone(),
        out_root: root.join(&cfg.paths.output),
        mode: args.mode,
    };

    info!(mode = %ctx.mode, out = ?ctx.out_root, "starting full build");

    // Both commands start with a full clean build; a build failure here is
    // fatal and surfaces as a non-zero exit.
    graph.full_build()?.run(&ctx).await?;

    if matches!(args.command, Some(Command::Build)) {
        info!("build finished");
        return Ok(());
    }

    // Default command: stay resident. Open the reload channel, serve the
    // output root, and watch the input tree.
    let hub = ReloadHub::new();
    let port = args.port.unwrap_or(cfg.serve.port);

    {
        let hub = hub.clone();
        let out_root = ctx.out_root.clone();
        tokio::spawn(async move {
            if let Err(err) = serve::serve(out_root, port, hub).await {
                error!(error = %err, "dev server stopped");
            }
        });
    }

    let (tx, rx) = mpsc::unbounded_channel::<ChangeEvent>();
    let input_root = input_root(&root, &cfg.paths.input);
    let _watcher = watch::spawn_fs_watcher(input_root, tx)?;

    let controller = WatchController::new(Arc::clone(&graph), ctx, hub);

    info!("entering watch mode (Ctrl-C to exit)");

    // The watch session has no graceful transition back to idle; Ctrl-C
    // tears down the process, dropping the reload channel with it.
    tokio::select! {
        _ = controller.run_loop(rx) => {}
        ctrl_c = tokio::signal::ctrl_c() => {
            ctrl_c.map_err(PipelineError::Io)?;
            info!("received Ctrl-C; closing reload channel and exiting");
        }
    }

    Ok(())
}

/// Absolute input root to register the filesystem observer on.
///
/// Watching only the input tree keeps output writes from feeding back into
/// the event channel.
fn input_root(project_root: &Path, input: &str) -> PathBuf {
    project_root.join(input)
}
