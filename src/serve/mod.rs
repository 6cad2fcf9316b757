// src/serve/mod.rs

//! Local dev server for watch mode.
//!
//! Serves the output root as static files and exposes the live-reload
//! channel at `/__sitepipe/reload`: a long-poll endpoint that responds with
//! `"reload"` or `"css"` the next time a rebuild finishes. Clients re-poll
//! after each response.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tokio::sync::broadcast::error::RecvError;
use tower_http::services::ServeDir;
use tracing::info;

pub mod reload;

pub use reload::{ReloadHub, ReloadKind};

use crate::errors::{PipelineError, Result};

/// Bind and serve until the process exits. There is no graceful shutdown
/// path other than process termination.
pub async fn serve(out_root: PathBuf, port: u16, hub: ReloadHub) -> Result<()> {
    let app = Router::new()
        .route("/__sitepipe/reload", get(reload_wait))
        .fallback_service(ServeDir::new(&out_root))
        .with_state(hub);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(PipelineError::Io)?;

    info!(%addr, root = ?out_root, "dev server listening");

    axum::serve(listener, app)
        .await
        .map_err(PipelineError::Io)?;

    Ok(())
}

/// Long-poll handler: park the client until the next reload broadcast.
async fn reload_wait(State(hub): State<ReloadHub>) -> impl IntoResponse {
    let mut rx = hub.subscribe();
    match rx.recv().await {
        Ok(kind) => (StatusCode::OK, kind.as_str()),
        // Missed intermediate broadcasts still mean "something changed".
        Err(RecvError::Lagged(_)) => (StatusCode::OK, ReloadKind::Full.as_str()),
        Err(RecvError::Closed) => (StatusCode::NO_CONTENT, ""),
    }
}
