// src/serve/reload.rs

//! The live-reload channel.

use tokio::sync::broadcast;
use tracing::debug;

/// What connected clients should do after a rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadKind {
    /// Reload the whole page.
    Full,
    /// Hot-swap stylesheets without a full reload.
    Css,
}

impl ReloadKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReloadKind::Full => "reload",
            ReloadKind::Css => "css",
        }
    }
}

/// Broadcast channel notifying zero-or-more connected browser clients.
///
/// The hub is the channel's single writer; clients only subscribe. With no
/// clients connected a broadcast is simply dropped.
#[derive(Debug, Clone)]
pub struct ReloadHub {
    tx: broadcast::Sender<ReloadKind>,
}

impl ReloadHub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ReloadKind> {
        self.tx.subscribe()
    }

    pub fn client_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn broadcast(&self, kind: ReloadKind) {
        // Err only means no client is currently connected.
        let delivered = self.tx.send(kind).unwrap_or(0);
        debug!(?kind, delivered, "reload broadcast");
    }
}

impl Default for ReloadHub {
    fn default() -> Self {
        Self::new()
    }
}
