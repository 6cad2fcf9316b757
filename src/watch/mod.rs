// src/watch/mod.rs

//! File watching and the rebuild/reload loop.
//!
//! This module turns filesystem changes into debounced task re-runs and
//! reload notifications:
//!
//! - [`binding`] associates path patterns with actions.
//! - [`debounce`] is the pure coalescing core.
//! - [`controller`] is the async loop consuming a change-event channel.
//! - [`watcher`] wires the cross-platform observer (`notify`) into that
//!   channel.

pub mod binding;
pub mod controller;
pub mod debounce;
pub mod path_utils;
pub mod watcher;

pub use binding::{WatchAction, WatchBinding};
pub use controller::{ChangeEvent, WatchController, DEBOUNCE_WINDOW};
pub use debounce::Debouncer;
pub use watcher::{spawn_fs_watcher, WatcherHandle};
