// src/config/mod.rs

//! Configuration: build mode, feature toggles, and the project path layout.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, load_or_default};
pub use model::{ConfigFile, Mode, Paths, RawConfigFile, ServeSection, Settings};
