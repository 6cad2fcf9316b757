// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw
/// `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run validation.
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks root overlap, glob syntax, and output-name sanity.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Resolve configuration for a process start.
///
/// - An explicitly given path must exist and parse.
/// - Otherwise `Sitepipe.toml` in the working directory is used if present.
/// - With no file at all, the built-in defaults apply; a config file is
///   optional.
pub fn load_or_default(explicit: Option<&Path>) -> Result<ConfigFile> {
    if let Some(path) = explicit {
        return load_and_validate(path);
    }

    let default_path = default_config_path();
    if default_path.is_file() {
        debug!(path = ?default_path, "loading project config");
        return load_and_validate(&default_path);
    }

    debug!("no config file found; using built-in defaults");
    ConfigFile::try_from(RawConfigFile::default())
}

/// Default config path: `Sitepipe.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Sitepipe.toml")
}
