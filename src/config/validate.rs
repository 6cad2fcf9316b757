// src/config/validate.rs

use std::path::Path;

use globset::Glob;

use crate::config::model::{ConfigFile, Paths, RawConfigFile};
use crate::errors::{PipelineError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = PipelineError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.settings, raw.paths, raw.serve))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_roots(&cfg.paths)?;
    validate_patterns(&cfg.paths)?;
    validate_output_names(&cfg.paths)?;
    Ok(())
}

/// Input and output roots must be distinct and must not nest. Concurrent
/// emit tasks write under the output root while reading from the input root;
/// overlap would race reads against writes within one run.
fn validate_roots(paths: &Paths) -> Result<()> {
    if paths.input.trim().is_empty() || paths.output.trim().is_empty() {
        return Err(PipelineError::Config(
            "[paths].input and [paths].output must be non-empty".to_string(),
        ));
    }

    let input = Path::new(&paths.input);
    let output = Path::new(&paths.output);

    if input == output {
        return Err(PipelineError::Config(format!(
            "[paths].input and [paths].output must differ (both are '{}')",
            paths.input
        )));
    }

    if output.starts_with(input) {
        return Err(PipelineError::Config(format!(
            "[paths].output '{}' must not live inside [paths].input '{}'",
            paths.output, paths.input
        )));
    }

    if input.starts_with(output) {
        return Err(PipelineError::Config(format!(
            "[paths].input '{}' must not live inside [paths].output '{}'",
            paths.input, paths.output
        )));
    }

    Ok(())
}

fn validate_patterns(paths: &Paths) -> Result<()> {
    let patterns = [
        ("styles_watch", &paths.styles_watch),
        ("scripts_watch", &paths.scripts_watch),
        ("markup", &paths.markup),
        ("images", &paths.images),
        ("fonts", &paths.fonts),
        ("static_files", &paths.static_files),
        ("style_entry", &paths.style_entry),
        ("script_entry", &paths.script_entry),
    ];

    for (field, pattern) in patterns {
        if pattern.trim().is_empty() {
            return Err(PipelineError::Config(format!(
                "[paths].{field} must be non-empty"
            )));
        }
        Glob::new(pattern).map_err(|e| {
            PipelineError::Config(format!("[paths].{field} has an invalid glob '{pattern}': {e}"))
        })?;
    }

    Ok(())
}

/// Canonical output names are plain filenames written at the output root.
fn validate_output_names(paths: &Paths) -> Result<()> {
    for (field, name) in [
        ("style_output", &paths.style_output),
        ("script_output", &paths.script_output),
    ] {
        if name.trim().is_empty() || name.contains('/') || name.contains('\\') {
            return Err(PipelineError::Config(format!(
                "[paths].{field} must be a plain filename (got '{name}')"
            )));
        }
    }

    if paths.style_output == paths.script_output {
        return Err(PipelineError::Config(format!(
            "[paths].style_output and [paths].script_output must differ \
             (both are '{}'); the style and script tasks run concurrently \
             and must never share an output path",
            paths.style_output
        )));
    }

    Ok(())
}
