#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use sitepipe::config::{ConfigFile, Mode, RawConfigFile};
use sitepipe::fs::mock::MockFileSystem;
use sitepipe::fs::FileSystem;
use sitepipe::task::TaskContext;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    raw: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawConfigFile::default(),
        }
    }

    pub fn input(mut self, dir: &str) -> Self {
        self.raw.paths.input = dir.to_string();
        self
    }

    pub fn output(mut self, dir: &str) -> Self {
        self.raw.paths.output = dir.to_string();
        self
    }

    pub fn styles_enabled(mut self, val: bool) -> Self {
        self.raw.settings.styles = val;
        self
    }

    pub fn scripts_enabled(mut self, val: bool) -> Self {
        self.raw.settings.scripts = val;
        self
    }

    pub fn copy_enabled(mut self, val: bool) -> Self {
        self.raw.settings.copy = val;
        self
    }

    pub fn clean_enabled(mut self, val: bool) -> Self {
        self.raw.settings.clean = val;
        self
    }

    pub fn reload_enabled(mut self, val: bool) -> Self {
        self.raw.settings.reload = val;
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.raw).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A mock-backed `TaskContext` rooted at `/proj`, plus the mock itself for
/// seeding inputs and asserting outputs.
pub fn mock_context(mode: Mode) -> (TaskContext, MockFileSystem) {
    let mock = MockFileSystem::new();
    let fs: Arc<dyn FileSystem> = Arc::new(mock.clone());
    let ctx = TaskContext {
        fs,
        root: PathBuf::from("/proj"),
        out_root: PathBuf::from("/proj/dist"),
        mode,
    };
    (ctx, mock)
}
