// src/config/model.rs

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Deserialize;

/// Process-wide build mode, selected once at startup and passed explicitly
/// into every task and transform. Nothing reads it from ambient state.
///
/// - `development`: debug aids (inline source maps), no minification.
/// - `production`: size-optimised output (minified, comments stripped),
///   no source maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    pub fn is_development(self) -> bool {
        self == Mode::Development
    }

    pub fn is_production(self) -> bool {
        self == Mode::Production
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Development
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Development => write!(f, "development"),
            Mode::Production => write!(f, "production"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Mode::Development),
            "production" | "prod" => Ok(Mode::Production),
            other => Err(format!(
                "invalid mode: {other} (expected \"development\" or \"production\")"
            )),
        }
    }
}

/// Top-level configuration as read from `Sitepipe.toml`.
///
/// Every section is optional; the defaults reproduce the conventional
/// project layout:
///
/// ```toml
/// [settings]
/// reload = true
///
/// [paths]
/// input = "src"
/// output = "dist"
///
/// [serve]
/// port = 3000
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub settings: Settings,

    #[serde(default)]
    pub paths: Paths,

    #[serde(default)]
    pub serve: ServeSection,
}

/// Validated configuration. Construct via `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub settings: Settings,
    pub paths: Paths,
    pub serve: ServeSection,
}

impl ConfigFile {
    /// Internal constructor used by the validation layer once all checks
    /// have passed.
    pub(crate) fn new_unchecked(settings: Settings, paths: Paths, serve: ServeSection) -> Self {
        Self {
            settings,
            paths,
            serve,
        }
    }
}

/// `[settings]` section: feature toggles for each pipeline.
///
/// A disabled task completes successfully without touching the filesystem.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub clean: bool,
    pub styles: bool,
    pub scripts: bool,
    pub copy: bool,
    pub reload: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            clean: true,
            styles: true,
            scripts: true,
            copy: true,
            reload: true,
        }
    }
}

/// `[paths]` section: where inputs live and where outputs go.
///
/// All patterns are relative to the project root and are re-resolved on every
/// task run, so files added mid-session are picked up.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Paths {
    /// Input root directory.
    pub input: String,
    /// Output root directory.
    pub output: String,

    /// Entry stylesheet; the preprocessor resolves its own nested imports,
    /// so this is the style task's only direct input.
    pub style_entry: String,
    /// Patterns whose changes re-trigger the style task.
    pub styles_watch: String,
    /// Canonical output filename for the compiled stylesheet.
    pub style_output: String,

    /// Entry script handed to the bundler.
    pub script_entry: String,
    /// Patterns whose changes re-trigger the script task.
    pub scripts_watch: String,
    /// Canonical output filename for the bundled script.
    pub script_output: String,

    /// Reserved suffix for scripts meant to run before down-leveling.
    /// Declared for forward compatibility but not wired into the script
    /// pipeline; changing it has no effect on the build.
    pub polyfill_suffix: String,

    /// Loose markup files copied as-is, preserving relative structure.
    pub markup: String,
    /// Image assets copied under `assets/images/` in the output root.
    pub images: String,
    /// Font assets copied under `assets/fonts/` in the output root.
    pub fonts: String,
    /// Static files flattened onto the output root.
    pub static_files: String,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            input: "src".to_string(),
            output: "dist".to_string(),
            style_entry: "src/scss/main.scss".to_string(),
            styles_watch: "src/scss/**/*.{scss,sass}".to_string(),
            style_output: "app.css".to_string(),
            script_entry: "src/js/main.js".to_string(),
            scripts_watch: "src/**/*.js".to_string(),
            script_output: "app.js".to_string(),
            polyfill_suffix: ".polyfill.js".to_string(),
            markup: "src/**/*.html".to_string(),
            images: "src/assets/images/**/*.{jpg,jpeg,png,gif,svg}".to_string(),
            fonts: "src/assets/fonts/**/*.{svg,eot,ttf,woff,woff2}".to_string(),
            static_files: "src/copy/**/*".to_string(),
        }
    }
}

/// `[serve]` section: dev server settings for watch mode.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServeSection {
    pub port: u16,
}

impl Default for ServeSection {
    fn default() -> Self {
        Self { port: 3000 }
    }
}
