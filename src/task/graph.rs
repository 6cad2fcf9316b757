// src/task/graph.rs

//! The explicit task graph built once at startup.
//!
//! There is no ambient task registry; the CLI dispatcher and the watch
//! controller both hold a reference to this graph and invoke tasks by name.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::ConfigFile;
use crate::errors::{PipelineError, Result};
use crate::serve::ReloadKind;
use crate::task::{
    concurrent, sequence, CleanTask, OutputSpec, PipelineTask, Task, TaskContext, TaskName,
};
use crate::transform::{Autoprefix, ScriptBundle, StyleCompile, Transform};
use crate::watch::{WatchAction, WatchBinding};

/// Name under which the full clean-then-emit composite is registered.
pub const BUILD_TASK: &str = "build";

pub struct TaskGraph {
    tasks: HashMap<TaskName, Arc<dyn Task>>,
    bindings: Vec<WatchBinding>,
}

impl std::fmt::Debug for TaskGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskGraph")
            .field("tasks", &self.task_names())
            .field("bindings", &self.bindings)
            .finish()
    }
}

impl TaskGraph {
    /// Build the standard graph from a validated config.
    ///
    /// Tasks mirror the conventional pipeline: a whole-output clean, the
    /// style and script pipelines, and the copy tasks for markup, images,
    /// fonts and loose static files. The emit tasks run concurrently and
    /// write disjoint output paths.
    pub fn from_config(cfg: &ConfigFile) -> Result<Self> {
        let paths = &cfg.paths;
        let settings = &cfg.settings;

        let style_base = parent_of(&paths.style_entry);
        let static_base = strip_glob_tail(&paths.static_files);
        let images_base = strip_glob_tail(&paths.images);
        let fonts_base = strip_glob_tail(&paths.fonts);

        let style_transforms: Vec<Arc<dyn Transform>> =
            vec![Arc::new(StyleCompile::new()), Arc::new(Autoprefix::new())];
        let script_transforms: Vec<Arc<dyn Transform>> =
            vec![Arc::new(ScriptBundle::new(&paths.script_entry))];

        let clean: Arc<dyn Task> =
            Arc::new(CleanTask::new("clean", "").enabled(settings.clean));
        let clean_markup: Arc<dyn Task> =
            Arc::new(CleanTask::new("clean-markup", "**/*.html").enabled(settings.clean));
        let clean_images: Arc<dyn Task> =
            Arc::new(CleanTask::new("clean-images", "assets/images").enabled(settings.clean));
        let clean_fonts: Arc<dyn Task> =
            Arc::new(CleanTask::new("clean-fonts", "assets/fonts").enabled(settings.clean));

        let style: Arc<dyn Task> = Arc::new(
            PipelineTask::new(
                "style",
                &paths.style_entry,
                style_base,
                style_transforms,
                OutputSpec::renamed(&paths.style_output),
            )
            .enabled(settings.styles),
        );

        let script: Arc<dyn Task> = Arc::new(
            PipelineTask::new(
                "script",
                &paths.scripts_watch,
                parent_of(&paths.script_entry),
                script_transforms,
                OutputSpec::renamed(&paths.script_output),
            )
            .enabled(settings.scripts),
        );

        let copy_markup: Arc<dyn Task> =
            Arc::new(PipelineTask::copy("copy-markup", &paths.markup, &paths.input, ""));
        let copy_images: Arc<dyn Task> = Arc::new(PipelineTask::copy(
            "copy-images",
            &paths.images,
            images_base,
            "assets/images",
        ));
        let copy_fonts: Arc<dyn Task> = Arc::new(PipelineTask::copy(
            "copy-fonts",
            &paths.fonts,
            fonts_base,
            "assets/fonts",
        ));
        let copy_static: Arc<dyn Task> = Arc::new(
            PipelineTask::copy("copy-static", &paths.static_files, static_base, "")
                .enabled(settings.copy),
        );

        // Watch reactions that first drop the stale output subtree, then
        // re-copy it.
        let refresh_markup = sequence(
            "refresh-markup",
            vec![Arc::clone(&clean_markup), Arc::clone(&copy_markup)],
        );
        let refresh_images = sequence(
            "refresh-images",
            vec![Arc::clone(&clean_images), Arc::clone(&copy_images)],
        );
        let refresh_fonts = sequence(
            "refresh-fonts",
            vec![Arc::clone(&clean_fonts), Arc::clone(&copy_fonts)],
        );

        let emit = concurrent(
            "emit",
            vec![
                Arc::clone(&copy_markup),
                Arc::clone(&style),
                Arc::clone(&script),
                Arc::clone(&copy_images),
                Arc::clone(&copy_fonts),
                Arc::clone(&copy_static),
            ],
        );
        let build = sequence(BUILD_TASK, vec![Arc::clone(&clean), emit]);

        let mut tasks: HashMap<TaskName, Arc<dyn Task>> = HashMap::new();
        for task in [
            clean,
            clean_markup,
            clean_images,
            clean_fonts,
            style,
            script,
            copy_markup,
            copy_images,
            copy_fonts,
            copy_static,
            refresh_markup,
            refresh_images,
            refresh_fonts,
            build,
        ] {
            tasks.insert(task.name().to_string(), task);
        }

        let bindings = Self::build_bindings(cfg)?;

        Ok(Self { tasks, bindings })
    }

    /// Pattern-to-action table for watch mode.
    ///
    /// A markup change deliberately matches two bindings: the
    /// clean-then-copy task and an independent reload notification. Both
    /// fire for the same change.
    fn build_bindings(cfg: &ConfigFile) -> Result<Vec<WatchBinding>> {
        let paths = &cfg.paths;
        let reload = cfg.settings.reload;

        let mut bindings = vec![
            WatchBinding::new(
                &paths.styles_watch,
                WatchAction::Run {
                    task: "style".to_string(),
                    reload: reload.then_some(ReloadKind::Css),
                },
            )?,
            WatchBinding::new(
                &paths.scripts_watch,
                WatchAction::Run {
                    task: "script".to_string(),
                    reload: reload.then_some(ReloadKind::Full),
                },
            )?,
            WatchBinding::new(
                &paths.markup,
                WatchAction::Run {
                    task: "refresh-markup".to_string(),
                    reload: None,
                },
            )?,
            WatchBinding::new(
                &paths.images,
                WatchAction::Run {
                    task: "refresh-images".to_string(),
                    reload: None,
                },
            )?,
            WatchBinding::new(
                &paths.fonts,
                WatchAction::Run {
                    task: "refresh-fonts".to_string(),
                    reload: None,
                },
            )?,
        ];

        if reload {
            bindings.push(WatchBinding::new(
                &paths.markup,
                WatchAction::Reload(ReloadKind::Full),
            )?);
        }

        Ok(bindings)
    }

    /// Assemble a graph from explicit parts. Used by tests to wire fake
    /// tasks behind real bindings.
    pub fn from_parts(tasks: Vec<Arc<dyn Task>>, bindings: Vec<WatchBinding>) -> Self {
        let tasks = tasks
            .into_iter()
            .map(|task| (task.name().to_string(), task))
            .collect();
        Self { tasks, bindings }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Task>> {
        self.tasks.get(name).cloned()
    }

    /// Run a task by name.
    pub async fn run(&self, name: &str, ctx: &TaskContext) -> Result<()> {
        let task = self
            .get(name)
            .ok_or_else(|| PipelineError::TaskNotFound(name.to_string()))?;
        task.run(ctx).await
    }

    /// The full clean-then-emit composite.
    pub fn full_build(&self) -> Result<Arc<dyn Task>> {
        self.get(BUILD_TASK)
            .ok_or_else(|| PipelineError::TaskNotFound(BUILD_TASK.to_string()))
    }

    pub fn watch_bindings(&self) -> &[WatchBinding] {
        &self.bindings
    }

    pub fn task_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tasks.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

/// Directory part of a file path, for use as a batch base.
fn parent_of(path: &str) -> PathBuf {
    Path::new(path)
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

/// Leading literal directory of a glob, e.g. `src/copy/**/*` -> `src/copy`.
fn strip_glob_tail(pattern: &str) -> PathBuf {
    let mut base = PathBuf::new();
    for part in Path::new(pattern).components() {
        let part = part.as_os_str().to_string_lossy();
        if part.contains(['*', '?', '[', '{']) {
            break;
        }
        base.push(part.as_ref());
    }
    base
}
