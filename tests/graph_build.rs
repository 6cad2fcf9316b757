// tests/graph_build.rs

use std::error::Error;
use std::path::Path;

use sitepipe::config::Mode;
use sitepipe::errors::PipelineError;
use sitepipe::fs::FileSystem;
use sitepipe::serve::ReloadKind;
use sitepipe::task::TaskGraph;
use sitepipe::watch::WatchAction;
use sitepipe_test_utils::builders::{mock_context, ConfigFileBuilder};
use sitepipe_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

/// Config whose style/script pipelines are off, so a full build exercises
/// only the clean and copy tasks (no external tools involved).
fn copy_only_config() -> sitepipe::config::ConfigFile {
    ConfigFileBuilder::new()
        .styles_enabled(false)
        .scripts_enabled(false)
        .build()
}

fn seed_inputs(mock: &sitepipe::fs::mock::MockFileSystem) {
    mock.add_file("/proj/src/index.html", "<html>index</html>");
    mock.add_file("/proj/src/about/team.html", "<html>team</html>");
    mock.add_file("/proj/src/assets/images/logo.png", "png bytes");
    mock.add_file("/proj/src/assets/fonts/body.woff2", "font bytes");
    mock.add_file("/proj/src/copy/robots.txt", "allow all");
}

#[tokio::test]
async fn full_build_populates_the_output_root() -> TestResult {
    init_tracing();
    let (ctx, mock) = mock_context(Mode::Development);
    seed_inputs(&mock);

    let graph = TaskGraph::from_config(&copy_only_config())?;
    graph.full_build()?.run(&ctx).await?;

    assert_eq!(
        mock.read(Path::new("/proj/dist/index.html"))?,
        b"<html>index</html>"
    );
    assert_eq!(
        mock.read(Path::new("/proj/dist/about/team.html"))?,
        b"<html>team</html>"
    );
    assert_eq!(
        mock.read(Path::new("/proj/dist/assets/images/logo.png"))?,
        b"png bytes"
    );
    assert_eq!(
        mock.read(Path::new("/proj/dist/assets/fonts/body.woff2"))?,
        b"font bytes"
    );
    // Static files are flattened onto the output root.
    assert_eq!(mock.read(Path::new("/proj/dist/robots.txt"))?, b"allow all");
    Ok(())
}

#[tokio::test]
async fn running_the_build_twice_yields_identical_output() -> TestResult {
    init_tracing();
    let (ctx, mock) = mock_context(Mode::Development);
    seed_inputs(&mock);

    let graph = TaskGraph::from_config(&copy_only_config())?;

    graph.full_build()?.run(&ctx).await?;
    let first = mock.file_snapshot();

    graph.full_build()?.run(&ctx).await?;
    let second = mock.file_snapshot();

    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn clean_removes_stale_artifacts_before_emitting() -> TestResult {
    init_tracing();
    let (ctx, mock) = mock_context(Mode::Development);
    seed_inputs(&mock);
    mock.add_file("/proj/dist/stale.html", "left over from a removed page");

    let graph = TaskGraph::from_config(&copy_only_config())?;
    graph.full_build()?.run(&ctx).await?;

    assert!(!mock.exists(Path::new("/proj/dist/stale.html")));
    assert!(mock.is_file(Path::new("/proj/dist/index.html")));
    Ok(())
}

#[tokio::test]
async fn disabled_clean_keeps_stale_artifacts() -> TestResult {
    init_tracing();
    let (ctx, mock) = mock_context(Mode::Development);
    seed_inputs(&mock);
    mock.add_file("/proj/dist/stale.html", "kept when clean is off");

    let cfg = ConfigFileBuilder::new()
        .styles_enabled(false)
        .scripts_enabled(false)
        .clean_enabled(false)
        .build();

    let graph = TaskGraph::from_config(&cfg)?;
    graph.full_build()?.run(&ctx).await?;

    assert!(mock.is_file(Path::new("/proj/dist/stale.html")));
    assert!(mock.is_file(Path::new("/proj/dist/index.html")));
    Ok(())
}

#[tokio::test]
async fn disabled_copy_skips_static_files_only() -> TestResult {
    init_tracing();
    let (ctx, mock) = mock_context(Mode::Development);
    seed_inputs(&mock);

    let cfg = ConfigFileBuilder::new()
        .styles_enabled(false)
        .scripts_enabled(false)
        .copy_enabled(false)
        .build();

    let graph = TaskGraph::from_config(&cfg)?;
    graph.full_build()?.run(&ctx).await?;

    assert!(!mock.exists(Path::new("/proj/dist/robots.txt")));
    // Markup, images and fonts are not governed by the copy toggle.
    assert!(mock.is_file(Path::new("/proj/dist/index.html")));
    assert!(mock.is_file(Path::new("/proj/dist/assets/images/logo.png")));
    Ok(())
}

#[test]
fn the_standard_graph_registers_the_expected_tasks() -> TestResult {
    init_tracing();
    let graph = TaskGraph::from_config(&ConfigFileBuilder::new().build())?;

    assert_eq!(
        graph.task_names(),
        vec![
            "build",
            "clean",
            "clean-fonts",
            "clean-images",
            "clean-markup",
            "copy-fonts",
            "copy-images",
            "copy-markup",
            "copy-static",
            "refresh-fonts",
            "refresh-images",
            "refresh-markup",
            "script",
            "style",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn running_an_unknown_task_is_an_error() -> TestResult {
    init_tracing();
    let (ctx, _mock) = mock_context(Mode::Development);
    let graph = TaskGraph::from_config(&copy_only_config())?;

    let result = graph.run("no-such-task", &ctx).await;

    assert!(matches!(result, Err(PipelineError::TaskNotFound(name)) if name == "no-such-task"));
    Ok(())
}

#[test]
fn a_markup_change_matches_both_the_refresh_and_reload_bindings() -> TestResult {
    init_tracing();
    let graph = TaskGraph::from_config(&ConfigFileBuilder::new().build())?;

    let matching: Vec<_> = graph
        .watch_bindings()
        .iter()
        .filter(|b| b.matches("src/about/team.html"))
        .collect();

    assert_eq!(matching.len(), 2);
    assert!(matching.iter().any(|b| matches!(
        b.action(),
        WatchAction::Run { task, reload: None } if task == "refresh-markup"
    )));
    assert!(matching
        .iter()
        .any(|b| matches!(b.action(), WatchAction::Reload(ReloadKind::Full))));
    Ok(())
}

#[test]
fn style_changes_request_a_css_only_reload() -> TestResult {
    init_tracing();
    let graph = TaskGraph::from_config(&ConfigFileBuilder::new().build())?;

    let matching: Vec<_> = graph
        .watch_bindings()
        .iter()
        .filter(|b| b.matches("src/scss/components/_button.scss"))
        .collect();

    assert_eq!(matching.len(), 1);
    assert!(matches!(
        matching[0].action(),
        WatchAction::Run { task, reload: Some(ReloadKind::Css) } if task == "style"
    ));
    Ok(())
}

#[test]
fn disabling_reload_removes_all_notifications() -> TestResult {
    init_tracing();
    let cfg = ConfigFileBuilder::new().reload_enabled(false).build();
    let graph = TaskGraph::from_config(&cfg)?;

    for binding in graph.watch_bindings() {
        match binding.action() {
            WatchAction::Run { reload, .. } => assert!(reload.is_none()),
            WatchAction::Reload(_) => panic!("reload binding present with reload disabled"),
        }
    }
    Ok(())
}
