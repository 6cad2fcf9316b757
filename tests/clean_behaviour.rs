// tests/clean_behaviour.rs

use std::error::Error;
use std::path::Path;

use sitepipe::config::Mode;
use sitepipe::fs::FileSystem;
use sitepipe::task::{CleanTask, Task};
use sitepipe_test_utils::builders::mock_context;
use sitepipe_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn empty_target_removes_the_whole_output_root() -> TestResult {
    init_tracing();
    let (ctx, mock) = mock_context(Mode::Development);
    mock.add_file("/proj/dist/app.css", "old css");
    mock.add_file("/proj/dist/assets/images/logo.png", "old image");
    mock.add_file("/proj/src/scss/main.scss", "input stays");

    CleanTask::new("clean", "").run(&ctx).await?;

    assert!(!mock.exists(Path::new("/proj/dist")));
    assert!(!mock.exists(Path::new("/proj/dist/app.css")));
    // Inputs are untouched.
    assert!(mock.is_file(Path::new("/proj/src/scss/main.scss")));
    Ok(())
}

#[tokio::test]
async fn cleaning_an_absent_target_succeeds() -> TestResult {
    init_tracing();
    let (ctx, mock) = mock_context(Mode::Development);

    // Output root was never created; all three target shapes still succeed.
    CleanTask::new("clean", "").run(&ctx).await?;
    CleanTask::new("clean-fonts", "assets/fonts").run(&ctx).await?;
    CleanTask::new("clean-markup", "**/*.html").run(&ctx).await?;

    assert!(!mock.exists(Path::new("/proj/dist")));
    Ok(())
}

#[tokio::test]
async fn glob_target_removes_only_matching_files() -> TestResult {
    init_tracing();
    let (ctx, mock) = mock_context(Mode::Development);
    mock.add_file("/proj/dist/index.html", "stale");
    mock.add_file("/proj/dist/about/index.html", "stale");
    mock.add_file("/proj/dist/app.css", "keep");
    mock.add_file("/proj/dist/assets/images/logo.png", "keep");

    CleanTask::new("clean-markup", "**/*.html").run(&ctx).await?;

    assert!(!mock.exists(Path::new("/proj/dist/index.html")));
    assert!(!mock.exists(Path::new("/proj/dist/about/index.html")));
    assert!(mock.is_file(Path::new("/proj/dist/app.css")));
    assert!(mock.is_file(Path::new("/proj/dist/assets/images/logo.png")));
    Ok(())
}

#[tokio::test]
async fn directory_target_removes_the_subtree() -> TestResult {
    init_tracing();
    let (ctx, mock) = mock_context(Mode::Development);
    mock.add_file("/proj/dist/assets/images/a.png", "a");
    mock.add_file("/proj/dist/assets/images/nested/b.svg", "b");
    mock.add_file("/proj/dist/assets/fonts/f.woff2", "keep");

    CleanTask::new("clean-images", "assets/images").run(&ctx).await?;

    assert!(!mock.exists(Path::new("/proj/dist/assets/images")));
    assert!(!mock.exists(Path::new("/proj/dist/assets/images/nested/b.svg")));
    assert!(mock.is_file(Path::new("/proj/dist/assets/fonts/f.woff2")));
    Ok(())
}

#[tokio::test]
async fn disabled_clean_leaves_everything_in_place() -> TestResult {
    init_tracing();
    let (ctx, mock) = mock_context(Mode::Development);
    mock.add_file("/proj/dist/app.css", "stale but kept");

    CleanTask::new("clean", "").enabled(false).run(&ctx).await?;

    assert!(mock.is_file(Path::new("/proj/dist/app.css")));
    Ok(())
}
