// tests/pipeline_tasks.rs

use std::error::Error;
use std::path::Path;
use std::sync::{Arc, Mutex};

use sitepipe::config::Mode;
use sitepipe::fs::FileSystem;
use sitepipe::task::{OutputSpec, PipelineTask, Task};
use sitepipe::transform::Transform;
use sitepipe_test_utils::builders::mock_context;
use sitepipe_test_utils::fake_transform::{AppliedBatch, FailingTransform, FakeTransform};
use sitepipe_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn copy_preserves_relative_structure() -> TestResult {
    init_tracing();
    let (ctx, mock) = mock_context(Mode::Development);
    mock.add_file("/proj/src/index.html", "<html>index</html>");
    mock.add_file("/proj/src/about/team.html", "<html>team</html>");

    PipelineTask::copy("copy-markup", "src/**/*.html", "src", "")
        .run(&ctx)
        .await?;

    assert_eq!(
        mock.read(Path::new("/proj/dist/index.html"))?,
        b"<html>index</html>"
    );
    assert_eq!(
        mock.read(Path::new("/proj/dist/about/team.html"))?,
        b"<html>team</html>"
    );
    Ok(())
}

#[tokio::test]
async fn copy_into_a_subdirectory_of_the_output_root() -> TestResult {
    init_tracing();
    let (ctx, mock) = mock_context(Mode::Development);
    mock.add_file("/proj/src/assets/images/logo.png", "png bytes");

    PipelineTask::copy(
        "copy-images",
        "src/assets/images/**/*.{jpg,jpeg,png,gif,svg}",
        "src/assets/images",
        "assets/images",
    )
    .run(&ctx)
    .await?;

    assert_eq!(
        mock.read(Path::new("/proj/dist/assets/images/logo.png"))?,
        b"png bytes"
    );
    Ok(())
}

#[tokio::test]
async fn existing_output_is_replaced_not_merged() -> TestResult {
    init_tracing();
    let (ctx, mock) = mock_context(Mode::Development);
    mock.add_file("/proj/src/index.html", "new contents");
    mock.add_file("/proj/dist/index.html", "old contents");

    PipelineTask::copy("copy-markup", "src/**/*.html", "src", "")
        .run(&ctx)
        .await?;

    assert_eq!(mock.read(Path::new("/proj/dist/index.html"))?, b"new contents");
    Ok(())
}

#[tokio::test]
async fn transforms_run_in_declared_order_and_see_the_mode() -> TestResult {
    init_tracing();
    let (ctx, mock) = mock_context(Mode::Production);
    mock.add_file("/proj/src/scss/main.scss", "$c: red;");

    let applied = Arc::new(Mutex::new(Vec::new()));
    let transforms: Vec<Arc<dyn Transform>> = vec![
        Arc::new(FakeTransform::new("compile", "main.css", applied.clone())),
        Arc::new(FakeTransform::new("prefix", "main.css", applied.clone())),
    ];

    PipelineTask::new(
        "style",
        "src/scss/main.scss",
        "src/scss",
        transforms,
        OutputSpec::renamed("app.css"),
    )
    .run(&ctx)
    .await?;

    // First stage saw the source file, second stage saw the first stage's
    // single output; both ran in production mode.
    assert_eq!(
        *applied.lock().unwrap(),
        vec![
            AppliedBatch { files: 1, mode: Mode::Production },
            AppliedBatch { files: 1, mode: Mode::Production },
        ]
    );

    // Result lands under the canonical output name, not the entry's name.
    assert_eq!(
        mock.read(Path::new("/proj/dist/app.css"))?,
        b"prefix output (production)"
    );
    assert!(!mock.exists(Path::new("/proj/dist/main.css")));
    Ok(())
}

#[tokio::test]
async fn empty_input_set_writes_nothing_and_skips_transforms() -> TestResult {
    init_tracing();
    let (ctx, mock) = mock_context(Mode::Development);

    let applied = Arc::new(Mutex::new(Vec::new()));
    let transforms: Vec<Arc<dyn Transform>> =
        vec![Arc::new(FakeTransform::new("compile", "out.css", applied.clone()))];

    PipelineTask::new(
        "style",
        "src/scss/**/*.scss",
        "src/scss",
        transforms,
        OutputSpec::renamed("app.css"),
    )
    .run(&ctx)
    .await?;

    assert!(applied.lock().unwrap().is_empty());
    assert!(mock.file_snapshot().is_empty());
    Ok(())
}

#[tokio::test]
async fn failed_transform_drops_the_batch_but_the_task_succeeds() -> TestResult {
    init_tracing();
    let (ctx, mock) = mock_context(Mode::Development);
    mock.add_file("/proj/src/js/main.js", "console.log(1)");

    let transforms: Vec<Arc<dyn Transform>> = vec![Arc::new(FailingTransform)];

    let result = PipelineTask::new(
        "script",
        "src/**/*.js",
        "src/js",
        transforms,
        OutputSpec::renamed("app.js"),
    )
    .run(&ctx)
    .await;

    // Skip-and-log: the run reports success, the output stays absent.
    assert!(result.is_ok());
    assert!(!mock.exists(Path::new("/proj/dist/app.js")));
    Ok(())
}

#[tokio::test]
async fn disabled_task_is_a_silent_success() -> TestResult {
    init_tracing();
    let (ctx, mock) = mock_context(Mode::Development);
    mock.add_file("/proj/src/copy/robots.txt", "allow all");

    PipelineTask::copy("copy-static", "src/copy/**/*", "src/copy", "")
        .enabled(false)
        .run(&ctx)
        .await?;

    assert!(!mock.exists(Path::new("/proj/dist/robots.txt")));
    let outputs: Vec<_> = mock
        .file_snapshot()
        .into_keys()
        .filter(|p| p.starts_with("/proj/dist"))
        .collect();
    assert!(outputs.is_empty());
    Ok(())
}
