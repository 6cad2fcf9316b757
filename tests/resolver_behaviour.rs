// tests/resolver_behaviour.rs

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sitepipe::assets::Resolver;
use sitepipe::errors::PipelineError;
use sitepipe::fs::mock::MockFileSystem;
use sitepipe::fs::FileSystem;
use sitepipe_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

fn resolver(mock: &MockFileSystem) -> Resolver {
    let fs: Arc<dyn FileSystem> = Arc::new(mock.clone());
    Resolver::new(fs, "/proj")
}

#[test]
fn zero_matches_is_an_empty_list_not_an_error() -> TestResult {
    init_tracing();
    let mock = MockFileSystem::new();
    mock.add_file("/proj/src/js/main.js", "");

    let matches = resolver(&mock).resolve("src/**/*.scss")?;

    assert!(matches.is_empty());
    Ok(())
}

#[test]
fn missing_directories_resolve_to_nothing() -> TestResult {
    init_tracing();
    let mock = MockFileSystem::new();

    // "/proj" itself does not exist on this mock.
    let matches = resolver(&mock).resolve("src/**/*.html")?;

    assert!(matches.is_empty());
    Ok(())
}

#[test]
fn matches_are_returned_in_sorted_order() -> TestResult {
    init_tracing();
    let mock = MockFileSystem::new();
    mock.add_file("/proj/src/b/page.html", "");
    mock.add_file("/proj/src/a/page.html", "");
    mock.add_file("/proj/src/index.html", "");

    let matches = resolver(&mock).resolve("src/**/*.html")?;

    assert_eq!(
        matches,
        vec![
            PathBuf::from("/proj/src/a/page.html"),
            PathBuf::from("/proj/src/b/page.html"),
            PathBuf::from("/proj/src/index.html"),
        ]
    );
    Ok(())
}

#[test]
fn each_call_walks_the_tree_fresh() -> TestResult {
    init_tracing();
    let mock = MockFileSystem::new();
    mock.add_file("/proj/src/index.html", "");

    let resolver = resolver(&mock);
    assert_eq!(resolver.resolve("src/**/*.html")?.len(), 1);

    // A file added after the first resolution is picked up without any
    // cache invalidation step.
    mock.add_file("/proj/src/about.html", "");
    assert_eq!(resolver.resolve("src/**/*.html")?.len(), 2);
    Ok(())
}

#[test]
fn brace_alternation_matches_either_extension() -> TestResult {
    init_tracing();
    let mock = MockFileSystem::new();
    mock.add_file("/proj/src/scss/main.scss", "");
    mock.add_file("/proj/src/scss/_mixin.sass", "");
    mock.add_file("/proj/src/scss/notes.txt", "");

    let matches = resolver(&mock).resolve("src/scss/**/*.{scss,sass}")?;

    assert_eq!(matches.len(), 2);
    Ok(())
}

#[test]
fn invalid_pattern_is_a_config_error() {
    init_tracing();
    let mock = MockFileSystem::new();

    let result = resolver(&mock).resolve("src/**/*.{scss");

    assert!(matches!(result, Err(PipelineError::Config(_))));
}

#[test]
fn load_strips_the_base_and_keeps_remaining_structure() -> TestResult {
    init_tracing();
    let mock = MockFileSystem::new();
    mock.add_file("/proj/src/index.html", "<html>index</html>");
    mock.add_file("/proj/src/about/team.html", "<html>team</html>");

    let batch = resolver(&mock).load("src/**/*.html", Path::new("src"))?;

    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].rel, PathBuf::from("about/team.html"));
    assert_eq!(batch[0].contents, b"<html>team</html>");
    assert_eq!(batch[0].src.as_deref(), Some(Path::new("/proj/src/about/team.html")));
    assert_eq!(batch[1].rel, PathBuf::from("index.html"));
    Ok(())
}
