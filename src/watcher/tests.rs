//! Tests for the watcher module

use super::event::{WatchEvent, WatchExit, WatcherState, DEBOUNCE_MS};
use super::run::{build_once, content_changed, is_ignored, watch};
use crate::bundler::{BuildStats, Bundler, Mode, StatsAsset, StatsMessage, WebpackConfig};
use crate::config::ProjectPaths;
use crate::error::PackupResult;
use crate::session::BuildSession;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::tempdir;

struct StubBundler {
    errors: Vec<&'static str>,
}

impl Bundler for StubBundler {
    fn build(&self, config: &WebpackConfig) -> PackupResult<BuildStats> {
        fs::create_dir_all(config.output_path.join("js"))?;
        fs::write(config.output_path.join("js/app.js"), "bundle")?;
        Ok(BuildStats {
            errors: self
                .errors
                .iter()
                .map(|e| StatsMessage::Text(e.to_string()))
                .collect(),
            assets: vec![StatsAsset::new("js/app.js")],
            ..BuildStats::default()
        })
    }
}

fn session(root: &Path, errors: Vec<&'static str>) -> BuildSession<StubBundler> {
    let paths = ProjectPaths {
        root: root.to_path_buf(),
        src: root.join("src"),
        build: root.join("build"),
    };
    for dir in [&paths.src, &paths.build] {
        fs::create_dir_all(dir.join("js")).unwrap();
        fs::write(dir.join("js/app.js"), "").unwrap();
    }
    BuildSession::new(StubBundler { errors }, paths, Mode::Development).unwrap()
}

#[test]
fn test_watch_event_to_json_started() {
    let event = WatchEvent::WatchStarted {
        source: "assets".to_string(),
    };
    let json = event.to_json();
    assert!(json.contains("\"event\":\"watch_started\""));
    assert!(json.contains("\"source\":\"assets\""));
}

#[test]
fn test_watch_event_to_json_build_complete() {
    let event = WatchEvent::BuildComplete {
        kept: 3,
        removed: 1,
        uploaded: 2,
    };
    let json = event.to_json();
    assert!(json.contains("\"event\":\"build_complete\""));
    assert!(json.contains("\"kept\":3"));
    assert!(json.contains("\"removed\":1"));
    assert!(json.contains("\"uploaded\":2"));
}

#[test]
fn test_watch_event_to_json_build_failed() {
    let event = WatchEvent::BuildFailed {
        message: "Can't resolve \"./missing\"".to_string(),
        errors: 1,
    };
    let json = event.to_json();
    assert!(json.contains("\"event\":\"build_failed\""));
    assert!(json.contains("\\\"./missing\\\""));
}

#[test]
fn test_watcher_state_debouncing() {
    let mut state = WatcherState::new();
    assert!(!state.should_build());

    state.add_change(PathBuf::from("js/app.js"));
    assert!(!state.should_build());

    std::thread::sleep(Duration::from_millis(DEBOUNCE_MS + 10));
    assert!(state.should_build());

    assert_eq!(state.take_changes().len(), 1);
    assert!(!state.should_build());
}

#[test]
fn test_watcher_state_coalesces_and_sorts() {
    let mut state = WatcherState::new();
    state.add_change(PathBuf::from("styles/b.scss"));
    state.add_change(PathBuf::from("js/a.js"));
    state.add_change(PathBuf::from("styles/b.scss"));

    std::thread::sleep(Duration::from_millis(DEBOUNCE_MS + 10));

    assert_eq!(
        state.take_changes(),
        vec![PathBuf::from("js/a.js"), PathBuf::from("styles/b.scss")]
    );
}

#[test]
fn test_ignores_node_modules_and_build_output() {
    let build = Path::new("/site/build");
    assert!(is_ignored(Path::new("/site/src/node_modules/x/index.js"), build));
    assert!(is_ignored(Path::new("/site/build/js/app.js"), build));
    assert!(!is_ignored(Path::new("/site/src/js/app.js"), build));
    assert!(!is_ignored(Path::new("/site/src/js/node_modules.js"), build));
}

#[test]
fn test_content_changed_filters_identical_saves() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("app.js");
    fs::write(&file, "a").unwrap();
    let mut hashes = HashMap::new();

    assert!(content_changed(&mut hashes, &file));
    assert!(!content_changed(&mut hashes, &file));

    fs::write(&file, "b").unwrap();
    assert!(content_changed(&mut hashes, &file));

    fs::remove_file(&file).unwrap();
    assert!(content_changed(&mut hashes, &file));
    assert!(!content_changed(&mut hashes, &file));
}

#[test]
fn test_build_once_reports_success() {
    let dir = tempdir().unwrap();
    let mut session = session(dir.path(), Vec::new());
    let events = Mutex::new(Vec::new());

    let ok = build_once(&mut session, &|e: WatchEvent| events.lock().unwrap().push(e)).unwrap();

    assert!(ok);
    assert_eq!(
        *events.lock().unwrap(),
        vec![
            WatchEvent::BuildStarted,
            WatchEvent::BuildComplete {
                kept: 1,
                removed: 0,
                uploaded: 0,
            },
        ]
    );
}

#[test]
fn test_watch_initial_build_then_stop() {
    let dir = tempdir().unwrap();
    let mut session = session(dir.path(), Vec::new());

    let events: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();
    let running = Arc::new(AtomicBool::new(false)); // Stop immediately

    let exit = watch(&mut session, running, |event| {
        events_clone.lock().unwrap().push(event.to_json());
    })
    .unwrap();

    assert_eq!(exit, WatchExit::Interrupted);
    let captured = events.lock().unwrap();
    assert!(captured[0].contains("watch_started"));
    assert!(captured.iter().any(|e| e.contains("build_complete")));
    assert!(captured.last().unwrap().contains("shutdown"));
}

#[test]
fn test_watch_stops_on_build_errors() {
    let dir = tempdir().unwrap();
    let mut session = session(dir.path(), vec!["Unexpected token"]);
    let running = Arc::new(AtomicBool::new(true));
    let events = Mutex::new(Vec::new());

    let exit = watch(&mut session, running, |event| {
        events.lock().unwrap().push(event);
    })
    .unwrap();

    assert_eq!(exit, WatchExit::BuildFailed);
    assert!(events.lock().unwrap().contains(&WatchEvent::BuildFailed {
        message: "Unexpected token".to_string(),
        errors: 1,
    }));
}
