//! Watch and rebuild

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::bundler::Bundler;
use crate::error::{PackupError, PackupResult};
use crate::session::{BuildOutcome, BuildSession};

use super::event::{WatchEvent, WatchExit, WatcherState};

/// Run one build and report it through `callback`.
///
/// Returns `false` when webpack reported errors.
pub fn build_once<B: Bundler>(
    session: &mut BuildSession<B>,
    callback: &impl Fn(WatchEvent),
) -> PackupResult<bool> {
    callback(WatchEvent::BuildStarted);

    let outcome = match session.build() {
        Ok(outcome) => outcome,
        Err(e) => {
            callback(WatchEvent::Error {
                message: e.to_string(),
            });
            return Err(e);
        }
    };

    match outcome {
        BuildOutcome::Failed {
            first_error,
            error_count,
        } => {
            callback(WatchEvent::BuildFailed {
                message: first_error,
                errors: error_count,
            });
            Ok(false)
        }
        BuildOutcome::Built(summary) => {
            if let Some(failure) = summary.uploaded.as_ref().and_then(|r| r.failed.as_ref()) {
                callback(WatchEvent::UploadFailed {
                    path: failure.path.display().to_string(),
                    message: failure.message.clone(),
                });
            }
            callback(WatchEvent::BuildComplete {
                kept: summary.kept.len(),
                removed: summary.removed.len(),
                uploaded: summary.uploaded_count(),
            });
            Ok(true)
        }
    }
}

/// Build, then rebuild on every debounced batch of source changes until
/// `running` is cleared or a build fails.
pub fn watch<B: Bundler>(
    session: &mut BuildSession<B>,
    running: Arc<AtomicBool>,
    event_callback: impl Fn(WatchEvent),
) -> PackupResult<WatchExit> {
    let source = session.paths().src.clone();
    let build_root = session
        .paths()
        .build
        .canonicalize()
        .unwrap_or_else(|_| session.paths().build.clone());

    event_callback(WatchEvent::WatchStarted {
        source: source.display().to_string(),
    });

    let mut content_hashes = snapshot_hashes(&source, &build_root);

    if !build_once(session, &event_callback)? {
        return Ok(WatchExit::BuildFailed);
    }

    let (tx, rx) = channel();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                for path in event.paths {
                    let _ = tx.send(path);
                }
            }
        },
        Config::default(),
    )
    .map_err(|e| PackupError::Io(std::io::Error::other(e.to_string())))?;

    watcher
        .watch(&source, RecursiveMode::Recursive)
        .map_err(|e| PackupError::Io(std::io::Error::other(e.to_string())))?;

    // notify may replay events for existing files right after registering
    let cooldown_end = Instant::now() + Duration::from_millis(500);
    while Instant::now() < cooldown_end && running.load(Ordering::SeqCst) {
        let _ = rx.recv_timeout(Duration::from_millis(50));
    }

    let mut state = WatcherState::new();

    while running.load(Ordering::SeqCst) {
        if let Ok(path) = rx.recv_timeout(Duration::from_millis(50)) {
            if is_ignored(&path, &build_root) {
                continue;
            }

            let path = path.canonicalize().unwrap_or(path);
            if content_changed(&mut content_hashes, &path) {
                state.add_change(path);
            }
        }

        if state.should_build() {
            for path in state.take_changes() {
                let shown = path.strip_prefix(&source).unwrap_or(&path);
                event_callback(WatchEvent::FileChanged {
                    path: shown.display().to_string(),
                });
            }

            if !build_once(session, &event_callback)? {
                return Ok(WatchExit::BuildFailed);
            }
        }
    }

    event_callback(WatchEvent::Shutdown);
    Ok(WatchExit::Interrupted)
}

/// `node_modules` anywhere in the path, or anything the build writes
pub(crate) fn is_ignored(path: &Path, build_root: &Path) -> bool {
    path.starts_with(build_root)
        || path
            .components()
            .any(|c| matches!(c, Component::Normal(name) if name == "node_modules"))
}

/// Record the file's current hash; `true` when it differs from the last one.
///
/// A file that can no longer be read counts as changed once, so deletions
/// still trigger a rebuild.
pub(crate) fn content_changed(hashes: &mut HashMap<PathBuf, String>, path: &Path) -> bool {
    match crate::fs::hash_file(path) {
        Ok(hash) => hashes.insert(path.to_path_buf(), hash.clone()).as_ref() != Some(&hash),
        Err(_) => hashes.remove(path).is_some(),
    }
}

/// Hashes of the current sources, so the first batch isn't all noise
fn snapshot_hashes(source: &Path, build_root: &Path) -> HashMap<PathBuf, String> {
    let Ok(files) = crate::resolver::list_files(source) else {
        return HashMap::new();
    };

    files
        .iter()
        .map(|rel| source.join(rel))
        .map(|path| path.canonicalize().unwrap_or(path))
        .filter(|path| !is_ignored(path, build_root))
        .filter_map(|path| crate::fs::hash_file(&path).ok().map(|hash| (path, hash)))
        .collect()
}
