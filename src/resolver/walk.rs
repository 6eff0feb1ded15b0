//! Recursive directory listing

use std::path::Path;

use ignore::WalkBuilder;

use crate::error::{PackupError, PackupResult};

/// List every file under `root`, as forward-slash paths relative to `root`.
///
/// Directories are descended into but never listed. Nothing is filtered:
/// hidden files and ignore files are treated like any other file.
/// The order is the walk order; callers sort when they need to.
pub fn list_files(root: &Path) -> PackupResult<Vec<String>> {
    if !root.is_dir() {
        return Err(PackupError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(true)
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| std::io::Error::other(e.to_string()))?;
        if !entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
            continue;
        }
        if let Some(rel) = relative_path(root, entry.path()) {
            files.push(rel);
        }
    }

    Ok(files)
}

fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
