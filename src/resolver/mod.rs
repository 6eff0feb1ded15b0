//! Entry discovery
//!
//! Diffs the source folder against the build folder to decide which source
//! files webpack should compile. A source file becomes an entry only when a
//! previously built file with the same relative path exists. Built `.css`
//! files also match `.sass`/`.scss` sources, never the other way round.
//!
//! The result is the webpack `entry` map plus the whitelist of output names
//! (with `.map` siblings) that may survive output filtering.

mod merge;
#[cfg(test)]
mod tests;
mod walk;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

pub use merge::intersect_sorted;
pub use walk::list_files;

use crate::error::PackupResult;

/// Extensions that compile down to `.css`
pub const STYLE_SOURCE_EXTENSIONS: [&str; 2] = ["sass", "scss"];

/// Resolved webpack entries and the outputs they are allowed to emit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntrySet {
    /// Entry name (`js/app`) -> absolute source path
    pub entries: BTreeMap<String, PathBuf>,
    /// Output names and their `.map` siblings, in resolution order
    pub whitelist: Vec<String>,
}

impl EntrySet {
    /// Build the entry set from two already-listed file sets.
    ///
    /// `source_files` and `build_files` are paths relative to their roots;
    /// entry paths are joined onto `source_root`.
    pub fn from_file_sets(
        source_root: &Path,
        source_files: &[String],
        build_files: &[String],
    ) -> Self {
        let common = find_common_files(source_files, build_files);

        let mut set = EntrySet::default();
        for file in &common {
            let name = entry_name(file);
            let output = match extension(file) {
                Some(ext) => format!("{}.{}", name, output_extension(ext)),
                None => name.to_string(),
            };

            let relative = file.strip_prefix("./").unwrap_or(file);
            set.entries
                .insert(name.to_string(), source_root.join(relative));
            set.push_output(output);
        }

        set
    }

    fn push_output(&mut self, output: String) {
        let map = format!("{}.map", output);
        for name in [output, map] {
            if !self.whitelist.contains(&name) {
                self.whitelist.push(name);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether an emitted asset name may be kept
    pub fn contains_output(&self, name: &str) -> bool {
        self.whitelist.iter().any(|w| w == name)
    }
}

/// Walk both folders and resolve the entries they have in common.
///
/// Fails with `DirectoryNotFound` when either folder is missing.
pub fn resolve_entries(source_root: &Path, build_root: &Path) -> PackupResult<EntrySet> {
    let source_files = list_files(source_root)?;
    let build_files = list_files(build_root)?;
    Ok(EntrySet::from_file_sets(
        source_root,
        &source_files,
        &build_files,
    ))
}

/// Sorted intersection of source and build paths.
///
/// Built `.css` paths additionally stand in for `.sass` and `.scss`
/// sources of the same name.
pub fn find_common_files(source_files: &[String], build_files: &[String]) -> Vec<String> {
    let mut candidates: Vec<String> = build_files.to_vec();
    for file in build_files {
        if extension(file) != Some("css") {
            continue;
        }
        let stem = &file[..file.len() - "css".len()];
        for ext in STYLE_SOURCE_EXTENSIONS {
            candidates.push(format!("{}{}", stem, ext));
        }
    }

    let mut source: Vec<String> = source_files.to_vec();
    source.sort();
    candidates.sort();

    intersect_sorted(&source, &candidates)
}

/// Final dot-delimited segment of the file name.
///
/// Returns `None` for names without a dot or with only a leading dot
/// (`.babelrc`), so such files keep their full name as entry name.
pub fn extension(path: &str) -> Option<&str> {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => Some(&file_name[idx + 1..]),
        _ => None,
    }
}

/// Entry name for a relative path: `./js/app.min.js` -> `js/app.min`.
pub fn entry_name(path: &str) -> &str {
    let path = path.strip_prefix("./").unwrap_or(path);
    match extension(path) {
        Some(ext) => &path[..path.len() - ext.len() - 1],
        None => path,
    }
}

/// Extension webpack emits for a given source extension.
pub fn output_extension(ext: &str) -> &str {
    if STYLE_SOURCE_EXTENSIONS.contains(&ext) {
        "css"
    } else {
        ext
    }
}
