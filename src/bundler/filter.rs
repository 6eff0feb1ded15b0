//! Post-build output filtering
//!
//! webpack emits a `.js` stub for every style-only entry and may emit
//! other helper files. Anything not on the entry whitelist is deleted from
//! the build folder right after the build.
//!
//! Filtering happens after webpack has written to disk, so a non-whitelisted
//! asset whose path already existed in the build folder is overwritten and
//! then deleted.

use std::path::{Component, Path};

use crate::error::PackupResult;
use crate::resolver::EntrySet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterReport {
    /// Whitelisted assets, in emission order
    pub kept: Vec<String>,
    /// Assets deleted from the build folder
    pub removed: Vec<String>,
}

/// Delete every reported asset that the whitelist doesn't allow.
///
/// Asset names that would resolve outside `build_root` are left alone.
pub fn filter_outputs(
    build_root: &Path,
    assets: &[String],
    entries: &EntrySet,
) -> PackupResult<FilterReport> {
    let mut report = FilterReport::default();

    for name in assets {
        if entries.contains_output(name) {
            if !report.kept.contains(name) {
                report.kept.push(name.clone());
            }
            continue;
        }

        if !is_contained(name) {
            continue;
        }

        match std::fs::remove_file(build_root.join(name)) {
            Ok(()) => report.removed.push(name.clone()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }

    Ok(report)
}

fn is_contained(name: &str) -> bool {
    Path::new(name)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
