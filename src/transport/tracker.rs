//! Changed-output detection between builds

use std::collections::HashMap;
use std::path::Path;

/// Remembers the content hash of every output seen in the previous build
#[derive(Debug, Default, Clone)]
pub struct ChangeTracker {
    hashes: HashMap<String, String>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outputs whose content differs from the previous build.
    ///
    /// `names` are paths relative to `build_root`. Every existing output is
    /// reported on the first call; outputs that vanished are forgotten.
    pub fn changed(&mut self, build_root: &Path, names: &[String]) -> Vec<String> {
        let mut changed = Vec::new();

        for name in names {
            let path = build_root.join(name);
            let Ok(hash) = crate::fs::hash_file(&path) else {
                self.hashes.remove(name);
                continue;
            };

            if self.hashes.get(name) != Some(&hash) {
                changed.push(name.clone());
                self.hashes.insert(name.clone(), hash);
            }
        }

        changed
    }

    /// Drop a remembered hash so the output counts as changed next time
    pub fn forget(&mut self, name: &str) {
        self.hashes.remove(name);
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn first_build_reports_everything() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.js"), "a").unwrap();
        fs::write(dir.path().join("b.css"), "b").unwrap();

        let mut tracker = ChangeTracker::new();
        let changed = tracker.changed(dir.path(), &names(&["a.js", "b.css"]));

        assert_eq!(changed, names(&["a.js", "b.css"]));
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn unchanged_outputs_are_skipped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.js"), "a").unwrap();
        fs::write(dir.path().join("b.css"), "b").unwrap();

        let mut tracker = ChangeTracker::new();
        tracker.changed(dir.path(), &names(&["a.js", "b.css"]));

        fs::write(dir.path().join("b.css"), "b2").unwrap();
        let changed = tracker.changed(dir.path(), &names(&["a.js", "b.css"]));

        assert_eq!(changed, names(&["b.css"]));
    }

    #[test]
    fn missing_outputs_are_ignored_and_forgotten() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.js"), "a").unwrap();

        let mut tracker = ChangeTracker::new();
        tracker.changed(dir.path(), &names(&["a.js"]));
        fs::remove_file(dir.path().join("a.js")).unwrap();

        assert!(tracker.changed(dir.path(), &names(&["a.js", "gone.js"])).is_empty());
        assert!(tracker.is_empty());

        fs::write(dir.path().join("a.js"), "a").unwrap();
        assert_eq!(tracker.changed(dir.path(), &names(&["a.js"])), names(&["a.js"]));
    }

    #[test]
    fn forgotten_outputs_are_reported_again() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.js"), "a").unwrap();

        let mut tracker = ChangeTracker::new();
        tracker.changed(dir.path(), &names(&["a.js"]));
        tracker.forget("a.js");

        assert_eq!(tracker.changed(dir.path(), &names(&["a.js"])), names(&["a.js"]));
    }
}
