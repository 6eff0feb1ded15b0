//! Property tests for entry naming and whitelisting.

use std::path::Path;

use proptest::prelude::*;

use packup::resolver::{entry_name, extension};
use packup::EntrySet;

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_-]{0,8}").unwrap()
}

fn relative_path() -> impl Strategy<Value = String> {
    (
        proptest::collection::vec(segment(), 0..3),
        segment(),
        prop_oneof![Just("js"), Just("css"), Just("scss"), Just("sass"), Just("min.js")],
    )
        .prop_map(|(dirs, stem, ext)| {
            let mut parts = dirs;
            parts.push(format!("{}.{}", stem, ext));
            parts.join("/")
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Name plus extension rebuilds the original relative path.
    #[test]
    fn property_entry_name_drops_only_the_last_extension(path in relative_path()) {
        let ext = extension(&path).unwrap();
        prop_assert_eq!(format!("{}.{}", entry_name(&path), ext), path.clone());
        prop_assert!(!ext.contains('.'));
    }

    /// PROPERTY: Every entry has its output and `.map` sibling whitelisted,
    /// and nothing outside the common files becomes an entry.
    #[test]
    fn property_entries_come_from_common_files(
        shared in proptest::collection::btree_set(relative_path(), 0..12),
        source_only in proptest::collection::btree_set(relative_path(), 0..6),
    ) {
        let mut source: Vec<String> = shared.iter().chain(source_only.iter()).cloned().collect();
        source.dedup();
        let build: Vec<String> = shared
            .iter()
            .map(|p| match p.strip_suffix(".scss").or_else(|| p.strip_suffix(".sass")) {
                Some(stem) => format!("{}.css", stem),
                None => p.clone(),
            })
            .collect();

        let set = EntrySet::from_file_sets(Path::new("/src"), &source, &build);

        for name in set.entries.keys() {
            let from_shared = shared.iter().any(|p| entry_name(p) == name);
            prop_assert!(from_shared, "{} is not a shared file", name);
        }
        for output in set.whitelist.iter().filter(|w| !w.ends_with(".map")) {
            let map = format!("{}.map", output);
            prop_assert!(set.contains_output(&map));
        }
        prop_assert!(set.whitelist.iter().all(|w| !w.ends_with(".scss") && !w.ends_with(".sass")));
    }
}
