use super::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn files(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "").unwrap();
}

#[test]
fn disjoint_sets_resolve_to_nothing() {
    let set = EntrySet::from_file_sets(
        Path::new("/src"),
        &files(&["js/app.js", "styles/main.scss"]),
        &files(&["js/other.js", "styles/print.css"]),
    );

    assert!(set.is_empty());
    assert!(set.whitelist.is_empty());
}

#[test]
fn js_and_scss_sources_match_built_outputs() {
    let set = EntrySet::from_file_sets(
        Path::new("/src"),
        &files(&["js/app.js", "styles/app.scss"]),
        &files(&["js/app.js", "styles/app.css"]),
    );

    assert_eq!(set.len(), 2);
    assert_eq!(set.entries["js/app"], PathBuf::from("/src/js/app.js"));
    assert_eq!(set.entries["styles/app"], PathBuf::from("/src/styles/app.scss"));
    assert_eq!(
        set.whitelist,
        vec![
            "js/app.js",
            "js/app.js.map",
            "styles/app.css",
            "styles/app.css.map"
        ]
    );
}

#[test]
fn build_only_file_is_excluded() {
    let set = EntrySet::from_file_sets(
        Path::new("/src"),
        &files(&["js/app.js"]),
        &files(&["js/app.js", "css/unused.css"]),
    );

    assert!(!set.entries.contains_key("css/unused"));
    assert!(!set.contains_output("css/unused.css"));
    assert!(!set.contains_output("css/unused.css.map"));
}

#[test]
fn source_only_file_is_excluded() {
    let set = EntrySet::from_file_sets(
        Path::new("/src"),
        &files(&["js/app.js", "js/draft.js"]),
        &files(&["js/app.js"]),
    );

    assert_eq!(set.entries.keys().collect::<Vec<_>>(), vec!["js/app"]);
    assert!(!set.contains_output("js/draft.js"));
}

#[test]
fn sass_source_emits_css_output() {
    let set = EntrySet::from_file_sets(
        Path::new("/src"),
        &files(&["styles/theme.sass"]),
        &files(&["styles/theme.css"]),
    );

    assert_eq!(set.entries["styles/theme"], PathBuf::from("/src/styles/theme.sass"));
    assert_eq!(set.whitelist, vec!["styles/theme.css", "styles/theme.css.map"]);
}

#[test]
fn css_expansion_is_one_directional() {
    // A built .scss file never stands in for a .css source.
    let set = EntrySet::from_file_sets(
        Path::new("/src"),
        &files(&["styles/app.css"]),
        &files(&["styles/app.scss"]),
    );

    assert!(set.is_empty());
}

#[test]
fn plain_css_source_matches_css_output() {
    let set = EntrySet::from_file_sets(
        Path::new("/src"),
        &files(&["styles/plain.css"]),
        &files(&["styles/plain.css"]),
    );

    assert_eq!(set.whitelist, vec!["styles/plain.css", "styles/plain.css.map"]);
}

#[test]
fn extension_uses_final_segment() {
    assert_eq!(extension("app.min.js"), Some("js"));
    assert_eq!(entry_name("app.min.js"), "app.min");
    assert_eq!(entry_name("./js/app.min.js"), "js/app.min");
}

#[test]
fn entry_name_strips_suffix_not_first_occurrence() {
    // A directory named like the extension must survive.
    assert_eq!(entry_name("js/js.js"), "js/js");
    assert_eq!(entry_name("css.css/css.css"), "css.css/css");
}

#[test]
fn css_candidates_replace_suffix_only() {
    let common = find_common_files(
        &files(&["css/site.scss"]),
        &files(&["css/site.css"]),
    );
    assert_eq!(common, vec!["css/site.scss"]);
}

#[test]
fn extension_ignores_dots_in_directories_and_leading_dots() {
    assert_eq!(extension("v1.2/README"), None);
    assert_eq!(extension(".babelrc"), None);
    assert_eq!(entry_name("v1.2/README"), "v1.2/README");
}

#[test]
fn whitelist_follows_sorted_intersection_order() {
    let set = EntrySet::from_file_sets(
        Path::new("/src"),
        &files(&["z.js", "a.js", "m/b.scss"]),
        &files(&["m/b.css", "z.js", "a.js"]),
    );

    assert_eq!(
        set.whitelist,
        vec!["a.js", "a.js.map", "m/b.css", "m/b.css.map", "z.js", "z.js.map"]
    );
}

#[test]
fn colliding_names_keep_last_entry_and_single_output() {
    let set = EntrySet::from_file_sets(
        Path::new("/src"),
        &files(&["styles/app.sass", "styles/app.scss"]),
        &files(&["styles/app.css"]),
    );

    assert_eq!(set.len(), 1);
    assert_eq!(set.entries["styles/app"], PathBuf::from("/src/styles/app.scss"));
    assert_eq!(set.whitelist, vec!["styles/app.css", "styles/app.css.map"]);
}

#[test]
fn resolve_entries_walks_both_folders() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("assets");
    let build = dir.path().join("public");
    touch(&src, "js/app.js");
    touch(&src, "js/draft.js");
    touch(&src, "styles/app.scss");
    touch(&build, "js/app.js");
    touch(&build, "styles/app.css");
    touch(&build, "css/unused.css");

    let set = resolve_entries(&src, &build).unwrap();

    assert_eq!(set.len(), 2);
    assert_eq!(set.entries["js/app"], src.join("js/app.js"));
    assert_eq!(set.entries["styles/app"], src.join("styles/app.scss"));
    assert_eq!(
        set.whitelist,
        vec![
            "js/app.js",
            "js/app.js.map",
            "styles/app.css",
            "styles/app.css.map"
        ]
    );
}

#[test]
fn resolve_entries_is_idempotent() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    let build = dir.path().join("build");
    for f in ["b.js", "a.js", "c/d.scss"] {
        touch(&src, f);
    }
    for f in ["a.js", "c/d.css", "b.js"] {
        touch(&build, f);
    }

    let first = resolve_entries(&src, &build).unwrap();
    let second = resolve_entries(&src, &build).unwrap();

    assert_eq!(first, second);
}

#[test]
fn resolve_entries_fails_on_missing_build_folder() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    touch(&src, "a.js");
    let build = dir.path().join("missing");

    let err = resolve_entries(&src, &build).unwrap_err();
    assert!(
        matches!(err, crate::error::PackupError::DirectoryNotFound { ref path } if *path == build),
        "unexpected error: {err}"
    );
}
