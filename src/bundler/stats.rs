//! webpack `--json` stats
//!
//! Only the parts packup acts on are modelled. webpack 4 reports errors as
//! plain strings, webpack 5 as objects with a `message`; both are accepted.
//! webpack 5 nests source maps under their asset's `related` list.

use std::path::Path;

use serde::Deserialize;

use crate::error::{PackupError, PackupResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BuildStats {
    #[serde(default)]
    pub errors: Vec<StatsMessage>,
    #[serde(default)]
    pub warnings: Vec<StatsMessage>,
    #[serde(default)]
    pub assets: Vec<StatsAsset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StatsMessage {
    Text(String),
    Detailed {
        message: String,
        #[serde(default, rename = "moduleName")]
        module_name: Option<String>,
    },
}

impl StatsMessage {
    pub fn message(&self) -> &str {
        match self {
            StatsMessage::Text(text) => text,
            StatsMessage::Detailed { message, .. } => message,
        }
    }

    /// Message prefixed with the module it came from, when known
    pub fn render(&self) -> String {
        match self {
            StatsMessage::Detailed {
                message,
                module_name: Some(module),
            } => format!("{}\n{}", module, message),
            other => other.message().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatsAsset {
    pub name: String,
    #[serde(default)]
    pub related: Vec<StatsAsset>,
}

impl StatsAsset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            related: Vec::new(),
        }
    }
}

impl BuildStats {
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn from_file(path: &Path) -> PackupResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PackupError::InvalidStats {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&content).map_err(|e| PackupError::InvalidStats {
            file: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Only the first error is shown to keep the output readable
    pub fn first_error(&self) -> Option<String> {
        self.errors.first().map(StatsMessage::render)
    }

    /// Every asset of this compilation, related ones included.
    ///
    /// Assets webpack skipped writing because the file on disk was already
    /// identical (`emitted: false`) are still outputs of the build.
    pub fn asset_names(&self) -> Vec<String> {
        fn collect(assets: &[StatsAsset], names: &mut Vec<String>) {
            for asset in assets {
                if !names.contains(&asset.name) {
                    names.push(asset.name.clone());
                }
                collect(&asset.related, names);
            }
        }

        let mut names = Vec::new();
        collect(&self.assets, &mut names);
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_webpack5_stats() {
        let stats = BuildStats::from_json(
            r#"{
  "hash": "abc123",
  "time": 812,
  "errors": [],
  "warnings": [{"message": "size limit", "moduleName": "./js/app.js"}],
  "assets": [
    {"name": "js/app.js", "size": 1200, "emitted": true},
    {"name": "styles/app.js", "size": 10, "emitted": true},
    {"name": "old.js", "size": 10, "emitted": false}
  ],
  "modules": [{"id": 1}]
}"#,
        )
        .unwrap();

        assert!(!stats.has_errors());
        assert_eq!(stats.warnings.len(), 1);
        assert_eq!(
            stats.asset_names(),
            vec!["js/app.js", "styles/app.js", "old.js"]
        );
    }

    #[test]
    fn related_source_maps_are_listed() {
        let stats = BuildStats::from_json(
            r#"{"assets": [
  {"name": "js/app.js", "emitted": true, "related": [
    {"name": "js/app.js.map", "type": "sourceMap", "emitted": true}
  ]},
  {"name": "styles/app.css", "related": [{"name": "styles/app.css.map"}]}
]}"#,
        )
        .unwrap();

        assert_eq!(
            stats.asset_names(),
            vec![
                "js/app.js",
                "js/app.js.map",
                "styles/app.css",
                "styles/app.css.map"
            ]
        );
    }

    #[test]
    fn accepts_string_errors() {
        let stats = BuildStats::from_json(
            r#"{"errors": ["Module not found: ./missing", "second"], "assets": []}"#,
        )
        .unwrap();

        assert!(stats.has_errors());
        assert_eq!(stats.first_error().unwrap(), "Module not found: ./missing");
    }

    #[test]
    fn first_error_includes_module_name() {
        let stats = BuildStats::from_json(
            r#"{"errors": [{"message": "Unexpected token", "moduleName": "./js/app.js"}]}"#,
        )
        .unwrap();

        assert_eq!(stats.first_error().unwrap(), "./js/app.js\nUnexpected token");
    }

    #[test]
    fn stats_without_assets_list_nothing() {
        let stats = BuildStats::from_json(r#"{"errors": [], "warnings": []}"#).unwrap();
        assert!(stats.asset_names().is_empty());
    }

    #[test]
    fn from_file_reports_missing_stats() {
        let dir = tempfile::tempdir().unwrap();
        let err = BuildStats::from_file(&dir.path().join("stats.json")).unwrap_err();
        assert!(matches!(err, PackupError::InvalidStats { .. }));
    }
}
