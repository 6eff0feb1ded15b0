//! `package.json` updates made by `packup init`

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{PackupError, PackupResult};

pub const PACKAGE_JSON: &str = "package.json";

/// npm script that starts packup
pub const START_SCRIPT: &str = "packup start";

/// Point `scripts.start` at packup and drop `scripts.test`.
///
/// Every other key keeps its position. A `scripts` value that isn't an
/// object is replaced.
pub fn apply_start_script(package: &mut Map<String, Value>) {
    let scripts = package
        .entry("scripts")
        .or_insert_with(|| Value::Object(Map::new()));
    if !scripts.is_object() {
        *scripts = Value::Object(Map::new());
    }

    if let Value::Object(scripts) = scripts {
        scripts.insert("start".to_string(), Value::String(START_SCRIPT.to_string()));
        scripts.shift_remove("test");
    }
}

/// Read (or start) `package.json` in `project_dir`, apply the start script
/// and write it back pretty-printed.
pub fn update_package_json(project_dir: &Path) -> PackupResult<PathBuf> {
    let path = project_dir.join(PACKAGE_JSON);

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };

    let mut package = if content.trim().is_empty() {
        Map::new()
    } else {
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                return Err(PackupError::InvalidConfig {
                    file: path,
                    message: "expected a JSON object".to_string(),
                })
            }
            Err(e) => {
                return Err(PackupError::InvalidConfig {
                    file: path,
                    message: e.to_string(),
                })
            }
        }
    };

    apply_start_script(&mut package);

    let mut out = serde_json::to_string_pretty(&Value::Object(package))?;
    out.push('\n');
    crate::fs::atomic_write(&path, out.as_bytes())?;
    Ok(path)
}
