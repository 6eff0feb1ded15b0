//! Local file helpers shared by config persistence and change tracking

use std::io::Write;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::PackupResult;

/// Prefix used for content hashes
pub const HASH_PREFIX: &str = "sha256:";

/// Write content to a file atomically
///
/// Writes to a temp file in the same directory, then renames it over the
/// destination. Parent directories are created when missing.
pub fn atomic_write(path: &Path, content: &[u8]) -> PackupResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// SHA-256 of a byte slice, formatted as `sha256:<hex>`
pub fn hash_content(content: &[u8]) -> String {
    format!("{}{:x}", HASH_PREFIX, Sha256::digest(content))
}

/// SHA-256 of a file's content
pub fn hash_file(path: &Path) -> PackupResult<String> {
    let content = std::fs::read(path)?;
    Ok(hash_content(&content))
}
