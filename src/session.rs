//! One build session: resolve once, then build, filter and upload

use std::path::PathBuf;

use crate::bundler::{filter_outputs, Bundler, Mode, WebpackConfig};
use crate::config::ProjectPaths;
use crate::error::PackupResult;
use crate::resolver::{resolve_entries, EntrySet};
use crate::transport::{ChangeTracker, Transport, UploadReport};

/// Result of a single build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// webpack reported compilation errors; nothing was filtered or uploaded
    Failed {
        first_error: String,
        error_count: usize,
    },
    Built(BuildSummary),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Whitelisted outputs of this build
    pub kept: Vec<String>,
    /// Non-whitelisted outputs deleted after the build
    pub removed: Vec<String>,
    /// `None` when uploads are disabled
    pub uploaded: Option<UploadReport>,
}

impl BuildSummary {
    pub fn uploaded_count(&self) -> usize {
        self.uploaded.as_ref().map_or(0, |r| r.uploaded.len())
    }
}

/// Entries are resolved once when the session is created; files added
/// later are not picked up until the next session.
pub struct BuildSession<B: Bundler> {
    bundler: B,
    paths: ProjectPaths,
    mode: Mode,
    entries: EntrySet,
    transport: Option<Box<dyn Transport>>,
    tracker: ChangeTracker,
}

impl<B: Bundler> BuildSession<B> {
    /// Resolve entries for `paths` and prepare a session
    pub fn new(bundler: B, paths: ProjectPaths, mode: Mode) -> PackupResult<Self> {
        let entries = resolve_entries(&paths.src, &paths.build)?;
        Ok(Self::with_entries(bundler, paths, mode, entries))
    }

    pub fn with_entries(bundler: B, paths: ProjectPaths, mode: Mode, entries: EntrySet) -> Self {
        Self {
            bundler,
            paths,
            mode,
            entries,
            transport: None,
            tracker: ChangeTracker::new(),
        }
    }

    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn disable_uploads(&mut self) {
        self.transport = None;
    }

    pub fn uploads_enabled(&self) -> bool {
        self.transport.is_some()
    }

    pub fn entries(&self) -> &EntrySet {
        &self.entries
    }

    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn build(&mut self) -> PackupResult<BuildOutcome> {
        let config = WebpackConfig::new(self.mode, &self.paths, &self.entries);
        let stats = self.bundler.build(&config)?;

        if let Some(first_error) = stats.first_error() {
            return Ok(BuildOutcome::Failed {
                first_error,
                error_count: stats.errors.len(),
            });
        }

        let report = filter_outputs(&self.paths.build, &stats.asset_names(), &self.entries)?;
        let uploaded = self.upload(&report.kept);

        Ok(BuildOutcome::Built(BuildSummary {
            kept: report.kept,
            removed: report.removed,
            uploaded,
        }))
    }

    fn upload(&mut self, kept: &[String]) -> Option<UploadReport> {
        let transport = self.transport.as_ref()?;

        let names = match self.mode {
            Mode::Production => kept.to_vec(),
            Mode::Development => self.tracker.changed(&self.paths.build, kept),
        };
        if names.is_empty() {
            return Some(UploadReport::default());
        }

        let files: Vec<PathBuf> = names.iter().map(|n| self.paths.build.join(n)).collect();
        let report = transport.upload(&files);

        // Outputs that didn't make it are retried after the next build.
        if !report.is_success() {
            for (name, file) in names.iter().zip(&files) {
                if !report.uploaded.contains(file) {
                    self.tracker.forget(name);
                }
            }
        }

        Some(report)
    }
}
