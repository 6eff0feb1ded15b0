//! packup - webpack driver for server-rendered sites
//!
//! packup works out which files under a project's source folder should be
//! bundled by comparing them with the files already present in the build
//! folder, generates a webpack config for them, runs webpack in watch or
//! production mode and uploads the results to a development server over
//! SFTP/SCP.

pub mod bundler;
pub mod config;
pub mod error;
pub mod fs;
pub mod installer;
pub mod notifier;
pub mod package_json;
pub mod resolver;
pub mod session;
pub mod shell;
pub mod transport;
pub mod watcher;

// Re-exports for convenience
pub use bundler::{BuildStats, Bundler, Mode, Webpack, WebpackConfig};
pub use config::{ProjectConfig, ProjectPaths};
pub use error::{PackupError, PackupResult};
pub use resolver::{resolve_entries, EntrySet};
pub use session::{BuildOutcome, BuildSession, BuildSummary};
pub use transport::{ScpTransport, SftpSettings, Transport, UploadReport};
pub use watcher::{build_once, watch, WatchEvent, WatchExit};
