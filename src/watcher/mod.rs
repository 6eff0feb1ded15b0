//! Development watch loop
//!
//! Rebuilds whenever something under the source folder changes:
//! - Debouncing (100ms)
//! - Content-hash filtering of editor save noise
//! - Graceful Ctrl+C shutdown
//! - NDJSON output for CI

mod event;
mod run;
#[cfg(test)]
mod tests;

pub use event::{WatchEvent, WatchExit, DEBOUNCE_MS};
pub use run::{build_once, watch};
