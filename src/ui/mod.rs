//! Terminal presentation
//!
//! Everything the binary prints goes through here: themed text for humans,
//! NDJSON for `--json`.

pub mod blocks;
pub mod context;
pub mod error;
pub mod json;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
pub mod widgets;
