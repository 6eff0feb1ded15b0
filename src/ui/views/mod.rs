pub mod build;
pub mod entries;
pub mod setup;
pub mod watch;
