//! Launcher configuration.
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`LibraryConfig`] | Range of engine task and mapper ids reserved for one library. |
//! | [`LauncherOptions`] | Mapper and tag applied to every launch built by a launcher. |
//!
//! Both types are plain serde structures. [`LibraryConfig::from_json_str`]
//! validates the ranges after parsing so that id translation can never
//! overflow.

mod library;
mod options;

pub use library::{ConfigError, LibraryConfig};
pub use options::LauncherOptions;
