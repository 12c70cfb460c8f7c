//! Configuration for the size tracker
//!
//! This module provides:
//! - `.bundle-sizes.toml` file structure with optional fields
//! - Loading and saving of the config file
//! - Resolution into an immutable [`TrackerConfig`] per invocation

pub mod file;
pub mod loader;
pub mod resolved;

pub use file::{ConfigFile, CONFIG_FILE_NAME};
pub use loader::ConfigLoader;
pub use resolved::{BuildMode, TrackerConfig};
