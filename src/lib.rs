#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! bundle-sizes library
//!
//! Measures the compressed size of a bundler's output files, compares them
//! with the previous build and keeps a newest-first history of changes.
//! It can be used programmatically in addition to the CLI interface.
//!
//! # Basic Example
//!
//! Diffing two sets of sizes:
//!
//! ```
//! use bundle_sizes::diff::{diff, SizeMap};
//!
//! let before: SizeMap = [("main.js", 1_000), ("old.js", 300)].into_iter().collect();
//! let after: SizeMap = [("main.js", 1_200), ("new.js", 50)].into_iter().collect();
//!
//! let snapshot = diff(&before, &after);
//! let deltas: Vec<_> = snapshot.files.iter().map(|f| (f.filename.as_str(), f.delta)).collect();
//! assert_eq!(deltas, vec![("main.js", 200), ("old.js", -300), ("new.js", 50)]);
//! ```
//!
//! # Advanced Example: Tracking a Build
//!
//! ```
//! use bundle_sizes::compression::Compression;
//! use bundle_sizes::config::TrackerConfig;
//! use bundle_sizes::output::{BuildOutput, OutputFile};
//! use bundle_sizes::tracker::SizeTracker;
//! use tempfile::TempDir;
//!
//! let workspace = TempDir::new().unwrap();
//! let config = TrackerConfig {
//!     compression: Compression::None,
//!     history_file: workspace.path().join("size-plugin.json"),
//!     ..TrackerConfig::default()
//! };
//!
//! let tracker = SizeTracker::new(config).unwrap();
//! let output = BuildOutput::new(vec![
//!     OutputFile::chunk("main.js", "console.log('hi')"),
//!     OutputFile::asset("logo.png", vec![0u8; 32]),
//! ]);
//!
//! let report = tracker.run(&output, None).unwrap();
//! assert_eq!(report.snapshot.files.len(), 1);
//! assert!(report.persisted);
//! ```

/// Command handlers for CLI operations
pub mod cmd;
/// Size estimation under a compression mode
pub mod compression;
/// Configuration file loading and resolution
pub mod config;
/// Snapshot diffing
pub mod diff;
/// Enhanced error types with contextual suggestions
pub mod error;
/// Include/exclude glob filtering
pub mod filter;
/// Shared formatting utilities
pub mod fmt;
/// Size history snapshots and persistence
pub mod history;
/// Infrastructure traits for filesystem access
pub mod infra;
/// Build output descriptions
pub mod output;
/// Publication of size feeds
pub mod publish;
/// Text report rendering
pub mod report;
/// Per-build size tracking
pub mod tracker;
