//! History persistence
//!
//! History lives in a single JSON file holding an array of snapshots, most
//! recent first. A missing, unreadable or malformed file reads as empty
//! history; reading never fails.

use super::snapshot::Snapshot;
use crate::diff::SizeMap;
use crate::infra::{FileSystem, RealFileSystem};
use anyhow::{Context, Result};
use log::{debug, warn};
use std::io;
use std::path::{Path, PathBuf};

/// Default history file name, resolved against the working directory
pub const DEFAULT_HISTORY_FILE: &str = "size-plugin.json";

/// Reads and appends snapshots at one location
#[derive(Debug, Clone)]
pub struct HistoryStore<FS: FileSystem = RealFileSystem> {
    path: PathBuf,
    fs: FS,
}

impl HistoryStore<RealFileSystem> {
    /// Store backed by the real filesystem
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_fs(path, RealFileSystem)
    }
}

impl<FS: FileSystem> HistoryStore<FS> {
    /// Store with a custom filesystem implementation
    pub fn with_fs(path: impl Into<PathBuf>, fs: FS) -> Self {
        Self {
            path: path.into(),
            fs,
        }
    }

    /// History file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all snapshots, newest first
    ///
    /// Snapshots with equal timestamps keep their stored order.
    pub fn read(&self) -> Vec<Snapshot> {
        let contents = match self.fs.read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No size history at {}", self.path.display());
                return Vec::new();
            }
            Err(e) => {
                warn!(
                    "Ignoring unreadable size history {}: {}",
                    self.path.display(),
                    e
                );
                return Vec::new();
            }
        };

        let mut snapshots: Vec<Snapshot> = match serde_json::from_str(&contents) {
            Ok(snapshots) => snapshots,
            Err(e) => {
                warn!(
                    "Ignoring malformed size history {}: {}",
                    self.path.display(),
                    e
                );
                return Vec::new();
            }
        };

        snapshots.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        snapshots
    }

    /// Prepend a snapshot and persist the whole history
    ///
    /// Returns the history as written.
    pub fn write(&self, snapshot: &Snapshot) -> Result<Vec<Snapshot>> {
        let mut snapshots = self.read();
        snapshots.insert(0, snapshot.clone());
        self.save(&snapshots)?;
        Ok(snapshots)
    }

    /// Replace the stored history, creating parent directories as needed
    pub fn save(&self, snapshots: &[Snapshot]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.fs
                .create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(snapshots).context("Failed to serialize size history")?;

        self.fs
            .write(&self.path, contents)
            .with_context(|| format!("Failed to write size history {}", self.path.display()))?;

        debug!(
            "Saved {} snapshot(s) to {}",
            snapshots.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Sizes from the most recent snapshot; empty without history
pub fn baseline_from(snapshots: &[Snapshot]) -> SizeMap {
    snapshots
        .first()
        .map(|latest| {
            latest
                .files
                .iter()
                .map(|f| (f.filename.as_str(), f.size))
                .collect()
        })
        .unwrap_or_default()
}
