//! Publication of size feeds
//!
//! A [`Publisher`] receives the full history ("sizes" feed) and the newest
//! snapshot ("diff" feed). Publication is best effort: the tracker logs
//! failures and carries on.

use crate::history::Snapshot;
use crate::infra::{FileSystem, RealFileSystem};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Sink for size feeds
pub trait Publisher: Send + Sync {
    /// Publish the full history, newest first
    fn publish_sizes(&self, history: &[Snapshot], label: &str) -> Result<()>;

    /// Publish a single build's snapshot
    fn publish_diff(&self, snapshot: &Snapshot, label: &str) -> Result<()>;
}

/// Writes feeds as JSON files into a directory
///
/// `label` is the history file name; feeds land in `<label>.sizes.json` and
/// `<label>.diff.json`.
#[derive(Debug, Clone)]
pub struct JsonFilePublisher<FS: FileSystem = RealFileSystem> {
    dir: PathBuf,
    fs: FS,
}

impl JsonFilePublisher<RealFileSystem> {
    /// Publisher writing to the real filesystem
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_fs(dir, RealFileSystem)
    }
}

impl<FS: FileSystem> JsonFilePublisher<FS> {
    /// Publisher with a custom filesystem implementation
    pub fn with_fs(dir: impl Into<PathBuf>, fs: FS) -> Self {
        Self {
            dir: dir.into(),
            fs,
        }
    }

    fn feed_path(&self, label: &str, feed: &str) -> PathBuf {
        let stem = label.trim_end_matches(".json").replace(['/', '\\'], "_");
        self.dir.join(format!("{}.{}.json", stem, feed))
    }

    fn write_feed(&self, path: PathBuf, value: &impl serde::Serialize) -> Result<()> {
        self.fs
            .create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        let contents = serde_json::to_string_pretty(value).context("Failed to serialize feed")?;
        self.fs
            .write(&path, contents)
            .with_context(|| format!("Failed to publish {}", path.display()))
    }
}

impl<FS: FileSystem + Send + Sync> Publisher for JsonFilePublisher<FS> {
    fn publish_sizes(&self, history: &[Snapshot], label: &str) -> Result<()> {
        self.write_feed(self.feed_path(label, "sizes"), &history)
    }

    fn publish_diff(&self, snapshot: &Snapshot, label: &str) -> Result<()> {
        self.write_feed(self.feed_path(label, "diff"), snapshot)
    }
}
