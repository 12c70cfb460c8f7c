//! Snapshot records as stored in history

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Size of one tracked file in one build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Output path relative to the build root
    pub filename: String,
    /// Size in the baseline (0 for a new file)
    #[serde(rename = "previous")]
    pub previous_size: u64,
    /// Size in this build (0 for a removed file)
    pub size: u64,
    /// `size - previous_size`
    #[serde(rename = "diff")]
    pub delta: i64,
}

impl FileRecord {
    /// Build a record, deriving the delta
    pub fn new(filename: impl Into<String>, previous_size: u64, size: u64) -> Self {
        Self {
            filename: filename.into(),
            previous_size,
            size,
            delta: size as i64 - previous_size as i64,
        }
    }

    /// Present now, absent from the baseline
    pub fn is_new(&self) -> bool {
        self.previous_size == 0 && self.size > 0
    }

    /// Present in the baseline, absent now
    pub fn is_removed(&self) -> bool {
        self.size == 0 && self.previous_size > 0
    }
}

/// One build's measurements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
    /// Records in baseline-then-current order, unique by filename
    pub files: Vec<FileRecord>,
}

impl Snapshot {
    /// Create a snapshot stamped with the current time
    pub fn now(files: Vec<FileRecord>) -> Self {
        Self {
            timestamp: current_timestamp_millis(),
            files,
        }
    }

    /// Whether any file changed size
    ///
    /// Snapshots without changes are never persisted.
    pub fn has_changes(&self) -> bool {
        self.files.iter().any(|f| f.delta != 0)
    }

    /// Look up a record by filename
    pub fn get(&self, filename: &str) -> Option<&FileRecord> {
        self.files.iter().find(|f| f.filename == filename)
    }

    /// Sum of current sizes
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    /// Sum of deltas
    pub fn total_delta(&self) -> i64 {
        self.files.iter().map(|f| f.delta).sum()
    }
}

/// Current time in milliseconds since the Unix epoch
pub fn current_timestamp_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
