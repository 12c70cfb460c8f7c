//! Snapshot diffing
//!
//! Merges a baseline (previous sizes) with the sizes measured in the current
//! build into one [`Snapshot`]. The filename universe is the union of both
//! sides in encounter order: baseline names first, then names that only
//! exist in the current build. Files missing on either side count as 0.

use crate::history::{FileRecord, Snapshot};
use std::collections::HashMap;

/// Filename to size mapping that remembers insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeMap {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl SizeMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a size; updates keep the original position
    pub fn insert(&mut self, filename: impl Into<String>, size: u64) {
        let filename = filename.into();
        match self.index.get(&filename) {
            Some(&i) => self.entries[i].1 = size,
            None => {
                self.index.insert(filename.clone(), self.entries.len());
                self.entries.push((filename, size));
            }
        }
    }

    /// Size recorded for a filename
    pub fn get(&self, filename: &str) -> Option<u64> {
        self.index.get(filename).map(|&i| self.entries[i].1)
    }

    /// Whether the filename is present
    pub fn contains(&self, filename: &str) -> bool {
        self.index.contains_key(filename)
    }

    /// Filenames in insertion order
    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(name, size)| (name.as_str(), *size))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for SizeMap {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, size) in iter {
            map.insert(name, size);
        }
        map
    }
}

/// Diff current sizes against a baseline, stamped with the current time
///
/// ```
/// use bundle_sizes::diff::{diff, SizeMap};
///
/// let baseline: SizeMap = [("main.js", 1_000), ("old.js", 200)].into_iter().collect();
/// let current: SizeMap = [("main.js", 1_100), ("new.js", 50)].into_iter().collect();
///
/// let snapshot = diff(&baseline, &current);
/// let names: Vec<_> = snapshot.files.iter().map(|f| f.filename.as_str()).collect();
/// assert_eq!(names, ["main.js", "old.js", "new.js"]);
/// assert_eq!(snapshot.get("old.js").unwrap().delta, -200);
/// ```
pub fn diff(baseline: &SizeMap, current: &SizeMap) -> Snapshot {
    Snapshot::now(diff_records(baseline, current))
}

/// Per-file records for a baseline/current pair
pub fn diff_records(baseline: &SizeMap, current: &SizeMap) -> Vec<FileRecord> {
    let universe = baseline
        .filenames()
        .chain(current.filenames().filter(|name| !baseline.contains(name)));

    universe
        .map(|name| {
            FileRecord::new(
                name,
                baseline.get(name).unwrap_or(0),
                current.get(name).unwrap_or(0),
            )
        })
        .collect()
}
