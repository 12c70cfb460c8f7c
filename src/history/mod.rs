//! Persisted size history
//!
//! Provides:
//! - Snapshot and per-file record types in the on-disk JSON shape
//! - A store that reads history newest-first and prepends new snapshots
//! - Baseline extraction from the most recent snapshot

pub mod snapshot;
pub mod store;

pub use snapshot::{FileRecord, Snapshot};
pub use store::{baseline_from, HistoryStore, DEFAULT_HISTORY_FILE};
