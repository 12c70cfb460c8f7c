//! History command implementation
//!
//! Handles the `bundle-sizes history` command which lists recorded
//! snapshots, newest first.

use anyhow::{Context, Result};
use console::style;
use std::env;
use std::path::Path;

use crate::config::{BuildMode, ConfigLoader, TrackerConfig};
use crate::fmt::{format_bytes, format_delta, CHART, INFO};
use crate::history::{HistoryStore, Snapshot};

/// Show recorded size history
///
/// # Examples
///
/// ```no_run
/// use bundle_sizes::cmd::history::cmd_history;
///
/// // Last five builds as text
/// cmd_history(None, Some(5), false)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_history(history_file: Option<&str>, limit: Option<usize>, json: bool) -> Result<()> {
    let project_root = env::current_dir()?;
    let snapshots = load_history(&project_root, history_file, limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
        return Ok(());
    }

    if snapshots.is_empty() {
        println!("{} No size history recorded yet", INFO);
        return Ok(());
    }

    println!("{} {} Size History", CHART, style("bundle-sizes").bold());
    println!();
    for line in summary_lines(&snapshots) {
        println!("   {}", line);
    }

    Ok(())
}

/// Read history for a project, truncated to `limit` entries
pub fn load_history(
    project_root: &Path,
    history_file: Option<&str>,
    limit: Option<usize>,
) -> Result<Vec<Snapshot>> {
    let mut file = ConfigLoader::load(project_root).context("Failed to load configuration")?;
    if let Some(name) = history_file {
        file.filename = Some(name.to_string());
    }
    let config = TrackerConfig::resolve(&file, BuildMode::Production, project_root)?;

    let mut snapshots = HistoryStore::new(&config.history_file).read();
    if let Some(limit) = limit {
        snapshots.truncate(limit);
    }
    Ok(snapshots)
}

/// One line per snapshot: timestamp, file count, total size and delta
pub fn summary_lines(snapshots: &[Snapshot]) -> Vec<String> {
    snapshots
        .iter()
        .map(|snapshot| {
            format!(
                "{}  {:>3} files  {:>9}  ({})",
                snapshot.timestamp,
                snapshot.files.len(),
                format_bytes(snapshot.total_size()),
                format_delta(snapshot.total_delta())
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::FileRecord;
    use std::fs;
    use tempfile::TempDir;

    fn snapshot(timestamp: u64, size: u64) -> Snapshot {
        Snapshot {
            timestamp,
            files: vec![FileRecord::new("main.js", 1_000, size)],
        }
    }

    #[test]
    fn test_load_history_applies_limit() {
        let temp_dir = TempDir::new().unwrap();
        let store = HistoryStore::new(temp_dir.path().join("size-plugin.json"));
        store
            .save(&[snapshot(3, 1_200), snapshot(2, 1_100), snapshot(1, 1_000)])
            .unwrap();

        let all = load_history(temp_dir.path(), None, None).unwrap();
        assert_eq!(all.len(), 3);

        let recent = load_history(temp_dir.path(), None, Some(2)).unwrap();
        assert_eq!(
            recent.iter().map(|s| s.timestamp).collect::<Vec<_>>(),
            vec![3, 2]
        );
    }

    #[test]
    fn test_load_history_with_custom_file() {
        let temp_dir = TempDir::new().unwrap();
        HistoryStore::new(temp_dir.path().join("ci/sizes.json"))
            .save(&[snapshot(1, 10)])
            .unwrap();

        assert!(load_history(temp_dir.path(), None, None)
            .unwrap()
            .is_empty());
        assert_eq!(
            load_history(temp_dir.path(), Some("ci/sizes.json"), None)
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_load_history_tolerates_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("size-plugin.json"), "{ not json").unwrap();

        assert!(load_history(temp_dir.path(), None, None)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_summary_lines_show_totals() {
        let lines = summary_lines(&[snapshot(42, 1_500)]);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("42"));
        assert!(lines[0].contains("1.5 kB"));
        assert!(lines[0].contains("+500 B"));
    }
}
