//! Configuration file data structures

use serde::{Deserialize, Serialize};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".bundle-sizes.toml";

/// `.bundle-sizes.toml` structure
///
/// Every field is optional; unset fields fall back to documented defaults
/// when the file is resolved into a
/// [`TrackerConfig`](super::resolved::TrackerConfig).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigFile {
    /// Compression mode: "none", "gzip" or "brotli"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<String>,

    /// Legacy flag; `false` selects "none" unless brotli is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gzip: Option<bool>,

    /// Legacy flag; `true` selects "brotli"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brotli: Option<bool>,

    /// Include glob for tracked files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Exclude glob for tracked files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    /// History file, relative to the working directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Whether history is read from and written to disk
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_file: Option<bool>,

    /// Whether feeds are handed to a publisher
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish: Option<bool>,

    /// Directory for published JSON feeds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_dir: Option<String>,

    /// Minimum report column width
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_width: Option<usize>,

    /// Whether changed snapshots are recorded; defaults by build mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persist: Option<bool>,

    /// Append a source map comment to chunks before measuring
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_map: Option<bool>,
}

impl ConfigFile {
    /// Layer `overrides` on top of `self`; set fields in `overrides` win
    pub fn merge(self, overrides: ConfigFile) -> ConfigFile {
        ConfigFile {
            compression: overrides.compression.or(self.compression),
            gzip: overrides.gzip.or(self.gzip),
            brotli: overrides.brotli.or(self.brotli),
            pattern: overrides.pattern.or(self.pattern),
            exclude: overrides.exclude.or(self.exclude),
            filename: overrides.filename.or(self.filename),
            write_file: overrides.write_file.or(self.write_file),
            publish: overrides.publish.or(self.publish),
            publish_dir: overrides.publish_dir.or(self.publish_dir),
            column_width: overrides.column_width.or(self.column_width),
            persist: overrides.persist.or(self.persist),
            source_map: overrides.source_map.or(self.source_map),
        }
    }

    /// Config with every default spelled out, as written by `init`
    pub fn documented_defaults() -> ConfigFile {
        ConfigFile {
            compression: Some("gzip".to_string()),
            gzip: None,
            brotli: None,
            pattern: Some(crate::filter::DEFAULT_PATTERN.to_string()),
            exclude: None,
            filename: Some(crate::history::DEFAULT_HISTORY_FILE.to_string()),
            write_file: Some(true),
            publish: Some(false),
            publish_dir: None,
            column_width: Some(crate::report::DEFAULT_COLUMN_WIDTH),
            persist: None,
            source_map: Some(false),
        }
    }
}
