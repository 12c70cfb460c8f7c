//! Resolved per-invocation configuration

use super::file::ConfigFile;
use crate::compression::Compression;
use crate::error::SizeError;
use crate::filter::{PatternFilter, DEFAULT_PATTERN};
use crate::history::DEFAULT_HISTORY_FILE;
use crate::report::DEFAULT_COLUMN_WIDTH;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Kind of build being measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    /// Release build; changed snapshots are recorded by default
    #[default]
    Production,
    /// Local/dev build; nothing is recorded unless asked
    Development,
}

impl BuildMode {
    /// Get the mode name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildMode {
    type Err = SizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" => Ok(Self::Development),
            other => Err(SizeError::InvalidConfig {
                reason: format!(
                    "unknown build mode '{}' (expected production or development)",
                    other
                ),
            }),
        }
    }
}

/// Immutable configuration for one tracker run
///
/// # Examples
///
/// ```
/// use bundle_sizes::config::{BuildMode, ConfigFile, TrackerConfig};
/// use bundle_sizes::compression::Compression;
/// use std::path::Path;
///
/// let file = ConfigFile { brotli: Some(true), ..Default::default() };
/// let config = TrackerConfig::resolve(&file, BuildMode::Development, Path::new("/work")).unwrap();
///
/// assert_eq!(config.compression, Compression::Brotli);
/// assert!(!config.persist);
/// assert_eq!(config.history_file, Path::new("/work/size-plugin.json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Compression used for measuring
    pub compression: Compression,
    /// Include glob
    pub pattern: String,
    /// Exclude glob
    pub exclude: Option<String>,
    /// History file as configured; also the publication label
    pub filename: String,
    /// History file resolved against the working directory
    pub history_file: PathBuf,
    /// Read and write history on disk
    pub write_file: bool,
    /// Hand feeds to the publisher
    pub publish: bool,
    /// Directory for JSON feeds
    pub publish_dir: Option<PathBuf>,
    /// Minimum column width for single-record reports
    pub column_width: usize,
    /// Record snapshots that contain changes
    pub persist: bool,
    /// Append a source map comment to chunks before measuring
    pub source_map: bool,
}

impl TrackerConfig {
    /// Merge a config file over the defaults and validate it
    ///
    /// Glob patterns are compiled here so a bad pattern fails before any
    /// file is measured.
    pub fn resolve(file: &ConfigFile, mode: BuildMode, cwd: &Path) -> Result<Self, SizeError> {
        let compression = resolve_compression(file)?;
        if !compression.is_supported() {
            return Err(SizeError::UnsupportedCompression {
                mode: compression.as_str().to_string(),
            });
        }

        let filename = file
            .filename
            .clone()
            .unwrap_or_else(|| DEFAULT_HISTORY_FILE.to_string());
        if filename.trim().is_empty() {
            return Err(SizeError::InvalidConfig {
                reason: "filename must not be empty".to_string(),
            });
        }

        let config = Self {
            compression,
            pattern: file
                .pattern
                .clone()
                .unwrap_or_else(|| DEFAULT_PATTERN.to_string()),
            exclude: file.exclude.clone().filter(|e| !e.is_empty()),
            history_file: cwd.join(&filename),
            filename,
            write_file: file.write_file.unwrap_or(true),
            publish: file.publish.unwrap_or(false),
            publish_dir: file.publish_dir.as_ref().map(|dir| cwd.join(dir)),
            column_width: file.column_width.unwrap_or(DEFAULT_COLUMN_WIDTH),
            persist: file.persist.unwrap_or(mode == BuildMode::Production),
            source_map: file.source_map.unwrap_or(false),
        };

        config.filter()?;
        Ok(config)
    }

    /// Compile the include/exclude patterns
    pub fn filter(&self) -> Result<PatternFilter, SizeError> {
        PatternFilter::new(&self.pattern, self.exclude.as_deref())
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Gzip,
            pattern: DEFAULT_PATTERN.to_string(),
            exclude: None,
            filename: DEFAULT_HISTORY_FILE.to_string(),
            history_file: PathBuf::from(DEFAULT_HISTORY_FILE),
            write_file: true,
            publish: false,
            publish_dir: None,
            column_width: DEFAULT_COLUMN_WIDTH,
            persist: true,
            source_map: false,
        }
    }
}

/// Pick the compression mode; an explicit mode beats the legacy flags
fn resolve_compression(file: &ConfigFile) -> Result<Compression, SizeError> {
    if let Some(mode) = &file.compression {
        return mode.parse();
    }

    Ok(match (file.brotli, file.gzip) {
        (Some(true), _) => Compression::Brotli,
        (_, Some(false)) => Compression::None,
        _ => Compression::Gzip,
    })
}
