//! Per-build size tracking
//!
//! Coordinates one build pass:
//! 1. Baseline from the latest history snapshot, or a cold-start scan
//! 2. Filter and measure the new outputs in parallel
//! 3. Diff, render, and hand the snapshot to the save hook
//! 4. Record the snapshot when it contains changes
//! 5. Publish the sizes and diff feeds
//!
//! Only configuration errors leave [`SizeTracker::run`]. Unreadable files,
//! history problems, failed writes and publisher errors are logged and
//! absorbed so a broken size report never fails a build.

use crate::compression::{measure_file, SizeEstimator};
use crate::config::TrackerConfig;
use crate::diff::{diff, SizeMap};
use crate::error::SizeError;
use crate::filter::PatternFilter;
use crate::history::{baseline_from, HistoryStore, Snapshot};
use crate::infra::{FileSystem, RealFileSystem};
use crate::output::{list_files, BuildOutput, OutputFile, OutputSource};
use crate::publish::Publisher;
use crate::report::ReportFormatter;
use anyhow::Result;
use log::{debug, error, warn};
use rayon::prelude::*;
use std::io::{self, Read};
use std::path::Path;

/// Caller-supplied side effect run for every new snapshot
pub type SaveHook = Box<dyn Fn(&Snapshot) -> Result<()> + Send + Sync>;

/// Outcome of one tracked build
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Per-file sizes and deltas for this build
    pub snapshot: Snapshot,
    /// History after this build, newest first
    pub history: Vec<Snapshot>,
    /// Rendered report; empty means print nothing
    pub rendered: String,
    /// Whether the snapshot was written to the history file
    pub persisted: bool,
}

/// Measures build outputs and maintains size history
pub struct SizeTracker<FS: FileSystem = RealFileSystem> {
    config: TrackerConfig,
    filter: PatternFilter,
    estimator: Box<dyn SizeEstimator>,
    store: HistoryStore<FS>,
    fs: FS,
    formatter: ReportFormatter,
    publisher: Option<Box<dyn Publisher>>,
    save_hook: Option<SaveHook>,
}

impl SizeTracker<RealFileSystem> {
    /// Tracker using the real filesystem
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bundle_sizes::config::TrackerConfig;
    /// use bundle_sizes::output::{BuildOutput, OutputFile};
    /// use bundle_sizes::tracker::SizeTracker;
    ///
    /// let tracker = SizeTracker::new(TrackerConfig::default())?;
    /// let output = BuildOutput::new(vec![OutputFile::chunk("main.js", "console.log(1)")]);
    /// let report = tracker.run(&output, None)?;
    /// if !report.rendered.is_empty() {
    ///     println!("{}", report.rendered);
    /// }
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn new(config: TrackerConfig) -> Result<Self, SizeError> {
        Self::with_fs(config, RealFileSystem)
    }
}

impl<FS: FileSystem + Clone + Sync> SizeTracker<FS> {
    /// Tracker with a custom filesystem implementation
    pub fn with_fs(config: TrackerConfig, fs: FS) -> Result<Self, SizeError> {
        let filter = config.filter()?;
        let estimator = config.compression.estimator()?;
        let store = HistoryStore::with_fs(config.history_file.clone(), fs.clone());
        let formatter = ReportFormatter::new(config.column_width);

        Ok(Self {
            config,
            filter,
            estimator,
            store,
            fs,
            formatter,
            publisher: None,
            save_hook: None,
        })
    }

    /// Attach a publisher; used only when `publish` is enabled
    pub fn with_publisher(mut self, publisher: impl Publisher + 'static) -> Self {
        self.publisher = Some(Box::new(publisher));
        self
    }

    /// Run a hook for every new snapshot, before it is recorded
    pub fn with_save_hook(
        mut self,
        hook: impl Fn(&Snapshot) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.save_hook = Some(Box::new(hook));
        self
    }

    /// Replace the report formatter
    pub fn with_formatter(mut self, formatter: ReportFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Configuration in use
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Stored history, newest first; empty when history is disabled
    pub fn load_history(&self) -> Vec<Snapshot> {
        if self.config.write_file {
            self.store.read()
        } else {
            Vec::new()
        }
    }

    /// Sizes the current build is compared against
    ///
    /// Uses the latest stored snapshot; without history, measures whatever
    /// is in `previous_dir`.
    pub fn load_baseline(&self, previous_dir: Option<&Path>) -> SizeMap {
        let history = self.load_history();
        if !history.is_empty() {
            return baseline_from(&history);
        }

        match previous_dir {
            Some(dir) => self.measure_dir(dir),
            None => SizeMap::new(),
        }
    }

    /// Measure tracked files already on disk
    ///
    /// A missing directory yields an empty map; unreadable files are left
    /// out.
    pub fn measure_dir(&self, dir: &Path) -> SizeMap {
        if !self.fs.metadata(dir).map(|m| m.is_dir()).unwrap_or(false) {
            debug!("No previous output at {}", dir.display());
            return SizeMap::new();
        }

        let mut names = match list_files(&self.fs, dir) {
            Ok(names) => names,
            Err(e) => {
                warn!("Could not scan {}: {}", dir.display(), e);
                return SizeMap::new();
            }
        };

        names.sort();

        let tracked = self.filter.filter(&names);
        let sizes: Vec<(String, Option<u64>)> = tracked
            .into_par_iter()
            .map(|name| {
                let size = measure_file(self.estimator.as_ref(), &self.fs, &dir.join(&name));
                let size = log_failure(&name, size);
                (name, size)
            })
            .collect();

        collect_sizes(sizes)
    }

    /// Measure the tracked files of a build
    ///
    /// When the build's only output is a chunk, that chunk is tracked by
    /// name regardless of the include pattern. Any other build keeps the
    /// configured pattern.
    pub fn measure_outputs(&self, output: &BuildOutput) -> Result<SizeMap, SizeError> {
        let filter = match output.single_chunk() {
            Some(chunk) => self.filter.for_single_chunk(&chunk.name)?,
            None => self.filter.clone(),
        };

        let tracked: Vec<&OutputFile> = output
            .files
            .iter()
            .filter(|file| filter.is_match(&file.name))
            .collect();

        let sizes: Vec<(String, Option<u64>)> = tracked
            .par_iter()
            .map(|file| {
                let size = log_failure(&file.name, self.measure_output(file));
                (file.name.clone(), size)
            })
            .collect();

        Ok(collect_sizes(sizes))
    }

    fn measure_output(&self, file: &OutputFile) -> io::Result<u64> {
        let comment = if self.config.source_map {
            file.source_map_comment()
        } else {
            None
        };

        match (&file.source, comment) {
            (OutputSource::Bytes(bytes), None) => self.estimator.measure(bytes),
            (OutputSource::Bytes(bytes), Some(comment)) => {
                let mut reader = bytes.as_slice().chain(comment.as_bytes());
                self.estimator.measure_stream(&mut reader)
            }
            (OutputSource::Path(path), None) => {
                measure_file(self.estimator.as_ref(), &self.fs, path)
            }
            (OutputSource::Path(path), Some(comment)) => {
                let mut reader = self.fs.open(path)?.chain(comment.as_bytes());
                self.estimator.measure_stream(&mut reader)
            }
        }
    }

    /// Track one build
    ///
    /// `previous_dir` is only scanned when no history exists.
    pub fn run(
        &self,
        output: &BuildOutput,
        previous_dir: Option<&Path>,
    ) -> Result<BuildReport, SizeError> {
        let baseline = self.load_baseline(previous_dir);
        let current = self.measure_outputs(output)?;

        let snapshot = diff(&baseline, &current);
        let rendered = self.formatter.render(&snapshot.files);

        if let Some(hook) = &self.save_hook {
            if let Err(e) = hook(&snapshot) {
                warn!("Save hook failed: {:#}", e);
            }
        }

        let (history, persisted) = self.record(&snapshot);
        self.publish(&history, &snapshot);

        Ok(BuildReport {
            snapshot,
            history,
            rendered,
            persisted,
        })
    }

    /// Prepend the snapshot when it should be kept; returns the history
    /// after this build and whether it reached disk
    fn record(&self, snapshot: &Snapshot) -> (Vec<Snapshot>, bool) {
        if !self.config.persist || !snapshot.has_changes() {
            debug!("Not recording snapshot (persist={})", self.config.persist);
            return (self.load_history(), false);
        }

        if !self.config.write_file {
            return (vec![snapshot.clone()], false);
        }

        match self.store.write(snapshot) {
            Ok(history) => (history, true),
            Err(e) => {
                error!("Could not record size history: {:#}", e);
                let mut history = self.store.read();
                history.insert(0, snapshot.clone());
                (history, false)
            }
        }
    }

    fn publish(&self, history: &[Snapshot], snapshot: &Snapshot) {
        if !self.config.publish {
            return;
        }
        let Some(publisher) = &self.publisher else {
            debug!("Publishing enabled but no publisher attached");
            return;
        };

        let label = &self.config.filename;
        if let Err(e) = publisher.publish_diff(snapshot, label) {
            error!("Could not publish size diff: {:#}", e);
        }
        if let Err(e) = publisher.publish_sizes(history, label) {
            error!("Could not publish size history: {:#}", e);
        }
    }
}

fn log_failure(name: &str, size: io::Result<u64>) -> Option<u64> {
    size.map_err(|e| warn!("Skipping {}: {}", name, e)).ok()
}

fn collect_sizes(sizes: Vec<(String, Option<u64>)>) -> SizeMap {
    sizes
        .into_iter()
        .filter_map(|(name, size)| size.map(|s| (name, s)))
        .collect()
}
