//! Report command implementation
//!
//! Handles the `bundle-sizes report` command: measures a finished build
//! directory, prints the size report and records the snapshot.

use anyhow::{Context, Result};
use console::style;
use log::{debug, warn};
use std::env;
use std::path::{Path, PathBuf};

use crate::config::{BuildMode, ConfigFile, ConfigLoader, TrackerConfig};
use crate::fmt::{format_bytes, format_delta, CHART, CHECKMARK};
use crate::history::Snapshot;
use crate::infra::RealFileSystem;
use crate::output::BuildOutput;
use crate::publish::JsonFilePublisher;
use crate::tracker::{BuildReport, SizeTracker};

/// Options for the report command
#[derive(Debug, Clone, Default)]
pub struct ReportArgs {
    /// Build output directory to measure
    pub output_dir: PathBuf,
    /// Previous build output, scanned only when there is no history
    pub previous_dir: Option<PathBuf>,
    /// Build mode name ("production" or "development")
    pub mode: String,
    /// Print the snapshot as JSON instead of the text report
    pub json: bool,
    /// Values that override `.bundle-sizes.toml`
    pub overrides: ConfigFile,
}

/// Measure a build directory and report size changes
///
/// # Examples
///
/// ```no_run
/// use bundle_sizes::cmd::report::{cmd_report, ReportArgs};
///
/// cmd_report(&ReportArgs {
///     output_dir: "dist".into(),
///     mode: "production".to_string(),
///     ..Default::default()
/// })?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the output
/// directory does not exist. Problems with individual files, the history
/// file or publishing are logged and do not fail the command.
pub fn cmd_report(args: &ReportArgs) -> Result<()> {
    let project_root = env::current_dir()?;
    let report = run_report(&project_root, args)?;
    present_report(&report, args.json)
}

/// Run the tracker for a project without printing anything
pub fn run_report(project_root: &Path, args: &ReportArgs) -> Result<BuildReport> {
    let config = resolve_config(project_root, args)?;
    debug!("Resolved config: {:?}", config);

    let output_dir = project_root.join(&args.output_dir);
    let output = BuildOutput::from_dir(&RealFileSystem, &output_dir)?;
    debug!("Build outputs: {:?}", output.names());
    let previous_dir = args.previous_dir.as_ref().map(|dir| project_root.join(dir));

    let mut tracker = SizeTracker::new(config.clone())?;
    if config.publish {
        match &config.publish_dir {
            Some(dir) => tracker = tracker.with_publisher(JsonFilePublisher::new(dir)),
            None => warn!("publish is enabled but no publish-dir is set; skipping feeds"),
        }
    }

    Ok(tracker.run(&output, previous_dir.as_deref())?)
}

fn resolve_config(project_root: &Path, args: &ReportArgs) -> Result<TrackerConfig> {
    let mode: BuildMode = args.mode.parse()?;
    let file = ConfigLoader::load(project_root)
        .context("Failed to load configuration")?
        .merge(args.overrides.clone());
    Ok(TrackerConfig::resolve(&file, mode, project_root)?)
}

fn present_report(report: &BuildReport, json_output: bool) -> Result<()> {
    if json_output {
        let json = serde_json::to_string_pretty(&report.snapshot)?;
        println!("{}", json);
        return Ok(());
    }

    if report.rendered.is_empty() {
        println!("{} No tracked files in this build", CHART);
        return Ok(());
    }

    println!("{}", report.rendered);

    if report.snapshot.files.len() > 1 {
        println!();
        println!(
            "   {} {} ({})",
            style("Total:").bold(),
            format_bytes(report.snapshot.total_size()),
            format_delta(report.snapshot.total_delta())
        );
    }

    if let Some(changes) = file_changes(&report.snapshot) {
        println!("   {}", style(changes).dim());
    }

    if report.persisted {
        println!("{} Recorded build in size history", CHECKMARK);
    }

    Ok(())
}

/// Count of files added and removed since the baseline, if any
fn file_changes(snapshot: &Snapshot) -> Option<String> {
    let added = snapshot.files.iter().filter(|f| f.is_new()).count();
    let removed = snapshot.files.iter().filter(|f| f.is_removed()).count();

    let parts: Vec<String> = [(added, "new"), (removed, "removed")]
        .into_iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, label)| {
            let noun = if count == 1 { "file" } else { "files" };
            format!("{} {} {}", count, label, noun)
        })
        .collect();

    (!parts.is_empty()).then(|| parts.join(", "))
}
