//! Size report rendering
//!
//! Each record becomes one line: the filename padded to a common column,
//! the compressed size, and a signed delta when it is more than a byte.
//! Severity buckets are computed separately from styling so other renderers
//! (JSON, HTML) can reuse them.

use crate::fmt::{format_bytes, format_delta};
use crate::history::FileRecord;
use console::{style, Color};

/// Minimum column width applied to single-record reports
pub const DEFAULT_COLUMN_WIDTH: usize = 20;

/// Severity of an absolute size
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SizeTier {
    /// At most 20 KiB
    Small,
    /// Over 20 KiB
    Medium,
    /// Over 40 KiB
    Large,
    /// Over 100 KiB
    Critical,
}

impl SizeTier {
    /// Bucket for a size in bytes
    pub fn of(size: u64) -> Self {
        const KIB: u64 = 1024;
        if size > 100 * KIB {
            Self::Critical
        } else if size > 40 * KIB {
            Self::Large
        } else if size > 20 * KIB {
            Self::Medium
        } else {
            Self::Small
        }
    }

    fn color(&self) -> Color {
        match self {
            Self::Critical => Color::Red,
            Self::Large => Color::Yellow,
            Self::Medium => Color::Cyan,
            Self::Small => Color::Green,
        }
    }
}

/// How a delta is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaKind {
    /// |delta| <= 1 byte, not shown
    Noise,
    /// Shown without emphasis
    Neutral,
    /// Grew by more than 1 KiB
    Growth,
    /// Shrank by more than 10 bytes
    Improvement,
}

impl DeltaKind {
    /// Classify a delta in bytes
    pub fn of(delta: i64) -> Self {
        if delta.unsigned_abs() <= 1 {
            Self::Noise
        } else if delta > 1024 {
            Self::Growth
        } else if delta < -10 {
            Self::Improvement
        } else {
            Self::Neutral
        }
    }
}

/// Renders records into an aligned text report
#[derive(Debug, Clone)]
pub struct ReportFormatter {
    column_width: usize,
    colored: bool,
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMN_WIDTH)
    }
}

impl ReportFormatter {
    /// Formatter with a minimum column width, colored when the terminal allows
    pub fn new(column_width: usize) -> Self {
        Self {
            column_width,
            colored: console::colors_enabled(),
        }
    }

    /// Force styling on or off
    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Render records, one line each
    ///
    /// Returns an empty string for no records. A single-record report has
    /// its trailing newline trimmed.
    ///
    /// ```
    /// use bundle_sizes::history::FileRecord;
    /// use bundle_sizes::report::ReportFormatter;
    ///
    /// let formatter = ReportFormatter::new(0).colored(false);
    /// let text = formatter.render(&[
    ///     FileRecord::new("main.js", 1_000, 1_500),
    ///     FileRecord::new("a.css", 300, 300),
    /// ]);
    /// assert_eq!(text, "main.js ⏤  1.5 kB (+500 B)\na.css   ⏤  300 B\n");
    /// ```
    pub fn render(&self, records: &[FileRecord]) -> String {
        if records.is_empty() {
            return String::new();
        }

        let mut width = records
            .iter()
            .map(|r| r.filename.chars().count())
            .max()
            .unwrap_or(0);
        if records.len() == 1 {
            width = width.max(self.column_width);
        }

        let mut output = String::new();
        for record in records {
            output.push_str(&self.render_line(record, width));
            output.push('\n');
        }

        if records.len() == 1 {
            output.truncate(output.trim_end().len());
        }
        output
    }

    fn render_line(&self, record: &FileRecord, width: usize) -> String {
        let tier = SizeTier::of(record.size);
        let kind = DeltaKind::of(record.delta);

        let mut size_text = style(format_bytes(record.size))
            .fg(tier.color())
            .force_styling(self.colored);
        if kind == DeltaKind::Growth {
            size_text = size_text.bold();
        }

        let padding = width.saturating_sub(record.filename.chars().count());
        let mut line = format!(
            "{}{} ⏤  {}",
            record.filename,
            " ".repeat(padding),
            size_text
        );

        if kind != DeltaKind::Noise {
            let delta_text = style(format_delta(record.delta)).force_styling(self.colored);
            let delta_text = match kind {
                DeltaKind::Growth => delta_text.red(),
                DeltaKind::Improvement => delta_text.green(),
                _ => delta_text,
            };
            line.push_str(&format!(" ({})", delta_text));
        }

        line
    }
}
