//! Shared formatting utilities for size display

use console::Emoji;

/// Chart emoji for report headers
pub const CHART: Emoji = Emoji("📊", "~");

/// Checkmark emoji for success messages
pub const CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// Info emoji for informational messages
pub const INFO: Emoji = Emoji("ℹ️", "i");

/// Sparkles emoji for created files
pub const SPARKLES: Emoji = Emoji("✨", "*");

const UNITS: [&str; 5] = ["B", "kB", "MB", "GB", "TB"];

/// Format bytes as a human-readable size string
///
/// Uses decimal (SI) units and three significant digits, dropping
/// trailing zeros.
///
/// # Examples
///
/// ```
/// use bundle_sizes::fmt::format_bytes;
///
/// assert_eq!(format_bytes(0), "0 B");
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(1_500), "1.5 kB");
/// assert_eq!(format_bytes(12_345), "12.3 kB");
/// assert_eq!(format_bytes(2_000_000), "2 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1000.0 && unit < UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }

    format!("{} {}", three_significant(value), UNITS[unit])
}

/// Format a signed byte delta, always carrying its sign
///
/// ```
/// use bundle_sizes::fmt::format_delta;
///
/// assert_eq!(format_delta(2_048), "+2.05 kB");
/// assert_eq!(format_delta(-300), "-300 B");
/// ```
pub fn format_delta(delta: i64) -> String {
    let sign = if delta < 0 { "-" } else { "+" };
    format!("{}{}", sign, format_bytes(delta.unsigned_abs()))
}

fn three_significant(value: f64) -> String {
    let decimals = if value >= 100.0 {
        0
    } else if value >= 10.0 {
        1
    } else {
        2
    };

    let text = format!("{:.*}", decimals, value);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}
