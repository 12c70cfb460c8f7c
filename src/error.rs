//! Error types with contextual suggestions
//!
//! Only configuration-level problems are represented here as hard errors:
//! an unsupported or unknown compression mode, an unparsable glob, or an
//! invalid configuration file. Everything I/O-adjacent during a build
//! (unreadable outputs, corrupt history, failed writes) is absorbed and
//! logged by the tracker instead.
//!
//! # Examples
//!
//! ```
//! use bundle_sizes::error::SizeError;
//!
//! let err = SizeError::UnsupportedCompression {
//!     mode: "brotli".to_string(),
//! };
//! assert_eq!(err.exit_code(), 78);
//! assert!(err.suggestion().unwrap().contains("gzip"));
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the size tracker
#[derive(Error, Debug)]
pub enum SizeError {
    /// Compression mode is known but not available in this build
    #[error("Compression mode '{mode}' is not supported by this build")]
    UnsupportedCompression {
        /// Requested mode
        mode: String,
    },

    /// Compression mode name is not recognized
    #[error("Unknown compression mode: '{value}'")]
    InvalidCompression {
        /// Value that failed to parse
        value: String,
        /// Accepted values
        valid: Vec<String>,
    },

    /// Include or exclude glob could not be compiled
    #[error("Invalid glob pattern: '{pattern}'")]
    InvalidPattern {
        /// Offending pattern
        pattern: String,
        #[source]
        /// Glob parse error
        source: globset::Error,
    },

    /// Configuration values are inconsistent
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong
        reason: String,
    },

    /// Build output directory does not exist
    #[error("Build output not found: {path}")]
    OutputNotFound {
        /// Missing directory
        path: PathBuf,
    },

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },
}

impl SizeError {
    /// Get an actionable suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::UnsupportedCompression { mode } => Some(format!(
                "Rebuild with the '{}' feature enabled, or set compression = \"gzip\"",
                mode
            )),
            Self::InvalidCompression { valid, .. } => {
                Some(format!("Valid compression modes: {}", valid.join(", ")))
            }
            Self::InvalidPattern { pattern, .. } => Some(format!(
                "Check the glob syntax of '{}' (supported: *, **, ?, [..], {{a,b}})",
                pattern
            )),
            Self::InvalidConfig { .. } => {
                Some("Fix the value in .bundle-sizes.toml or on the command line".to_string())
            }
            Self::OutputNotFound { path } => Some(format!(
                "Run the bundler first so that {} exists",
                path.display()
            )),
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
        }
    }

    /// Get an exit code for this error, following sysexits.h conventions.
    ///
    /// ```
    /// use bundle_sizes::error::SizeError;
    /// use std::path::PathBuf;
    ///
    /// let err = SizeError::OutputNotFound { path: PathBuf::from("dist") };
    /// assert_eq!(err.exit_code(), 66);
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UnsupportedCompression { .. } => 78, // EX_CONFIG
            Self::InvalidCompression { .. } => 64,     // EX_USAGE
            Self::InvalidPattern { .. } => 65,         // EX_DATAERR
            Self::InvalidConfig { .. } => 78,          // EX_CONFIG
            Self::OutputNotFound { .. } => 66,         // EX_NOINPUT
            Self::Io { .. } => 74,                     // EX_IOERR
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with its cause chain and a suggestion when one exists
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(size_error) = error.downcast_ref::<SizeError>() {
            if let Some(suggestion) = size_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        if let Some(size_error) = error.downcast_ref::<SizeError>() {
            size_error.exit_code()
        } else {
            1
        }
    }
}
