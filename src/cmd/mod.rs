//! Command handlers for bundle-sizes CLI
//!
//! Each submodule handles a specific CLI command and keeps printing out of
//! the library types it drives.

pub mod completions;
pub mod history;
pub mod init;
pub mod report;

pub use completions::cmd_completions;
pub use history::cmd_history;
pub use init::cmd_init;
pub use report::{cmd_report, ReportArgs};
