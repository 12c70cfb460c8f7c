//! Init command implementation
//!
//! Handles the `bundle-sizes init` command which writes a
//! `.bundle-sizes.toml` with every default spelled out.

use anyhow::Result;
use console::style;
use std::env;
use std::path::Path;

use crate::config::{ConfigFile, ConfigLoader, CONFIG_FILE_NAME};
use crate::fmt::{CHECKMARK, SPARKLES};

/// Create `.bundle-sizes.toml` in the current directory
///
/// An existing file is left untouched.
///
/// # Examples
///
/// ```no_run
/// use bundle_sizes::cmd::init::cmd_init;
///
/// cmd_init()?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_init() -> Result<()> {
    let project_root = env::current_dir()?;

    if !init_config(&project_root)? {
        println!(
            "{} Config file already exists: {}",
            style("⚠️").yellow(),
            style(CONFIG_FILE_NAME).cyan()
        );
        println!("   Delete it first or edit manually to update.");
        return Ok(());
    }

    println!(
        "{} Created {}",
        SPARKLES,
        style(CONFIG_FILE_NAME).bold().cyan()
    );
    println!(
        "{} Run {} after your bundler to track sizes",
        CHECKMARK,
        style("bundle-sizes report dist").bold()
    );
    Ok(())
}

/// Write the default config; returns `false` when one already exists
pub fn init_config(project_root: &Path) -> Result<bool> {
    if ConfigLoader::exists(project_root) {
        return Ok(false);
    }
    ConfigLoader::save(&ConfigFile::documented_defaults(), project_root)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_init_config_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();

        assert!(init_config(temp_dir.path()).unwrap());

        let loaded = ConfigLoader::load(temp_dir.path()).unwrap();
        assert_eq!(loaded, ConfigFile::documented_defaults());
    }

    #[test]
    fn test_init_config_keeps_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "pattern = \"**/*.js\"\n").unwrap();

        assert!(!init_config(temp_dir.path()).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "pattern = \"**/*.js\"\n");
    }
}
