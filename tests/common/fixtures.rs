//! Test fixture helpers for creating bundler output directories

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Re-export anyhow for convenience
pub use anyhow;

/// A scratch project with a `dist/` output directory
pub struct Project {
    /// Keeps the directory alive
    pub temp_dir: TempDir,
}

impl Project {
    /// Empty project with an empty `dist/`
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = TempDir::new()?;
        fs::create_dir_all(temp_dir.path().join("dist"))?;
        Ok(Self { temp_dir })
    }

    /// Project whose `dist/` holds the given files
    pub fn with_files(files: &[(&str, &str)]) -> anyhow::Result<Self> {
        let project = Self::new()?;
        for (name, contents) in files {
            project.write_output(name, contents)?;
        }
        Ok(project)
    }

    /// Project root
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// `dist/` directory
    pub fn dist(&self) -> PathBuf {
        self.root().join("dist")
    }

    /// Write (or overwrite) a file under `dist/`
    pub fn write_output(&self, name: &str, contents: &str) -> anyhow::Result<()> {
        let path = self.dist().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
        Ok(())
    }

    /// Remove a file from `dist/`
    pub fn remove_output(&self, name: &str) -> anyhow::Result<()> {
        fs::remove_file(self.dist().join(name))?;
        Ok(())
    }

    /// Write `.bundle-sizes.toml`
    pub fn write_config(&self, toml: &str) -> anyhow::Result<()> {
        fs::write(self.root().join(".bundle-sizes.toml"), toml)?;
        Ok(())
    }

    /// Path of the default history file
    pub fn history_file(&self) -> PathBuf {
        self.root().join("size-plugin.json")
    }
}

/// Code that compresses well, `len` bytes long
pub fn compressible_code(len: usize) -> String {
    "function noop() { return undefined; }\n"
        .chars()
        .cycle()
        .take(len)
        .collect()
}
