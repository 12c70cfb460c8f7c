//! Build outputs handed over by the bundler

use crate::error::SizeError;
use crate::infra::FileSystem;
use std::path::{Path, PathBuf};

/// What the bundler emitted a file as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Code chunk (entry or split point)
    Chunk,
    /// Any other emitted file
    Asset,
}

/// Where an output's bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSource {
    /// Bytes already in memory
    Bytes(Vec<u8>),
    /// File on disk, streamed when measured
    Path(PathBuf),
}

/// One emitted file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// Name relative to the output root, `/`-separated
    pub name: String,
    /// Chunk or asset
    pub kind: OutputKind,
    /// Contents
    pub source: OutputSource,
    /// Source map file name referenced by this chunk, if any
    pub source_map: Option<String>,
}

impl OutputFile {
    /// Chunk with in-memory code
    pub fn chunk(name: impl Into<String>, code: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            kind: OutputKind::Chunk,
            source: OutputSource::Bytes(code.into()),
            source_map: None,
        }
    }

    /// Asset with in-memory contents
    pub fn asset(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            kind: OutputKind::Asset,
            source: OutputSource::Bytes(data.into()),
            source_map: None,
        }
    }

    /// Attach a source map reference
    pub fn with_source_map(mut self, map_name: impl Into<String>) -> Self {
        self.source_map = Some(map_name.into());
        self
    }

    /// Comment line appended to a chunk when source maps are measured
    pub fn source_map_comment(&self) -> Option<String> {
        match (self.kind, &self.source_map) {
            (OutputKind::Chunk, Some(map)) => Some(format!("\n//# sourceMappingURL={}", map)),
            _ => None,
        }
    }
}

/// Everything one build emitted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOutput {
    /// Emitted files in bundler order
    pub files: Vec<OutputFile>,
}

impl BuildOutput {
    /// Create from a list of files
    pub fn new(files: Vec<OutputFile>) -> Self {
        Self { files }
    }

    /// Names of all emitted files
    pub fn names(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.name.as_str()).collect()
    }

    /// The build's only output, when that output is a chunk
    ///
    /// Builds with any other emitted file (a second chunk, a stylesheet, an
    /// HTML page) return `None` and keep the configured include pattern.
    pub fn single_chunk(&self) -> Option<&OutputFile> {
        match self.files.as_slice() {
            [only] if only.kind == OutputKind::Chunk => Some(only),
            _ => None,
        }
    }

    /// Look up a file by name
    pub fn get(&self, name: &str) -> Option<&OutputFile> {
        self.files.iter().find(|f| f.name == name)
    }

    /// Describe an existing output directory
    ///
    /// Script files (`.js`, `.mjs`, `.cjs`) become chunks, everything else an
    /// asset. A chunk `x.js` gets `x.js.map` as its source map when that file
    /// exists. Hidden entries are skipped.
    pub fn from_dir<FS: FileSystem>(fs: &FS, dir: &Path) -> Result<Self, SizeError> {
        if !fs.metadata(dir).map(|m| m.is_dir()).unwrap_or(false) {
            return Err(SizeError::OutputNotFound {
                path: dir.to_path_buf(),
            });
        }

        let mut names = list_files(fs, dir)?;
        names.sort();

        let files = names
            .iter()
            .map(|name| {
                let kind = if is_script(name) {
                    OutputKind::Chunk
                } else {
                    OutputKind::Asset
                };
                let map_name = format!("{}.map", name);
                let source_map = (kind == OutputKind::Chunk
                    && names.binary_search(&map_name).is_ok())
                .then(|| file_name(&map_name).to_string());

                OutputFile {
                    name: name.clone(),
                    kind,
                    source: OutputSource::Path(dir.join(name)),
                    source_map,
                }
            })
            .collect();

        Ok(Self { files })
    }
}

/// Recursively list files under `root` as `/`-separated relative names
pub fn list_files<FS: FileSystem>(fs: &FS, root: &Path) -> Result<Vec<String>, SizeError> {
    let mut names = Vec::new();
    collect_files(fs, root, "", &mut names)?;
    Ok(names)
}

fn collect_files<FS: FileSystem>(
    fs: &FS,
    dir: &Path,
    prefix: &str,
    names: &mut Vec<String>,
) -> Result<(), SizeError> {
    let entries = fs.read_dir(dir).map_err(|source| SizeError::Io {
        context: format!("reading {}", dir.display()),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| SizeError::Io {
            context: format!("reading {}", dir.display()),
            source,
        })?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }

        let relative = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", prefix, name)
        };

        let metadata = fs.metadata(&path).map_err(|source| SizeError::Io {
            context: format!("reading {}", path.display()),
            source,
        })?;
        if metadata.is_dir() {
            collect_files(fs, &path, &relative, names)?;
        } else {
            names.push(relative);
        }
    }

    Ok(())
}

fn is_script(name: &str) -> bool {
    [".js", ".mjs", ".cjs"].iter().any(|ext| name.ends_with(ext))
}

fn file_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::RealFileSystem;
    use std::fs;
    use std::io;
    use tempfile::TempDir;

    #[test]
    fn test_single_chunk_is_the_only_output() {
        let output = BuildOutput::new(vec![OutputFile::chunk("main.abcd123.js", "x")]);
        assert_eq!(output.single_chunk().unwrap().name, "main.abcd123.js");
    }

    #[test]
    fn test_single_chunk_none_when_assets_are_emitted() {
        let output = BuildOutput::new(vec![
            OutputFile::chunk("main.abcd123.js", "x"),
            OutputFile::asset("style.css", "body{}"),
            OutputFile::asset("index.html", "<html></html>"),
        ]);
        assert!(output.single_chunk().is_none());

        let asset_only = BuildOutput::new(vec![OutputFile::asset("style.css", "body{}")]);
        assert!(asset_only.single_chunk().is_none());
    }

    #[test]
    fn test_single_chunk_none_when_code_split() {
        let output = BuildOutput::new(vec![
            OutputFile::chunk("main.js", "x"),
            OutputFile::chunk("vendor.js", "y"),
        ]);
        assert!(output.single_chunk().is_none());
        assert!(BuildOutput::default().single_chunk().is_none());
    }

    #[test]
    fn test_source_map_comment_only_for_chunks() {
        let chunk = OutputFile::chunk("main.js", "x").with_source_map("main.js.map");
        assert_eq!(
            chunk.source_map_comment().as_deref(),
            Some("\n//# sourceMappingURL=main.js.map")
        );

        let asset = OutputFile::asset("style.css", "body{}").with_source_map("style.css.map");
        assert!(asset.source_map_comment().is_none());
    }

    #[test]
    fn test_from_dir_lists_nested_files_with_kinds() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("assets")).unwrap();
        fs::write(root.join("index.html"), "<html></html>").unwrap();
        fs::write(root.join("assets/main.js"), "console.log(1)").unwrap();
        fs::write(root.join("assets/main.js.map"), "{}").unwrap();
        fs::write(root.join("assets/style.css"), "body{}").unwrap();
        fs::write(root.join(".DS_Store"), "junk").unwrap();

        let output = BuildOutput::from_dir(&RealFileSystem, root).unwrap();
        assert_eq!(
            output.names(),
            vec![
                "assets/main.js",
                "assets/main.js.map",
                "assets/style.css",
                "index.html"
            ]
        );

        let main = output.get("assets/main.js").unwrap();
        assert_eq!(main.kind, OutputKind::Chunk);
        assert_eq!(main.source_map.as_deref(), Some("main.js.map"));
        assert_eq!(main.source, OutputSource::Path(root.join("assets/main.js")));
        assert_eq!(output.get("index.html").unwrap().kind, OutputKind::Asset);
    }

    #[test]
    fn test_from_dir_missing_directory_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = BuildOutput::from_dir(&RealFileSystem, &temp_dir.path().join("dist"))
            .unwrap_err();
        assert!(matches!(err, SizeError::OutputNotFound { .. }));
    }

    /// Real filesystem whose metadata lookups fail for every path
    struct MetadataLessFs;

    impl FileSystem for MetadataLessFs {
        fn create_dir_all(&self, path: &Path) -> io::Result<()> {
            RealFileSystem.create_dir_all(path)
        }

        fn read_dir(&self, path: &Path) -> io::Result<fs::ReadDir> {
            RealFileSystem.read_dir(path)
        }

        fn open(&self, path: &Path) -> io::Result<Box<dyn io::Read + Send>> {
            RealFileSystem.open(path)
        }

        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            RealFileSystem.read_to_string(path)
        }

        fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
            RealFileSystem.write(path, contents)
        }

        fn metadata(&self, _path: &Path) -> io::Result<fs::Metadata> {
            Err(io::Error::new(io::ErrorKind::NotFound, "no metadata"))
        }
    }

    #[test]
    fn test_from_dir_checks_directory_through_filesystem() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("main.js"), "console.log(1)").unwrap();

        let err = BuildOutput::from_dir(&MetadataLessFs, temp_dir.path()).unwrap_err();
        assert!(matches!(err, SizeError::OutputNotFound { .. }));
    }

    #[test]
    fn test_list_files_propagates_metadata_errors() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("main.js"), "console.log(1)").unwrap();

        let err = list_files(&MetadataLessFs, temp_dir.path()).unwrap_err();
        assert!(matches!(err, SizeError::Io { .. }));
    }
}
