//! Compressed size estimation
//!
//! Each [`Compression`] mode maps to a [`SizeEstimator`] that can measure an
//! in-memory buffer or stream a reader. Only the length of the compressed
//! stream is observed; the compressed bytes themselves are discarded as they
//! are produced, so large assets never need to be held in memory twice.

use crate::error::SizeError;
use crate::infra::FileSystem;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Read, Write};
use std::path::Path;
use std::str::FromStr;

/// Compression applied before measuring a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Raw byte length
    None,
    /// gzip at maximum level
    #[default]
    Gzip,
    /// brotli at maximum quality
    Brotli,
}

impl Compression {
    /// All modes, in the order they are documented
    pub const ALL: [Compression; 3] = [Self::None, Self::Gzip, Self::Brotli];

    /// Get the mode name as used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gzip => "gzip",
            Self::Brotli => "brotli",
        }
    }

    /// Whether this build can measure the mode
    pub fn is_supported(&self) -> bool {
        match self {
            Self::None | Self::Gzip => true,
            Self::Brotli => cfg!(feature = "brotli"),
        }
    }

    /// Build the estimator for this mode
    ///
    /// Brotli without the `brotli` feature is reported as
    /// [`SizeError::UnsupportedCompression`]; it never falls back to gzip.
    ///
    /// ```
    /// use bundle_sizes::compression::Compression;
    ///
    /// let estimator = Compression::None.estimator().unwrap();
    /// assert_eq!(estimator.measure(b"hello").unwrap(), 5);
    /// ```
    pub fn estimator(&self) -> Result<Box<dyn SizeEstimator>, SizeError> {
        match self {
            Self::None => Ok(Box::new(RawSize)),
            Self::Gzip => Ok(Box::new(GzipSize)),
            #[cfg(feature = "brotli")]
            Self::Brotli => Ok(Box::new(BrotliSize)),
            #[cfg(not(feature = "brotli"))]
            Self::Brotli => Err(SizeError::UnsupportedCompression {
                mode: self.as_str().to_string(),
            }),
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Compression {
    type Err = SizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SizeError::InvalidCompression {
                value: s.to_string(),
                valid: Self::ALL.iter().map(|m| m.as_str().to_string()).collect(),
            })
    }
}

/// Strategy for measuring compressed size
pub trait SizeEstimator: Send + Sync {
    /// Mode this estimator implements
    fn mode(&self) -> Compression;

    /// Measure everything the reader yields
    fn measure_stream(&self, reader: &mut dyn Read) -> io::Result<u64>;

    /// Measure an in-memory buffer
    fn measure(&self, data: &[u8]) -> io::Result<u64> {
        let mut reader = data;
        self.measure_stream(&mut reader)
    }
}

/// Measure a file by streaming it through the estimator
pub fn measure_file<FS: FileSystem>(
    estimator: &dyn SizeEstimator,
    fs: &FS,
    path: &Path,
) -> io::Result<u64> {
    let mut reader = fs.open(path)?;
    estimator.measure_stream(&mut reader)
}

/// Uncompressed length
#[derive(Debug, Clone, Copy)]
pub struct RawSize;

impl SizeEstimator for RawSize {
    fn mode(&self) -> Compression {
        Compression::None
    }

    fn measure_stream(&self, reader: &mut dyn Read) -> io::Result<u64> {
        io::copy(reader, &mut io::sink())
    }

    fn measure(&self, data: &[u8]) -> io::Result<u64> {
        Ok(data.len() as u64)
    }
}

/// gzip length at level 9
///
/// The gzip header carries a zero mtime, so identical input always yields
/// identical output length.
#[derive(Debug, Clone, Copy)]
pub struct GzipSize;

impl SizeEstimator for GzipSize {
    fn mode(&self) -> Compression {
        Compression::Gzip
    }

    fn measure_stream(&self, reader: &mut dyn Read) -> io::Result<u64> {
        let mut encoder =
            flate2::write::GzEncoder::new(ByteCounter::default(), flate2::Compression::best());
        io::copy(reader, &mut encoder)?;
        Ok(encoder.finish()?.count)
    }
}

/// brotli length at quality 11
#[cfg(feature = "brotli")]
#[derive(Debug, Clone, Copy)]
pub struct BrotliSize;

#[cfg(feature = "brotli")]
impl BrotliSize {
    const BUFFER_SIZE: usize = 4096;
    const QUALITY: u32 = 11;
    const WINDOW_BITS: u32 = 22;
}

#[cfg(feature = "brotli")]
impl SizeEstimator for BrotliSize {
    fn mode(&self) -> Compression {
        Compression::Brotli
    }

    fn measure_stream(&self, reader: &mut dyn Read) -> io::Result<u64> {
        let mut writer = brotli::CompressorWriter::new(
            ByteCounter::default(),
            Self::BUFFER_SIZE,
            Self::QUALITY,
            Self::WINDOW_BITS,
        );
        io::copy(reader, &mut writer)?;
        // into_inner finishes the stream
        Ok(writer.into_inner().count)
    }
}

/// Writer that only counts what passes through it
#[derive(Debug, Default)]
struct ByteCounter {
    count: u64,
}

impl Write for ByteCounter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.count += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
