//! # Radiance Record Parser
//!
//! This module parses the plain-text RGB irradiance output written by the
//! upstream simulation step (`dctimestep` results) into typed sample
//! sequences.
//!
//! ## File Format
//!
//! One record per line, fields separated by arbitrary whitespace. The first
//! three fields are the R, G and B channel values; any further fields are
//! ignored. There is no header and no delimiter escaping. Blank lines are
//! skipped.
//!
//! Record order matters: the line index is the sensor-point position in the
//! simulation's scan order, and it is preserved through the whole pipeline.
//!
//! ## Example
//!
//! ```rust,no_run
//! use luxgrid::record::RgbDataset;
//!
//! let dataset = RgbDataset::from_path("room_south.dat")?;
//! println!("{} sensor points", dataset.len());
//! # Ok::<(), luxgrid::record::RecordError>(())
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur while reading RGB record files
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// Input source is missing or unreadable
    #[error("data source unavailable: {path}")]
    SourceUnavailable {
        /// Path of the source that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A record with too few fields or a non-numeric channel value
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord {
        /// 1-based line number of the offending record
        line: usize,
        /// What was wrong with the record
        reason: String,
    },
}

/// A single RGB irradiance sample at one sensor point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RgbSample {
    /// Red channel irradiance
    pub r: f64,
    /// Green channel irradiance
    pub g: f64,
    /// Blue channel irradiance
    pub b: f64,
}

impl RgbSample {
    /// Create a sample from the three channel values.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// An ordered sequence of RGB samples, one per sensor point.
///
/// The index order is the simulation's sensor scan order. Datasets are
/// immutable once parsed; every downstream transformation produces a new
/// value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RgbDataset {
    samples: Vec<RgbSample>,
}

impl RgbDataset {
    /// Read and parse a record file.
    ///
    /// A missing or unreadable file fails with
    /// [`RecordError::SourceUnavailable`]; the file handle is released on
    /// every exit path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RecordError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| RecordError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse records from an in-memory string.
    ///
    /// Every non-blank line must carry at least three numeric fields;
    /// anything else fails with [`RecordError::MalformedRecord`] naming the
    /// 1-based line number.
    pub fn parse(content: &str) -> Result<Self, RecordError> {
        let mut samples = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            samples.push(parse_record(line, index + 1)?);
        }
        Ok(Self { samples })
    }

    /// Number of samples in the dataset.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the dataset contains no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The samples in sensor scan order.
    pub fn samples(&self) -> &[RgbSample] {
        &self.samples
    }

    /// Iterate over the samples in sensor scan order.
    pub fn iter(&self) -> impl Iterator<Item = &RgbSample> {
        self.samples.iter()
    }
}

impl FromIterator<RgbSample> for RgbDataset {
    fn from_iter<T: IntoIterator<Item = RgbSample>>(iter: T) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

fn parse_record(line: &str, line_number: usize) -> Result<RgbSample, RecordError> {
    let mut fields = line.split_whitespace();
    let mut channel = |name: &str| -> Result<f64, RecordError> {
        let token = fields.next().ok_or_else(|| RecordError::MalformedRecord {
            line: line_number,
            reason: format!("missing {name} channel field"),
        })?;
        token
            .parse::<f64>()
            .map_err(|_| RecordError::MalformedRecord {
                line: line_number,
                reason: format!("invalid {name} channel value {token:?}"),
            })
    };
    let r = channel("R")?;
    let g = channel("G")?;
    let b = channel("B")?;
    // Fields beyond the first three are ignored.
    Ok(RgbSample::new(r, g, b))
}
