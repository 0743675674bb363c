//! # Analysis Pipeline
//!
//! Ties the record parser, lux converter and grid aggregator together:
//! one call takes a result file (or several additive ones) to a grid and
//! its statistics. Batch analysis over independent files is sequential by
//! default and fans out over a rayon worker pool with the `parallel`
//! feature; order within a file is always preserved.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Serialize;

use crate::grid::{GridAggregator, GridError, GridStatistics, IlluminanceGrid};
use crate::lux::{ConvertError, LuxConverter, LuxSequence};
use crate::record::{RecordError, RgbDataset};

/// Errors from the end-to-end analysis pipeline
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Error while reading or parsing an input file
    #[error("record error: {0}")]
    Record(#[from] RecordError),

    /// Error while combining or converting datasets
    #[error("conversion error: {0}")]
    Convert(#[from] ConvertError),

    /// Error while reshaping or summarizing the grid
    #[error("grid error: {0}")]
    Grid(#[from] GridError),
}

/// Result of analyzing one sensor grid.
#[derive(Debug, Clone)]
pub struct IlluminanceAnalysis {
    /// Illuminance values converted from the input(s), in scan order
    pub lux: LuxSequence,
    /// The reshaped spatial grid
    pub grid: IlluminanceGrid,
    /// Summary statistics of the grid
    pub statistics: GridStatistics,
}

/// Machine-readable analysis report for downstream tooling.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Input files the grid was computed from
    pub inputs: Vec<String>,
    /// Rows in the reshaped grid
    pub rows: usize,
    /// Values per full row
    pub row_len: usize,
    /// Total number of grid values
    pub values: usize,
    /// Summary statistics
    pub statistics: GridStatistics,
    /// When the report was generated
    pub generated_at: DateTime<Utc>,
}

impl AnalysisReport {
    /// Build a report for an analysis of `inputs`.
    pub fn new(inputs: &[PathBuf], analysis: &IlluminanceAnalysis) -> Self {
        Self {
            inputs: inputs.iter().map(|p| p.display().to_string()).collect(),
            rows: analysis.grid.num_rows(),
            row_len: analysis.grid.row_len(),
            values: analysis.grid.num_values(),
            statistics: analysis.statistics,
            generated_at: Utc::now(),
        }
    }
}

/// End-to-end pipeline from record files to grids and statistics.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisPipeline {
    converter: LuxConverter,
    aggregator: GridAggregator,
}

impl AnalysisPipeline {
    /// Pipeline running the given converter and aggregator.
    pub fn new(converter: LuxConverter, aggregator: GridAggregator) -> Self {
        Self {
            converter,
            aggregator,
        }
    }

    /// Analyze a single record file.
    pub fn run_file<P: AsRef<Path>>(&self, path: P) -> Result<IlluminanceAnalysis, AnalysisError> {
        let dataset = RgbDataset::from_path(&path)?;
        debug!(
            "parsed {} samples from {}",
            dataset.len(),
            path.as_ref().display()
        );
        self.run_datasets(&[dataset])
    }

    /// Analyze several record files whose contributions are additive (one
    /// result file per window lighting the same sensor grid).
    pub fn run_files(&self, paths: &[PathBuf]) -> Result<IlluminanceAnalysis, AnalysisError> {
        let datasets = paths
            .iter()
            .map(RgbDataset::from_path)
            .collect::<Result<Vec<_>, _>>()?;
        self.run_datasets(&datasets)
    }

    /// Analyze already-parsed datasets.
    pub fn run_datasets(
        &self,
        datasets: &[RgbDataset],
    ) -> Result<IlluminanceAnalysis, AnalysisError> {
        let lux = self.converter.convert_combined(datasets)?;
        let grid = self.aggregator.aggregate(&lux)?;
        let statistics = grid.statistics()?;
        info!(
            "grid {}x{}: {}",
            grid.num_rows(),
            grid.row_len(),
            statistics
        );
        Ok(IlluminanceAnalysis {
            lux,
            grid,
            statistics,
        })
    }

    /// Analyze many independent files, returning one result per file.
    ///
    /// Output order matches input order. With the `parallel` feature the
    /// files are fanned out over a rayon pool; the files are independent,
    /// so no ordering is required between them.
    pub fn run_batch(
        &self,
        paths: &[PathBuf],
    ) -> Vec<(PathBuf, Result<IlluminanceAnalysis, AnalysisError>)> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            paths
                .par_iter()
                .map(|path| (path.clone(), self.run_file(path)))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            paths
                .iter()
                .map(|path| (path.clone(), self.run_file(path)))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridSpec;

    fn pipeline() -> AnalysisPipeline {
        AnalysisPipeline::new(
            LuxConverter::new(),
            GridAggregator::new(GridSpec::new(2, 2).with_bias(0)),
        )
    }

    #[test]
    fn test_run_datasets_end_to_end() {
        let dataset = RgbDataset::parse("1 0 0\n1 0 0\n1 0 0\n1 0 0\n").unwrap();
        let analysis = pipeline().run_datasets(&[dataset]).unwrap();
        assert_eq!(analysis.lux.len(), 4);
        assert_eq!(analysis.grid.num_rows(), 2);
        assert!((analysis.statistics.mean - 47.435).abs() < 1e-9);
        assert!((analysis.statistics.uniformity_ratio - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_length_mismatch_propagates() {
        let a = RgbDataset::parse("1 1 1\n1 1 1\n").unwrap();
        let b = RgbDataset::parse("1 1 1\n").unwrap();
        let err = pipeline().run_datasets(&[a, b]).unwrap_err();
        assert!(matches!(err, AnalysisError::Convert(_)));
    }

    #[test]
    fn test_missing_file_propagates() {
        let err = pipeline().run_file("/nonexistent/input.dat").unwrap_err();
        assert!(matches!(err, AnalysisError::Record(_)));
    }

    #[test]
    fn test_report_shape() {
        let dataset = RgbDataset::parse("1 1 1\n2 2 2\n3 3 3\n4 4 4\n").unwrap();
        let analysis = pipeline().run_datasets(&[dataset]).unwrap();
        let report = AnalysisReport::new(&[PathBuf::from("room.dat")], &analysis);
        assert_eq!(report.inputs, vec!["room.dat".to_string()]);
        assert_eq!(report.rows, 2);
        assert_eq!(report.row_len, 2);
        assert_eq!(report.values, 4);
    }
}
