//! # Grid Aggregation
//!
//! Reshapes a flat illuminance sequence into the 2-D sensor grid it was
//! scanned from and derives the summary statistics used to characterize
//! lighting quality.
//!
//! ## Reshaping
//!
//! The simulation emits sensor points in scan order: consecutive runs of
//! `height` points, one run per scan column, `width` columns in total. The
//! sensor layout has an edge quirk where the last `bias` points of every
//! run fall outside the plotted grid, so each run is trimmed to its first
//! `height - bias` points before it becomes a grid row.
//!
//! Sequences that do not fill the grid exactly are handled by an explicit
//! [`ReshapePolicy`]: the default tolerates a short final row, the strict
//! variant rejects the input.
//!
//! ## Statistics
//!
//! [`GridStatistics`] carries the arithmetic mean over all grid values, the
//! mean of the 100 smallest values (the "low tail", a robust stand-in for
//! the minimum), and their ratio — the uniformity metric indicating how
//! evenly the space is lit.
//!
//! ## Example
//!
//! ```rust
//! use luxgrid::grid::{GridAggregator, GridSpec};
//! use luxgrid::lux::LuxSequence;
//!
//! let aggregator = GridAggregator::new(GridSpec::new(3, 2).with_bias(0));
//! let grid = aggregator.aggregate(&LuxSequence::from(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]))?;
//! assert_eq!(grid.rows(), &[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
//! # Ok::<(), luxgrid::grid::GridError>(())
//! ```

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lux::LuxSequence;

/// Number of smallest grid values averaged into the low-tail mean.
pub const LOW_TAIL_SAMPLE_COUNT: usize = 100;

/// Errors that can occur while reshaping or summarizing a grid
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Grid shape with zero extent, or a bias that leaves no row
    #[error("invalid grid spec: {0}")]
    InvalidSpec(String),

    /// Strict reshape over a sequence that does not fill the grid exactly
    #[error("sequence of {actual} values does not fill a {height}x{width} grid exactly")]
    ShapeMismatch {
        /// Sensor points per scan column
        height: usize,
        /// Number of scan columns
        width: usize,
        /// Actual sequence length
        actual: usize,
    },

    /// Statistics requested on an empty or zero-mean grid
    #[error("degenerate grid: {0}")]
    DegenerateGrid(String),
}

/// Shape of the sensor grid a flat sequence is reshaped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Sensor points per scan column (chunk size in the flat sequence)
    pub height: usize,
    /// Number of scan columns (rows in the reshaped grid)
    pub width: usize,
    /// Trailing points per column excluded from the grid
    pub bias: usize,
}

impl GridSpec {
    /// Spec with the default bias of 1.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            bias: 1,
        }
    }

    /// Same spec with a different bias.
    pub fn with_bias(self, bias: usize) -> Self {
        Self { bias, ..self }
    }

    /// Points kept per row after the bias trim.
    pub fn row_len(&self) -> usize {
        self.height.saturating_sub(self.bias)
    }

    fn validate(&self) -> Result<(), GridError> {
        if self.height == 0 || self.width == 0 {
            return Err(GridError::InvalidSpec(format!(
                "grid must have positive extent, got {}x{}",
                self.height, self.width
            )));
        }
        if self.bias >= self.height {
            return Err(GridError::InvalidSpec(format!(
                "bias {} leaves no points in a column of height {}",
                self.bias, self.height
            )));
        }
        Ok(())
    }
}

/// Policy for sequences whose length does not fill the grid exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReshapePolicy {
    /// Keep a short final row and ignore values beyond the last grid row.
    #[default]
    TruncatePartial,
    /// Require the sequence to hold exactly `height * width` values.
    Strict,
}

/// Reshapes illuminance sequences into grids.
#[derive(Debug, Clone, Copy)]
pub struct GridAggregator {
    spec: GridSpec,
    policy: ReshapePolicy,
}

impl GridAggregator {
    /// Aggregator with the tolerant default policy.
    pub fn new(spec: GridSpec) -> Self {
        Self {
            spec,
            policy: ReshapePolicy::default(),
        }
    }

    /// Same aggregator with a different reshape policy.
    pub fn with_policy(mut self, policy: ReshapePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The grid shape this aggregator produces.
    pub fn spec(&self) -> GridSpec {
        self.spec
    }

    /// The reshape policy in effect.
    pub fn policy(&self) -> ReshapePolicy {
        self.policy
    }

    /// Reshape a flat sequence into a grid.
    ///
    /// The sequence is partitioned into consecutive chunks of `height`
    /// values; each chunk loses its trailing `bias` values and becomes one
    /// row; at most `width` rows are kept. Under
    /// [`ReshapePolicy::TruncatePartial`] a final partial chunk becomes a
    /// short row; under [`ReshapePolicy::Strict`] any length other than
    /// `height * width` fails with [`GridError::ShapeMismatch`].
    pub fn aggregate(&self, lux: &LuxSequence) -> Result<IlluminanceGrid, GridError> {
        self.spec.validate()?;
        let values = lux.values();
        if self.policy == ReshapePolicy::Strict && values.len() != self.spec.height * self.spec.width
        {
            return Err(GridError::ShapeMismatch {
                height: self.spec.height,
                width: self.spec.width,
                actual: values.len(),
            });
        }
        let row_len = self.spec.row_len();
        let rows = values
            .chunks(self.spec.height)
            .take(self.spec.width)
            .map(|chunk| chunk[..chunk.len().min(row_len)].to_vec())
            .collect();
        Ok(IlluminanceGrid { rows })
    }
}

/// A 2-D illuminance grid in sensor scan order.
///
/// One row per scan column. Under the tolerant reshape policy the final
/// row may be shorter than the others.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IlluminanceGrid {
    rows: Vec<Vec<f64>>,
}

impl IlluminanceGrid {
    /// The grid rows.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row (the final row may be shorter).
    pub fn row_len(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Total number of values in the grid.
    pub fn num_values(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Iterate over every value in row-major order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().flatten().copied()
    }

    /// Compute the summary statistics of the grid.
    ///
    /// Fails with [`GridError::DegenerateGrid`] when the grid holds no
    /// values or its mean is zero (the uniformity ratio would be
    /// undefined).
    pub fn statistics(&self) -> Result<GridStatistics, GridError> {
        let mut sorted: Vec<f64> = self.values().collect();
        if sorted.is_empty() {
            return Err(GridError::DegenerateGrid("grid holds no values".into()));
        }
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;
        let tail = &sorted[..sorted.len().min(LOW_TAIL_SAMPLE_COUNT)];
        let low_tail_mean = tail.iter().sum::<f64>() / tail.len() as f64;

        if mean == 0.0 {
            return Err(GridError::DegenerateGrid("grid mean is zero".into()));
        }
        Ok(GridStatistics {
            mean,
            low_tail_mean,
            uniformity_ratio: low_tail_mean / mean,
        })
    }
}

/// Summary statistics of an illuminance grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridStatistics {
    /// Arithmetic mean of every grid value
    pub mean: f64,
    /// Mean of the 100 smallest values (all values when fewer exist)
    pub low_tail_mean: f64,
    /// `low_tail_mean / mean`, the spatial-evenness metric
    pub uniformity_ratio: f64,
}

impl GridStatistics {
    /// Render title in the fixed format shared by every heat-map.
    pub fn title(&self) -> String {
        format!(
            "average degree: {:.3}, mean={:.2}, min={:.2}",
            self.uniformity_ratio, self.mean, self.low_tail_mean
        )
    }
}

impl fmt::Display for GridStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mean {:.2} lx, low-tail {:.2} lx, uniformity {:.3}",
            self.mean, self.low_tail_mean, self.uniformity_ratio
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(range: std::ops::RangeInclusive<usize>) -> LuxSequence {
        LuxSequence::from(range.map(|v| v as f64).collect::<Vec<_>>())
    }

    #[test]
    fn test_reshape_without_bias() {
        let aggregator = GridAggregator::new(GridSpec::new(3, 2).with_bias(0));
        let grid = aggregator.aggregate(&sequence(1..=6)).unwrap();
        assert_eq!(grid.rows(), &[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
    }

    #[test]
    fn test_reshape_with_bias_drops_chunk_tails() {
        let aggregator = GridAggregator::new(GridSpec::new(3, 2).with_bias(1));
        let grid = aggregator.aggregate(&sequence(1..=6)).unwrap();
        assert_eq!(grid.rows(), &[vec![1.0, 2.0], vec![4.0, 5.0]]);
    }

    #[test]
    fn test_default_bias_is_one() {
        let spec = GridSpec::new(3, 2);
        assert_eq!(spec.bias, 1);
        assert_eq!(spec.row_len(), 2);
    }

    #[test]
    fn test_partial_final_chunk_becomes_short_row() {
        let aggregator = GridAggregator::new(GridSpec::new(3, 3).with_bias(0));
        let grid = aggregator.aggregate(&sequence(1..=7)).unwrap();
        assert_eq!(
            grid.rows(),
            &[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0], vec![7.0]]
        );
    }

    #[test]
    fn test_excess_input_truncated_to_width_rows() {
        let aggregator = GridAggregator::new(GridSpec::new(2, 2).with_bias(0));
        let grid = aggregator.aggregate(&sequence(1..=10)).unwrap();
        assert_eq!(grid.num_rows(), 2);
        assert_eq!(grid.rows(), &[vec![1.0, 2.0], vec![3.0, 4.0]]);
    }

    #[test]
    fn test_strict_policy_rejects_partial_input() {
        let aggregator =
            GridAggregator::new(GridSpec::new(3, 3).with_bias(0)).with_policy(ReshapePolicy::Strict);
        let err = aggregator.aggregate(&sequence(1..=7)).unwrap_err();
        match err {
            GridError::ShapeMismatch {
                height,
                width,
                actual,
            } => {
                assert_eq!((height, width, actual), (3, 3, 7));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_strict_policy_accepts_exact_input() {
        let aggregator =
            GridAggregator::new(GridSpec::new(3, 2).with_bias(1)).with_policy(ReshapePolicy::Strict);
        let grid = aggregator.aggregate(&sequence(1..=6)).unwrap();
        assert_eq!(grid.rows(), &[vec![1.0, 2.0], vec![4.0, 5.0]]);
    }

    #[test]
    fn test_zero_extent_rejected() {
        let aggregator = GridAggregator::new(GridSpec::new(0, 2));
        let err = aggregator.aggregate(&sequence(1..=6)).unwrap_err();
        assert!(matches!(err, GridError::InvalidSpec(_)));
    }

    #[test]
    fn test_bias_consuming_whole_column_rejected() {
        let aggregator = GridAggregator::new(GridSpec::new(3, 2).with_bias(3));
        let err = aggregator.aggregate(&sequence(1..=6)).unwrap_err();
        assert!(matches!(err, GridError::InvalidSpec(_)));
    }

    #[test]
    fn test_statistics_over_two_hundred_values() {
        let aggregator = GridAggregator::new(GridSpec::new(20, 10).with_bias(0));
        let grid = aggregator.aggregate(&sequence(1..=200)).unwrap();
        let stats = grid.statistics().unwrap();
        assert!((stats.low_tail_mean - 50.5).abs() < 1e-9);
        assert!((stats.mean - 100.5).abs() < 1e-9);
        assert!((stats.uniformity_ratio - 50.5 / 100.5).abs() < 1e-9);
    }

    #[test]
    fn test_low_tail_uses_all_values_when_few() {
        let aggregator = GridAggregator::new(GridSpec::new(2, 2).with_bias(0));
        let grid = aggregator
            .aggregate(&LuxSequence::from(vec![4.0, 2.0, 8.0, 6.0]))
            .unwrap();
        let stats = grid.statistics().unwrap();
        assert!((stats.low_tail_mean - 5.0).abs() < 1e-9);
        assert!((stats.mean - 5.0).abs() < 1e-9);
        assert!((stats.uniformity_ratio - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_mean_is_degenerate() {
        let aggregator = GridAggregator::new(GridSpec::new(2, 1).with_bias(0));
        let grid = aggregator
            .aggregate(&LuxSequence::from(vec![0.0, 0.0]))
            .unwrap();
        assert!(matches!(
            grid.statistics(),
            Err(GridError::DegenerateGrid(_))
        ));
    }

    #[test]
    fn test_empty_sequence_is_degenerate() {
        let aggregator = GridAggregator::new(GridSpec::new(3, 2));
        let grid = aggregator.aggregate(&LuxSequence::default()).unwrap();
        assert_eq!(grid.num_values(), 0);
        assert!(matches!(
            grid.statistics(),
            Err(GridError::DegenerateGrid(_))
        ));
    }

    #[test]
    fn test_title_format() {
        let stats = GridStatistics {
            mean: 100.5,
            low_tail_mean: 50.5,
            uniformity_ratio: 50.5 / 100.5,
        };
        assert_eq!(stats.title(), "average degree: 0.502, mean=100.50, min=50.50");
    }
}
