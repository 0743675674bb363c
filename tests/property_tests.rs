//! Property-based tests for the conversion and aggregation core.

use proptest::prelude::*;

use luxgrid::grid::{GridAggregator, GridSpec};
use luxgrid::lux::{combine, LuxConverter, LuxSequence};
use luxgrid::record::{RgbDataset, RgbSample};

fn sample_strategy() -> impl Strategy<Value = RgbSample> {
    (0.0f64..1e4, 0.0f64..1e4, 0.0f64..1e4).prop_map(|(r, g, b)| RgbSample::new(r, g, b))
}

fn dataset_strategy(len: usize) -> impl Strategy<Value = RgbDataset> {
    prop::collection::vec(sample_strategy(), len).prop_map(|samples| samples.into_iter().collect())
}

proptest! {
    /// Combining datasets then converting equals converting separately and
    /// summing the lux sequences
    #[test]
    fn test_combination_distributes_over_conversion(
        (a, b) in (1usize..50).prop_flat_map(|len| (dataset_strategy(len), dataset_strategy(len)))
    ) {
        let converter = LuxConverter::new();

        let combined = converter.convert_combined(&[a.clone(), b.clone()]).unwrap();
        let separate: Vec<f64> = converter
            .convert(&a)
            .values()
            .iter()
            .zip(converter.convert(&b).values())
            .map(|(x, y)| x + y)
            .collect();

        for (c, s) in combined.values().iter().zip(&separate) {
            prop_assert!((c - s).abs() < 1e-6 * s.abs().max(1.0));
        }
    }

    /// Combination is commutative
    #[test]
    fn test_combination_is_commutative(
        (a, b) in (1usize..50).prop_flat_map(|len| (dataset_strategy(len), dataset_strategy(len)))
    ) {
        prop_assert_eq!(
            combine(&[a.clone(), b.clone()]).unwrap(),
            combine(&[b, a]).unwrap()
        );
    }

    /// Combination is associative up to floating-point tolerance
    #[test]
    fn test_combination_is_associative(
        (a, b, c) in (1usize..30).prop_flat_map(|len| {
            (dataset_strategy(len), dataset_strategy(len), dataset_strategy(len))
        })
    ) {
        let left = combine(&[combine(&[a.clone(), b.clone()]).unwrap(), c.clone()]).unwrap();
        let right = combine(&[a, combine(&[b, c]).unwrap()]).unwrap();

        for (l, r) in left.iter().zip(right.iter()) {
            prop_assert!((l.r - r.r).abs() < 1e-6);
            prop_assert!((l.g - r.g).abs() < 1e-6);
            prop_assert!((l.b - r.b).abs() < 1e-6);
        }
    }

    /// Conversion output length always equals input length
    #[test]
    fn test_conversion_preserves_length(dataset in (0usize..200).prop_flat_map(dataset_strategy)) {
        let lux = LuxConverter::new().convert(&dataset);
        prop_assert_eq!(lux.len(), dataset.len());
    }

    /// Reshaping never yields more than `width` rows, and only the final
    /// row may be shorter than `height - bias`
    #[test]
    fn test_reshape_row_invariants(
        values in prop::collection::vec(0.0f64..1e4, 0..300),
        height in 1usize..20,
        width in 1usize..20,
    ) {
        let bias = height / 4;
        let aggregator = GridAggregator::new(GridSpec::new(height, width).with_bias(bias));
        let grid = aggregator.aggregate(&LuxSequence::from(values)).unwrap();

        prop_assert!(grid.num_rows() <= width);
        let row_len = height - bias;
        for (index, row) in grid.rows().iter().enumerate() {
            if index + 1 < grid.num_rows() {
                prop_assert_eq!(row.len(), row_len);
            } else {
                prop_assert!(row.len() <= row_len);
            }
        }
    }

    /// For positive grids the uniformity ratio is in (0, 1]
    #[test]
    fn test_uniformity_ratio_bounds(
        values in prop::collection::vec(1.0f64..1e4, 1..300),
        height in 1usize..20,
    ) {
        let width = values.len() / height + 1;
        let aggregator = GridAggregator::new(GridSpec::new(height, width).with_bias(0));
        let grid = aggregator.aggregate(&LuxSequence::from(values)).unwrap();
        let stats = grid.statistics().unwrap();

        prop_assert!(stats.uniformity_ratio > 0.0);
        prop_assert!(stats.uniformity_ratio <= 1.0 + 1e-12);
        prop_assert!(stats.low_tail_mean <= stats.mean + 1e-9);
    }
}
