//! # Lux Conversion
//!
//! Converts RGB irradiance samples into photometric illuminance:
//!
//! ```text
//! lux = 179 * (0.265 R + 0.670 G + 0.065 B)
//! ```
//!
//! These are the luminous-efficacy constants the Radiance toolchain bakes
//! into its own `rcalc` conversion. They are domain constants, not tuning
//! knobs: downstream results are only comparable with the upstream
//! simulation when the weighting is reproduced exactly. The weighting is
//! carried by a [`PhotometricWeights`] value injected at converter
//! construction, with the Radiance constants as the default.
//!
//! When several independent simulation runs illuminate the same sensor grid
//! (one result file per window), their irradiance contributions are
//! additive: the converter first sums the channel values element-wise
//! across all sources, then applies the weighting to the combined triples.

use serde::{Deserialize, Serialize};

use crate::record::{RgbDataset, RgbSample};

/// Errors that can occur when combining and converting datasets
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Multi-source combination over datasets of unequal length
    #[error("dataset length mismatch: expected {expected} samples, got {actual}")]
    LengthMismatch {
        /// Length of the first dataset
        expected: usize,
        /// Length of the dataset that did not match
        actual: usize,
    },

    /// Multi-source combination given no datasets at all
    #[error("no input datasets supplied")]
    NoSources,
}

/// Channel weights and multiplier for the RGB to lux conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhotometricWeights {
    /// Red channel weight
    pub factor_r: f64,
    /// Green channel weight
    pub factor_g: f64,
    /// Blue channel weight
    pub factor_b: f64,
    /// Scalar multiplier applied after channel weighting
    pub multiplier: f64,
}

impl PhotometricWeights {
    /// The standard Radiance luminous-efficacy weighting.
    pub const RADIANCE: Self = Self {
        factor_r: 0.265,
        factor_g: 0.670,
        factor_b: 0.065,
        multiplier: 179.0,
    };

    /// Illuminance of a single sample under this weighting.
    ///
    /// Channel values are never clamped or rescaled: negative or
    /// implausible inputs pass through unchanged.
    pub fn apply(&self, sample: &RgbSample) -> f64 {
        self.multiplier
            * (sample.r * self.factor_r + sample.g * self.factor_g + sample.b * self.factor_b)
    }
}

impl Default for PhotometricWeights {
    fn default() -> Self {
        Self::RADIANCE
    }
}

/// An ordered sequence of illuminance values, one per sensor point.
///
/// Same length and index order as the source dataset(s).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LuxSequence {
    values: Vec<f64>,
}

impl LuxSequence {
    /// Number of illuminance values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the sequence contains no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The illuminance values in sensor scan order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consume the sequence, returning the underlying values.
    pub fn into_inner(self) -> Vec<f64> {
        self.values
    }
}

impl From<Vec<f64>> for LuxSequence {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

/// Converts RGB datasets into illuminance sequences.
#[derive(Debug, Clone, Copy, Default)]
pub struct LuxConverter {
    weights: PhotometricWeights,
}

impl LuxConverter {
    /// Converter with the standard Radiance weighting.
    pub fn new() -> Self {
        Self::default()
    }

    /// Converter with custom weights.
    pub fn with_weights(weights: PhotometricWeights) -> Self {
        Self { weights }
    }

    /// The weighting this converter applies.
    pub fn weights(&self) -> PhotometricWeights {
        self.weights
    }

    /// Convert a single dataset.
    ///
    /// The output has the same length and index order as the input.
    pub fn convert(&self, dataset: &RgbDataset) -> LuxSequence {
        LuxSequence {
            values: dataset.iter().map(|s| self.weights.apply(s)).collect(),
        }
    }

    /// Combine several aligned datasets channel-wise, then convert.
    ///
    /// All datasets must have identical length; a mismatch fails with
    /// [`ConvertError::LengthMismatch`] rather than truncating.
    pub fn convert_combined(&self, datasets: &[RgbDataset]) -> Result<LuxSequence, ConvertError> {
        let combined = combine(datasets)?;
        Ok(self.convert(&combined))
    }
}

/// Element-wise sum of channel values across equal-length datasets.
///
/// Used when several independent simulations (e.g. separate windows)
/// illuminate the same sensor grid.
pub fn combine(datasets: &[RgbDataset]) -> Result<RgbDataset, ConvertError> {
    let (first, rest) = datasets.split_first().ok_or(ConvertError::NoSources)?;
    let mut combined: Vec<RgbSample> = first.samples().to_vec();
    for dataset in rest {
        if dataset.len() != combined.len() {
            return Err(ConvertError::LengthMismatch {
                expected: combined.len(),
                actual: dataset.len(),
            });
        }
        for (total, sample) in combined.iter_mut().zip(dataset.iter()) {
            total.r += sample.r;
            total.g += sample.g;
            total.b += sample.b;
        }
    }
    Ok(combined.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(samples: &[(f64, f64, f64)]) -> RgbDataset {
        samples
            .iter()
            .map(|&(r, g, b)| RgbSample::new(r, g, b))
            .collect()
    }

    #[test]
    fn test_zero_sample_converts_to_zero() {
        let converter = LuxConverter::new();
        let lux = converter.convert(&dataset(&[(0.0, 0.0, 0.0)]));
        assert_eq!(lux.values(), &[0.0]);
    }

    #[test]
    fn test_unit_red_sample() {
        let converter = LuxConverter::new();
        let lux = converter.convert(&dataset(&[(1.0, 0.0, 0.0)]));
        assert!((lux.values()[0] - 47.435).abs() < 1e-9);
    }

    #[test]
    fn test_output_length_matches_input() {
        let converter = LuxConverter::new();
        let lux = converter.convert(&dataset(&[(1.0, 1.0, 1.0); 7]));
        assert_eq!(lux.len(), 7);
    }

    #[test]
    fn test_negative_values_pass_through() {
        let converter = LuxConverter::new();
        let lux = converter.convert(&dataset(&[(-1.0, 0.0, 0.0)]));
        assert!((lux.values()[0] + 47.435).abs() < 1e-9);
    }

    #[test]
    fn test_combined_equals_sum_of_converted() {
        let converter = LuxConverter::new();
        let a = dataset(&[(1.0, 2.0, 3.0), (0.5, 0.0, 0.25)]);
        let b = dataset(&[(4.0, 5.0, 6.0), (0.0, 1.5, 0.75)]);

        let combined = converter.convert_combined(&[a.clone(), b.clone()]).unwrap();
        let separate: Vec<f64> = converter
            .convert(&a)
            .values()
            .iter()
            .zip(converter.convert(&b).values())
            .map(|(x, y)| x + y)
            .collect();

        for (c, s) in combined.values().iter().zip(&separate) {
            assert!((c - s).abs() < 1e-9);
        }
    }

    #[test]
    fn test_length_mismatch() {
        let converter = LuxConverter::new();
        let a = dataset(&[(1.0, 1.0, 1.0); 5]);
        let b = dataset(&[(1.0, 1.0, 1.0); 6]);
        let err = converter.convert_combined(&[a, b]).unwrap_err();
        match err {
            ConvertError::LengthMismatch { expected, actual } => {
                assert_eq!(expected, 5);
                assert_eq!(actual, 6);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_no_sources() {
        let err = combine(&[]).unwrap_err();
        assert!(matches!(err, ConvertError::NoSources));
    }

    #[test]
    fn test_single_source_combine_is_identity() {
        let a = dataset(&[(1.0, 2.0, 3.0)]);
        assert_eq!(combine(std::slice::from_ref(&a)).unwrap(), a);
    }

    #[test]
    fn test_custom_weights() {
        let converter = LuxConverter::with_weights(PhotometricWeights {
            factor_r: 1.0,
            factor_g: 0.0,
            factor_b: 0.0,
            multiplier: 2.0,
        });
        let lux = converter.convert(&dataset(&[(3.0, 100.0, 100.0)]));
        assert!((lux.values()[0] - 6.0).abs() < 1e-12);
    }
}
