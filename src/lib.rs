//! # luxgrid - Daylight Illuminance Post-Processing
//!
//! `luxgrid` post-processes the RGB irradiance matrices produced by a
//! Radiance-based daylight simulation: it converts them into photometric
//! illuminance (lux), reshapes the flat sensor sequence into the 2-D grid
//! it was scanned from, and derives the summary statistics (mean, low-tail
//! mean, uniformity ratio) used to characterize lighting quality.
//!
//! The upstream simulation commands (`dctimestep`, `rcontrib`,
//! `gendaylit`) are external collaborators: this crate only consumes the
//! result files they write and never invokes them.
//!
//! ## Pipeline
//!
//! ```text
//! record file(s) ──► RgbDataset ──► LuxSequence ──► IlluminanceGrid
//!     (record)                        (lux)             (grid)
//!                                                         │
//!                                        GridStatistics + HeatmapJob
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use luxgrid::analysis::AnalysisPipeline;
//! use luxgrid::grid::{GridAggregator, GridSpec};
//! use luxgrid::lux::LuxConverter;
//!
//! let pipeline = AnalysisPipeline::new(
//!     LuxConverter::new(),
//!     GridAggregator::new(GridSpec::new(81, 35)),
//! );
//!
//! let analysis = pipeline.run_file("room_south.dat")?;
//! println!("{}", analysis.statistics.title());
//! # Ok::<(), luxgrid::analysis::AnalysisError>(())
//! ```
//!
//! Multiple result files for the same sensor grid (one per window) combine
//! additively:
//!
//! ```rust,no_run
//! # use std::path::PathBuf;
//! # use luxgrid::analysis::AnalysisPipeline;
//! # use luxgrid::grid::{GridAggregator, GridSpec};
//! # use luxgrid::lux::LuxConverter;
//! # let pipeline = AnalysisPipeline::new(
//! #     LuxConverter::new(),
//! #     GridAggregator::new(GridSpec::new(7, 9).with_bias(0)),
//! # );
//! let inputs = vec![
//!     PathBuf::from("room2windows_east.dat"),
//!     PathBuf::from("room2windows_south.dat"),
//! ];
//! let analysis = pipeline.run_files(&inputs)?;
//! # Ok::<(), luxgrid::analysis::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`record`]: parser for the whitespace-separated RGB record format
//! - [`lux`]: photometric weighting and multi-source combination
//! - [`grid`]: grid reshaping, bias handling and summary statistics
//! - [`render`]: renderer data contract plus a bitmap implementation
//!   (`render` feature)
//! - [`analysis`]: end-to-end orchestration, batch mode behind the
//!   `parallel` feature

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod analysis;
pub mod grid;
pub mod lux;
pub mod record;
pub mod render;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::analysis::{
        AnalysisError, AnalysisPipeline, AnalysisReport, IlluminanceAnalysis,
    };
    pub use crate::grid::{
        GridAggregator, GridError, GridSpec, GridStatistics, IlluminanceGrid, ReshapePolicy,
        LOW_TAIL_SAMPLE_COUNT,
    };
    pub use crate::lux::{combine, ConvertError, LuxConverter, LuxSequence, PhotometricWeights};
    pub use crate::record::{RecordError, RgbDataset, RgbSample};
    #[cfg(feature = "render")]
    pub use crate::render::BitmapRenderer;
    pub use crate::render::{HeatmapJob, HeatmapRenderer, RenderError, COLOR_SCALE_CEILING_LUX};
}
