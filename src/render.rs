//! # Heat-map Rendering
//!
//! Data contract for the rendering collaborator plus a bundled bitmap
//! implementation behind the `render` feature.
//!
//! A renderer is a pure sink: it consumes an [`IlluminanceGrid`], a title
//! string, the fixed color-scale ceiling and an optional output path, and
//! returns nothing the pipeline consumes. The ceiling is shared by every
//! render so plots of different dates, angles and rooms stay visually
//! comparable.

use std::path::PathBuf;

use crate::grid::{GridStatistics, IlluminanceGrid};

/// Fixed color-scale ceiling in lux shared by every render.
pub const COLOR_SCALE_CEILING_LUX: f64 = 2000.0;

/// Errors that can occur while rendering
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Renderer needs an output path but none was supplied
    #[error("renderer requires an output path")]
    OutputPathRequired,

    /// Failure inside the drawing backend
    #[error("render backend error: {0}")]
    Backend(String),
}

/// Everything a renderer consumes.
#[derive(Debug, Clone)]
pub struct HeatmapJob {
    /// Grid to plot
    pub grid: IlluminanceGrid,
    /// Plot title
    pub title: String,
    /// Upper end of the color scale in lux
    pub ceiling: f64,
    /// Where to persist the render; display interactively when absent
    pub output: Option<PathBuf>,
}

impl HeatmapJob {
    /// Job for a grid with the standard title and ceiling.
    pub fn new(grid: IlluminanceGrid, statistics: &GridStatistics) -> Self {
        Self {
            grid,
            title: statistics.title(),
            ceiling: COLOR_SCALE_CEILING_LUX,
            output: None,
        }
    }

    /// Persist the render to `path` instead of displaying it.
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }
}

/// Sink interface implemented by rendering backends.
pub trait HeatmapRenderer {
    /// Render the job.
    fn render(&self, job: &HeatmapJob) -> Result<(), RenderError>;
}

#[cfg(feature = "render")]
pub use bitmap::BitmapRenderer;

#[cfg(feature = "render")]
mod bitmap {
    use plotters::prelude::*;
    use plotters::style::colors::colormaps::{ColorMap, ViridisRGB};

    use super::{HeatmapJob, HeatmapRenderer, RenderError};

    /// Renders heat-maps to bitmap image files via plotters.
    ///
    /// There is no interactive display backend, so a job without an output
    /// path is rejected with [`RenderError::OutputPathRequired`].
    #[derive(Debug, Clone, Copy)]
    pub struct BitmapRenderer {
        /// Image width in pixels
        pub pixel_width: u32,
        /// Image height in pixels
        pub pixel_height: u32,
    }

    impl Default for BitmapRenderer {
        fn default() -> Self {
            Self {
                pixel_width: 800,
                pixel_height: 600,
            }
        }
    }

    impl HeatmapRenderer for BitmapRenderer {
        fn render(&self, job: &HeatmapJob) -> Result<(), RenderError> {
            let path = job.output.as_ref().ok_or(RenderError::OutputPathRequired)?;
            let cols = job.grid.row_len();
            let rows = job.grid.num_rows();
            if cols == 0 || rows == 0 {
                return Err(RenderError::Backend("grid holds no values".into()));
            }

            let root = BitMapBackend::new(path, (self.pixel_width, self.pixel_height))
                .into_drawing_area();
            root.fill(&WHITE).map_err(backend)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(&job.title, ("sans-serif", 18))
                .margin(12)
                .x_label_area_size(28)
                .y_label_area_size(36)
                .build_cartesian_2d(0i32..cols as i32, 0i32..rows as i32)
                .map_err(backend)?;
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .draw()
                .map_err(backend)?;

            let ceiling = job.ceiling;
            chart
                .draw_series(job.grid.rows().iter().enumerate().flat_map(|(y, row)| {
                    row.iter().enumerate().map(move |(x, &value)| {
                        let t = (value / ceiling).clamp(0.0, 1.0) as f32;
                        Rectangle::new(
                            [(x as i32, y as i32), (x as i32 + 1, y as i32 + 1)],
                            ViridisRGB.get_color(t).filled(),
                        )
                    })
                }))
                .map_err(backend)?;

            root.present().map_err(backend)?;
            Ok(())
        }
    }

    fn backend<E: std::fmt::Display>(error: E) -> RenderError {
        RenderError::Backend(error.to_string())
    }
}
