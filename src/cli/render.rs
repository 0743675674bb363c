use anyhow::Result;
use log::info;
use std::path::PathBuf;

use luxgrid::analysis::AnalysisPipeline;
use luxgrid::grid::GridAggregator;
use luxgrid::lux::LuxConverter;
use luxgrid::render::{BitmapRenderer, HeatmapJob, HeatmapRenderer};

use super::GridArgs;

/// Render a heat-map image for record file(s)
pub fn run(
    inputs: Vec<PathBuf>,
    grid_args: &GridArgs,
    output: PathBuf,
    pixel_width: u32,
    pixel_height: u32,
) -> Result<()> {
    let (spec, policy) = grid_args.resolve()?;
    let pipeline = AnalysisPipeline::new(
        LuxConverter::new(),
        GridAggregator::new(spec).with_policy(policy),
    );
    let analysis = pipeline.run_files(&inputs)?;

    let job = HeatmapJob::new(analysis.grid.clone(), &analysis.statistics).with_output(&output);
    let renderer = BitmapRenderer {
        pixel_width,
        pixel_height,
    };
    renderer.render(&job)?;

    info!("rendered heat-map to {}", output.display());
    println!("{}", analysis.statistics.title());
    println!("Wrote {}", output.display());
    Ok(())
}
