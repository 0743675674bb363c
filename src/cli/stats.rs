use anyhow::Result;
use std::path::PathBuf;

#[cfg(feature = "colorized_output")]
use console::style;

use luxgrid::analysis::{AnalysisPipeline, AnalysisReport, IlluminanceAnalysis};
use luxgrid::grid::{GridAggregator, GridSpec};
use luxgrid::lux::LuxConverter;

use super::GridArgs;

/// Compute and print grid statistics for record file(s)
pub fn run(inputs: Vec<PathBuf>, grid_args: &GridArgs, json: bool) -> Result<()> {
    let (spec, policy) = grid_args.resolve()?;
    let pipeline = AnalysisPipeline::new(
        LuxConverter::new(),
        GridAggregator::new(spec).with_policy(policy),
    );
    let analysis = pipeline.run_files(&inputs)?;

    if json {
        let report = AnalysisReport::new(&inputs, &analysis);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_summary(&inputs, spec, &analysis);
    Ok(())
}

fn print_summary(inputs: &[PathBuf], spec: GridSpec, analysis: &IlluminanceAnalysis) {
    #[cfg(feature = "colorized_output")]
    {
        println!("{}", style("Illuminance Grid Statistics").bold().cyan());
        println!("{}", style("===========================").cyan());
    }
    #[cfg(not(feature = "colorized_output"))]
    {
        println!("Illuminance Grid Statistics");
        println!("===========================");
    }

    for input in inputs {
        println!("Input: {}", input.display());
    }
    println!();

    println!(
        "Grid: {} rows x {} columns (height {}, bias {})",
        analysis.grid.num_rows(),
        analysis.grid.row_len(),
        spec.height,
        spec.bias
    );
    println!("Values: {}", analysis.grid.num_values());
    println!();

    let stats = &analysis.statistics;
    println!("  Mean illuminance:  {:.2} lx", stats.mean);
    println!("  Low-tail mean:     {:.2} lx", stats.low_tail_mean);
    println!("  Uniformity ratio:  {:.3}", stats.uniformity_ratio);
}
