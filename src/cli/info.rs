use anyhow::Result;
use std::path::PathBuf;

use luxgrid::lux::LuxConverter;
use luxgrid::record::{RgbDataset, RgbSample};

/// Display information about an RGB record file
pub fn run(file: PathBuf) -> Result<()> {
    let dataset = RgbDataset::from_path(&file)?;

    println!("RGB Record File Information");
    println!("===========================");
    println!("File: {}", file.display());
    println!();

    println!("Records: {}", dataset.len());
    println!();

    println!("Channel summary (min / max / mean):");
    print_channel("R", &dataset, |s| s.r);
    print_channel("G", &dataset, |s| s.g);
    print_channel("B", &dataset, |s| s.b);
    println!();

    let lux = LuxConverter::new().convert(&dataset);
    if let Some((min, max, mean)) = summarize(lux.values().iter().copied()) {
        println!("Illuminance (Radiance weighting):");
        println!("  min {min:.2} lx, max {max:.2} lx, mean {mean:.2} lx");
    }

    Ok(())
}

fn print_channel(name: &str, dataset: &RgbDataset, channel: fn(&RgbSample) -> f64) {
    if let Some((min, max, mean)) = summarize(dataset.iter().map(channel)) {
        println!("  {name}: {min:.4} / {max:.4} / {mean:.4}");
    } else {
        println!("  {name}: <empty>");
    }
}

fn summarize(values: impl Iterator<Item = f64>) -> Option<(f64, f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    let mut count = 0usize;

    for value in values {
        min = min.min(value);
        max = max.max(value);
        sum += value;
        count += 1;
    }

    (count > 0).then(|| (min, max, sum / count as f64))
}
