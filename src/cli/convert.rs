use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use luxgrid::lux::LuxConverter;
use luxgrid::record::RgbDataset;

/// Convert record file(s) into an illuminance sequence
pub fn run(inputs: Vec<PathBuf>, output: Option<PathBuf>, json: bool) -> Result<()> {
    let datasets = inputs
        .iter()
        .map(RgbDataset::from_path)
        .collect::<Result<Vec<_>, _>>()?;

    let converter = LuxConverter::new();
    let lux = converter.convert_combined(&datasets)?;
    info!(
        "converted {} sensor points from {} file(s)",
        lux.len(),
        inputs.len()
    );

    let rendered = if json {
        let mut body = serde_json::to_string_pretty(lux.values())?;
        body.push('\n');
        body
    } else {
        lux.values()
            .iter()
            .map(|value| format!("{value}\n"))
            .collect()
    };

    match output {
        Some(path) => std::fs::write(&path, rendered)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{rendered}"),
    }

    Ok(())
}
