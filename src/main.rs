//! # luxgrid
//!
//! Command-line post-processor for daylight-simulation RGB irradiance
//! output.
//!
//! ## Usage
//!
//! ```bash
//! # Statistics for a single simulation result
//! luxgrid stats room_south.dat --height 81 --width 35
//!
//! # Combine two windows and render a heat-map
//! luxgrid render east.dat south.dat --height 7 --width 9 --bias 0 -o room.png
//!
//! # Raw lux values, one per line
//! luxgrid convert room_south.dat
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
