use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use luxgrid::grid::{GridSpec, ReshapePolicy};

mod config;
mod convert;
mod info;
#[cfg(feature = "render")]
mod render;
mod stats;

pub use config::Config;

/// luxgrid - Daylight Simulation Illuminance Post-Processor
#[derive(Parser)]
#[command(name = "luxgrid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Reshape policy for inputs that do not fill the grid exactly.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum PolicyArg {
    /// Tolerate partial input and keep a short final row
    #[default]
    Truncate,
    /// Require the input to fill the grid exactly
    Strict,
}

impl From<PolicyArg> for ReshapePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Truncate => ReshapePolicy::TruncatePartial,
            PolicyArg::Strict => ReshapePolicy::Strict,
        }
    }
}

/// Grid-shape flags shared by the grid-producing commands.
#[derive(Debug, clap::Args)]
pub struct GridArgs {
    /// Sensor points per scan column
    #[arg(long)]
    height: Option<usize>,

    /// Number of scan columns
    #[arg(long)]
    width: Option<usize>,

    /// Trailing points per column excluded from the grid (default 1)
    #[arg(long)]
    bias: Option<usize>,

    /// Reshape policy for inputs that do not fill the grid exactly
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Load grid defaults from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl GridArgs {
    /// Resolve flags against the optional config file; flags win.
    pub fn resolve(&self) -> Result<(GridSpec, ReshapePolicy)> {
        let config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        let height = self
            .height
            .or(config.grid.height)
            .context("grid height not given (use --height or a config file)")?;
        let width = self
            .width
            .or(config.grid.width)
            .context("grid width not given (use --width or a config file)")?;
        let bias = self.bias.or(config.grid.bias).unwrap_or(1);

        let policy = match self.policy {
            Some(arg) => ReshapePolicy::from(arg),
            None if config.grid.strict.unwrap_or(false) => ReshapePolicy::Strict,
            None => ReshapePolicy::TruncatePartial,
        };

        Ok((GridSpec::new(height, width).with_bias(bias), policy))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert RGB record file(s) to an illuminance sequence
    Convert {
        /// Input record files; multiple files combine additively
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        /// Write values to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Emit JSON instead of one value per line
        #[arg(long)]
        json: bool,
    },

    /// Compute grid statistics for RGB record file(s)
    Stats {
        /// Input record files; multiple files combine additively
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        grid: GridArgs,

        /// Emit a JSON report instead of the text summary
        #[arg(long)]
        json: bool,
    },

    /// Render a heat-map image for RGB record file(s)
    #[cfg(feature = "render")]
    Render {
        /// Input record files; multiple files combine additively
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        grid: GridArgs,

        /// Output image path
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        // === Advanced tuning flags (hidden from --help) ===
        /// Image width in pixels
        #[arg(long, default_value = "800", hide = true)]
        pixel_width: u32,

        /// Image height in pixels
        #[arg(long, default_value = "600", hide = true)]
        pixel_height: u32,
    },

    /// Display information about an RGB record file
    Info {
        /// Input record file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert {
            inputs,
            output,
            json,
        } => convert::run(inputs, output, json),
        Commands::Stats { inputs, grid, json } => stats::run(inputs, &grid, json),
        #[cfg(feature = "render")]
        Commands::Render {
            inputs,
            grid,
            output,
            pixel_width,
            pixel_height,
        } => render::run(inputs, &grid, output, pixel_width, pixel_height),
        Commands::Info { file } => info::run(file),
    }
}
