//! flightpath - great-circle tracking CLI
//!
//! Loads the airport dataset, answers distance/route/nearest queries and
//! follows a live position feed towards a chosen destination.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use flightpath_geo::{GeoPoint, DEFAULT_PATH_SAMPLES};
use owo_colors::{OwoColorize, Stream, Style};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod config;
mod feed;
mod source;

use commands::{airports, distance, nearest, route, track, OutputFormat};
use config::Config;

/// Great-circle tracking towards a destination airport
#[derive(Parser)]
#[command(name = "flightpath")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to flightpath.toml in the standard locations)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Airport dataset path or URL (overrides the configuration)
    #[arg(short, long, global = true)]
    dataset: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List airports offered as destinations
    Airports {
        /// List the whole dataset instead of the selection window
        #[arg(long)]
        all: bool,
    },

    /// Great-circle distance between two positions
    Distance {
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        #[arg(allow_negative_numbers = true)]
        lon1: f64,
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        #[arg(allow_negative_numbers = true)]
        lon2: f64,
    },

    /// Points along the great circle between two positions
    Route {
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        #[arg(allow_negative_numbers = true)]
        lon1: f64,
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        #[arg(allow_negative_numbers = true)]
        lon2: f64,

        /// Number of segments
        #[arg(short = 'n', long, default_value_t = DEFAULT_PATH_SAMPLES)]
        segments: usize,
    },

    /// Airports closest to a position
    Nearest {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,

        /// How many airports to list (defaults to the configured count)
        #[arg(short, long)]
        k: Option<usize>,

        /// List every airport within this many kilometers instead
        #[arg(short, long, conflicts_with = "k")]
        radius: Option<f64>,
    },

    /// Follow `lat,lon` position updates from stdin towards a destination
    Track {
        /// Destination position
        #[arg(long, num_args = 2, value_names = ["LAT", "LON"], allow_negative_numbers = true)]
        to: Option<Vec<f64>>,

        /// Destination airport name from the selection list
        #[arg(long, conflicts_with = "to")]
        airport: Option<String>,
    },
}

fn init_logging(config: &Config, verbose: bool) -> Result<()> {
    let logging = config.schema.logging.clone();
    let logging = if verbose {
        logging.with_level("flightpath=debug,flightpath_telemetry=debug")
    } else {
        logging
    };
    flightpath_telemetry::init_with_config(logging)
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dataset) = cli.dataset {
        config.schema.dataset.source = dataset;
    }

    init_logging(&config, cli.verbose)?;
    if let Some(path) = &config.path {
        tracing::debug!(path = %path.display(), "Loaded configuration");
    }

    let format = cli.format;
    match cli.command {
        Commands::Airports { all } => airports::run(&config, all, format).await,

        Commands::Distance { lat1, lon1, lat2, lon2 } => distance::run(
            GeoPoint::new(lat1, lon1),
            GeoPoint::new(lat2, lon2),
            format,
        ),

        Commands::Route { lat1, lon1, lat2, lon2, segments } => route::run(
            GeoPoint::new(lat1, lon1),
            GeoPoint::new(lat2, lon2),
            segments,
            format,
        ),

        Commands::Nearest { lat, lon, k, radius } => {
            nearest::run(&config, GeoPoint::new(lat, lon), k, radius, format).await
        }

        Commands::Track { to, airport } => {
            let destination = match (to.as_deref(), airport) {
                (Some(&[lat, lon]), _) => track::Destination::Position(GeoPoint::new(lat, lon)),
                (_, Some(name)) => track::Destination::Airport(name),
                _ => bail!("Choose a destination with --to <LAT> <LON> or --airport <NAME>"),
            };
            track::run(&config, destination, format).await
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{} {:#}",
                "Error:".if_supports_color(Stream::Stderr, |t| t.style(Style::new().red().bold())),
                e
            );
            ExitCode::FAILURE
        }
    }
}
