//! Airports command - list destinations offered for selection

use super::{print_header, print_json, OutputFormat};
use crate::config::Config;
use crate::source::load_airports;
use anyhow::Result;
use flightpath_geo::{select_destination, ScanRange};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct JsonAirportsOutput<'a> {
    total: usize,
    scan: ScanRange,
    airports: &'a [flightpath_geo::AirportRecord],
}

/// Run airports command
///
/// Lists the configured selection window, or the whole dataset with `all`.
/// Airports that cannot be chosen as a destination are dimmed.
pub async fn run(config: &Config, all: bool, format: OutputFormat) -> Result<()> {
    let scan = if all {
        ScanRange::Full
    } else {
        config.schema.dataset.selection_scan
    };
    let airports = load_airports(&config.schema.dataset, scan).await?;

    if format == OutputFormat::Json {
        return print_json(&JsonAirportsOutput {
            total: airports.len(),
            scan,
            airports: &airports,
        });
    }

    print_header("Select Destination");
    println!(
        "  {:<40} {:>10} {:>11}",
        "Name".if_supports_color(Stream::Stdout, |t| t.dimmed()),
        "Latitude".if_supports_color(Stream::Stdout, |t| t.dimmed()),
        "Longitude".if_supports_color(Stream::Stdout, |t| t.dimmed())
    );

    for airport in &airports {
        let line = format!(
            "  {:<40} {:>10.4} {:>11.4}",
            airport.name, airport.location.latitude, airport.location.longitude
        );
        if select_destination(airport).is_ok() {
            println!("{}", line);
        } else {
            println!("{}", line.if_supports_color(Stream::Stdout, |t| t.dimmed()));
        }
    }

    println!();
    println!("  Total: {} airports", airports.len().if_supports_color(Stream::Stdout, |t| t.green()));
    println!();
    Ok(())
}
