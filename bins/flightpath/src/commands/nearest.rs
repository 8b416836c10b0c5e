//! Nearest command - rank airports around a position

use super::{format_km, print_header, print_json, OutputFormat};
use crate::config::Config;
use crate::source::load_airports;
use anyhow::Result;
use flightpath_geo::{nearest, within_radius, GeoPoint, RankedAirport, ScanRange};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct JsonNearestOutput {
    position: GeoPoint,
    airports: Vec<RankedAirport>,
}

/// Run nearest command
///
/// Ranks the whole dataset. With `radius_km` every airport inside the radius
/// is listed instead of the top `k`.
pub async fn run(
    config: &Config,
    position: GeoPoint,
    k: Option<usize>,
    radius_km: Option<f64>,
    format: OutputFormat,
) -> Result<()> {
    let candidates = load_airports(&config.schema.dataset, ScanRange::Full).await?;

    if position.is_sentinel() {
        tracing::warn!("Position (0, 0) means no fix; nothing to rank");
    }

    let airports = match radius_km {
        Some(radius) => within_radius(position, &candidates, radius),
        None => nearest(
            position,
            &candidates,
            k.unwrap_or(config.schema.tracking.nearest_count),
        ),
    };

    if format == OutputFormat::Json {
        return print_json(&JsonNearestOutput { position, airports });
    }

    print_header(&format!("Nearest airports to {}", position));
    for (i, ranked) in airports.iter().enumerate() {
        println!(
            "  {:>2}. {:<40} {:>12}",
            i + 1,
            ranked.record.name,
            format_km(ranked.distance_km).if_supports_color(Stream::Stdout, |t| t.green())
        );
    }
    if airports.is_empty() {
        println!("  {}", "No airports found".if_supports_color(Stream::Stdout, |t| t.yellow()));
    }
    println!();
    Ok(())
}
