//! Distance command - great-circle distance between two positions

use super::{format_km, print_json, OutputFormat};
use anyhow::Result;
use flightpath_geo::{distance, GeoPoint};
use owo_colors::{OwoColorize, Stream, Style};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct JsonDistanceOutput {
    from: GeoPoint,
    to: GeoPoint,
    distance_km: f64,
}

/// Run distance command
pub fn run(from: GeoPoint, to: GeoPoint, format: OutputFormat) -> Result<()> {
    let distance_km = distance(from, to);
    tracing::debug!(%from, %to, distance_km, "Computed distance");

    match format {
        OutputFormat::Json => print_json(&JsonDistanceOutput {
            from,
            to,
            distance_km,
        }),
        OutputFormat::Text => {
            println!(
                "Distance from {} to {}: {}",
                from,
                to,
                format_km(distance_km).if_supports_color(Stream::Stdout, |t| t.style(Style::new().green().bold()))
            );
            Ok(())
        }
    }
}
