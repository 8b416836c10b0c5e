//! Route command - sample the great circle between two positions

use super::{format_km, print_header, print_json, OutputFormat};
use anyhow::Result;
use flightpath_geo::{distance, interpolate, GeoPoint, GreatCirclePath};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct JsonRouteOutput {
    from: GeoPoint,
    to: GeoPoint,
    distance_km: f64,
    segments: usize,
    path: GreatCirclePath,
}

/// Run route command
pub fn run(from: GeoPoint, to: GeoPoint, segments: usize, format: OutputFormat) -> Result<()> {
    let path = interpolate(from, to, segments);
    let distance_km = distance(from, to);

    if format == OutputFormat::Json {
        return print_json(&JsonRouteOutput {
            from,
            to,
            distance_km,
            segments: path.len() - 1,
            path,
        });
    }

    print_header("Great-circle route");
    for (i, point) in path.iter().enumerate() {
        let travelled = distance(from, *point);
        println!(
            "  {:>4}  {:>10.4} {:>11.4}  {}",
            i.if_supports_color(Stream::Stdout, |t| t.dimmed()),
            point.latitude,
            point.longitude,
            format_km(travelled).if_supports_color(Stream::Stdout, |t| t.dimmed())
        );
    }
    println!();
    println!("  Total: {}", format_km(distance_km).if_supports_color(Stream::Stdout, |t| t.green()));
    println!();
    Ok(())
}
