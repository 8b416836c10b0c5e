//! Track command - follow a live position feed towards a destination

use super::{format_km, OutputFormat};
use crate::config::Config;
use crate::feed::PositionSubscription;
use crate::source::{fetch_dataset, parse_airports};
use anyhow::{anyhow, Result};
use flightpath_geo::{
    select_destination, GeoPoint, ScanRange, TrackingFrame, TrackingSession, TrackingSnapshot,
};
use flightpath_telemetry::Timer;
use owo_colors::{OwoColorize, Stream, Style};

/// How the destination was given on the command line
#[derive(Debug, Clone, PartialEq)]
pub enum Destination {
    Position(GeoPoint),
    /// Airport name from the selection list
    Airport(String),
}

/// Run track command
///
/// Reads position updates from stdin and prints one frame per update until
/// the input ends or Ctrl-C is pressed.
pub async fn run(config: &Config, destination: Destination, format: OutputFormat) -> Result<()> {
    let text = fetch_dataset(&config.schema.dataset).await?;
    let destination = resolve_destination(&text, config, &destination)?;

    let session = TrackingSession::new(
        parse_airports(&text, ScanRange::Full),
        config.schema.tracking,
    );
    drop(text);

    tracing::info!(
        %destination,
        candidates = session.candidates().len(),
        "Tracking started"
    );

    let feed = PositionSubscription::spawn(std::io::BufReader::new(std::io::stdin()))?;
    let frames = follow(&session, destination, feed, format, tokio::signal::ctrl_c()).await?;

    tracing::info!(frames, "Tracking stopped");
    Ok(())
}

/// Consume the feed until it ends or `shutdown` fires
///
/// If the interrupt handler cannot be installed, tracking carries on until
/// the feed ends.
async fn follow(
    session: &TrackingSession,
    destination: GeoPoint,
    mut feed: PositionSubscription,
    format: OutputFormat,
    shutdown: impl Future<Output = std::io::Result<()>>,
) -> Result<usize> {
    let mut snapshot = TrackingSnapshot::awaiting_fix(Some(destination));
    let mut frames = 0;

    tokio::pin!(shutdown);
    let mut interruptible = true;

    loop {
        tokio::select! {
            update = feed.next() => {
                let Some(position) = update else { break };
                snapshot = snapshot.with_position(position);

                let timer = Timer::start("frame_compute");
                let frame = session.compute(&snapshot);
                timer.stop();

                print_frame(&frame, format)?;
                frames += 1;
            }
            signal = &mut shutdown, if interruptible => match signal {
                Ok(()) => {
                    tracing::info!("Interrupted; unsubscribing from position feed");
                    break;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
                    interruptible = false;
                }
            },
        }
    }

    Ok(frames)
}

fn resolve_destination(text: &str, config: &Config, destination: &Destination) -> Result<GeoPoint> {
    match destination {
        Destination::Position(point) => Ok(GeoPoint::try_new(point.latitude, point.longitude)?),
        Destination::Airport(name) => {
            let selectable = parse_airports(text, config.schema.dataset.selection_scan);
            let record = selectable
                .iter()
                .find(|a| a.name.eq_ignore_ascii_case(name))
                .ok_or_else(|| anyhow!("Airport {:?} is not in the selection list", name))?;
            Ok(select_destination(record)?)
        }
    }
}

fn print_frame(frame: &TrackingFrame, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string(frame)?);
        return Ok(());
    }

    let distance = frame
        .distance_km
        .map(format_km)
        .unwrap_or_else(|| "-".to_string());
    let nearest = frame
        .nearest
        .iter()
        .map(|r| format!("{} ({})", r.record.name, format_km(r.distance_km)))
        .collect::<Vec<_>>()
        .join(", ");

    println!(
        "{} {}  Distance to destination: {}  Nearest: {}",
        "▶".if_supports_color(Stream::Stdout, |t| t.blue()),
        frame.position,
        distance.if_supports_color(Stream::Stdout, |t| t.style(Style::new().green().bold())),
        nearest.if_supports_color(Stream::Stdout, |t| t.dimmed())
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigSchema;
    use std::io::Cursor;

    const CSV: &str = "KPHL,39.8719,-75.2411\nEGLL,51.4706,-0.4619\nZERO,51.0,0.0\n";

    fn config() -> Config {
        let mut schema = ConfigSchema::default();
        schema.dataset.selection_scan = ScanRange::Lines { start: 1, end: 3 };
        Config { schema, path: None }
    }

    #[test]
    fn test_resolve_destination_by_name() {
        let dest = resolve_destination(CSV, &config(), &Destination::Airport("egll".into())).unwrap();
        assert_eq!(dest, GeoPoint::new(51.4706, -0.4619));
    }

    #[test]
    fn test_resolve_destination_outside_selection() {
        let err =
            resolve_destination(CSV, &config(), &Destination::Airport("KPHL".into())).unwrap_err();
        assert!(err.to_string().contains("not in the selection list"));
    }

    #[test]
    fn test_resolve_destination_rejected_by_policy() {
        assert!(resolve_destination(CSV, &config(), &Destination::Airport("ZERO".into())).is_err());
    }

    #[test]
    fn test_resolve_destination_position() {
        let dest = Destination::Position(GeoPoint::new(51.5, -0.1));
        assert_eq!(
            resolve_destination(CSV, &config(), &dest).unwrap(),
            GeoPoint::new(51.5, -0.1)
        );
        let bad = Destination::Position(GeoPoint::new(f64::NAN, -0.1));
        assert!(resolve_destination(CSV, &config(), &bad).is_err());
    }

    #[tokio::test]
    async fn test_follow_counts_frames() {
        let session = TrackingSession::new(
            parse_airports(CSV, ScanRange::Full),
            Default::default(),
        );
        let feed = PositionSubscription::spawn(Cursor::new("40.0,-75.0\nbogus\n51.0,-1.0\n")).unwrap();

        let frames = follow(
            &session,
            GeoPoint::new(51.5, -0.1),
            feed,
            OutputFormat::Json,
            std::future::pending(),
        )
        .await
        .unwrap();
        assert_eq!(frames, 2);
    }

    #[tokio::test]
    async fn test_follow_survives_missing_interrupt_handler() {
        let session = TrackingSession::new(
            parse_airports(CSV, ScanRange::Full),
            Default::default(),
        );
        let feed = PositionSubscription::spawn(Cursor::new("40.0,-75.0
51.0,-1.0
52.0,1.0
")).unwrap();
        let unavailable = async { Err(std::io::Error::other("signal driver unavailable")) };

        let frames = follow(&session, GeoPoint::new(51.5, -0.1), feed, OutputFormat::Json, unavailable)
            .await
            .unwrap();
        assert_eq!(frames, 3);
    }
}
