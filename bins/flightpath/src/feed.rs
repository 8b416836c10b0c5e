//! Live position feed
//!
//! Position updates arrive as text lines (`lat,lon` or `lat lon`) at
//! arbitrary intervals. A reader thread parses them and pushes each fix into
//! a channel; the consumer owns the [`PositionSubscription`] and dropping it
//! unsubscribes.

use anyhow::{bail, Context, Result};
use flightpath_geo::GeoPoint;
use std::io::BufRead;
use tokio::sync::mpsc;

/// Updates buffered between the reader and a slow consumer
const FEED_BUFFER: usize = 64;

/// Parse one update line. Blank lines carry no update.
pub fn parse_update(line: &str) -> Result<Option<GeoPoint>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let mut fields = trimmed
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|field| !field.is_empty());

    let (Some(lat), Some(lon), None) = (fields.next(), fields.next(), fields.next()) else {
        bail!("expected `lat,lon`, got {:?}", trimmed);
    };

    let latitude: f64 = lat
        .parse()
        .with_context(|| format!("latitude {:?} is not a number", lat))?;
    let longitude: f64 = lon
        .parse()
        .with_context(|| format!("longitude {:?} is not a number", lon))?;

    Ok(Some(GeoPoint::try_new(latitude, longitude)?))
}

/// Receiving end of a running position feed
pub struct PositionSubscription {
    updates: mpsc::Receiver<GeoPoint>,
}

impl PositionSubscription {
    /// Start reading updates from `reader` on a background thread
    ///
    /// Malformed lines are logged and skipped. The feed ends at end of input,
    /// on a read error, or once the subscription is dropped.
    pub fn spawn<R>(reader: R) -> Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let (tx, updates) = mpsc::channel(FEED_BUFFER);

        std::thread::Builder::new()
            .name("position-feed".into())
            .spawn(move || read_updates(reader, tx))
            .context("Failed to start position feed")?;

        Ok(Self { updates })
    }

    /// Next position fix, or `None` once the feed has ended
    pub async fn next(&mut self) -> Option<GeoPoint> {
        self.updates.recv().await
    }
}

fn read_updates<R: BufRead>(mut reader: R, tx: mpsc::Sender<GeoPoint>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Position feed read failed");
                break;
            }
        }

        // undecodable bytes become U+FFFD and fail to parse like any other garbage
        let line = String::from_utf8_lossy(&buf);
        match parse_update(&line) {
            Ok(Some(position)) => {
                if tx.blocking_send(position).is_err() {
                    tracing::debug!("Position subscriber gone");
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Ignoring malformed position update"),
        }
    }
    tracing::debug!("Position feed closed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_update_forms() {
        let expected = Some(GeoPoint::new(40.0, -75.0));
        assert_eq!(parse_update("40.0,-75.0").unwrap(), expected);
        assert_eq!(parse_update(" 40.0 -75.0 \r").unwrap(), expected);
        assert_eq!(parse_update("40.0, -75.0").unwrap(), expected);
        assert_eq!(parse_update("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_update_rejects_garbage() {
        assert!(parse_update("40.0").is_err());
        assert!(parse_update("40.0,-75.0,100").is_err());
        assert!(parse_update("north,west").is_err());
        assert!(parse_update("NaN,1.0").is_err());
        assert!(parse_update("95.0,1.0").is_err());
    }

    #[tokio::test]
    async fn test_subscription_yields_valid_updates_in_order() {
        let input = "40.0,-75.0\nnot a position\n\n51.0,-1.0\n";
        let mut feed = PositionSubscription::spawn(Cursor::new(input)).unwrap();

        assert_eq!(feed.next().await, Some(GeoPoint::new(40.0, -75.0)));
        assert_eq!(feed.next().await, Some(GeoPoint::new(51.0, -1.0)));
        assert_eq!(feed.next().await, None);
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_is_skipped() {
        let input: &[u8] = b"40,-75\n\xff\xfe\n51,0.5\n";
        let mut feed = PositionSubscription::spawn(Cursor::new(input)).unwrap();

        assert_eq!(feed.next().await, Some(GeoPoint::new(40.0, -75.0)));
        assert_eq!(feed.next().await, Some(GeoPoint::new(51.0, 0.5)));
        assert_eq!(feed.next().await, None);
    }

    #[tokio::test]
    async fn test_last_line_without_newline() {
        let mut feed = PositionSubscription::spawn(Cursor::new("51.0,0.5")).unwrap();
        assert_eq!(feed.next().await, Some(GeoPoint::new(51.0, 0.5)));
        assert_eq!(feed.next().await, None);
    }

    #[tokio::test]
    async fn test_empty_feed() {
        let mut feed = PositionSubscription::spawn(Cursor::new("")).unwrap();
        assert_eq!(feed.next().await, None);
    }
}
