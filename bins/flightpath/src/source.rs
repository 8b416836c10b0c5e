//! One-shot dataset fetch from a local file or an HTTP(S) URL

use crate::config::DatasetConfig;
use anyhow::{bail, Context, Result};
use flightpath_geo::{load_candidates_with_stats, AirportRecord, ScanRange};
use flightpath_telemetry::Timer;
use reqwest::Client;
use std::time::Duration;

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Fetch the raw dataset text, failing if it takes longer than `timeout`
pub async fn fetch_text(source: &str, timeout: Duration) -> Result<String> {
    if is_remote(source) {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        let response = client
            .get(source)
            .send()
            .await
            .with_context(|| format!("Failed to fetch dataset from {}", source))?;

        if !response.status().is_success() {
            bail!("Dataset request to {} returned {}", source, response.status());
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read dataset body from {}", source))
    } else {
        let bytes = tokio::time::timeout(timeout, tokio::fs::read(source))
            .await
            .with_context(|| format!("Timed out reading dataset {}", source))?
            .with_context(|| format!("Failed to read dataset {}", source))?;

        // same lossy decoding reqwest applies to response bodies
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Fetch the configured dataset text
pub async fn fetch_dataset(config: &DatasetConfig) -> Result<String> {
    let timer = Timer::start("dataset_fetch");
    let text = fetch_text(&config.source, config.fetch_timeout()).await?;
    let elapsed = timer.stop();

    tracing::info!(
        source = %config.source,
        bytes = text.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "Fetched airport dataset"
    );

    Ok(text)
}

/// Parse the airports in `scan`, logging how many rows were dropped
pub fn parse_airports(text: &str, scan: ScanRange) -> Vec<AirportRecord> {
    let (airports, stats) = load_candidates_with_stats(text, scan);
    tracing::debug!(
        ?scan,
        rows = stats.rows_scanned,
        kept = stats.kept,
        dropped = stats.dropped,
        "Parsed airport rows"
    );
    airports
}

/// Fetch the dataset and parse the airports in `scan`
pub async fn load_airports(config: &DatasetConfig, scan: ScanRange) -> Result<Vec<AirportRecord>> {
    let text = fetch_dataset(config).await?;
    Ok(parse_airports(&text, scan))
}
