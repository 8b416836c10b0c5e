//! Structured logging for flightpath tools
//!
//! - `tracing` subscriber setup with env-filter overrides
//! - Per-run session id for correlating log lines
//! - Lightweight timers for the expensive steps (dataset load, frame compute)

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

/// Global session ID for correlating logs
static SESSION_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Initialize with custom configuration
///
/// `RUST_LOG` takes precedence over `config.log_level`. Output goes to stderr
/// so command output on stdout stays machine-readable.
pub fn init_with_config(config: TelemetryConfig) -> anyhow::Result<()> {
    let filter = build_filter(&config);

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.show_target)
        .with_ansi(!config.json);

    let result = if config.json {
        tracing::subscriber::set_global_default(
            tracing_subscriber::registry().with(filter).with(layer.json()),
        )
    } else {
        tracing::subscriber::set_global_default(
            tracing_subscriber::registry().with(filter).with(layer.compact()),
        )
    };
    result.map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    tracing::debug!(
        session_id = %session_id(),
        version = env!("CARGO_PKG_VERSION"),
        "Telemetry initialized"
    );

    Ok(())
}

fn build_filter(config: &TelemetryConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
}

/// Get the current session ID
pub fn session_id() -> &'static str {
    &SESSION_ID
}

/// Telemetry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub show_target: bool,
    /// Emit JSON lines instead of the compact human format
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            show_target: false,
            json: false,
        }
    }
}

impl TelemetryConfig {
    /// Same configuration at a different level.
    #[must_use]
    pub fn with_level(self, level: impl Into<String>) -> Self {
        Self {
            log_level: level.into(),
            ..self
        }
    }
}

/// Timer for measuring operation duration
pub struct Timer {
    name: &'static str,
    start: Instant,
}

impl Timer {
    /// Start a new timer
    pub fn start(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
        }
    }

    /// Stop the timer and log the duration at debug level
    pub fn stop(self) -> Duration {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = self.name,
            duration_us = duration.as_micros() as u64,
            "Timer completed"
        );
        duration
    }
}
