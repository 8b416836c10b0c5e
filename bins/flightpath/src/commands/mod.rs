//! Command implementations

pub mod airports;
pub mod distance;
pub mod nearest;
pub mod route;
pub mod track;

use anyhow::Result;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream, Style};
use serde::Serialize;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Pretty-printed JSON on stdout
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Section header in the style of the other commands
pub(crate) fn print_header(title: &str) {
    println!();
    println!("  {}", title.if_supports_color(Stream::Stdout, |t| t.style(Style::new().blue().bold())));
    println!("  {}", "─".repeat(60).if_supports_color(Stream::Stdout, |t| t.dimmed()));
}

/// Format a distance for display
pub(crate) fn format_km(km: f64) -> String {
    format!("{:.2} km", km)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_km() {
        assert_eq!(format_km(5687.6618), "5687.66 km");
        assert_eq!(format_km(0.0), "0.00 km");
    }
}
