//! # Telemetry
//!
//! Installs the global `tracing` subscriber.

use crate::infrastructure::config::AggregatorSettings;
use std::str::FromStr;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs a subscriber filtered by `log_level`.
///
/// `log_level` is any `EnvFilter` directive (`"debug"`,
/// `"info,liquidity_aggregator=trace"`). Invalid directives fall back to
/// `info`. Calling this more than once leaves the first subscriber in
/// place.
pub fn init_tracing(log_level: &str, json_format: bool) {
    let filter = EnvFilter::from_str(log_level.trim()).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::registry().with(filter);

    let installed = if json_format {
        subscriber
            .with(fmt::layer().json().with_target(false).with_current_span(false))
            .try_init()
    } else {
        subscriber
            .with(fmt::layer().with_target(true).compact())
            .try_init()
    };

    if installed.is_ok() {
        tracing::info!(
            filter = log_level,
            format = if json_format { "json" } else { "compact" },
            "Logging initialized"
        );
    }
}

/// Installs a subscriber using the `log_level` and `log_json` settings.
pub fn init_tracing_from(settings: &AggregatorSettings) {
    init_tracing(&settings.log_level, settings.log_json);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init_tracing("not a directive ===", false);
        init_tracing("debug", true);
    }

    #[test]
    fn settings_drive_the_subscriber() {
        let settings = AggregatorSettings {
            log_level: "warn".to_string(),
            log_json: true,
            ..AggregatorSettings::default()
        };
        init_tracing_from(&settings);
    }
}
