//! # Aggregator Settings
//!
//! Process-wide defaults loaded once at startup.
//!
//! Sources, later overriding earlier:
//! 1. an optional TOML file
//! 2. `AGGREGATOR__*` environment variables (a `.env` file is read first)
//!
//! ```toml
//! default_run_limit = 32768
//! default_slippage_tolerance = "0.0005"
//! log_level = "info"
//! conflict_groups = [["uniswap", "sushiswap"]]
//!
//! [[venues]]
//! id = "uniswap"
//! adapter = "0x0000000000000000000000000000000000000001"
//! ```

use crate::domain::entities::{VenueCatalog, VenueConfig};
use crate::domain::value_objects::VenueId;
use config::{Config, Environment, File};
use ethers::types::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default node-visit budget of the path search.
pub const DEFAULT_RUN_LIMIT: u64 = 32_768;

/// Default slippage tolerance applied to venue orders (5 bps).
pub const DEFAULT_SLIPPAGE_TOLERANCE: Decimal = Decimal::from_parts(5, 0, 0, false, 4);

/// Error loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A source could not be read or parsed.
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    /// A value was read but is out of range.
    #[error("invalid setting {key}: {message}")]
    Invalid {
        /// Setting name.
        key: &'static str,
        /// What is wrong with it.
        message: String,
    },
}

/// One configured venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueSettings {
    /// Venue id as requested from the sampler.
    pub id: String,
    /// Adapter contract synthesized orders are addressed to.
    pub adapter: Address,
}

/// Aggregator defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatorSettings {
    /// Node-visit budget used when a call does not set one.
    #[serde(default = "default_run_limit")]
    pub default_run_limit: u64,
    /// Slippage tolerance used when a call does not set one.
    #[serde(default = "default_slippage_tolerance")]
    pub default_slippage_tolerance: Decimal,
    /// Whether conflicting venues are excluded by default.
    #[serde(default)]
    pub disable_conflicting_venues: bool,
    /// Sampling round-trip limit in milliseconds.
    #[serde(default)]
    pub sampler_timeout_ms: Option<u64>,
    /// Log filter directive.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit JSON log lines instead of compact text.
    #[serde(default)]
    pub log_json: bool,
    /// Venues that may be sampled.
    #[serde(default)]
    pub venues: Vec<VenueSettings>,
    /// Groups of mutually exclusive venue ids.
    #[serde(default)]
    pub conflict_groups: Vec<Vec<String>>,
}

fn default_run_limit() -> u64 {
    DEFAULT_RUN_LIMIT
}

fn default_slippage_tolerance() -> Decimal {
    DEFAULT_SLIPPAGE_TOLERANCE
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        Self {
            default_run_limit: DEFAULT_RUN_LIMIT,
            default_slippage_tolerance: DEFAULT_SLIPPAGE_TOLERANCE,
            disable_conflicting_venues: false,
            sampler_timeout_ms: None,
            log_level: default_log_level(),
            log_json: false,
            venues: Vec::new(),
            conflict_groups: Vec::new(),
        }
    }
}

impl AggregatorSettings {
    /// Loads settings from the environment only.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if a value cannot be parsed or is out of range.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_with_path(None)
    }

    /// Loads settings from `path` (if given) and the environment.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the file is missing or malformed, or a
    /// value is out of range.
    pub fn load_with_path(path: Option<&Path>) -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();

        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix("AGGREGATOR")
                .prefix_separator("__")
                .separator("__"),
        );

        let settings: Self = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Invalid` if the slippage tolerance is outside
    /// `[0, 1)`.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let slippage = self.default_slippage_tolerance;
        if slippage.is_sign_negative() || slippage >= Decimal::ONE {
            return Err(SettingsError::Invalid {
                key: "default_slippage_tolerance",
                message: format!("{slippage} is outside [0, 1)"),
            });
        }
        Ok(())
    }

    /// Builds the venue catalog described by these settings.
    #[must_use]
    pub fn catalog(&self) -> VenueCatalog {
        let catalog = self.venues.iter().fold(VenueCatalog::new(), |catalog, venue| {
            catalog.with_venue(VenueConfig::new(VenueId::new(venue.id.as_str()), venue.adapter))
        });
        self.conflict_groups.iter().fold(catalog, |catalog, group| {
            catalog.with_conflict_group(group.iter().map(|id| VenueId::new(id.as_str())).collect())
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults() {
        let settings = AggregatorSettings::default();
        assert_eq!(settings.default_run_limit, 32_768);
        assert_eq!(settings.default_slippage_tolerance, Decimal::new(5, 4));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn loads_file() {
        let file = write_config(
            r#"
default_run_limit = 100
default_slippage_tolerance = "0.01"
disable_conflicting_venues = true
sampler_timeout_ms = 1500
conflict_groups = [["uniswap", "sushiswap"]]

[[venues]]
id = "uniswap"
adapter = "0x0000000000000000000000000000000000000001"

[[venues]]
id = "sushiswap"
adapter = "0x0000000000000000000000000000000000000002"
"#,
        );
        let settings = AggregatorSettings::load_with_path(Some(file.path())).unwrap();
        assert_eq!(settings.default_run_limit, 100);
        assert_eq!(settings.default_slippage_tolerance, Decimal::new(1, 2));
        assert!(settings.disable_conflicting_venues);
        assert_eq!(settings.sampler_timeout_ms, Some(1_500));

        let catalog = settings.catalog();
        assert_eq!(catalog.venues().len(), 2);
        let uniswap = catalog.get(&VenueId::new("uniswap")).unwrap();
        assert_eq!(uniswap.adapter(), Address::from_low_u64_be(1));
        let uniswap_id = VenueId::new("uniswap");
        let conflicts: Vec<_> = catalog.conflicts_of(&uniswap_id).collect();
        assert_eq!(conflicts, vec![&VenueId::new("sushiswap")]);
    }

    #[test]
    fn missing_file_fails() {
        let result = AggregatorSettings::load_with_path(Some(Path::new("/nonexistent/aggregator.toml")));
        assert!(matches!(result, Err(SettingsError::Load(_))));
    }

    #[test]
    fn slippage_out_of_range_rejected() {
        let file = write_config("default_slippage_tolerance = \"1.5\"\n");
        let result = AggregatorSettings::load_with_path(Some(file.path()));
        assert!(matches!(
            result,
            Err(SettingsError::Invalid {
                key: "default_slippage_tolerance",
                ..
            })
        ));
    }
}
