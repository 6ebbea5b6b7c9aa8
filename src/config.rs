//! Configuration management for the `geolookup` application
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::GeoLookupError;
use crate::engine::time::{DatePattern, DurationUnit};

/// Root configuration structure for the `geolookup` application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeoLookupConfig {
    /// Reference data location
    #[serde(default)]
    pub data: DataConfig,
    /// Defaults applied when a query leaves a parameter out
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Reference data file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding the reference tables
    #[serde(default = "default_data_directory")]
    pub directory: String,
    #[serde(default = "default_locations_file")]
    pub locations_file: String,
    #[serde(default = "default_countries_file")]
    pub countries_file: String,
    #[serde(default = "default_airlines_file")]
    pub airlines_file: String,
    #[serde(default = "default_airline_names_file")]
    pub airline_names_file: String,
}

/// Default query settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Date pattern for time conversions
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// Unit of trip durations (hours or minutes)
    #[serde(default = "default_duration_unit")]
    pub duration_unit: String,
    /// Search radius in kilometers
    #[serde(default = "default_search_radius")]
    pub search_radius_km: f64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_data_directory() -> String {
    "data".to_string()
}

fn default_locations_file() -> String {
    "locations.dat".to_string()
}

fn default_countries_file() -> String {
    "countries.dat".to_string()
}

fn default_airlines_file() -> String {
    "airlines.dat".to_string()
}

fn default_airline_names_file() -> String {
    "airline_names.dat".to_string()
}

fn default_date_format() -> String {
    DatePattern::DEFAULT.to_string()
}

fn default_duration_unit() -> String {
    "hours".to_string()
}

fn default_search_radius() -> f64 {
    50.0
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

const MAX_SEARCH_RADIUS_KM: f64 = 20_000.0;

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            directory: default_data_directory(),
            locations_file: default_locations_file(),
            countries_file: default_countries_file(),
            airlines_file: default_airlines_file(),
            airline_names_file: default_airline_names_file(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            duration_unit: default_duration_unit(),
            search_radius_km: default_search_radius(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl GeoLookupConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("geolookup.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. GEOLOOKUP_DATA__DIRECTORY
        builder = builder.add_source(
            Environment::with_prefix("GEOLOOKUP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: GeoLookupConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("geolookup").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.data.directory.is_empty() {
            self.data.directory = default_data_directory();
        }
        if self.data.locations_file.is_empty() {
            self.data.locations_file = default_locations_file();
        }
        if self.data.countries_file.is_empty() {
            self.data.countries_file = default_countries_file();
        }
        if self.data.airlines_file.is_empty() {
            self.data.airlines_file = default_airlines_file();
        }
        if self.data.airline_names_file.is_empty() {
            self.data.airline_names_file = default_airline_names_file();
        }
        if self.defaults.date_format.is_empty() {
            self.defaults.date_format = default_date_format();
        }
        if self.defaults.duration_unit.is_empty() {
            self.defaults.duration_unit = default_duration_unit();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_defaults()?;
        self.validate_logging()?;
        Ok(())
    }

    /// Parsed default date pattern
    pub fn date_pattern(&self) -> Result<DatePattern> {
        DatePattern::parse(&self.defaults.date_format).map_err(|e| {
            GeoLookupError::config(format!(
                "Invalid default date format '{}': {e}",
                self.defaults.date_format
            ))
            .into()
        })
    }

    /// Parsed default duration unit
    pub fn duration_unit(&self) -> Result<DurationUnit> {
        self.defaults.duration_unit.parse::<DurationUnit>().map_err(|e| {
            GeoLookupError::config(format!(
                "Invalid default duration unit '{}': {e}",
                self.defaults.duration_unit
            ))
            .into()
        })
    }

    fn validate_defaults(&self) -> Result<()> {
        self.date_pattern()?;
        self.duration_unit()?;

        let radius = self.defaults.search_radius_km;
        if radius.is_nan() || radius <= 0.0 {
            return Err(GeoLookupError::config("Search radius must be positive").into());
        }
        if radius > MAX_SEARCH_RADIUS_KM {
            return Err(GeoLookupError::config(format!(
                "Search radius cannot exceed {MAX_SEARCH_RADIUS_KM} km"
            ))
            .into());
        }

        Ok(())
    }

    fn validate_logging(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(GeoLookupError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(GeoLookupError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
