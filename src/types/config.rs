//! Configuration structures for the bike-share simulator
//!
//! This module contains the simulation configuration structure, the command
//! line arguments that override it, and the validation logic applied before a
//! run starts.

use super::timestamp::{format_timestamp, parse_timestamp, serde_timestamp};
use super::{OutputFormat, SimulationMode};
use crate::simulation::{SimulationResult, SimulationWindow};
use chrono::{NaiveDate, NaiveDateTime};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default input files and window, matching the bundled sample data
pub mod defaults {
    /// Station data file
    pub const STATIONS_FILE: &str = "stations.json";

    /// Ride data file
    pub const RIDES_FILE: &str = "sample_rides.csv";

    /// Default window start as (year, month, day, hour, minute)
    pub const WINDOW_START: (i32, u32, u32, u32, u32) = (2017, 6, 1, 7, 0);

    /// Default window end as (year, month, day, hour, minute)
    pub const WINDOW_END: (i32, u32, u32, u32, u32) = (2017, 6, 1, 9, 0);
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "bikeshare-simulator",
    version,
    about = "Bike-share network simulator - replays rides against station capacity",
    long_about = "Replays bike rides against a network of docking stations over a time window, \
tracking bike availability and reporting which stations saw the most departures, arrivals, \
and time spent nearly empty or nearly full.

EXAMPLES:
    # Run the bundled sample window
    bikeshare-simulator --stations stations.json --rides sample_rides.csv

    # Choose the window and the engine mode
    bikeshare-simulator --start '2017-06-01 07:00' --end '2017-06-01 09:00' --mode naive

    # Use a configuration file and print JSON
    bikeshare-simulator --config sim.json --output-format json

    # Generate configuration template
    bikeshare-simulator --print-config > sim.json

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Timestamps use the format YYYY-MM-DD HH:MM."
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Station data file
    #[arg(long, help = "Station data file (JSON)")]
    pub stations: Option<String>,

    /// Ride data file
    #[arg(long, help = "Ride data file (CSV)")]
    pub rides: Option<String>,

    /// Start of the simulation window
    #[arg(long, help = "Window start (YYYY-MM-DD HH:MM)")]
    pub start: Option<String>,

    /// End of the simulation window
    #[arg(long, help = "Window end (YYYY-MM-DD HH:MM)")]
    pub end: Option<String>,

    /// Engine mode
    #[arg(
        long,
        help = "Engine mode (event-driven or naive)",
        long_help = "How the engine advances time. 'event-driven' pops ride transitions from a \
priority queue; 'naive' rescans every ride each minute. Both produce the same statistics. \
Default: event-driven"
    )]
    pub mode: Option<String>,

    /// Admit rides that span the whole window
    #[arg(
        long,
        help = "Admit rides that start before and end after the window",
        long_help = "Rides that start before the window and end after it are excluded by \
default. With this flag they are placed in the active set when the run starts."
    )]
    pub include_spanning_rides: bool,

    /// Output format for the final report
    #[arg(long, help = "Output format (text or json)")]
    pub output_format: Option<String>,

    /// Directory for JSON log files
    #[arg(long, help = "Also write JSON logs to daily files in this directory")]
    pub log_dir: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration and load data without running the simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Station data file
    pub stations_file: Option<String>,

    /// Ride data file
    pub rides_file: Option<String>,

    /// Window start (YYYY-MM-DD HH:MM)
    pub start: Option<String>,

    /// Window end (YYYY-MM-DD HH:MM)
    pub end: Option<String>,

    /// Engine mode
    pub mode: Option<SimulationMode>,

    /// Admit rides that span the whole window
    pub include_spanning_rides: Option<bool>,

    /// Output format for the final report
    pub output_format: Option<OutputFormat>,
}

/// Configuration for a bike-share simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Station data file
    pub stations_file: String,

    /// Ride data file
    pub rides_file: String,

    /// Window start
    #[serde(with = "serde_timestamp")]
    pub start: NaiveDateTime,

    /// Window end (exclusive)
    #[serde(with = "serde_timestamp")]
    pub end: NaiveDateTime,

    /// Engine mode
    pub mode: SimulationMode,

    /// Admit rides that start before the window and end after it
    pub include_spanning_rides: bool,

    /// Output format for the final report
    pub output_format: OutputFormat,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),

    /// A timestamp setting could not be parsed
    #[error("Invalid timestamp for {field}: '{value}' (expected YYYY-MM-DD HH:MM)")]
    InvalidTimestamp {
        /// Name of the setting
        field: String,
        /// The rejected value
        value: String,
    },

    /// An enumerated setting had an unknown value
    #[error("Invalid value for {field}: {message}")]
    InvalidValue {
        /// Name of the setting
        field: String,
        /// Parser message
        message: String,
    },
}

/// Validation errors for simulation configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// A required file path is empty
    #[error("{field} must not be empty")]
    EmptyPath {
        /// Name of the setting
        field: String,
    },

    /// The window ends before it starts
    #[error("Invalid window: end ({end}) is before start ({start})")]
    InvalidWindow {
        /// Window start
        start: String,
        /// Window end
        end: String,
    },
}

fn default_timestamp((year, month, day, hour, minute): (i32, u32, u32, u32, u32)) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .unwrap_or_default()
}

fn parse_setting(field: &str, value: &str) -> Result<NaiveDateTime, ConfigError> {
    parse_timestamp(value).map_err(|_| ConfigError::InvalidTimestamp {
        field: field.to_string(),
        value: value.to_string(),
    })
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            stations_file: defaults::STATIONS_FILE.to_string(),
            rides_file: defaults::RIDES_FILE.to_string(),
            start: default_timestamp(defaults::WINDOW_START),
            end: default_timestamp(defaults::WINDOW_END),
            mode: SimulationMode::default(),
            include_spanning_rides: false,
            output_format: OutputFormat::default(),
        }
    }
}

impl SimulationConfig {
    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut config, args)?;

        Ok(config)
    }

    /// Load configuration from a JSON file, filling gaps with defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Self::from_config_file(config_file)
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let start = match config_file.start {
            Some(value) => parse_setting("start", &value)?,
            None => defaults.start,
        };
        let end = match config_file.end {
            Some(value) => parse_setting("end", &value)?,
            None => defaults.end,
        };

        Ok(Self {
            stations_file: config_file.stations_file.unwrap_or(defaults.stations_file),
            rides_file: config_file.rides_file.unwrap_or(defaults.rides_file),
            start,
            end,
            mode: config_file.mode.unwrap_or(defaults.mode),
            include_spanning_rides: config_file
                .include_spanning_rides
                .unwrap_or(defaults.include_spanning_rides),
            output_format: config_file.output_format.unwrap_or(defaults.output_format),
        })
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) -> Result<(), ConfigError> {
        if let Some(value) = args.stations {
            config.stations_file = value;
        }
        if let Some(value) = args.rides {
            config.rides_file = value;
        }
        if let Some(value) = args.start {
            config.start = parse_setting("start", &value)?;
        }
        if let Some(value) = args.end {
            config.end = parse_setting("end", &value)?;
        }
        if let Some(value) = args.mode {
            config.mode = value.parse().map_err(|message| ConfigError::InvalidValue {
                field: "mode".to_string(),
                message,
            })?;
        }
        if let Some(value) = args.output_format {
            config.output_format = value.parse().map_err(|message| ConfigError::InvalidValue {
                field: "output_format".to_string(),
                message,
            })?;
        }

        // A flag can only switch the setting on
        if args.include_spanning_rides {
            config.include_spanning_rides = true;
        }

        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.stations_file.trim().is_empty() {
            return Err(ConfigValidationError::EmptyPath { field: "stations_file".to_string() });
        }

        if self.rides_file.trim().is_empty() {
            return Err(ConfigValidationError::EmptyPath { field: "rides_file".to_string() });
        }

        if self.end < self.start {
            return Err(ConfigValidationError::InvalidWindow {
                start: format_timestamp(&self.start),
                end: format_timestamp(&self.end),
            });
        }

        Ok(())
    }

    /// The simulation window described by this configuration
    pub fn window(&self) -> SimulationResult<SimulationWindow> {
        SimulationWindow::new(self.start, self.end)
    }
}
