//! Tests for CLI argument parsing functionality
//!
//! These tests verify that command line arguments are parsed and merged over
//! configuration files and defaults.

use bikeshare_simulator::types::config::{CliArgs, SimulationConfig};
use bikeshare_simulator::types::{format_timestamp, ConfigError, OutputFormat, SimulationMode};
use clap::Parser;
use std::io::Write;

/// Test that no arguments yields the defaults
#[test]
fn test_defaults_without_arguments() {
    let cli_args = CliArgs::try_parse_from(["test"]).unwrap();
    let config = SimulationConfig::from_cli_args(cli_args).unwrap();

    assert_eq!(config, SimulationConfig::default());
    assert_eq!(config.stations_file, "stations.json");
    assert_eq!(config.rides_file, "sample_rides.csv");
    assert_eq!(format_timestamp(&config.start), "2017-06-01 07:00");
    assert_eq!(format_timestamp(&config.end), "2017-06-01 09:00");
    assert_eq!(config.mode, SimulationMode::EventDriven);
    assert!(!config.include_spanning_rides);
}

/// Test parsing of the window arguments
#[test]
fn test_window_argument_parsing() {
    let args = ["test", "--start", "2017-06-01 06:00", "--end", "2017-06-01 10:30"];
    let config = SimulationConfig::from_cli_args(CliArgs::try_parse_from(args).unwrap()).unwrap();

    assert_eq!(format_timestamp(&config.start), "2017-06-01 06:00");
    assert_eq!(format_timestamp(&config.end), "2017-06-01 10:30");
    assert_eq!(config.window().unwrap().minutes(), 270);
}

/// Test that malformed timestamps are reported with the setting name
#[test]
fn test_invalid_window_arguments() {
    let args = ["test", "--start", "June 1st"];
    let result = SimulationConfig::from_cli_args(CliArgs::try_parse_from(args).unwrap());

    match result {
        Err(ConfigError::InvalidTimestamp { field, value }) => {
            assert_eq!(field, "start");
            assert_eq!(value, "June 1st");
        }
        other => panic!("expected an invalid timestamp error, got {:?}", other),
    }

    // A reversed window parses but does not validate
    let args = ["test", "--start", "2017-06-01 09:00", "--end", "2017-06-01 07:00"];
    let config = SimulationConfig::from_cli_args(CliArgs::try_parse_from(args).unwrap()).unwrap();
    assert!(config.validate().is_err());
}

/// Test mode and output format parsing
#[test]
fn test_mode_and_output_format_parsing() {
    let args = ["test", "--mode", "naive", "--output-format", "json"];
    let config = SimulationConfig::from_cli_args(CliArgs::try_parse_from(args).unwrap()).unwrap();
    assert_eq!(config.mode, SimulationMode::Naive);
    assert_eq!(config.output_format, OutputFormat::Json);

    let args = ["test", "--mode", "sideways"];
    let result = SimulationConfig::from_cli_args(CliArgs::try_parse_from(args).unwrap());
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

/// Test data file arguments
#[test]
fn test_data_file_arguments() {
    let args = ["test", "--stations", "toronto.json", "--rides", "june.csv"];
    let config = SimulationConfig::from_cli_args(CliArgs::try_parse_from(args).unwrap()).unwrap();
    assert_eq!(config.stations_file, "toronto.json");
    assert_eq!(config.rides_file, "june.csv");
}

/// Test logging and control flags
#[test]
fn test_logging_and_control_flags() {
    let cli_args = CliArgs::try_parse_from(["test", "-v", "--dry-run", "--log-dir", "logs"]).unwrap();
    assert!(cli_args.verbose);
    assert!(!cli_args.debug);
    assert!(cli_args.dry_run);
    assert_eq!(cli_args.log_dir.as_deref(), Some("logs"));

    let cli_args = CliArgs::try_parse_from(["test", "--debug", "--print-config"]).unwrap();
    assert!(cli_args.debug);
    assert!(cli_args.print_config);
}

/// Test the spanning rides flag
#[test]
fn test_include_spanning_rides_flag() {
    let cli_args = CliArgs::try_parse_from(["test", "--include-spanning-rides"]).unwrap();
    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert!(config.include_spanning_rides);
}

/// Test that CLI arguments override a configuration file
#[test]
fn test_cli_overrides_config_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{"rides_file": "from_file.csv", "mode": "naive", "start": "2017-06-01 06:00", "include_spanning_rides": true}}"#
    )
    .unwrap();
    let path = file.path().display().to_string();

    let args = ["test", "--config", path.as_str(), "--mode", "event-driven"];
    let config = SimulationConfig::from_cli_args(CliArgs::try_parse_from(args).unwrap()).unwrap();

    assert_eq!(config.rides_file, "from_file.csv");
    assert_eq!(config.mode, SimulationMode::EventDriven);
    assert_eq!(format_timestamp(&config.start), "2017-06-01 06:00");
    assert!(config.include_spanning_rides);
    assert_eq!(config.stations_file, "stations.json");
}

/// Test that an unknown flag is a parse error
#[test]
fn test_unknown_argument_is_rejected() {
    assert!(CliArgs::try_parse_from(["test", "--days", "5"]).is_err());
}

/// Test help message generation
#[test]
fn test_help_message() {
    use clap::CommandFactory;

    let help = CliArgs::command().render_long_help().to_string();
    assert!(help.contains("--stations"));
    assert!(help.contains("--include-spanning-rides"));
    assert!(help.contains("YYYY-MM-DD HH:MM"));
}
