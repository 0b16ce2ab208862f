// Bike-Share Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/bikeshare-simulator --stations stations.json --rides sample_rides.csv
// ```
//
// Or with a custom window and mode:
//
// ```console
// $ ./target/release/bikeshare-simulator --start '2017-06-01 06:00' --end '2017-06-01 10:00' --mode naive --verbose
// ```

use anyhow::{Context, Result};
use bikeshare_simulator::simulation::{
    LoggingConfig, NoopVisualizer, RunSummary, SimulationEngine, StationExtremes,
};
use bikeshare_simulator::types::config::CliArgs;
use bikeshare_simulator::types::{format_timestamp, OutputFormat, SimulationConfig};
use clap::Parser;
use serde::Serialize;
use std::process;
use tracing::{error, info, Level};

/// Everything a run reports, in the shape of the JSON output
#[derive(Debug, Serialize)]
struct RunReport {
    statistics: StationExtremes,
    summary: RunSummary,
}

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    if args.print_config {
        match SimulationConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    // Initialize logging based on CLI flags
    let level = if args.debug {
        Level::DEBUG
    } else if args.verbose {
        Level::INFO
    } else {
        // Default: minimal logging for normal users
        Level::WARN
    };
    let logging_result = match (&args.log_dir, args.debug, args.verbose) {
        (Some(dir), _, _) => LoggingConfig::init_with_file(level, dir.clone()),
        (None, true, _) => LoggingConfig::init_debug(),
        (None, false, true) => LoggingConfig::init_verbose(),
        (None, false, false) => LoggingConfig::new().with_level(level).init(),
    };

    if let Err(e) = logging_result {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Starting Bike-Share Simulator");

    let config = match SimulationConfig::from_cli_args(args.clone()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        eprintln!("Configuration validation failed: {}", e);
        process::exit(1);
    }

    info!("Configuration loaded and validated successfully");

    if let Err(e) = run(&config, args.dry_run) {
        error!("Simulation failed: {:#}", e);
        eprintln!("Simulation failed: {:#}", e);
        process::exit(1);
    }

    info!("Bike-Share Simulator completed successfully");
}

/// Load the data files, run the engine and print the report
fn run(config: &SimulationConfig, dry_run: bool) -> Result<()> {
    let window = config.window().context("Invalid simulation window")?;

    let mut engine = SimulationEngine::from_files(&config.stations_file, &config.rides_file)
        .with_context(|| {
            format!("Failed to load stations from '{}' and rides from '{}'", config.stations_file, config.rides_file)
        })?
        .with_spanning_rides(config.include_spanning_rides);

    info!("Loaded {} stations and {} rides", engine.stations().len(), engine.rides().len());

    if dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(config);
        eprintln!("  Stations Loaded: {}", engine.stations().len());
        eprintln!("  Rides Loaded: {}", engine.rides().len());
        return Ok(());
    }

    print_startup_banner(config);

    let summary = engine
        .run(window, config.mode, &mut NoopVisualizer)
        .context("Simulation run failed")?;
    let statistics = engine.compute_statistics().context("Failed to compute station statistics")?;

    match config.output_format {
        OutputFormat::Text => {
            println!("{}", statistics);
            println!("{}", summary);
        }
        OutputFormat::Json => {
            let report = RunReport { statistics, summary };
            let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            println!("{}", json);
        }
    }

    Ok(())
}

/// Print startup banner and configuration summary
fn print_startup_banner(config: &SimulationConfig) {
    eprintln!("Bike-Share Simulator");
    eprintln!("====================");
    eprintln!("Replays rides against station capacity over a time window");
    eprintln!();

    print_configuration_summary(config);
}

/// Print configuration summary
fn print_configuration_summary(config: &SimulationConfig) {
    eprintln!("Configuration:");
    eprintln!("  Stations File: {}", config.stations_file);
    eprintln!("  Rides File: {}", config.rides_file);
    eprintln!(
        "  Window: {} to {}",
        format_timestamp(&config.start),
        format_timestamp(&config.end)
    );
    eprintln!("  Mode: {}", config.mode);
    eprintln!("  Spanning Rides: {}", if config.include_spanning_rides { "included" } else { "excluded" });
    eprintln!("  Output Format: {}", config.output_format);
    eprintln!();
}
