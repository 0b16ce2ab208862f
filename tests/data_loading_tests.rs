//! Tests for loading station and ride files and running them end to end

use bikeshare_simulator::network::{load_rides, load_stations, LoaderError};
use bikeshare_simulator::simulation::{LoggingConfig, NoopVisualizer, SimulationEngine, SimulationError};
use bikeshare_simulator::types::{SimulationConfig, SimulationMode};
use std::io::Write;
use tempfile::NamedTempFile;

const STATIONS_JSON: &str = r#"{
    "stations": [
        {"n": "7000", "s": "Fort York  Blvd / Capreol Crt", "la": "43.639832", "lo": "-79.395954", "da": "20", "ba": "11"},
        {"n": "7001", "s": "Lower Jarvis St / The Esplanade", "la": 43.647992, "lo": -79.370907, "da": 13, "ba": 2},
        {"n": "7002", "s": "St. George St / Bloor St W", "la": "43.667333", "lo": "-79.399429", "da": "5", "ba": "14"},
        {"n": "7003", "s": "Broken Entry", "la": "north", "lo": "-79.39", "da": "5", "ba": "5"}
    ]
}"#;

const RIDES_CSV: &str = "\
2017-06-01 07:05,7000,2017-06-01 07:20,7001
2017-06-01 07:10,7001,2017-06-01 07:35,7002
2017-06-01 07:10,7002,2017-06-01 07:50,7000
2017-06-01 07:15,7000,2017-06-01 07:15,7002
2017-06-01 07:30,9999,2017-06-01 07:45,7000
not a time,7000,2017-06-01 07:45,7001
2017-06-01 07:40,7002
2017-06-01 06:40,7002,2017-06-01 07:25,7001
";

fn write_temp(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_station_file() {
    LoggingConfig::init_test();
    let file = write_temp(STATIONS_JSON, ".json");
    let stations = load_stations(file.path()).unwrap();

    assert_eq!(stations.len(), 3);
    assert!(!stations.contains("7003"));

    let fort_york = stations.get("7000").unwrap();
    assert_eq!(fort_york.capacity(), 31);
    assert_eq!(fort_york.num_bikes(), 11);
    assert!((fort_york.location().latitude - 43.639832).abs() < 1e-9);

    let jarvis = stations.get("7001").unwrap();
    assert_eq!(jarvis.capacity(), 15);
    assert_eq!(jarvis.num_bikes(), 2);
}

#[test]
fn test_load_ride_file_drops_bad_rows() {
    LoggingConfig::init_test();
    let stations = load_stations(write_temp(STATIONS_JSON, ".json").path()).unwrap();
    let rides = load_rides(write_temp(RIDES_CSV, ".csv").path(), &stations).unwrap();

    // Zero-length, unknown-station, bad-time and short rows are gone
    assert_eq!(rides.len(), 4);
    assert_eq!(rides[0].start().as_str(), "7000");
    assert_eq!(rides[3].start_time().format("%H:%M").to_string(), "06:40");
}

#[test]
fn test_missing_files_are_errors() {
    let error = load_stations("/nonexistent/stations.json").unwrap_err();
    assert!(matches!(error, LoaderError::Io(_)));

    let stations = load_stations(write_temp(STATIONS_JSON, ".json").path()).unwrap();
    assert!(load_rides("/nonexistent/rides.csv", &stations).is_err());
}

#[test]
fn test_loaded_data_runs_in_both_modes() {
    let stations = load_stations(write_temp(STATIONS_JSON, ".json").path()).unwrap();
    let rides = load_rides(write_temp(RIDES_CSV, ".csv").path(), &stations).unwrap();
    let config = SimulationConfig::default();

    let mut results = Vec::new();
    for mode in [SimulationMode::EventDriven, SimulationMode::Naive] {
        let mut engine = SimulationEngine::new(stations.clone(), rides.clone()).unwrap();
        let summary = engine.run(config.window().unwrap(), mode, &mut NoopVisualizer).unwrap();

        assert_eq!(summary.rides_admitted, 4);
        assert_eq!(summary.rides_started, 3);
        assert_eq!(summary.rides_completed, 4);
        assert_eq!(summary.bikes_lost, 0);
        results.push(engine.compute_statistics().unwrap());
    }

    assert_eq!(results[0], results[1]);
    // Jarvis receives the 07:20 and 07:25 arrivals
    assert_eq!(results[0].max_end.station, "Lower Jarvis St / The Esplanade");
    assert_eq!(results[0].max_end.value, 2);
}

#[test]
fn test_configured_paths_load() {
    let stations_file = write_temp(STATIONS_JSON, ".json");
    let rides_file = write_temp(RIDES_CSV, ".csv");
    let config = SimulationConfig {
        stations_file: stations_file.path().display().to_string(),
        rides_file: rides_file.path().display().to_string(),
        ..Default::default()
    };
    config.validate().unwrap();

    let stations = load_stations(&config.stations_file).unwrap();
    let rides = load_rides(&config.rides_file, &stations).unwrap();
    assert_eq!(rides.len(), 4);
}

#[test]
fn test_engine_from_files() {
    LoggingConfig::init_test();
    let stations_file = write_temp(STATIONS_JSON, ".json");
    let rides_file = write_temp(RIDES_CSV, ".csv");

    let mut engine = SimulationEngine::from_files(stations_file.path(), rides_file.path()).unwrap();
    assert_eq!(engine.stations().len(), 3);
    assert_eq!(engine.rides().len(), 4);

    let summary = engine
        .run(SimulationConfig::default().window().unwrap(), SimulationMode::EventDriven, &mut NoopVisualizer)
        .unwrap();
    assert_eq!(summary.rides_completed, 4);
}

#[test]
fn test_engine_from_missing_files_reports_loader_error() {
    let rides_file = write_temp(RIDES_CSV, ".csv");
    let error = SimulationEngine::from_files("/nonexistent/stations.json", rides_file.path()).unwrap_err();

    assert!(matches!(error, SimulationError::Loader(LoaderError::Io(_))));
    assert_eq!(error.category(), "IO");

    let broken = write_temp("{\"stations\": 7}", ".json");
    let error = SimulationEngine::from_files(broken.path(), rides_file.path()).unwrap_err();
    assert!(matches!(error, SimulationError::Loader(LoaderError::Json(_))));
}
