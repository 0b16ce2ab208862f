//! Builders shared by the integration tests

#![allow(dead_code)]

use bikeshare_simulator::network::{Coordinate, Ride, Station, StationRegistry};
use bikeshare_simulator::simulation::SimulationWindow;
use bikeshare_simulator::types::parse_timestamp;
use chrono::NaiveDateTime;

/// Parse a `YYYY-MM-DD HH:MM` timestamp
pub fn ts(value: &str) -> NaiveDateTime {
    parse_timestamp(value).unwrap()
}

/// Window between two timestamps
pub fn window(start: &str, end: &str) -> SimulationWindow {
    SimulationWindow::new(ts(start), ts(end)).unwrap()
}

/// Station at the origin
pub fn station(id: &str, name: &str, capacity: u32, num_bikes: u32) -> Station {
    Station::new(id, name, Coordinate::new(-79.38, 43.65), capacity, num_bikes).unwrap()
}

/// Registry from `(id, name, capacity, num_bikes)` tuples
pub fn registry(stations: &[(&str, &str, u32, u32)]) -> StationRegistry {
    StationRegistry::from_stations(
        stations.iter().map(|&(id, name, capacity, bikes)| station(id, name, capacity, bikes)),
    )
    .unwrap()
}

/// Ride between two stations
pub fn ride(start: &str, end: &str, start_time: &str, end_time: &str) -> Ride {
    Ride::new(start, end, ts(start_time), ts(end_time)).unwrap()
}
