//! Simulation engine and control
//!
//! This module contains the discrete-event engine, the ride admission and
//! transition rules, the per-minute clock, the visualizer hook, statistics
//! and error handling.
//!
//! # Overview
//!
//! - **SimulationEngine**: owns the stations, rides, event queue and active set of one run
//! - **SimulationWindow / SimulationClock**: the simulated minutes and the cursor over them
//! - **validate_ride_start / validate_ride_end**: the only station mutators used by a run
//! - **Visualizer**: per-minute observer, able to end a run early
//! - **StationExtremes / RunSummary**: aggregate results
//! - **SimulationError**: error handling for simulation operations
//!
//! # Usage Example
//!
//! ```rust
//! use bikeshare_simulator::network::{Coordinate, Ride, Station, StationRegistry};
//! use bikeshare_simulator::simulation::*;
//! use bikeshare_simulator::types::{parse_timestamp, SimulationMode};
//!
//! let stations = StationRegistry::from_stations([
//!     Station::new("1", "Bay St", Coordinate::new(0.0, 0.0), 10, 5).unwrap(),
//!     Station::new("2", "Adelaide St", Coordinate::new(0.0, 0.0), 10, 5).unwrap(),
//! ])
//! .unwrap();
//! let rides = vec![
//!     Ride::new("1", "2", parse_timestamp("2017-06-01 07:05").unwrap(), parse_timestamp("2017-06-01 07:15").unwrap()).unwrap(),
//!     Ride::new("2", "1", parse_timestamp("2017-06-01 07:05").unwrap(), parse_timestamp("2017-06-01 07:20").unwrap()).unwrap(),
//! ];
//! let window = SimulationWindow::new(
//!     parse_timestamp("2017-06-01 07:00").unwrap(),
//!     parse_timestamp("2017-06-01 07:30").unwrap(),
//! )
//! .unwrap();
//!
//! let mut engine = SimulationEngine::new(stations, rides).unwrap();
//! engine.run(window, SimulationMode::Naive, &mut NoopVisualizer).unwrap();
//!
//! let extremes = engine.compute_statistics().unwrap();
//! assert_eq!(extremes.max_start.station, "Adelaide St");
//! assert_eq!(extremes.max_start.value, 1);
//! ```

pub mod clock;
pub mod engine;
pub mod error;
pub mod logging;
pub mod statistics;
pub mod validation;
pub mod visualizer;

// Re-export all public types for convenience
pub use clock::*;
pub use engine::*;
pub use error::*;
pub use logging::*;
pub use statistics::*;
pub use validation::*;
pub use visualizer::*;
