//! Bike-Share Simulator
//!
//! A discrete-event simulation of a bike-share network. Stations hold bikes up
//! to a fixed number of docks; rides take a bike from one station and return
//! it to another. The simulator walks a time window minute by minute, applies
//! ride starts and ends to station state, and reports which stations were the
//! busiest and the most constrained.
//!
//! # Overview
//!
//! ## Key Features
//!
//! - **Event-Driven Engine**: a min-ordered event queue of ride starts and ends
//! - **Naive Mode**: a per-minute scan of every ride, equivalent to the event-driven run
//! - **Deterministic Ordering**: same-minute events are processed in a fixed order
//! - **Station Statistics**: busiest and most constrained stations, ties broken by name
//! - **Data Loaders**: station JSON feeds and headerless ride CSV files
//! - **Configurable Runs**: CLI flags, JSON config files and defaults
//!
//! ## Quick Start
//!
//! ```rust
//! use bikeshare_simulator::*;
//!
//! let stations = StationRegistry::from_stations([
//!     Station::new("7000", "Fort York", Coordinate::new(-79.39, 43.64), 20, 3).unwrap(),
//!     Station::new("7001", "Jarvis", Coordinate::new(-79.37, 43.65), 15, 12).unwrap(),
//! ])?;
//! let rides = vec![Ride::new(
//!     "7001",
//!     "7000",
//!     parse_timestamp("2017-06-01 07:15")?,
//!     parse_timestamp("2017-06-01 07:40")?,
//! )?];
//!
//! let config = SimulationConfig::default();
//! let mut engine = SimulationEngine::new(stations, rides)?;
//! let summary = engine.run(config.window()?, config.mode, &mut NoopVisualizer)?;
//!
//! assert_eq!(summary.rides_completed, 1);
//! println!("{}", engine.compute_statistics()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Identifiers, enums, timestamps and configuration
//! - [`network`]: Stations, rides, the station registry and data loaders
//! - [`events`]: The priority queue and ride events
//! - [`simulation`]: The engine, admission rules, statistics and logging
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │   Network   │    │   Events    │
//! │             │    │             │    │             │
//! │ Identifiers │◄───┤ Stations    │◄───┤ Queue       │
//! │ Config      │    │ Rides       │    │ RideEvent   │
//! │ Timestamps  │    │ Loaders     │    │             │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!        ▲                   ▲                   ▲
//!        │                   │                   │
//!        │           ┌─────────────┐             │
//!        └───────────┤ Simulation  ├─────────────┘
//!                    │             │
//!                    │ Engine      │
//!                    │ Statistics  │
//!                    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod events;
pub mod network;
pub mod simulation;
pub mod types;

// Core types and identifiers
pub use types::{
    parse_timestamp, ConfigError, ConfigValidationError, OutputFormat, RideId, RunId,
    SimulationConfig, SimulationMode, StationId,
};

// Network model
pub use network::{load_rides, load_stations, Coordinate, Ride, Station, StationRegistry};

// Events
pub use events::{PriorityQueue, RideEvent};

// Simulation
pub use simulation::{
    NoopVisualizer, RunSummary, SimulationEngine, SimulationError, SimulationWindow,
    SnapshotRecorder, StationExtremes, Visualizer,
};
