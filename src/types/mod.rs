//! Core types and identifiers for the bike-share simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! - **Identifiers**: station ids from the data files, ride indices, run ids
//! - **Enums**: simulation modes, output formats, event kinds
//! - **Timestamps**: the `YYYY-MM-DD HH:MM` format used by ride data and config
//! - **Configuration**: simulation configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use bikeshare_simulator::types::*;
//!
//! let station = StationId::new("7000");
//! let mode: SimulationMode = "naive".parse().unwrap();
//!
//! let config = SimulationConfig {
//!     mode,
//!     start: parse_timestamp("2017-06-01 07:00").unwrap(),
//!     end: parse_timestamp("2017-06-01 08:00").unwrap(),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! assert_eq!(station.as_str(), "7000");
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;
pub mod timestamp;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
pub use timestamp::*;
