//! Bike-share network model
//!
//! This module contains the stations, the rides between them, the registry
//! that owns all stations during a run, and the loaders that read both from
//! data files.
//!
//! # Usage Example
//!
//! ```rust
//! use bikeshare_simulator::network::*;
//! use bikeshare_simulator::types::parse_timestamp;
//!
//! let registry = StationRegistry::from_stations([
//!     Station::new("7000", "Fort York", Coordinate::new(-79.39, 43.64), 20, 10).unwrap(),
//!     Station::new("7001", "Jarvis", Coordinate::new(-79.37, 43.65), 15, 3).unwrap(),
//! ])
//! .unwrap();
//!
//! let ride = Ride::new(
//!     "7000",
//!     "7001",
//!     parse_timestamp("2017-06-01 07:00").unwrap(),
//!     parse_timestamp("2017-06-01 07:20").unwrap(),
//! )
//! .unwrap();
//!
//! assert!(registry.contains(ride.start().as_str()));
//! ```

pub mod error;
pub mod loader;
pub mod registry;
pub mod ride;
pub mod station;

// Re-export all public types for convenience
pub use error::*;
pub use loader::*;
pub use registry::*;
pub use ride::*;
pub use station::*;
