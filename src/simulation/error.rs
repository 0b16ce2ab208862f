//! Error types and handling
//!
//! This module contains the error type returned by the simulation engine and
//! the statistics aggregator.
//!
//! Rejected ride starts, undockable ride ends and inadmissible rides are
//! modeled outcomes, not errors; they show up in the run summary instead.

use crate::events::QueueError;
use crate::network::LoaderError;
use crate::types::{RideId, StationId};
use thiserror::Error;

/// Errors that can occur during simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// The simulation window ends before it starts, or is not minute aligned
    #[error("Invalid simulation window: {0}")]
    InvalidWindow(String),

    /// A ride names a station missing from the registry
    #[error("{ride} references unknown station {station}")]
    UnknownStation {
        /// The ride
        ride: RideId,
        /// The missing station
        station: StationId,
    },

    /// Extremal statistics were requested over an empty registry
    #[error("Cannot compute station statistics: the station registry is empty")]
    EmptyStationRegistry,

    /// An event was extracted from an empty queue
    #[error("Event queue error: {0}")]
    Queue(#[from] QueueError),

    /// The engine was stepped before being seeded
    #[error("The simulation has not been seeded")]
    NotSeeded,

    /// The engine was seeded twice
    #[error("The simulation has already been seeded")]
    AlreadySeeded,

    /// Data file error
    #[error("Loader error: {0}")]
    Loader(#[from] LoaderError),
}

impl SimulationError {
    /// Create an invalid window error
    pub fn invalid_window(msg: impl Into<String>) -> Self {
        Self::InvalidWindow(msg.into())
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        match self {
            SimulationError::InvalidWindow(_) => true,
            SimulationError::UnknownStation { .. } => false,
            SimulationError::EmptyStationRegistry => false,
            SimulationError::Queue(_) => false,
            SimulationError::NotSeeded => false,
            SimulationError::AlreadySeeded => false,
            SimulationError::Loader(_) => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::InvalidWindow(_) => "Configuration",
            SimulationError::UnknownStation { .. } => "Network",
            SimulationError::EmptyStationRegistry => "Statistics",
            SimulationError::Queue(_) => "Event Queue",
            SimulationError::NotSeeded | SimulationError::AlreadySeeded => "Lifecycle",
            SimulationError::Loader(_) => "IO",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation_and_display() {
        let error = SimulationError::invalid_window("end before start");
        assert_eq!(error.to_string(), "Invalid simulation window: end before start");
        assert_eq!(error.category(), "Configuration");
        assert!(error.is_recoverable());
    }

    #[test]
    fn test_fatal_errors() {
        let empty = SimulationError::EmptyStationRegistry;
        assert!(!empty.is_recoverable());
        assert_eq!(empty.category(), "Statistics");

        let queue: SimulationError = QueueError::Empty.into();
        assert!(!queue.is_recoverable());
        assert_eq!(queue.category(), "Event Queue");
    }

    #[test]
    fn test_loader_failures_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "stations.json");
        let error: SimulationError = LoaderError::from(io).into();
        assert!(matches!(error, SimulationError::Loader(LoaderError::Io(_))));
        assert!(error.is_recoverable());
        assert_eq!(error.category(), "IO");
    }

    #[test]
    fn test_unknown_station_message() {
        let error = SimulationError::UnknownStation { ride: RideId(3), station: StationId::new("9999") };
        assert_eq!(error.to_string(), "RIDE_3 references unknown station 9999");
        assert_eq!(error.category(), "Network");
    }
}
