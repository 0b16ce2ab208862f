//! Error types for building the station network and its rides

use crate::types::StationId;
use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors raised while assembling stations into a registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// A station was created holding more bikes than it has docks
    #[error("Station {station} holds {num_bikes} bikes but has capacity {capacity}")]
    OverCapacity {
        /// Offending station
        station: StationId,
        /// Requested bike count
        num_bikes: u32,
        /// Station capacity
        capacity: u32,
    },

    /// Two stations share an identifier
    #[error("Duplicate station id: {0}")]
    DuplicateStation(StationId),
}

/// Errors raised when constructing a ride
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RideError {
    /// The ride does not end strictly after it starts
    #[error("Ride must end after it starts (start {start_time}, end {end_time})")]
    NonIncreasingTimes {
        /// Ride start
        start_time: NaiveDateTime,
        /// Ride end
        end_time: NaiveDateTime,
    },

    /// A timestamp carries seconds; the simulation runs on whole minutes
    #[error("Ride timestamp {0} is not on a whole minute")]
    UnalignedTimestamp(NaiveDateTime),
}
