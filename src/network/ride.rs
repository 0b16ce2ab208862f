//! Rides between stations
//!
//! A ride names its stations by id and never holds station state; the engine
//! resolves the ids against its registry when the ride starts or ends.

use crate::network::RideError;
use crate::types::timestamp::{is_whole_minute, serde_timestamp};
use crate::types::StationId;
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

/// A bike trip from one station to another over a time interval
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Ride {
    start: StationId,
    end: StationId,
    #[serde(with = "serde_timestamp")]
    start_time: NaiveDateTime,
    #[serde(with = "serde_timestamp")]
    end_time: NaiveDateTime,
}

impl Ride {
    /// Create a ride. Both timestamps must sit on whole minutes and the ride
    /// must end strictly after it starts.
    pub fn new(
        start: impl Into<StationId>,
        end: impl Into<StationId>,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Result<Self, RideError> {
        for ts in [start_time, end_time] {
            if !is_whole_minute(&ts) {
                return Err(RideError::UnalignedTimestamp(ts));
            }
        }
        if start_time >= end_time {
            return Err(RideError::NonIncreasingTimes { start_time, end_time });
        }

        Ok(Self { start: start.into(), end: end.into(), start_time, end_time })
    }

    /// Station the bike is taken from
    pub fn start(&self) -> &StationId {
        &self.start
    }

    /// Station the bike is returned to
    pub fn end(&self) -> &StationId {
        &self.end
    }

    /// Departure time
    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    /// Arrival time
    pub fn end_time(&self) -> NaiveDateTime {
        self.end_time
    }

    /// Time spent riding
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    /// Whether `time` lies within the ride, both ends inclusive
    pub fn spans(&self, time: NaiveDateTime) -> bool {
        self.start_time <= time && time <= self.end_time
    }
}
