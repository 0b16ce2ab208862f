//! Docking stations and their per-station counters
//!
//! A station's bike count only changes through [`Station::try_undock`] and
//! [`Station::try_dock`], and its low-availability counters only through
//! [`Station::record_minute`]. All three keep `0 <= num_bikes <= capacity`.

use crate::network::NetworkError;
use crate::types::StationId;
use serde::{Deserialize, Serialize};

/// Bike or dock count at or below which a station counts as "low"
pub const LOW_THRESHOLD: u32 = 5;

/// Seconds credited to a low-* counter for each simulated minute
pub const SECONDS_PER_MINUTE: u64 = 60;

/// Geographic position of a station
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Longitude in degrees
    pub longitude: f64,
    /// Latitude in degrees
    pub latitude: f64,
}

impl Coordinate {
    /// Create a coordinate from (longitude, latitude)
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self { longitude, latitude }
    }
}

/// Counters accumulated by a station over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationStats {
    /// Rides that successfully took a bike from this station
    pub ride_starts: u64,
    /// Rides that successfully docked a bike at this station
    pub ride_finishes: u64,
    /// Seconds spent with at most [`LOW_THRESHOLD`] bikes
    pub low_availability_secs: u64,
    /// Seconds spent with at most [`LOW_THRESHOLD`] free docks
    pub low_unoccupied_secs: u64,
}

/// A bike-share docking station
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    id: StationId,
    name: String,
    location: Coordinate,
    capacity: u32,
    num_bikes: u32,
    stats: StationStats,
}

impl Station {
    /// Create a station, rejecting a bike count above capacity
    pub fn new(
        id: impl Into<StationId>,
        name: impl Into<String>,
        location: Coordinate,
        capacity: u32,
        num_bikes: u32,
    ) -> Result<Self, NetworkError> {
        let id = id.into();
        if num_bikes > capacity {
            return Err(NetworkError::OverCapacity { station: id, num_bikes, capacity });
        }

        Ok(Self { id, name: name.into(), location, capacity, num_bikes, stats: StationStats::default() })
    }

    /// Station identifier
    pub fn id(&self) -> &StationId {
        &self.id
    }

    /// Human-readable station name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Station position
    pub fn location(&self) -> Coordinate {
        self.location
    }

    /// Total number of docks
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Bikes currently docked
    pub fn num_bikes(&self) -> u32 {
        self.num_bikes
    }

    /// Docks currently free
    pub fn free_docks(&self) -> u32 {
        self.capacity - self.num_bikes
    }

    /// Counters accumulated so far
    pub fn stats(&self) -> &StationStats {
        &self.stats
    }

    /// At most [`LOW_THRESHOLD`] bikes left
    pub fn is_low_availability(&self) -> bool {
        self.num_bikes <= LOW_THRESHOLD
    }

    /// At most [`LOW_THRESHOLD`] docks left
    pub fn is_low_unoccupied(&self) -> bool {
        self.free_docks() <= LOW_THRESHOLD
    }

    /// Hand a bike to a departing ride.
    ///
    /// On success the bike count drops by one and `ride_starts` grows by one.
    /// With no bike docked nothing changes and `false` is returned.
    pub(crate) fn try_undock(&mut self) -> bool {
        if self.num_bikes == 0 {
            return false;
        }
        self.num_bikes -= 1;
        self.stats.ride_starts += 1;
        true
    }

    /// Accept a bike from an arriving ride.
    ///
    /// On success the bike count grows by one and `ride_finishes` grows by one.
    /// With every dock taken nothing changes and `false` is returned.
    pub(crate) fn try_dock(&mut self) -> bool {
        if self.free_docks() == 0 {
            return false;
        }
        self.num_bikes += 1;
        self.stats.ride_finishes += 1;
        true
    }

    /// Credit one simulated minute to the low-* counters that apply
    pub(crate) fn record_minute(&mut self) {
        if self.is_low_availability() {
            self.stats.low_availability_secs += SECONDS_PER_MINUTE;
        }
        if self.is_low_unoccupied() {
            self.stats.low_unoccupied_secs += SECONDS_PER_MINUTE;
        }
    }
}
