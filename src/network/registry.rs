//! Station registry
//!
//! Owns every station of the network, keyed by station id. Iteration order is
//! the id order, which keeps every per-minute scan deterministic.

use crate::network::{NetworkError, Station};
use crate::types::StationId;
use serde::Serialize;
use std::collections::btree_map::{self, BTreeMap};

/// The stations of a bike-share network
#[derive(Debug, Clone, Default, Serialize)]
pub struct StationRegistry {
    stations: BTreeMap<StationId, Station>,
}

impl StationRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a set of stations, rejecting duplicate ids
    pub fn from_stations<I>(stations: I) -> Result<Self, NetworkError>
    where
        I: IntoIterator<Item = Station>,
    {
        let mut registry = Self::new();
        for station in stations {
            registry.add_station(station)?;
        }
        Ok(registry)
    }

    /// Add a station. An id that is already registered is an error and
    /// leaves the existing station in place.
    pub fn add_station(&mut self, station: Station) -> Result<(), NetworkError> {
        match self.stations.entry(station.id().clone()) {
            btree_map::Entry::Occupied(entry) => {
                Err(NetworkError::DuplicateStation(entry.key().clone()))
            }
            btree_map::Entry::Vacant(entry) => {
                entry.insert(station);
                Ok(())
            }
        }
    }

    /// Get a station by id
    pub fn get(&self, id: &str) -> Option<&Station> {
        self.stations.get(id)
    }

    /// Get a mutable reference to a station by id
    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Station> {
        self.stations.get_mut(id)
    }

    /// Whether a station with this id exists
    pub fn contains(&self, id: &str) -> bool {
        self.stations.contains_key(id)
    }

    /// Number of stations
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether the registry holds no stations
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Stations in id order
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    /// Bikes docked across the whole network
    pub fn total_bikes(&self) -> u64 {
        self.stations.values().map(|s| u64::from(s.num_bikes())).sum()
    }

    /// Docks across the whole network
    pub fn total_capacity(&self) -> u64 {
        self.stations.values().map(|s| u64::from(s.capacity())).sum()
    }

    /// Credit one simulated minute to every station
    pub(crate) fn record_minute(&mut self) {
        for station in self.stations.values_mut() {
            station.record_minute();
        }
    }
}
