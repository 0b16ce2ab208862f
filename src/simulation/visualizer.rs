//! Per-minute observation hook
//!
//! The engine hands every simulated minute to a [`Visualizer`] after the
//! minute's transitions and statistics tick have been applied. Rendering is a
//! side effect only; a visualizer cannot change simulation state.

use crate::network::{Ride, StationRegistry};
use crate::types::{RideId, StationId};
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

/// A ride in flight, as shown to a [`Visualizer`]
#[derive(Debug, Clone, Copy)]
pub struct ActiveRide<'a> {
    /// Index of the ride in the engine
    pub id: RideId,
    /// The ride itself
    pub ride: &'a Ride,
}

/// Observer called once per simulated minute
pub trait Visualizer {
    /// Observe the network at `now`.
    fn render(&mut self, now: NaiveDateTime, stations: &StationRegistry, active_rides: &[ActiveRide<'_>]);

    /// Ask the engine to end the run early. Checked after every render.
    fn should_stop(&mut self) -> bool {
        false
    }
}

/// Visualizer that ignores every frame
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopVisualizer;

impl Visualizer for NoopVisualizer {
    fn render(&mut self, _now: NaiveDateTime, _stations: &StationRegistry, _active_rides: &[ActiveRide<'_>]) {}
}

/// Bike count and capacity of one station at one minute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationSnapshot {
    /// Bikes docked
    pub num_bikes: u32,
    /// Docks in total
    pub capacity: u32,
}

/// State of the network at one simulated minute
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// The minute observed
    pub time: NaiveDateTime,
    /// Per-station bike counts
    pub stations: BTreeMap<StationId, StationSnapshot>,
    /// Rides in flight, in ascending id order
    pub active: Vec<RideId>,
}

impl Snapshot {
    /// Bikes docked across the whole network
    pub fn total_bikes(&self) -> u64 {
        self.stations.values().map(|s| u64::from(s.num_bikes)).sum()
    }
}

/// Visualizer that keeps a [`Snapshot`] of every minute it sees
///
/// ```rust
/// use bikeshare_simulator::simulation::SnapshotRecorder;
///
/// let recorder = SnapshotRecorder::stopping_after(30);
/// assert!(recorder.snapshots().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SnapshotRecorder {
    snapshots: Vec<Snapshot>,
    stop_after: Option<usize>,
}

impl SnapshotRecorder {
    /// Record every minute of the run
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `minutes` minutes, then ask the engine to stop
    pub fn stopping_after(minutes: usize) -> Self {
        Self { snapshots: Vec::new(), stop_after: Some(minutes) }
    }

    /// Snapshots in the order they were taken
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Consume the recorder, keeping its snapshots
    pub fn into_snapshots(self) -> Vec<Snapshot> {
        self.snapshots
    }
}

impl Visualizer for SnapshotRecorder {
    fn render(&mut self, now: NaiveDateTime, stations: &StationRegistry, active_rides: &[ActiveRide<'_>]) {
        let stations = stations
            .stations()
            .map(|station| {
                let snapshot = StationSnapshot { num_bikes: station.num_bikes(), capacity: station.capacity() };
                (station.id().clone(), snapshot)
            })
            .collect();
        let active = active_rides.iter().map(|active| active.id).collect();

        self.snapshots.push(Snapshot { time: now, stations, active });
    }

    fn should_stop(&mut self) -> bool {
        matches!(self.stop_after, Some(limit) if self.snapshots.len() >= limit)
    }
}
