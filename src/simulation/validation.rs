//! Ride admission and ride transition rules
//!
//! [`validate_ride_start`] and [`validate_ride_end`] are predicates *and*
//! mutators: a `true` result means the station change and its counter update
//! have already been applied, a `false` result means nothing changed. Callers
//! must invoke each of them exactly once per transition.

use crate::network::{Ride, StationRegistry};
use crate::simulation::{SimulationError, SimulationResult, SimulationWindow};
use crate::types::{RideId, StationId};
use serde::Serialize;
use std::fmt;

/// Why a ride is kept out of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InadmissibleReason {
    /// The ride starts after the window ends
    StartsAfterWindow,
    /// The ride ends before it starts
    EndsBeforeStart,
    /// The ride is over by the time the window starts
    EndedBeforeWindow,
    /// The ride starts before the window and ends after it
    SpansWindow,
}

impl fmt::Display for InadmissibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InadmissibleReason::StartsAfterWindow => write!(f, "starts after the window"),
            InadmissibleReason::EndsBeforeStart => write!(f, "ends before it starts"),
            InadmissibleReason::EndedBeforeWindow => write!(f, "ended before the window"),
            InadmissibleReason::SpansWindow => write!(f, "spans the whole window"),
        }
    }
}

/// How a ride enters a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Admission {
    /// The ride starts inside the window; its start is scheduled
    Scheduled,
    /// The ride is already under way when the window opens; it joins the
    /// active set directly and only its end is scheduled
    InProgress,
    /// The ride takes no part in the run
    Inadmissible(InadmissibleReason),
}

/// Decide how a ride enters a run over `window`.
///
/// Rides that start before the window and end after it are inadmissible
/// unless `include_spanning` is set, in which case they are in progress.
pub fn admit(ride: &Ride, window: &SimulationWindow, include_spanning: bool) -> Admission {
    let (start, end) = (ride.start_time(), ride.end_time());

    if start > window.end() {
        return Admission::Inadmissible(InadmissibleReason::StartsAfterWindow);
    }
    // Unreachable for rides built through `Ride::new`, which rejects start >= end
    if start > end {
        return Admission::Inadmissible(InadmissibleReason::EndsBeforeStart);
    }
    if start >= window.start() {
        return Admission::Scheduled;
    }
    if end <= window.start() {
        return Admission::Inadmissible(InadmissibleReason::EndedBeforeWindow);
    }
    if end > window.end() && !include_spanning {
        return Admission::Inadmissible(InadmissibleReason::SpansWindow);
    }
    Admission::InProgress
}

fn unknown(id: RideId, station: &StationId) -> SimulationError {
    SimulationError::UnknownStation { ride: id, station: station.clone() }
}

/// Try to take a bike from the ride's start station.
///
/// If the station has a bike, its count drops by one, its `ride_starts`
/// counter grows by one and `Ok(true)` is returned. Otherwise nothing changes
/// and `Ok(false)` is returned; the ride must then be discarded.
pub fn validate_ride_start(stations: &mut StationRegistry, id: RideId, ride: &Ride) -> SimulationResult<bool> {
    let station = stations.get_mut(ride.start().as_str()).ok_or_else(|| unknown(id, ride.start()))?;
    Ok(station.try_undock())
}

/// Try to dock the ride's bike at its end station.
///
/// If the station has a free dock, its count grows by one, its
/// `ride_finishes` counter grows by one and `Ok(true)` is returned. Otherwise
/// nothing changes and `Ok(false)` is returned; the bike is lost but the ride
/// is still over.
pub fn validate_ride_end(stations: &mut StationRegistry, id: RideId, ride: &Ride) -> SimulationResult<bool> {
    let station = stations.get_mut(ride.end().as_str()).ok_or_else(|| unknown(id, ride.end()))?;
    Ok(station.try_dock())
}
