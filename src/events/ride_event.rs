//! Ride transition events
//!
//! A [`RideEvent`] is a scheduled ride start or ride end. Events compare by
//! timestamp alone so the queue keeps them in time order; the order among
//! events due in the same minute comes from [`RideEvent::batch_order`].

use crate::network::Ride;
use crate::types::{EventKind, RideId, StationId};
use chrono::NaiveDateTime;
use std::cmp::Ordering;

/// A scheduled state transition of one ride
#[derive(Debug, Clone, Copy)]
pub enum RideEvent {
    /// The ride tries to take a bike from its start station
    Start {
        /// When the ride departs
        time: NaiveDateTime,
        /// The ride concerned
        ride: RideId,
    },
    /// The ride tries to dock its bike at its end station
    End {
        /// When the ride arrives
        time: NaiveDateTime,
        /// The ride concerned
        ride: RideId,
    },
}

/// Processing order among events due in the same minute: arrivals before
/// departures, then start station id, end station id and ride index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BatchOrder<'a> {
    kind_rank: u8,
    start: &'a StationId,
    end: &'a StationId,
    ride: RideId,
}

impl RideEvent {
    /// Start event for a ride, at its departure time
    pub fn start_of(id: RideId, ride: &Ride) -> Self {
        RideEvent::Start { time: ride.start_time(), ride: id }
    }

    /// End event for a ride, at its arrival time
    pub fn end_of(id: RideId, ride: &Ride) -> Self {
        RideEvent::End { time: ride.end_time(), ride: id }
    }

    /// When the event fires
    pub fn time(&self) -> NaiveDateTime {
        match self {
            RideEvent::Start { time, .. } | RideEvent::End { time, .. } => *time,
        }
    }

    /// The ride the event concerns
    pub fn ride(&self) -> RideId {
        match self {
            RideEvent::Start { ride, .. } | RideEvent::End { ride, .. } => *ride,
        }
    }

    /// Start or end
    pub fn kind(&self) -> EventKind {
        match self {
            RideEvent::Start { .. } => EventKind::RideStart,
            RideEvent::End { .. } => EventKind::RideEnd,
        }
    }

    /// Sort key among events sharing a timestamp. `ride` must be the ride
    /// this event refers to.
    pub fn batch_order<'a>(&self, ride: &'a Ride) -> BatchOrder<'a> {
        BatchOrder { kind_rank: self.kind().rank(), start: ride.start(), end: ride.end(), ride: self.ride() }
    }
}

impl PartialEq for RideEvent {
    fn eq(&self, other: &Self) -> bool {
        self.time() == other.time()
    }
}

impl Eq for RideEvent {}

impl PartialOrd for RideEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RideEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time().cmp(&other.time())
    }
}
