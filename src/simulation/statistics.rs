//! Statistics collection and reporting
//!
//! [`StationExtremes`] scans the final station state for the busiest and most
//! constrained stations. [`RunSummary`] counts what happened to the rides of a
//! run.

use crate::network::{Station, StationRegistry};
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::{format_timestamp, serde_timestamp, RunId, SimulationMode};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// The station holding an extremal value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticEntry {
    /// Station name
    pub station: String,
    /// The value; seconds for the low-* statistics, counts otherwise
    pub value: u64,
}

/// Per-station maxima over a station registry
///
/// Ties go to the station whose name sorts first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationExtremes {
    /// Most rides started
    pub max_start: StatisticEntry,
    /// Most rides finished
    pub max_end: StatisticEntry,
    /// Longest time with few bikes left
    pub max_time_low_availability: StatisticEntry,
    /// Longest time with few docks left
    pub max_time_low_unoccupied: StatisticEntry,
}

/// Running argmax that prefers the alphabetically earlier name on ties
struct Leader<'a> {
    name: &'a str,
    value: u64,
}

impl<'a> Leader<'a> {
    fn offer(slot: &mut Option<Leader<'a>>, name: &'a str, value: u64) {
        let replace = match slot {
            None => true,
            Some(best) => value > best.value || (value == best.value && name < best.name),
        };
        if replace {
            *slot = Some(Leader { name, value });
        }
    }

    fn into_entry(slot: Option<Leader<'a>>) -> SimulationResult<StatisticEntry> {
        slot.map(|best| StatisticEntry { station: best.name.to_string(), value: best.value })
            .ok_or(SimulationError::EmptyStationRegistry)
    }
}

impl StationExtremes {
    /// Compute the four maxima. An empty registry has no maxima and is an
    /// error.
    pub fn compute(stations: &StationRegistry) -> SimulationResult<Self> {
        Self::from_stations(stations.stations())
    }

    fn from_stations<'a, I>(stations: I) -> SimulationResult<Self>
    where
        I: IntoIterator<Item = &'a Station>,
    {
        let (mut start, mut end, mut low_availability, mut low_unoccupied) = (None, None, None, None);

        for station in stations {
            let stats = station.stats();
            Leader::offer(&mut start, station.name(), stats.ride_starts);
            Leader::offer(&mut end, station.name(), stats.ride_finishes);
            Leader::offer(&mut low_availability, station.name(), stats.low_availability_secs);
            Leader::offer(&mut low_unoccupied, station.name(), stats.low_unoccupied_secs);
        }

        Ok(Self {
            max_start: Leader::into_entry(start)?,
            max_end: Leader::into_entry(end)?,
            max_time_low_availability: Leader::into_entry(low_availability)?,
            max_time_low_unoccupied: Leader::into_entry(low_unoccupied)?,
        })
    }

    /// The maxima keyed by statistic name
    pub fn as_map(&self) -> BTreeMap<&'static str, &StatisticEntry> {
        BTreeMap::from([
            ("max_start", &self.max_start),
            ("max_end", &self.max_end),
            ("max_time_low_availability", &self.max_time_low_availability),
            ("max_time_low_unoccupied", &self.max_time_low_unoccupied),
        ])
    }

    /// Generate a human-readable report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str("=== Station Statistics ===\n");
        report.push_str(&format!(
            "  Most rides started:        {} ({})\n",
            self.max_start.station, self.max_start.value
        ));
        report.push_str(&format!(
            "  Most rides finished:       {} ({})\n",
            self.max_end.station, self.max_end.value
        ));
        report.push_str(&format!(
            "  Longest low availability:  {} ({} s)\n",
            self.max_time_low_availability.station, self.max_time_low_availability.value
        ));
        report.push_str(&format!(
            "  Longest low unoccupied:    {} ({} s)\n",
            self.max_time_low_unoccupied.station, self.max_time_low_unoccupied.value
        ));
        report
    }
}

impl fmt::Display for StationExtremes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.generate_report())
    }
}

/// What happened to the rides of one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Identifier of the run
    pub run_id: RunId,
    /// How time was advanced
    pub mode: SimulationMode,
    /// First simulated minute
    #[serde(with = "serde_timestamp")]
    pub window_start: NaiveDateTime,
    /// First minute after the run
    #[serde(with = "serde_timestamp")]
    pub window_end: NaiveDateTime,
    /// Minutes actually simulated
    pub minutes_simulated: i64,
    /// Ride starts and ends processed
    pub events_processed: u64,
    /// Rides scheduled or already in progress at the window start
    pub rides_admitted: usize,
    /// Rides kept out of the run
    pub rides_inadmissible: usize,
    /// Rides that found a bike
    pub rides_started: u64,
    /// Rides that found no bike
    pub rides_rejected: u64,
    /// Rides whose end was processed
    pub rides_completed: u64,
    /// Completed rides that found no free dock
    pub bikes_lost: u64,
    /// Rides still in flight when the run ended
    pub active_at_end: usize,
    /// Whether the visualizer ended the run before the window end
    pub stopped_early: bool,
}

impl RunSummary {
    /// Share of attempted starts that found no bike, in percent
    pub fn rejection_percentage(&self) -> f64 {
        let attempts = self.rides_started + self.rides_rejected;
        if attempts == 0 {
            0.0
        } else {
            (self.rides_rejected as f64 / attempts as f64) * 100.0
        }
    }

    /// Generate a human-readable report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str("=== Run Summary ===\n");
        report.push_str(&format!("  Run: {} ({} mode)\n", self.run_id, self.mode));
        report.push_str(&format!(
            "  Window: {} to {} ({} minutes simulated{})\n",
            format_timestamp(&self.window_start),
            format_timestamp(&self.window_end),
            self.minutes_simulated,
            if self.stopped_early { ", stopped early" } else { "" }
        ));
        report.push_str(&format!(
            "  Rides: {} admitted, {} inadmissible\n",
            self.rides_admitted, self.rides_inadmissible
        ));
        report.push_str(&format!(
            "  Starts: {} started, {} rejected ({:.1}%)\n",
            self.rides_started,
            self.rides_rejected,
            self.rejection_percentage()
        ));
        report.push_str(&format!(
            "  Ends: {} completed, {} bikes lost, {} still active\n",
            self.rides_completed, self.bikes_lost, self.active_at_end
        ));
        report.push_str(&format!("  Events processed: {}\n", self.events_processed));
        report
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.generate_report())
    }
}
