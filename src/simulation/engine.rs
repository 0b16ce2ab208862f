//! Discrete-event simulation engine
//!
//! The engine owns the station registry, the rides and the event queue of one
//! run. Its lifecycle is construct, seed, step until finished, then query:
//!
//! ```rust
//! use bikeshare_simulator::network::{Coordinate, Ride, Station, StationRegistry};
//! use bikeshare_simulator::simulation::{NoopVisualizer, SimulationEngine, SimulationWindow};
//! use bikeshare_simulator::types::{parse_timestamp, SimulationMode};
//!
//! let stations = StationRegistry::from_stations([
//!     Station::new("7000", "Bay St", Coordinate::new(-79.39, 43.65), 10, 4).unwrap(),
//!     Station::new("7001", "Adelaide St", Coordinate::new(-79.38, 43.64), 10, 6).unwrap(),
//! ])
//! .unwrap();
//! let rides = vec![Ride::new(
//!     "7000",
//!     "7001",
//!     parse_timestamp("2017-06-01 07:10").unwrap(),
//!     parse_timestamp("2017-06-01 07:25").unwrap(),
//! )
//! .unwrap()];
//! let window = SimulationWindow::new(
//!     parse_timestamp("2017-06-01 07:00").unwrap(),
//!     parse_timestamp("2017-06-01 08:00").unwrap(),
//! )
//! .unwrap();
//!
//! let mut engine = SimulationEngine::new(stations, rides).unwrap();
//! let summary = engine.run(window, SimulationMode::EventDriven, &mut NoopVisualizer).unwrap();
//!
//! assert_eq!(summary.rides_completed, 1);
//! assert_eq!(engine.stations().get("7001").unwrap().num_bikes(), 7);
//! ```

use crate::events::{PriorityQueue, RideEvent};
use crate::network::{load_rides, load_stations, Ride, StationRegistry};
use crate::simulation::{
    admit, validate_ride_end, validate_ride_start, ActiveRide, Admission, InadmissibleReason,
    RunSummary, SimulationClock, SimulationError, SimulationResult, SimulationWindow,
    StationExtremes, Visualizer,
};
use crate::types::{format_timestamp, RideId, RunId, SimulationMode};
use crate::{perf_span, sim_event};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Where a ride stands within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RideStatus {
    /// Kept out of the run at seeding
    Inadmissible(InadmissibleReason),
    /// Waiting for its start minute
    Scheduled,
    /// In flight
    Active,
    /// Its end has been processed, whether or not the bike was docked
    Completed,
    /// Found no bike at its start station; never reconsidered
    Rejected,
}

#[derive(Debug, Clone, Copy, Default)]
struct RunCounters {
    admitted: usize,
    inadmissible: usize,
    events_processed: u64,
    rides_started: u64,
    rides_rejected: u64,
    rides_completed: u64,
    bikes_lost: u64,
}

/// Bike-share simulation over a fixed station network and ride list
#[derive(Debug)]
pub struct SimulationEngine {
    run_id: RunId,
    stations: StationRegistry,
    rides: Vec<Ride>,
    include_spanning: bool,
    mode: SimulationMode,
    /// `None` until the engine is seeded
    clock: Option<SimulationClock>,
    queue: PriorityQueue<RideEvent>,
    active: BTreeSet<RideId>,
    status: Vec<RideStatus>,
    counters: RunCounters,
    stopped_early: bool,
}

impl SimulationEngine {
    /// Create an engine. Every ride must start and end at a registered
    /// station.
    pub fn new(stations: StationRegistry, rides: Vec<Ride>) -> SimulationResult<Self> {
        for (index, ride) in rides.iter().enumerate() {
            for station in [ride.start(), ride.end()] {
                if !stations.contains(station.as_str()) {
                    return Err(SimulationError::UnknownStation { ride: RideId(index), station: station.clone() });
                }
            }
        }

        let run_id = RunId::new();
        info!("Created simulation {} over {} stations and {} rides", run_id, stations.len(), rides.len());

        Ok(Self {
            run_id,
            stations,
            rides,
            include_spanning: false,
            mode: SimulationMode::default(),
            clock: None,
            queue: PriorityQueue::new(),
            active: BTreeSet::new(),
            status: Vec::new(),
            counters: RunCounters::default(),
            stopped_early: false,
        })
    }

    /// Load the station and ride files and build an engine over them.
    /// Rides naming unknown stations are dropped by the ride loader.
    pub fn from_files<P: AsRef<Path>, Q: AsRef<Path>>(stations_file: P, rides_file: Q) -> SimulationResult<Self> {
        let stations = load_stations(stations_file)?;
        let rides = load_rides(rides_file, &stations)?;
        Self::new(stations, rides)
    }

    /// Admit rides that start before the window and end after it, as rides
    /// already in progress. Takes effect at the next [`seed`](Self::seed).
    pub fn with_spanning_rides(mut self, include: bool) -> Self {
        self.include_spanning = include;
        self
    }

    /// Decide which rides take part in a run over `window` and prepare the
    /// first minute. Rides already in progress join the active set directly.
    #[instrument(skip(self), fields(run_id = %self.run_id))]
    pub fn seed(&mut self, window: SimulationWindow, mode: SimulationMode) -> SimulationResult<()> {
        if self.clock.is_some() {
            return Err(SimulationError::AlreadySeeded);
        }

        let mut status = Vec::with_capacity(self.rides.len());
        let mut initial_events = Vec::new();
        for (index, ride) in self.rides.iter().enumerate() {
            let id = RideId(index);
            let state = match admit(ride, &window, self.include_spanning) {
                Admission::Scheduled => {
                    initial_events.push(RideEvent::start_of(id, ride));
                    RideStatus::Scheduled
                }
                Admission::InProgress => {
                    self.active.insert(id);
                    initial_events.push(RideEvent::end_of(id, ride));
                    RideStatus::Active
                }
                Admission::Inadmissible(reason) => {
                    debug!("{} is inadmissible: {}", id, reason);
                    RideStatus::Inadmissible(reason)
                }
            };
            status.push(state);
        }

        // The naive scan finds its own transitions
        if mode == SimulationMode::EventDriven {
            self.queue.extend(initial_events);
        }

        self.counters.inadmissible =
            status.iter().filter(|s| matches!(s, RideStatus::Inadmissible(_))).count();
        self.counters.admitted = status.len() - self.counters.inadmissible;
        self.status = status;
        self.mode = mode;
        self.clock = Some(SimulationClock::new(window));

        sim_event!(
            info,
            "Simulation seeded",
            admitted = self.counters.admitted,
            inadmissible = self.counters.inadmissible,
            in_progress = self.active.len(),
            minutes = window.minutes(),
        );
        Ok(())
    }

    /// Simulate the current minute: apply its ride transitions, tick the
    /// station counters, render, then move on. Does nothing once the run is
    /// finished.
    pub fn step(&mut self, visualizer: &mut dyn Visualizer) -> SimulationResult<()> {
        let now = match &self.clock {
            None => return Err(SimulationError::NotSeeded),
            Some(clock) if clock.is_finished() || self.stopped_early => return Ok(()),
            Some(clock) => clock.now(),
        };

        let batch = match self.mode {
            SimulationMode::EventDriven => self.drain_due(now)?,
            SimulationMode::Naive => self.scan_due(now),
        };
        for event in batch {
            let follow_on = self.dispatch(event)?;
            if let (SimulationMode::EventDriven, Some(next)) = (self.mode, follow_on) {
                self.queue.insert(next);
            }
        }

        self.stations.record_minute();

        let active: Vec<ActiveRide<'_>> =
            self.active.iter().map(|&id| ActiveRide { id, ride: &self.rides[id.index()] }).collect();
        visualizer.render(now, &self.stations, &active);

        let clock = self.clock.as_mut().ok_or(SimulationError::NotSeeded)?;
        clock.advance();
        if !clock.is_finished() && visualizer.should_stop() {
            info!("Run stopped by the visualizer at {}", format_timestamp(&clock.now()));
            self.stopped_early = true;
        }
        Ok(())
    }

    /// Seed the engine and step it until the window ends or the visualizer
    /// asks to stop.
    pub fn run(
        &mut self,
        window: SimulationWindow,
        mode: SimulationMode,
        visualizer: &mut dyn Visualizer,
    ) -> SimulationResult<RunSummary> {
        let span = perf_span!(
            "simulation_run",
            run_id = tracing::field::display(self.run_id),
            mode = tracing::field::display(mode),
        );
        let _guard = span.enter();

        self.seed(window, mode)?;
        while !self.is_finished() {
            self.step(visualizer)?;
        }

        let summary = self.summary()?;
        sim_event!(
            info,
            "Simulation completed",
            minutes = summary.minutes_simulated,
            events = summary.events_processed,
            started = summary.rides_started,
            rejected = summary.rides_rejected,
            bikes_lost = summary.bikes_lost,
        );
        Ok(summary)
    }

    /// Whether every minute has been simulated or the run was stopped
    pub fn is_finished(&self) -> bool {
        self.stopped_early || self.clock.as_ref().map_or(false, SimulationClock::is_finished)
    }

    /// Identifier of this run
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// The minute the next step will simulate
    pub fn now(&self) -> Option<NaiveDateTime> {
        self.clock.as_ref().map(SimulationClock::now)
    }

    /// The station network in its current state
    pub fn stations(&self) -> &StationRegistry {
        &self.stations
    }

    /// All rides, indexed by [`RideId`]
    pub fn rides(&self) -> &[Ride] {
        &self.rides
    }

    /// Rides in flight, in ascending id order
    pub fn active_rides(&self) -> impl Iterator<Item = RideId> + '_ {
        self.active.iter().copied()
    }

    /// Where a ride stands; `None` before seeding or for an unknown id
    pub fn ride_status(&self, id: RideId) -> Option<RideStatus> {
        self.status.get(id.index()).copied()
    }

    /// Counts of what happened so far
    pub fn summary(&self) -> SimulationResult<RunSummary> {
        let clock = self.clock.as_ref().ok_or(SimulationError::NotSeeded)?;
        let window = clock.window();

        Ok(RunSummary {
            run_id: self.run_id,
            mode: self.mode,
            window_start: window.start(),
            window_end: window.end(),
            minutes_simulated: clock.minutes_elapsed(),
            events_processed: self.counters.events_processed,
            rides_admitted: self.counters.admitted,
            rides_inadmissible: self.counters.inadmissible,
            rides_started: self.counters.rides_started,
            rides_rejected: self.counters.rides_rejected,
            rides_completed: self.counters.rides_completed,
            bikes_lost: self.counters.bikes_lost,
            active_at_end: self.active.len(),
            stopped_early: self.stopped_early,
        })
    }

    /// Per-station maxima over the current station state
    pub fn compute_statistics(&self) -> SimulationResult<StationExtremes> {
        StationExtremes::compute(&self.stations)
    }

    /// Pop every queued event due by `now`, in batch order
    fn drain_due(&mut self, now: NaiveDateTime) -> SimulationResult<Vec<RideEvent>> {
        let mut batch = Vec::new();
        while let Some(next) = self.queue.peek_min() {
            if next.time() > now {
                break;
            }
            batch.push(self.queue.extract_min()?);
        }
        self.sort_batch(&mut batch);
        Ok(batch)
    }

    /// Derive the transitions due at `now` from the rides' own times
    fn scan_due(&self, now: NaiveDateTime) -> Vec<RideEvent> {
        let mut batch: Vec<RideEvent> = self
            .rides
            .iter()
            .zip(&self.status)
            .enumerate()
            .filter_map(|(index, (ride, status))| match status {
                RideStatus::Scheduled if ride.spans(now) => Some(RideEvent::start_of(RideId(index), ride)),
                RideStatus::Active if ride.end_time() <= now => Some(RideEvent::end_of(RideId(index), ride)),
                _ => None,
            })
            .collect();
        self.sort_batch(&mut batch);
        batch
    }

    fn sort_batch(&self, batch: &mut [RideEvent]) {
        let rides = &self.rides;
        batch.sort_by(|a, b| a.batch_order(&rides[a.ride().index()]).cmp(&b.batch_order(&rides[b.ride().index()])));
    }

    /// Apply one event. A successful start yields the ride's end event.
    fn dispatch(&mut self, event: RideEvent) -> SimulationResult<Option<RideEvent>> {
        let id = event.ride();
        let ride = &self.rides[id.index()];
        self.counters.events_processed += 1;

        match event {
            RideEvent::Start { .. } => {
                if validate_ride_start(&mut self.stations, id, ride)? {
                    self.active.insert(id);
                    self.status[id.index()] = RideStatus::Active;
                    self.counters.rides_started += 1;
                    sim_event!(debug, "Ride started", ride = id.index(), station = ride.start().as_str());
                    Ok(Some(RideEvent::end_of(id, ride)))
                } else {
                    self.status[id.index()] = RideStatus::Rejected;
                    self.counters.rides_rejected += 1;
                    sim_event!(debug, "Ride rejected: no bike available", ride = id.index(), station = ride.start().as_str());
                    Ok(None)
                }
            }
            RideEvent::End { .. } => {
                if validate_ride_end(&mut self.stations, id, ride)? {
                    sim_event!(debug, "Ride finished", ride = id.index(), station = ride.end().as_str());
                } else {
                    self.counters.bikes_lost += 1;
                    sim_event!(debug, "Ride finished without a free dock", ride = id.index(), station = ride.end().as_str());
                }
                self.active.remove(&id);
                self.status[id.index()] = RideStatus::Completed;
                self.counters.rides_completed += 1;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{Coordinate, Station};
    use crate::simulation::{NoopVisualizer, SnapshotRecorder};
    use crate::types::parse_timestamp;

    fn ts(value: &str) -> NaiveDateTime {
        parse_timestamp(value).unwrap()
    }

    fn window(start: &str, end: &str) -> SimulationWindow {
        SimulationWindow::new(ts(start), ts(end)).unwrap()
    }

    fn stations() -> StationRegistry {
        StationRegistry::from_stations([
            Station::new("a", "Alpha", Coordinate::new(0.0, 0.0), 10, 1).unwrap(),
            Station::new("b", "Beta", Coordinate::new(0.0, 0.0), 10, 9).unwrap(),
        ])
        .unwrap()
    }

    fn ride(start: &str, end: &str, from: &str, to: &str) -> Ride {
        Ride::new(start, end, ts(from), ts(to)).unwrap()
    }

    #[test]
    fn test_new_rejects_unknown_station() {
        let rides = vec![ride("a", "zzz", "2017-06-01 07:00", "2017-06-01 07:10")];
        let result = SimulationEngine::new(stations(), rides);
        assert!(matches!(result, Err(SimulationError::UnknownStation { ride: RideId(0), .. })));
    }

    #[test]
    fn test_seed_fills_queue_only_in_event_driven_mode() {
        let rides = vec![
            ride("a", "b", "2017-06-01 07:10", "2017-06-01 07:20"),
            ride("b", "a", "2017-06-01 06:50", "2017-06-01 07:15"),
            ride("a", "b", "2017-06-01 05:00", "2017-06-01 05:30"),
        ];
        let w = window("2017-06-01 07:00", "2017-06-01 08:00");

        let mut event_driven = SimulationEngine::new(stations(), rides.clone()).unwrap();
        event_driven.seed(w, SimulationMode::EventDriven).unwrap();
        assert_eq!(event_driven.queue.len(), 2);
        // The in-progress ride's end comes out first
        assert_eq!(event_driven.queue.peek_min().map(|e| e.time()), Some(ts("2017-06-01 07:10")));

        let mut naive = SimulationEngine::new(stations(), rides).unwrap();
        naive.seed(w, SimulationMode::Naive).unwrap();
        assert!(naive.queue.is_empty());
        assert_eq!(naive.active_rides().collect::<Vec<_>>(), vec![RideId(1)]);
    }

    #[test]
    fn test_lifecycle_errors() {
        let mut engine = SimulationEngine::new(stations(), Vec::new()).unwrap();
        assert!(matches!(engine.step(&mut NoopVisualizer), Err(SimulationError::NotSeeded)));
        assert!(matches!(engine.summary(), Err(SimulationError::NotSeeded)));

        let w = window("2017-06-01 07:00", "2017-06-01 07:05");
        engine.seed(w, SimulationMode::EventDriven).unwrap();
        assert!(matches!(engine.seed(w, SimulationMode::EventDriven), Err(SimulationError::AlreadySeeded)));
    }

    #[test]
    fn test_second_start_is_rejected_and_never_retried() {
        let rides = vec![
            ride("a", "b", "2017-06-01 07:01", "2017-06-01 07:30"),
            ride("a", "b", "2017-06-01 07:02", "2017-06-01 07:30"),
        ];
        let w = window("2017-06-01 07:00", "2017-06-01 07:10");

        for mode in [SimulationMode::EventDriven, SimulationMode::Naive] {
            let mut engine = SimulationEngine::new(stations(), rides.clone()).unwrap();
            let summary = engine.run(w, mode, &mut NoopVisualizer).unwrap();

            assert_eq!(engine.ride_status(RideId(0)), Some(RideStatus::Active));
            assert_eq!(engine.ride_status(RideId(1)), Some(RideStatus::Rejected));
            assert_eq!(summary.rides_started, 1);
            assert_eq!(summary.rides_rejected, 1);
            assert_eq!(engine.active_rides().collect::<Vec<_>>(), vec![RideId(0)]);
        }
    }

    #[test]
    fn test_arrival_frees_bike_for_same_minute_departure() {
        // "a" has a single bike; ride 0 brings one back at 07:10 while ride 2
        // leaves "a" at 07:10
        let rides = vec![
            ride("b", "a", "2017-06-01 07:00", "2017-06-01 07:10"),
            ride("a", "b", "2017-06-01 07:00", "2017-06-01 07:05"),
            ride("a", "b", "2017-06-01 07:10", "2017-06-01 07:20"),
        ];
        let w = window("2017-06-01 07:00", "2017-06-01 07:30");

        for mode in [SimulationMode::EventDriven, SimulationMode::Naive] {
            let mut engine = SimulationEngine::new(stations(), rides.clone()).unwrap();
            let summary = engine.run(w, mode, &mut NoopVisualizer).unwrap();
            assert_eq!(summary.rides_rejected, 0, "{mode}");
            assert_eq!(summary.rides_completed, 3, "{mode}");
        }
    }

    #[test]
    fn test_step_records_one_tick_per_minute() {
        let mut engine = SimulationEngine::new(stations(), Vec::new()).unwrap();
        engine.seed(window("2017-06-01 07:00", "2017-06-01 07:03"), SimulationMode::EventDriven).unwrap();

        let mut recorder = SnapshotRecorder::new();
        engine.step(&mut recorder).unwrap();
        assert_eq!(engine.stations().get("a").unwrap().stats().low_availability_secs, 60);
        assert_eq!(engine.now(), Some(ts("2017-06-01 07:01")));

        while !engine.is_finished() {
            engine.step(&mut recorder).unwrap();
        }
        // Stepping a finished engine changes nothing
        engine.step(&mut recorder).unwrap();

        assert_eq!(recorder.snapshots().len(), 3);
        assert_eq!(engine.stations().get("a").unwrap().stats().low_availability_secs, 180);
        assert_eq!(engine.summary().unwrap().minutes_simulated, 3);
    }

    #[test]
    fn test_visualizer_can_stop_the_run() {
        let mut engine = SimulationEngine::new(stations(), Vec::new()).unwrap();
        let mut recorder = SnapshotRecorder::stopping_after(5);

        let summary = engine
            .run(window("2017-06-01 07:00", "2017-06-01 08:00"), SimulationMode::Naive, &mut recorder)
            .unwrap();

        assert!(summary.stopped_early);
        assert_eq!(summary.minutes_simulated, 5);
        assert_eq!(recorder.snapshots().len(), 5);
    }
}
