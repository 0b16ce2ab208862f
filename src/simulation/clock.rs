//! Simulation window and clock
//!
//! The clock walks the window one minute at a time. The window's start minute
//! is simulated, its end minute is not.

use crate::simulation::{SimulationError, SimulationResult};
use crate::types::timestamp::{format_timestamp, is_whole_minute};
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use tracing::debug;

/// The span of simulated time covered by a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SimulationWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl SimulationWindow {
    /// Create a window. Both bounds must be whole minutes and `end >= start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> SimulationResult<Self> {
        if !is_whole_minute(&start) || !is_whole_minute(&end) {
            return Err(SimulationError::invalid_window("window bounds must be whole minutes"));
        }
        if end < start {
            return Err(SimulationError::invalid_window(format!(
                "end ({}) is before start ({})",
                format_timestamp(&end),
                format_timestamp(&start)
            )));
        }
        Ok(Self { start, end })
    }

    /// First simulated minute
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// First minute after the run
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Number of minutes the run simulates
    pub fn minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Whether `time` is one of the simulated minutes
    pub fn contains(&self, time: NaiveDateTime) -> bool {
        self.start <= time && time < self.end
    }
}

/// Minute-by-minute clock over a [`SimulationWindow`]
#[derive(Debug, Clone)]
pub struct SimulationClock {
    window: SimulationWindow,
    now: NaiveDateTime,
}

impl SimulationClock {
    /// Length of one simulation step
    pub const STEP_MINUTES: i64 = 1;

    /// Create a clock positioned at the window start
    pub fn new(window: SimulationWindow) -> Self {
        Self { window, now: window.start() }
    }

    /// The minute about to be simulated
    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// The window this clock walks
    pub fn window(&self) -> SimulationWindow {
        self.window
    }

    /// Whether every minute of the window has been simulated
    pub fn is_finished(&self) -> bool {
        self.now >= self.window.end()
    }

    /// Minutes simulated so far
    pub fn minutes_elapsed(&self) -> i64 {
        (self.now - self.window.start()).num_minutes()
    }

    /// Move to the next minute
    pub fn advance(&mut self) {
        self.now += Duration::minutes(Self::STEP_MINUTES);
        debug!("Advanced simulation clock to {}", format_timestamp(&self.now));
    }
}
