//! Enumeration types for the bike-share simulator
//!
//! This module contains the simulation modes, output formats and event kinds
//! shared by the configuration layer and the engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the engine advances the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SimulationMode {
    /// Drive ride transitions from a time-ordered event queue
    #[default]
    EventDriven,
    /// Rescan every ride each minute and compare its window to the clock
    Naive,
}

impl fmt::Display for SimulationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationMode::EventDriven => write!(f, "event-driven"),
            SimulationMode::Naive => write!(f, "naive"),
        }
    }
}

impl FromStr for SimulationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "event-driven" | "event_driven" | "eventdriven" | "events" | "fast" => {
                Ok(SimulationMode::EventDriven)
            }
            "naive" | "scan" => Ok(SimulationMode::Naive),
            _ => Err(format!("Unknown simulation mode: {}", s)),
        }
    }
}

/// Output format for the final report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text report
    #[default]
    Text,
    /// JSON document for downstream tooling
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "TEXT"),
            OutputFormat::Json => write!(f, "JSON"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Kind of ride transition scheduled in the event queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A bike leaves its start station
    RideStart,
    /// A bike arrives at its end station
    RideEnd,
}

impl EventKind {
    /// Position of this kind among transitions due in the same minute.
    ///
    /// Arrivals are applied before departures.
    pub fn rank(self) -> u8 {
        match self {
            EventKind::RideEnd => 0,
            EventKind::RideStart => 1,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::RideStart => write!(f, "Ride Start"),
            EventKind::RideEnd => write!(f, "Ride End"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_mode_from_str() {
        assert_eq!("naive".parse::<SimulationMode>().unwrap(), SimulationMode::Naive);
        assert_eq!("event-driven".parse::<SimulationMode>().unwrap(), SimulationMode::EventDriven);
        assert_eq!("Event_Driven".parse::<SimulationMode>().unwrap(), SimulationMode::EventDriven);
        assert!("sometimes".parse::<SimulationMode>().is_err());
    }

    #[test]
    fn test_simulation_mode_serde_uses_kebab_case() {
        let json = serde_json::to_string(&SimulationMode::EventDriven).unwrap();
        assert_eq!(json, "\"event-driven\"");
        let mode: SimulationMode = serde_json::from_str("\"naive\"").unwrap();
        assert_eq!(mode, SimulationMode::Naive);
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(format!("{}", OutputFormat::Json), "JSON");
    }

    #[test]
    fn test_event_kind_rank_puts_arrivals_first() {
        assert!(EventKind::RideEnd.rank() < EventKind::RideStart.rank());
        assert_eq!(format!("{}", EventKind::RideStart), "Ride Start");
    }
}
