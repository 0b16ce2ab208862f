//! Identifier types for the bike-share simulator
//!
//! Stations are keyed by the identifier string found in the station data,
//! rides by their position in the ride list handed to the engine, and each
//! simulation run gets a UUID-based id used to correlate its log output.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use uuid::Uuid;

/// Identifier of a station, as it appears in the station and ride data files
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    /// Create a station id from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for StationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for StationId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Index of a ride within the ride list owned by a simulation engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RideId(pub usize);

impl RideId {
    /// Position of the ride in the engine's ride list
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RIDE_{}", self.0)
    }
}

/// Unique identifier for one simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Create a new random run ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RUN_{}", self.0.simple())
    }
}

impl Serialize for RunId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("RUN_{}", self.0.simple()))
    }
}

impl<'de> Deserialize<'de> for RunId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let raw = s.strip_prefix("RUN_").unwrap_or(&s);
        let uuid = Uuid::parse_str(raw).map_err(serde::de::Error::custom)?;
        Ok(RunId(uuid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_id_ordering_is_lexicographic() {
        let a = StationId::from("6001");
        let b = StationId::from("6010");
        let c = StationId::from("7000");

        assert!(a < b);
        assert!(b < c);
        assert_eq!(a.as_str(), "6001");
        assert_eq!(a.to_string(), "6001");
    }

    #[test]
    fn test_station_id_serializes_as_plain_string() {
        let id = StationId::new("7012");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"7012\"");

        let back: StationId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_ride_id_display() {
        assert_eq!(RideId(42).to_string(), "RIDE_42");
        assert_eq!(RideId(3).index(), 3);
    }

    #[test]
    fn test_run_id_uniqueness_and_format() {
        let first = RunId::new();
        let second = RunId::new();

        assert_ne!(first, second);
        assert!(first.to_string().starts_with("RUN_"));
    }

    #[test]
    fn test_run_id_serialization() {
        let id = RunId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert!(json.contains("RUN_"));

        let back: RunId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        // Raw UUIDs are accepted as well
        let raw = format!("\"{}\"", id.0);
        let back: RunId = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, id);
    }
}
