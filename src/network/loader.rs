//! Station and ride data loaders
//!
//! Stations come from a JSON document, rides from a header-less CSV file.
//! File-level failures are errors; individual bad rows are skipped and logged.
//! Stations must be loaded first because rides are checked against them.

use crate::network::{Coordinate, Ride, Station, StationRegistry};
use crate::types::parse_timestamp;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that stop a data file from being loaded at all
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The file could not be opened or read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The station document is not valid JSON of the expected shape
    #[error("Station data error: {0}")]
    Json(#[from] serde_json::Error),

    /// The ride file could not be read as CSV
    #[error("Ride data error: {0}")]
    Csv(#[from] csv::Error),
}

/// Station document: `{"stations": [...]}`
#[derive(Debug, Deserialize)]
struct StationDocument {
    stations: Vec<StationRecord>,
}

/// One station entry. Every value may be written as a string or a number.
#[derive(Debug, Deserialize)]
struct StationRecord {
    /// Station id
    n: FieldValue,
    /// Station name
    s: FieldValue,
    /// Latitude
    la: FieldValue,
    /// Longitude
    lo: FieldValue,
    /// Docks available
    da: FieldValue,
    /// Bikes available
    ba: FieldValue,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FieldValue {
    Text(String),
    Number(serde_json::Number),
}

impl FieldValue {
    fn text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.trim().to_string(),
            FieldValue::Number(n) => n.to_string(),
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Text(s) => s.trim().parse().ok(),
            FieldValue::Number(n) => n.as_f64(),
        }
    }

    fn as_u32(&self) -> Option<u32> {
        match self {
            FieldValue::Text(s) => s.trim().parse().ok(),
            // Whole-valued floats such as 15.0 count as integers
            FieldValue::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|v| *v >= 0.0 && v.fract() == 0.0).map(|v| v as u64))
                .and_then(|v| u32::try_from(v).ok()),
        }
    }
}

impl StationRecord {
    fn into_station(self) -> Option<Station> {
        let longitude = self.lo.as_f64()?;
        let latitude = self.la.as_f64()?;
        let docks = self.da.as_u32()?;
        let bikes = self.ba.as_u32()?;
        let capacity = docks.checked_add(bikes)?;

        Station::new(self.n.text(), self.s.text(), Coordinate::new(longitude, latitude), capacity, bikes)
            .ok()
    }
}

/// Load stations from a JSON file
pub fn load_stations<P: AsRef<Path>>(path: P) -> Result<StationRegistry, LoaderError> {
    let file = File::open(path.as_ref())?;
    load_stations_from_reader(BufReader::new(file))
}

/// Load stations from any JSON source.
///
/// Capacity is docks available plus bikes available and the station starts
/// with the bikes available. Entries with unparseable numbers or a repeated
/// id are skipped.
pub fn load_stations_from_reader<R: Read>(reader: R) -> Result<StationRegistry, LoaderError> {
    let document: StationDocument = serde_json::from_reader(reader)?;
    let mut registry = StationRegistry::new();
    let mut skipped = 0usize;

    for record in document.stations {
        let id = record.n.text();
        match record.into_station() {
            Some(station) => {
                if let Err(e) = registry.add_station(station) {
                    warn!("Skipping station entry: {}", e);
                    skipped += 1;
                }
            }
            None => {
                warn!("Skipping malformed station entry '{}'", id);
                skipped += 1;
            }
        }
    }

    info!("Loaded {} stations ({} entries skipped)", registry.len(), skipped);
    Ok(registry)
}

/// Load rides from a CSV file, keeping only rides between known stations
pub fn load_rides<P: AsRef<Path>>(path: P, stations: &StationRegistry) -> Result<Vec<Ride>, LoaderError> {
    let file = File::open(path.as_ref())?;
    load_rides_from_reader(BufReader::new(file), stations)
}

/// Load rides from any CSV source.
///
/// Columns: start time, start station id, end time, end station id. Rows that
/// are short, carry bad timestamps, name an unknown station, or do not end
/// after they start are dropped.
pub fn load_rides_from_reader<R: Read>(
    reader: R,
    stations: &StationRegistry,
) -> Result<Vec<Ride>, LoaderError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rides = Vec::new();
    let mut dropped = 0usize;

    for (line, result) in csv_reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!("Skipping unreadable ride row {}: {}", line + 1, e);
                dropped += 1;
                continue;
            }
        };

        let (Some(start_raw), Some(start_id), Some(end_raw), Some(end_id)) =
            (record.get(0), record.get(1), record.get(2), record.get(3))
        else {
            debug!("Skipping short ride row {}", line + 1);
            dropped += 1;
            continue;
        };

        if !stations.contains(start_id) || !stations.contains(end_id) {
            debug!("Skipping ride row {}: unknown station {} or {}", line + 1, start_id, end_id);
            dropped += 1;
            continue;
        }

        let (Ok(start_time), Ok(end_time)) = (parse_timestamp(start_raw), parse_timestamp(end_raw))
        else {
            debug!("Skipping ride row {}: bad timestamp", line + 1);
            dropped += 1;
            continue;
        };

        match Ride::new(start_id, end_id, start_time, end_time) {
            Ok(ride) => rides.push(ride),
            Err(e) => {
                debug!("Skipping ride row {}: {}", line + 1, e);
                dropped += 1;
            }
        }
    }

    info!("Loaded {} rides ({} rows dropped)", rides.len(), dropped);
    Ok(rides)
}
