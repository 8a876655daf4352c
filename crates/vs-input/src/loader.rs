//! Configuration and precinct loaders.
//!
//! # Configuration JSON
//!
//! ```json
//! {
//!   "seed": 42,
//!   "election_day_hours": 13,
//!   "time_to_vote_mean_secs": 300,
//!   "min_expected_voters": 100,
//!   "max_expected_voters": 5000,
//!   "wait_minutes_too_long": 30,
//!   "iterations": 100,
//!   "arrival_zero_pct": 9.0,
//!   "arrival_pct_by_hour": [12.0, 9.0, 8.0, 7.0, 7.0, 7.0, 7.0, 7.0, 7.0, 7.0, 8.0, 5.0, 0.0]
//! }
//! ```
//!
//! # Service times CSV
//!
//! ```csv
//! seconds
//! 212
//! 245
//! 301
//! ```
//!
//! # Precincts CSV
//!
//! ```csv
//! number,name,turnout,registered_voters,expected_voters,expected_per_hour,stations,minority_pct,report_stations
//! 101,Ward_1,0.62,2400,1488,114,6,31.20,5;6;7
//! ```
//!
//! **`report_stations`** is a `;`-separated list of station counts (may be
//! empty).  Duplicates collapse; order does not matter.

use std::collections::{BTreeSet, HashSet};
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use vs_core::{ElectionConfig, Precinct, PrecinctId};

use crate::{InputError, InputResult};

// ── Records ───────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ConfigRecord {
    seed:                   u64,
    election_day_hours:     u32,
    time_to_vote_mean_secs: u32,
    min_expected_voters:    u32,
    max_expected_voters:    u32,
    wait_minutes_too_long:  u32,
    iterations:             u32,
    arrival_zero_pct:       f64,
    arrival_pct_by_hour:    Vec<f64>,
}

#[derive(Deserialize)]
struct ServiceTimeRecord {
    seconds: u32,
}

#[derive(Deserialize)]
struct PrecinctRecord {
    number:            u32,
    name:              String,
    turnout:           f64,
    registered_voters: u32,
    expected_voters:   u32,
    expected_per_hour: u32,
    stations:          u32,
    minority_pct:      f64,
    report_stations:   String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and validate the election configuration from a JSON file plus a
/// service-times CSV file.
pub fn load_election(config_path: &Path, service_times_path: &Path) -> InputResult<ElectionConfig> {
    let service_times = load_service_times_csv(service_times_path)?;
    load_config_json(config_path, service_times)
}

/// Load and validate the configuration JSON at `path`, attaching an
/// already-loaded service time table.
pub fn load_config_json(path: &Path, service_times_secs: Vec<u32>) -> InputResult<ElectionConfig> {
    let file = std::fs::File::open(path)?;
    load_config_reader(file, service_times_secs)
}

/// Like [`load_config_json`] but reads from any `Read` source.
pub fn load_config_reader<R: Read>(reader: R, service_times_secs: Vec<u32>) -> InputResult<ElectionConfig> {
    let rec: ConfigRecord = serde_json::from_reader(reader)?;
    let config = ElectionConfig {
        seed:                rec.seed,
        day_length_hours:    rec.election_day_hours,
        mean_service_secs:   rec.time_to_vote_mean_secs,
        min_expected_voters: rec.min_expected_voters,
        max_expected_voters: rec.max_expected_voters,
        too_long_minutes:    rec.wait_minutes_too_long,
        iterations:          rec.iterations,
        arrival_zero_pct:    rec.arrival_zero_pct,
        arrival_pct_by_hour: rec.arrival_pct_by_hour,
        service_times_secs,
    };
    config.validate()?;
    Ok(config)
}

/// Read the observed service durations (seconds) from a CSV file.
pub fn load_service_times_csv(path: &Path) -> InputResult<Vec<u32>> {
    let file = std::fs::File::open(path)?;
    load_service_times_reader(file)
}

/// Read the observed service durations (seconds), in file order.
pub fn load_service_times_reader<R: Read>(reader: R) -> InputResult<Vec<u32>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    csv_reader
        .deserialize::<ServiceTimeRecord>()
        .map(|row| -> InputResult<u32> { Ok(row?.seconds) })
        .collect()
}

/// Load all precincts from a CSV file, in file order.
pub fn load_precincts_csv(path: &Path) -> InputResult<Vec<Precinct>> {
    let file = std::fs::File::open(path)?;
    load_precincts_reader(file)
}

/// Like [`load_precincts_csv`] but accepts any `Read` source.
///
/// Fails on a duplicate precinct number.
pub fn load_precincts_reader<R: Read>(reader: R) -> InputResult<Vec<Precinct>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut seen = HashSet::new();
    let mut precincts = Vec::new();

    for result in csv_reader.deserialize::<PrecinctRecord>() {
        let row = result?;
        if !seen.insert(row.number) {
            return Err(InputError::Parse(format!("duplicate precinct number {}", row.number)));
        }
        precincts.push(Precinct {
            id:                PrecinctId(row.number),
            report_stations:   parse_report_stations(&row.report_stations)?,
            name:              row.name,
            turnout:           row.turnout,
            registered_voters: row.registered_voters,
            expected_voters:   row.expected_voters,
            expected_per_hour: row.expected_per_hour,
            stations_hint:     row.stations,
            minority_pct:      row.minority_pct,
        });
    }

    Ok(precincts)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_report_stations(s: &str) -> InputResult<BTreeSet<u32>> {
    s.split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u32>().map_err(|_| {
                InputError::Parse(format!(
                    "invalid report station count {part:?}: expected a non-negative integer"
                ))
            })
        })
        .collect()
}
