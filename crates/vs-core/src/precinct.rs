//! Static precinct attributes.

use std::collections::BTreeSet;
use std::fmt;

use crate::PrecinctId;

/// One polling location, as read from the precinct file.
///
/// Immutable once loaded.  Per-trial simulation state lives in `vs-sim`'s
/// `Trial`, never here.
#[derive(Clone, Debug, PartialEq)]
pub struct Precinct {
    pub id: PrecinctId,
    pub name: String,
    /// Historical turnout fraction.
    pub turnout: f64,
    pub registered_voters: u32,
    /// Voters expected on election day.  Normalizes every statistic.
    pub expected_voters: u32,
    pub expected_per_hour: u32,
    /// Stations the precinct is planned to have; informational.
    pub stations_hint: u32,
    pub minority_pct: f64,
    /// Candidate station counts for which a wait histogram is reported.
    pub report_stations: BTreeSet<u32>,
}

impl Precinct {
    /// `true` if a histogram should be reported for `station_count`.
    #[inline]
    pub fn reports_histogram(&self, station_count: u32) -> bool {
        self.report_stations.contains(&station_count)
    }
}

impl fmt::Display for Precinct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:4} {:<25}{:8.2}{:8}{:8}{:8}{:3}{:8.2} HH ",
            self.id.0,
            self.name,
            self.turnout,
            self.registered_voters,
            self.expected_voters,
            self.expected_per_hour,
            self.stations_hint,
            self.minority_pct,
        )?;
        for s in &self.report_stations {
            write!(f, "{s:4}")?;
        }
        write!(f, " HH")
    }
}
