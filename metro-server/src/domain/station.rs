//! Station identity and records.

use std::fmt;

use super::{Coordinates, LineCode};

/// Upstream identifier of a station record.
///
/// Identifiers are assigned by the transit authority feed and are unique
/// per platform record. Some interchanges re-use one id across lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(pub i64);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for StationId {
    fn from(id: i64) -> Self {
        StationId(id)
    }
}

/// A validated station node in the metro network.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub coordinates: Coordinates,
    /// The line this record was listed under.
    pub line: LineCode,
    /// Position reported by the feed within its line.
    pub order: u32,
}

impl Station {
    /// Great-circle distance to another station, in kilometres.
    pub fn distance_km(&self, other: &Station) -> f64 {
        self.coordinates.distance_km(&other.coordinates)
    }
}
