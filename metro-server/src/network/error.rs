//! Network model error types.

use crate::domain::{InvalidCoordinates, InvalidLineCode, InvalidLineColor, LineCode, StationId};

/// Fatal errors raised while building the network.
///
/// Any of these aborts construction; no partial graph is produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    /// A station record has missing or malformed coordinates
    #[error("station {station} ({name}) has invalid coordinates: {source}")]
    InvalidCoordinates {
        station: StationId,
        name: String,
        source: InvalidCoordinates,
    },

    /// A line label could not be parsed
    #[error("line {line:?}: {source}")]
    InvalidLineCode {
        line: String,
        source: InvalidLineCode,
    },

    /// A line color could not be parsed
    #[error("line {line} has color {color:?}: {source}")]
    InvalidLineColor {
        line: LineCode,
        color: String,
        source: InvalidLineColor,
    },

    /// Two line records share a code
    #[error("line {0} is defined more than once")]
    DuplicateLine(LineCode),

    /// A line sequence mentions a station absent from the station set
    #[error("line {line} references unknown station {station}")]
    UnknownStation { line: LineCode, station: StationId },

    /// Edge weight parameters are unusable
    #[error("invalid network config: {0}")]
    InvalidConfig(&'static str),
}

/// Per-request lookup errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    #[error("station {0} not found")]
    NotFound(StationId),
}
