//! Metro network model.
//!
//! Builds an immutable graph from a station/line snapshot: one node per
//! station, ride edges between consecutive stations of each line (weighted
//! by great-circle distance) and transfer edges between co-located
//! stations of different lines (weighted by a configurable penalty).

mod builder;
mod config;
mod error;
mod graph;
mod snapshot;

pub use config::NetworkConfig;
pub use error::{ConfigurationError, NetworkError};
pub use graph::{Edge, EdgeKind, MetroNetwork, NetworkStats, NodeIndex};
pub use snapshot::{NetworkSnapshot, RawLine, RawStation};
