//! The immutable metro graph and its read-only queries.

use std::collections::HashMap;

use crate::domain::{Line, LineCode, Station, StationId};

use super::error::NetworkError;

/// Dense index of a node in the network's adjacency table.
///
/// Indices are assigned in station insertion order and stay valid for the
/// lifetime of the network they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub(crate) usize);

/// What an edge represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Riding a train between consecutive stations of a line.
    Ride(LineCode),
    /// Walking between co-located stations of different lines.
    Transfer,
}

/// One direction of an undirected edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub to: NodeIndex,
    /// Search weight in kilometres (or km-equivalent for transfers).
    pub weight_km: f64,
    pub kind: EdgeKind,
}

impl Edge {
    pub fn is_transfer(&self) -> bool {
        matches!(self.kind, EdgeKind::Transfer)
    }
}

/// Summary figures for the built network.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkStats {
    pub station_count: usize,
    pub line_count: usize,
    /// Undirected edges of both kinds.
    pub edge_count: usize,
    pub ride_edge_count: usize,
    pub transfer_edge_count: usize,
    /// Sum of ride edge lengths (km).
    pub total_track_km: f64,
    /// Station count per line, in line order.
    pub stations_per_line: Vec<(LineCode, usize)>,
}

/// The metro network graph.
///
/// Built once by [`MetroNetwork::build`] and never mutated afterwards. All
/// methods take `&self`, so one instance can be shared (e.g. behind an
/// `Arc`) by any number of concurrent callers.
#[derive(Debug, Clone)]
pub struct MetroNetwork {
    pub(super) stations: Vec<Station>,
    pub(super) index: HashMap<StationId, NodeIndex>,
    pub(super) adjacency: Vec<Vec<Edge>>,
    /// Lines each node is a member of.
    pub(super) memberships: Vec<Vec<LineCode>>,
    pub(super) lines: Vec<Line>,
}

impl MetroNetwork {
    /// Look up a station by id.
    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.node_index(id).map(|idx| self.node(idx))
    }

    /// Look up a station by id, failing with [`NetworkError::NotFound`].
    pub fn find_station(&self, id: StationId) -> Result<&Station, NetworkError> {
        self.station(id).ok_or(NetworkError::NotFound(id))
    }

    /// Returns true if a station with this id exists.
    pub fn contains(&self, id: StationId) -> bool {
        self.index.contains_key(&id)
    }

    /// Search stations by name.
    ///
    /// Matching is case-insensitive. Exact name matches come first, then
    /// names starting with the query, then names containing it. Within each
    /// group stations keep network order. A blank query matches nothing.
    pub fn search_stations(&self, query: &str) -> Vec<&Station> {
        let needle = query.trim().to_uppercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<(u8, &Station)> = self
            .stations
            .iter()
            .filter_map(|station| {
                let name = station.name.to_uppercase();
                if name == needle {
                    Some((0, station))
                } else if name.starts_with(&needle) {
                    Some((1, station))
                } else if name.contains(&needle) {
                    Some((2, station))
                } else {
                    None
                }
            })
            .collect();

        // Stable sort keeps network order within a rank.
        ranked.sort_by_key(|(rank, _)| *rank);
        ranked.into_iter().map(|(_, station)| station).collect()
    }

    /// All lines, in snapshot order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// All stations grouped by line, each group in track order.
    pub fn stations_by_line(&self) -> Vec<(&Line, Vec<&Station>)> {
        self.lines
            .iter()
            .map(|line| {
                let stations = line
                    .stations
                    .iter()
                    .filter_map(|id| self.station(*id))
                    .collect();
                (line, stations)
            })
            .collect()
    }

    /// Iterate over every station node, in insertion order.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    /// Lines a station belongs to. Empty if the station is unknown.
    pub fn lines_of(&self, id: StationId) -> &[LineCode] {
        self.node_index(id)
            .map(|idx| self.memberships[idx.0].as_slice())
            .unwrap_or(&[])
    }

    /// Neighbouring stations with the edge leading to each.
    pub fn neighbours(&self, id: StationId) -> Vec<(&Station, &Edge)> {
        self.node_index(id)
            .map(|idx| {
                self.edges(idx)
                    .iter()
                    .map(|edge| (self.node(edge.to), edge))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The lightest edge from `from` to `to`, if they are adjacent.
    pub fn edge_between(&self, from: StationId, to: StationId) -> Option<&Edge> {
        let from = self.node_index(from)?;
        let to = self.node_index(to)?;
        self.edge_between_nodes(from, to)
    }

    /// Network statistics.
    pub fn stats(&self) -> NetworkStats {
        let mut ride_edge_count = 0;
        let mut transfer_edge_count = 0;
        let mut total_track_km = 0.0;

        // Each undirected edge is stored twice; count it from its lower end.
        for (from, edges) in self.adjacency.iter().enumerate() {
            for edge in edges.iter().filter(|e| e.to.0 > from) {
                match edge.kind {
                    EdgeKind::Ride(_) => {
                        ride_edge_count += 1;
                        total_track_km += edge.weight_km;
                    }
                    EdgeKind::Transfer => transfer_edge_count += 1,
                }
            }
        }

        NetworkStats {
            station_count: self.stations.len(),
            line_count: self.lines.len(),
            edge_count: ride_edge_count + transfer_edge_count,
            ride_edge_count,
            transfer_edge_count,
            total_track_km,
            stations_per_line: self.lines.iter().map(|l| (l.code, l.len())).collect(),
        }
    }

    /// Number of station nodes.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Returns true if the network has no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub(crate) fn node_index(&self, id: StationId) -> Option<NodeIndex> {
        self.index.get(&id).copied()
    }

    pub(crate) fn node(&self, idx: NodeIndex) -> &Station {
        &self.stations[idx.0]
    }

    pub(crate) fn edges(&self, idx: NodeIndex) -> &[Edge] {
        &self.adjacency[idx.0]
    }

    pub(crate) fn edge_between_nodes(&self, from: NodeIndex, to: NodeIndex) -> Option<&Edge> {
        self.edges(from)
            .iter()
            .filter(|edge| edge.to == to)
            .min_by(|a, b| a.weight_km.total_cmp(&b.weight_km))
    }
}
