//! Network construction from a raw snapshot.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::domain::{Coordinates, Line, LineCode, LineColor, Station, StationId};

use super::config::NetworkConfig;
use super::error::ConfigurationError;
use super::graph::{Edge, EdgeKind, MetroNetwork, NodeIndex};
use super::snapshot::{NetworkSnapshot, RawLine, RawStation};

impl MetroNetwork {
    /// Build the network graph from a snapshot.
    ///
    /// Every station record is validated, every line sequence is checked
    /// against the station set, consecutive stations on a line are joined by
    /// ride edges, and co-located stations on different lines are joined by
    /// transfer edges. The first validation failure aborts the build.
    ///
    /// Records that re-use an existing id describe the same node: the first
    /// record wins.
    pub fn build(
        snapshot: &NetworkSnapshot,
        config: &NetworkConfig,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;

        let mut builder = Builder::new(config);
        for raw in &snapshot.stations {
            builder.add_station(raw)?;
        }
        for raw in &snapshot.lines {
            builder.add_line(raw)?;
        }
        builder.link_interchanges();

        let network = builder.finish();
        let stats = network.stats();
        info!(
            stations = stats.station_count,
            lines = stats.line_count,
            ride_edges = stats.ride_edge_count,
            transfer_edges = stats.transfer_edge_count,
            track_km = format_args!("{:.1}", stats.total_track_km),
            "built metro network"
        );
        Ok(network)
    }
}

/// Mutable construction state. Never escapes `MetroNetwork::build`.
struct Builder<'a> {
    config: &'a NetworkConfig,
    stations: Vec<Station>,
    index: HashMap<StationId, NodeIndex>,
    adjacency: Vec<Vec<Edge>>,
    memberships: Vec<Vec<LineCode>>,
    lines: Vec<Line>,
}

impl<'a> Builder<'a> {
    fn new(config: &'a NetworkConfig) -> Self {
        Self {
            config,
            stations: Vec::new(),
            index: HashMap::new(),
            adjacency: Vec::new(),
            memberships: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// Validate a station record and add it as a node.
    fn add_station(&mut self, raw: &RawStation) -> Result<(), ConfigurationError> {
        let id = StationId(raw.id);
        let coordinates = Coordinates::parse(&raw.latitude, &raw.longitude).map_err(|source| {
            ConfigurationError::InvalidCoordinates {
                station: id,
                name: raw.name.clone(),
                source,
            }
        })?;
        let line = LineCode::parse_normalized(&raw.line).map_err(|source| {
            ConfigurationError::InvalidLineCode {
                line: raw.line.clone(),
                source,
            }
        })?;

        if let Some(&existing) = self.index.get(&id) {
            let kept = &self.stations[existing.0];
            let drift_km = kept.coordinates.distance_km(&coordinates);
            if drift_km > self.config.interchange_radius_km {
                warn!(
                    station = %id,
                    kept = %kept.name,
                    ignored = %raw.name,
                    drift_km = format_args!("{drift_km:.3}"),
                    "station id re-used at a different position, keeping first record"
                );
            } else {
                debug!(station = %id, line = %line, "station id shared between lines");
            }
            return Ok(());
        }

        let idx = NodeIndex(self.stations.len());
        self.index.insert(id, idx);
        self.stations.push(Station {
            id,
            name: raw.name.trim().to_string(),
            coordinates,
            line,
            order: raw.order,
        });
        self.adjacency.push(Vec::new());
        self.memberships.push(Vec::new());
        Ok(())
    }

    /// Validate a line record and add ride edges along it.
    fn add_line(&mut self, raw: &RawLine) -> Result<(), ConfigurationError> {
        let code = LineCode::parse_normalized(&raw.code).map_err(|source| {
            ConfigurationError::InvalidLineCode {
                line: raw.code.clone(),
                source,
            }
        })?;
        let color = LineColor::parse(raw.color.trim()).map_err(|source| {
            ConfigurationError::InvalidLineColor {
                line: code,
                color: raw.color.clone(),
                source,
            }
        })?;
        if self.lines.iter().any(|line| line.code == code) {
            return Err(ConfigurationError::DuplicateLine(code));
        }

        let mut nodes = Vec::with_capacity(raw.station_ids.len());
        for &id in &raw.station_ids {
            let station = StationId(id);
            let idx = self
                .index
                .get(&station)
                .copied()
                .ok_or(ConfigurationError::UnknownStation {
                    line: code,
                    station,
                })?;
            nodes.push(idx);
        }

        for &idx in &nodes {
            let lines = &mut self.memberships[idx.0];
            if !lines.contains(&code) {
                lines.push(code);
            }
        }

        for pair in nodes.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a == b {
                debug!(line = %code, station = %self.stations[a.0].id, "skipping repeated station");
                continue;
            }
            let distance = self.stations[a.0].distance_km(&self.stations[b.0]);
            self.connect(a, b, distance, EdgeKind::Ride(code));
        }

        self.lines.push(Line {
            code,
            color,
            stations: raw.station_ids.iter().map(|&id| StationId(id)).collect(),
        });
        Ok(())
    }

    /// Join co-located stations that share no line with transfer edges.
    fn link_interchanges(&mut self) {
        let radius = self.config.interchange_radius_km;
        let weight = self.config.transfer_weight_km;

        let mut pairs = Vec::new();
        for i in 0..self.stations.len() {
            for j in (i + 1)..self.stations.len() {
                let (a, b) = (NodeIndex(i), NodeIndex(j));
                if self.share_line(a, b) || self.adjacent(a, b) {
                    continue;
                }
                if self.stations[i].distance_km(&self.stations[j]) <= radius {
                    pairs.push((a, b));
                }
            }
        }

        for (a, b) in pairs {
            debug!(
                from = %self.stations[a.0].id,
                to = %self.stations[b.0].id,
                name = %self.stations[a.0].name,
                "linking interchange"
            );
            self.connect(a, b, weight, EdgeKind::Transfer);
        }
    }

    fn share_line(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.memberships[a.0]
            .iter()
            .any(|l| self.memberships[b.0].contains(l))
    }

    fn adjacent(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.adjacency[a.0].iter().any(|edge| edge.to == b)
    }

    /// Insert an undirected edge unless an identical one already exists.
    fn connect(&mut self, a: NodeIndex, b: NodeIndex, weight_km: f64, kind: EdgeKind) {
        let exists = self.adjacency[a.0]
            .iter()
            .any(|edge| edge.to == b && edge.kind == kind);
        if exists {
            return;
        }
        self.adjacency[a.0].push(Edge {
            to: b,
            weight_km,
            kind,
        });
        self.adjacency[b.0].push(Edge {
            to: a,
            weight_km,
            kind,
        });
    }

    fn finish(self) -> MetroNetwork {
        MetroNetwork {
            stations: self.stations,
            index: self.index,
            adjacency: self.adjacency,
            memberships: self.memberships,
            lines: self.lines,
        }
    }
}
