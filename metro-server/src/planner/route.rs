//! Itinerary types and their assembly from a raw station path.

use crate::domain::{LineCode, Station, StationId};
use crate::network::{Edge, EdgeKind, MetroNetwork, NodeIndex};

use super::config::PlannerConfig;

/// One hop between consecutive stations of a route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSegment {
    /// Line ridden for this hop. For a transfer, the line being entered.
    pub line: LineCode,
    pub from_id: StationId,
    pub from_name: String,
    pub to_id: StationId,
    pub to_name: String,
    /// Great-circle distance between the two stations (km).
    pub distance_km: f64,
    pub time_minutes: f64,
    /// True if this hop is an interchange walk rather than a ride.
    pub transfer: bool,
}

/// A computed route between two stations.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    /// Station ids in travel order, source first and target last.
    pub path: Vec<StationId>,
    /// Full station records, parallel to `path`.
    pub stations: Vec<Station>,
    /// One entry per consecutive pair in `path`.
    pub segments: Vec<RouteSegment>,
    pub total_distance_km: f64,
    pub total_time_minutes: f64,
    /// Number of stations on the path.
    pub station_count: usize,
}

impl RouteResult {
    /// Route that starts and ends at the same station.
    pub fn trivial(station: &Station) -> Self {
        Self {
            path: vec![station.id],
            stations: vec![station.clone()],
            segments: Vec::new(),
            total_distance_km: 0.0,
            total_time_minutes: 0.0,
            station_count: 1,
        }
    }

    /// First station of the route.
    pub fn source(&self) -> StationId {
        self.path[0]
    }

    /// Last station of the route.
    pub fn target(&self) -> StationId {
        self.path[self.path.len() - 1]
    }

    /// Number of interchange hops.
    pub fn transfer_count(&self) -> usize {
        self.segments.iter().filter(|s| s.transfer).count()
    }

    /// Lines used, in travel order, without consecutive repeats.
    pub fn lines_used(&self) -> Vec<LineCode> {
        let mut lines: Vec<LineCode> = Vec::new();
        for segment in self.segments.iter().filter(|s| !s.transfer) {
            if lines.last() != Some(&segment.line) {
                lines.push(segment.line);
            }
        }
        lines
    }
}

/// Turn a node path and the edges between its nodes into a [`RouteResult`].
///
/// `edges[i]` must lead from `nodes[i]` to `nodes[i + 1]`.
pub(super) fn assemble(
    network: &MetroNetwork,
    config: &PlannerConfig,
    nodes: &[NodeIndex],
    edges: &[&Edge],
) -> RouteResult {
    let stations: Vec<Station> = nodes.iter().map(|&n| network.node(n).clone()).collect();

    let segments: Vec<RouteSegment> = edges
        .iter()
        .enumerate()
        .map(|(i, edge)| {
            let from = &stations[i];
            let to = &stations[i + 1];
            let (line, distance_km) = match edge.kind {
                EdgeKind::Ride(line) => (line, edge.weight_km),
                EdgeKind::Transfer => (entered_line(edges, i, to), from.distance_km(to)),
            };
            RouteSegment {
                line,
                from_id: from.id,
                from_name: from.name.clone(),
                to_id: to.id,
                to_name: to.name.clone(),
                distance_km,
                time_minutes: config.segment_minutes(distance_km),
                transfer: edge.is_transfer(),
            }
        })
        .collect();

    let total_distance_km = segments.iter().map(|s| s.distance_km).sum();
    let total_time_minutes = segments.iter().map(|s| s.time_minutes).sum();

    RouteResult {
        path: stations.iter().map(|s| s.id).collect(),
        station_count: stations.len(),
        stations,
        segments,
        total_distance_km,
        total_time_minutes,
    }
}

/// Line entered by the transfer at `edges[i]`: the next ride's line, or
/// the arrival station's own line if no ride follows.
fn entered_line(edges: &[&Edge], i: usize, to: &Station) -> LineCode {
    match edges.get(i + 1).map(|e| e.kind) {
        Some(EdgeKind::Ride(line)) => line,
        _ => to.line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinates;

    fn station(id: i64, line: &str) -> Station {
        Station {
            id: StationId(id),
            name: format!("S{id}"),
            coordinates: Coordinates::new(41.0, 29.0).unwrap(),
            line: LineCode::parse(line).unwrap(),
            order: 1,
        }
    }

    fn segment(line: &str, transfer: bool) -> RouteSegment {
        RouteSegment {
            line: LineCode::parse(line).unwrap(),
            from_id: StationId(1),
            from_name: "A".into(),
            to_id: StationId(2),
            to_name: "B".into(),
            distance_km: 1.0,
            time_minutes: 2.5,
            transfer,
        }
    }

    #[test]
    fn trivial_route() {
        let route = RouteResult::trivial(&station(5, "M2"));
        assert_eq!(route.path, vec![StationId(5)]);
        assert_eq!(route.stations.len(), 1);
        assert!(route.segments.is_empty());
        assert_eq!(route.total_distance_km, 0.0);
        assert_eq!(route.total_time_minutes, 0.0);
        assert_eq!(route.station_count, 1);
        assert_eq!(route.source(), route.target());
    }

    #[test]
    fn lines_used_and_transfers() {
        let mut route = RouteResult::trivial(&station(1, "M1"));
        route.segments = vec![
            segment("M1", false),
            segment("M1", false),
            segment("M2", true),
            segment("M2", false),
            segment("T1", true),
            segment("T1", false),
        ];

        assert_eq!(route.transfer_count(), 2);
        let lines: Vec<_> = route.lines_used().iter().map(|l| l.to_string()).collect();
        assert_eq!(lines, vec!["M1", "M2", "T1"]);
    }
}
