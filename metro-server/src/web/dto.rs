//! Data transfer objects for web requests and responses.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::{LineCode, Station};
use crate::network::{MetroNetwork, NetworkStats};
use crate::planner::{RouteResult, RouteSegment};

/// Round to a fixed number of decimal places for display.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Success envelope wrapping every API payload.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: &'static str,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success",
            data,
            count: None,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "healthy",
            service: "Istanbul Metro API",
        }
    }
}

/// A station in API responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationDto {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Line the station is listed under in this context
    pub line: String,
    /// Every line serving the station
    pub lines: Vec<String>,
    pub order: u32,
}

impl StationDto {
    /// Describe a station under its own (first listed) line.
    pub fn from_station(network: &MetroNetwork, station: &Station) -> Self {
        Self::on_line(network, station, &station.line)
    }

    /// Describe a station as a member of `line`.
    pub fn on_line(network: &MetroNetwork, station: &Station, line: &LineCode) -> Self {
        Self {
            id: station.id.0,
            name: station.name.clone(),
            latitude: station.coordinates.latitude(),
            longitude: station.coordinates.longitude(),
            line: line.to_string(),
            lines: network
                .lines_of(station.id)
                .iter()
                .map(|l| l.to_string())
                .collect(),
            order: station.order,
        }
    }
}

/// All stations, keyed by line code in network order.
pub fn stations_by_line(network: &MetroNetwork) -> IndexMap<String, Vec<StationDto>> {
    network
        .stations_by_line()
        .into_iter()
        .map(|(line, stations)| {
            let dtos = stations
                .into_iter()
                .map(|s| StationDto::on_line(network, s, &line.code))
                .collect();
            (line.code.to_string(), dtos)
        })
        .collect()
}

/// Line code to display color, in network order.
pub fn line_colors(network: &MetroNetwork) -> IndexMap<String, String> {
    network
        .lines()
        .iter()
        .map(|line| (line.code.to_string(), line.color.to_string()))
        .collect()
}

/// Query string for station search.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,

    /// Maximum number of results (all by default)
    pub limit: Option<usize>,
}

/// Request to compute a route.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub source_id: i64,
    pub target_id: i64,
}

/// One hop of a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteDetail {
    pub from_id: i64,
    pub from_name: String,
    pub to_id: i64,
    pub to_name: String,
    pub line: String,
    /// Kilometres, two decimals
    pub distance: f64,
    /// Minutes, one decimal
    pub time: f64,
    pub transfer: bool,
}

impl From<&RouteSegment> for RouteDetail {
    fn from(segment: &RouteSegment) -> Self {
        Self {
            from_id: segment.from_id.0,
            from_name: segment.from_name.clone(),
            to_id: segment.to_id.0,
            to_name: segment.to_name.clone(),
            line: segment.line.to_string(),
            distance: round_to(segment.distance_km, 2),
            time: round_to(segment.time_minutes, 1),
            transfer: segment.transfer,
        }
    }
}

/// A computed route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResponse {
    pub path: Vec<i64>,
    pub stations: Vec<StationDto>,
    pub route_details: Vec<RouteDetail>,
    /// Kilometres, two decimals
    pub total_distance: f64,
    /// Minutes, one decimal
    pub total_time: f64,
    pub num_stations: usize,
    pub transfers: usize,
    pub lines_used: Vec<String>,
}

impl RouteResponse {
    /// Each station is labelled with the line the route arrives on; the
    /// source takes the line of the first hop.
    pub fn from_route(network: &MetroNetwork, route: &RouteResult) -> Self {
        Self {
            path: route.path.iter().map(|id| id.0).collect(),
            stations: route
                .stations
                .iter()
                .enumerate()
                .map(|(i, station)| {
                    let line = route
                        .segments
                        .get(i.saturating_sub(1))
                        .map_or(&station.line, |segment| &segment.line);
                    StationDto::on_line(network, station, line)
                })
                .collect(),
            route_details: route.segments.iter().map(RouteDetail::from).collect(),
            total_distance: round_to(route.total_distance_km, 2),
            total_time: round_to(route.total_time_minutes, 1),
            num_stations: route.station_count,
            transfers: route.transfer_count(),
            lines_used: route.lines_used().iter().map(|l| l.to_string()).collect(),
        }
    }
}

/// Network statistics.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_lines: usize,
    /// Distinct station nodes; interchanges sharing an id count once
    pub total_stations: usize,
    /// Stations listed per line
    pub lines: IndexMap<String, usize>,
    pub total_connections: usize,
    pub transfer_connections: usize,
    /// Kilometres of ridden track, two decimals
    pub total_track_km: f64,
    /// Routes currently held in the route cache
    pub cached_routes: u64,
}

impl StatsResponse {
    pub fn new(stats: NetworkStats, cached_routes: u64) -> Self {
        Self {
            total_lines: stats.line_count,
            total_stations: stats.station_count,
            lines: stats
                .stations_per_line
                .iter()
                .map(|(code, n)| (code.to_string(), *n))
                .collect(),
            total_connections: stats.edge_count,
            transfer_connections: stats.transfer_edge_count,
            total_track_km: round_to(stats.total_track_km, 2),
            cached_routes,
        }
    }
}

/// Error response body, `{"detail": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationId;
    use crate::network::{NetworkConfig, NetworkSnapshot, RawStation};
    use crate::planner::{Planner, PlannerConfig};

    fn network() -> MetroNetwork {
        let m1 = vec![
            RawStation::new(1, "ALPHA", "41.0000", "29.0000", "M1", 1),
            RawStation::new(2, "BETA", "41.0100", "29.0000", "M1", 2),
            RawStation::new(3, "GAMMA", "41.0200", "29.0000", "M1", 3),
        ];
        let t1 = vec![
            RawStation::new(2, "BETA", "41.0100", "29.0000", "T1", 1),
            RawStation::new(10, "DELTA", "41.0100", "29.0200", "T1", 2),
        ];
        let snapshot = NetworkSnapshot::from_line_lists(vec![
            ("T1".to_string(), "#FF69B4".to_string(), t1),
            ("M1".to_string(), "#6C757D".to_string(), m1),
        ]);
        MetroNetwork::build(&snapshot, &NetworkConfig::default()).unwrap()
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(1.235001, 2), 1.24);
        assert_eq!(round_to(7.04, 1), 7.0);
        assert_eq!(round_to(0.0, 1), 0.0);
    }

    #[test]
    fn envelope_shape() {
        let json = serde_json::to_value(Envelope::success(vec![1, 2])).unwrap();
        assert_eq!(json, serde_json::json!({"status": "success", "data": [1, 2]}));

        let json = serde_json::to_value(Envelope::success(vec![1]).with_count(1)).unwrap();
        assert_eq!(json["count"], 1);
    }

    #[test]
    fn line_maps_keep_network_order() {
        let network = network();
        let json = serde_json::to_string(&line_colors(&network)).unwrap();
        assert_eq!(json, r##"{"T1":"#FF69B4","M1":"#6C757D"}"##);
    }

    #[test]
    fn shared_station_listed_under_each_line() {
        let network = network();
        let grouped = stations_by_line(&network);

        let (code, t1) = grouped.get_index(0).unwrap();
        assert_eq!(code, "T1");
        assert_eq!(t1[0].id, 2);
        assert_eq!(t1[0].line, "T1");

        let (_, m1) = grouped.get_index(1).unwrap();
        assert_eq!(m1[1].id, 2);
        assert_eq!(m1[1].line, "M1");
        assert_eq!(m1[1].lines, vec!["T1", "M1"]);
    }

    #[test]
    fn route_response_rounds_totals() {
        let network = network();
        let config = PlannerConfig::default();
        let route = Planner::new(&network, &config)
            .route(StationId(1), StationId(10))
            .unwrap();

        let response = RouteResponse::from_route(&network, &route);

        assert_eq!(response.path, vec![1, 2, 10]);
        assert_eq!(response.num_stations, 3);
        assert_eq!(response.lines_used, vec!["M1", "T1"]);
        assert_eq!(response.route_details[0].line, "M1");
        assert_eq!(response.route_details[1].line, "T1");
        assert_eq!(response.total_distance, round_to(route.total_distance_km, 2));
        assert_eq!(response.total_time, round_to(route.total_time_minutes, 1));
        // ~1.11 km north then ~1.68 km east
        assert!((response.total_distance - 2.79).abs() < 0.02);
    }

    #[test]
    fn route_stations_carry_the_line_they_are_reached_on() {
        let network = network();
        let config = PlannerConfig::default();
        let planner = Planner::new(&network, &config);

        // BETA is listed under T1 first but this route reaches it on M1.
        let route = planner.route(StationId(1), StationId(2)).unwrap();
        let response = RouteResponse::from_route(&network, &route);
        let lines: Vec<_> = response.stations.iter().map(|s| s.line.as_str()).collect();
        assert_eq!(lines, vec!["M1", "M1"]);
        assert_eq!(response.stations[1].lines, vec!["T1", "M1"]);

        let route = planner.route(StationId(1), StationId(10)).unwrap();
        let response = RouteResponse::from_route(&network, &route);
        let lines: Vec<_> = response.stations.iter().map(|s| s.line.as_str()).collect();
        assert_eq!(lines, vec!["M1", "M1", "T1"]);

        let route = planner.route(StationId(2), StationId(2)).unwrap();
        let response = RouteResponse::from_route(&network, &route);
        assert_eq!(response.stations[0].line, "T1");
    }

    #[test]
    fn error_body_uses_detail_key() {
        let body = ErrorResponse {
            detail: "Station not found".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"detail": "Station not found"})
        );
    }

    #[test]
    fn stats_response() {
        let network = network();
        let stats = StatsResponse::new(network.stats(), 7);

        assert_eq!(stats.total_lines, 2);
        assert_eq!(stats.total_stations, 4);
        assert_eq!(stats.total_connections, 3);
        assert_eq!(stats.transfer_connections, 0);
        assert_eq!(stats.cached_routes, 7);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["lines"], serde_json::json!({"T1": 2, "M1": 3}));
    }
}
