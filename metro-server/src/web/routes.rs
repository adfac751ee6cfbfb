//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use indexmap::IndexMap;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::domain::StationId;
use crate::planner::{Planner, RouteError};

use super::dto::*;
use super::state::AppState;

/// Shortest accepted search query, in characters.
const MIN_QUERY_CHARS: usize = 2;

/// Create the application router.
///
/// `static_dir` is the frontend directory; anything outside `/api` is
/// served from it.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/lines", get(list_lines))
        .route("/api/station/:id", get(get_station))
        .route("/api/search", get(search_stations))
        .route("/api/route", post(plan_route))
        .route("/api/stats", get(stats))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// All stations grouped by line.
async fn list_stations(
    State(state): State<AppState>,
) -> Json<Envelope<IndexMap<String, Vec<StationDto>>>> {
    Json(Envelope::success(stations_by_line(&state.network)))
}

/// Line codes and their colors.
async fn list_lines(State(state): State<AppState>) -> Json<Envelope<IndexMap<String, String>>> {
    Json(Envelope::success(line_colors(&state.network)))
}

/// A single station by id.
async fn get_station(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<StationDto>>, AppError> {
    let station = state
        .network
        .find_station(StationId(id))
        .map_err(|_| AppError::NotFound {
            message: "Station not found".to_string(),
        })?;

    Ok(Json(Envelope::success(StationDto::from_station(
        &state.network,
        station,
    ))))
}

/// Search stations by name.
async fn search_stations(
    State(state): State<AppState>,
    Query(req): Query<SearchQuery>,
) -> Result<Json<Envelope<Vec<StationDto>>>, AppError> {
    if req.q.trim().chars().count() < MIN_QUERY_CHARS {
        return Err(AppError::BadRequest {
            message: format!("Query must be at least {MIN_QUERY_CHARS} characters"),
        });
    }

    let limit = req.limit.unwrap_or(usize::MAX);
    let results: Vec<StationDto> = state
        .network
        .search_stations(&req.q)
        .into_iter()
        .take(limit)
        .map(|s| StationDto::from_station(&state.network, s))
        .collect();

    let count = results.len();
    Ok(Json(Envelope::success(results).with_count(count)))
}

/// Compute the shortest route between two stations.
async fn plan_route(
    State(state): State<AppState>,
    body: Result<Json<RouteRequest>, JsonRejection>,
) -> Result<Json<Envelope<RouteResponse>>, AppError> {
    let Json(req) = body?;
    let source = StationId(req.source_id);
    let target = StationId(req.target_id);

    let route = state
        .routes
        .get_or_compute(source, target, || {
            Planner::new(&state.network, &state.planner_config).route(source, target)
        })
        .await?;

    Ok(Json(Envelope::success(RouteResponse::from_route(
        &state.network,
        &route,
    ))))
}

/// Network statistics.
async fn stats(State(state): State<AppState>) -> Json<Envelope<StatsResponse>> {
    let cached_routes = state.routes.cached_routes().await;
    Json(Envelope::success(StatsResponse::new(
        state.network.stats(),
        cached_routes,
    )))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        match e {
            RouteError::StationNotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            RouteError::NoRoute { .. } => AppError::NotFound {
                message: "No route found between the specified stations".to_string(),
            },
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status().is_server_error() {
            AppError::Internal {
                message: rejection.body_text(),
            }
        } else {
            AppError::BadRequest {
                message: rejection.body_text(),
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            tracing::error!(%status, %message, "request failed");
        } else {
            tracing::debug!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { detail: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use serde_json::{Value, json};
    use tempfile::tempdir;
    use tower::ServiceExt;

    use crate::cache::RouteCacheConfig;
    use crate::network::{MetroNetwork, NetworkConfig, NetworkSnapshot, RawStation};
    use crate::planner::PlannerConfig;

    fn state() -> AppState {
        let m1 = vec![
            RawStation::new(1, "ALPHA", "41.0000", "29.0000", "M1", 1),
            RawStation::new(2, "BETA", "41.0100", "29.0000", "M1", 2),
            RawStation::new(3, "GAMMA", "41.0200", "29.0000", "M1", 3),
        ];
        let t1 = vec![
            RawStation::new(2, "BETA", "41.0100", "29.0000", "T1", 1),
            RawStation::new(10, "ALPHABET", "41.0100", "29.0200", "T1", 2),
        ];
        let island = vec![RawStation::new(50, "ISLAND", "40.8700", "29.1200", "F4", 1)];
        let snapshot = NetworkSnapshot::from_line_lists(vec![
            ("M1".to_string(), "#6C757D".to_string(), m1),
            ("T1".to_string(), "#FF69B4".to_string(), t1),
            ("F4".to_string(), "#808000".to_string(), island),
        ]);
        let network = MetroNetwork::build(&snapshot, &NetworkConfig::default()).unwrap();
        AppState::new(network, PlannerConfig::default(), &RouteCacheConfig::default()).unwrap()
    }

    fn router() -> Router {
        create_router(state(), "does-not-exist")
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health() {
        let (status, body) = send(router(), get("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"status": "healthy", "service": "Istanbul Metro API"})
        );
    }

    #[tokio::test]
    async fn stations_grouped_by_line() {
        let (status, body) = send(router(), get("/api/stations")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["M1"].as_array().unwrap().len(), 3);
        assert_eq!(body["data"]["T1"][0]["id"], 2);
        assert_eq!(body["data"]["T1"][0]["line"], "T1");
    }

    #[tokio::test]
    async fn lines_with_colors() {
        let (status, body) = send(router(), get("/api/lines")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["T1"], "#FF69B4");
        assert_eq!(body["data"]["F4"], "#808000");
    }

    #[tokio::test]
    async fn station_by_id() {
        let (status, body) = send(router(), get("/api/station/2")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "BETA");
        assert_eq!(body["data"]["lines"], json!(["M1", "T1"]));

        let (status, body) = send(router(), get("/api/station/999")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Station not found");
    }

    #[tokio::test]
    async fn search_ranks_and_counts() {
        let (status, body) = send(router(), get("/api/search?q=alpha")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        assert_eq!(body["data"][0]["name"], "ALPHA");
        assert_eq!(body["data"][1]["name"], "ALPHABET");

        let (_, body) = send(router(), get("/api/search?q=alpha&limit=1")).await;
        assert_eq!(body["count"], 1);
    }

    #[tokio::test]
    async fn search_rejects_short_query() {
        let (status, body) = send(router(), get("/api/search?q=a")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Query must be at least 2 characters");

        let (status, _) = send(router(), get("/api/search")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn route_between_lines() {
        let request = post_json("/api/route", json!({"source_id": 1, "target_id": 10}));
        let (status, body) = send(router(), request).await;

        assert_eq!(status, StatusCode::OK);
        let data = &body["data"];
        assert_eq!(data["path"], json!([1, 2, 10]));
        assert_eq!(data["num_stations"], 3);
        assert_eq!(data["lines_used"], json!(["M1", "T1"]));
        assert_eq!(data["route_details"].as_array().unwrap().len(), 2);
        assert_eq!(data["route_details"][0]["from_name"], "ALPHA");
    }

    #[tokio::test]
    async fn route_to_same_station() {
        let request = post_json("/api/route", json!({"source_id": 3, "target_id": 3}));
        let (status, body) = send(router(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["path"], json!([3]));
        assert_eq!(body["data"]["total_distance"], 0.0);
        assert_eq!(body["data"]["total_time"], 0.0);
    }

    #[tokio::test]
    async fn route_errors_are_not_found() {
        let request = post_json("/api/route", json!({"source_id": 1, "target_id": 999}));
        let (status, body) = send(router(), request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "station 999 not found");

        let request = post_json("/api/route", json!({"source_id": 1, "target_id": 50}));
        let (status, body) = send(router(), request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body["detail"],
            "No route found between the specified stations"
        );
    }

    #[tokio::test]
    async fn malformed_route_request() {
        let request = post_json("/api/route", json!({"source_id": "one"}));
        let (status, body) = send(router(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string());
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn repeated_routes_are_cached() {
        let state = state();
        let app = create_router(state.clone(), "does-not-exist");

        for _ in 0..2 {
            let request = post_json("/api/route", json!({"source_id": 1, "target_id": 3}));
            let (status, _) = send(app.clone(), request).await;
            assert_eq!(status, StatusCode::OK);
        }

        assert_eq!(state.routes.cached_routes().await, 1);

        let (_, body) = send(app, get("/api/stats")).await;
        assert_eq!(body["data"]["cached_routes"], 1);
    }

    #[tokio::test]
    async fn stats() {
        let (status, body) = send(router(), get("/api/stats")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total_lines"], 3);
        assert_eq!(body["data"]["total_stations"], 5);
        assert_eq!(body["data"]["lines"], json!({"M1": 3, "T1": 2, "F4": 1}));
        assert_eq!(body["data"]["cached_routes"], 0);
    }

    #[tokio::test]
    async fn serves_frontend() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>metro</h1>").unwrap();
        let app = create_router(state(), dir.path().to_str().unwrap());

        let response = app.oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"<h1>metro</h1>");
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let request = Request::builder()
            .uri("/api/health")
            .header(header::ORIGIN, "http://example.com")
            .body(Body::empty())
            .unwrap();
        let response = router().oneshot(request).await.unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }
}
