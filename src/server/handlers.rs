use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::geo::GeoPoint;
use crate::hours::{is_open_at, next_open_time_at, WeeklyHourEntry};
use crate::locator::{ProximityResult, DEFAULT_RADIUS_MILES};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

#[derive(Debug)]
pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

fn log_request(path: &str, detail: &str, start: Instant) {
    eprintln!(
        "[{}] {} {} ({:.1}ms)",
        Utc::now().format("%H:%M:%S"),
        path,
        detail,
        start.elapsed().as_secs_f64() * 1000.0,
    );
}

// ─── GET /api/geocode ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct GeocodeQuery {
    pub zip: Option<String>,
}

pub async fn geocode(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GeocodeQuery>,
) -> Result<Json<GeoPoint>, Response> {
    let start = Instant::now();

    let zip = params.zip.as_deref().unwrap_or("").trim().to_string();
    if zip.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Missing 'zip' parameter").into_response());
    }

    let point = {
        let mut finder = state.finder.lock().unwrap();
        finder.resolve_zip(&zip)
    };

    match point {
        Some(p) => {
            log_request("GET /api/geocode", &format!("zip={} -> hit", zip), start);
            Ok(Json(p))
        }
        None => {
            log_request("GET /api/geocode", &format!("zip={} -> miss", zip), start);
            Err(api_error(
                StatusCode::NOT_FOUND,
                format!("Could not geocode postal code '{}'", zip),
            )
            .into_response())
        }
    }
}

// ─── GET /api/search ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SearchQuery {
    pub zip: Option<String>,
    pub radius: Option<f64>,
    pub exclude: Option<String>,
}

fn parse_exclusions(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<ProximityResult>>, Response> {
    let start = Instant::now();

    let zip = params.zip.as_deref().unwrap_or("").trim().to_string();
    if zip.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Missing 'zip' parameter").into_response());
    }
    let radius = params.radius.unwrap_or(DEFAULT_RADIUS_MILES);
    if radius <= 0.0 {
        return Err(api_error(StatusCode::BAD_REQUEST, "Radius must be positive").into_response());
    }
    let exclude = parse_exclusions(params.exclude.as_deref());

    // Upstream failures intentionally surface as an empty array with 200.
    let results = {
        let mut finder = state.finder.lock().unwrap();
        finder.search_by_zip(&zip, radius, &exclude)
    };

    log_request(
        "GET /api/search",
        &format!("zip={} radius={} -> {} rows", zip, radius, results.len()),
        start,
    );
    Ok(Json(results))
}

// ─── GET /api/nearby ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct NearbyQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub radius: Option<f64>,
    pub exclude: Option<String>,
}

pub async fn nearby(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NearbyQuery>,
) -> Result<Json<Vec<ProximityResult>>, Response> {
    let start = Instant::now();

    let (lat, lon) = match (params.lat, params.lon) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "Provide 'lat' and 'lon' parameters",
            )
            .into_response());
        }
    };
    let point = GeoPoint::new(lat, lon);
    if !point.is_valid() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Invalid coordinates. Lat: -90..90, Lon: -180..180",
        )
        .into_response());
    }
    let radius = params.radius.unwrap_or(DEFAULT_RADIUS_MILES);
    if radius <= 0.0 {
        return Err(api_error(StatusCode::BAD_REQUEST, "Radius must be positive").into_response());
    }
    let exclude = parse_exclusions(params.exclude.as_deref());

    let results = {
        let finder = state.finder.lock().unwrap();
        finder.search_near(point, radius, &exclude)
    };

    log_request(
        "GET /api/nearby",
        &format!("lat={} lon={} -> {} rows", lat, lon, results.len()),
        start,
    );
    Ok(Json(results))
}

// ─── /api/status ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct StatusRequest {
    pub state: String,
    pub hours: Vec<WeeklyHourEntry>,
    /// Optional RFC3339 instant; defaults to now. Lets callers evaluate a
    /// schedule at a fixed time.
    pub at: Option<String>,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub is_open: bool,
    pub next_open: Option<String>,
}

fn parse_at(at: Option<&str>) -> Result<DateTime<Utc>, ApiError> {
    match at {
        None => Ok(Utc::now()),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                api_error(
                    StatusCode::BAD_REQUEST,
                    format!("Invalid 'at' timestamp '{}': {}", raw, e),
                )
            }),
    }
}

fn evaluate(hours: &[WeeklyHourEntry], region: &str, now: DateTime<Utc>) -> StatusResponse {
    StatusResponse {
        is_open: is_open_at(hours, region, now),
        next_open: next_open_time_at(hours, region, now),
    }
}

/// POST /api/status — evaluate a schedule supplied in the request body.
pub async fn status(Json(body): Json<StatusRequest>) -> Result<Json<StatusResponse>, Response> {
    let now = parse_at(body.at.as_deref()).map_err(IntoResponse::into_response)?;
    Ok(Json(evaluate(&body.hours, &body.state, now)))
}

// ─── GET /api/status ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LocationStatusQuery {
    pub location: Option<String>,
    pub state: Option<String>,
    pub at: Option<String>,
}

/// GET /api/status?location=<id>&state=<region> — fetch the schedule from
/// the store, then evaluate. A location with no stored hours reads closed.
pub async fn location_status(
    State(app): State<Arc<AppState>>,
    Query(params): Query<LocationStatusQuery>,
) -> Result<Json<StatusResponse>, Response> {
    let start = Instant::now();

    let location = params.location.as_deref().unwrap_or("").trim().to_string();
    if location.is_empty() {
        return Err(
            api_error(StatusCode::BAD_REQUEST, "Missing 'location' parameter").into_response(),
        );
    }
    let region = params.state.as_deref().unwrap_or("").to_string();
    let now = parse_at(params.at.as_deref()).map_err(IntoResponse::into_response)?;

    let hours = {
        let finder = app.finder.lock().unwrap();
        finder.hours_for(&location)
    };

    let response = evaluate(&hours, &region, now);
    log_request(
        "GET /api/status",
        &format!("location={} -> open={}", location, response.is_open),
        start,
    );
    Ok(Json(response))
}
