//! Dashboard JSON API
//!
//! Axum router exposing the dashboard operations: AQI lookup and hazard
//! check by city name (via Open-Meteo), and the footprint estimator.
//! The computational core stays pure; these handlers do the fetching,
//! extraction, and JSON shaping.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::aqi::pm25_to_aqi;
use crate::footprint::{estimate_footprint, ActivityInput};
use crate::hazard::{advice_summary, detect_hazards};
use crate::openmeteo::{OpenMeteoClient, OpenMeteoError};

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<OpenMeteoClient>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            client: Arc::new(OpenMeteoClient::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Dashboard endpoints (JSON)
        .route("/api/aqi", get(get_aqi))
        .route("/api/hazards", get(get_hazards))
        .route("/api/footprint", post(post_footprint))
        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[derive(Debug, serde::Deserialize)]
struct CityQuery {
    city: String,
}

/// Geocode a city, fetch its climate, and report the current AQI with
/// guidance plus a 24-hour PM2.5 chart series.
async fn get_aqi(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let city = query.city.trim();
    if city.is_empty() {
        return Err(AppError::BadRequest("city must not be empty".to_string()));
    }

    let location = state.client.geocode(city).await?;
    let data = state
        .client
        .fetch_climate(location.latitude, location.longitude)
        .await?;

    let reading = data.current_reading();
    let result = pm25_to_aqi(reading.pm25);
    let series: Vec<serde_json::Value> = data
        .pm25_series(24)
        .into_iter()
        .map(|(hour, pm)| json!({ "hour": hour, "pm2_5": pm }))
        .collect();

    Ok(Json(json!({
        "location": {
            "name": location.name,
            "country": location.country,
            "latitude": location.latitude,
            "longitude": location.longitude,
        },
        "pm2_5": reading.pm25,
        "uv_index": reading.uv_index,
        "precipitation_mm": reading.precipitation_last_hour,
        "aqi": result.aqi,
        "category": result.category.label(),
        "guidance": result.category.guidance(),
        "series": series,
    })))
}

/// Geocode a city, fetch its climate, and run the hazard rules over the
/// current reading.
async fn get_hazards(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let city = query.city.trim();
    if city.is_empty() {
        return Err(AppError::BadRequest("city must not be empty".to_string()));
    }

    let location = state.client.geocode(city).await?;
    let data = state
        .client
        .fetch_climate(location.latitude, location.longitude)
        .await?;

    let reading = data.current_reading();
    let hazards = detect_hazards(&reading);
    let advisories: Vec<serde_json::Value> = hazards
        .iter()
        .map(|h| {
            json!({
                "type": h.kind.display_name(),
                "level": h.level.display_name(),
                "message": h.message,
                "advice": h.kind.advice(),
            })
        })
        .collect();

    tracing::debug!("{}: {} hazard(s) detected", location.label(), hazards.len());

    Ok(Json(json!({
        "location": location.label(),
        "hazards": advisories,
        "advice": advice_summary(&hazards),
        "checked_at": chrono::Utc::now().to_rfc3339(),
    })))
}

/// Compute a footprint estimate from activity amounts. Pure computation;
/// persistence of records stays on the caller's side.
async fn post_footprint(
    Json(input): Json<ActivityInput>,
) -> Result<Json<serde_json::Value>, AppError> {
    let estimate = estimate_footprint(&input);
    Ok(Json(json!({
        "total_kg": estimate.total_kg,
        "band": estimate.band.display_name(),
        "suggestion": estimate.band.suggestion(),
        "display": estimate.display(),
    })))
}

// ============================================================================
// Error Handling
// ============================================================================

enum AppError {
    BadRequest(String),
    NotFound(String),
    Upstream(String),
}

impl From<OpenMeteoError> for AppError {
    fn from(err: OpenMeteoError) -> Self {
        match err {
            OpenMeteoError::CityNotFound(_) => AppError::NotFound(err.to_string()),
            OpenMeteoError::Request(_) | OpenMeteoError::Api { .. } => {
                AppError::Upstream(err.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
