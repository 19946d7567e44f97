//! Drawing collection routes.
//!
//! ERROR HANDLING
//! ==============
//! Invalid documents map to 422, bad query ranges to 400, and every store
//! failure to 500 after being logged.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::geo::{DRAWING_VISIBILITY_RADIUS_KM, GeoCoordinate, distance_km};
use crate::state::AppState;
use crate::store::{DrawingDocument, DrawingId, PersistenceError, SavedDrawing};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: DrawingId,
}

#[derive(Debug, Deserialize)]
pub struct LatRangeQuery {
    pub lat_min: f64,
    pub lat_max: f64,
}

#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lng: f64,
    pub radius_km: Option<f64>,
}

/// A nearby drawing with its great-circle distance from the query center.
#[derive(Debug, Serialize, Deserialize)]
pub struct NearbyDrawing {
    #[serde(flatten)]
    pub saved: SavedDrawing,
    pub distance_km: f64,
}

/// `POST /api/drawings`: store one immutable drawing document.
pub async fn create_drawing(
    State(state): State<AppState>,
    Json(document): Json<DrawingDocument>,
) -> Result<(StatusCode, Json<CreatedResponse>), StatusCode> {
    document.validate().map_err(persistence_error_to_status)?;

    let id = state
        .store
        .insert(document)
        .await
        .map_err(persistence_error_to_status)?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// `GET /api/drawings?lat_min=..&lat_max=..`: drawings in a latitude band.
pub async fn list_lat_range(
    State(state): State<AppState>,
    Query(query): Query<LatRangeQuery>,
) -> Result<Json<Vec<SavedDrawing>>, StatusCode> {
    if !query.lat_min.is_finite() || !query.lat_max.is_finite() || query.lat_min > query.lat_max {
        warn!(lat_min = query.lat_min, lat_max = query.lat_max, "rejected latitude range");
        return Err(StatusCode::BAD_REQUEST);
    }

    let drawings = state
        .store
        .query_lat_range(query.lat_min, query.lat_max)
        .await
        .map_err(persistence_error_to_status)?;
    Ok(Json(drawings))
}

/// `GET /api/drawings/nearby?lat=..&lng=..[&radius_km=..]`: drawings in the
/// box around a position, closest first.
pub async fn list_nearby(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<Vec<NearbyDrawing>>, StatusCode> {
    let center = GeoCoordinate::new(query.lat, query.lng);
    let radius_km = query.radius_km.unwrap_or(DRAWING_VISIBILITY_RADIUS_KM);
    if !center.is_finite() || !radius_km.is_finite() || radius_km < 0.0 {
        return Err(StatusCode::BAD_REQUEST);
    }

    let saved = state
        .proximity
        .query_nearby(center, radius_km)
        .await
        .map_err(persistence_error_to_status)?;

    let mut nearby: Vec<NearbyDrawing> = saved
        .into_iter()
        .map(|saved| {
            let distance_km = distance_km(center, saved.drawing.location);
            NearbyDrawing { saved, distance_km }
        })
        .collect();
    nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    Ok(Json(nearby))
}

pub(crate) fn persistence_error_to_status(err: PersistenceError) -> StatusCode {
    match err {
        PersistenceError::Invalid(reason) => {
            warn!(%reason, "rejected drawing");
            StatusCode::UNPROCESSABLE_ENTITY
        }
        other => {
            error!(error = %other, code = other.error_code(), "drawing store failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
#[path = "drawings_test.rs"]
mod tests;
