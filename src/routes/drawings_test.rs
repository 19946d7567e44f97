use super::*;
use std::sync::Arc;

use crate::state::test_helpers::{FailingDrawingStore, sample_document};
use crate::store::{DrawingStore, MemoryDrawingStore};

const PARIS: GeoCoordinate = GeoCoordinate { lat: 48.8566, lng: 2.3522 };

async fn serve(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, crate::routes::app(state)).await.unwrap();
    });
    format!("http://{addr}")
}

// =============================================================================
// persistence_error_to_status
// =============================================================================

#[test]
fn invalid_maps_to_unprocessable() {
    let err = PersistenceError::Invalid("one point".into());
    assert_eq!(persistence_error_to_status(err), StatusCode::UNPROCESSABLE_ENTITY);
}

#[test]
fn store_failures_map_to_internal_error() {
    let request = PersistenceError::Request("down".into());
    assert_eq!(persistence_error_to_status(request), StatusCode::INTERNAL_SERVER_ERROR);

    let malformed = PersistenceError::Malformed { id: "x".into(), reason: "bad".into() };
    assert_eq!(persistence_error_to_status(malformed), StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// handlers
// =============================================================================

#[tokio::test]
async fn healthz_returns_ok() {
    let base = serve(AppState::new(Arc::new(MemoryDrawingStore::new()))).await;
    let response = reqwest::get(format!("{base}/healthz")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
}

#[tokio::test]
async fn create_returns_created_with_id() {
    let memory = Arc::new(MemoryDrawingStore::new());
    let base = serve(AppState::new(memory.clone())).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/drawings"))
        .json(&sample_document(PARIS.lat, PARIS.lng))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);

    let created: CreatedResponse = response.json().await.unwrap();
    assert_eq!(memory.all().await[0].id, created.id);
}

#[tokio::test]
async fn create_rejects_missing_fields() {
    let base = serve(AppState::new(Arc::new(MemoryDrawingStore::new()))).await;
    let response = reqwest::Client::new()
        .post(format!("{base}/api/drawings"))
        .json(&serde_json::json!({ "points": [], "color": "#FF1493" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn lat_range_rejects_inverted_bounds() {
    let base = serve(AppState::new(Arc::new(MemoryDrawingStore::new()))).await;
    let response = reqwest::get(format!("{base}/api/drawings?lat_min=10&lat_max=5")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn nearby_annotates_distance_and_sorts_closest_first() {
    let memory = Arc::new(MemoryDrawingStore::new());
    let far = memory.insert(sample_document(PARIS.lat + 0.0009, PARIS.lng)).await.unwrap();
    let near = memory.insert(sample_document(PARIS.lat, PARIS.lng)).await.unwrap();
    memory.insert(sample_document(PARIS.lat + 0.01, PARIS.lng)).await.unwrap();
    let base = serve(AppState::new(memory)).await;

    let response = reqwest::get(format!("{base}/api/drawings/nearby?lat={}&lng={}", PARIS.lat, PARIS.lng))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let hits: Vec<NearbyDrawing> = response.json().await.unwrap();
    assert_eq!(hits.iter().map(|h| h.saved.id).collect::<Vec<_>>(), vec![near, far]);
    assert!(hits[0].distance_km.abs() < 1e-9);
    // 0.0009 degrees of latitude is roughly 100 m.
    assert!((hits[1].distance_km - 0.1).abs() < 0.005);
}

#[tokio::test]
async fn nearby_store_failure_is_internal_error() {
    let base = serve(AppState::new(Arc::new(FailingDrawingStore))).await;
    let response = reqwest::get(format!("{base}/api/drawings/nearby?lat=0&lng=0")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
}
