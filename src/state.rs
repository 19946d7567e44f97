//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the drawing store and the proximity service built on it. Clone is
//! required by Axum; both fields are `Arc`-backed.

use std::sync::Arc;

use crate::services::proximity::ProximityStore;
use crate::store::DrawingStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DrawingStore>,
    pub proximity: ProximityStore,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn DrawingStore>) -> Self {
        let proximity = ProximityStore::new(store.clone());
        Self { store, proximity }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use time::OffsetDateTime;

    use crate::geo::GeoCoordinate;
    use crate::store::{DrawingDocument, DrawingId, DrawingStore, PersistenceError, SavedDrawing};
    use crate::stroke::{Point3D, Stroke};

    /// A store whose every call fails like an unreachable backend.
    pub struct FailingDrawingStore;

    #[async_trait::async_trait]
    impl DrawingStore for FailingDrawingStore {
        async fn insert(&self, _drawing: DrawingDocument) -> Result<DrawingId, PersistenceError> {
            Err(PersistenceError::Request("simulated outage".into()))
        }

        async fn query_lat_range(&self, _lat_min: f64, _lat_max: f64) -> Result<Vec<SavedDrawing>, PersistenceError> {
            Err(PersistenceError::Request("simulated outage".into()))
        }
    }

    /// A three-point stroke in front of the origin.
    #[must_use]
    pub fn sample_stroke() -> Stroke {
        Stroke {
            points: vec![Point3D::new(0.0, 0.0, 1.0), Point3D::new(0.2, 0.1, 1.0), Point3D::new(0.4, 0.0, 1.0)],
            color: "#FF82AB".into(),
            width: 0.018,
        }
    }

    /// A valid document anchored at `(lat, lng)`.
    #[must_use]
    pub fn sample_document(lat: f64, lng: f64) -> DrawingDocument {
        DrawingDocument::from_stroke(
            &sample_stroke(),
            GeoCoordinate::new(lat, lng),
            OffsetDateTime::from_unix_timestamp(1_730_000_000).unwrap(),
        )
    }
}
