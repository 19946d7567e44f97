//! In-memory drawing collection.
//!
//! Used when no database is configured and as the reference store in tests.
//! Contents are lost on restart.

use tokio::sync::RwLock;

use super::{DrawingDocument, DrawingId, DrawingStore, PersistenceError, SavedDrawing};

#[derive(Default)]
pub struct MemoryDrawingStore {
    drawings: RwLock<Vec<SavedDrawing>>,
}

impl MemoryDrawingStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.drawings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.drawings.read().await.is_empty()
    }

    /// Snapshot of every stored drawing in insertion order.
    pub async fn all(&self) -> Vec<SavedDrawing> {
        self.drawings.read().await.clone()
    }
}

#[async_trait::async_trait]
impl DrawingStore for MemoryDrawingStore {
    async fn insert(&self, drawing: DrawingDocument) -> Result<DrawingId, PersistenceError> {
        let id = DrawingId::new_v4();
        self.drawings
            .write()
            .await
            .push(SavedDrawing { id, drawing });
        Ok(id)
    }

    async fn query_lat_range(&self, lat_min: f64, lat_max: f64) -> Result<Vec<SavedDrawing>, PersistenceError> {
        let drawings = self.drawings.read().await;
        Ok(drawings
            .iter()
            .filter(|saved| {
                let lat = saved.drawing.location.lat;
                lat >= lat_min && lat <= lat_max
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::*;
    use crate::geo::GeoCoordinate;
    use crate::stroke::Point3D;

    fn at(lat: f64, lng: f64) -> DrawingDocument {
        DrawingDocument {
            points: vec![Point3D::new(0.0, 0.0, 0.0), Point3D::new(1.0, 0.0, 0.0)],
            color: "#FF1493".into(),
            width: 0.02,
            timestamp: OffsetDateTime::UNIX_EPOCH,
            location: GeoCoordinate::new(lat, lng),
        }
    }

    #[tokio::test]
    async fn insert_assigns_distinct_ids() {
        let store = MemoryDrawingStore::new();
        let a = store.insert(at(1.0, 1.0)).await.unwrap();
        let b = store.insert(at(1.0, 1.0)).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn query_lat_range_is_inclusive_and_ignores_lng() {
        let store = MemoryDrawingStore::new();
        store.insert(at(10.0, 0.0)).await.unwrap();
        store.insert(at(11.0, 179.0)).await.unwrap();
        store.insert(at(12.0, -50.0)).await.unwrap();
        store.insert(at(12.5, 0.0)).await.unwrap();

        let hits = store.query_lat_range(10.0, 12.0).await.unwrap();
        assert_eq!(hits.len(), 3);
        assert!(hits.iter().all(|s| s.drawing.location.lat <= 12.0));
    }

    #[tokio::test]
    async fn query_lat_range_empty_store() {
        let store = MemoryDrawingStore::new();
        assert!(store.is_empty().await);
        assert!(store.query_lat_range(-90.0, 90.0).await.unwrap().is_empty());
    }
}
