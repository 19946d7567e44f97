//! Proximity store: save finished strokes, load strokes saved nearby.
//!
//! DESIGN
//! ======
//! Nearby means inside the ~100 m [`BoundingBox`] around the user. The store
//! only range-filters latitude, so the query is:
//!
//! 1. remote: `location.lat ∈ [lat − 0.001, lat + 0.001]`
//! 2. local: keep `location.lng ∈ [lng − dLng, lng + dLng]`,
//!    `dLng = 0.001 / cos(lat)`
//!
//! Both ranges are inclusive. No pagination, limit, or ordering.
//!
//! ERROR HANDLING
//! ==============
//! Failures are logged here and returned to the caller. Nothing retries, and
//! a failed save is not buffered: the caller's in-memory stroke is the only
//! copy.

use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{debug, error, info};

use crate::geo::{BoundingBox, DRAWING_VISIBILITY_RADIUS_KM, GeoCoordinate};
use crate::render::SceneRenderer;
use crate::store::{DrawingDocument, DrawingId, DrawingStore, PersistenceError, SavedDrawing};
use crate::stroke::{Stroke, StrokeBuilder};

#[derive(Clone)]
pub struct ProximityStore {
    store: Arc<dyn DrawingStore>,
}

impl ProximityStore {
    #[must_use]
    pub fn new(store: Arc<dyn DrawingStore>) -> Self {
        Self { store }
    }

    /// Persist a finished stroke anchored at `location`, stamped now.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` for a stroke that is not a curve, or whatever the
    /// store reports if the write fails.
    pub async fn save(&self, stroke: &Stroke, location: GeoCoordinate) -> Result<DrawingId, PersistenceError> {
        self.save_at(stroke, location, OffsetDateTime::now_utc())
            .await
    }

    /// [`save`](Self::save) with an explicit completion timestamp.
    ///
    /// # Errors
    ///
    /// See [`save`](Self::save).
    pub async fn save_at(
        &self,
        stroke: &Stroke,
        location: GeoCoordinate,
        timestamp: OffsetDateTime,
    ) -> Result<DrawingId, PersistenceError> {
        let document = DrawingDocument::from_stroke(stroke, location, timestamp);
        document.validate()?;

        match self.store.insert(document).await {
            Ok(id) => {
                info!(%id, points = stroke.points.len(), lat = location.lat, lng = location.lng, "drawing saved");
                Ok(id)
            }
            Err(e) => {
                error!(error = %e, points = stroke.points.len(), "error saving drawing");
                Err(e)
            }
        }
    }

    /// Drawings saved inside the bounding box around `center`.
    ///
    /// `radius_km` is accepted for interface symmetry; the box is always the
    /// fixed ~100 m one.
    ///
    /// # Errors
    ///
    /// Returns whatever the store reports if the read fails.
    pub async fn query_nearby(&self, center: GeoCoordinate, radius_km: f64) -> Result<Vec<SavedDrawing>, PersistenceError> {
        #[allow(clippy::float_cmp)]
        if radius_km != DRAWING_VISIBILITY_RADIUS_KM {
            debug!(radius_km, "requested radius ignored; using fixed ~100 m box");
        }

        let bbox = BoundingBox::around(center);
        let candidates = self
            .store
            .query_lat_range(bbox.lat_min, bbox.lat_max)
            .await
            .inspect_err(|e| error!(error = %e, lat = center.lat, lng = center.lng, "error loading nearby drawings"))?;

        let fetched = candidates.len();
        let nearby: Vec<SavedDrawing> = candidates
            .into_iter()
            .filter(|saved| bbox.contains_lng(saved.drawing.location.lng))
            .collect();

        debug!(fetched, kept = nearby.len(), "nearby drawings filtered by longitude");
        Ok(nearby)
    }

    /// Query nearby drawings and render each through `builder`.
    ///
    /// Returns how many drawings were rendered.
    ///
    /// # Errors
    ///
    /// Returns whatever the store reports if the read fails. Nothing is
    /// rendered in that case.
    pub async fn load_nearby<R: SceneRenderer>(
        &self,
        center: GeoCoordinate,
        builder: &mut StrokeBuilder<R>,
    ) -> Result<usize, PersistenceError> {
        let drawings = self
            .query_nearby(center, DRAWING_VISIBILITY_RADIUS_KM)
            .await?;

        let mut rendered = 0;
        for saved in &drawings {
            let d = &saved.drawing;
            if builder.render_curve(&d.points, &d.color, d.width) {
                rendered += 1;
            }
        }

        info!(rendered, "nearby drawings loaded");
        Ok(rendered)
    }
}

#[cfg(test)]
#[path = "proximity_test.rs"]
mod tests;
