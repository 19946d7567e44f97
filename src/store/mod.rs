//! The `drawings` collection: wire format and store capability.
//!
//! DESIGN
//! ======
//! A saved drawing is an immutable document:
//!
//! ```text
//! { points: [{x, y, z}], color, width, timestamp, location: {lat, lng} }
//! ```
//!
//! `timestamp` is RFC 3339. Any replacement store must keep this shape so
//! drawings stay readable across backends.
//!
//! Stores only range-filter on `location.lat`; the longitude half of a
//! proximity query happens in [`crate::services::proximity`]. That mirrors the
//! single-field inequality limit of managed document databases.

pub mod http;
pub mod memory;
pub mod postgres;

use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::geo::GeoCoordinate;
use crate::stroke::{MIN_CURVE_POINTS, Point3D, Stroke};

pub use http::HttpDrawingStore;
pub use memory::MemoryDrawingStore;
pub use postgres::PgDrawingStore;

// =============================================================================
// ERROR
// =============================================================================

/// Remote save or query failure. Transient and permanent failures are not
/// distinguished; callers log and surface, never retry.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("store request failed: {0}")]
    Request(String),
    #[error("store response error: status {status}")]
    Status { status: u16, body: String },
    #[error("malformed drawing {id}: {reason}")]
    Malformed { id: String, reason: String },
    #[error("invalid drawing: {0}")]
    Invalid(String),
}

impl PersistenceError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Database(_) => "E_DATABASE",
            Self::Request(_) => "E_STORE_REQUEST",
            Self::Status { .. } => "E_STORE_STATUS",
            Self::Malformed { .. } => "E_MALFORMED_DRAWING",
            Self::Invalid(_) => "E_INVALID_DRAWING",
        }
    }
}

// =============================================================================
// DOCUMENTS
// =============================================================================

/// Opaque store-assigned document id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawingId(pub Uuid);

impl DrawingId {
    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for DrawingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A finished stroke as persisted in the `drawings` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingDocument {
    pub points: Vec<Point3D>,
    pub color: String,
    pub width: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub location: GeoCoordinate,
}

impl DrawingDocument {
    #[must_use]
    pub fn from_stroke(stroke: &Stroke, location: GeoCoordinate, timestamp: OffsetDateTime) -> Self {
        Self {
            points: stroke.points.clone(),
            color: stroke.color.clone(),
            width: stroke.width,
            timestamp,
            location,
        }
    }

    /// Rebuild the stroke this document was saved from.
    #[must_use]
    pub fn to_stroke(&self) -> Stroke {
        Stroke { points: self.points.clone(), color: self.color.clone(), width: self.width }
    }

    /// Check the invariants every stored drawing satisfies.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` for fewer than two points or non-finite numbers.
    pub fn validate(&self) -> Result<(), PersistenceError> {
        if self.points.len() < MIN_CURVE_POINTS {
            return Err(PersistenceError::Invalid(format!(
                "need at least {MIN_CURVE_POINTS} points, got {}",
                self.points.len()
            )));
        }
        if !self.points.iter().all(Point3D::is_finite) {
            return Err(PersistenceError::Invalid("non-finite point coordinate".into()));
        }
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(PersistenceError::Invalid(format!("width must be positive, got {}", self.width)));
        }
        if !self.location.is_finite() {
            return Err(PersistenceError::Invalid("non-finite location".into()));
        }
        Ok(())
    }
}

/// A stored drawing with its id. Serialized flat: `{id, points, color, ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedDrawing {
    pub id: DrawingId,
    #[serde(flatten)]
    pub drawing: DrawingDocument,
}

// =============================================================================
// STORE TRAIT
// =============================================================================

/// The remote `drawings` collection. Enables swapping backends and mocking
/// failures in tests.
#[async_trait::async_trait]
pub trait DrawingStore: Send + Sync {
    /// Create one immutable document and return its id.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the write fails.
    async fn insert(&self, drawing: DrawingDocument) -> Result<DrawingId, PersistenceError>;

    /// All drawings with `lat_min <= location.lat <= lat_max`, in no
    /// particular order.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the read fails.
    async fn query_lat_range(&self, lat_min: f64, lat_max: f64) -> Result<Vec<SavedDrawing>, PersistenceError>;
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
