//! Geographic coordinates and the proximity bounding box.
//!
//! DESIGN
//! ======
//! The backing collection can only range-filter one field efficiently, so a
//! proximity query is a latitude range evaluated remotely plus a longitude
//! range evaluated locally. Together they form an approximate square around
//! the center, not a true circle.

use serde::{Deserialize, Serialize};

/// Half-width of the bounding box in degrees of latitude (~100 m).
pub const LAT_HALF_WIDTH_DEG: f64 = 0.001;

/// Radius advertised for nearby queries, in kilometers.
pub const DRAWING_VISIBILITY_RADIUS_KM: f64 = 0.1;

/// Mean Earth radius used by [`distance_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// =============================================================================
// COORDINATE
// =============================================================================

/// A WGS84 position in degrees. Serialized as `{lat, lng}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub lat: f64,
    pub lng: f64,
}

impl GeoCoordinate {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

// =============================================================================
// BOUNDING BOX
// =============================================================================

/// Inclusive lat/lng ranges around a center coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
}

impl BoundingBox {
    /// Build the ~100 m box around `center`.
    ///
    /// The longitude half-width is `0.001 / cos(lat)` so the box keeps roughly
    /// the same ground width as meridians converge toward the poles.
    #[must_use]
    pub fn around(center: GeoCoordinate) -> Self {
        let d_lat = LAT_HALF_WIDTH_DEG;
        let d_lng = lng_half_width_deg(center.lat);
        Self {
            lat_min: center.lat - d_lat,
            lat_max: center.lat + d_lat,
            lng_min: center.lng - d_lng,
            lng_max: center.lng + d_lng,
        }
    }

    #[must_use]
    pub fn contains_lat(&self, lat: f64) -> bool {
        lat >= self.lat_min && lat <= self.lat_max
    }

    #[must_use]
    pub fn contains_lng(&self, lng: f64) -> bool {
        lng >= self.lng_min && lng <= self.lng_max
    }

    #[must_use]
    pub fn contains(&self, point: GeoCoordinate) -> bool {
        self.contains_lat(point.lat) && self.contains_lng(point.lng)
    }
}

/// Longitude half-width in degrees for a box centered at `lat` degrees.
#[must_use]
pub fn lng_half_width_deg(lat: f64) -> f64 {
    LAT_HALF_WIDTH_DEG / lat.to_radians().cos()
}

/// Great-circle distance between two coordinates (haversine).
#[must_use]
pub fn distance_km(a: GeoCoordinate, b: GeoCoordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
#[path = "geo_test.rs"]
mod tests;
