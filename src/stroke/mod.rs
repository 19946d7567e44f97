//! Stroke builder: touch samples to renderable tube meshes.
//!
//! DESIGN
//! ======
//! A `StrokeBuilder` is owned by the input-handling context; there is no
//! process-wide drawing state. Each touch sample is projected into world
//! space in front of the camera and appended to the in-progress [`Stroke`].
//! Once a stroke has two points, every extension rebuilds the whole tube and
//! adds it to the scene. Nothing is diffed or reused.
//!
//! PROJECTION
//! ==========
//! `P + D * drawing_distance + (ndc_x, ndc_y, 0)`. The NDC offset is added in
//! world units rather than unprojected through the camera. Saved drawings
//! depend on this exact placement, so it must not be "corrected".

pub mod curve;
pub mod tube;

use glam::DVec3;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::render::{MeshEntity, SceneRenderer, StrokeMaterial};
use tube::TubeGeometry;

/// Colors a new stroke is drawn from.
pub const PINK_PALETTE: [&str; 5] = [
    "#FF1493", // deep pink
    "#FF69B4", // hot pink
    "#FFB6C1", // light pink
    "#FF82AB", // pale violet red
    "#FF34B3", // rose pink
];

/// Used when a stroke color cannot be parsed.
pub const DEFAULT_STROKE_COLOR: &str = "#FF1493";

/// Stroke widths are drawn from `[MIN_STROKE_WIDTH, MAX_STROKE_WIDTH)`.
pub const MIN_STROKE_WIDTH: f64 = 0.01;
pub const MAX_STROKE_WIDTH: f64 = 0.04;

/// Distance along the camera direction at which points are placed.
pub const DEFAULT_DRAWING_DISTANCE: f64 = -1.0;

/// A curve needs at least this many points.
pub const MIN_CURVE_POINTS: usize = 2;

// =============================================================================
// TYPES
// =============================================================================

/// World-space point. Serialized as `{x, y, z}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<Point3D> for DVec3 {
    fn from(p: Point3D) -> Self {
        DVec3::new(p.x, p.y, p.z)
    }
}

impl From<DVec3> for Point3D {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// Raw touch position in client pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSample {
    pub client_x: f64,
    pub client_y: f64,
}

impl TouchSample {
    #[must_use]
    pub fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }

    /// Normalized device coordinates: x right, y up, both in `[-1, 1]`.
    #[must_use]
    pub fn to_ndc(self, viewport: Viewport) -> (f64, f64) {
        let x = (self.client_x / viewport.width) * 2.0 - 1.0;
        let y = -(self.client_y / viewport.height) * 2.0 + 1.0;
        (x, y)
    }
}

/// Drawing surface size in client pixels. Never zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width: width.max(1.0), height: height.max(1.0) }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }
}

/// Camera world position and unit forward direction at the time of a touch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Point3D,
    pub direction: Point3D,
}

/// One continuous freehand gesture.
///
/// Points are appended while drawing and left untouched once the stroke is
/// returned from [`StrokeBuilder::finish`].
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub points: Vec<Point3D>,
    pub color: String,
    pub width: f64,
}

impl Stroke {
    #[must_use]
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self { points: Vec::new(), color: color.into(), width }
    }

    #[must_use]
    pub fn is_curve(&self) -> bool {
        self.points.len() >= MIN_CURVE_POINTS
    }
}

// =============================================================================
// BUILDER
// =============================================================================

pub struct StrokeBuilder<R> {
    renderer: R,
    viewport: Viewport,
    drawing_distance: f64,
    rng: StdRng,
}

impl<R: SceneRenderer> StrokeBuilder<R> {
    #[must_use]
    pub fn new(renderer: R, viewport: Viewport) -> Self {
        Self { renderer, viewport, drawing_distance: DEFAULT_DRAWING_DISTANCE, rng: StdRng::from_os_rng() }
    }

    /// Seed color/width selection so strokes are reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn with_drawing_distance(mut self, distance: f64) -> Self {
        self.drawing_distance = distance;
        self
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Begin a stroke with a random palette color and width, seeded with the
    /// first touch.
    pub fn start(&mut self, sample: TouchSample, pose: CameraPose) -> Stroke {
        let color = PINK_PALETTE
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(DEFAULT_STROKE_COLOR);
        let width = self.rng.random_range(MIN_STROKE_WIDTH..MAX_STROKE_WIDTH);
        let mut stroke = Stroke::new(color, width);
        stroke.points.push(self.project(sample, pose));
        debug!(color, width, "stroke started");
        stroke
    }

    /// Append a touch to `stroke` and re-render it once it forms a curve.
    pub fn extend(&mut self, stroke: &mut Stroke, sample: TouchSample, pose: CameraPose) {
        stroke.points.push(self.project(sample, pose));
        if stroke.is_curve() {
            self.render_curve(&stroke.points, &stroke.color, stroke.width);
        }
    }

    /// Freeze `stroke` for persistence, or discard it if it has fewer than two
    /// points.
    pub fn finish(&mut self, stroke: Stroke) -> Option<Stroke> {
        if !stroke.is_curve() {
            debug!(points = stroke.points.len(), "stroke discarded");
            return None;
        }
        self.render_curve(&stroke.points, &stroke.color, stroke.width);
        debug!(points = stroke.points.len(), "stroke finished");
        Some(stroke)
    }

    /// World-space point for a touch under the given camera pose.
    #[must_use]
    pub fn project(&self, sample: TouchSample, pose: CameraPose) -> Point3D {
        let (ndc_x, ndc_y) = sample.to_ndc(self.viewport);
        let position = DVec3::from(pose.position);
        let direction = DVec3::from(pose.direction);
        let point = position + direction * self.drawing_distance + DVec3::new(ndc_x, ndc_y, 0.0);
        point.into()
    }

    /// Build a tube through `points` and add it to the scene.
    ///
    /// Returns `false` without rendering for fewer than two points.
    pub fn render_curve(&mut self, points: &[Point3D], color: &str, width: f64) -> bool {
        let Some(geometry) = TubeGeometry::for_stroke(points, width) else {
            return false;
        };
        let material = StrokeMaterial::from_hex(color).unwrap_or_else(|e| {
            warn!(error = %e, fallback = DEFAULT_STROKE_COLOR, "unparseable stroke color");
            default_material()
        });
        self.renderer.add_mesh(MeshEntity { geometry, material });
        true
    }
}

/// Material for [`DEFAULT_STROKE_COLOR`].
fn default_material() -> StrokeMaterial {
    StrokeMaterial::from_rgb8([0xFF, 0x14, 0x93])
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
