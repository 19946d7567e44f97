//! Centripetal Catmull-Rom spline through stroke points.
//!
//! DESIGN
//! ======
//! The curve interpolates every control point. The parameter `t` is uniform
//! per control segment; `point_at`/`tangent_at` remap an arc-length fraction
//! `u` onto `t` through a sampled length table so tube rings end up evenly
//! spaced along the stroke regardless of how fast the finger moved.

use glam::DVec3;

/// Samples used to build the arc-length table.
pub const ARC_LENGTH_DIVISIONS: usize = 200;

const TANGENT_DELTA: f64 = 0.0001;
const MIN_KNOT_INTERVAL: f64 = 1e-4;

pub struct CatmullRomCurve {
    points: Vec<DVec3>,
    /// Cumulative chord length at `ARC_LENGTH_DIVISIONS + 1` uniform samples.
    lengths: Vec<f64>,
}

impl CatmullRomCurve {
    /// Build a curve through `points`. Returns `None` for fewer than 2 points.
    #[must_use]
    pub fn new(points: Vec<DVec3>) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let mut curve = Self { points, lengths: Vec::new() };
        curve.lengths = curve.sample_lengths(ARC_LENGTH_DIVISIONS);
        Some(curve)
    }

    #[must_use]
    pub fn control_points(&self) -> &[DVec3] {
        &self.points
    }

    /// Total arc length, approximated by the length table.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Point at uniform parameter `t ∈ [0, 1]`.
    #[must_use]
    pub fn point(&self, t: f64) -> DVec3 {
        let n = self.points.len();
        #[allow(clippy::cast_precision_loss)]
        let p = (n - 1) as f64 * t.clamp(0.0, 1.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let mut segment = p.floor() as usize;
        #[allow(clippy::cast_precision_loss)]
        let mut weight = p - segment as f64;

        // EDGE: t == 1 lands past the last segment; evaluate its far end instead.
        if segment >= n - 1 {
            segment = n - 2;
            weight = 1.0;
        }

        let p1 = self.points[segment];
        let p2 = self.points[segment + 1];
        let p0 = if segment > 0 { self.points[segment - 1] } else { p1 + (p1 - p2) };
        let p3 = if segment + 2 < n { self.points[segment + 2] } else { p2 + (p2 - p1) };

        let mut dt0 = p0.distance_squared(p1).powf(0.25);
        let mut dt1 = p1.distance_squared(p2).powf(0.25);
        let mut dt2 = p2.distance_squared(p3).powf(0.25);

        // Coincident points would divide by zero below.
        if dt1 < MIN_KNOT_INTERVAL {
            dt1 = 1.0;
        }
        if dt0 < MIN_KNOT_INTERVAL {
            dt0 = dt1;
        }
        if dt2 < MIN_KNOT_INTERVAL {
            dt2 = dt1;
        }

        let t1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
        let t2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;

        hermite(p1, p2, t1, t2, weight)
    }

    /// Point at arc-length fraction `u ∈ [0, 1]`.
    #[must_use]
    pub fn point_at(&self, u: f64) -> DVec3 {
        self.point(self.u_to_t(u))
    }

    /// Unit tangent at arc-length fraction `u ∈ [0, 1]`.
    ///
    /// Falls back to +Z when the curve is degenerate at `u`.
    #[must_use]
    pub fn tangent_at(&self, u: f64) -> DVec3 {
        let t = self.u_to_t(u);
        let t1 = (t - TANGENT_DELTA).max(0.0);
        let t2 = (t + TANGENT_DELTA).min(1.0);
        let tangent = (self.point(t2) - self.point(t1)).normalize_or_zero();
        if tangent == DVec3::ZERO { DVec3::Z } else { tangent }
    }

    /// Map an arc-length fraction onto the uniform curve parameter.
    #[must_use]
    pub fn u_to_t(&self, u: f64) -> f64 {
        let total = self.length();
        let last = self.lengths.len() - 1;
        if total <= 0.0 {
            return u.clamp(0.0, 1.0);
        }

        let target = u.clamp(0.0, 1.0) * total;
        // Largest index whose cumulative length is <= target.
        let i = self
            .lengths
            .partition_point(|&len| len <= target)
            .saturating_sub(1)
            .min(last);

        #[allow(clippy::cast_precision_loss)]
        let last_f = last as f64;
        #[allow(clippy::cast_precision_loss)]
        let i_f = i as f64;

        if i == last || (self.lengths[i] - target).abs() < f64::EPSILON {
            return i_f / last_f;
        }

        let before = self.lengths[i];
        let segment_length = self.lengths[i + 1] - before;
        let fraction = if segment_length > 0.0 { (target - before) / segment_length } else { 0.0 };
        (i_f + fraction) / last_f
    }

    fn sample_lengths(&self, divisions: usize) -> Vec<f64> {
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut sum = 0.0;
        let mut last = self.point(0.0);
        lengths.push(0.0);
        for d in 1..=divisions {
            #[allow(clippy::cast_precision_loss)]
            let current = self.point(d as f64 / divisions as f64);
            sum += current.distance(last);
            lengths.push(sum);
            last = current;
        }
        lengths
    }
}

fn hermite(p1: DVec3, p2: DVec3, t1: DVec3, t2: DVec3, w: f64) -> DVec3 {
    let c0 = p1;
    let c1 = t1;
    let c2 = -3.0 * p1 + 3.0 * p2 - 2.0 * t1 - t2;
    let c3 = 2.0 * p1 - 2.0 * p2 + t1 + t2;
    c0 + c1 * w + c2 * (w * w) + c3 * (w * w * w)
}
