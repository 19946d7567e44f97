//! Tube surface swept along a stroke curve.
//!
//! DESIGN
//! ======
//! Rings of `radial_segments + 1` vertices are placed at
//! `tubular_segments + 1` arc-length-uniform stations. Each ring is oriented
//! by a frame carried along the curve with minimal twist: the previous normal
//! is rotated by the angle between consecutive tangents. The seam vertex is
//! duplicated so UVs wrap cleanly; the ends stay open.

use std::f64::consts::TAU;

use glam::{DQuat, DVec3};

use super::Point3D;
use super::curve::CatmullRomCurve;

/// Cross-section resolution used for every stroke.
pub const RADIAL_SEGMENTS: usize = 8;

/// Tubular segments allotted per stroke point.
pub const SEGMENTS_PER_POINT: usize = 3;

const FRAME_EPSILON: f64 = 1e-10;

/// Indexed triangle mesh of an open tube.
#[derive(Debug, Clone, PartialEq)]
pub struct TubeGeometry {
    pub tubular_segments: usize,
    pub radial_segments: usize,
    pub radius: f64,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl TubeGeometry {
    /// Tube for a stroke: `points.len() * 3` segments around a Catmull-Rom fit.
    ///
    /// Returns `None` for fewer than 2 points.
    #[must_use]
    pub fn for_stroke(points: &[Point3D], radius: f64) -> Option<Self> {
        let curve = CatmullRomCurve::new(points.iter().copied().map(DVec3::from).collect())?;
        Some(Self::sweep(&curve, points.len() * SEGMENTS_PER_POINT, radius, RADIAL_SEGMENTS))
    }

    /// Sweep a circle of `radius` along `curve`.
    #[must_use]
    pub fn sweep(curve: &CatmullRomCurve, tubular_segments: usize, radius: f64, radial_segments: usize) -> Self {
        let tubular_segments = tubular_segments.max(1);
        let radial_segments = radial_segments.max(3);
        let frames = Frames::along(curve, tubular_segments);

        let ring = radial_segments + 1;
        let vertex_count = (tubular_segments + 1) * ring;
        let mut positions = Vec::with_capacity(vertex_count);
        let mut normals = Vec::with_capacity(vertex_count);
        let mut uvs = Vec::with_capacity(vertex_count);

        for i in 0..=tubular_segments {
            #[allow(clippy::cast_precision_loss)]
            let u = i as f64 / tubular_segments as f64;
            let center = curve.point_at(u);
            let n = frames.normals[i];
            let b = frames.binormals[i];

            for j in 0..=radial_segments {
                #[allow(clippy::cast_precision_loss)]
                let v = j as f64 / radial_segments as f64 * TAU;
                let normal = (-v.cos() * n + v.sin() * b).normalize_or_zero();
                positions.push(to_f32(center + radius * normal));
                normals.push(to_f32(normal));
                #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
                uvs.push([u as f32, (j as f64 / radial_segments as f64) as f32]);
            }
        }

        let mut indices = Vec::with_capacity(tubular_segments * radial_segments * 6);
        for j in 1..=tubular_segments {
            for i in 1..=radial_segments {
                let a = index(ring * (j - 1) + (i - 1));
                let b = index(ring * j + (i - 1));
                let c = index(ring * j + i);
                let d = index(ring * (j - 1) + i);
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self { tubular_segments, radial_segments, radius, positions, normals, uvs, indices }
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

// =============================================================================
// FRAMES
// =============================================================================

struct Frames {
    normals: Vec<DVec3>,
    binormals: Vec<DVec3>,
}

impl Frames {
    fn along(curve: &CatmullRomCurve, segments: usize) -> Self {
        let tangents: Vec<DVec3> = (0..=segments)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let u = i as f64 / segments as f64;
                curve.tangent_at(u)
            })
            .collect();

        let mut normals = Vec::with_capacity(tangents.len());
        let mut binormals = Vec::with_capacity(tangents.len());

        let first = tangents[0];
        let seed = least_aligned_axis(first);
        let side = first.cross(seed).normalize_or_zero();
        let normal = first.cross(side);
        normals.push(normal);
        binormals.push(first.cross(normal));

        for i in 1..tangents.len() {
            let mut normal = normals[i - 1];
            let axis = tangents[i - 1].cross(tangents[i]);
            if axis.length() > FRAME_EPSILON {
                let theta = tangents[i - 1].dot(tangents[i]).clamp(-1.0, 1.0).acos();
                normal = DQuat::from_axis_angle(axis.normalize(), theta) * normal;
            }
            normals.push(normal);
            binormals.push(tangents[i].cross(normal));
        }

        Self { normals, binormals }
    }
}

/// Unit axis along the tangent's smallest component.
fn least_aligned_axis(tangent: DVec3) -> DVec3 {
    let abs = tangent.abs();
    let mut min = f64::MAX;
    let mut axis = DVec3::Z;
    if abs.x <= min {
        min = abs.x;
        axis = DVec3::X;
    }
    if abs.y <= min {
        min = abs.y;
        axis = DVec3::Y;
    }
    if abs.z <= min {
        axis = DVec3::Z;
    }
    axis
}

#[allow(clippy::cast_possible_truncation)]
fn to_f32(v: DVec3) -> [f32; 3] {
    [v.x as f32, v.y as f32, v.z as f32]
}

#[allow(clippy::cast_possible_truncation)]
fn index(i: usize) -> u32 {
    i as u32
}

#[cfg(test)]
#[path = "tube_test.rs"]
mod tests;
