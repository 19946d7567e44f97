use super::*;

fn zigzag(n: usize) -> Vec<Point3D> {
    (0..n)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let x = i as f64 * 0.1;
            let y = if i % 2 == 0 { 0.0 } else { 0.05 };
            Point3D::new(x, y, -1.0)
        })
        .collect()
}

#[test]
fn for_stroke_requires_two_points() {
    assert!(TubeGeometry::for_stroke(&[], 0.02).is_none());
    assert!(TubeGeometry::for_stroke(&[Point3D::new(0.0, 0.0, 0.0)], 0.02).is_none());
}

#[test]
fn tubular_segments_track_point_count() {
    for n in 2..12 {
        let tube = TubeGeometry::for_stroke(&zigzag(n), 0.02).unwrap();
        assert_eq!(tube.tubular_segments, n * 3);
        assert_eq!(tube.radial_segments, RADIAL_SEGMENTS);
    }
}

#[test]
fn vertex_and_index_counts_match_open_tube() {
    let tube = TubeGeometry::for_stroke(&zigzag(5), 0.02).unwrap();
    let segments = 15;
    assert_eq!(tube.vertex_count(), (segments + 1) * (RADIAL_SEGMENTS + 1));
    assert_eq!(tube.normals.len(), tube.vertex_count());
    assert_eq!(tube.uvs.len(), tube.vertex_count());
    assert_eq!(tube.triangle_count(), segments * RADIAL_SEGMENTS * 2);
}

#[test]
fn indices_stay_in_bounds() {
    let tube = TubeGeometry::for_stroke(&zigzag(7), 0.03).unwrap();
    let count = u32::try_from(tube.vertex_count()).unwrap();
    assert!(tube.indices.iter().all(|&i| i < count));
}

#[test]
fn first_ring_sits_at_radius_around_first_point() {
    let points = zigzag(4);
    let radius = 0.025;
    let tube = TubeGeometry::for_stroke(&points, radius).unwrap();
    let start = DVec3::from(points[0]);
    for vertex in &tube.positions[..=RADIAL_SEGMENTS] {
        let v = DVec3::new(f64::from(vertex[0]), f64::from(vertex[1]), f64::from(vertex[2]));
        assert!((v.distance(start) - radius).abs() < 1e-5, "vertex {v:?} off radius");
    }
}

#[test]
fn normals_are_unit_length() {
    let tube = TubeGeometry::for_stroke(&zigzag(6), 0.01).unwrap();
    for n in &tube.normals {
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        assert!((len - 1.0).abs() < 1e-4);
    }
}

#[test]
fn straight_stroke_along_z_still_builds_frames() {
    let points = vec![Point3D::new(0.0, 0.0, 0.0), Point3D::new(0.0, 0.0, 1.0)];
    let tube = TubeGeometry::for_stroke(&points, 0.02).unwrap();
    assert!(tube.positions.iter().flatten().all(|c| c.is_finite()));
}

#[test]
fn seam_vertex_duplicates_first_vertex_of_ring() {
    let tube = TubeGeometry::for_stroke(&zigzag(3), 0.02).unwrap();
    let first = tube.positions[0];
    let seam = tube.positions[RADIAL_SEGMENTS];
    for k in 0..3 {
        assert!((first[k] - seam[k]).abs() < 1e-6);
    }
}
