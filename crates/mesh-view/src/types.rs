//! Core mesh data types.

use nalgebra::{Point3, Vector3};

use crate::normals::compute_vertex_normals;

/// A triangle with concrete vertex positions.
///
/// Decoders produce these transiently; any normal stored in the file is
/// dropped before a `Triangle` exists. Winding is counter-clockwise when
/// viewed from the front (normal points toward viewer).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v0: Point3<f32>,
    pub v1: Point3<f32>,
    pub v2: Point3<f32>,
}

impl Triangle {
    /// Create a new triangle from three points.
    #[inline]
    pub fn new(v0: Point3<f32>, v1: Point3<f32>, v2: Point3<f32>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Create a triangle from nine raw coordinates.
    #[inline]
    pub fn from_coords(c: [f32; 9]) -> Self {
        Self::new(
            Point3::new(c[0], c[1], c[2]),
            Point3::new(c[3], c[4], c[5]),
            Point3::new(c[6], c[7], c[8]),
        )
    }

    /// Compute the (unnormalized) face normal via cross product.
    /// The direction follows the right-hand rule with CCW winding.
    #[inline]
    pub fn normal_unnormalized(&self) -> Vector3<f32> {
        let e1 = self.v1 - self.v0;
        let e2 = self.v2 - self.v0;
        e1.cross(&e2)
    }

    /// Compute the unit face normal.
    /// Returns None for degenerate triangles (zero area).
    pub fn normal(&self) -> Option<Vector3<f32>> {
        let n = self.normal_unnormalized();
        let len_sq = n.norm_squared();
        if len_sq > f32::MIN_POSITIVE && len_sq.is_finite() {
            Some(n / len_sq.sqrt())
        } else {
            None
        }
    }

    /// Compute the area of the triangle.
    #[inline]
    pub fn area(&self) -> f32 {
        self.normal_unnormalized().norm() * 0.5
    }

    /// Check if the triangle is degenerate (zero or near-zero area).
    pub fn is_degenerate(&self, epsilon: f32) -> bool {
        self.area() < epsilon
    }
}

/// Decoded, render-ready triangle soup.
///
/// `positions` holds three points per triangle in file order; `normals` is
/// index-aligned with it. Normals are always synthesized from geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    /// Triangle corners, `v0, v1, v2` per triangle.
    pub positions: Vec<Point3<f32>>,

    /// Unit (or zero, for isolated degenerate corners) per-vertex normals.
    pub normals: Vec<Vector3<f32>>,
}

impl MeshBuffers {
    /// Build buffers from a position list, synthesizing smooth normals.
    ///
    /// Any trailing points that do not form a whole triangle are dropped.
    pub fn from_positions(mut positions: Vec<Point3<f32>>) -> Self {
        positions.truncate(positions.len() - positions.len() % 3);
        let normals = compute_vertex_normals(&positions);
        Self { positions, normals }
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of points in the position buffer.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.positions.len()
    }

    /// Check if there is nothing to render.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate over triangles in buffer order.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.positions
            .chunks_exact(3)
            .map(|c| Triangle::new(c[0], c[1], c[2]))
    }

    /// Positions as a flat `[x, y, z, x, y, z, ...]` array.
    pub fn positions_flat(&self) -> Vec<f32> {
        self.positions
            .iter()
            .flat_map(|p| [p.x, p.y, p.z])
            .collect()
    }

    /// Normals as a flat `[x, y, z, x, y, z, ...]` array.
    pub fn normals_flat(&self) -> Vec<f32> {
        self.normals.iter().flat_map(|n| [n.x, n.y, n.z]).collect()
    }

    /// Translate every position by the given vector. Normals are unchanged.
    pub fn translate(&mut self, offset: Vector3<f32>) {
        for p in &mut self.positions {
            *p += offset;
        }
    }

    /// Return a copy moved so its bounding-volume center is at the origin.
    pub fn recentered(&self) -> Self {
        let mut out = self.clone();
        if let Some(bounds) = self.bounds() {
            out.translate(-bounds.center().coords);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_triangle_normal() {
        let tri = Triangle::from_coords([0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);

        let normal = tri.normal().expect("non-degenerate triangle");
        assert!(approx_eq(normal.x, 0.0));
        assert!(approx_eq(normal.y, 0.0));
        assert!(approx_eq(normal.z, 1.0));
        assert!(approx_eq(tri.area(), 0.5));
    }

    #[test]
    fn test_degenerate_triangle_normal() {
        let tri = Triangle::from_coords([0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 2.0, 0.0, 0.0]);
        assert!(tri.normal().is_none());
        assert!(tri.is_degenerate(1e-9));
    }

    #[test]
    fn test_buffers_drop_partial_triangle() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(5.0, 5.0, 5.0),
        ];
        let buffers = MeshBuffers::from_positions(positions);
        assert_eq!(buffers.triangle_count(), 1);
        assert_eq!(buffers.point_count(), 3);
        assert_eq!(buffers.normals.len(), 3);
    }

    #[test]
    fn test_flat_layout() {
        let buffers = MeshBuffers::from_positions(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);
        assert_eq!(
            buffers.positions_flat(),
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
        );
        assert_eq!(
            buffers.normals_flat(),
            vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn test_recentered() {
        let buffers = MeshBuffers::from_positions(vec![
            Point3::new(10.0, 0.0, 2.0),
            Point3::new(12.0, 0.0, 2.0),
            Point3::new(10.0, 4.0, 2.0),
        ]);
        let centered = buffers.recentered();
        assert_eq!(centered.positions[0], Point3::new(-1.0, -2.0, 0.0));
        assert_eq!(centered.positions[1], Point3::new(1.0, -2.0, 0.0));
        assert_eq!(centered.positions[2], Point3::new(-1.0, 2.0, 0.0));
        assert_eq!(centered.normals, buffers.normals);
    }

    #[test]
    fn test_empty_buffers() {
        let buffers = MeshBuffers::from_positions(Vec::new());
        assert!(buffers.is_empty());
        assert_eq!(buffers.triangles().count(), 0);
        assert!(buffers.recentered().is_empty());
    }
}
