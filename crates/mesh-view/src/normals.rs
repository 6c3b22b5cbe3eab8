//! Smooth per-vertex normal synthesis for triangle soups.

use hashbrown::HashMap;
use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::Triangle;

/// Hashable identity of a vertex position.
///
/// Exact bit pattern of each coordinate, with `-0.0` folded into `+0.0` so
/// that corners written either way are treated as the same point.
fn position_key(p: &Point3<f32>) -> [u32; 3] {
    [
        (p.x + 0.0).to_bits(),
        (p.y + 0.0).to_bits(),
        (p.z + 0.0).to_bits(),
    ]
}

/// Compute one normal per entry of a triangle-soup position buffer.
///
/// Each triangle contributes its unit face normal to every corner position it
/// touches; corners that share a position (across triangles) share the summed
/// normal, which is then renormalized. Degenerate triangles contribute zero,
/// and a corner whose sum has zero length keeps a zero normal.
///
/// `positions.len()` must be a multiple of three; trailing points are given
/// zero normals.
pub fn compute_vertex_normals(positions: &[Point3<f32>]) -> Vec<Vector3<f32>> {
    let mut normal_accum: HashMap<[u32; 3], Vector3<f32>> =
        HashMap::with_capacity(positions.len() / 2);

    let mut degenerate = 0usize;
    for corners in positions.chunks_exact(3) {
        let tri = Triangle::new(corners[0], corners[1], corners[2]);
        let face_normal = match tri.normal() {
            Some(n) => n,
            None => {
                degenerate += 1;
                Vector3::zeros()
            }
        };

        for p in corners {
            *normal_accum
                .entry(position_key(p))
                .or_insert_with(Vector3::zeros) += face_normal;
        }
    }

    // Normalize once per shared position
    for accum in normal_accum.values_mut() {
        let len_sq = accum.norm_squared();
        if len_sq > f32::MIN_POSITIVE && len_sq.is_finite() {
            *accum /= len_sq.sqrt();
        } else {
            *accum = Vector3::zeros();
        }
    }

    let whole = positions.len() - positions.len() % 3;
    let normals: Vec<Vector3<f32>> = positions
        .iter()
        .enumerate()
        .map(|(i, p)| {
            if i < whole {
                normal_accum
                    .get(&position_key(p))
                    .copied()
                    .unwrap_or_else(Vector3::zeros)
            } else {
                Vector3::zeros()
            }
        })
        .collect();

    debug!(
        "Computed normals for {} points ({} shared positions, {} degenerate triangles)",
        positions.len(),
        normal_accum.len(),
        degenerate
    );

    normals
}
