//! Mesh summary and reporting.

use tracing::{debug, info, warn};

use crate::bounds::BoundingVolume;
use crate::MeshBuffers;

/// Area below which a triangle is counted as degenerate.
const DEGENERATE_AREA: f32 = 1e-12;

/// Largest dimension below which a mesh is probably in the wrong units.
const TINY_MESH: f32 = 0.1;

/// Summary of a decoded mesh.
#[derive(Debug, Clone)]
pub struct MeshReport {
    /// Number of triangles.
    pub triangle_count: usize,

    /// Number of points in the position buffer.
    pub point_count: usize,

    /// Triangles with (near) zero area.
    pub degenerate_count: usize,

    /// Bounding volume, if the mesh is non-empty.
    pub bounds: Option<BoundingVolume>,
}

impl MeshReport {
    /// Check if there is anything to render.
    pub fn is_renderable(&self) -> bool {
        self.triangle_count > 0
    }

    /// Dimensions (x, y, z).
    pub fn dimensions(&self) -> Option<(f32, f32, f32)> {
        self.bounds.map(|b| {
            let s = b.size();
            (s.x, s.y, s.z)
        })
    }
}

impl std::fmt::Display for MeshReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Mesh Report:")?;
        writeln!(f, "  Triangles: {}", self.triangle_count)?;
        writeln!(f, "  Points: {}", self.point_count)?;

        if let Some(b) = &self.bounds {
            writeln!(
                f,
                "  Bounds: [{:.1}, {:.1}, {:.1}] to [{:.1}, {:.1}, {:.1}]",
                b.min.x, b.min.y, b.min.z, b.max.x, b.max.y, b.max.z
            )?;
        }

        if let Some((dx, dy, dz)) = self.dimensions() {
            writeln!(f, "  Dimensions: {:.1} x {:.1} x {:.1}", dx, dy, dz)?;
        }

        writeln!(f, "  Degenerate triangles: {}", self.degenerate_count)?;

        Ok(())
    }
}

/// Summarize a mesh.
pub fn report_mesh(buffers: &MeshBuffers) -> MeshReport {
    let degenerate_count = buffers
        .triangles()
        .filter(|t| t.is_degenerate(DEGENERATE_AREA))
        .count();

    let report = MeshReport {
        triangle_count: buffers.triangle_count(),
        point_count: buffers.point_count(),
        degenerate_count,
        bounds: BoundingVolume::from_points(&buffers.positions),
    };

    debug!("{}", report);

    report
}

/// Log a one-line summary plus any warnings.
pub fn log_report(report: &MeshReport) {
    match report.dimensions() {
        Some((dx, dy, dz)) => info!(
            "Mesh: {} triangles, {:.1}x{:.1}x{:.1}",
            report.triangle_count, dx, dy, dz
        ),
        None => warn!("Mesh is empty: nothing to render"),
    }

    if let Some(b) = &report.bounds {
        let max_dim = b.max_dimension();
        if max_dim < TINY_MESH {
            warn!("Mesh largest dimension is {:.6} - may need scaling", max_dim);
        }
    }

    if report.degenerate_count > 0 {
        warn!("{} degenerate triangles", report.degenerate_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn two_triangles() -> MeshBuffers {
        MeshBuffers::from_positions(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
        ])
    }

    #[test]
    fn test_report_counts() {
        let report = report_mesh(&two_triangles());
        assert!(report.is_renderable());
        assert_eq!(report.triangle_count, 2);
        assert_eq!(report.point_count, 6);
        assert_eq!(report.degenerate_count, 1);
        assert_eq!(report.dimensions(), Some((4.0, 2.0, 1.0)));
    }

    #[test]
    fn test_empty_report() {
        let report = report_mesh(&MeshBuffers::default());
        assert!(!report.is_renderable());
        assert!(report.bounds.is_none());
        log_report(&report);
    }

    #[test]
    fn test_report_display() {
        let output = format!("{}", report_mesh(&two_triangles()));
        assert!(output.contains("Triangles: 2"));
        assert!(output.contains("Dimensions: 4.0 x 2.0 x 1.0"));
        assert!(output.contains("Degenerate triangles: 1"));
    }
}
