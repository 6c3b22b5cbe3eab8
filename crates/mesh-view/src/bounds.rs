//! Axis-aligned bounding volume of a position buffer.

use nalgebra::{Point3, Vector3};

/// Axis-aligned box with `min <= max` on every axis.
///
/// Only constructible from a non-empty point set; an empty buffer has no
/// bounding volume (see [`BoundingVolume::from_points`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolume {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl BoundingVolume {
    /// Compute the bounds in one pass.
    /// Returns None if `points` is empty.
    pub fn from_points(points: &[Point3<f32>]) -> Option<Self> {
        let (first, rest) = points.split_first()?;

        let mut min = *first;
        let mut max = *first;

        for p in rest {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        Some(Self { min, max })
    }

    /// Extent along each axis (`max - min`).
    #[inline]
    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Midpoint of the box.
    #[inline]
    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Largest extent across the three axes.
    #[inline]
    pub fn max_dimension(&self) -> f32 {
        self.size().max()
    }

    /// Check whether a point lies inside or on the box.
    pub fn contains(&self, p: &Point3<f32>) -> bool {
        (0..3).all(|i| self.min[i] <= p[i] && p[i] <= self.max[i])
    }
}
