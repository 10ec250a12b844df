use crate::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A ray in 3D space defined by origin and unit direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vector3,
}

impl Ray {
    pub fn new(origin: Point3, direction: Vector3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Build a ray, or `None` when `direction` has no usable length.
    pub fn try_new(origin: Point3, direction: Vector3) -> Option<Self> {
        direction
            .try_normalize()
            .map(|direction| Self { origin, direction })
    }

    /// Ray from `from` towards `to`, with the segment length.
    pub fn segment(from: Point3, to: Point3) -> Option<(Self, f64)> {
        let length = from.distance(to);
        Self::try_new(from, to - from).map(|ray| (ray, length))
    }

    /// Get a point along the ray at parameter t.
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }
}
