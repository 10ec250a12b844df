use crate::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Oriented plane through `origin`. Points on the side `normal` points to
/// have positive signed distance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Plane {
    pub origin: Point3,
    pub normal: Vector3,
}

impl Plane {
    pub fn new(origin: Point3, normal: Vector3) -> Self {
        Self {
            origin,
            normal: normal.normalize(),
        }
    }

    pub fn signed_distance(&self, point: Point3) -> f64 {
        (point - self.origin).dot(self.normal)
    }

    /// Unsigned distance, regardless of side.
    pub fn distance(&self, point: Point3) -> f64 {
        self.signed_distance(point).abs()
    }
}
