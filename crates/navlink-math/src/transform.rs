use crate::{DMat4, Orientation, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Rigid body transform (rotation + translation, no shear/scale).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidTransform {
    pub translation: Vector3,
    pub rotation: Orientation,
}

impl RigidTransform {
    pub fn identity() -> Self {
        Self::new(Vector3::ZERO, Orientation::IDENTITY)
    }

    pub fn new(translation: Vector3, rotation: Orientation) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    pub fn to_mat4(&self) -> DMat4 {
        DMat4::from_rotation_translation(self.rotation, self.translation)
    }

    /// Local to world.
    pub fn transform_point(&self, p: Point3) -> Point3 {
        self.rotation * p + self.translation
    }

    /// World to local.
    pub fn inverse_transform_point(&self, p: Point3) -> Point3 {
        self.rotation.inverse() * (p - self.translation)
    }

    pub fn inverse(&self) -> RigidTransform {
        let rotation = self.rotation.inverse();
        Self {
            translation: -(rotation * self.translation),
            rotation,
        }
    }
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}
