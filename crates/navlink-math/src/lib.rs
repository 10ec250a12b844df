pub mod aabb;
pub mod lerp;
pub mod orientation;
pub mod plane;
pub mod ray;
pub mod transform;
pub mod triangle;

pub use aabb::{Aabb3, AabbFaces};
pub use glam::{dvec3, DMat3, DMat4, DQuat, DVec3};
pub use lerp::lerp_by_distance;
pub use orientation::{facing_normal, forward, invert_about_up, look_rotation};
pub use plane::Plane;
pub use ray::Ray;
pub use transform::RigidTransform;
pub use triangle::closest_point_on_triangle;

pub type Point3 = DVec3;
pub type Vector3 = DVec3;
/// A rotation whose forward axis is local +Z and up axis is local +Y.
pub type Orientation = DQuat;

/// World up axis.
pub const UP: Vector3 = DVec3::Y;
