use crate::{Plane, Point3, Ray, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-aligned box: the baked volume, and the shape of box colliders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb3 {
    pub min: Point3,
    pub max: Point3,
}

/// The six face planes of an [`Aabb3`], normals pointing outward, as `[min, max]` pairs.
#[derive(Debug, Clone, Copy)]
pub struct AabbFaces {
    pub x: [Plane; 2],
    pub y: [Plane; 2],
    pub z: [Plane; 2],
}

impl AabbFaces {
    /// Smallest unsigned distance from `p` to either plane of the pair.
    pub fn nearest(pair: &[Plane; 2], p: Point3) -> f64 {
        pair[0].distance(p).min(pair[1].distance(p))
    }
}

impl Aabb3 {
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: &[Point3]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min = points[0];
        let mut max = points[0];
        for &p in &points[1..] {
            min = min.min(p);
            max = max.max(p);
        }
        Some(Self { min, max })
    }

    pub fn expand(&self, amount: f64) -> Self {
        let offset = Vector3::splat(amount);
        Self {
            min: self.min - offset,
            max: self.max + offset,
        }
    }

    /// Closest point inside (or on) the box to `p`.
    pub fn closest_point(&self, p: Point3) -> Point3 {
        p.clamp(self.min, self.max)
    }

    pub fn faces(&self) -> AabbFaces {
        AabbFaces {
            x: [
                Plane::new(self.min, Vector3::NEG_X),
                Plane::new(self.max, Vector3::X),
            ],
            y: [
                Plane::new(self.min, Vector3::NEG_Y),
                Plane::new(self.max, Vector3::Y),
            ],
            z: [
                Plane::new(self.min, Vector3::NEG_Z),
                Plane::new(self.max, Vector3::Z),
            ],
        }
    }

    /// Ray-box intersection (slab method) returning the entry distance.
    ///
    /// Rays starting inside the box report no hit. Hits beyond `max_distance`
    /// are rejected.
    pub fn ray_entry(&self, ray: &Ray, max_distance: f64) -> Option<f64> {
        let inv = ray.direction.recip();

        let t1 = (self.min - ray.origin) * inv;
        let t2 = (self.max - ray.origin) * inv;
        let t_near = t1.min(t2);
        let t_far = t1.max(t2);

        let tmin = t_near.max_element();
        let tmax = t_far.min_element();

        // NaN from 0 * inf when the origin sits on a slab of a parallel axis
        if tmin.is_nan() || tmax.is_nan() {
            return None;
        }

        if tmax >= tmin && tmin >= 0.0 && tmin <= max_distance {
            Some(tmin)
        } else {
            None
        }
    }
}
