//! In-memory collision world made of axis-aligned boxes.
//!
//! Queries starting inside a box do not report that box, matching how engine
//! ray casts treat back faces. Sphere casts sweep against the box grown by the
//! sphere radius, so rounded corners are approximated by square ones.

use navlink_math::{Aabb3, Point3, Ray, Vector3};
use serde::{Deserialize, Serialize};

use crate::world::{CollisionWorld, QueryFilter, RaycastHit, TriggerInteraction};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoxCollider {
    pub bounds: Aabb3,
    /// Layer index in `0..32`.
    pub layer: u32,
    pub is_trigger: bool,
}

impl BoxCollider {
    pub fn solid(bounds: Aabb3) -> Self {
        Self {
            bounds,
            layer: 0,
            is_trigger: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoxWorld {
    pub colliders: Vec<BoxCollider>,
}

impl BoxWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, collider: BoxCollider) -> &mut Self {
        self.colliders.push(collider);
        self
    }

    /// Add a solid box on layer 0.
    pub fn add_box(&mut self, min: Point3, max: Point3) -> &mut Self {
        self.add(BoxCollider::solid(Aabb3::new(min, max)))
    }

    fn candidates(&self, filter: QueryFilter) -> impl Iterator<Item = &BoxCollider> + '_ {
        self.colliders.iter().filter(move |c| {
            filter.layers.contains_layer(c.layer)
                && !(c.is_trigger && filter.triggers == TriggerInteraction::Ignore)
        })
    }

    fn first_entry(
        &self,
        ray: &Ray,
        max_distance: f64,
        grow: f64,
        filter: QueryFilter,
    ) -> Option<(f64, &BoxCollider)> {
        self.candidates(filter)
            .filter_map(|c| {
                let bounds = if grow > 0.0 {
                    c.bounds.expand(grow)
                } else {
                    c.bounds
                };
                bounds.ray_entry(ray, max_distance).map(|t| (t, c))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
    }
}

impl CollisionWorld for BoxWorld {
    fn line_intersect(&self, from: Point3, to: Point3, filter: QueryFilter) -> Option<RaycastHit> {
        let (ray, length) = Ray::segment(from, to)?;
        self.first_entry(&ray, length, 0.0, filter)
            .map(|(t, _)| RaycastHit {
                point: ray.at(t),
                distance: t,
            })
    }

    fn ray_intersect(
        &self,
        from: Point3,
        direction: Vector3,
        max_distance: f64,
        filter: QueryFilter,
    ) -> bool {
        Ray::try_new(from, direction)
            .and_then(|ray| self.first_entry(&ray, max_distance, 0.0, filter))
            .is_some()
    }

    fn sphere_cast(
        &self,
        from: Point3,
        radius: f64,
        direction: Vector3,
        max_distance: f64,
        filter: QueryFilter,
    ) -> Option<RaycastHit> {
        let ray = Ray::try_new(from, direction)?;
        self.first_entry(&ray, max_distance, radius, filter)
            .map(|(t, collider)| RaycastHit {
                point: collider.bounds.closest_point(ray.at(t)),
                distance: t,
            })
    }
}
