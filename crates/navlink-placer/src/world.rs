//! Query interfaces the placer runs its probes against.

use navlink_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Bit set of collision layers a query considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const ALL: Self = Self(u32::MAX);
    pub const NONE: Self = Self(0);

    /// Mask holding only layer `index`. Out-of-range layers give [`Self::NONE`].
    pub fn layer(index: u32) -> Self {
        1u32.checked_shl(index).map_or(Self::NONE, Self)
    }

    pub fn contains_layer(self, index: u32) -> bool {
        index < 32 && self.0 & (1 << index) != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Bit set of navigation areas a sample may land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AreaMask(pub u32);

impl AreaMask {
    pub const ALL: Self = Self(u32::MAX);

    pub fn contains_area(self, area: u32) -> bool {
        area < 32 && self.0 & (1 << area) != 0
    }
}

impl Default for AreaMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Whether trigger volumes take part in a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TriggerInteraction {
    #[default]
    Ignore,
    Collide,
}

/// Filter shared by all collision queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryFilter {
    pub layers: LayerMask,
    pub triggers: TriggerInteraction,
}

impl QueryFilter {
    /// Solid geometry on `layers`, triggers ignored.
    pub fn solid(layers: LayerMask) -> Self {
        Self {
            layers,
            triggers: TriggerInteraction::Ignore,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub point: Point3,
    pub distance: f64,
}

/// Physical collision world.
pub trait CollisionWorld {
    /// First hit along the segment `from -> to`.
    fn line_intersect(&self, from: Point3, to: Point3, filter: QueryFilter) -> Option<RaycastHit>;

    /// True if anything is hit within `max_distance` along `direction`.
    fn ray_intersect(
        &self,
        from: Point3,
        direction: Vector3,
        max_distance: f64,
        filter: QueryFilter,
    ) -> bool;

    /// First contact of a sphere of `radius` swept along `direction`.
    fn sphere_cast(
        &self,
        from: Point3,
        radius: f64,
        direction: Vector3,
        max_distance: f64,
        filter: QueryFilter,
    ) -> Option<RaycastHit>;
}

/// Spatial sampling on the navigation surface.
pub trait NavMeshQuery {
    /// Nearest walkable point within `max_radius` of `point`.
    fn sample_nearest_point(
        &self,
        point: Point3,
        max_radius: f64,
        areas: AreaMask,
    ) -> Option<Point3>;
}
