//! The navigation surface a bake reads from.

use std::collections::HashMap;

use navlink_core::{AgentTypeId, Result};
use navlink_edges::Triangulation;
use navlink_math::{Aabb3, Point3};
use navlink_placer::{AreaMask, LayerMask, NavMeshQuery};
use serde::{Deserialize, Serialize};

/// Physical size of an agent type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub agent_radius: f64,
}

/// Source of the walkable triangulation and its sampling query.
pub trait SurfaceProvider: NavMeshQuery {
    /// Current triangulation of the walkable surface.
    fn triangulation(&self) -> Triangulation;

    /// Volume the surface was built in.
    fn bounds(&self) -> Aabb3;

    /// Agent type the surface is built for.
    fn agent_type_id(&self) -> AgentTypeId;

    fn agent_profile(&self, id: AgentTypeId) -> Option<AgentProfile>;

    /// Collision layers the surface was built from.
    fn layer_mask(&self) -> LayerMask {
        LayerMask::ALL
    }

    /// Rebuild the surface from its spatial input. Runs before a scheduled bake.
    fn rebuild(&mut self) -> Result<()> {
        Ok(())
    }

    /// Flag the owning scene as modified after a bake.
    fn mark_dirty(&mut self) {}
}

/// Fixed triangulation held in memory.
///
/// Bounds are given explicitly or fitted with a margin. The triangulation's
/// exact bounding box would put its highest and lowest vertices on the volume
/// faces, where the extractor discards them.
#[derive(Debug, Clone)]
pub struct StaticSurface {
    triangulation: Triangulation,
    staged: Option<Triangulation>,
    bounds: Aabb3,
    agent_type_id: AgentTypeId,
    profiles: HashMap<AgentTypeId, AgentProfile>,
    area: u32,
    layers: LayerMask,
    rebuilds: usize,
    dirty: bool,
}

impl StaticSurface {
    /// Surface for agent type 0 with a 0.5 radius.
    pub fn new(triangulation: Triangulation, bounds: Aabb3) -> Self {
        let agent_type_id = AgentTypeId::default();
        let mut profiles = HashMap::new();
        profiles.insert(agent_type_id, AgentProfile { agent_radius: 0.5 });
        Self {
            triangulation,
            staged: None,
            bounds,
            agent_type_id,
            profiles,
            area: 0,
            layers: LayerMask::ALL,
            rebuilds: 0,
            dirty: false,
        }
    }

    /// Surface bounded by its own bounding box grown by `margin` on every side.
    pub fn fitted(triangulation: Triangulation, margin: f64) -> Self {
        let bounds = triangulation.bounding_box().expand(margin);
        Self::new(triangulation, bounds)
    }

    /// Select the agent type and register its profile.
    pub fn with_agent(mut self, id: AgentTypeId, profile: AgentProfile) -> Self {
        self.agent_type_id = id;
        self.profiles.insert(id, profile);
        self
    }

    /// Select an agent type without registering a profile for it.
    pub fn with_agent_type(mut self, id: AgentTypeId) -> Self {
        self.agent_type_id = id;
        self
    }

    pub fn with_area(mut self, area: u32) -> Self {
        self.area = area;
        self
    }

    pub fn with_layers(mut self, layers: LayerMask) -> Self {
        self.layers = layers;
        self
    }

    /// Replace the triangulation at the next [`SurfaceProvider::rebuild`].
    pub fn stage(&mut self, triangulation: Triangulation) {
        self.staged = Some(triangulation);
    }

    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl NavMeshQuery for StaticSurface {
    fn sample_nearest_point(
        &self,
        point: Point3,
        max_radius: f64,
        areas: AreaMask,
    ) -> Option<Point3> {
        if !areas.contains_area(self.area) {
            return None;
        }
        self.triangulation.nearest_point(point, max_radius)
    }
}

impl SurfaceProvider for StaticSurface {
    fn triangulation(&self) -> Triangulation {
        self.triangulation.clone()
    }

    fn bounds(&self) -> Aabb3 {
        self.bounds
    }

    fn agent_type_id(&self) -> AgentTypeId {
        self.agent_type_id
    }

    fn agent_profile(&self, id: AgentTypeId) -> Option<AgentProfile> {
        self.profiles.get(&id).copied()
    }

    fn layer_mask(&self) -> LayerMask {
        self.layers
    }

    fn rebuild(&mut self) -> Result<()> {
        if let Some(staged) = self.staged.take() {
            self.triangulation = staged;
        }
        self.rebuilds += 1;
        Ok(())
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
