//! Link placement along boundary edges.
//!
//! Each edge is split into `floor(length / link_width)` segments and one
//! sample point is taken at the centre of each. At every sample the requested
//! probes run independently; each may spawn at most one connector.
//!
//! Both probes start from the same short segment: from the sample pushed out
//! by two agent radii along the facing normal, down past the maximum jump
//! height and nudged a little further out.

use navlink_core::{AgentTypeId, LinkDirection, LinkerConfig, Result};
use navlink_edges::MeshEdge;
use navlink_math::{forward, lerp_by_distance, Orientation, Point3, RigidTransform, Vector3};
use tracing::{debug, trace};

use crate::connector::{Connector, ConnectorHost, LinkKind};
use crate::world::{AreaMask, CollisionWorld, LayerMask, NavMeshQuery, QueryFilter};

/// Upper bound on samples per edge.
pub const MAX_LINKS_PER_EDGE: usize = 10_000;

/// How far below the probe start the vertical line cast begins.
const VERTICAL_RAY_DROP: f64 = 0.075;
/// Connectors are spawned this far back from the sample, towards the surface.
const SPAWN_PULL_BACK: f64 = 0.02;
/// The probe segment reaches this multiple of `max_jump_height` down.
const JUMP_HEIGHT_REACH: f64 = 1.1;
/// Distance a sphere-cast hit is pushed towards the probe end before sampling.
const HIT_NUDGE: f64 = 0.2;
/// Search radius when snapping a landing point onto the navigation surface.
const SAMPLE_RADIUS: f64 = 1.0;

/// Number of samples taken along an edge of `length`.
pub fn link_count(length: f64, link_width: f64) -> usize {
    if !(link_width > 0.0) || !length.is_finite() {
        return 0;
    }
    (length / link_width)
        .floor()
        .clamp(0.0, MAX_LINKS_PER_EDGE as f64) as usize
}

/// Sample points along `edge`, centred in each `link_width` segment.
pub fn sample_points(edge: &MeshEdge, link_width: f64) -> impl Iterator<Item = Point3> + '_ {
    let count = link_count(edge.length, link_width);
    (0..count).map(move |i| edge.point_at((i as f64 + 0.5) / count as f64))
}

/// Per-bake values the probes need from the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeContext {
    pub agent_radius: f64,
    pub layers: LayerMask,
    pub agent_type_id: AgentTypeId,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlacementStats {
    pub edges: usize,
    pub samples: usize,
    pub vertical: usize,
    pub horizontal: usize,
}

impl PlacementStats {
    /// Connectors spawned.
    pub fn total(&self) -> usize {
        self.vertical + self.horizontal
    }
}

pub struct LinkPlacer<'a, W: ?Sized, N: ?Sized> {
    config: &'a LinkerConfig,
    context: ProbeContext,
    world: &'a W,
    navmesh: &'a N,
}

impl<'a, W, N> LinkPlacer<'a, W, N>
where
    W: CollisionWorld + ?Sized,
    N: NavMeshQuery + ?Sized,
{
    pub fn new(
        config: &'a LinkerConfig,
        context: ProbeContext,
        world: &'a W,
        navmesh: &'a N,
    ) -> Self {
        Self {
            config,
            context,
            world,
            navmesh,
        }
    }

    fn filter(&self) -> QueryFilter {
        QueryFilter::solid(self.context.layers)
    }

    /// Run the probes for `direction` at every sample of every edge.
    ///
    /// Spawn failures from `host` abort placement; connectors already spawned
    /// stay in the host for the caller to clean up.
    pub fn place_links<H>(
        &self,
        edges: &[MeshEdge],
        direction: LinkDirection,
        host: &mut H,
    ) -> Result<PlacementStats>
    where
        H: ConnectorHost + ?Sized,
    {
        let mut stats = PlacementStats::default();

        for edge in edges {
            stats.edges += 1;
            for position in sample_points(edge, self.config.link_width) {
                stats.samples += 1;

                if direction.runs_horizontal() {
                    if let Some(connector) = self.try_horizontal(position, edge.facing_normal) {
                        host.spawn_connector(connector)?;
                        stats.horizontal += 1;
                    }
                }
                if direction.runs_vertical() {
                    if let Some(connector) = self.try_vertical(position, edge.facing_normal) {
                        host.spawn_connector(connector)?;
                        stats.vertical += 1;
                    }
                }
            }
        }

        debug!(
            edges = stats.edges,
            samples = stats.samples,
            vertical = stats.vertical,
            horizontal = stats.horizontal,
            "Placed links"
        );

        Ok(stats)
    }

    /// Start and end of the probe segment for a sample.
    pub fn probe_segment(&self, position: Point3, normal: Orientation) -> (Point3, Point3) {
        let out = forward(normal);
        let start = position + out * self.context.agent_radius * 2.0;
        let end = start - Vector3::Y * self.config.max_jump_height * JUMP_HEIGHT_REACH
            + out * self.config.jump_dist_vertical;
        (start, end)
    }

    fn spawn_position(position: Point3, normal: Orientation) -> Point3 {
        position - forward(normal) * SPAWN_PULL_BACK
    }

    /// Probe for a drop down from the edge.
    pub fn try_vertical(&self, position: Point3, normal: Orientation) -> Option<Connector> {
        let (start, end) = self.probe_segment(position, normal);
        let ray_start = start - Vector3::new(0.0, VERTICAL_RAY_DROP, 0.0);

        let hit = self.world.line_intersect(ray_start, end, self.filter())?;
        let landing = self
            .navmesh
            .sample_nearest_point(hit.point, SAMPLE_RADIUS, AreaMask::ALL)?;

        if position.distance(landing) <= self.config.min_jump_height {
            return None;
        }

        let spawn = Self::spawn_position(position, normal);
        if spawn.y - landing.y <= self.config.min_jump_height {
            return None;
        }

        Some(self.connector(
            LinkKind::Vertical,
            spawn,
            normal,
            landing,
            self.config.link_bidirectional,
        ))
    }

    /// Probe for a jump across a gap away from the edge.
    pub fn try_horizontal(&self, position: Point3, normal: Orientation) -> Option<Connector> {
        let config = self.config;
        let filter = self.filter();
        let (start, end) = self.probe_segment(position, normal);
        let direction = end - start;

        let check_origin = position + Vector3::new(0.0, config.obstacle_check_y_offset, 0.0);
        if self.world.ray_intersect(
            check_origin,
            direction,
            config.max_jump_dist_horizontal / 2.0,
            filter,
        ) {
            return None;
        }

        // Cast back towards the edge in case the first ray started inside geometry
        let reverse_origin = check_origin + direction;
        if self.world.ray_intersect(
            reverse_origin,
            -direction,
            config.max_jump_dist_horizontal + 1.0,
            filter,
        ) {
            return None;
        }

        let offset_start = lerp_by_distance(start, end, config.link_start_point_offset);
        let hit = self.world.sphere_cast(
            offset_start,
            config.sphere_cast_radius,
            direction,
            config.max_jump_dist_horizontal,
            filter,
        )?;

        let nudged = lerp_by_distance(hit.point, end, HIT_NUDGE);
        let landing = self
            .navmesh
            .sample_nearest_point(nudged, SAMPLE_RADIUS, AreaMask::ALL)?;

        if position.distance(landing) <= config.horizontal_min_link_distance {
            return None;
        }

        Some(self.connector(
            LinkKind::Horizontal,
            Self::spawn_position(position, normal),
            normal,
            landing,
            config.horizontal_bidirectional,
        ))
    }

    fn connector(
        &self,
        kind: LinkKind,
        spawn: Point3,
        normal: Orientation,
        landing: Point3,
        bidirectional: bool,
    ) -> Connector {
        let transform = RigidTransform::new(spawn, normal);
        trace!(?kind, ?spawn, ?landing, "Link accepted");

        Connector {
            name: kind.connector_name().to_string(),
            kind,
            transform,
            local_start: Point3::ZERO,
            local_end: transform.inverse_transform_point(landing),
            width: self.config.link_width,
            area: self.config.link_area,
            bidirectional,
            cost_modifier: self.config.link_cost_modifier,
            auto_update_position: self.config.link_auto_update_position,
            agent_type_id: self.context.agent_type_id,
        }
    }
}
