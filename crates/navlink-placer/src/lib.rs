//! NavLink placement: probe the space around boundary edges and spawn
//! connectors where an agent can drop down or jump across.

pub mod box_world;
pub mod connector;
pub mod placer;
pub mod world;

pub use box_world::{BoxCollider, BoxWorld};
pub use connector::{Connector, ConnectorArena, ConnectorHost, ConnectorId, LinkKind};
pub use placer::{
    link_count, sample_points, LinkPlacer, PlacementStats, ProbeContext, MAX_LINKS_PER_EDGE,
};
pub use world::{
    AreaMask, CollisionWorld, LayerMask, NavMeshQuery, QueryFilter, RaycastHit,
    TriggerInteraction,
};
