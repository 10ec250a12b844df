// Integration tests for link placement against a box world

use approx::assert_abs_diff_eq;
use navlink_core::{AgentTypeId, LinkDirection, LinkerConfig};
use navlink_edges::{MeshEdge, NormalOptions, Triangulation};
use navlink_math::{dvec3, Aabb3, Point3};
use navlink_placer::{
    AreaMask, BoxCollider, BoxWorld, ConnectorArena, ConnectorHost, LayerMask, LinkKind,
    LinkPlacer, NavMeshQuery, ProbeContext,
};

/// Navigation surface backed by a triangulation.
struct MeshNav(Triangulation);

impl NavMeshQuery for MeshNav {
    fn sample_nearest_point(
        &self,
        point: Point3,
        max_radius: f64,
        _: AreaMask,
    ) -> Option<Point3> {
        self.0.nearest_point(point, max_radius)
    }
}

fn floor_nav() -> MeshNav {
    MeshNav(Triangulation::new(
        vec![
            dvec3(-5.0, 0.0, -5.0),
            dvec3(5.0, 0.0, -5.0),
            dvec3(5.0, 0.0, 5.0),
            dvec3(-5.0, 0.0, 5.0),
        ],
        vec![0, 2, 1, 0, 3, 2],
    ))
}

fn ground(layer: u32) -> BoxWorld {
    let mut world = BoxWorld::new();
    world.add(BoxCollider {
        bounds: Aabb3::new(dvec3(-5.0, -1.0, -5.0), dvec3(5.0, 0.0, 5.0)),
        layer,
        is_trigger: false,
    });
    world
}

/// Two-unit ledge at height 1 facing +Z.
fn ledge() -> MeshEdge {
    MeshEdge::new(
        dvec3(0.0, 1.0, 0.0),
        dvec3(2.0, 1.0, 0.0),
        NormalOptions::default(),
    )
}

fn context(layers: LayerMask) -> ProbeContext {
    ProbeContext {
        agent_radius: 0.5,
        layers,
        agent_type_id: AgentTypeId(0),
    }
}

#[test]
fn integration_ledge_over_ground() {
    let config = LinkerConfig::default();
    let world = ground(0);
    let nav = floor_nav();
    let placer = LinkPlacer::new(&config, context(LayerMask::ALL), &world, &nav);
    let mut arena = ConnectorArena::new();

    let stats = placer
        .place_links(&[ledge()], LinkDirection::Vertical, &mut arena)
        .unwrap();

    assert_eq!(stats.samples, 8);
    assert_eq!(stats.vertical, 8);
    assert_eq!(arena.connector_count(), 8);
    for c in arena.of_kind(LinkKind::Vertical) {
        assert_abs_diff_eq!(c.world_end().y, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.position().z, -0.02, epsilon = 1e-9);
        assert!(c.world_end().z > 1.0);
    }
}

#[test]
fn integration_ground_on_other_layer_is_ignored() {
    let config = LinkerConfig::default();
    let world = ground(4);
    let nav = floor_nav();
    let placer = LinkPlacer::new(&config, context(LayerMask::layer(0)), &world, &nav);
    let mut arena = ConnectorArena::new();

    let stats = placer
        .place_links(&[ledge()], LinkDirection::Vertical, &mut arena)
        .unwrap();
    assert_eq!(stats.samples, 8);
    assert_eq!(stats.total(), 0);
    assert!(arena.is_empty());
}

#[test]
fn integration_short_edge_gets_no_samples() {
    let config = LinkerConfig::default();
    let world = ground(0);
    let nav = floor_nav();
    let placer = LinkPlacer::new(&config, context(LayerMask::ALL), &world, &nav);
    let mut arena = ConnectorArena::new();

    let short = MeshEdge::new(
        dvec3(0.0, 1.0, 0.0),
        dvec3(0.2, 1.0, 0.0),
        NormalOptions::default(),
    );
    let stats = placer
        .place_links(&[short], LinkDirection::Both, &mut arena)
        .unwrap();
    assert_eq!(stats.edges, 1);
    assert_eq!(stats.samples, 0);
    assert!(arena.is_empty());
}
