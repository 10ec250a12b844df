// Integration tests for the bake driver against a box world

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use approx::assert_abs_diff_eq;
use navlink_bake::{AgentProfile, BakeDriver, StaticSurface, SurfaceEvent};
use navlink_core::{AgentTypeId, LinkDirection, LinkerConfig, NavLinkError, Result};
use navlink_edges::Triangulation;
use navlink_math::{dvec3, Aabb3, Point3};
use navlink_placer::{BoxWorld, Connector, ConnectorArena, ConnectorHost, ConnectorId, LinkKind};

const PLATFORM_SIZE: f64 = 2.0;

/// Walkable axis-aligned square at height `y`, wound to face up.
fn quad(min_x: f64, min_z: f64, size: f64, y: f64) -> Triangulation {
    Triangulation::new(
        vec![
            dvec3(min_x, y, min_z),
            dvec3(min_x + size, y, min_z),
            dvec3(min_x + size, y, min_z + size),
            dvec3(min_x, y, min_z + size),
        ],
        vec![0, 2, 1, 0, 3, 2],
    )
}

fn ground() -> Triangulation {
    quad(-5.0, -5.0, 15.0, 0.0)
}

/// Ground plus a platform whose top is at `height`.
fn ground_and_platform(height: f64) -> Triangulation {
    let mut tri = ground();
    tri.merge(&quad(0.0, 0.0, PLATFORM_SIZE, height));
    tri
}

fn world(height: f64) -> BoxWorld {
    let mut world = BoxWorld::new();
    world
        .add_box(dvec3(-5.0, -1.0, -5.0), dvec3(10.0, 0.0, 10.0))
        .add_box(
            dvec3(0.0, height - 1.0, 0.0),
            dvec3(PLATFORM_SIZE, height, PLATFORM_SIZE),
        );
    world
}

fn bounds(height: f64) -> Aabb3 {
    Aabb3::new(dvec3(-5.0, 0.0, -5.0), dvec3(10.0, height + 1.0, 10.0))
}

fn driver_with(
    height: f64,
    triangulation: Triangulation,
    config: LinkerConfig,
) -> BakeDriver<StaticSurface, BoxWorld> {
    BakeDriver::builder()
        .config(config)
        .surface(StaticSurface::new(triangulation, bounds(height)))
        .world(world(height))
        .build()
        .unwrap()
}

fn ledge_driver(config: LinkerConfig) -> BakeDriver<StaticSurface, BoxWorld> {
    driver_with(1.0, ground_and_platform(1.0), config)
}

fn outside_platform(p: Point3) -> bool {
    p.x < 0.0 || p.x > PLATFORM_SIZE || p.z < 0.0 || p.z > PLATFORM_SIZE
}

fn sorted_starts(arena: &ConnectorArena) -> Vec<[f64; 3]> {
    let mut starts: Vec<[f64; 3]> = arena
        .iter()
        .map(|(_, c)| c.world_start().to_array())
        .collect();
    starts.sort_by(|a, b| a.partial_cmp(b).unwrap());
    starts
}

#[test]
fn integration_ledge_drops_to_ground() {
    let mut driver = ledge_driver(LinkerConfig::default());
    let report = driver.bake().unwrap();

    // Four platform edges of length 2, eight samples each
    assert_eq!(report.edge_count, 4);
    assert_eq!(report.samples, 32);
    assert_eq!(report.vertical, 32);
    assert_eq!(report.horizontal, 0);
    assert_eq!(driver.host().len(), 32);

    for (_, c) in driver.host().iter() {
        assert_eq!(c.kind, LinkKind::Vertical);
        assert_eq!(c.name, "VerticalNavMeshLink");
        assert_eq!(c.local_start, Point3::ZERO);
        assert_eq!(c.width, 0.25);
        assert_eq!(c.cost_modifier, -1);
        assert!(!c.bidirectional);
        assert!(c.auto_update_position);

        assert_abs_diff_eq!(c.world_start().y, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.world_end().y, 0.0, epsilon = 1e-9);
        assert!(outside_platform(c.world_end()));
    }
}

#[test]
fn integration_connectors_start_pulled_back_from_edge() {
    let mut driver = ledge_driver(LinkerConfig::default());
    driver.bake().unwrap();

    // Edge along z = 0 faces -Z, so its connectors sit 0.02 inside the platform
    let on_near_edge: Vec<&Connector> = driver
        .host()
        .iter()
        .map(|(_, c)| c)
        .filter(|c| c.world_end().z < -0.5)
        .collect();
    assert_eq!(on_near_edge.len(), 8);
    for c in on_near_edge {
        assert_abs_diff_eq!(c.position().z, 0.02, epsilon = 1e-9);
        assert_abs_diff_eq!(c.world_end().x, c.position().x, epsilon = 1e-9);
    }
}

#[test]
fn integration_rebake_replaces_connectors() {
    let mut driver = ledge_driver(LinkerConfig::default());
    let first = driver.bake().unwrap();
    let starts = sorted_starts(driver.host());

    let second = driver.bake().unwrap();
    assert_eq!(second.cleared, first.total_links());
    assert_eq!(second.total_links(), first.total_links());
    assert_eq!(driver.host().len(), 32);
    assert_eq!(sorted_starts(driver.host()), starts);
}

#[test]
fn integration_both_directions_on_low_ledge() {
    let config = LinkerConfig::from_json_str(r#"{ "direction": "both" }"#).unwrap();
    let mut driver = ledge_driver(config);
    let report = driver.bake().unwrap();

    // The obstacle ray reaches the ground, so only drops are placed
    assert_eq!(report.vertical, 32);
    assert_eq!(report.horizontal, 0);
}

#[test]
fn integration_tall_platform_gets_horizontal_links() {
    let config = LinkerConfig {
        direction: LinkDirection::Both,
        ..LinkerConfig::default()
    };
    let mut driver = driver_with(5.0, ground_and_platform(5.0), config);
    let report = driver.bake().unwrap();

    // Ground is beyond the vertical reach but within the sphere cast
    assert_eq!(report.edge_count, 4);
    assert_eq!(report.vertical, 0);
    assert_eq!(report.horizontal, 32);

    for c in driver.host().of_kind(LinkKind::Horizontal) {
        assert_eq!(c.name, "HorizontalNavMeshLink");
        assert!(!c.bidirectional);
        assert_abs_diff_eq!(c.world_start().y, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.world_end().y, 0.0, epsilon = 1e-9);
        assert!(outside_platform(c.world_end()));
    }
}

#[test]
fn integration_horizontal_only_on_low_ledge_places_nothing() {
    let config = LinkerConfig {
        direction: LinkDirection::Horizontal,
        ..LinkerConfig::default()
    };
    let mut driver = ledge_driver(config);
    let report = driver.bake().unwrap();
    assert_eq!(report.edge_count, 4);
    assert_eq!(report.total_links(), 0);
}

#[test]
fn integration_agent_profile_sizes_connectors() {
    let surface = StaticSurface::new(ground_and_platform(1.0), bounds(1.0))
        .with_agent(AgentTypeId(3), AgentProfile { agent_radius: 0.25 });
    let mut driver = BakeDriver::builder()
        .surface(surface)
        .world(world(1.0))
        .build()
        .unwrap();

    let report = driver.bake().unwrap();
    assert_eq!(report.vertical, 32);
    assert!(driver
        .host()
        .iter()
        .all(|(_, c)| c.agent_type_id == AgentTypeId(3)));
}

#[test]
fn integration_unknown_agent_type() {
    let surface = StaticSurface::new(ground_and_platform(1.0), bounds(1.0))
        .with_agent_type(AgentTypeId(7));
    let mut driver = BakeDriver::builder()
        .surface(surface)
        .world(world(1.0))
        .build()
        .unwrap();

    let err = driver.bake().unwrap_err();
    assert!(matches!(err, NavLinkError::UnknownAgentType(AgentTypeId(7))));
    assert!(driver.host().is_empty());
}

#[test]
fn integration_missing_collaborators() {
    let err = BakeDriver::<StaticSurface, BoxWorld>::builder()
        .world(world(1.0))
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, NavLinkError::MissingCollaborator("surface")));

    let err = BakeDriver::<StaticSurface, BoxWorld>::builder()
        .surface(StaticSurface::new(ground(), bounds(1.0)))
        .build()
        .err()
        .unwrap();
    assert!(matches!(
        err,
        NavLinkError::MissingCollaborator("collision world")
    ));
}

#[test]
fn integration_degenerate_triangulations_bake_nothing() {
    let two_indices = Triangulation::new(
        vec![dvec3(0.0, 1.0, 0.0), dvec3(1.0, 1.0, 0.0)],
        vec![0, 1],
    );
    let mut driver = driver_with(1.0, two_indices, LinkerConfig::default());
    let report = driver.bake().unwrap();
    assert_eq!(report.edge_count, 0);
    assert_eq!(report.total_links(), 0);

    let mut out_of_range = quad(0.0, 0.0, PLATFORM_SIZE, 1.0);
    out_of_range.indices[1] = 40;
    let mut driver = driver_with(1.0, out_of_range, LinkerConfig::default());
    let report = driver.bake().unwrap();
    assert_eq!(report.edge_count, 0);
    assert!(driver.host().is_empty());
}

/// Host that refuses to hold more than `capacity` connectors.
struct BoundedHost {
    arena: ConnectorArena,
    capacity: usize,
}

impl ConnectorHost for BoundedHost {
    fn spawn_connector(&mut self, connector: Connector) -> Result<ConnectorId> {
        if self.arena.len() >= self.capacity {
            return Err(NavLinkError::Spawn("host is full".to_string()));
        }
        self.arena.spawn_connector(connector)
    }

    fn destroy_all_connectors(&mut self) -> usize {
        self.arena.destroy_all_connectors()
    }

    fn connector_count(&self) -> usize {
        self.arena.connector_count()
    }
}

#[test]
fn integration_failed_spawn_leaves_host_empty() {
    let mut driver = BakeDriver::builder()
        .surface(StaticSurface::new(ground_and_platform(1.0), bounds(1.0)))
        .world(world(1.0))
        .host(BoundedHost {
            arena: ConnectorArena::new(),
            capacity: 5,
        })
        .build()
        .unwrap();

    let err = driver.bake().unwrap_err();
    assert!(matches!(err, NavLinkError::Spawn(_)));
    assert_eq!(driver.host().connector_count(), 0);
    assert!(driver.last_report().is_none());
    assert!(driver.edges().is_empty());
    assert!(!driver.surface().is_dirty());
}

#[test]
fn integration_notifications_debounce_into_one_bake() {
    let mut driver = driver_with(1.0, ground(), LinkerConfig::default());
    let bakes = Rc::new(Cell::new(0));
    let counter = Rc::clone(&bakes);
    driver.on_baked(move |_| counter.set(counter.get() + 1));

    // Initially nothing but the ground, whose edges all lie on the volume
    assert_eq!(driver.bake().unwrap().edge_count, 0);

    let t0 = Instant::now();
    driver.surface_mut().stage(ground_and_platform(1.0));
    for i in 0..5 {
        let now = t0 + Duration::from_millis(500 * i);
        driver.notify(SurfaceEvent::MeshUpdated, now);
        assert_eq!(driver.tick(now).unwrap(), None);
    }
    assert!(driver.is_going_to_bake());

    // Last notification at 2.0s, so the window closes at 4.0s
    assert_eq!(driver.tick(t0 + Duration::from_millis(3999)).unwrap(), None);
    let report = driver
        .tick(t0 + Duration::from_secs(4))
        .unwrap()
        .expect("scheduled bake should run");
    assert_eq!(report.vertical, 32);
    assert_eq!(bakes.get(), 1);
    assert_eq!(driver.surface().rebuilds(), 1);
    assert!(!driver.is_going_to_bake());

    assert_eq!(driver.tick(t0 + Duration::from_secs(10)).unwrap(), None);
    assert_eq!(bakes.get(), 1);
}

#[test]
fn integration_huge_bake_delay_never_fires() {
    let config = LinkerConfig::from_json_str(r#"{ "bake_delay_secs": 1.8e19 }"#).unwrap();
    let mut driver = ledge_driver(config);

    let t0 = Instant::now();
    driver.notify(SurfaceEvent::MeshAdded, t0);
    assert!(driver.is_going_to_bake());
    assert_eq!(driver.tick(t0 + Duration::from_secs(3600)).unwrap(), None);
    assert!(driver.is_going_to_bake());
    assert!(driver.host().is_empty());

    // An explicit bake still runs
    assert_eq!(driver.bake().unwrap().vertical, 32);
}

#[test]
fn integration_clear_removes_all_connectors() {
    let mut driver = ledge_driver(LinkerConfig::default());
    driver.bake().unwrap();
    assert_eq!(driver.clear(), 32);
    assert!(driver.host().is_empty());
    assert!(driver.edges().is_empty());
}
