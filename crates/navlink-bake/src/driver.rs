//! Bake driver.
//!
//! A bake is a full rebuild: every connector from the previous bake is
//! destroyed, the boundary edges are extracted again from the surface's
//! current triangulation and links are placed along them. Re-baking an
//! unchanged surface yields connectors at the same positions.

use std::time::Instant;

use navlink_core::traits::Validate;
use navlink_core::{BakeId, LinkerConfig, NavLinkError, Result, Tolerance};
use navlink_edges::{BoundaryEdgeSet, EdgeExtractor, ExtractorSettings};
use navlink_placer::{CollisionWorld, ConnectorArena, ConnectorHost, LinkPlacer, ProbeContext};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::scheduler::{BakeScheduler, BakeTicket};
use crate::surface::SurfaceProvider;

/// Change notifications from the surface builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceEvent {
    MeshAdded,
    MeshUpdated,
}

/// Outcome of one bake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BakeReport {
    pub bake_id: BakeId,
    /// Connectors destroyed by the clear step.
    pub cleared: usize,
    pub edge_count: usize,
    pub samples: usize,
    pub vertical: usize,
    pub horizontal: usize,
}

impl BakeReport {
    /// Connectors spawned by this bake.
    pub fn total_links(&self) -> usize {
        self.vertical + self.horizontal
    }
}

type BakeListener = Box<dyn FnMut(&BakeReport)>;

/// Owns one baking context: a surface, the collision world it is probed
/// against and the host connectors are spawned into.
pub struct BakeDriver<S, W, H = ConnectorArena> {
    config: LinkerConfig,
    surface: S,
    world: W,
    host: H,
    edges: BoundaryEdgeSet,
    scheduler: BakeScheduler,
    listeners: Vec<BakeListener>,
    last_report: Option<BakeReport>,
}

impl<S, W> BakeDriver<S, W, ConnectorArena> {
    pub fn builder() -> BakeDriverBuilder<S, W, ConnectorArena> {
        BakeDriverBuilder::new()
    }
}

impl<S, W, H> BakeDriver<S, W, H>
where
    S: SurfaceProvider,
    W: CollisionWorld,
    H: ConnectorHost,
{
    /// Clear and rebuild every connector from the surface's current triangulation.
    ///
    /// If spawning fails part way the connectors of this bake are destroyed
    /// again, so the host is left empty rather than half baked.
    pub fn bake(&mut self) -> Result<BakeReport> {
        let bake_id = BakeId::next();

        let agent_type_id = self.surface.agent_type_id();
        let profile = self
            .surface
            .agent_profile(agent_type_id)
            .ok_or(NavLinkError::UnknownAgentType(agent_type_id))?;

        let cleared = self.host.destroy_all_connectors();
        self.edges.clear();

        let triangulation = self.surface.triangulation();
        let bounds = self.surface.bounds();
        EdgeExtractor::new(ExtractorSettings::from(&self.config)).extract_into(
            &triangulation,
            &bounds,
            &mut self.edges,
        );

        let context = ProbeContext {
            agent_radius: profile.agent_radius,
            layers: self.surface.layer_mask(),
            agent_type_id,
        };
        let placer = LinkPlacer::new(&self.config, context, &self.world, &self.surface);
        let stats = match placer.place_links(
            self.edges.as_slice(),
            self.config.direction,
            &mut self.host,
        ) {
            Ok(stats) => stats,
            Err(e) => {
                let removed = self.host.destroy_all_connectors();
                self.edges.clear();
                error!(%bake_id, removed, "Bake failed: {e}");
                return Err(e);
            }
        };

        self.surface.mark_dirty();

        let report = BakeReport {
            bake_id,
            cleared,
            edge_count: self.edges.len(),
            samples: stats.samples,
            vertical: stats.vertical,
            horizontal: stats.horizontal,
        };
        info!(
            %bake_id,
            %agent_type_id,
            edges = report.edge_count,
            links = report.total_links(),
            "Baked nav mesh links"
        );

        self.last_report = Some(report);
        Ok(report)
    }

    /// Rebuild the surface, then bake it.
    pub fn bake_surface(&mut self) -> Result<BakeReport> {
        if let Err(e) = self.surface.rebuild() {
            error!("Surface rebuild failed: {e}");
            return Err(e);
        }
        self.bake()
    }

    /// Destroy all connectors and forget the boundary edges.
    pub fn clear(&mut self) -> usize {
        self.edges.clear();
        self.last_report = None;
        self.host.destroy_all_connectors()
    }

    /// Schedule a bake `bake_delay` after `now`, replacing any pending one.
    pub fn notify(&mut self, event: SurfaceEvent, now: Instant) -> BakeTicket {
        let ticket = self.scheduler.schedule(now);
        debug!(?event, ticket = ticket.value(), "Bake scheduled");
        ticket
    }

    pub fn is_going_to_bake(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Drop a pending bake without running it.
    pub fn cancel_pending(&mut self) -> Option<BakeTicket> {
        self.scheduler.cancel()
    }

    /// Run the pending bake if its window has elapsed.
    ///
    /// Listeners registered with [`Self::on_baked`] are called after a
    /// successful bake.
    pub fn tick(&mut self, now: Instant) -> Result<Option<BakeReport>> {
        let Some(ticket) = self.scheduler.poll(now) else {
            return Ok(None);
        };
        debug!(ticket = ticket.value(), "Running scheduled bake");

        let report = self.bake_surface()?;
        for listener in &mut self.listeners {
            listener(&report);
        }
        Ok(Some(report))
    }

    pub fn on_baked(&mut self, listener: impl FnMut(&BakeReport) + 'static) {
        self.listeners.push(Box::new(listener));
    }
}

impl<S, W, H> BakeDriver<S, W, H> {
    pub fn config(&self) -> &LinkerConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Boundary edges found by the last bake.
    pub fn edges(&self) -> &BoundaryEdgeSet {
        &self.edges
    }

    pub fn last_report(&self) -> Option<&BakeReport> {
        self.last_report.as_ref()
    }
}

/// Assembles a [`BakeDriver`]. Surface and world are required.
pub struct BakeDriverBuilder<S, W, H = ConnectorArena> {
    config: LinkerConfig,
    surface: Option<S>,
    world: Option<W>,
    host: H,
}

impl<S, W> BakeDriverBuilder<S, W, ConnectorArena> {
    pub fn new() -> Self {
        Self {
            config: LinkerConfig::default(),
            surface: None,
            world: None,
            host: ConnectorArena::new(),
        }
    }
}

impl<S, W> Default for BakeDriverBuilder<S, W, ConnectorArena> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, W, H> BakeDriverBuilder<S, W, H> {
    pub fn config(mut self, config: LinkerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn surface(mut self, surface: S) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn world(mut self, world: W) -> Self {
        self.world = Some(world);
        self
    }

    /// Spawn connectors into `host` instead of a fresh [`ConnectorArena`].
    pub fn host<H2>(self, host: H2) -> BakeDriverBuilder<S, W, H2> {
        BakeDriverBuilder {
            config: self.config,
            surface: self.surface,
            world: self.world,
            host,
        }
    }

    pub fn build(self) -> Result<BakeDriver<S, W, H>>
    where
        S: SurfaceProvider,
        W: CollisionWorld,
        H: ConnectorHost,
    {
        self.config.validate()?;
        let delay = self.config.bake_delay()?;
        let surface = self
            .surface
            .ok_or(NavLinkError::MissingCollaborator("surface"))?;
        let world = self
            .world
            .ok_or(NavLinkError::MissingCollaborator("collision world"))?;

        Ok(BakeDriver {
            config: self.config,
            surface,
            world,
            host: self.host,
            edges: BoundaryEdgeSet::new(Tolerance::default()),
            scheduler: BakeScheduler::new(delay),
            listeners: Vec::new(),
            last_report: None,
        })
    }
}
