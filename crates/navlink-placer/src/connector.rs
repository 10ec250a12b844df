use navlink_core::{AgentTypeId, Result};
use navlink_math::{Point3, RigidTransform};
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct ConnectorId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkKind {
    Vertical,
    Horizontal,
}

impl LinkKind {
    /// Name given to connectors of this kind.
    pub fn connector_name(self) -> &'static str {
        match self {
            Self::Vertical => "VerticalNavMeshLink",
            Self::Horizontal => "HorizontalNavMeshLink",
        }
    }
}

/// A spawned traversal shortcut.
///
/// `transform` places the connector in the world; start and end are in its
/// local frame. The start is always the local origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub name: String,
    pub kind: LinkKind,
    pub transform: RigidTransform,
    pub local_start: Point3,
    pub local_end: Point3,
    pub width: f64,
    pub area: u32,
    pub bidirectional: bool,
    pub cost_modifier: i32,
    pub auto_update_position: bool,
    pub agent_type_id: AgentTypeId,
}

impl Connector {
    pub fn position(&self) -> Point3 {
        self.transform.translation
    }

    pub fn world_start(&self) -> Point3 {
        self.transform.transform_point(self.local_start)
    }

    pub fn world_end(&self) -> Point3 {
        self.transform.transform_point(self.local_end)
    }
}

/// Owner of spawned connectors.
pub trait ConnectorHost {
    fn spawn_connector(&mut self, connector: Connector) -> Result<ConnectorId>;

    /// Destroy every connector spawned into this host, returning how many were removed.
    fn destroy_all_connectors(&mut self) -> usize;

    fn connector_count(&self) -> usize;
}

/// Arena of connector records for one baking context.
#[derive(Debug, Clone, Default)]
pub struct ConnectorArena {
    connectors: SlotMap<ConnectorId, Connector>,
}

impl ConnectorArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ConnectorId) -> Option<&Connector> {
        self.connectors.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConnectorId, &Connector)> + '_ {
        self.connectors.iter()
    }

    pub fn of_kind(&self, kind: LinkKind) -> impl Iterator<Item = &Connector> + '_ {
        self.connectors.values().filter(move |c| c.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }
}

impl ConnectorHost for ConnectorArena {
    fn spawn_connector(&mut self, connector: Connector) -> Result<ConnectorId> {
        Ok(self.connectors.insert(connector))
    }

    fn destroy_all_connectors(&mut self) -> usize {
        let count = self.connectors.len();
        self.connectors.clear();
        count
    }

    fn connector_count(&self) -> usize {
        self.connectors.len()
    }
}
