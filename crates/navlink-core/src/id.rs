use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_BAKE_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier of one bake pass. Unique for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct BakeId(u64);

impl BakeId {
    pub fn next() -> Self {
        Self(NEXT_BAKE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for BakeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "bake#{}", self.0)
    }
}

/// Agent type a navigation surface (and its connectors) is built for.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct AgentTypeId(pub i32);

impl AgentTypeId {
    pub fn value(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for AgentTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "agent#{}", self.0)
    }
}
