use thiserror::Error;

use crate::id::AgentTypeId;

#[derive(Debug, Error)]
pub enum NavLinkError {
    #[error("Missing collaborator: {0}")]
    MissingCollaborator(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown agent type: {0}")]
    UnknownAgentType(AgentTypeId),

    #[error("Connector spawn failed: {0}")]
    Spawn(String),

    #[error("Surface rebuild failed: {0}")]
    Rebuild(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NavLinkError>;
