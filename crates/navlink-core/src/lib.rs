pub mod config;
pub mod error;
pub mod id;
pub mod tolerance;
pub mod traits;

pub use config::{LinkDirection, LinkerConfig};
pub use error::{NavLinkError, Result};
pub use id::{AgentTypeId, BakeId};
pub use tolerance::Tolerance;
