//! NavLink bake driver.
//!
//! Ties the pieces together: reads the triangulation from a
//! [`SurfaceProvider`], extracts its boundary edges, places links against a
//! collision world and spawns them into a connector host. Surface change
//! notifications are debounced into a single re-bake.

pub mod driver;
pub mod scheduler;
pub mod surface;

pub use driver::{BakeDriver, BakeDriverBuilder, BakeReport, SurfaceEvent};
pub use scheduler::{BakeScheduler, BakeTicket};
pub use surface::{AgentProfile, StaticSurface, SurfaceProvider};
