//! NavLink boundary edges: find the open perimeter of a walkable triangulation
//! and give each edge an outward facing normal.

pub mod edge;
pub mod edge_set;
pub mod extract;
pub mod triangulation;

pub use edge::{MeshEdge, NormalOptions};
pub use edge_set::{BoundaryEdgeSet, EdgeToggle};
pub use extract::{EdgeExtractor, ExtractStats, ExtractorSettings};
pub use triangulation::Triangulation;
