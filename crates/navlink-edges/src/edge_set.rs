use navlink_core::Tolerance;
use navlink_math::Point3;

use crate::edge::MeshEdge;

/// Outcome of offering an edge to a [`BoundaryEdgeSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeToggle {
    /// First occurrence; the edge is now a boundary candidate.
    Inserted,
    /// Second occurrence; the shared edge was removed from the set.
    Cancelled,
}

/// Working set of boundary edge candidates, matched by undirected identity.
#[derive(Debug, Clone, Default)]
pub struct BoundaryEdgeSet {
    edges: Vec<MeshEdge>,
    tolerance: Tolerance,
}

impl BoundaryEdgeSet {
    pub fn new(tolerance: Tolerance) -> Self {
        Self {
            edges: Vec::new(),
            tolerance,
        }
    }

    fn position(&self, a: Point3, b: Point3) -> Option<usize> {
        self.edges
            .iter()
            .position(|e| e.has_points(a, b, self.tolerance))
    }

    pub fn contains(&self, a: Point3, b: Point3) -> bool {
        self.position(a, b).is_some()
    }

    /// Add the edge `a -> b` unless it is already present, in which case remove it.
    ///
    /// `build` is only called on insertion.
    pub fn toggle(
        &mut self,
        a: Point3,
        b: Point3,
        build: impl FnOnce(Point3, Point3) -> MeshEdge,
    ) -> EdgeToggle {
        match self.position(a, b) {
            Some(index) => {
                self.edges.swap_remove(index);
                EdgeToggle::Cancelled
            }
            None => {
                self.edges.push(build(a, b));
                EdgeToggle::Inserted
            }
        }
    }

    pub fn insert(&mut self, edge: MeshEdge) {
        self.edges.push(edge);
    }

    /// Remove the edge joining `a` and `b`, in either order.
    pub fn remove(&mut self, a: Point3, b: Point3) -> Option<MeshEdge> {
        self.position(a, b).map(|index| self.edges.swap_remove(index))
    }

    pub fn clear(&mut self) {
        self.edges.clear();
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MeshEdge> {
        self.edges.iter()
    }

    pub fn as_slice(&self) -> &[MeshEdge] {
        &self.edges
    }
}

impl<'a> IntoIterator for &'a BoundaryEdgeSet {
    type Item = &'a MeshEdge;
    type IntoIter = std::slice::Iter<'a, MeshEdge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}
