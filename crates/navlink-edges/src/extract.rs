//! Boundary edge extraction.
//!
//! An edge of the triangulation lies on the open perimeter of the walkable
//! surface iff exactly one triangle uses it. Triangles are visited in order
//! and each edge is toggled in a running [`BoundaryEdgeSet`]: the first
//! occurrence inserts it, the second cancels it. On a 2-manifold with
//! boundary every interior edge is seen twice and cancels, leaving only the
//! boundary.
//!
//! Edges touching the faces of the baked volume are skipped before the toggle.
//! They are clip artifacts of the volume, not drop-offs an agent can jump from.

use navlink_core::{LinkerConfig, Tolerance};
use navlink_math::{Aabb3, AabbFaces, Point3};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::edge::{MeshEdge, NormalOptions};
use crate::edge_set::{BoundaryEdgeSet, EdgeToggle};
use crate::triangulation::Triangulation;

/// Thresholds and normal options for [`EdgeExtractor`].
#[derive(Debug, Clone, Copy)]
pub struct ExtractorSettings {
    /// Distance to the volume's top or bottom face below which a vertex is on the perimeter.
    pub min_jump_height: f64,
    /// Distance to the volume's side faces below which a vertex is on the perimeter.
    pub jump_dist_vertical: f64,
    pub normal: NormalOptions,
}

impl ExtractorSettings {
    /// Settings with the perimeter filter disabled.
    pub fn unfiltered(normal: NormalOptions) -> Self {
        Self {
            min_jump_height: 0.0,
            jump_dist_vertical: 0.0,
            normal,
        }
    }
}

impl From<&LinkerConfig> for ExtractorSettings {
    fn from(config: &LinkerConfig) -> Self {
        Self {
            min_jump_height: config.min_jump_height,
            jump_dist_vertical: config.jump_dist_vertical,
            normal: NormalOptions {
                invert: config.invert_facing_normal,
                dont_align_y_axis: config.dont_align_y_axis,
                tolerance: Tolerance::default(),
            },
        }
    }
}

/// Counters from one extraction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub triangles: usize,
    pub perimeter_skipped: usize,
    pub inserted: usize,
    pub cancelled: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct EdgeExtractor {
    settings: ExtractorSettings,
}

impl EdgeExtractor {
    pub fn new(settings: ExtractorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ExtractorSettings {
        &self.settings
    }

    /// True if `point` lies within jump range of one of the volume's faces.
    pub fn is_at_boundary_of_volume(&self, faces: &AabbFaces, point: Point3) -> bool {
        AabbFaces::nearest(&faces.y, point) < self.settings.min_jump_height
            || AabbFaces::nearest(&faces.x, point) < self.settings.jump_dist_vertical
            || AabbFaces::nearest(&faces.z, point) < self.settings.jump_dist_vertical
    }

    /// Extract the boundary edges of `triangulation` clipped by `bounds`.
    pub fn extract(&self, triangulation: &Triangulation, bounds: &Aabb3) -> BoundaryEdgeSet {
        let mut edges = BoundaryEdgeSet::new(self.settings.normal.tolerance);
        self.extract_into(triangulation, bounds, &mut edges);
        edges
    }

    /// Toggle the edges of `triangulation` into an existing set.
    ///
    /// Degenerate input (fewer than three indices, or indices out of range)
    /// leaves the set untouched.
    pub fn extract_into(
        &self,
        triangulation: &Triangulation,
        bounds: &Aabb3,
        edges: &mut BoundaryEdgeSet,
    ) -> ExtractStats {
        let mut stats = ExtractStats::default();

        if triangulation.indices.len() < 3 {
            debug!(
                "Triangulation has {} indices, no boundary edges",
                triangulation.indices.len()
            );
            return stats;
        }
        if !triangulation.indices_in_range() {
            warn!(
                "Triangulation indices exceed vertex count {}, skipping extraction",
                triangulation.vertex_count()
            );
            return stats;
        }

        let faces = bounds.faces();
        let at_perimeter: Vec<bool> = triangulation
            .vertices
            .par_iter()
            .map(|&v| self.is_at_boundary_of_volume(&faces, v))
            .collect();

        let vertices = &triangulation.vertices;
        let normal = self.settings.normal;
        for [i0, i1, i2] in triangulation.triangles() {
            stats.triangles += 1;
            for (a, b) in [(i0, i1), (i1, i2), (i2, i0)] {
                if at_perimeter[a] || at_perimeter[b] {
                    stats.perimeter_skipped += 1;
                    continue;
                }
                let toggle = edges.toggle(vertices[a], vertices[b], |start, end| {
                    MeshEdge::new(start, end, normal)
                });
                match toggle {
                    EdgeToggle::Inserted => stats.inserted += 1,
                    EdgeToggle::Cancelled => stats.cancelled += 1,
                }
            }
        }

        debug!(
            triangles = stats.triangles,
            perimeter_skipped = stats.perimeter_skipped,
            cancelled = stats.cancelled,
            boundary = edges.len(),
            "Extracted boundary edges"
        );

        stats
    }
}
