use navlink_math::{closest_point_on_triangle, Aabb3, Point3};
use serde::{Deserialize, Serialize};

/// Walkable surface as produced by the navigation-mesh builder.
///
/// Three consecutive indices name one triangle, counter-clockwise winding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Triangulation {
    pub vertices: Vec<Point3>,
    pub indices: Vec<u32>,
}

impl Triangulation {
    pub fn new(vertices: Vec<Point3>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Number of vertices in the triangulation.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of complete triangles. A trailing partial triple is not counted.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// True when every index names an existing vertex.
    pub fn indices_in_range(&self) -> bool {
        let n = self.vertices.len();
        self.indices.iter().all(|&i| (i as usize) < n)
    }

    /// Iterate over complete triangles as vertex index triples.
    ///
    /// Callers must check [`Self::indices_in_range`] before indexing `vertices`.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
    }

    /// Append another triangulation, offsetting its indices.
    pub fn merge(&mut self, other: &Triangulation) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices
            .extend(other.indices.iter().map(|&i| i + offset));
    }

    /// Compute the axis-aligned bounding box of all vertices.
    pub fn bounding_box(&self) -> Aabb3 {
        Aabb3::from_points(&self.vertices).unwrap_or(Aabb3::new(Point3::ZERO, Point3::ZERO))
    }

    /// Nearest point on the surface to `point`, if one lies within `max_radius`.
    pub fn nearest_point(&self, point: Point3, max_radius: f64) -> Option<Point3> {
        if !self.indices_in_range() {
            return None;
        }

        let max_sq = max_radius * max_radius;
        self.triangles()
            .map(|[a, b, c]| {
                closest_point_on_triangle(
                    point,
                    self.vertices[a],
                    self.vertices[b],
                    self.vertices[c],
                )
            })
            .map(|q| (q, q.distance_squared(point)))
            .filter(|&(_, d)| d <= max_sq)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(q, _)| q)
    }
}
