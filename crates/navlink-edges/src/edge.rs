use navlink_core::Tolerance;
use navlink_math::{facing_normal, forward, invert_about_up, Orientation, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// One boundary edge of the walkable surface.
///
/// Identity is undirected: `(a, b)` and `(b, a)` are the same edge. The facing
/// normal however depends on the stored direction, pointing along
/// `(end - start) x up`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MeshEdge {
    pub start: Point3,
    pub end: Point3,
    pub length: f64,
    pub facing_normal: Orientation,
    pub start_up: Option<Point3>,
    pub end_up: Option<Point3>,
}

/// How a facing normal is derived for new edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalOptions {
    pub invert: bool,
    pub dont_align_y_axis: bool,
    pub tolerance: Tolerance,
}

impl MeshEdge {
    pub fn new(start: Point3, end: Point3, options: NormalOptions) -> Self {
        Self::build(start, end, None, options)
    }

    /// Edge whose normal leans with the supplied up points above each endpoint.
    pub fn with_up_points(
        start: Point3,
        end: Point3,
        start_up: Point3,
        end_up: Point3,
        options: NormalOptions,
    ) -> Self {
        Self::build(start, end, Some((start_up, end_up)), options)
    }

    fn build(
        start: Point3,
        end: Point3,
        up_points: Option<(Point3, Point3)>,
        options: NormalOptions,
    ) -> Self {
        let mut normal = facing_normal(
            start,
            end,
            up_points,
            options.dont_align_y_axis,
            options.tolerance,
        );
        if options.invert {
            normal = invert_about_up(normal);
        }

        Self {
            start,
            end,
            length: start.distance(end),
            facing_normal: normal,
            start_up: up_points.map(|(s, _)| s),
            end_up: up_points.map(|(_, e)| e),
        }
    }

    /// True when this edge joins `a` and `b`, in either order.
    pub fn has_points(&self, a: Point3, b: Point3, tolerance: Tolerance) -> bool {
        let same = |p: Point3, q: Point3| tolerance.within_squared(p.distance_squared(q));
        (same(self.start, a) && same(self.end, b)) || (same(self.start, b) && same(self.end, a))
    }

    /// Outward direction of the facing normal.
    pub fn facing_direction(&self) -> Vector3 {
        forward(self.facing_normal)
    }

    /// Point at parameter `t` along the edge, `0` at start and `1` at end.
    pub fn point_at(&self, t: f64) -> Point3 {
        self.start.lerp(self.end, t)
    }
}

impl PartialEq for MeshEdge {
    fn eq(&self, other: &Self) -> bool {
        self.has_points(other.start, other.end, Tolerance::exact())
    }
}
