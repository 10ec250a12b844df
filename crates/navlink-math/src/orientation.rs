//! Orientation helpers for boundary edges.
//!
//! Orientations use local +Z as forward and local +Y as up. The facing normal
//! of an edge is the rotation whose forward axis points horizontally away
//! from the edge, on the side given by `(end - start) x up`.

use std::f64::consts::PI;

use navlink_core::Tolerance;

use crate::{DMat3, Orientation, Point3, Vector3, UP};

/// Vertical nudge applied to the start up point when the refined normal degenerates.
const UP_NUDGE: f64 = 0.1;

/// Rotation with forward axis along `forward` and up axis as close to `up` as possible.
///
/// A zero `forward` yields the identity. When `forward` is parallel to `up`
/// an arbitrary perpendicular right axis is chosen.
pub fn look_rotation(forward: Vector3, up: Vector3) -> Orientation {
    let Some(z) = forward.try_normalize() else {
        return Orientation::IDENTITY;
    };
    let x = up
        .cross(z)
        .try_normalize()
        .unwrap_or_else(|| z.any_orthonormal_vector());
    let y = z.cross(x);
    Orientation::from_mat3(&DMat3::from_cols(x, y, z))
}

/// Forward axis of an orientation.
pub fn forward(orientation: Orientation) -> Vector3 {
    orientation * Vector3::Z
}

/// Rotate 180 degrees about world up.
pub fn invert_about_up(orientation: Orientation) -> Orientation {
    Orientation::from_rotation_y(PI) * orientation
}

fn refined_normal(start: Point3, end: Point3, start_up: Point3, end_up: Point3) -> Orientation {
    let up_mid = end_up.lerp(start_up, 0.5);
    let edge_mid = end.lerp(start, 0.5);
    look_rotation((end - start).cross(up_mid - edge_mid), UP)
}

/// Facing normal of the edge `start -> end`.
///
/// `up_points` are optional positions above each endpoint. When present the
/// normal leans with the local surface instead of staying horizontal; a
/// result pointing straight up or down is nudged once to break the degeneracy.
/// With `dont_align_y_axis` the forward axis is kept but the up axis follows
/// the edge's own look rotation.
pub fn facing_normal(
    start: Point3,
    end: Point3,
    up_points: Option<(Point3, Point3)>,
    dont_align_y_axis: bool,
    tolerance: Tolerance,
) -> Orientation {
    let direction = end - start;
    let mut result = look_rotation(direction.cross(UP), UP);

    if let Some((mut start_up, end_up)) = up_points {
        if start_up.length_squared() > 0.0 {
            result = refined_normal(start, end, start_up, end_up);

            let cos = UP.dot(forward(result).normalize_or_zero());
            if tolerance.is_parallel(cos) {
                start_up += Vector3::new(0.0, UP_NUDGE, 0.0);
                result = refined_normal(start, end, start_up, end_up);
            }
        }
    }

    if dont_align_y_axis {
        result = look_rotation(forward(result), look_rotation(direction, UP) * UP);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use glam::dvec3;

    fn assert_vec_eq(a: Vector3, b: Vector3) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-9);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-9);
        assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-9);
    }

    #[test]
    fn test_look_rotation_identity() {
        let q = look_rotation(Vector3::Z, UP);
        assert!(q.abs_diff_eq(Orientation::IDENTITY, 1e-12));
    }

    #[test]
    fn test_look_rotation_axes() {
        let q = look_rotation(dvec3(1.0, 0.0, 0.0), UP);
        assert_vec_eq(forward(q), Vector3::X);
        assert_vec_eq(q * Vector3::Y, Vector3::Y);
    }

    #[test]
    fn test_look_rotation_zero_forward() {
        assert!(look_rotation(Vector3::ZERO, UP).abs_diff_eq(Orientation::IDENTITY, 1e-12));
    }

    #[test]
    fn test_look_rotation_parallel_up_keeps_forward() {
        let q = look_rotation(UP * 2.0, UP);
        assert_vec_eq(forward(q), UP);
    }

    #[test]
    fn test_facing_normal_unit_x_edge() {
        let q = facing_normal(
            Point3::ZERO,
            dvec3(1.0, 0.0, 0.0),
            None,
            false,
            Tolerance::default(),
        );
        let expected = Vector3::X.cross(UP).normalize();
        assert_vec_eq(forward(q), expected);
    }

    #[test]
    fn test_inverted_normal_is_half_turn_about_up() {
        let q = facing_normal(
            dvec3(0.0, 1.0, 0.0),
            dvec3(2.0, 1.5, 1.0),
            None,
            false,
            Tolerance::default(),
        );
        let inverted = invert_about_up(q);
        let expected = Orientation::from_rotation_y(PI) * q;
        assert!(inverted.abs_diff_eq(expected, 1e-12));
        let f = forward(q);
        assert_vec_eq(forward(inverted), dvec3(-f.x, f.y, -f.z));
    }

    #[test]
    fn test_refined_normal_leans_with_up_points() {
        let start = Point3::ZERO;
        let end = dvec3(1.0, 0.0, 0.0);
        // Up points tilted towards -Z make the normal tilt up
        let ups = (dvec3(0.0, 1.0, -1.0), dvec3(1.0, 1.0, -1.0));
        let q = facing_normal(start, end, Some(ups), false, Tolerance::default());
        let f = forward(q);
        assert!(f.y > 0.1, "expected upward lean, got {f:?}");
        assert_abs_diff_eq!(f.x, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_refined_normal_breaks_vertical_degeneracy() {
        let start = Point3::ZERO;
        let end = dvec3(1.0, 0.0, 0.0);
        // Up points lying flat in the plane produce a straight-up normal before the nudge
        let ups = (dvec3(0.0, 0.0, -1.0), dvec3(1.0, 0.0, -1.0));
        let q = facing_normal(start, end, Some(ups), false, Tolerance::default());
        let cos = UP.dot(forward(q).normalize());
        assert!(cos.abs() <= Tolerance::DEFAULT_PARALLEL_COS);
    }

    #[test]
    fn test_zero_start_up_keeps_baseline() {
        let start = Point3::ZERO;
        let end = dvec3(0.0, 0.0, 1.0);
        let baseline = facing_normal(start, end, None, false, Tolerance::default());
        let with_zero = facing_normal(
            start,
            end,
            Some((Vector3::ZERO, dvec3(0.0, 5.0, 0.0))),
            false,
            Tolerance::default(),
        );
        assert!(baseline.abs_diff_eq(with_zero, 1e-12));
    }

    #[test]
    fn test_dont_align_y_axis_follows_sloped_edge() {
        let start = Point3::ZERO;
        let end = dvec3(1.0, 1.0, 0.0);
        let aligned = facing_normal(start, end, None, false, Tolerance::default());
        let free = facing_normal(start, end, None, true, Tolerance::default());

        // Forward axis preserved
        assert_vec_eq(forward(free), forward(aligned));
        // Up axis no longer world up
        let up = free * Vector3::Y;
        assert!(up.x.abs() > 0.1, "up axis should tilt with the edge, got {up:?}");
    }
}
