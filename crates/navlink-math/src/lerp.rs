use crate::Point3;

/// Move `distance` units from `a` towards `b`.
///
/// Unlike a parametric lerp the step is absolute; it may overshoot `b`.
/// When `a == b` there is no direction and `a` is returned.
pub fn lerp_by_distance(a: Point3, b: Point3, distance: f64) -> Point3 {
    a + (b - a).normalize_or_zero() * distance
}
