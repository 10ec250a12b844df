use crate::Point3;

/// Find the closest point on triangle `abc` to `p`.
pub fn closest_point_on_triangle(p: Point3, a: Point3, b: Point3, c: Point3) -> Point3 {
    let ab = b - a;
    let ac = c - a;

    // Vertex region outside A
    let ap = p - a;
    let d1 = ab.dot(ap);
    let d2 = ac.dot(ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return a;
    }

    // Vertex region outside B
    let bp = p - b;
    let d3 = ab.dot(bp);
    let d4 = ac.dot(bp);
    if d3 >= 0.0 && d4 <= d3 {
        return b;
    }

    // Edge region of AB
    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return a + ab * v;
    }

    // Vertex region outside C
    let cp = p - c;
    let d5 = ab.dot(cp);
    let d6 = ac.dot(cp);
    if d6 >= 0.0 && d5 <= d6 {
        return c;
    }

    // Edge region of AC
    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return a + ac * w;
    }

    // Edge region of BC
    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return b + (c - b) * w;
    }

    // Face region
    let denom = 1.0 / (va + vb + vc);
    let v = vb * denom;
    let w = vc * denom;
    a + ab * v + ac * w
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec3;

    fn tri() -> (Point3, Point3, Point3) {
        (dvec3(0.0, 0.0, 0.0), dvec3(2.0, 0.0, 0.0), dvec3(0.0, 0.0, 2.0))
    }

    #[test]
    fn test_point_above_face_projects_down() {
        let (a, b, c) = tri();
        let q = closest_point_on_triangle(dvec3(0.5, 3.0, 0.5), a, b, c);
        assert!((q - dvec3(0.5, 0.0, 0.5)).length() < 1e-12);
    }

    #[test]
    fn test_vertex_region() {
        let (a, b, c) = tri();
        let q = closest_point_on_triangle(dvec3(-1.0, 0.0, -1.0), a, b, c);
        assert_eq!(q, a);
    }

    #[test]
    fn test_edge_region() {
        let (a, b, c) = tri();
        let q = closest_point_on_triangle(dvec3(1.0, 0.0, -1.0), a, b, c);
        assert!((q - dvec3(1.0, 0.0, 0.0)).length() < 1e-12);
        let q = closest_point_on_triangle(dvec3(2.0, 0.0, 2.0), a, b, c);
        assert!((q - dvec3(1.0, 0.0, 1.0)).length() < 1e-12);
    }
}
