/// Tolerances used when comparing positions produced by the surface builder.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Linear tolerance for distance comparisons (in world units)
    pub linear: f64,
    /// Cosine above which two directions count as parallel
    pub parallel_cos: f64,
}

impl Tolerance {
    pub const DEFAULT_LINEAR: f64 = 1e-5;
    pub const DEFAULT_PARALLEL_COS: f64 = 0.999;

    pub fn default_precision() -> Self {
        Self {
            linear: Self::DEFAULT_LINEAR,
            parallel_cos: Self::DEFAULT_PARALLEL_COS,
        }
    }

    /// Exact comparison; only bit-identical positions match.
    pub fn exact() -> Self {
        Self {
            linear: 0.0,
            parallel_cos: Self::DEFAULT_PARALLEL_COS,
        }
    }

    /// Check if a squared distance is within linear tolerance
    pub fn within_squared(self, distance_squared: f64) -> bool {
        distance_squared <= self.linear * self.linear
    }

    /// Check if a direction cosine indicates (anti-)parallel vectors
    pub fn is_parallel(self, cos: f64) -> bool {
        cos.abs() > self.parallel_cos
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_squared() {
        let tol = Tolerance::default();
        assert!(tol.within_squared(1e-11));
        assert!(!tol.within_squared(1e-9));
    }

    #[test]
    fn test_exact_only_matches_zero() {
        let tol = Tolerance::exact();
        assert!(tol.within_squared(0.0));
        assert!(!tol.within_squared(f64::MIN_POSITIVE));
    }

    #[test]
    fn test_is_parallel() {
        let tol = Tolerance::default();
        assert!(tol.is_parallel(0.9995));
        assert!(tol.is_parallel(-0.9995));
        assert!(!tol.is_parallel(0.5));
    }
}
