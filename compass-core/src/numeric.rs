//! Numeric Tolerance Policy
//!
//! Every geometric algorithm in this crate compares floating-point quantities
//! through this module, never with `==` against zero. Keeping the tolerance
//! in one place means a degenerate triangle, a parallel line pair, and a
//! vanishing determinant are all judged by the same yardstick.
//!
//! Two thresholds exist:
//!
//! - `STANDARD_PRECISION` is the tight tolerance used for algebraic
//!   degeneracy checks (weight sums, determinants, homogeneous w-coordinates).
//! - `MIN_PRECISION` is the loose tolerance used for incidence checks on
//!   bounded paths ("is this intersection actually on the segment?"), where
//!   accumulated error from the upstream construction is larger.

/// Tight tolerance for algebraic degeneracy tests.
pub const STANDARD_PRECISION: f64 = 1e-8;

/// Loose tolerance for on-path incidence tests.
pub const MIN_PRECISION: f64 = 1e-5;

/// Whether `x` is numerically zero under the standard tolerance.
///
/// A NaN is *not* zero; callers that need NaN-means-undefined semantics
/// must test `is_nan` separately (the barycentric helper does).
#[inline]
pub fn is_zero(x: f64) -> bool {
    x.abs() < STANDARD_PRECISION
}

/// Whether `a` and `b` agree under the standard tolerance.
#[inline]
pub fn is_equal(a: f64, b: f64) -> bool {
    is_zero(a - b)
}

/// Euclidean distance between two 3D coordinate triples.
#[inline]
pub fn distance(a: (f64, f64, f64), b: (f64, f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    let dz = a.2 - b.2;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_within_tolerance() {
        assert!(is_zero(0.0));
        assert!(is_zero(1e-9));
        assert!(is_zero(-1e-9));
        assert!(!is_zero(1e-7));
    }

    #[test]
    fn nan_is_not_zero() {
        assert!(!is_zero(f64::NAN));
    }

    #[test]
    fn equality_is_tolerant() {
        assert!(is_equal(1.0, 1.0 + 1e-10));
        assert!(!is_equal(1.0, 1.0 + 1e-6));
    }

    #[test]
    fn distance_is_euclidean() {
        assert!(is_equal(distance((0.0, 0.0, 0.0), (3.0, 4.0, 0.0)), 5.0));
        assert!(is_equal(distance((1.0, 1.0, 1.0), (1.0, 1.0, 1.0)), 0.0));
    }
}
