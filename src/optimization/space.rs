//! space — inner-product vector-space interface for the descent engine.
//!
//! Purpose
//! -------
//! Define the small capability surface the optimizer needs from a point
//! type: a zero element, addition, scalar multiplication, an inner
//! product, and an additive inverse. The engine, line search, and
//! conjugate-direction formulas are written against this trait only, so
//! any backend that satisfies it (dense arrays, sparse maps, custom
//! structures) can be optimized over without touching solver code.
//!
//! Key behaviors
//! -------------
//! - Every operation returns a fresh value; implementors are never asked
//!   to mutate in place. The engine replaces its state wholesale each
//!   iteration.
//! - `negate`, `minus`, and `norm` have default implementations derived
//!   from `scale`, `plus`, and `dot`; backends may override them when a
//!   fused implementation is cheaper.
//! - `all_finite` is the divergence probe: the engine rejects any iterate
//!   whose coordinates stop being finite.
//!
//! Invariants & assumptions
//! ------------------------
//! - Addition is associative and commutative; scalar multiplication
//!   distributes over addition; the inner product is symmetric and
//!   bilinear. None of this is checked at runtime.
//! - `zeros_like(x)` has the same dimension as `x` and is the additive
//!   identity for `plus`.
//!
//! Downstream usage
//! ----------------
//! - The crate ships the dense `ndarray::Array1<f64>` backend below; it
//!   is the canonical representation used by the high-level entry points
//!   and the finite-difference fallback.
//! - Custom backends implement the four required methods and inherit the
//!   rest.
use ndarray::Array1;

/// Element of a real inner-product vector space.
///
/// Required methods: [`zeros_like`](VectorSpace::zeros_like),
/// [`plus`](VectorSpace::plus), [`scale`](VectorSpace::scale),
/// [`dot`](VectorSpace::dot), and [`all_finite`](VectorSpace::all_finite).
/// The remaining operations are derived.
pub trait VectorSpace: Clone {
    /// Zero element with the same dimension as `self`.
    fn zeros_like(&self) -> Self;

    /// Vector addition: `self + other`.
    fn plus(&self, other: &Self) -> Self;

    /// Scalar multiplication: `alpha * self`.
    fn scale(&self, alpha: f64) -> Self;

    /// Inner product `⟨self, other⟩`.
    fn dot(&self, other: &Self) -> f64;

    /// True when every coordinate is finite.
    fn all_finite(&self) -> bool;

    /// Additive inverse: `-self`.
    fn negate(&self) -> Self {
        self.scale(-1.0)
    }

    /// Vector subtraction: `self - other`.
    fn minus(&self, other: &Self) -> Self {
        self.plus(&other.negate())
    }

    /// Norm induced by the inner product.
    fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }
}

impl VectorSpace for Array1<f64> {
    fn zeros_like(&self) -> Self {
        Array1::zeros(self.len())
    }

    fn plus(&self, other: &Self) -> Self {
        self + other
    }

    fn scale(&self, alpha: f64) -> Self {
        self * alpha
    }

    fn dot(&self, other: &Self) -> f64 {
        Array1::dot(self, other)
    }

    fn all_finite(&self) -> bool {
        self.iter().all(|v| v.is_finite())
    }

    fn minus(&self, other: &Self) -> Self {
        self - other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The dense Array1 backend's required operations.
    // - The derived operations (negate, minus, norm) against hand values.
    // - Finiteness probing on vectors containing NaN or infinities.
    //
    // They intentionally DO NOT cover:
    // - Solver behavior built on top of the trait (tested in the descent
    //   modules).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the required operations of the dense backend against hand-computed
    // values.
    //
    // Given
    // -----
    // - Two small vectors in ℝ².
    //
    // Expect
    // ------
    // - `plus`, `scale`, and `dot` match the usual coordinate-wise results.
    // - `zeros_like` has matching length and is all zeros.
    fn dense_backend_required_operations_match_hand_values() {
        let a = array![1.0, -2.0];
        let b = array![3.0, 4.0];

        assert_eq!(a.plus(&b), array![4.0, 2.0]);
        assert_eq!(a.scale(2.0), array![2.0, -4.0]);
        assert_eq!(VectorSpace::dot(&a, &b), -5.0);
        let z = a.zeros_like();
        assert_eq!(z.len(), 2);
        assert!(z.iter().all(|v| *v == 0.0));
    }

    #[test]
    // Purpose
    // -------
    // Verify the derived operations agree with their definitions.
    //
    // Given
    // -----
    // - A vector [3, 4] with norm 5.
    //
    // Expect
    // ------
    // - `negate` flips every sign, `minus` subtracts coordinate-wise, and
    //   `norm` equals the Euclidean length.
    fn derived_operations_follow_definitions() {
        let a = array![3.0, 4.0];
        let b = array![1.0, 1.0];

        assert_eq!(a.negate(), array![-3.0, -4.0]);
        assert_eq!(a.minus(&b), array![2.0, 3.0]);
        assert!((a.norm() - 5.0).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Confirm `all_finite` rejects NaN and infinities and accepts ordinary
    // values.
    //
    // Given
    // -----
    // - Vectors with and without non-finite coordinates.
    //
    // Expect
    // ------
    // - Finite vector reports true; NaN or ±∞ anywhere reports false.
    fn all_finite_detects_non_finite_coordinates() {
        assert!(array![0.0, -1.5, 1e300].all_finite());
        assert!(!array![0.0, f64::NAN].all_finite());
        assert!(!array![f64::INFINITY, 1.0].all_finite());
        assert!(!array![1.0, f64::NEG_INFINITY].all_finite());
    }
}
