//! descent::beta — conjugate-direction blending coefficient.
//!
//! Purpose
//! -------
//! Compute the scalar that blends gradient history into the next search
//! direction: the conjugacy-loss test, the four raw coefficient
//! formulas, the degenerate-denominator fallback, and the
//! non-negativity clamp. Everything here is a pure function of the
//! current gradient, the previous gradient, and the previous direction.
//!
//! Key behaviors
//! -------------
//! - [`conjugacy_lost`] implements the drift test
//!   `|⟨g1, g0⟩| > gamma * ⟨g0, g0⟩`.
//! - [`raw_beta`] evaluates the configured formula, reporting a
//!   degenerate denominator instead of dividing by (near) zero.
//! - [`effective_beta`] applies the restart policy: zero on conjugacy
//!   loss or degeneracy, otherwise the raw value clamped at zero from
//!   below. The returned [`BetaDiagnostic`] names which rule fired.
//!
//! Invariants & assumptions
//! ------------------------
//! - The effective beta is always finite and non-negative.
//! - A denominator with magnitude at or below
//!   [`DEGENERACY_FLOOR`](crate::optimization::descent::types::DEGENERACY_FLOOR)
//!   is never divided by.
use crate::optimization::{
    descent::{traits::ConjugateMethod, types::DEGENERACY_FLOOR},
    space::VectorSpace,
};

/// How the effective beta for an iteration was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetaDiagnostic {
    /// The raw formula value was used as-is.
    Applied,
    /// The conjugacy-loss test fired; beta was reset to zero.
    ConjugacyLost,
    /// The formula denominator was at or below the degeneracy floor;
    /// beta was reset to zero.
    DegenerateDenominator,
    /// The raw formula value was negative and clamped to zero.
    ClampedNegative,
}

/// Conjugacy-loss test: `|⟨grad, grad_prev⟩| > gamma * ⟨grad_prev, grad_prev⟩`.
///
/// Guards against numerical drift accumulating across iterations; when
/// it fires the direction update restarts from the plain negative
/// gradient.
pub fn conjugacy_lost<V: VectorSpace>(grad: &V, grad_prev: &V, gamma: f64) -> bool {
    grad.dot(grad_prev).abs() > gamma * grad_prev.dot(grad_prev)
}

/// Evaluate the raw coefficient formula for `method`.
///
/// Let `dg = grad - grad_prev`. The formulas are:
/// - `None`: `0`.
/// - `FletcherReeves`: `⟨grad, grad⟩ / ⟨grad_prev, grad_prev⟩`.
/// - `PolakRibiere`: `⟨grad, dg⟩ / ⟨grad_prev, grad_prev⟩`.
/// - `HestenesStiefel`: `-⟨grad, dg⟩ / ⟨dir_prev, dg⟩`.
///
/// # Returns
/// `Some(raw)` for a usable denominator, `None` when the denominator is
/// degenerate (magnitude at or below the floor). `None` is never
/// returned for the `None` method.
pub fn raw_beta<V: VectorSpace>(
    method: ConjugateMethod, grad: &V, grad_prev: &V, dir_prev: &V,
) -> Option<f64> {
    match method {
        ConjugateMethod::None => Some(0.0),
        ConjugateMethod::FletcherReeves => {
            let den = grad_prev.dot(grad_prev);
            if den.abs() <= DEGENERACY_FLOOR {
                return None;
            }
            Some(grad.dot(grad) / den)
        }
        ConjugateMethod::PolakRibiere => {
            let den = grad_prev.dot(grad_prev);
            if den.abs() <= DEGENERACY_FLOOR {
                return None;
            }
            let dg = grad.minus(grad_prev);
            Some(grad.dot(&dg) / den)
        }
        ConjugateMethod::HestenesStiefel => {
            let dg = grad.minus(grad_prev);
            let den = dir_prev.dot(&dg);
            if den.abs() <= DEGENERACY_FLOOR {
                return None;
            }
            Some(-grad.dot(&dg) / den)
        }
    }
}

/// Effective beta for one iteration, with its diagnostic.
///
/// Policy, in order:
/// 1. If conjugacy is lost, beta is `0` regardless of the formula.
/// 2. If the formula denominator is degenerate, beta is `0`.
/// 3. A negative raw value is clamped to `0` rather than used, so the
///    direction never reverses.
/// 4. Otherwise the raw value is applied.
pub fn effective_beta<V: VectorSpace>(
    method: ConjugateMethod, grad: &V, grad_prev: &V, dir_prev: &V, gamma: f64,
) -> (f64, BetaDiagnostic) {
    if conjugacy_lost(grad, grad_prev, gamma) {
        return (0.0, BetaDiagnostic::ConjugacyLost);
    }
    match raw_beta(method, grad, grad_prev, dir_prev) {
        None => (0.0, BetaDiagnostic::DegenerateDenominator),
        Some(raw) if raw < 0.0 => (0.0, BetaDiagnostic::ClampedNegative),
        Some(raw) => (raw, BetaDiagnostic::Applied),
    }
}
