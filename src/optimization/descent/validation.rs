//! Validation helpers for the descent engine.
//!
//! This module centralizes the consistency checks used across the
//! optimizer interface:
//!
//! - **Tolerance checks**: [`verify_tol_grad`], [`verify_tol_cost`] ensure
//!   numeric tolerances are finite and strictly positive when provided.
//! - **Gradient validation**: [`validate_grad`] enforces correct dimension
//!   and finite entries on the dense backend.
//! - **Starting points**: [`validate_start_point`] rejects initial points
//!   with non-finite coordinates before the engine touches them.
//! - **Objective values**: [`validate_value`] checks scalar outputs for
//!   finiteness.
//!
//! These helpers standardize error reporting by returning domain-specific
//! [`DescentError`] variants, keeping higher-level code uniform.
use crate::optimization::{
    descent::types::{Grad, Point},
    errors::{DescentError, DescentResult},
};

/// Validate the optional gradient-norm tolerance.
///
/// - Accepts `None` (no stopping rule on the gradient).
/// - If `Some`, the value must be **finite** and **strictly positive**.
///
/// # Errors
/// Returns [`DescentError::InvalidTolGrad`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_grad(tol: Option<f64>) -> DescentResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(DescentError::InvalidTolGrad { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(DescentError::InvalidTolGrad {
                tol,
                reason: "Tolerance must be positive.",
            });
        }
    }
    Ok(())
}

/// Validate the optional cost-change tolerance (for convergence).
///
/// - Accepts `None` (no stopping rule on cost change).
/// - If `Some`, the value must be **finite** and **strictly positive**.
///
/// # Errors
/// Returns [`DescentError::InvalidTolCost`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_cost(tol: Option<f64>) -> DescentResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(DescentError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(DescentError::InvalidTolCost {
                tol,
                reason: "Tolerance must be positive.",
            });
        }
    }
    Ok(())
}

/// Validate a dense gradient vector against dimension and finiteness.
///
/// Checks:
/// - `grad.len() == dim`
/// - every element is finite (`NaN` or `±∞` are rejected)
///
/// # Errors
/// - [`DescentError::GradientDimMismatch`] if length does not match `dim`.
/// - [`DescentError::InvalidGradient`] with the index/value/reason of the
///   first offending element.
pub fn validate_grad(grad: &Grad, dim: usize) -> DescentResult<()> {
    if grad.len() != dim {
        return Err(DescentError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(DescentError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate a dense starting point.
///
/// Every coordinate must be finite; the first offending element is
/// reported.
///
/// # Errors
/// Returns [`DescentError::InvalidStartPoint`] with the index and value of
/// the first non-finite coordinate.
pub fn validate_start_point(x0: &Point) -> DescentResult<()> {
    for (index, &value) in x0.iter().enumerate() {
        if !value.is_finite() {
            return Err(DescentError::InvalidStartPoint { index, value });
        }
    }
    Ok(())
}

/// Validate that a scalar objective value is finite.
///
/// Negative values are fine as long as they are finite.
///
/// # Errors
/// Returns [`DescentError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_value(value: f64) -> DescentResult<()> {
    if !value.is_finite() {
        return Err(DescentError::NonFiniteCost { value });
    }
    Ok(())
}
