//! descent::finite_diff — dense adapter with finite-difference fallback.
//!
//! Purpose
//! -------
//! Bridge a user [`Objective`] over the dense backend into the engine
//! while supplying a finite-difference gradient whenever the user does
//! not implement an analytic one, so that callers can optimize with a
//! value function alone.
//!
//! Key behaviors
//! -------------
//! - [`FdAdapter::value`] forwards to the user objective and reports a
//!   non-finite result as [`DescentError::NonFiniteCost`] (the line
//!   search recognizes that condition as a failed trial).
//! - [`FdAdapter::grad`] returns the user's analytic gradient, validated,
//!   when one is implemented. Otherwise it finite-differences the cost:
//!   *central* differences first, retrying with *forward* differences if
//!   any cost evaluation failed mid-routine or the central gradient
//!   fails validation.
//! - Errors raised inside the finite-difference closures are captured in
//!   a shared cell (the closure itself must return `f64`, so it reports
//!   `NaN` and stashes the error) and re-raised afterwards.
//!
//! Invariants & assumptions
//! ------------------------
//! - Gradients returned from this module satisfy [`validate_grad`]:
//!   matching dimension, all entries finite.
//! - Only the dense `Array1<f64>` backend is supported here; generic
//!   backends must provide analytic gradients.
//!
//! Downstream usage
//! ----------------
//! - [`minimize_dense`](crate::optimization::descent::api::minimize_dense)
//!   wraps every user objective in an [`FdAdapter`] so the fallback is
//!   automatic.
//! - The adapter is public for callers who drive the
//!   [`Descent`](crate::optimization::descent::iterates::Descent)
//!   iterator directly over dense points.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the analytic pass-through, FD agreement with an
//!   analytic gradient on a quadratic, the error-capture path, and
//!   validation failures on non-finite gradients.
use crate::optimization::{
    descent::{traits::Objective, types::Point, validation::validate_grad},
    errors::{DescentError, DescentResult},
};
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Bridges a dense user [`Objective`] to the engine, adding a
/// finite-difference gradient fallback.
///
/// - `value` returns the user's objective, rejecting non-finite results.
/// - `grad` returns:
///   - the user's analytic gradient, validated, or
///   - a finite-difference gradient of the cost when the user returns
///     [`DescentError::GradientNotImplemented`].
#[derive(Debug, Clone)]
pub struct FdAdapter<'a, F: Objective<Point>> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: Objective<Point>> FdAdapter<'a, F> {
    /// Construct a new adapter over a user objective and its data.
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }

    fn cost(&self, x: &Point) -> DescentResult<f64> {
        let output = self.f.value(x, self.data)?;
        if !output.is_finite() {
            return Err(DescentError::NonFiniteCost { value: output });
        }
        Ok(output)
    }
}

impl<'a, F: Objective<Point>> Objective<Point> for FdAdapter<'a, F> {
    type Data = ();

    /// Evaluate the user objective at `x`.
    ///
    /// # Errors
    /// - Propagates any user error via `?`.
    /// - Returns [`DescentError::NonFiniteCost`] if the value is not
    ///   finite.
    fn value(&self, x: &Point, _data: &()) -> DescentResult<f64> {
        self.cost(x)
    }

    /// Evaluate the gradient at `x`.
    ///
    /// Behavior:
    /// - If the user implements `grad`, validate it and return it.
    /// - Otherwise compute a finite-difference gradient of the cost:
    ///   - Try *central* differences first.
    ///   - If any evaluation of the cost closure failed (captured via
    ///     `closure_err`), retry with *forward* differences.
    ///   - Validate the FD gradient; if it fails (e.g., non-finite),
    ///     retry once with *forward* differences and validate again.
    ///
    /// # Errors
    /// - Propagates user errors from `grad` other than
    ///   `GradientNotImplemented`.
    /// - Propagates any error raised by cost evaluations performed during
    ///   finite differencing.
    /// - Returns validation errors if the gradient has the wrong
    ///   dimension or non-finite entries.
    fn grad(&self, x: &Point, _data: &()) -> DescentResult<Point> {
        let dim = x.len();
        match self.f.grad(x, self.data) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                Ok(g)
            }
            Err(DescentError::GradientNotImplemented) => {
                let closure_err: RefCell<Option<DescentError>> = RefCell::new(None);
                let cost_func = |x: &Point| -> f64 {
                    match self.cost(x) {
                        Ok(val) => val,
                        Err(e) => {
                            let mut slot = closure_err.borrow_mut();
                            if slot.is_none() {
                                *slot = Some(e);
                            }
                            f64::NAN
                        }
                    }
                };
                let fd_grad = x.central_diff(&cost_func);
                if closure_err.borrow().is_some() {
                    return run_fd_diff(x, &cost_func, &closure_err);
                }
                match validate_grad(&fd_grad, dim) {
                    Ok(()) => Ok(fd_grad),
                    Err(_) => run_fd_diff(x, &cost_func, &closure_err),
                }
            }
            Err(e) => Err(e),
        }
    }

    fn check(&self, x: &Point, _data: &()) -> DescentResult<()> {
        self.f.check(x, self.data)
    }
}

/// Compute a forward-difference gradient of `func` at `x`, with error
/// capture.
///
/// The FD closure can't return `Result`, so any error raised by `func` is
/// stored into `closure_err` and the closure returns `NaN`. This helper:
/// - clears `closure_err`,
/// - performs `forward_diff`,
/// - if an error was captured, returns it as `Err`,
/// - validates the resulting gradient,
/// - if validation succeeds, returns the gradient as `Ok(grad)`.
///
/// # Errors
/// Returns any error captured during evaluation of `func` inside the FD
/// routine or raised by validation of the resulting gradient.
fn run_fd_diff<G: Fn(&Point) -> f64>(
    x: &Point, func: &G, closure_err: &RefCell<Option<DescentError>>,
) -> DescentResult<Point> {
    closure_err.replace(None);
    let fd_grad = x.forward_diff(func);
    let dim = x.len();
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    validate_grad(&fd_grad, dim)?;
    Ok(fd_grad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{Array1, array};

    struct ValueOnly;

    impl Objective<Point> for ValueOnly {
        type Data = ();

        fn value(&self, x: &Point, _data: &()) -> DescentResult<f64> {
            Ok(x.dot(x))
        }
    }

    struct Analytic;

    impl Objective<Point> for Analytic {
        type Data = ();

        fn value(&self, x: &Point, _data: &()) -> DescentResult<f64> {
            Ok(x.dot(x))
        }

        fn grad(&self, x: &Point, _data: &()) -> DescentResult<Point> {
            Ok(x * 2.0)
        }
    }

    struct FailingRegion;

    impl Objective<Point> for FailingRegion {
        type Data = ();

        fn value(&self, x: &Point, _data: &()) -> DescentResult<f64> {
            if x[0] <= 0.0 {
                return Err(DescentError::InvalidStartPoint { index: 0, value: x[0] });
            }
            Ok(x.dot(x))
        }
    }

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Analytic gradient pass-through with validation.
    // - Finite-difference fallback agreement with the analytic gradient.
    // - Error capture from cost evaluations inside the FD routine.
    // - Non-finite cost rejection through value().
    //
    // They intentionally DO NOT cover:
    // - End-to-end minimize behavior (handled in integration tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the FD fallback agrees with the analytic gradient of a quadratic
    // to finite-difference accuracy.
    //
    // Given
    // -----
    // - f(x) = ||x||² without an analytic gradient, at a generic point.
    //
    // Expect
    // ------
    // - The adapter's gradient matches 2x within 1e-4 per coordinate.
    fn fd_fallback_matches_analytic_gradient_on_quadratic() {
        let problem = ValueOnly;
        let adapter = FdAdapter::new(&problem, &());
        let x = array![1.5, -2.0, 0.25];

        let grad = adapter.grad(&x, &()).expect("FD gradient should succeed");

        let expected: Array1<f64> = &x * 2.0;
        for (g, e) in grad.iter().zip(expected.iter()) {
            assert_abs_diff_eq!(*g, *e, epsilon = 1e-4);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the analytic pass-through path validates and returns the user
    // gradient unchanged.
    //
    // Given
    // -----
    // - f(x) = ||x||² with analytic gradient 2x.
    //
    // Expect
    // ------
    // - The adapter returns exactly 2x, with no FD noise.
    fn analytic_gradient_passes_through_unchanged() {
        let problem = Analytic;
        let adapter = FdAdapter::new(&problem, &());
        let x = array![3.0, -1.0];

        let grad = adapter.grad(&x, &()).unwrap();
        assert_eq!(grad, array![6.0, -2.0]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure an error raised by the cost inside the FD routine is captured and
    // surfaced as that error, not as a NaN gradient.
    //
    // Given
    // -----
    // - A value-only objective that errors for x[0] <= 0, probed at the
    //   origin so both the central probes and the forward-retry base point
    //   land in the failing region.
    //
    // Expect
    // ------
    // - grad() returns the captured error rather than InvalidGradient.
    fn closure_error_is_captured_and_surfaced() {
        let problem = FailingRegion;
        let adapter = FdAdapter::new(&problem, &());
        let x = array![0.0];

        let err = adapter.grad(&x, &()).expect_err("FD through a failing region must error");
        match err {
            DescentError::InvalidStartPoint { index: 0, .. } => {}
            other => panic!("Expected the captured user error, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify value() rejects non-finite objective outputs.
    //
    // Given
    // -----
    // - An objective returning +∞ everywhere.
    //
    // Expect
    // ------
    // - value() returns NonFiniteCost carrying the offending value.
    fn non_finite_value_is_rejected() {
        struct AlwaysInf;
        impl Objective<Point> for AlwaysInf {
            type Data = ();
            fn value(&self, _x: &Point, _data: &()) -> DescentResult<f64> {
                Ok(f64::INFINITY)
            }
        }

        let problem = AlwaysInf;
        let adapter = FdAdapter::new(&problem, &());
        match adapter.value(&array![0.0], &()) {
            Err(DescentError::NonFiniteCost { value }) => assert!(value.is_infinite()),
            other => panic!("Expected NonFiniteCost, got {other:?}"),
        }
    }
}
