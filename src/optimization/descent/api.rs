//! High-level entry points for minimizing a user [`Objective`].
//!
//! These wrap the lazy [`Descent`] iterator with validated stopping
//! rules and outcome normalization. [`minimize`] works over any
//! [`VectorSpace`] backend with an analytic gradient; [`minimize_dense`]
//! adds the finite-difference fallback for the dense backend by wrapping
//! the problem in an [`FdAdapter`].
use crate::optimization::{
    descent::{
        finite_diff::FdAdapter,
        iterates::Descent,
        state::OptimizerState,
        traits::{DescentOptions, Objective, OptimOutcome, Tolerances},
        types::Point,
        validation::validate_start_point,
    },
    errors::{DescentError, DescentResult},
    space::VectorSpace,
};

/// Minimize `f` starting from `x0` using the configured step policy and
/// conjugate method.
///
/// # Behavior
/// - Validates the starting point via `f.check(x0, data)`.
/// - Seeds a [`Descent`] engine (evaluating the gradient at `x0`
///   eagerly) and pulls iterations until a tolerance fires, the
///   iteration cap is reached, or the line search gives up.
/// - When `opts.verbose` is set and the `obs_slog` feature is enabled, a
///   terminal observer logs one record per iteration and per
///   line-search trial.
///
/// # Stopping rules
/// - `tols.tol_grad`: gradient norm below the threshold (converged).
/// - `tols.tol_cost`: absolute objective change between consecutive
///   iterations below the threshold (converged).
/// - `tols.max_iter`: iteration cap (not converged).
/// - A failed line search ends the run with the best point found so far
///   (not converged) when at least one iteration completed.
///
/// Without `max_iter`, a tolerance that never fires keeps the loop
/// running; supply a cap when the objective's behavior is unknown.
///
/// # Errors
/// - Propagates any error from `f.check` or from gradient evaluation at
///   `x0` (objectives without analytic gradients should go through
///   [`minimize_dense`]).
/// - [`DescentError::Diverged`] when an iterate stops being finite.
/// - [`DescentError::LineSearchFailed`] when the very first line search
///   fails, leaving no iterate to report.
///
/// # Returns
/// An [`OptimOutcome`] with the best point, its objective value and
/// gradient norm, the stopping status, and evaluation counters.
pub fn minimize<V, F>(
    f: &F, x0: V, data: &F::Data, opts: &DescentOptions, tols: &Tolerances,
) -> DescentResult<OptimOutcome<V>>
where
    V: VectorSpace,
    F: Objective<V>,
{
    f.check(&x0, data)?;
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let mut observer = crate::optimization::descent::observers::SlogObserver::term();
        let descent = Descent::with_observer(f, data, x0, opts.clone(), &mut observer)?;
        return drive(descent, tols);
    }
    let descent = Descent::new(f, data, x0, opts.clone())?;
    drive(descent, tols)
}

/// Minimize a dense objective, falling back to finite-difference
/// gradients when no analytic gradient is implemented.
///
/// This is the recommended entry point for `Array1<f64>` problems: it
/// validates the starting point, wraps the objective in an
/// [`FdAdapter`], and delegates to [`minimize`].
///
/// # Errors
/// - [`DescentError::InvalidStartPoint`] for a non-finite starting
///   coordinate.
/// - Everything [`minimize`] can return.
///
/// # Example
/// ```
/// use ndarray::array;
/// use rust_descent::optimization::{
///     descent::{
///         api::minimize_dense,
///         traits::{DescentOptions, Objective, Tolerances},
///         types::Point,
///     },
///     errors::{DescentError, DescentResult},
/// };
///
/// struct Sphere;
///
/// impl Objective<Point> for Sphere {
///     type Data = ();
///
///     fn value(&self, x: &Point, _data: &()) -> DescentResult<f64> {
///         Ok(x.dot(x))
///     }
/// }
///
/// let tols = Tolerances::new(Some(1e-6), None, Some(200))?;
/// let opts = DescentOptions::recommended();
/// let out = minimize_dense(&Sphere, array![0.4, -0.3], &(), &opts, &tols)?;
/// assert!(out.converged);
/// assert!(out.value < 1e-6);
/// # Ok::<(), DescentError>(())
/// ```
pub fn minimize_dense<F: Objective<Point>>(
    f: &F, x0: Point, data: &F::Data, opts: &DescentOptions, tols: &Tolerances,
) -> DescentResult<OptimOutcome<Point>> {
    validate_start_point(&x0)?;
    let adapter = FdAdapter::new(f, data);
    minimize(&adapter, x0, &(), opts, tols)
}

/// Pull iterations until a stopping rule fires and normalize the result.
fn drive<V, F>(mut descent: Descent<'_, V, F>, tols: &Tolerances) -> DescentResult<OptimOutcome<V>>
where
    V: VectorSpace,
    F: Objective<V>,
{
    let mut last: Option<OptimizerState<V>> = None;
    let mut prev_cost = f64::INFINITY;
    let mut converged = false;
    let mut status = "not terminated".to_string();

    loop {
        if let Some(max_iter) = tols.max_iter {
            if descent.iterations() as usize >= max_iter {
                status = "maximum iterations reached".to_string();
                break;
            }
        }
        match descent.next() {
            Some(Ok(state)) => {
                let grad_norm = state.grad1.norm();
                let cost = state.fx1;
                let cost_delta = (cost - prev_cost).abs();
                prev_cost = cost;
                last = Some(state);
                if let Some(tol) = tols.tol_grad {
                    if grad_norm < tol {
                        converged = true;
                        status = "gradient tolerance reached".to_string();
                        break;
                    }
                }
                if let Some(tol) = tols.tol_cost {
                    if cost_delta < tol {
                        converged = true;
                        status = "cost tolerance reached".to_string();
                        break;
                    }
                }
            }
            Some(Err(DescentError::LineSearchFailed { attempts, alpha })) => {
                if last.is_none() {
                    return Err(DescentError::LineSearchFailed { attempts, alpha });
                }
                status = format!("line search failed after {attempts} shrink attempts");
                break;
            }
            Some(Err(e)) => return Err(e),
            None => break,
        }
    }

    let iterations = descent.iterations() as usize;
    let fn_evals = descent.fn_evals();
    match last {
        Some(state) => OptimOutcome::new(
            Some(state.x1.clone()),
            state.fx1,
            converged,
            status,
            iterations,
            fn_evals,
            Some(&state.grad1),
        ),
        None => OptimOutcome::new(None, f64::NAN, converged, status, iterations, fn_evals, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::descent::traits::{
        BacktrackingOptions, ConjugateMethod, FnObjective, StepMethod,
    };
    use ndarray::{Array1, array};

    fn sphere() -> FnObjective<impl Fn(&Array1<f64>) -> f64, impl Fn(&Array1<f64>) -> Array1<f64>>
    {
        FnObjective::new(|x: &Array1<f64>| x.dot(x), |x: &Array1<f64>| x * 2.0)
    }

    fn recommended() -> DescentOptions {
        DescentOptions::recommended()
    }

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Gradient-tolerance and cost-tolerance convergence statuses.
    // - The iteration cap status and converged flag.
    // - Line-search failure with and without a completed iterate.
    // - Divergence propagation.
    // - Evaluation counters in the outcome.
    //
    // They intentionally DO NOT cover:
    // - Per-iteration mechanics (tested in iterates/line_search/beta).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify gradient-tolerance convergence on the sphere with the
    // recommended configuration.
    //
    // Given
    // -----
    // - f(x) = ||x||² from [10], tol_grad = 1e-6, max_iter = 200.
    //
    // Expect
    // ------
    // - converged is true with the gradient status, the value is near zero,
    //   grad_norm is below tolerance, and counters are populated.
    fn gradient_tolerance_convergence_on_sphere() {
        let problem = sphere();
        let tols = Tolerances::new(Some(1e-6), None, Some(200)).unwrap();

        let out = minimize(&problem, array![10.0], &(), &recommended(), &tols).unwrap();

        assert!(out.converged);
        assert_eq!(out.status, "gradient tolerance reached");
        assert!(out.value < 1e-10);
        assert!(out.grad_norm.unwrap() < 1e-6);
        assert!(out.iterations > 0);
        assert!(*out.fn_evals.get("cost_count").unwrap() > 0);
        assert!(*out.fn_evals.get("gradient_count").unwrap() > 0);
    }

    #[test]
    // Purpose
    // -------
    // Verify cost-tolerance convergence fires when consecutive objective
    // values stop moving.
    //
    // Given
    // -----
    // - The sphere from [5, 5], tol_cost = 1e-12, no gradient rule.
    //
    // Expect
    // ------
    // - converged with the cost status within the iteration cap.
    fn cost_tolerance_convergence_on_sphere() {
        let problem = sphere();
        let tols = Tolerances::new(None, Some(1e-12), Some(500)).unwrap();

        let out = minimize(&problem, array![5.0, 5.0], &(), &recommended(), &tols).unwrap();

        assert!(out.converged);
        assert_eq!(out.status, "cost tolerance reached");
    }

    #[test]
    // Purpose
    // -------
    // Verify the iteration cap reports a non-converged outcome with the
    // max-iterations status.
    //
    // Given
    // -----
    // - The sphere from [10] with max_iter = 3 and an unreachable gradient
    //   tolerance.
    //
    // Expect
    // ------
    // - exactly 3 iterations, converged false, max-iterations status.
    fn iteration_cap_reports_not_converged() {
        let problem = sphere();
        let tols = Tolerances::new(Some(1e-300), None, Some(3)).unwrap();

        let out = minimize(&problem, array![10.0], &(), &recommended(), &tols).unwrap();

        assert!(!out.converged);
        assert_eq!(out.status, "maximum iterations reached");
        assert_eq!(out.iterations, 3);
    }

    #[test]
    // Purpose
    // -------
    // Verify a line search that fails on the very first iteration surfaces as
    // an error, while one completed iterate downgrades the failure to a
    // non-converged outcome carrying the best point.
    //
    // Given
    // -----
    // - An objective whose reported gradient points away from descent, so no
    //   Armijo step exists, started fresh (error case).
    //
    // Expect
    // ------
    // - minimize returns Err(LineSearchFailed).
    fn first_iteration_line_search_failure_is_an_error() {
        let lying = FnObjective::new(
            |x: &Array1<f64>| x.dot(x),
            |x: &Array1<f64>| x * -2.0,
        );
        let opts = DescentOptions::new(
            StepMethod::Backtracking(BacktrackingOptions::new(1e-4, 0.5, 2.1, 30).unwrap()),
            ConjugateMethod::None,
            0.2,
            false,
        )
        .unwrap();
        let tols = Tolerances::new(Some(1e-6), None, Some(50)).unwrap();

        let err = minimize(&lying, array![1.0], &(), &opts, &tols).unwrap_err();
        assert!(matches!(err, DescentError::LineSearchFailed { attempts: 30, .. }));
    }

    #[test]
    // Purpose
    // -------
    // Verify divergence is propagated as an error, never silently absorbed
    // into an outcome.
    //
    // Given
    // -----
    // - A steep linear objective under a fixed step large enough to overflow
    //   the objective immediately.
    //
    // Expect
    // ------
    // - minimize returns Err(Diverged).
    fn divergence_is_propagated() {
        let steep = FnObjective::new(
            |x: &Array1<f64>| x[0] * 1e300,
            |_x: &Array1<f64>| array![1e300],
        );
        let opts = DescentOptions::new(
            StepMethod::Fixed(10.0),
            ConjugateMethod::None,
            0.2,
            false,
        )
        .unwrap();
        let tols = Tolerances::new(None, None, Some(10)).unwrap();

        let err = minimize(&steep, array![0.0], &(), &opts, &tols).unwrap_err();
        assert!(matches!(err, DescentError::Diverged { .. }));
    }

    #[test]
    // Purpose
    // -------
    // Verify the dense entry point rejects non-finite starting points and
    // succeeds on a value-only objective through the FD fallback.
    //
    // Given
    // -----
    // - A NaN coordinate in x0; then a clean run on a value-only quadratic.
    //
    // Expect
    // ------
    // - InvalidStartPoint for the NaN start; convergence for the clean run.
    fn dense_entry_point_validates_and_falls_back_to_fd() {
        struct ValueOnly;
        impl Objective<Point> for ValueOnly {
            type Data = ();
            fn value(&self, x: &Point, _data: &()) -> DescentResult<f64> {
                Ok(x.dot(x))
            }
        }

        let tols = Tolerances::new(Some(1e-6), None, Some(200)).unwrap();
        let err = minimize_dense(
            &ValueOnly,
            array![f64::NAN, 1.0],
            &(),
            &recommended(),
            &tols,
        )
        .unwrap_err();
        assert!(matches!(err, DescentError::InvalidStartPoint { index: 0, .. }));

        let out =
            minimize_dense(&ValueOnly, array![2.0, -1.0], &(), &recommended(), &tols).unwrap();
        assert!(out.converged);
        assert!(out.value < 1e-10);
    }
}
