//! Backtracking line search with an Armijo acceptance rule.
//!
//! The search opens at the supplied trial step (the engine grows the
//! previous accepted step before calling in) and halves it until the
//! sufficient-decrease condition
//!
//! ```text
//! f(x0 + alpha * dir) <= f(x0) + c1 * alpha * ⟨∇f(x0), dir⟩
//! ```
//!
//! holds, or the shrink budget runs out. Each evaluated trial costs one
//! objective and one gradient evaluation, and the accepted trial is
//! returned whole — step length, objective value, and gradient — so the
//! caller never re-evaluates the point it moves to.
//!
//! Trials whose objective comes back non-finite (an overshoot into a
//! barrier, a cost adapter reporting [`DescentError::NonFiniteCost`])
//! are treated as failed trials and shrunk past, without spending a
//! gradient evaluation on them. Genuine gradient-evaluation errors
//! surface immediately.
use crate::optimization::{
    descent::{
        observers::{DescentObserver, emit},
        state::{BracketState, TraceRecord},
        traits::{BacktrackingOptions, Objective},
        types::EvalCounters,
    },
    errors::{DescentError, DescentResult},
    space::VectorSpace,
};

/// Run one backtracking search along `direction` from `base_point`.
///
/// # Parameters
/// - `trial`: opening step length (already grown by the caller).
/// - `base_f` / `base_grad`: objective and gradient at `base_point`,
///   reused for every Armijo comparison.
/// - `iter`: 1-based iteration count, forwarded to bracket records.
///
/// # Returns
/// The accepted [`BracketState`]; its `fx` and `grad` are the
/// evaluations at the accepted point.
///
/// # Errors
/// - [`DescentError::LineSearchFailed`] when `max_shrinks` trials all
///   fail the Armijo condition — for instance when `direction` is not a
///   descent direction, so no step in it can decrease the objective
///   enough.
/// - Any error other than `NonFiniteCost` raised by the objective, and
///   any error raised by the gradient, propagates unchanged.
#[allow(clippy::too_many_arguments)]
pub(crate) fn backtrack<V, F>(
    problem: &F, data: &F::Data, opts: &BacktrackingOptions, base_point: &V, base_f: f64,
    base_grad: &V, direction: &V, trial: f64, iter: u64,
    observer: &mut Option<&mut dyn DescentObserver<V>>, counters: &mut EvalCounters,
) -> DescentResult<BracketState<V>>
where
    V: VectorSpace,
    F: Objective<V>,
{
    let dphi0 = base_grad.dot(direction);
    let mut alpha = trial;
    for attempt in 0..opts.max_shrinks {
        let candidate = base_point.plus(&direction.scale(alpha));
        let fx = match problem.value(&candidate, data) {
            Ok(value) => value,
            // A cost adapter may report non-finite trial values as errors;
            // for the search they are just failed trials.
            Err(DescentError::NonFiniteCost { value }) => value,
            Err(e) => return Err(e),
        };
        counters.cost += 1;
        if !fx.is_finite() {
            alpha *= opts.contraction;
            continue;
        }

        let grad = problem.grad(&candidate, data)?;
        counters.grad += 1;
        let bracket = BracketState {
            alpha,
            fx,
            grad,
            direction: direction.clone(),
            base_point: base_point.clone(),
            base_f,
            base_grad: base_grad.clone(),
        };
        emit(observer, TraceRecord::Bracket { iter, attempt, bracket: &bracket });

        let rhs = base_f + opts.c1 * alpha * dphi0;
        if rhs.is_finite() && fx <= rhs {
            return Ok(bracket);
        }
        alpha *= opts.contraction;
    }

    Err(DescentError::LineSearchFailed {
        attempts: opts.max_shrinks,
        alpha: alpha / opts.contraction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::descent::traits::FnObjective;
    use ndarray::{Array1, array};

    fn quadratic() -> FnObjective<impl Fn(&Array1<f64>) -> f64, impl Fn(&Array1<f64>) -> Array1<f64>>
    {
        FnObjective::new(|x: &Array1<f64>| x.dot(x), |x: &Array1<f64>| x * 2.0)
    }

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The Armijo invariant on the accepted step.
    // - Reuse of the accepted trial's evaluations.
    // - Shrinking past non-finite trial values.
    // - The shrink cap on directions that admit no acceptable step.
    //
    // They intentionally DO NOT cover:
    // - How the engine chooses the opening trial step (tested in iterates).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the accepted step always satisfies the Armijo condition and that
    // the returned bracket carries the evaluations at the accepted point.
    //
    // Given
    // -----
    // - f(x) = ||x||² at base [10] along direction -grad = [-20], opening at
    //   several different trial steps.
    //
    // Expect
    // ------
    // - f(x0 + a*d) <= f(x0) + c1*a*⟨g0, d⟩ for the accepted a, and the
    //   bracket's fx/grad match direct evaluation.
    fn accepted_step_satisfies_armijo_and_reuses_evaluations() {
        let problem = quadratic();
        let opts = BacktrackingOptions::default();
        let base = array![10.0];
        let base_f = 100.0;
        let base_grad = array![20.0];
        let direction = array![-20.0];
        let dphi0 = -400.0;

        for trial in [0.21, 1.0, 7.3] {
            let mut counters = EvalCounters::default();
            let mut observer: Option<&mut dyn DescentObserver<Array1<f64>>> = None;
            let bracket = backtrack(
                &problem,
                &(),
                &opts,
                &base,
                base_f,
                &base_grad,
                &direction,
                trial,
                1,
                &mut observer,
                &mut counters,
            )
            .expect("quadratic along -grad admits an Armijo step");

            let accepted = base.plus(&direction.scale(bracket.alpha));
            let rhs = base_f + opts.c1 * bracket.alpha * dphi0;
            assert!(bracket.fx <= rhs, "Armijo violated for trial {trial}");
            assert_eq!(bracket.fx, accepted.dot(&accepted));
            assert_eq!(bracket.grad, &accepted * 2.0);
            assert!(counters.cost >= 1 && counters.grad >= 1);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that non-finite trial values are shrunk past without gradient
    // evaluations, and that the search still accepts once back in range.
    //
    // Given
    // -----
    // - f(x) = ||x||² inside |x| <= 5 and +∞ outside, base [1], direction
    //   [-2], opening trial 10 (lands far outside the finite region).
    //
    // Expect
    // ------
    // - The search accepts a step with a finite objective; gradient
    //   evaluations are fewer than cost evaluations.
    fn non_finite_trials_are_shrunk_past() {
        let problem = FnObjective::new(
            |x: &Array1<f64>| {
                if x[0].abs() > 5.0 { f64::INFINITY } else { x.dot(x) }
            },
            |x: &Array1<f64>| x * 2.0,
        );
        let opts = BacktrackingOptions::default();
        let base = array![1.0];
        let base_grad = array![2.0];
        let direction = array![-2.0];

        let mut counters = EvalCounters::default();
        let mut observer: Option<&mut dyn DescentObserver<Array1<f64>>> = None;
        let bracket = backtrack(
            &problem,
            &(),
            &opts,
            &base,
            1.0,
            &base_grad,
            &direction,
            10.0,
            1,
            &mut observer,
            &mut counters,
        )
        .expect("search should recover once trials land in the finite region");

        assert!(bracket.fx.is_finite());
        assert!(bracket.alpha < 10.0);
        assert!(counters.grad < counters.cost, "infinite trials must not cost gradient evals");
    }

    #[test]
    // Purpose
    // -------
    // Verify the shrink cap: a direction in which the objective only grows
    // exhausts the budget and reports LineSearchFailed.
    //
    // Given
    // -----
    // - f(x) = ||x||² at base [1] along the ascent direction [+2], with a
    //   base gradient claiming descent so the Armijo slope is negative.
    //
    // Expect
    // ------
    // - Err(LineSearchFailed) carrying the configured attempt count.
    fn ascent_direction_exhausts_shrink_budget() {
        let problem = quadratic();
        let opts = BacktrackingOptions::new(1e-4, 0.5, 2.1, 20).unwrap();
        let base = array![1.0];
        let base_grad = array![-2.0];
        let direction = array![2.0];

        let mut counters = EvalCounters::default();
        let mut observer: Option<&mut dyn DescentObserver<Array1<f64>>> = None;
        let err = backtrack(
            &problem,
            &(),
            &opts,
            &base,
            1.0,
            &base_grad,
            &direction,
            1.0,
            1,
            &mut observer,
            &mut counters,
        )
        .expect_err("no step along an ascent direction satisfies Armijo");

        match err {
            DescentError::LineSearchFailed { attempts, .. } => assert_eq!(attempts, 20),
            other => panic!("Expected LineSearchFailed, got {other:?}"),
        }
        assert_eq!(counters.cost, 20);
    }
}
