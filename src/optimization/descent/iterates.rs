//! descent::iterates — the conjugate gradient iteration engine.
//!
//! Purpose
//! -------
//! Drive the per-iteration algorithm as a lazy sequence: each call to
//! [`Descent::next`] performs exactly one iteration — conjugacy test,
//! beta coefficient, direction update, step-size resolution, move — and
//! yields the completed [`OptimizerState`]. The caller owns the
//! termination policy: stop pulling and the computation stops, with no
//! side effects beyond the states already returned.
//!
//! Key behaviors
//! -------------
//! - No iteration budget is built in; the iterator is potentially
//!   infinite. The high-level [`minimize`](crate::optimization::descent::api::minimize)
//!   API layers tolerances on top.
//! - The search direction is `-grad1 + (0.1 * beta) * grad1`: the
//!   negative gradient blended with a scaled multiple of the current
//!   gradient itself, not the previous direction.
//! - Step sizes come from the configured [`StepMethod`]: a fixed
//!   constant, or a backtracking search opened at `growth *
//!   previous_step` whose accepted evaluation is reused for the new
//!   state.
//! - After each completed step the attached observer receives a
//!   [`TraceRecord::Iteration`] snapshot; during backtracking it
//!   receives one [`TraceRecord::Bracket`] per evaluated trial.
//! - A terminal error (divergence, line-search failure, a user error
//!   from the objective) is yielded once; afterwards the iterator is
//!   fused and returns `None`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every yielded state has a finite objective value, finite gradient,
//!   and finite point; non-finite evaluations surface as
//!   [`DescentError::Diverged`] instead of being propagated silently.
//! - State is replaced wholesale between iterations; nothing outside
//!   this module mutates it.
//!
//! Downstream usage
//! ----------------
//! - Callers wanting full control construct [`Descent`] directly and
//!   pull iterations, optionally attaching an observer.
//! - The high-level API wraps this iterator with stopping rules and
//!   outcome normalization.
use crate::optimization::{
    descent::{
        beta::{BetaDiagnostic, effective_beta},
        line_search::backtrack,
        observers::{DescentObserver, emit},
        state::{OptimizerState, TraceRecord},
        traits::{DescentOptions, Objective, StepMethod},
        types::{DIRECTION_BLEND, EvalCounters, FnEvalMap},
    },
    errors::{DescentError, DescentResult},
    space::VectorSpace,
};

/// Lazy iterator over optimizer iterations.
///
/// Yields `DescentResult<OptimizerState<V>>`, one completed iteration
/// per call. See the module docs for the step algorithm and failure
/// semantics.
pub struct Descent<'a, V, F>
where
    V: VectorSpace,
    F: Objective<V>,
{
    problem: &'a F,
    data: &'a F::Data,
    opts: DescentOptions,
    state: Option<OptimizerState<V>>,
    observer: Option<&'a mut dyn DescentObserver<V>>,
    counters: EvalCounters,
    completed: u64,
}

impl<'a, V, F> Descent<'a, V, F>
where
    V: VectorSpace,
    F: Objective<V>,
{
    /// Seed an engine at `x0` with no observer attached.
    ///
    /// The gradient at `x0` is evaluated eagerly; the objective is left
    /// unevaluated until the first iteration needs it.
    ///
    /// # Errors
    /// - Propagates any error from the gradient evaluation, including
    ///   [`DescentError::GradientNotImplemented`] for objectives without
    ///   an analytic gradient (wrap those in the dense finite-difference
    ///   adapter instead).
    /// - [`DescentError::Diverged`] when the starting gradient is not
    ///   finite.
    pub fn new(
        problem: &'a F, data: &'a F::Data, x0: V, opts: DescentOptions,
    ) -> DescentResult<Self> {
        Self::build(problem, data, x0, opts, None)
    }

    /// Seed an engine at `x0` with an observer attached.
    pub fn with_observer(
        problem: &'a F, data: &'a F::Data, x0: V, opts: DescentOptions,
        observer: &'a mut dyn DescentObserver<V>,
    ) -> DescentResult<Self> {
        Self::build(problem, data, x0, opts, Some(observer))
    }

    fn build(
        problem: &'a F, data: &'a F::Data, x0: V, opts: DescentOptions,
        observer: Option<&'a mut dyn DescentObserver<V>>,
    ) -> DescentResult<Self> {
        let mut counters = EvalCounters::default();
        let grad0 = problem.grad(&x0, data)?;
        counters.grad += 1;
        if !grad0.all_finite() || !x0.all_finite() {
            return Err(DescentError::Diverged { value: f64::NAN });
        }
        Ok(Self {
            problem,
            data,
            opts,
            state: Some(OptimizerState::initial(x0, grad0)),
            observer,
            counters,
            completed: 0,
        })
    }

    /// Evaluation counters accumulated so far.
    pub fn fn_evals(&self) -> FnEvalMap {
        self.counters.to_map()
    }

    /// Number of completed iterations.
    pub fn iterations(&self) -> u64 {
        self.completed
    }

    /// The state the next iteration will start from, unless the engine
    /// has already yielded a terminal error.
    pub fn state(&self) -> Option<&OptimizerState<V>> {
        self.state.as_ref()
    }

    fn eval_cost(&mut self, x: &V) -> DescentResult<f64> {
        let value = self.problem.value(x, self.data)?;
        self.counters.cost += 1;
        Ok(value)
    }

    fn eval_grad(&mut self, x: &V) -> DescentResult<V> {
        let grad = self.problem.grad(x, self.data)?;
        self.counters.grad += 1;
        Ok(grad)
    }

    /// One full iteration from `state`, returning the new state and the
    /// beta decision that shaped its direction.
    fn step(
        &mut self, state: &OptimizerState<V>,
    ) -> DescentResult<(OptimizerState<V>, f64, BetaDiagnostic)> {
        // Conjugacy test, raw formula, restart policy.
        let (beta, diagnostic) = effective_beta(
            self.opts.method,
            &state.grad1,
            &state.grad_prev,
            &state.dir_prev,
            self.opts.gamma,
        );

        // dir = -grad1 + (0.1 * beta) * grad1; the blend uses the current
        // gradient itself, not the previous direction.
        let direction = state.grad1.negate().plus(&state.grad1.scale(DIRECTION_BLEND * beta));

        // Resolve the objective at the current point, honoring the
        // not-yet-evaluated sentinel of a freshly seeded state.
        let base_f = if state.evaluated() {
            state.fx1
        } else {
            let value = match self.eval_cost(&state.x1) {
                Ok(value) => value,
                Err(DescentError::NonFiniteCost { value }) => value,
                Err(e) => return Err(e),
            };
            if !value.is_finite() {
                return Err(DescentError::Diverged { value });
            }
            value
        };

        let (x, fx, grad, step_size) = match self.opts.step {
            StepMethod::Fixed(alpha) => {
                let x = state.x1.plus(&direction.scale(alpha));
                let fx = match self.eval_cost(&x) {
                    Ok(value) => value,
                    Err(DescentError::NonFiniteCost { value }) => value,
                    Err(e) => return Err(e),
                };
                if !fx.is_finite() {
                    return Err(DescentError::Diverged { value: fx });
                }
                let grad = self.eval_grad(&x)?;
                (x, fx, grad, alpha)
            }
            StepMethod::Backtracking(ls_opts) => {
                let trial = ls_opts.growth * state.step_size;
                let bracket = backtrack(
                    self.problem,
                    self.data,
                    &ls_opts,
                    &state.x1,
                    base_f,
                    &state.grad1,
                    &direction,
                    trial,
                    self.completed + 1,
                    &mut self.observer,
                    &mut self.counters,
                )?;
                let x = state.x1.plus(&direction.scale(bracket.alpha));
                (x, bracket.fx, bracket.grad, bracket.alpha)
            }
        };

        if !fx.is_finite() || !grad.all_finite() || !x.all_finite() {
            return Err(DescentError::Diverged { value: fx });
        }

        let next = OptimizerState {
            x1: x,
            fx1: fx,
            grad1: grad,
            step_size,
            grad_prev: state.grad1.clone(),
            dir_prev: direction,
        };
        Ok((next, beta, diagnostic))
    }
}

impl<'a, V, F> Iterator for Descent<'a, V, F>
where
    V: VectorSpace,
    F: Objective<V>,
{
    type Item = DescentResult<OptimizerState<V>>;

    fn next(&mut self) -> Option<Self::Item> {
        let state = self.state.take()?;
        match self.step(&state) {
            Ok((next, beta, diagnostic)) => {
                self.completed += 1;
                emit(
                    &mut self.observer,
                    TraceRecord::Iteration {
                        iter: self.completed,
                        beta,
                        diagnostic,
                        state: &next,
                    },
                );
                self.state = Some(next.clone());
                Some(Ok(next))
            }
            // Terminal: leave the state slot empty so the iterator fuses.
            Err(e) => Some(Err(e)),
        }
    }
}
