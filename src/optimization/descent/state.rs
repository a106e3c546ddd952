//! descent::state — values threaded through and emitted by the engine.
//!
//! Purpose
//! -------
//! Define the record carried between iterations ([`OptimizerState`]), the
//! per-trial line-search record ([`BracketState`]), and the tagged
//! snapshot type handed to observers ([`TraceRecord`]).
//!
//! Key behaviors
//! -------------
//! - [`OptimizerState`] is replaced wholesale every iteration; nothing
//!   mutates it field-by-field from outside the iteration step.
//! - The objective value of a freshly constructed state is the `+∞`
//!   sentinel, meaning "not yet evaluated"; the first iteration resolves
//!   it before opening a line search.
//! - The previous gradient of the initial state is seeded to twice the
//!   starting gradient so the first conjugacy check fires and the first
//!   direction is the plain negative gradient.
//! - [`BracketState`] is rebuilt at every backtracking trial, never
//!   mutated in place.
//!
//! Conventions
//! -----------
//! - Generic over any [`VectorSpace`] point type `V`.
//! - Observers receive [`TraceRecord`] values; the enum variant is the
//!   type tag that generic trace consumers dispatch on.
use crate::optimization::{
    descent::{beta::BetaDiagnostic, types::INITIAL_STEP_SIZE},
    space::VectorSpace,
};

/// State of one completed optimizer iteration.
///
/// Fields
/// ------
/// - `x1`: current point.
/// - `fx1`: objective value at `x1`; `+∞` when not yet evaluated.
/// - `grad1`: gradient at `x1`.
/// - `step_size`: step size used to reach `x1` from the previous point.
/// - `grad_prev`: gradient at the previous point.
/// - `dir_prev`: previous search direction.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerState<V> {
    pub x1: V,
    pub fx1: f64,
    pub grad1: V,
    pub step_size: f64,
    pub grad_prev: V,
    pub dir_prev: V,
}

impl<V: VectorSpace> OptimizerState<V> {
    /// Seed the state for a fresh run at `x0` with gradient `grad0`.
    ///
    /// The objective is left unevaluated (`+∞` sentinel), the step size
    /// starts at a small positive constant, the previous gradient is
    /// `2 * grad0` (which makes the first conjugacy check report loss),
    /// and the previous direction is the zero vector.
    pub fn initial(x0: V, grad0: V) -> Self {
        let grad_prev = grad0.scale(2.0);
        let dir_prev = grad0.zeros_like();
        Self {
            x1: x0,
            fx1: f64::INFINITY,
            grad1: grad0,
            step_size: INITIAL_STEP_SIZE,
            grad_prev,
            dir_prev,
        }
    }

    /// True when the objective at `x1` has been evaluated.
    pub fn evaluated(&self) -> bool {
        self.fx1.is_finite()
    }
}

/// One backtracking trial: a candidate step length with the evaluations
/// taken at the candidate point and the base data the Armijo condition
/// compares against.
#[derive(Debug, Clone, PartialEq)]
pub struct BracketState<V> {
    /// Candidate step length.
    pub alpha: f64,
    /// Objective value at the candidate point.
    pub fx: f64,
    /// Gradient at the candidate point.
    pub grad: V,
    /// Search direction being probed.
    pub direction: V,
    /// Point the search started from.
    pub base_point: V,
    /// Objective value at the base point.
    pub base_f: f64,
    /// Gradient at the base point.
    pub base_grad: V,
}

/// Tagged snapshot handed to observers, one per engine step.
///
/// The variant is the type identifier: `Iteration` after each completed
/// optimizer step, `Bracket` after each evaluated line-search trial.
#[derive(Debug, Clone, Copy)]
pub enum TraceRecord<'a, V> {
    Iteration {
        /// 1-based count of completed iterations.
        iter: u64,
        /// Effective beta used for the step's direction.
        beta: f64,
        /// How that beta was decided.
        diagnostic: BetaDiagnostic,
        /// The emitted state.
        state: &'a OptimizerState<V>,
    },
    Bracket {
        /// 1-based count of the iteration the search belongs to.
        iter: u64,
        /// 0-based trial index within the search.
        attempt: usize,
        /// The trial record.
        bracket: &'a BracketState<V>,
    },
}
