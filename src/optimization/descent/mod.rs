//! descent — conjugate gradient descent over inner-product spaces.
//!
//! Purpose
//! -------
//! Provide an unconstrained nonlinear minimizer built from small,
//! separately testable parts: a conjugate-direction coefficient module,
//! a backtracking Armijo line search, a lazy iteration engine, and a
//! high-level `minimize` API with validated configuration. Callers
//! implement a single trait, [`Objective`], and either pull iterations
//! themselves or let [`minimize`] / [`minimize_dense`] drive the run.
//!
//! Key behaviors
//! -------------
//! - The engine ([`iterates::Descent`]) yields one completed
//!   [`OptimizerState`](state::OptimizerState) per pull, with no built-in
//!   iteration budget; termination policy belongs to the caller.
//! - Search directions blend the negative gradient with a scaled
//!   multiple of the current gradient, weighted by the configured
//!   conjugate coefficient ([`beta`]); conjugacy loss and degenerate
//!   denominators reset the coefficient to zero.
//! - Step sizes come from a fixed constant or a backtracking Armijo
//!   search ([`line_search`]) that grows the previous accepted step and
//!   reuses the accepted trial's evaluations.
//! - Observers ([`observers`]) receive one immutable snapshot per
//!   iteration and per line-search trial, fire-and-forget.
//! - The dense backend gets a finite-difference gradient fallback
//!   ([`finite_diff`]) when no analytic gradient is implemented.
//!
//! Invariants & assumptions
//! ------------------------
//! - Configuration types ([`DescentOptions`], [`BacktrackingOptions`],
//!   [`Tolerances`]) are validated on construction and treated as
//!   internally consistent afterwards.
//! - Every state the engine yields is finite in point, objective, and
//!   gradient; anything else surfaces as
//!   [`DescentError`](crate::optimization::errors::DescentError) and ends
//!   the run.
//! - Errors bubble up as `DescentResult<T>`; this module and its
//!   children never intentionally panic or use `unsafe`.
//!
//! Downstream usage
//! ----------------
//! - Problem crates implement [`Objective`] for their types, then call
//!   [`minimize`] (analytic gradients, any backend) or
//!   [`minimize_dense`] (dense backend, FD fallback) with a starting
//!   point, a [`DescentOptions`], and a [`Tolerances`].
//! - Callers needing custom termination or tracing construct
//!   [`iterates::Descent`] directly and attach a
//!   [`DescentObserver`](observers::DescentObserver).
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover the coefficient rules ([`beta`]),
//!   the Armijo invariant and shrink cap ([`line_search`]), state
//!   threading and divergence ([`iterates`]), FD fallback behavior
//!   ([`finite_diff`]), and configuration validation ([`traits`],
//!   [`validation`]).
//! - Integration tests exercise `minimize` end to end across methods and
//!   step policies.

pub mod api;
pub mod beta;
pub mod finite_diff;
pub mod iterates;
pub mod line_search;
pub mod observers;
pub mod state;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::{minimize, minimize_dense};
pub use self::traits::{
    BacktrackingOptions, ConjugateMethod, DescentOptions, Objective, OptimOutcome, StepMethod,
    Tolerances,
};
pub use self::types::{Cost, FnEvalMap, Grad, Point};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_descent::optimization::descent::prelude::*;
//
// to import the main descent surface in a single line.

pub mod prelude {
    pub use super::api::{minimize, minimize_dense};
    pub use super::iterates::Descent;
    pub use super::observers::{DescentObserver, NullObserver, VecObserver};
    pub use super::state::{BracketState, OptimizerState, TraceRecord};
    pub use super::traits::{
        BacktrackingOptions, ConjugateMethod, DescentOptions, Objective, OptimOutcome, StepMethod,
        Tolerances,
    };
    pub use super::types::{Cost, Grad, Point};
}
