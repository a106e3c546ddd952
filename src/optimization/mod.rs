//! optimization — descent engine, vector-space interface, and unified
//! error surface.
//!
//! Purpose
//! -------
//! Provide a cohesive optimization layer: a conjugate gradient descent
//! engine with a backtracking line search, the abstract inner-product
//! space it operates over, and a single error/result surface. Callers
//! implement an objective, choose a step policy and conjugate method,
//! and obtain iterates or a normalized outcome without touching engine
//! internals.
//!
//! Key behaviors
//! -------------
//! - Expose the descent engine and its high-level `minimize` API
//!   (`descent`), including configuration of step policies, conjugate
//!   methods, and stopping criteria.
//! - Define the vector-space capability interface (`space`) that the
//!   engine is generic over, together with the dense `ndarray` backend.
//! - Normalize configuration issues, numerical failures, and runtime
//!   solver conditions into a single enum (`errors::DescentError`) with
//!   a common result alias (`DescentResult<T>`).
//!
//! Invariants & assumptions
//! ------------------------
//! - The engine assumes inputs are finite once validation has passed;
//!   invalid states are reported as `DescentError`, not panics.
//! - Objective implementations are expected to treat domain violations
//!   as recoverable errors surfaced through the optimization layer.
//! - Non-finite iterates terminate a run; the engine never silently
//!   continues past them.
//!
//! Conventions
//! -----------
//! - All entry points minimize; callers maximizing a function supply its
//!   negation.
//! - Dense points, gradients, and costs use the `ndarray`-based aliases
//!   (`Point`, `Grad`, `Cost`); generic backends implement
//!   `space::VectorSpace`.
//! - Public entrypoints that can fail return `DescentResult<T>`.
//! - This module avoids I/O; progress reporting goes through the
//!   observer interface, optionally backed by structured logging behind
//!   the `obs_slog` feature.
//!
//! Downstream usage
//! ----------------
//! - Problem crates implement `Objective` for their types and call
//!   `minimize`/`minimize_dense` with a starting point, options, and
//!   tolerances to obtain an `OptimOutcome`.
//! - Front-ends typically import the curated surface via
//!   `optimization::prelude::*`, which forwards the descent prelude and
//!   the core error types.
//!
//! Testing notes
//! -------------
//! - Unit tests in the submodules focus on local concerns: coefficient
//!   rules, the Armijo invariant, state threading, validation, and the
//!   dense backend's operations.
//! - Integration tests exercise end-to-end minimization workflows,
//!   verifying that configuration mistakes, numerical problems, and
//!   runtime failures all surface as sensible `DescentError` values.

pub mod descent;
pub mod errors;
pub mod space;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_descent::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::descent::prelude::*;
    pub use super::errors::{DescentError, DescentResult};
    pub use super::space::VectorSpace;
}
