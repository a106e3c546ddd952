//! rust_descent — conjugate gradient descent and windowed boosting
//! ensembles.
//!
//! Purpose
//! -------
//! Serve as the crate root for two independent components: an
//! unconstrained nonlinear minimizer (conjugate gradient descent with a
//! backtracking Armijo line search, generic over an inner-product
//! vector space) and an associative boosting ensemble that trains base
//! models over sliding windows of a data stream.
//!
//! Key behaviors
//! -------------
//! - Re-export the core modules (`optimization` and `boosting`) as the
//!   public crate surface.
//! - The optimizer yields a lazy sequence of iteration states that a
//!   caller can consume one step at a time and abandon at any point;
//!   observers receive an immutable snapshot after every step.
//! - The boosting ensemble combines associatively: merging two ensembles
//!   retrains only the sub-models whose windows span the boundary, so
//!   incremental and batch construction agree.
//!
//! Invariants & assumptions
//! ------------------------
//! - All public optimizer entry points validate their configuration on
//!   construction and report failures as
//!   [`optimization::errors::DescentError`] values, never panics.
//! - Vector backends satisfy the algebraic laws documented on
//!   [`optimization::space::VectorSpace`]; the crate ships a dense
//!   `ndarray` backend and is otherwise backend-agnostic.
//! - Ensemble combination is total: any two ensembles over the same
//!   window radius, base model, and point type can be combined.
//!
//! Conventions
//! -----------
//! - Optimization always minimizes; maximization is the caller negating
//!   its objective.
//! - Structured per-iteration logging is opt-in behind the `obs_slog`
//!   feature; the core engine performs no I/O of its own.
//!
//! Downstream usage
//! ----------------
//! - Most callers want `optimization::descent::prelude::*` and either
//!   [`optimization::descent::minimize`] (analytic gradients) or
//!   [`optimization::descent::minimize_dense`] (finite-difference
//!   fallback on the dense backend).
//! - Streaming learners build [`boosting::BoostModel`] values with
//!   `train1`/`collect` and merge them with `combine`.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner
//!   modules; end-to-end minimization and ensemble laws are covered by
//!   the integration tests under `tests/`.

pub mod boosting;
pub mod optimization;
