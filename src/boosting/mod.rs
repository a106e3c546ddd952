//! boosting — associative combination of locally trained sub-models.
//!
//! Purpose
//! -------
//! Provide the windowed boosting ensemble: base models trained over
//! sliding windows of a data stream, combinable chunk by chunk with
//! retraining confined to chunk boundaries. This component shares no
//! machinery with the optimizer; it lives beside it as a separable
//! building block for streaming learners.
//!
//! Key behaviors
//! -------------
//! - `train1` lifts a single point; `combine` merges adjacent chunks;
//!   the empty ensemble is the identity.
//! - Combination is associative, so a stream can be folded in any
//!   grouping — including incrementally, one point at a time — and the
//!   resulting ensembles are structurally equal.
//!
//! Downstream usage
//! ----------------
//! - Implement [`Learner`] for the base model, pick a window radius, and
//!   either `collect()` points into a [`BoostModel`] or merge
//!   per-chunk ensembles built elsewhere.

pub mod ensemble;

pub use self::ensemble::{BoostModel, Learner};
