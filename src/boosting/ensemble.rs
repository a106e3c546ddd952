//! boosting::ensemble — associative windowed ensembles.
//!
//! Purpose
//! -------
//! Maintain an ensemble of base models trained over every contiguous
//! window of width `2K + 1` in a data stream, in a form that supports
//! online construction: ensembles over adjacent chunks can be merged,
//! and merging retrains only the sub-models whose windows span the
//! chunk boundary.
//!
//! Key behaviors
//! -------------
//! - [`BoostModel::train1`] lifts a single point into an ensemble with
//!   no trained sub-models.
//! - [`BoostModel::combine`] concatenates the data of two ensembles and
//!   trains one new sub-model per window position across the boundary
//!   region (the last `2K` points of the left ensemble followed by the
//!   first `2K` points of the right). The merged model sequence is the
//!   left models, then the boundary models, then the right models.
//! - The empty ensemble is the identity for `combine`.
//! - The weight sequence is cleared on every combination; weighting is
//!   left to downstream consumers.
//!
//! Invariants & assumptions
//! ------------------------
//! - `models` holds exactly one sub-model per window of width `2K + 1`
//!   in `data`, in stream order, for every ensemble built from `train1`
//!   and `combine`. Because boundary windows always cover exactly the
//!   points on both sides of a merge, `combine` is associative:
//!   `(a.combine(b)).combine(c) == a.combine(b.combine(c))`.
//! - [`Learner::fit`] is assumed deterministic in its window; the
//!   associativity law is structural equality of data and model
//!   sequences.
//! - `num_points` always equals `data.len()`.
//!
//! Conventions
//! -----------
//! - The window radius `K` is a const generic, so only ensembles over
//!   the same radius can be combined and the identity element needs no
//!   runtime configuration.
//! - `W`, the weight type, is carried in the type for downstream use
//!   even though every construction path currently leaves it empty.

/// Capability interface for base models trained on data windows.
///
/// Implementations are external to this crate; the ensemble only
/// requires that a model can be fitted from a slice of points and that
/// fitting is deterministic.
pub trait Learner<P>: Sized {
    /// Train a model on one window of points.
    fn fit(window: &[P]) -> Self;
}

/// Ensemble of base models over sliding windows of width `2K + 1`.
///
/// Fields are private to preserve the window invariant; use
/// [`BoostModel::train1`], [`BoostModel::combine`], or `collect()` from
/// an iterator of points to build one, and the accessors to inspect it.
#[derive(Debug, Clone, PartialEq)]
pub struct BoostModel<const K: usize, W, M, P> {
    data: Vec<P>,
    models: Vec<M>,
    weights: Vec<W>,
    num_points: usize,
}

impl<const K: usize, W, M, P> BoostModel<K, W, M, P> {
    /// The identity ensemble: no data, no models, count zero.
    pub fn empty() -> Self {
        Self { data: Vec::new(), models: Vec::new(), weights: Vec::new(), num_points: 0 }
    }

    /// Ensemble holding just `point`, with no sub-model trained yet.
    pub fn train1(point: P) -> Self {
        Self { data: vec![point], models: Vec::new(), weights: Vec::new(), num_points: 1 }
    }

    /// Window width used for sub-model training.
    pub const fn window_width() -> usize {
        2 * K + 1
    }

    /// The data stream, in order.
    pub fn data(&self) -> &[P] {
        &self.data
    }

    /// Trained sub-models, one per window position, in stream order.
    pub fn models(&self) -> &[M] {
        &self.models
    }

    /// Weight sequence; empty on every ensemble built by this module.
    pub fn weights(&self) -> &[W] {
        &self.weights
    }

    /// Number of data points.
    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// True for the identity ensemble.
    pub fn is_empty(&self) -> bool {
        self.num_points == 0
    }
}

impl<const K: usize, W, M, P> BoostModel<K, W, M, P>
where
    M: Learner<P>,
    P: Clone,
{
    /// Merge two ensembles over adjacent chunks of the same stream.
    ///
    /// Retrains only the boundary region: the last `2K` points of `self`
    /// together with the first `2K` points of `other`, sliding a window
    /// of width `2K + 1` one point at a time. Existing sub-models on
    /// both sides are kept; the weight sequence of the result is empty.
    pub fn combine(self, other: Self) -> Self {
        let overlap = 2 * K;
        let Self { data: mut left_data, models: mut left_models, weights: _, num_points: left_n } =
            self;
        let Self {
            data: mut right_data,
            models: mut right_models,
            weights: _,
            num_points: right_n,
        } = other;

        let left_start = left_data.len().saturating_sub(overlap);
        let right_take = overlap.min(right_data.len());
        let mut boundary: Vec<P> =
            Vec::with_capacity(left_data.len() - left_start + right_take);
        boundary.extend_from_slice(&left_data[left_start..]);
        boundary.extend_from_slice(&right_data[..right_take]);

        let mut boundary_models: Vec<M> =
            boundary.windows(Self::window_width()).map(|window| M::fit(window)).collect();

        left_models.append(&mut boundary_models);
        left_models.append(&mut right_models);
        left_data.append(&mut right_data);

        Self {
            data: left_data,
            models: left_models,
            weights: Vec::new(),
            num_points: left_n + right_n,
        }
    }
}

impl<const K: usize, W, M, P> Default for BoostModel<K, W, M, P> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<const K: usize, W, M, P> FromIterator<P> for BoostModel<K, W, M, P>
where
    M: Learner<P>,
    P: Clone,
{
    /// Build an ensemble by folding `train1` over a stream in order.
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        iter.into_iter()
            .map(Self::train1)
            .fold(Self::empty(), |acc, singleton| acc.combine(singleton))
    }
}
