//! Property tests for the boosting ensemble laws.
//!
//! Purpose
//! -------
//! - Check the semigroup laws of `BoostModel::combine` over randomized
//!   streams and split points, not just the hand-picked chunks covered
//!   by the unit tests.
//! - Confirm that incremental, chunked, and batch construction of an
//!   ensemble agree structurally.
//!
//! Coverage
//! --------
//! - `boosting::ensemble`:
//!   - Associativity over arbitrary three-way splits.
//!   - Identity element laws against random ensembles.
//!   - Window coverage counts for arbitrary stream lengths.
//!
//! Exclusions
//! ----------
//! - Deterministic shape checks and boundary cases at fixed radii —
//!   covered by the unit tests in `src/boosting/ensemble.rs`.
use proptest::prelude::*;
use rust_descent::boosting::{BoostModel, Learner};

/// Base model remembering the mean of its training window.
#[derive(Debug, Clone, PartialEq)]
struct MeanModel {
    mean: f64,
}

impl Learner<f64> for MeanModel {
    fn fit(window: &[f64]) -> Self {
        let sum: f64 = window.iter().sum();
        Self { mean: sum / window.len() as f64 }
    }
}

type Ensemble = BoostModel<1, f64, MeanModel, f64>;

fn from_chunk(chunk: &[f64]) -> Ensemble {
    chunk.iter().copied().collect()
}

proptest! {
    // Purpose
    // -------
    // Verify associativity of combine over arbitrary three-way splits of a
    // random stream, and agreement with batch construction.
    //
    // Given
    // -----
    // - A stream of up to 24 finite values and two independent split points.
    //
    // Expect
    // ------
    // - (A ⊕ B) ⊕ C == A ⊕ (B ⊕ C) == the ensemble over the whole stream.
    #[test]
    fn combine_is_associative_over_random_splits(
        stream in prop::collection::vec(-100.0f64..100.0, 0..24),
        cut_a in 0usize..25,
        cut_b in 0usize..25,
    ) {
        let first = cut_a.min(stream.len());
        let second = cut_b.min(stream.len());
        let (lo, hi) = if first <= second { (first, second) } else { (second, first) };

        let a = from_chunk(&stream[..lo]);
        let b = from_chunk(&stream[lo..hi]);
        let c = from_chunk(&stream[hi..]);

        let left = a.clone().combine(b.clone()).combine(c.clone());
        let right = a.combine(b.combine(c));
        let batch = from_chunk(&stream);

        prop_assert_eq!(&left, &right);
        prop_assert_eq!(&left, &batch);
    }

    // Purpose
    // -------
    // Verify the identity laws against random ensembles.
    //
    // Given
    // -----
    // - A stream of up to 16 finite values.
    //
    // Expect
    // ------
    // - empty ⊕ A == A == A ⊕ empty.
    #[test]
    fn empty_is_identity_over_random_streams(
        stream in prop::collection::vec(-100.0f64..100.0, 0..16),
    ) {
        let a = from_chunk(&stream);

        prop_assert_eq!(&Ensemble::empty().combine(a.clone()), &a);
        prop_assert_eq!(&a.clone().combine(Ensemble::empty()), &a);
    }

    // Purpose
    // -------
    // Verify window coverage: an ensemble over n points carries
    // max(n - 2k, 0) sub-models, each the mean of its window.
    //
    // Given
    // -----
    // - A stream of up to 20 finite values at radius 1.
    //
    // Expect
    // ------
    // - Model count and per-window means match direct computation.
    #[test]
    fn model_sequence_covers_every_window(
        stream in prop::collection::vec(-100.0f64..100.0, 0..20),
    ) {
        let ensemble = from_chunk(&stream);
        let expected = stream.len().saturating_sub(2);

        prop_assert_eq!(ensemble.models().len(), expected);
        prop_assert_eq!(ensemble.num_points(), stream.len());
        for (model, window) in ensemble.models().iter().zip(stream.windows(3)) {
            let mean = window.iter().sum::<f64>() / 3.0;
            prop_assert!((model.mean - mean).abs() < 1e-12);
        }
    }
}
