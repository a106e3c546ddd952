//! descent::types — shared numeric aliases and engine constants.
//!
//! Purpose
//! -------
//! Centralize the concrete numeric types of the dense backend and the
//! named constants that govern the iteration step, so the rest of the
//! descent code refers to one vocabulary and the tuning knobs live in a
//! single place.
//!
//! Key behaviors
//! -------------
//! - Define canonical aliases for dense points, gradients, and scalar
//!   costs (`Point`, `Grad`, `Cost`).
//! - Provide the standard map type for function-evaluation counters
//!   (`FnEvalMap`).
//! - Name the engine constants: the initial step seed, the line-search
//!   growth and contraction factors, the Armijo tolerance, the
//!   conjugacy-loss threshold, the direction blend factor, the
//!   degenerate-denominator floor, and the shrink cap.
//!
//! Conventions
//! -----------
//! - `Point` and `Grad` are treated conceptually as column vectors of
//!   equal length.
//! - The constants below are defaults; every one of them is overridable
//!   through [`BacktrackingOptions`](crate::optimization::descent::traits::BacktrackingOptions)
//!   or [`DescentOptions`](crate::optimization::descent::traits::DescentOptions)
//!   except the direction blend and the degeneracy floor, which are part
//!   of the update rule itself.
//!
//! Testing notes
//! -------------
//! - This module only defines aliases and constants; correctness is
//!   exercised by the surrounding descent modules.
use ndarray::Array1;
use std::collections::HashMap;

/// Dense point in the default `ndarray` backend.
pub type Point = Array1<f64>;

/// Dense gradient vector, matching the shape of [`Point`].
pub type Grad = Array1<f64>;

/// Scalar objective value.
pub type Cost = f64;

/// Function-evaluation counters reported by the engine.
///
/// Maps counter names (`"cost_count"`, `"gradient_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Step size seeded into the initial state before the first iteration.
pub const INITIAL_STEP_SIZE: f64 = 0.1;

/// Default growth applied to the previous accepted step when opening a
/// line search. Re-expands the trial step after a small step was needed.
pub const DEFAULT_GROWTH: f64 = 2.1;

/// Default backtracking contraction factor.
pub const DEFAULT_CONTRACTION: f64 = 0.5;

/// Default Armijo sufficient-decrease tolerance.
pub const DEFAULT_ARMIJO_C1: f64 = 1e-4;

/// Default cap on backtracking shrink attempts. Sixty halvings push any
/// finite trial step below the useful `f64` range, so a search that has
/// not accepted by then never will.
pub const DEFAULT_MAX_SHRINKS: usize = 60;

/// Conjugacy-loss threshold: conjugacy is treated as lost when
/// `|⟨g1, g0⟩| > gamma * ⟨g0, g0⟩`.
pub const DEFAULT_GAMMA: f64 = 0.2;

/// Weight applied to the beta-scaled gradient term of the direction
/// update. The search direction blends the negative gradient with this
/// multiple of the current gradient itself, not the previous direction.
pub const DIRECTION_BLEND: f64 = 0.1;

/// Denominators with magnitude at or below this floor are treated as
/// degenerate; the beta coefficient falls back to zero.
pub const DEGENERACY_FLOOR: f64 = 1e-12;

/// Running objective/gradient evaluation counters.
///
/// The engine increments these as it calls into the user problem and
/// reports them through [`FnEvalMap`] in the outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalCounters {
    pub cost: u64,
    pub grad: u64,
}

impl EvalCounters {
    /// Render the counters as the standard named map.
    pub fn to_map(self) -> FnEvalMap {
        let mut map = FnEvalMap::new();
        map.insert("cost_count".to_string(), self.cost);
        map.insert("gradient_count".to_string(), self.grad);
        map
    }
}
