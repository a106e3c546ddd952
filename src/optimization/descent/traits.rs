//! Public API surface for conjugate gradient descent.
//!
//! - [`Objective`]: trait users implement for their problem.
//! - [`DescentOptions`], [`BacktrackingOptions`], [`Tolerances`]:
//!   configuration for the engine and the high-level `minimize` API.
//! - [`ConjugateMethod`] and [`StepMethod`]: choice of conjugate-direction
//!   formula and step-size policy.
//! - [`OptimOutcome`]: normalized result returned by the high-level API.
//!
//! Convention: we *minimize* a user objective `f(x)`. If an analytic
//! gradient is provided it must be the gradient of `f`; when it is not
//! provided, the dense entry point falls back to finite differences.
use crate::optimization::{
    descent::{
        types::{
            DEFAULT_ARMIJO_C1, DEFAULT_CONTRACTION, DEFAULT_GAMMA, DEFAULT_GROWTH,
            DEFAULT_MAX_SHRINKS, FnEvalMap,
        },
        validation::{validate_value, verify_tol_cost, verify_tol_grad},
    },
    errors::{DescentError, DescentResult},
    space::VectorSpace,
};
use std::str::FromStr;

/// User-implemented objective interface.
///
/// The engine minimizes `f(x)` over an abstract vector space `V`.
///
/// - `type Data`: per-problem payload carried into `value`/`grad`/`check`.
///
/// Required:
/// - `value(&V, &Data) -> DescentResult<f64>`: evaluate `f(x)`.
///   - Errors: return a descriptive `DescentError` for invalid inputs.
///
/// Optional:
/// - `grad(&V, &Data) -> DescentResult<V>`: analytic gradient `∇f(x)`.
///   If not implemented, the dense entry point substitutes robust finite
///   differences automatically.
/// - `check(&V, &Data) -> DescentResult<()>`: validation hook to reject
///   obviously invalid starting points. Called once before optimization.
pub trait Objective<V: VectorSpace> {
    type Data;

    // Required methods
    fn value(&self, x: &V, data: &Self::Data) -> DescentResult<f64>;

    // Optional methods
    fn grad(&self, _x: &V, _data: &Self::Data) -> DescentResult<V> {
        Err(DescentError::GradientNotImplemented)
    }

    fn check(&self, _x: &V, _data: &Self::Data) -> DescentResult<()> {
        Ok(())
    }
}

/// Objective built from a pair of closures, convenient for tests and
/// quick experiments. `Data` is `()`.
pub struct FnObjective<F, G> {
    value_fn: F,
    grad_fn: G,
}

impl<F, G> FnObjective<F, G> {
    /// Wrap a value closure and a gradient closure into an [`Objective`].
    pub fn new(value_fn: F, grad_fn: G) -> Self {
        Self { value_fn, grad_fn }
    }
}

impl<V, F, G> Objective<V> for FnObjective<F, G>
where
    V: VectorSpace,
    F: Fn(&V) -> f64,
    G: Fn(&V) -> V,
{
    type Data = ();

    fn value(&self, x: &V, _data: &()) -> DescentResult<f64> {
        Ok((self.value_fn)(x))
    }

    fn grad(&self, x: &V, _data: &()) -> DescentResult<V> {
        Ok((self.grad_fn)(x))
    }
}

/// Choice of conjugate-direction coefficient formula.
///
/// Variants:
/// - `None`: beta is always zero; the engine reduces to steepest descent.
/// - `FletcherReeves`: `⟨g1, g1⟩ / ⟨g0, g0⟩`.
/// - `PolakRibiere`: `⟨g1, g1 - g0⟩ / ⟨g0, g0⟩`.
/// - `HestenesStiefel`: `-⟨g1, g1 - g0⟩ / ⟨d0, g1 - g0⟩`.
///
/// Parsing:
/// This enum implements `FromStr` and accepts case-insensitive names with
/// optional hyphens or underscores (`"polak-ribiere"`, `"FletcherReeves"`,
/// `"hestenes_stiefel"`, `"none"`). Unknown names return
/// `DescentError::InvalidConjugateMethod`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConjugateMethod {
    None,
    FletcherReeves,
    PolakRibiere,
    HestenesStiefel,
}

impl FromStr for ConjugateMethod {
    type Err = DescentError;

    /// Parse a conjugate-method choice from a string (case-insensitive,
    /// hyphen and underscore tolerant).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String =
            s.chars().filter(|c| *c != '-' && *c != '_').collect::<String>().to_lowercase();
        match folded.as_str() {
            "none" => Ok(ConjugateMethod::None),
            "fletcherreeves" => Ok(ConjugateMethod::FletcherReeves),
            "polakribiere" => Ok(ConjugateMethod::PolakRibiere),
            "hestenesstiefel" => Ok(ConjugateMethod::HestenesStiefel),
            _ => Err(DescentError::InvalidConjugateMethod {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'None', 'FletcherReeves', \
                         'PolakRibiere' or 'HestenesStiefel'.",
            }),
        }
    }
}

/// Backtracking line-search configuration.
///
/// Fields:
/// - `c1` — Armijo sufficient-decrease tolerance, in (0, 1).
/// - `contraction` — shrink factor applied per failed trial, in (0, 1).
/// - `growth` — expansion applied to the previous accepted step when
///   opening a search, must be finite and > 1.
/// - `max_shrinks` — cap on shrink attempts before the search reports
///   failure; must be at least 1.
///
/// Defaults: `c1 = 1e-4`, `contraction = 0.5`, `growth = 2.1`,
/// `max_shrinks = 60`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BacktrackingOptions {
    pub c1: f64,
    pub contraction: f64,
    pub growth: f64,
    pub max_shrinks: usize,
}

impl BacktrackingOptions {
    /// Construct validated backtracking options.
    ///
    /// # Rules
    /// - `c1` and `contraction` must be finite and lie strictly between
    ///   zero and one.
    /// - `growth` must be finite and strictly greater than one.
    /// - `max_shrinks` must be greater than zero.
    ///
    /// # Errors
    /// - [`DescentError::InvalidArmijoTolerance`],
    ///   [`DescentError::InvalidContraction`],
    ///   [`DescentError::InvalidGrowth`], or
    ///   [`DescentError::InvalidMaxShrinks`] naming the offending value.
    pub fn new(
        c1: f64, contraction: f64, growth: f64, max_shrinks: usize,
    ) -> DescentResult<Self> {
        if !c1.is_finite() || c1 <= 0.0 || c1 >= 1.0 {
            return Err(DescentError::InvalidArmijoTolerance {
                c1,
                reason: "Armijo tolerance must lie strictly between zero and one.",
            });
        }
        if !contraction.is_finite() || contraction <= 0.0 || contraction >= 1.0 {
            return Err(DescentError::InvalidContraction {
                factor: contraction,
                reason: "Contraction factor must lie strictly between zero and one.",
            });
        }
        if !growth.is_finite() || growth <= 1.0 {
            return Err(DescentError::InvalidGrowth {
                factor: growth,
                reason: "Growth factor must be finite and greater than one.",
            });
        }
        if max_shrinks == 0 {
            return Err(DescentError::InvalidMaxShrinks {
                max_shrinks,
                reason: "Shrink attempt cap must be greater than zero.",
            });
        }
        Ok(Self { c1, contraction, growth, max_shrinks })
    }
}

impl Default for BacktrackingOptions {
    fn default() -> Self {
        Self {
            c1: DEFAULT_ARMIJO_C1,
            contraction: DEFAULT_CONTRACTION,
            growth: DEFAULT_GROWTH,
            max_shrinks: DEFAULT_MAX_SHRINKS,
        }
    }
}

/// Step-size policy applied at every iteration.
///
/// Variants:
/// - `Fixed(alpha)`: the same step size every iteration.
/// - `Backtracking(opts)`: Armijo backtracking opened at
///   `growth * previous_step`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepMethod {
    Fixed(f64),
    Backtracking(BacktrackingOptions),
}

/// Engine-level configuration.
///
/// Fields:
/// - `step: StepMethod` — step-size policy.
/// - `method: ConjugateMethod` — conjugate-direction formula.
/// - `gamma: f64` — conjugacy-loss threshold.
/// - `verbose: bool` — if `true`, the high-level API attaches a terminal
///   observer (behind the `obs_slog` feature) and prints progress.
///
/// Constructor:
/// - `new(step, method, gamma, verbose) -> DescentResult<Self>` — builds
///   validated options.
/// - `recommended() -> Self` — backtracking line search with
///   Polak-Ribière, the suggested starting configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DescentOptions {
    pub step: StepMethod,
    pub method: ConjugateMethod,
    pub gamma: f64,
    pub verbose: bool,
}

impl DescentOptions {
    /// Create a new set of engine options.
    ///
    /// # Rules
    /// - `gamma` must be finite and strictly positive.
    /// - A `Fixed` step must be finite and strictly positive.
    /// - `Backtracking` options are validated by
    ///   [`BacktrackingOptions::new`] at their own construction site and
    ///   are accepted here as-is.
    ///
    /// # Errors
    /// - [`DescentError::InvalidGamma`] or
    ///   [`DescentError::InvalidFixedStep`] for out-of-range values.
    pub fn new(
        step: StepMethod, method: ConjugateMethod, gamma: f64, verbose: bool,
    ) -> DescentResult<Self> {
        if !gamma.is_finite() || gamma <= 0.0 {
            return Err(DescentError::InvalidGamma {
                gamma,
                reason: "Conjugacy-loss threshold must be finite and positive.",
            });
        }
        if let StepMethod::Fixed(alpha) = step {
            if !alpha.is_finite() || alpha <= 0.0 {
                return Err(DescentError::InvalidFixedStep {
                    step: alpha,
                    reason: "Fixed step size must be finite and positive.",
                });
            }
        }
        Ok(Self { step, method, gamma, verbose })
    }

    /// Recommended defaults: backtracking line search with Polak-Ribière.
    pub fn recommended() -> Self {
        Self {
            step: StepMethod::Backtracking(BacktrackingOptions::default()),
            method: ConjugateMethod::PolakRibiere,
            gamma: DEFAULT_GAMMA,
            verbose: false,
        }
    }
}

impl Default for DescentOptions {
    fn default() -> Self {
        Self::recommended()
    }
}

/// Numerical tolerances and iteration limits used by the high-level API.
///
/// - `tol_grad`: stop when the gradient norm falls below this threshold.
/// - `tol_cost`: stop when the change in objective falls below this
///   threshold.
/// - `max_iter`: hard cap on the number of iterations.
///
/// Any field can be `None` but **at least one** of the three must be
/// provided (see [`Tolerances::new`]). The lazy [`Descent`] iterator
/// itself carries no budget; these rules only drive `minimize`.
///
/// [`Descent`]: crate::optimization::descent::iterates::Descent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Rules
    /// - At least one of `tol_grad`, `tol_cost`, or `max_iter` must be `Some`.
    /// - If provided, tolerances must be **finite and strictly positive**.
    /// - If provided, `max_iter` must be `> 0`.
    ///
    /// # Errors
    /// - [`DescentError::NoTolerancesProvided`] if all three are `None`.
    /// - [`DescentError::InvalidTolGrad`] / [`DescentError::InvalidTolCost`]
    ///   for non-finite or non-positive tolerances.
    /// - [`DescentError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> DescentResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(DescentError::NoTolerancesProvided);
        }
        verify_tol_grad(tol_grad)?;
        verify_tol_cost(tol_cost)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(DescentError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Canonical result returned by `minimize`.
///
/// - `x_hat`: best point found.
/// - `value`: objective value `f(x̂)`.
/// - `converged`: `true` if a tolerance-based stopping rule fired;
///   `false` when the run ended on the iteration cap or a line-search
///   failure.
/// - `status`: human-readable stopping reason.
/// - `iterations`: number of completed iterations.
/// - `fn_evals`: evaluation counters (`cost_count`, `gradient_count`).
/// - `grad_norm`: norm of the gradient at `x_hat`, if available.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome<V> {
    pub x_hat: V,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl<V: VectorSpace> OptimOutcome<V> {
    /// Build a validated [`OptimOutcome`] from raw terminal state.
    ///
    /// Performs:
    /// - presence check on `x_hat` ([`DescentError::MissingIterate`]),
    /// - finiteness check on `value` via `validate_value`,
    /// - gradient-norm computation if a gradient was provided.
    ///
    /// # Errors
    /// - [`DescentError::MissingIterate`] when no iterate was produced.
    /// - [`DescentError::NonFiniteCost`] when the reported value is not
    ///   finite.
    pub fn new(
        x_hat: Option<V>, value: f64, converged: bool, status: String, iterations: usize,
        fn_evals: FnEvalMap, grad: Option<&V>,
    ) -> DescentResult<Self> {
        let x_hat = x_hat.ok_or(DescentError::MissingIterate)?;
        validate_value(value)?;
        let grad_norm = grad.map(|g| g.norm());
        Ok(Self { x_hat, value, converged, status, iterations, fn_evals, grad_norm })
    }
}
