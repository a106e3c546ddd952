/// Crate-wide result alias for descent operations.
pub type DescentResult<T> = Result<T, DescentError>;

#[derive(Debug, Clone, PartialEq)]
pub enum DescentError {
    // ---- Gradient ----
    /// Implies that FD should be used
    GradientNotImplemented,

    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Gradient elements need to be finite
    InvalidGradient {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- Options ----
    /// Armijo tolerance must lie strictly between zero and one.
    InvalidArmijoTolerance {
        c1: f64,
        reason: &'static str,
    },
    /// Contraction factor must lie strictly between zero and one.
    InvalidContraction {
        factor: f64,
        reason: &'static str,
    },
    /// Growth factor must be finite and greater than one.
    InvalidGrowth {
        factor: f64,
        reason: &'static str,
    },
    /// Shrink attempt cap needs to be at least 1.
    InvalidMaxShrinks {
        max_shrinks: usize,
        reason: &'static str,
    },
    /// Fixed step size must be finite and strictly positive.
    InvalidFixedStep {
        step: f64,
        reason: &'static str,
    },
    /// Conjugacy-loss threshold must be finite and strictly positive.
    InvalidGamma {
        gamma: f64,
        reason: &'static str,
    },
    /// Invalid conjugate method name.
    InvalidConjugateMethod {
        name: String,
        reason: &'static str,
    },

    // ---- Tolerances ----
    /// Gradient tolerance needs to be positive and finite.
    InvalidTolGrad {
        tol: f64,
        reason: &'static str,
    },
    /// Cost change tolerance needs to be positive and finite.
    InvalidTolCost {
        tol: f64,
        reason: &'static str,
    },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    /// At least one tolerance must be provided.
    NoTolerancesProvided,

    // ---- Cost function ----
    /// Cost function returned a non-finite value.
    NonFiniteCost {
        value: f64,
    },

    // ---- Initial point ----
    /// Initial point coordinates must be finite.
    InvalidStartPoint {
        index: usize,
        value: f64,
    },

    // ---- Runtime ----
    /// Backtracking exhausted its shrink budget without satisfying Armijo.
    LineSearchFailed {
        attempts: usize,
        alpha: f64,
    },
    /// An accepted iterate carried a non-finite objective, gradient, or point.
    Diverged {
        value: f64,
    },
    /// The run produced no iterate to report.
    MissingIterate,
}

impl std::error::Error for DescentError {}

impl std::fmt::Display for DescentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            DescentError::GradientNotImplemented => {
                write!(f, "Analytic gradient not implemented")
            }
            DescentError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            DescentError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }

            // ---- Options ----
            DescentError::InvalidArmijoTolerance { c1, reason } => {
                write!(f, "Invalid Armijo tolerance {c1}: {reason}")
            }
            DescentError::InvalidContraction { factor, reason } => {
                write!(f, "Invalid contraction factor {factor}: {reason}")
            }
            DescentError::InvalidGrowth { factor, reason } => {
                write!(f, "Invalid growth factor {factor}: {reason}")
            }
            DescentError::InvalidMaxShrinks { max_shrinks, reason } => {
                write!(f, "Invalid shrink attempt cap {max_shrinks}: {reason}")
            }
            DescentError::InvalidFixedStep { step, reason } => {
                write!(f, "Invalid fixed step size {step}: {reason}")
            }
            DescentError::InvalidGamma { gamma, reason } => {
                write!(f, "Invalid conjugacy-loss threshold {gamma}: {reason}")
            }
            DescentError::InvalidConjugateMethod { name, reason } => {
                write!(f, "Invalid conjugate method '{name}': {reason}")
            }

            // ---- Tolerances ----
            DescentError::InvalidTolGrad { tol, reason } => {
                write!(f, "Invalid gradient tolerance {tol}: {reason}")
            }
            DescentError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid cost change tolerance {tol}: {reason}")
            }
            DescentError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            DescentError::NoTolerancesProvided => {
                write!(f, "No tolerances provided")
            }

            // ---- Cost function ----
            DescentError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
            }

            // ---- Initial point ----
            DescentError::InvalidStartPoint { index, value } => {
                write!(f, "Invalid initial point at index {index}: {value}, must be finite")
            }

            // ---- Runtime ----
            DescentError::LineSearchFailed { attempts, alpha } => {
                write!(
                    f,
                    "Line search failed to satisfy Armijo after {attempts} shrink attempts \
                     (last trial step {alpha})"
                )
            }
            DescentError::Diverged { value } => {
                write!(f, "Optimization diverged: non-finite iterate (objective {value})")
            }
            DescentError::MissingIterate => {
                write!(f, "Missing iterate: the run completed no iteration")
            }
        }
    }
}
