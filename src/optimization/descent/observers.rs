//! descent::observers — fire-and-forget per-step trace consumers.
//!
//! Purpose
//! -------
//! Define the observer interface the engine notifies after every
//! completed iteration and every evaluated line-search trial, plus the
//! stock implementations: a no-op, an in-memory recorder, and (behind
//! the `obs_slog` feature) a structured terminal logger.
//!
//! Key behaviors
//! -------------
//! - Observers receive immutable [`TraceRecord`] snapshots and return
//!   nothing to the engine; they cannot influence the run.
//! - The engine invokes the hook synchronously after each step, so a
//!   caller pulling the iterate sequence lazily sees records exactly as
//!   far as it has pulled.
//!
//! Conventions
//! -----------
//! - `VecObserver` clones the states it keeps; it is meant for tests and
//!   small diagnostic runs, not unbounded production traces.
//! - `SlogObserver` logs iterations at `info` and bracket trials at
//!   `debug`; it is only compiled with the `obs_slog` feature.
use crate::optimization::{
    descent::state::{OptimizerState, TraceRecord},
    space::VectorSpace,
};

/// Per-step trace consumer.
///
/// Implementations must not panic on any record; the engine treats the
/// hook as infallible.
pub trait DescentObserver<V: VectorSpace> {
    fn observe(&mut self, record: &TraceRecord<'_, V>);
}

/// Observer that ignores every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl<V: VectorSpace> DescentObserver<V> for NullObserver {
    fn observe(&mut self, _record: &TraceRecord<'_, V>) {}
}

/// Observer that records every iteration state and counts bracket
/// trials.
#[derive(Debug, Clone, Default)]
pub struct VecObserver<V> {
    /// Emitted iteration states, in order, with their effective betas.
    pub iterations: Vec<(f64, OptimizerState<V>)>,
    /// Total number of line-search trials observed.
    pub bracket_trials: usize,
}

impl<V: VectorSpace> VecObserver<V> {
    pub fn new() -> Self {
        Self { iterations: Vec::new(), bracket_trials: 0 }
    }

    /// Objective values of the recorded iterations, in order.
    pub fn objective_values(&self) -> Vec<f64> {
        self.iterations.iter().map(|(_, state)| state.fx1).collect()
    }
}

impl<V: VectorSpace> DescentObserver<V> for VecObserver<V> {
    fn observe(&mut self, record: &TraceRecord<'_, V>) {
        match record {
            TraceRecord::Iteration { beta, state, .. } => {
                self.iterations.push((*beta, (*state).clone()));
            }
            TraceRecord::Bracket { .. } => {
                self.bracket_trials += 1;
            }
        }
    }
}

/// Notify an optional observer. No-op when none is attached.
pub(crate) fn emit<V: VectorSpace>(
    observer: &mut Option<&mut dyn DescentObserver<V>>, record: TraceRecord<'_, V>,
) {
    if let Some(obs) = observer {
        obs.observe(&record);
    }
}

#[cfg(feature = "obs_slog")]
pub use self::slog_observer::SlogObserver;

#[cfg(feature = "obs_slog")]
mod slog_observer {
    use super::DescentObserver;
    use crate::optimization::{descent::state::TraceRecord, space::VectorSpace};
    use slog::{Drain, debug, info, o};

    /// Observer that emits structured slog records: one `info` line per
    /// iteration, one `debug` line per line-search trial.
    pub struct SlogObserver {
        logger: slog::Logger,
    }

    impl SlogObserver {
        /// Build an observer around an existing logger.
        pub fn new(logger: slog::Logger) -> Self {
            Self { logger }
        }

        /// Build an observer logging to the terminal through a non-blocking
        /// async drain.
        pub fn term() -> Self {
            let decorator = slog_term::TermDecorator::new().build();
            let drain = slog_term::CompactFormat::new(decorator).build().fuse();
            let drain = slog_async::Async::new(drain).build().fuse();
            Self { logger: slog::Logger::root(drain, o!()) }
        }
    }

    impl<V: VectorSpace> DescentObserver<V> for SlogObserver {
        fn observe(&mut self, record: &TraceRecord<'_, V>) {
            match record {
                TraceRecord::Iteration { iter, beta, diagnostic, state } => {
                    info!(self.logger, "iteration";
                        "iter" => *iter,
                        "f" => state.fx1,
                        "step" => state.step_size,
                        "grad_norm" => state.grad1.norm(),
                        "beta" => *beta,
                        "beta_rule" => format!("{diagnostic:?}"),
                    );
                }
                TraceRecord::Bracket { iter, attempt, bracket } => {
                    debug!(self.logger, "bracket";
                        "iter" => *iter,
                        "attempt" => *attempt,
                        "alpha" => bracket.alpha,
                        "f" => bracket.fx,
                    );
                }
            }
        }
    }
}
