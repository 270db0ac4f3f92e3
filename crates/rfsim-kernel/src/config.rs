//! Simulator configuration, validation, and error types.
//!
//! [`SimConfig`] is the builder-input for a
//! [`RotationSimulator`](crate::RotationSimulator).
//! [`validate()`](SimConfig::validate) checks it once at construction.

use std::error::Error;
use std::fmt;

// ── Execution ──────────────────────────────────────────────────────

/// How the per-position loop inside each time step is executed.
///
/// Time steps always run strictly in order. Parallel execution only
/// splits the positions of one step across the rayon pool and joins
/// before the next step starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Execution {
    /// Single-threaded loop over positions.
    #[default]
    Serial,
    /// Positions of each step are split across the rayon thread pool.
    Parallel {
        /// Minimum number of positions handed to one rayon task. Must be
        /// at least 1.
        min_len: usize,
    },
}

impl Execution {
    /// Parallel execution with a default task granularity of 1024 positions.
    pub const fn parallel() -> Self {
        Self::Parallel { min_len: 1024 }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SimConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `Execution::Parallel` with `min_len == 0`.
    ZeroMinLen,
    /// `unit_tolerance` is NaN, infinite, or negative.
    InvalidTolerance {
        /// The invalid value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMinLen => write!(f, "parallel min_len must be at least 1"),
            Self::InvalidTolerance { value } => {
                write!(f, "unit_tolerance must be finite and >= 0, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

// ── SimConfig ──────────────────────────────────────────────────────

/// Configuration for a [`RotationSimulator`](crate::RotationSimulator).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimConfig {
    /// Per-step position loop strategy. Default: [`Execution::Serial`].
    pub execution: Execution,
    /// When `Some(tol)`, every trig pair (precession, tip, and RF phase)
    /// must satisfy `|c² + s² − 1| <= tol` before the simulation runs.
    /// Default: `None` (trig tables are trusted).
    pub unit_tolerance: Option<f64>,
}

impl SimConfig {
    /// Serial execution, no unit-circle check.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the execution strategy.
    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    /// Enable the unit-circle check with tolerance `tol`.
    pub fn with_unit_tolerance(mut self, tol: f64) -> Self {
        self.unit_tolerance = Some(tol);
        self
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Execution::Parallel { min_len: 0 } = self.execution {
            return Err(ConfigError::ZeroMinLen);
        }
        if let Some(tol) = self.unit_tolerance {
            if !tol.is_finite() || tol < 0.0 {
                return Err(ConfigError::InvalidTolerance { value: tol });
            }
        }
        Ok(())
    }
}
