//! Error types for the rfsim data model.
//!
//! Every error here is a caller contract violation: the inputs do not
//! describe a well-formed simulation. Nothing in this crate fails for
//! internal reasons.

use std::error::Error;
use std::fmt;

/// Shape and domain violations detected while assembling simulation inputs.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeError {
    /// Two buffers that must agree in length do not.
    ShapeMismatch {
        /// Which pairing was violated (e.g. `"cos_theta/sin_theta"`).
        what: &'static str,
        /// The length implied by the other half of the pairing.
        expected: usize,
        /// The length actually supplied.
        actual: usize,
    },
    /// A trig pair is further from the unit circle than the configured
    /// tolerance allows.
    NotUnitCircle {
        /// Name of the offending table (`"precession"`, `"tip"`, `"rf_phase"`).
        table: &'static str,
        /// Index of the first offending entry.
        index: usize,
        /// Observed `|c² + s² − 1|`.
        error: f64,
    },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch {
                what,
                expected,
                actual,
            } => write!(
                f,
                "shape mismatch in {what}: expected {expected} elements, got {actual}"
            ),
            Self::NotUnitCircle {
                table,
                index,
                error,
            } => write!(
                f,
                "{table} entry {index} is off the unit circle by {error:e}"
            ),
        }
    }
}

impl Error for ShapeError {}
