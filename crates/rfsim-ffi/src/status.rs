//! C-compatible status codes.
//!
//! [`RfsimStatus`] is a `repr(i32)` enum covering every error the
//! simulator can report. Conversions from the Rust error types
//! (`SimError`, `ShapeError`, `ConfigError`) are provided.

use rfsim_core::ShapeError;
use rfsim_kernel::{ConfigError, SimError};

/// C-compatible status code returned by all FFI functions.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RfsimStatus {
    /// Success.
    Ok = 0,
    /// A pointer is null while its length is non-zero, or an enum value is
    /// out of range.
    InvalidArgument = -1,
    /// Caller-provided output buffer is smaller than `3·nz`.
    BufferTooSmall = -2,
    /// Paired input lengths disagree (e.g. the magnetization buffer is not
    /// `3·nz` long).
    ShapeMismatch = -3,
    /// A trig pair failed the configured unit-circle tolerance.
    NotUnitCircle = -4,
    /// Simulation options failed validation.
    ConfigError = -5,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&ShapeError> for RfsimStatus {
    fn from(e: &ShapeError) -> Self {
        match e {
            ShapeError::ShapeMismatch { .. } => RfsimStatus::ShapeMismatch,
            ShapeError::NotUnitCircle { .. } => RfsimStatus::NotUnitCircle,
        }
    }
}

impl From<&ConfigError> for RfsimStatus {
    fn from(_e: &ConfigError) -> Self {
        RfsimStatus::ConfigError
    }
}

impl From<&SimError> for RfsimStatus {
    fn from(e: &SimError) -> Self {
        match e {
            SimError::Shape(e) => RfsimStatus::from(e),
            SimError::Config(e) => RfsimStatus::from(e),
        }
    }
}
