//! Errors returned by the simulator.

use std::error::Error;
use std::fmt;

use rfsim_core::ShapeError;

use crate::config::ConfigError;

/// Why a simulation did not run.
///
/// Validation completes before any rotation is applied, so an error
/// never comes with a partially updated field.
#[derive(Clone, Debug, PartialEq)]
pub enum SimError {
    /// Inputs have inconsistent shapes or fail the unit-circle check.
    Shape(ShapeError),
    /// The simulator configuration is invalid.
    Config(ConfigError),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shape(e) => write!(f, "shape: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl Error for SimError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Shape(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

impl From<ShapeError> for SimError {
    fn from(e: ShapeError) -> Self {
        Self::Shape(e)
    }
}

impl From<ConfigError> for SimError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
