//! Hard-pulse RF rotation kernel.
//!
//! Simulates a magnetization field under a discretized RF pulse with
//! free-precession dephasing between sub-pulses.
//!
//! # Step order (each time step `t`)
//!
//! 1. Precession: every position rotates clockwise about z by its own
//!    fixed angle `θᵢ`. `Mz` is unchanged.
//! 2. RF tip: every position rotates by `αₜ` about the transverse axis at
//!    the pulse phase `φ`.
//!
//! Steps never overlap. [`Execution::Parallel`] only spreads the positions
//! of one step across threads.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod error;
pub mod pulse;
pub mod rotation;
pub mod simulator;

pub use config::{ConfigError, Execution, SimConfig};
pub use error::SimError;
pub use pulse::{slice_profile, Dephasing, HardPulse, PulseError, GAMMA_1H};
pub use rotation::{precess, TipRotation};
pub use simulator::{simulate, RotationSimulator};
