//! rfsim: a hard-pulse RF rotation simulator.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the rfsim sub-crates. For most users, adding `rfsim` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use rfsim::prelude::*;
//!
//! // One position at equilibrium, no precession, one 90° tip about x.
//! let m0 = MagnetizationField::uniform(1, Magnetization::EQUILIBRIUM);
//! let precession = PrecessionTable::identity(1);
//! let tip = TipTable::from_flip_angles(&[std::f64::consts::FRAC_PI_2]);
//!
//! let out = simulate(&m0, &precession, &tip, RfPhase::X).unwrap();
//! let m = out.get(0).unwrap();
//! assert!((m.y - 1.0).abs() < 1e-15);
//! assert!(m.z.abs() < 1e-15);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `rfsim-core` | Magnetization field, trig tables, shape errors |
//! | [`kernel`] | `rfsim-kernel` | Rotations, simulator, config, pulse builders |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Magnetization storage and trig tables (`rfsim-core`).
pub use rfsim_core as types;

/// Rotation kernel, simulator and pulse builders (`rfsim-kernel`).
///
/// [`kernel::RotationSimulator`] runs a pulse under a [`kernel::SimConfig`];
/// [`kernel::pulse`] turns physical waveforms into trig tables.
pub use rfsim_kernel as kernel;

/// Common imports for typical rfsim usage.
///
/// ```rust
/// use rfsim::prelude::*;
/// ```
pub mod prelude {
    // Data
    pub use rfsim_core::{
        Magnetization, MagnetizationField, PrecessionTable, RfPhase, TipTable, TrigPair,
    };

    // Errors
    pub use rfsim_core::ShapeError;
    pub use rfsim_kernel::{ConfigError, PulseError, SimError};

    // Simulation
    pub use rfsim_kernel::{simulate, Execution, RotationSimulator, SimConfig};

    // Pulses
    pub use rfsim_kernel::{slice_profile, Dephasing, HardPulse, GAMMA_1H};
}
