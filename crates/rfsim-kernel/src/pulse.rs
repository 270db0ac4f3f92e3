//! Trig-table construction from physical pulse parameters.
//!
//! Builds the simulator inputs under the hard-pulse approximation: a
//! continuous RF waveform sampled every `dt` becomes a train of
//! instantaneous tips `αₜ = γ·B1ₜ·dt`, each followed by free precession of
//! `θᵢ = γ·(G·zᵢ + ΔB0ᵢ)·dt` at position `zᵢ`.
//!
//! Constructed via the builder pattern: [`HardPulse::builder`] and
//! [`Dephasing::builder`].
//!
//! ```
//! use rfsim_kernel::pulse::{Dephasing, HardPulse, GAMMA_1H};
//! use rfsim_kernel::{slice_profile, RotationSimulator};
//!
//! // 90° rectangular pulse in 100 steps of 1 µs.
//! let dt = 1e-6;
//! let b1 = std::f64::consts::FRAC_PI_2 / (GAMMA_1H * dt * 100.0);
//! let pulse = HardPulse::builder().b1(&[b1; 100]).dt(dt).build().unwrap();
//! let dephasing = Dephasing::builder().positions(&[0.0]).build().unwrap();
//!
//! let out = slice_profile(&RotationSimulator::default(), &pulse, &dephasing).unwrap();
//! assert!((out.get(0).unwrap().y - 1.0).abs() < 1e-9);
//! ```

use std::error::Error;
use std::fmt;

use rfsim_core::{Magnetization, MagnetizationField, PrecessionTable, RfPhase, TipTable};

use crate::error::SimError;
use crate::simulator::RotationSimulator;

/// Proton gyromagnetic ratio in rad·s⁻¹·T⁻¹.
pub const GAMMA_1H: f64 = 2.675_221_874e8;

// ── PulseError ─────────────────────────────────────────────────────

/// Invalid pulse-builder input.
#[derive(Clone, Debug, PartialEq)]
pub enum PulseError {
    /// A required builder field was never set.
    Missing {
        /// Name of the missing field.
        field: &'static str,
    },
    /// A scalar parameter that must be positive is NaN, infinite, zero, or
    /// negative.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A signed scalar parameter is NaN or infinite.
    NonFiniteParameter {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A sample is NaN or infinite.
    NonFiniteSample {
        /// Which waveform held the sample.
        waveform: &'static str,
        /// Index of the first non-finite sample.
        index: usize,
    },
    /// Per-position arrays disagree in length.
    LengthMismatch {
        /// Expected length (number of positions).
        expected: usize,
        /// Length supplied.
        actual: usize,
    },
}

impl fmt::Display for PulseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{field} is required"),
            Self::InvalidParameter { name, value } => {
                write!(f, "{name} must be finite and positive, got {value}")
            }
            Self::NonFiniteParameter { name, value } => {
                write!(f, "{name} must be finite, got {value}")
            }
            Self::NonFiniteSample { waveform, index } => {
                write!(f, "{waveform} sample {index} is not finite")
            }
            Self::LengthMismatch { expected, actual } => write!(
                f,
                "off_resonance has {actual} entries but there are {expected} positions"
            ),
        }
    }
}

impl Error for PulseError {}

fn positive(name: &'static str, value: f64) -> Result<f64, PulseError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PulseError::InvalidParameter { name, value })
    }
}

fn all_finite(waveform: &'static str, samples: &[f64]) -> Result<(), PulseError> {
    match samples.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(PulseError::NonFiniteSample { waveform, index }),
        None => Ok(()),
    }
}

// ── HardPulse ──────────────────────────────────────────────────────

/// A sampled RF waveform reduced to per-step flip angles and a phase.
#[derive(Clone, Debug, PartialEq)]
pub struct HardPulse {
    flip_angles: Vec<f64>,
    dt: f64,
    phase: RfPhase,
}

/// Builder for [`HardPulse`].
///
/// Required: `b1` and `dt`. Defaults: `gamma = GAMMA_1H`, `phase = 0`.
pub struct HardPulseBuilder {
    b1: Option<Vec<f64>>,
    dt: Option<f64>,
    gamma: f64,
    phase: f64,
}

impl HardPulse {
    /// Create a new builder.
    pub fn builder() -> HardPulseBuilder {
        HardPulseBuilder {
            b1: None,
            dt: None,
            gamma: GAMMA_1H,
            phase: 0.0,
        }
    }

    /// Flip angle of each step in radians.
    pub fn flip_angles(&self) -> &[f64] {
        &self.flip_angles
    }

    /// Sum of all flip angles (the small-tip nominal flip).
    pub fn total_flip(&self) -> f64 {
        self.flip_angles.iter().sum()
    }

    /// Step duration in seconds.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Pulse duration `Nt·dt` in seconds.
    pub fn duration(&self) -> f64 {
        self.flip_angles.len() as f64 * self.dt
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.flip_angles.len()
    }

    /// Whether the pulse has no steps.
    pub fn is_empty(&self) -> bool {
        self.flip_angles.is_empty()
    }

    /// The RF tip trig table.
    pub fn tip_table(&self) -> TipTable {
        TipTable::from_flip_angles(&self.flip_angles)
    }

    /// The pulse-wide RF phase.
    pub fn rf_phase(&self) -> RfPhase {
        self.phase
    }
}

impl HardPulseBuilder {
    /// RF amplitude samples in tesla, one per step.
    pub fn b1(mut self, samples: &[f64]) -> Self {
        self.b1 = Some(samples.to_vec());
        self
    }

    /// Step duration in seconds. Must be finite and positive.
    pub fn dt(mut self, dt: f64) -> Self {
        self.dt = Some(dt);
        self
    }

    /// Gyromagnetic ratio in rad·s⁻¹·T⁻¹ (default: [`GAMMA_1H`]).
    pub fn gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// RF phase in radians (default: 0, i.e. along +x).
    pub fn phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    /// Build the pulse, validating all parameters.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `b1` or `dt` is unset, `dt` or `gamma` is not
    /// finite and positive, `phase` is not finite, or any B1 sample is
    /// not finite.
    pub fn build(self) -> Result<HardPulse, PulseError> {
        let b1 = self.b1.ok_or(PulseError::Missing { field: "b1" })?;
        let dt = positive("dt", self.dt.ok_or(PulseError::Missing { field: "dt" })?)?;
        let gamma = positive("gamma", self.gamma)?;
        if !self.phase.is_finite() {
            return Err(PulseError::NonFiniteParameter {
                name: "phase",
                value: self.phase,
            });
        }
        all_finite("b1", &b1)?;

        let flip_angles = b1.iter().map(|b| gamma * b * dt).collect();
        Ok(HardPulse {
            flip_angles,
            dt,
            phase: RfPhase::from_angle(self.phase),
        })
    }
}

// ── Dephasing ──────────────────────────────────────────────────────

/// Per-position off-resonance from a static gradient and a B0 map.
#[derive(Clone, Debug, PartialEq)]
pub struct Dephasing {
    positions: Vec<f64>,
    gradient: f64,
    off_resonance: Vec<f64>,
    gamma: f64,
}

/// Builder for [`Dephasing`].
///
/// Required: `positions`. Defaults: zero gradient, zero off-resonance,
/// `gamma = GAMMA_1H`.
pub struct DephasingBuilder {
    positions: Option<Vec<f64>>,
    gradient: f64,
    off_resonance: Option<Vec<f64>>,
    gamma: f64,
}

impl Dephasing {
    /// Create a new builder.
    pub fn builder() -> DephasingBuilder {
        DephasingBuilder {
            positions: None,
            gradient: 0.0,
            off_resonance: None,
            gamma: GAMMA_1H,
        }
    }

    /// Number of positions `Nz`.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether there are no positions.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Spatial positions in metres.
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Phase accrued at each position during one step of length `dt`.
    pub fn precession_angles(&self, dt: f64) -> Vec<f64> {
        self.positions
            .iter()
            .zip(&self.off_resonance)
            .map(|(z, db0)| dt * self.gamma * (self.gradient * z + db0))
            .collect()
    }

    /// Precession trig table for steps of length `dt`.
    pub fn precession_table(&self, dt: f64) -> PrecessionTable {
        PrecessionTable::from_angles(&self.precession_angles(dt))
    }
}

impl DephasingBuilder {
    /// Spatial positions in metres along the gradient axis.
    pub fn positions(mut self, z: &[f64]) -> Self {
        self.positions = Some(z.to_vec());
        self
    }

    /// Gradient strength in T/m (default: 0).
    pub fn gradient(mut self, g: f64) -> Self {
        self.gradient = g;
        self
    }

    /// Per-position ΔB0 in tesla (default: all zero).
    pub fn off_resonance(mut self, db0: &[f64]) -> Self {
        self.off_resonance = Some(db0.to_vec());
        self
    }

    /// Gyromagnetic ratio in rad·s⁻¹·T⁻¹ (default: [`GAMMA_1H`]).
    pub fn gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Build, validating all parameters.
    pub fn build(self) -> Result<Dephasing, PulseError> {
        let positions = self
            .positions
            .ok_or(PulseError::Missing { field: "positions" })?;
        all_finite("positions", &positions)?;
        if !self.gradient.is_finite() {
            return Err(PulseError::NonFiniteParameter {
                name: "gradient",
                value: self.gradient,
            });
        }
        let gamma = positive("gamma", self.gamma)?;
        let off_resonance = match self.off_resonance {
            Some(db0) => {
                if db0.len() != positions.len() {
                    return Err(PulseError::LengthMismatch {
                        expected: positions.len(),
                        actual: db0.len(),
                    });
                }
                all_finite("off_resonance", &db0)?;
                db0
            }
            None => vec![0.0; positions.len()],
        };
        Ok(Dephasing {
            positions,
            gradient: self.gradient,
            off_resonance,
            gamma,
        })
    }
}

/// Excite an equilibrium field at every position of `dephasing` with
/// `pulse` and return the final magnetization.
pub fn slice_profile(
    sim: &RotationSimulator,
    pulse: &HardPulse,
    dephasing: &Dephasing,
) -> Result<MagnetizationField, SimError> {
    let m0 = MagnetizationField::uniform(dephasing.len(), Magnetization::EQUILIBRIUM);
    sim.run(
        &m0,
        &dephasing.precession_table(pulse.dt()),
        &pulse.tip_table(),
        pulse.rf_phase(),
    )
}
