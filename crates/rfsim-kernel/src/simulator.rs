//! The rotation simulator.
//!
//! For every time step `t`, each position first precesses about z by its
//! own fixed angle, then undergoes the step's RF tip rotation. Steps run
//! strictly in order; within a step positions are independent.
//!
//! ```
//! use rfsim_core::{Magnetization, MagnetizationField, PrecessionTable, RfPhase, TipTable};
//! use rfsim_kernel::simulate;
//!
//! // One position at equilibrium, one 90° step about x, no precession.
//! let m0 = MagnetizationField::uniform(1, Magnetization::EQUILIBRIUM);
//! let precession = PrecessionTable::identity(1);
//! let tip = TipTable::new(vec![0.0], vec![1.0]).unwrap();
//!
//! let out = simulate(&m0, &precession, &tip, RfPhase::X).unwrap();
//! assert_eq!(out.get(0), Some(Magnetization::new(0.0, 1.0, 0.0)));
//! ```

use rayon::prelude::*;
use rfsim_core::{MagnetizationField, PrecessionTable, RfPhase, ShapeError, TipTable, TrigPair};
use tracing::{debug, trace};

use crate::config::{ConfigError, Execution, SimConfig};
use crate::error::SimError;
use crate::rotation::{precess, TipRotation};

/// Simulate with the default configuration (serial, no unit-circle check).
///
/// Returns a freshly allocated field; `initial` is not modified.
pub fn simulate(
    initial: &MagnetizationField,
    precession: &PrecessionTable,
    tip: &TipTable,
    phase: RfPhase,
) -> Result<MagnetizationField, SimError> {
    RotationSimulator::default().run(initial, precession, tip, phase)
}

/// A configured simulator. Holds no state between runs.
#[derive(Clone, Debug, Default)]
pub struct RotationSimulator {
    config: SimConfig,
}

impl RotationSimulator {
    /// Validate `config` and build a simulator.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Check that the inputs describe a well-formed simulation.
    ///
    /// The field and the precession table must both have `Nz` entries. The
    /// tip table's columns were length-checked on construction. With a
    /// configured `unit_tolerance`, every trig pair is also checked.
    pub fn validate(
        &self,
        initial: &MagnetizationField,
        precession: &PrecessionTable,
        tip: &TipTable,
        phase: RfPhase,
    ) -> Result<(), SimError> {
        if precession.len() != initial.len() {
            return Err(ShapeError::ShapeMismatch {
                what: "magnetization/precession table",
                expected: initial.len(),
                actual: precession.len(),
            }
            .into());
        }
        if let Some(tol) = self.config.unit_tolerance {
            precession.check_unit(tol)?;
            tip.check_unit(tol)?;
            phase.check_unit(tol)?;
        }
        Ok(())
    }

    /// Run the full pulse and return the final field.
    pub fn run(
        &self,
        initial: &MagnetizationField,
        precession: &PrecessionTable,
        tip: &TipTable,
        phase: RfPhase,
    ) -> Result<MagnetizationField, SimError> {
        let mut field = initial.clone();
        self.run_in_place(&mut field, precession, tip, phase)?;
        Ok(field)
    }

    /// Run the full pulse, overwriting `field` with the final state.
    ///
    /// On error `field` is left untouched.
    pub fn run_in_place(
        &self,
        field: &mut MagnetizationField,
        precession: &PrecessionTable,
        tip: &TipTable,
        phase: RfPhase,
    ) -> Result<(), SimError> {
        self.validate(field, precession, tip, phase)?;

        let nz = field.len();
        let nt = tip.len();
        if nz == 0 {
            trace!(nt, "empty field, nothing to rotate");
            return Ok(());
        }
        if nt == 0 {
            trace!(nz, "zero-length pulse, field unchanged");
            return Ok(());
        }
        debug!(nz, nt, execution = ?self.config.execution, "simulating pulse");

        let vectors = field.vectors_mut();
        for alpha in tip.iter() {
            let rotation = TipRotation::new(alpha, phase);
            match self.config.execution {
                Execution::Serial => step_serial(vectors, precession, &rotation),
                Execution::Parallel { min_len } => {
                    step_parallel(vectors, precession, &rotation, min_len)
                }
            }
        }
        Ok(())
    }
}

// Positions are independent, so precession and tip for one position can
// run back to back without changing the result.

fn step_serial(vectors: &mut [[f64; 3]], precession: &PrecessionTable, rotation: &TipRotation) {
    for ((m, &c), &s) in vectors
        .iter_mut()
        .zip(precession.cos())
        .zip(precession.sin())
    {
        precess(m, TrigPair::new(c, s));
        rotation.apply(m);
    }
}

fn step_parallel(
    vectors: &mut [[f64; 3]],
    precession: &PrecessionTable,
    rotation: &TipRotation,
    min_len: usize,
) {
    vectors
        .par_iter_mut()
        .zip(precession.cos().par_iter())
        .zip(precession.sin().par_iter())
        .with_min_len(min_len)
        .for_each(|((m, &c), &s)| {
            precess(m, TrigPair::new(c, s));
            rotation.apply(m);
        });
}
