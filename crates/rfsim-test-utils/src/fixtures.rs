//! Seeded random simulation inputs.
//!
//! - [`random_unit_field`]: unit vectors uniformly distributed on the sphere.
//! - [`random_precession`] / [`random_tip`]: tables built from random angles,
//!   so every pair lies on the unit circle.
//! - [`Scenario`]: all four inputs from one seed.

use std::f64::consts::PI;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rfsim_core::{Magnetization, MagnetizationField, PrecessionTable, RfPhase, TipTable};

/// `nz` unit vectors uniformly distributed on the sphere.
pub fn random_unit_field(seed: u64, nz: usize) -> MagnetizationField {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..nz)
        .map(|_| {
            let z: f64 = rng.random_range(-1.0..=1.0);
            let phi: f64 = rng.random_range(0.0..2.0 * PI);
            let r = (1.0 - z * z).max(0.0).sqrt();
            Magnetization::new(r * phi.cos(), r * phi.sin(), z)
        })
        .collect()
}

/// Precession table of `nz` angles drawn from `[-PI, PI)`.
pub fn random_precession(seed: u64, nz: usize) -> PrecessionTable {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let theta: Vec<f64> = (0..nz).map(|_| rng.random_range(-PI..PI)).collect();
    PrecessionTable::from_angles(&theta)
}

/// Tip table of `nt` flip angles drawn from `[0, PI)`.
pub fn random_tip(seed: u64, nt: usize) -> TipTable {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let alpha: Vec<f64> = (0..nt).map(|_| rng.random_range(0.0..PI)).collect();
    TipTable::from_flip_angles(&alpha)
}

/// RF phase drawn from `[-PI, PI)`.
pub fn random_phase(seed: u64) -> RfPhase {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    RfPhase::from_angle(rng.random_range(-PI..PI))
}

/// A complete, consistent set of simulator inputs.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub initial: MagnetizationField,
    pub precession: PrecessionTable,
    pub tip: TipTable,
    pub phase: RfPhase,
}

impl Scenario {
    /// Derive all inputs from one seed. Sub-seeds are offset so the tables
    /// are not correlated with the field.
    pub fn random(seed: u64, nz: usize, nt: usize) -> Self {
        Self {
            initial: random_unit_field(seed, nz),
            precession: random_precession(seed.wrapping_add(1), nz),
            tip: random_tip(seed.wrapping_add(2), nt),
            phase: random_phase(seed.wrapping_add(3)),
        }
    }

    /// Number of positions.
    pub fn nz(&self) -> usize {
        self.initial.len()
    }

    /// Number of time steps.
    pub fn nt(&self) -> usize {
        self.tip.len()
    }
}
