//! Benchmark profiles for the rfsim rotation simulator.
//!
//! Provides pre-built slice-selective excitations for benchmarking:
//!
//! - [`reference_profile`]: 1K positions, 256-step sinc pulse
//! - [`stress_profile`]: 100K positions, 512-step sinc pulse
//! - [`sinc_b1`]: Hamming-windowed sinc envelope scaled to a flip angle

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::f64::consts::PI;

use rfsim_kernel::{Dephasing, HardPulse, PulseError, GAMMA_1H};

/// Sample period shared by the profiles, in seconds.
pub const PROFILE_DT: f64 = 4e-6;

/// Slice-select gradient shared by the profiles, in T/m.
pub const PROFILE_GRADIENT: f64 = 10e-3;

/// B1 samples (tesla) of a Hamming-windowed sinc with `lobes` zero
/// crossings on each side, scaled so the whole pulse flips by `flip`
/// radians on resonance.
pub fn sinc_b1(n_steps: usize, lobes: u32, flip: f64, dt: f64) -> Vec<f64> {
    if n_steps == 0 {
        return Vec::new();
    }
    let half = (n_steps as f64 - 1.0) / 2.0;
    let shape: Vec<f64> = (0..n_steps)
        .map(|t| {
            let u = if half > 0.0 { (t as f64 - half) / half } else { 0.0 };
            let x = PI * lobes as f64 * u;
            let sinc = if x == 0.0 { 1.0 } else { x.sin() / x };
            let window = 0.54 + 0.46 * (PI * u).cos();
            sinc * window
        })
        .collect();
    let area: f64 = shape.iter().sum();
    let scale = flip / (GAMMA_1H * dt * area);
    shape.into_iter().map(|s| s * scale).collect()
}

/// `nz` positions evenly spanning `[-fov/2, fov/2]` metres.
pub fn positions(nz: usize, fov: f64) -> Vec<f64> {
    match nz {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => (0..nz)
            .map(|i| -fov / 2.0 + fov * i as f64 / (nz - 1) as f64)
            .collect(),
    }
}

/// Build a reference profile: 90° excitation over 1K positions.
pub fn reference_profile() -> Result<(HardPulse, Dephasing), PulseError> {
    profile(1_000, 256)
}

/// Build a stress profile: 90° excitation over 100K positions.
///
/// Same pulse shape as [`reference_profile`] at 100x the position count.
pub fn stress_profile() -> Result<(HardPulse, Dephasing), PulseError> {
    profile(100_000, 512)
}

fn profile(nz: usize, nt: usize) -> Result<(HardPulse, Dephasing), PulseError> {
    let pulse = HardPulse::builder()
        .b1(&sinc_b1(nt, 3, PI / 2.0, PROFILE_DT))
        .dt(PROFILE_DT)
        .build()?;
    let dephasing = Dephasing::builder()
        .positions(&positions(nz, 0.04))
        .gradient(PROFILE_GRADIENT)
        .build()?;
    Ok((pulse, dephasing))
}
