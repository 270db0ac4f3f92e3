//! Test utilities for rfsim development.
//!
//! Provides seeded fixtures (random unit fields, random angle tables) and
//! approximate-equality assertions for magnetization vectors. All
//! randomness comes from [`ChaCha8Rng`] so every fixture is reproducible
//! from its seed.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{random_phase, random_precession, random_tip, random_unit_field, Scenario};

use rfsim_core::{Magnetization, MagnetizationField};

/// Default absolute tolerance for accumulated rotation error.
pub const TOL: f64 = 1e-12;

/// Assert two vectors agree component-wise within `tol`.
#[track_caller]
pub fn assert_vec3_close(actual: Magnetization, expected: Magnetization, tol: f64) {
    let diff = [
        (actual.x - expected.x).abs(),
        (actual.y - expected.y).abs(),
        (actual.z - expected.z).abs(),
    ];
    assert!(
        diff.iter().all(|&d| d <= tol),
        "vectors differ by {diff:?} (tol {tol}): actual {actual:?}, expected {expected:?}"
    );
}

/// Assert two fields agree position-by-position within `tol`.
#[track_caller]
pub fn assert_field_close(actual: &MagnetizationField, expected: &MagnetizationField, tol: f64) {
    assert_eq!(actual.len(), expected.len(), "field lengths differ");
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let worst = (a.x - e.x)
            .abs()
            .max((a.y - e.y).abs())
            .max((a.z - e.z).abs());
        assert!(
            worst <= tol,
            "position {i} differs by {worst} (tol {tol}): actual {a:?}, expected {e:?}"
        );
    }
}

/// Bitwise equality of two fields, including signed zeros.
pub fn fields_bitwise_equal(a: &MagnetizationField, b: &MagnetizationField) -> bool {
    a.len() == b.len()
        && a
            .as_flat()
            .iter()
            .zip(b.as_flat())
            .all(|(x, y)| x.to_bits() == y.to_bits())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_vectors_pass() {
        assert_vec3_close(
            Magnetization::new(1.0, 0.0, 0.0),
            Magnetization::new(1.0 + 1e-14, 0.0, -1e-14),
            TOL,
        );
    }

    #[test]
    #[should_panic(expected = "vectors differ")]
    fn distant_vectors_fail() {
        assert_vec3_close(
            Magnetization::new(1.0, 0.0, 0.0),
            Magnetization::new(0.0, 1.0, 0.0),
            TOL,
        );
    }

    #[test]
    fn bitwise_equality_distinguishes_signed_zero() {
        let a = MagnetizationField::uniform(1, Magnetization::new(0.0, 0.0, 1.0));
        let b = MagnetizationField::uniform(1, Magnetization::new(-0.0, 0.0, 1.0));
        assert!(fields_bitwise_equal(&a, &a.clone()));
        assert!(!fields_bitwise_equal(&a, &b));
    }
}
