//! Behavioural properties of the rotation simulator.
//!
//! These tests drive the public `simulate` / `RotationSimulator` API with
//! whole fields and pulses rather than individual rotations.

use std::f64::consts::{FRAC_PI_2, PI};

use proptest::prelude::*;
use rfsim_core::{Magnetization, MagnetizationField, PrecessionTable, RfPhase, TipTable};
use rfsim_kernel::{simulate, Execution, RotationSimulator, SimConfig};
use rfsim_test_utils::{
    assert_field_close, assert_vec3_close, fields_bitwise_equal, random_unit_field, Scenario, TOL,
};

#[test]
fn single_ninety_degree_step_along_x() {
    let m0 = MagnetizationField::from_flat(&[0.0, 0.0, 1.0]).unwrap();
    let precession = PrecessionTable::new(vec![1.0], vec![0.0]).unwrap();
    let tip = TipTable::new(vec![0.0], vec![1.0]).unwrap();

    let out = simulate(&m0, &precession, &tip, RfPhase::new(1.0, 0.0)).unwrap();

    assert_eq!(out.len(), 1);
    assert_vec3_close(out.get(0).unwrap(), Magnetization::new(0.0, 1.0, 0.0), 0.0);
}

#[test]
fn one_eighty_flip_inverts_equilibrium() {
    let m0 = MagnetizationField::uniform(4, Magnetization::EQUILIBRIUM);
    let tip = TipTable::new(vec![-1.0], vec![0.0]).unwrap();
    let out = simulate(&m0, &PrecessionTable::identity(4), &tip, RfPhase::X).unwrap();
    for m in out.iter() {
        assert_vec3_close(m, Magnetization::new(0.0, 0.0, -1.0), 0.0);
    }
}

#[test]
fn zero_steps_is_exact_copy() {
    for nz in [0, 1, 17] {
        let s = Scenario::random(5, nz, 0);
        let out = simulate(&s.initial, &s.precession, &s.tip, s.phase).unwrap();
        assert!(fields_bitwise_equal(&out, &s.initial), "nz = {nz}");
    }
}

#[test]
fn pure_precession_rotates_by_total_angle() {
    let theta = [0.1, -0.7, 2.5];
    let nt = 13;
    let m0 = MagnetizationField::uniform(3, Magnetization::new(1.0, 0.0, 0.25));
    let out = simulate(
        &m0,
        &PrecessionTable::from_angles(&theta),
        &TipTable::zero_flip(nt),
        RfPhase::from_angle(0.9),
    )
    .unwrap();

    for (i, m) in out.iter().enumerate() {
        let total = nt as f64 * theta[i];
        // Clockwise: (1, 0) -> (cos, -sin).
        assert_vec3_close(
            m,
            Magnetization::new(total.cos(), -total.sin(), 0.25),
            1e-12,
        );
        assert_eq!(m.z, 0.25, "Mz must not change without a tip");
    }
}

#[test]
fn precession_then_tip_order_within_a_step() {
    // Transverse (1, 0, 0), precess 90° clockwise to (0, -1, 0), then tip
    // 90° about x: (0, -1, 0) -> (0, 0, 1). The reverse order would leave
    // the vector on x.
    let m0 = MagnetizationField::uniform(1, Magnetization::new(1.0, 0.0, 0.0));
    let out = simulate(
        &m0,
        &PrecessionTable::from_angles(&[FRAC_PI_2]),
        &TipTable::from_flip_angles(&[FRAC_PI_2]),
        RfPhase::X,
    )
    .unwrap();
    assert_vec3_close(out.get(0).unwrap(), Magnetization::new(0.0, 0.0, 1.0), 1e-15);
}

#[test]
fn split_pulse_equals_whole_pulse() {
    let s = Scenario::random(21, 8, 10);
    let whole = simulate(&s.initial, &s.precession, &s.tip, s.phase).unwrap();

    let first = TipTable::new(s.tip.cos()[..4].to_vec(), s.tip.sin()[..4].to_vec()).unwrap();
    let rest = TipTable::new(s.tip.cos()[4..].to_vec(), s.tip.sin()[4..].to_vec()).unwrap();
    let mid = simulate(&s.initial, &s.precession, &first, s.phase).unwrap();
    let end = simulate(&mid, &s.precession, &rest, s.phase).unwrap();

    assert!(fields_bitwise_equal(&whole, &end));
}

#[test]
fn large_field_parallel_matches_serial() {
    let s = Scenario::random(99, 5000, 16);
    let serial = simulate(&s.initial, &s.precession, &s.tip, s.phase).unwrap();
    let parallel = RotationSimulator::new(
        SimConfig::new().with_execution(Execution::Parallel { min_len: 64 }),
    )
    .unwrap()
    .run(&s.initial, &s.precession, &s.tip, s.phase)
    .unwrap();
    assert!(fields_bitwise_equal(&serial, &parallel));
}

#[test]
fn unit_tolerance_accepts_generated_tables() {
    let s = Scenario::random(4, 32, 32);
    let sim = RotationSimulator::new(SimConfig::new().with_unit_tolerance(1e-12)).unwrap();
    let checked = sim.run(&s.initial, &s.precession, &s.tip, s.phase).unwrap();
    let unchecked = simulate(&s.initial, &s.precession, &s.tip, s.phase).unwrap();
    assert_field_close(&checked, &unchecked, 0.0);
}

#[test]
fn no_renormalization_of_non_unit_input() {
    // Length 2 stays length 2: rotations scale nothing, and nothing rescales.
    let m0 = MagnetizationField::uniform(1, Magnetization::new(0.0, 0.0, 2.0));
    let out = simulate(
        &m0,
        &PrecessionTable::from_angles(&[0.3]),
        &TipTable::from_flip_angles(&[FRAC_PI_2, 0.4]),
        RfPhase::from_angle(PI / 3.0),
    )
    .unwrap();
    assert!((out.get(0).unwrap().norm() - 2.0).abs() < 1e-12);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn norm_is_preserved(seed in 0u64..10_000, nz in 1usize..16, nt in 1usize..24) {
        let s = Scenario::random(seed, nz, nt);
        let out = simulate(&s.initial, &s.precession, &s.tip, s.phase).unwrap();
        for (before, after) in s.initial.iter().zip(out.iter()) {
            prop_assert!((before.norm() - after.norm()).abs() < 1e-10);
        }
    }

    #[test]
    fn positions_are_independent(seed in 0u64..10_000, nz in 2usize..12, nt in 0usize..12) {
        let s = Scenario::random(seed, nz, nt);
        let full = simulate(&s.initial, &s.precession, &s.tip, s.phase).unwrap();
        for i in 0..nz {
            let single = s.initial.slice(i..i + 1);
            let table = PrecessionTable::new(
                vec![s.precession.cos()[i]],
                vec![s.precession.sin()[i]],
            ).unwrap();
            let alone = simulate(&single, &table, &s.tip, s.phase).unwrap();
            prop_assert_eq!(alone.get(0), full.get(i));
        }
    }

    #[test]
    fn zero_flip_keeps_mz(seed in 0u64..10_000, nz in 1usize..10, nt in 0usize..30) {
        let initial = random_unit_field(seed, nz);
        let s = Scenario::random(seed, nz, 0);
        let out = simulate(&initial, &s.precession, &TipTable::zero_flip(nt), s.phase).unwrap();
        for (before, after) in initial.iter().zip(out.iter()) {
            prop_assert_eq!(before.z, after.z);
            prop_assert!(
                (before.transverse_magnitude() - after.transverse_magnitude()).abs() < TOL * 100.0
            );
        }
    }

    #[test]
    fn parallel_is_bitwise_serial(
        seed in 0u64..10_000,
        nz in 0usize..200,
        nt in 0usize..8,
        min_len in 1usize..32,
    ) {
        let s = Scenario::random(seed, nz, nt);
        let serial = simulate(&s.initial, &s.precession, &s.tip, s.phase).unwrap();
        let parallel = RotationSimulator::new(
            SimConfig::new().with_execution(Execution::Parallel { min_len }),
        )
        .unwrap()
        .run(&s.initial, &s.precession, &s.tip, s.phase)
        .unwrap();
        prop_assert!(fields_bitwise_equal(&serial, &parallel));
    }
}
