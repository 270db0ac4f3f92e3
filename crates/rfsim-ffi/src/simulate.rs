//! Simulation FFI: run a pulse over a flat magnetization buffer.
//!
//! Buffers use the host layout: the magnetization is `3·nz` doubles with
//! vector `i` at `[3i, 3i+1, 3i+2]`; every table is a plain array. All
//! inputs are copied into owned containers before the output buffer is
//! touched, so `m_out` may alias `m_in` for an in-place update.

use rfsim_core::{MagnetizationField, PrecessionTable, RfPhase, TipTable};
use rfsim_kernel::RotationSimulator;

use crate::status::RfsimStatus;
use crate::types::RfsimSimOptions;

/// Owned simulator inputs copied out of caller buffers.
struct Inputs {
    field: MagnetizationField,
    precession: PrecessionTable,
    tip: TipTable,
}

/// Borrow `len` doubles from `ptr`. A zero length never dereferences and
/// accepts null.
///
/// # Safety
///
/// If `len > 0` and `ptr` is non-null, `ptr` must point to `len` readable
/// `f64` values that stay valid for `'a`.
#[allow(unsafe_code)]
unsafe fn input_slice<'a>(ptr: *const f64, len: usize) -> Result<&'a [f64], RfsimStatus> {
    if len == 0 {
        return Ok(&[]);
    }
    if ptr.is_null() {
        return Err(RfsimStatus::InvalidArgument);
    }
    // SAFETY: non-null with len > 0; validity is the caller's contract.
    Ok(unsafe { std::slice::from_raw_parts(ptr, len) })
}

/// Copy every input out of caller memory.
///
/// # Safety
///
/// Same contract as [`input_slice`] for each pointer/length pair.
#[allow(unsafe_code, clippy::too_many_arguments)]
unsafe fn read_inputs(
    m_in: *const f64,
    m_in_len: usize,
    cos_theta: *const f64,
    sin_theta: *const f64,
    nz: usize,
    cos_alpha: *const f64,
    sin_alpha: *const f64,
    nt: usize,
) -> Result<Inputs, RfsimStatus> {
    let expected = nz.checked_mul(3).ok_or(RfsimStatus::InvalidArgument)?;
    if m_in_len != expected {
        return Err(RfsimStatus::ShapeMismatch);
    }
    // SAFETY: forwarded caller contract.
    let (m, ct, st, ca, sa) = unsafe {
        (
            input_slice(m_in, m_in_len)?,
            input_slice(cos_theta, nz)?,
            input_slice(sin_theta, nz)?,
            input_slice(cos_alpha, nt)?,
            input_slice(sin_alpha, nt)?,
        )
    };
    let field = MagnetizationField::from_flat(m).map_err(|e| RfsimStatus::from(&e))?;
    let precession =
        PrecessionTable::new(ct.to_vec(), st.to_vec()).map_err(|e| RfsimStatus::from(&e))?;
    let tip = TipTable::new(ca.to_vec(), sa.to_vec()).map_err(|e| RfsimStatus::from(&e))?;
    Ok(Inputs {
        field,
        precession,
        tip,
    })
}

/// Write `3·nz` into `out`.
///
/// Returns `InvalidArgument` if `out` is null or `3·nz` overflows.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn rfsim_field_len(nz: usize, out: *mut usize) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return RfsimStatus::InvalidArgument as i32;
        }
        let Some(len) = nz.checked_mul(3) else {
            return RfsimStatus::InvalidArgument as i32;
        };
        // SAFETY: out is non-null; caller guarantees it is valid and aligned.
        unsafe { *out = len };
        RfsimStatus::Ok as i32
    })
}

/// Fill `out` with the default simulation options.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn rfsim_sim_options_default(out: *mut RfsimSimOptions) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return RfsimStatus::InvalidArgument as i32;
        }
        // SAFETY: out is non-null; caller guarantees it is valid and aligned.
        unsafe { *out = RfsimSimOptions::default() };
        RfsimStatus::Ok as i32
    })
}

/// Simulate with default options (serial, no unit-circle check).
///
/// - `m_in`: `m_in_len` doubles, must equal `3·nz`.
/// - `cos_theta`, `sin_theta`: `nz` doubles each.
/// - `cos_alpha`, `sin_alpha`: `nt` doubles each.
/// - `cp_rf`, `sp_rf`: cosine and sine of the RF phase.
/// - `m_out`: caller-allocated, at least `3·nz` doubles.
///
/// Pointers may be null only when their length is zero. On any error
/// `m_out` is not written.
#[no_mangle]
#[allow(unsafe_code, clippy::too_many_arguments)]
pub extern "C" fn rfsim_simulate(
    m_in: *const f64,
    m_in_len: usize,
    cos_theta: *const f64,
    sin_theta: *const f64,
    nz: usize,
    cos_alpha: *const f64,
    sin_alpha: *const f64,
    nt: usize,
    cp_rf: f64,
    sp_rf: f64,
    m_out: *mut f64,
    m_out_len: usize,
) -> i32 {
    rfsim_simulate_with(
        m_in,
        m_in_len,
        cos_theta,
        sin_theta,
        nz,
        cos_alpha,
        sin_alpha,
        nt,
        cp_rf,
        sp_rf,
        m_out,
        m_out_len,
        std::ptr::null(),
    )
}

/// Simulate with explicit options. A null `options` means defaults.
///
/// See [`rfsim_simulate`] for buffer conventions.
#[no_mangle]
#[allow(unsafe_code, clippy::too_many_arguments)]
pub extern "C" fn rfsim_simulate_with(
    m_in: *const f64,
    m_in_len: usize,
    cos_theta: *const f64,
    sin_theta: *const f64,
    nz: usize,
    cos_alpha: *const f64,
    sin_alpha: *const f64,
    nt: usize,
    cp_rf: f64,
    sp_rf: f64,
    m_out: *mut f64,
    m_out_len: usize,
    options: *const RfsimSimOptions,
) -> i32 {
    ffi_guard!({
        let opts = if options.is_null() {
            RfsimSimOptions::default()
        } else {
            // SAFETY: options is non-null; caller guarantees it is valid.
            unsafe { *options }
        };
        let config = match opts.to_config() {
            Ok(c) => c,
            Err(status) => return status as i32,
        };
        let sim = match RotationSimulator::new(config) {
            Ok(s) => s,
            Err(e) => return RfsimStatus::from(&e) as i32,
        };

        // SAFETY: pointer/length pairs follow the documented contract.
        let inputs = match unsafe {
            read_inputs(
                m_in, m_in_len, cos_theta, sin_theta, nz, cos_alpha, sin_alpha, nt,
            )
        } {
            Ok(i) => i,
            Err(status) => return status as i32,
        };

        if m_out_len < m_in_len {
            return RfsimStatus::BufferTooSmall as i32;
        }
        if m_in_len > 0 && m_out.is_null() {
            return RfsimStatus::InvalidArgument as i32;
        }

        let result = match sim.run(
            &inputs.field,
            &inputs.precession,
            &inputs.tip,
            RfPhase::new(cp_rf, sp_rf),
        ) {
            Ok(f) => f,
            Err(e) => return RfsimStatus::from(&e) as i32,
        };

        if m_in_len > 0 {
            // SAFETY: m_out is non-null and holds at least m_out_len >= m_in_len
            // doubles; inputs were copied out above, so aliasing m_in is fine.
            let out = unsafe { std::slice::from_raw_parts_mut(m_out, m_in_len) };
            out.copy_from_slice(result.as_flat());
        }
        RfsimStatus::Ok as i32
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RfsimExecution;
    use proptest::prelude::*;
    use rfsim_kernel::simulate;
    use rfsim_test_utils::{fields_bitwise_equal, Scenario};

    fn run_scenario(s: &Scenario, options: Option<&RfsimSimOptions>) -> (i32, Vec<f64>) {
        let m_in = s.initial.as_flat();
        let mut out = vec![f64::NAN; m_in.len()];
        let status = rfsim_simulate_with(
            m_in.as_ptr(),
            m_in.len(),
            s.precession.cos().as_ptr(),
            s.precession.sin().as_ptr(),
            s.nz(),
            s.tip.cos().as_ptr(),
            s.tip.sin().as_ptr(),
            s.nt(),
            s.phase.cp,
            s.phase.sp,
            out.as_mut_ptr(),
            out.len(),
            options.map_or(std::ptr::null(), |o| o as *const RfsimSimOptions),
        );
        (status, out)
    }

    #[test]
    fn ninety_degree_scenario_through_ffi() {
        let m_in = [0.0, 0.0, 1.0];
        let (ct, st) = ([1.0], [0.0]);
        let (ca, sa) = ([0.0], [1.0]);
        let mut out = [f64::NAN; 3];
        let status = rfsim_simulate(
            m_in.as_ptr(),
            3,
            ct.as_ptr(),
            st.as_ptr(),
            1,
            ca.as_ptr(),
            sa.as_ptr(),
            1,
            1.0,
            0.0,
            out.as_mut_ptr(),
            3,
        );
        assert_eq!(status, RfsimStatus::Ok as i32);
        assert_eq!(out, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn ffi_matches_rust_api() {
        let s = Scenario::random(17, 12, 9);
        let (status, out) = run_scenario(&s, None);
        assert_eq!(status, RfsimStatus::Ok as i32);

        let expected = simulate(&s.initial, &s.precession, &s.tip, s.phase).unwrap();
        let got = MagnetizationField::from_flat(&out).unwrap();
        assert!(fields_bitwise_equal(&got, &expected));
    }

    #[test]
    fn parallel_options_match_serial() {
        let s = Scenario::random(3, 300, 5);
        let opts = RfsimSimOptions {
            execution: RfsimExecution::Parallel as i32,
            min_parallel_len: 8,
            unit_tolerance: 1e-12,
        };
        let (serial_status, serial) = run_scenario(&s, None);
        let (par_status, parallel) = run_scenario(&s, Some(&opts));
        assert_eq!(serial_status, RfsimStatus::Ok as i32);
        assert_eq!(par_status, RfsimStatus::Ok as i32);
        assert_eq!(
            serial.iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
            parallel.iter().map(|v| v.to_bits()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn in_place_update_is_allowed() {
        let s = Scenario::random(8, 4, 3);
        let expected = simulate(&s.initial, &s.precession, &s.tip, s.phase).unwrap();
        let mut buf = s.initial.clone().into_flat();
        let ptr = buf.as_mut_ptr();
        let status = rfsim_simulate(
            ptr,
            buf.len(),
            s.precession.cos().as_ptr(),
            s.precession.sin().as_ptr(),
            4,
            s.tip.cos().as_ptr(),
            s.tip.sin().as_ptr(),
            3,
            s.phase.cp,
            s.phase.sp,
            ptr,
            buf.len(),
        );
        assert_eq!(status, RfsimStatus::Ok as i32);
        assert_eq!(buf, expected.into_flat());
    }

    #[test]
    fn wrong_field_length_is_shape_mismatch() {
        let m_in = [0.0; 5];
        let ct = [1.0, 1.0];
        let st = [0.0, 0.0];
        let mut out = [7.0; 6];
        let status = rfsim_simulate(
            m_in.as_ptr(),
            m_in.len(),
            ct.as_ptr(),
            st.as_ptr(),
            2,
            std::ptr::null(),
            std::ptr::null(),
            0,
            1.0,
            0.0,
            out.as_mut_ptr(),
            out.len(),
        );
        assert_eq!(status, RfsimStatus::ShapeMismatch as i32);
        assert_eq!(out, [7.0; 6], "output must not be written on error");
    }

    #[test]
    fn short_output_is_buffer_too_small() {
        let s = Scenario::random(1, 3, 2);
        let m_in = s.initial.as_flat();
        let mut out = [0.0; 8];
        let status = rfsim_simulate(
            m_in.as_ptr(),
            m_in.len(),
            s.precession.cos().as_ptr(),
            s.precession.sin().as_ptr(),
            3,
            s.tip.cos().as_ptr(),
            s.tip.sin().as_ptr(),
            2,
            s.phase.cp,
            s.phase.sp,
            out.as_mut_ptr(),
            out.len(),
        );
        assert_eq!(status, RfsimStatus::BufferTooSmall as i32);
    }

    #[test]
    fn null_table_with_length_is_invalid_argument() {
        let m_in = [0.0, 0.0, 1.0];
        let mut out = [0.0; 3];
        let status = rfsim_simulate(
            m_in.as_ptr(),
            3,
            std::ptr::null(),
            std::ptr::null(),
            1,
            std::ptr::null(),
            std::ptr::null(),
            0,
            1.0,
            0.0,
            out.as_mut_ptr(),
            3,
        );
        assert_eq!(status, RfsimStatus::InvalidArgument as i32);
    }

    #[test]
    fn empty_inputs_accept_null_pointers() {
        let status = rfsim_simulate(
            std::ptr::null(),
            0,
            std::ptr::null(),
            std::ptr::null(),
            0,
            std::ptr::null(),
            std::ptr::null(),
            0,
            1.0,
            0.0,
            std::ptr::null_mut(),
            0,
        );
        assert_eq!(status, RfsimStatus::Ok as i32);
    }

    #[test]
    fn off_circle_tip_rejected_with_tolerance() {
        let m_in = [0.0, 0.0, 1.0];
        let (ct, st) = ([1.0], [0.0]);
        let (ca, sa) = ([0.5], [0.5]);
        let mut out = [0.0; 3];
        let opts = RfsimSimOptions {
            unit_tolerance: 1e-9,
            ..Default::default()
        };
        let status = rfsim_simulate_with(
            m_in.as_ptr(),
            3,
            ct.as_ptr(),
            st.as_ptr(),
            1,
            ca.as_ptr(),
            sa.as_ptr(),
            1,
            1.0,
            0.0,
            out.as_mut_ptr(),
            3,
            &opts,
        );
        assert_eq!(status, RfsimStatus::NotUnitCircle as i32);
    }

    #[test]
    fn zero_parallel_min_len_is_config_error() {
        let s = Scenario::random(2, 2, 2);
        let opts = RfsimSimOptions {
            execution: RfsimExecution::Parallel as i32,
            min_parallel_len: 0,
            unit_tolerance: 0.0,
        };
        let (status, _) = run_scenario(&s, Some(&opts));
        assert_eq!(status, RfsimStatus::ConfigError as i32);
    }

    #[test]
    fn field_len_and_default_options() {
        let mut len = 0usize;
        assert_eq!(rfsim_field_len(5, &mut len), RfsimStatus::Ok as i32);
        assert_eq!(len, 15);
        assert_eq!(
            rfsim_field_len(usize::MAX, &mut len),
            RfsimStatus::InvalidArgument as i32
        );
        assert_eq!(
            rfsim_field_len(1, std::ptr::null_mut()),
            RfsimStatus::InvalidArgument as i32
        );

        let mut opts = RfsimSimOptions {
            execution: 1,
            min_parallel_len: 0,
            unit_tolerance: -1.0,
        };
        assert_eq!(rfsim_sim_options_default(&mut opts), RfsimStatus::Ok as i32);
        assert_eq!(opts, RfsimSimOptions::default());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn ffi_agrees_with_rust_api(seed in 0u64..10_000, nz in 0usize..40, nt in 0usize..12) {
            let s = Scenario::random(seed, nz, nt);
            let (status, out) = run_scenario(&s, None);
            prop_assert_eq!(status, RfsimStatus::Ok as i32);
            let expected = simulate(&s.initial, &s.precession, &s.tip, s.phase).unwrap();
            prop_assert_eq!(out, expected.into_flat());
        }
    }
}
