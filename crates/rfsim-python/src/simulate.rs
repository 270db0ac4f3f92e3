//! `simulate()`: run a hard pulse over a NumPy magnetization array.
//!
//! Inputs are borrowed read-only and must be C-contiguous float64. The
//! GIL is released for the duration of the FFI call.

use numpy::{
    PyArray1, PyArray2, PyArrayMethods, PyReadonlyArray1, PyReadonlyArray2, PyUntypedArrayMethods,
};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use rfsim_ffi::{rfsim_field_len, rfsim_simulate_with, RfsimExecution, RfsimSimOptions};

use crate::error::check_status;

/// Borrow a read-only array as a contiguous slice.
fn contiguous<'a>(name: &str, arr: &'a PyReadonlyArray1<'_, f64>) -> PyResult<&'a [f64]> {
    arr.as_slice()
        .map_err(|_| PyValueError::new_err(format!("{name} must be a C-contiguous float64 array")))
}

/// Simulate a hard RF pulse.
///
/// Args:
///     m_in: Initial magnetization, float64 array of shape (Nz, 3).
///     cos_theta, sin_theta: Per-position precession per step, length Nz.
///     cos_alpha, sin_alpha: Per-step flip angle, length Nt.
///     cp_rf, sp_rf: Cosine and sine of the RF phase.
///     parallel: Split positions of each step across threads.
///     min_parallel_len: Minimum positions per parallel task.
///     unit_tolerance: If > 0, reject trig pairs off the unit circle.
///
/// Returns:
///     Final magnetization, float64 array of shape (Nz, 3).
///
/// Raises:
///     ValueError: On shape mismatch, non-contiguous input, or a failed
///         unit-circle check.
#[pyfunction]
#[pyo3(signature = (
    m_in, cos_theta, sin_theta, cos_alpha, sin_alpha, cp_rf, sp_rf,
    parallel=false, min_parallel_len=1024, unit_tolerance=0.0
))]
#[allow(clippy::too_many_arguments)]
pub(crate) fn simulate<'py>(
    py: Python<'py>,
    m_in: PyReadonlyArray2<'py, f64>,
    cos_theta: PyReadonlyArray1<'py, f64>,
    sin_theta: PyReadonlyArray1<'py, f64>,
    cos_alpha: PyReadonlyArray1<'py, f64>,
    sin_alpha: PyReadonlyArray1<'py, f64>,
    cp_rf: f64,
    sp_rf: f64,
    parallel: bool,
    min_parallel_len: usize,
    unit_tolerance: f64,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let shape = m_in.shape();
    if shape[1] != 3 {
        return Err(PyValueError::new_err(format!(
            "m_in must have shape (Nz, 3), got ({}, {})",
            shape[0], shape[1]
        )));
    }
    let nz = shape[0];
    let m = m_in
        .as_slice()
        .map_err(|_| PyValueError::new_err("m_in must be a C-contiguous float64 array"))?;
    let ct = contiguous("cos_theta", &cos_theta)?;
    let st = contiguous("sin_theta", &sin_theta)?;
    let ca = contiguous("cos_alpha", &cos_alpha)?;
    let sa = contiguous("sin_alpha", &sin_alpha)?;

    // The FFI takes one length per table pair; reject mismatched pairs here.
    if ct.len() != nz || st.len() != nz {
        check_status(rfsim_ffi::RfsimStatus::ShapeMismatch as i32)?;
    }
    if ca.len() != sa.len() {
        check_status(rfsim_ffi::RfsimStatus::ShapeMismatch as i32)?;
    }
    let nt = ca.len();

    let options = RfsimSimOptions {
        execution: if parallel {
            RfsimExecution::Parallel as i32
        } else {
            RfsimExecution::Serial as i32
        },
        min_parallel_len,
        unit_tolerance,
    };

    let mut out = vec![0.0f64; m.len()];
    let m_len = m.len();
    let out_len = out.len();

    // Convert raw pointers to usize so the closure is Ungil.
    let m_addr = m.as_ptr() as usize;
    let ct_addr = ct.as_ptr() as usize;
    let st_addr = st.as_ptr() as usize;
    let ca_addr = ca.as_ptr() as usize;
    let sa_addr = sa.as_ptr() as usize;
    let out_addr = out.as_mut_ptr() as usize;
    let opts_addr = &options as *const RfsimSimOptions as usize;

    // Release GIL: the simulation may run for a long time.
    let status = py.detach(|| {
        rfsim_simulate_with(
            m_addr as *const f64,
            m_len,
            ct_addr as *const f64,
            st_addr as *const f64,
            nz,
            ca_addr as *const f64,
            sa_addr as *const f64,
            nt,
            cp_rf,
            sp_rf,
            out_addr as *mut f64,
            out_len,
            opts_addr as *const RfsimSimOptions,
        )
    });
    check_status(status)?;

    PyArray1::from_vec(py, out).reshape([nz, 3])
}

/// Number of doubles in a flat magnetization buffer of `nz` positions.
#[pyfunction]
pub(crate) fn field_len(nz: usize) -> PyResult<usize> {
    let mut len = 0usize;
    check_status(rfsim_field_len(nz, &mut len))?;
    Ok(len)
}
