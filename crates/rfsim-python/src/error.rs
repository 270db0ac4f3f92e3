//! RfsimStatus -> Python exception mapping with recovery hints.

use std::ffi::c_char;

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::PyResult;
use rfsim_ffi::rfsim_last_panic_message;

/// Error reference URL for detailed error descriptions.
const ERROR_REF_URL: &str =
    "https://github.com/tachyon-beep/rfsim/blob/main/docs/error-reference.md";

/// Check an FFI status code. Returns `Ok(())` on success, raises a typed
/// Python exception with recovery hints on error.
pub(crate) fn check_status(code: i32) -> PyResult<()> {
    if code == 0 {
        return Ok(());
    }
    let (msg, hint, section) = error_detail(code);
    let mut full =
        format!("rfsim error {code}: {msg}\n  Hint: {hint}\n  Ref:  {ERROR_REF_URL}#{section}");
    if code == -128 {
        if let Some(panic) = last_panic() {
            full.push_str(&format!("\n  Panic: {panic}"));
        }
    }
    match code {
        // Bad inputs (caller's fault) → ValueError
        -5..=-1 => Err(PyValueError::new_err(full)),

        // Panics and unknown codes → RuntimeError
        _ => Err(PyRuntimeError::new_err(full)),
    }
}

/// Message of the last panic caught by the FFI layer on this thread.
fn last_panic() -> Option<String> {
    let len = rfsim_last_panic_message(std::ptr::null_mut(), 0);
    if len <= 0 {
        return None;
    }
    let mut buf = vec![0u8; len as usize + 1];
    let n = rfsim_last_panic_message(buf.as_mut_ptr() as *mut c_char, buf.len());
    buf.truncate(n.max(0) as usize);
    Some(String::from_utf8_lossy(&buf).into_owned())
}

/// Returns `(message, recovery_hint, error_reference_anchor)` for each FFI
/// status code.
fn error_detail(code: i32) -> (&'static str, &'static str, &'static str) {
    match code {
        -1 => (
            "invalid argument",
            "An array is missing or an option is out of range. Check that \
             `parallel` is a bool and every angle table is a float64 array.",
            "invalidargument",
        ),
        -2 => (
            "output buffer too small",
            "The output array must hold at least 3*Nz doubles. This is \
             allocated for you by simulate(); seeing it indicates a \
             version mismatch between the Python bindings and the native library.",
            "buffertoosmall",
        ),
        -3 => (
            "shape mismatch",
            "m_in must have shape (Nz, 3), cos_theta and sin_theta must \
             both have length Nz, and cos_alpha and sin_alpha must have \
             the same length Nt.",
            "shapemismatch",
        ),
        -4 => (
            "trig pair off the unit circle",
            "A (cos, sin) pair does not satisfy cos^2 + sin^2 = 1 within \
             unit_tolerance. Compute both tables from the same angle array \
             (np.cos(a), np.sin(a)), or pass unit_tolerance=0 to skip the check.",
            "notunitcircle",
        ),
        -5 => (
            "invalid simulation options",
            "min_parallel_len must be at least 1 when parallel=True, and \
             unit_tolerance must not be NaN.",
            "configerror",
        ),
        -128 => (
            "panic inside the native library",
            "This is a bug in rfsim. Please report it with the inputs \
             that triggered it.",
            "panicked",
        ),
        _ => (
            "unknown rfsim error",
            "An unrecognized error code was returned from the FFI layer. \
             This may indicate a version mismatch between the Python \
             bindings and the native library.",
            "unknown",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_known_codes_have_detail() {
        for code in [-1, -2, -3, -4, -5, -128] {
            let (msg, hint, section) = error_detail(code);
            assert!(!msg.is_empty(), "code {code} has empty msg");
            assert!(!hint.is_empty(), "code {code} has empty hint");
            assert!(!section.is_empty(), "code {code} has empty section");
            assert!(!msg.contains("unknown"), "code {code} fell through");
        }
    }

    #[test]
    fn unknown_code_returns_fallback() {
        let (msg, hint, section) = error_detail(-999);
        assert!(msg.contains("unknown"));
        assert!(hint.contains("version mismatch"));
        assert!(!section.is_empty());
    }

    #[test]
    fn error_ref_url_is_valid() {
        assert!(ERROR_REF_URL.starts_with("https://"));
        assert!(ERROR_REF_URL.contains("error-reference.md"));
    }
}
