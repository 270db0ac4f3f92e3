//! Python bindings for the rfsim rotation simulator.
//!
//! This crate provides PyO3 bindings wrapping the C FFI layer (`rfsim-ffi`).
//! The native extension is named `_rfsim` and is imported by the
//! pure-Python `rfsim` package.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![allow(unsafe_code)]

use pyo3::prelude::*;

mod error;
mod simulate;

/// The native `_rfsim` extension module.
#[pymodule]
fn _rfsim(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(simulate::simulate, m)?)?;
    m.add_function(wrap_pyfunction!(simulate::field_len, m)?)?;
    Ok(())
}
