//! C FFI bindings for the rfsim rotation simulator.
//!
//! Exposes a C-compatible API for host environments (numerical scripting
//! runtimes, plugin ABIs). Each entry point converts raw buffers into the
//! `rfsim-core` containers, runs the kernel, and writes the result into a
//! caller-allocated output buffer. This is the only crate in the workspace
//! that contains `unsafe` code.
//!
//! Every `extern "C"` function is wrapped in [`ffi_guard!`], so a Rust
//! panic never unwinds across the boundary: it is reported as
//! [`RfsimStatus::Panicked`] and its message can be retrieved with
//! [`rfsim_last_panic_message`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

use std::any::Any;
use std::cell::RefCell;
use std::ffi::c_char;

/// Run an FFI body under `catch_unwind`, mapping a panic to
/// [`RfsimStatus::Panicked`] and recording its message for
/// [`rfsim_last_panic_message`].
#[macro_export]
macro_rules! ffi_guard {
    ($body:block) => {{
        match ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(|| -> i32 { $body })) {
            Ok(status) => status,
            Err(payload) => {
                let msg = $crate::panic_message(&*payload);
                ::tracing::warn!(panic = %msg, "panic caught at FFI boundary");
                $crate::LAST_PANIC.with(|cell| *cell.borrow_mut() = msg);
                $crate::status::RfsimStatus::Panicked as i32
            }
        }
    }};
}

pub mod simulate;
pub mod status;
pub mod types;

pub use simulate::{
    rfsim_field_len, rfsim_sim_options_default, rfsim_simulate, rfsim_simulate_with,
};
pub use status::RfsimStatus;
pub use types::{RfsimExecution, RfsimSimOptions};

thread_local! {
    /// Message of the last panic caught by [`ffi_guard!`] on this thread.
    #[doc(hidden)]
    pub static LAST_PANIC: RefCell<String> = const { RefCell::new(String::new()) };
}

/// Best-effort text of a panic payload.
#[doc(hidden)]
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Copy the message of the last panic caught on this thread into `buf`.
///
/// Returns the full message length in bytes (excluding the terminator).
/// If `buf` is non-null and `cap > 0`, at most `cap - 1` bytes are copied
/// and the result is NUL-terminated. Pass a null `buf` to query the length.
/// Returns 0 if no panic has been caught on this thread.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn rfsim_last_panic_message(buf: *mut c_char, cap: usize) -> i32 {
    LAST_PANIC.with(|cell| {
        let msg = cell.borrow();
        let bytes = msg.as_bytes();
        if !buf.is_null() && cap > 0 {
            let n = bytes.len().min(cap - 1);
            // SAFETY: caller guarantees buf points to at least cap writable bytes;
            // n + 1 <= cap.
            unsafe {
                std::ptr::copy_nonoverlapping(bytes.as_ptr(), buf.cast::<u8>(), n);
                *buf.add(n) = 0;
            }
        }
        i32::try_from(bytes.len()).unwrap_or(i32::MAX)
    })
}
