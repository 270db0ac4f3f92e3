//! Core types for the rfsim hard-pulse rotation simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! data model shared by the kernel and the host adapters: the
//! magnetization field, the precession and RF tip trig tables, the RF
//! phase pair, and the shape error type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod field;
pub mod trig;

pub use error::ShapeError;
pub use field::{Magnetization, MagnetizationField};
pub use trig::{PrecessionTable, RfPhase, TipTable, TrigPair};
