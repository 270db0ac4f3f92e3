//! C-compatible option types for `rfsim_simulate_with`.

use rfsim_kernel::{Execution, SimConfig};

use crate::status::RfsimStatus;

/// Per-position loop strategy.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RfsimExecution {
    /// Single-threaded.
    Serial = 0,
    /// Positions of each step split across a thread pool.
    Parallel = 1,
}

/// Simulation options. Obtain defaults with `rfsim_sim_options_default`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RfsimSimOptions {
    /// An [`RfsimExecution`] value.
    pub execution: i32,
    /// Minimum positions per parallel task. Ignored for serial execution;
    /// must be at least 1 for parallel execution.
    pub min_parallel_len: usize,
    /// Unit-circle tolerance for every trig pair. `<= 0` disables the
    /// check; NaN is rejected.
    pub unit_tolerance: f64,
}

impl Default for RfsimSimOptions {
    fn default() -> Self {
        Self {
            execution: RfsimExecution::Serial as i32,
            min_parallel_len: 1024,
            unit_tolerance: 0.0,
        }
    }
}

impl RfsimSimOptions {
    /// Convert to a kernel [`SimConfig`]. The result is not yet validated.
    pub(crate) fn to_config(self) -> Result<SimConfig, RfsimStatus> {
        let execution = match self.execution {
            0 => Execution::Serial,
            1 => Execution::Parallel {
                min_len: self.min_parallel_len,
            },
            _ => return Err(RfsimStatus::InvalidArgument),
        };
        let unit_tolerance = if self.unit_tolerance.is_nan() || self.unit_tolerance > 0.0 {
            Some(self.unit_tolerance)
        } else {
            None
        };
        Ok(SimConfig {
            execution,
            unit_tolerance,
        })
    }
}
