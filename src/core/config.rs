/*!
 * Simulator Configuration
 * Caller-supplied defaults, validated once at construction
 */

use super::errors::SimError;
use super::limits::{
    DEFAULT_MEMORY_FRAMES, DEFAULT_TIME_QUANTUM, MIN_MEMORY_FRAMES, MIN_TIME_QUANTUM,
};
use super::types::SimResult;
use serde::{Deserialize, Serialize};

/// Defaults applied when an operation omits an optional parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Round Robin quantum used when a request has none
    pub default_quantum: u64,
    /// Frame count used when a memory request has none
    pub default_frame_count: usize,
    /// Round averages, utilization, throughput and hit rate for presentation
    pub round_results: bool,
}

impl SimulatorConfig {
    /// Check that the defaults are themselves valid parameters
    pub fn validate(&self) -> SimResult<()> {
        if self.default_quantum < MIN_TIME_QUANTUM {
            return Err(SimError::invalid_input(format!(
                "default quantum must be at least {}, got {}",
                MIN_TIME_QUANTUM, self.default_quantum
            )));
        }
        if i64::try_from(self.default_quantum).is_err() {
            return Err(SimError::invalid_input(format!(
                "default quantum must be at most {}, got {}",
                i64::MAX, self.default_quantum
            )));
        }
        if self.default_frame_count < MIN_MEMORY_FRAMES {
            return Err(SimError::invalid_input(format!(
                "default frame count must be at least {}, got {}",
                MIN_MEMORY_FRAMES, self.default_frame_count
            )));
        }
        if i64::try_from(self.default_frame_count).is_err() {
            return Err(SimError::invalid_input(format!(
                "default frame count must be at most {}, got {}",
                i64::MAX, self.default_frame_count
            )));
        }
        Ok(())
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            default_quantum: DEFAULT_TIME_QUANTUM,
            default_frame_count: DEFAULT_MEMORY_FRAMES,
            round_results: true,
        }
    }
}
