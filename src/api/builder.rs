/*!
 * Simulator Builder
 * Builder pattern for Simulator construction
 */

use super::simulator::Simulator;
use crate::core::config::SimulatorConfig;
use crate::core::types::SimResult;

/// Builder for [`Simulator`]
#[derive(Debug, Clone, Default)]
pub struct SimulatorBuilder {
    config: SimulatorConfig,
}

impl SimulatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn with_config(mut self, config: SimulatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Default Round Robin quantum
    pub fn with_quantum(mut self, quantum: u64) -> Self {
        self.config.default_quantum = quantum;
        self
    }

    /// Default frame count for memory simulations
    pub fn with_frame_count(mut self, frames: usize) -> Self {
        self.config.default_frame_count = frames;
        self
    }

    /// Round aggregate metrics and hit rates for presentation
    pub fn with_rounding(mut self, enabled: bool) -> Self {
        self.config.round_results = enabled;
        self
    }

    /// Validate the configuration and build the simulator
    pub fn build(self) -> SimResult<Simulator> {
        Simulator::new(self.config)
    }
}
