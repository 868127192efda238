/*!
 * API Module
 * Simulator facade consumed by transport and presentation layers
 */

pub mod builder;
pub mod simulator;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use builder::SimulatorBuilder;
pub use simulator::Simulator;
pub use traits::*;
pub use types::*;
