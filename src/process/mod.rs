/*!
 * Process Module
 * Simulated process records and input validation
 */

pub mod types;
pub mod validation;

pub use types::{Process, ProcessSpec, ProcessState};
pub use validation::{build_processes, validate_processes};
