/*!
 * Simulation Limits and Defaults
 *
 * Named constants shared by the scheduler, metrics, and memory simulators.
 */

// =============================================================================
// SCHEDULING
// =============================================================================

/// Round Robin quantum used when the caller does not supply one
pub const DEFAULT_TIME_QUANTUM: u64 = 2;

/// Smallest accepted Round Robin quantum
pub const MIN_TIME_QUANTUM: u64 = 1;

/// Text shown for idle CPU slots in timelines
pub const IDLE_MARKER: &str = "IDLE";

// =============================================================================
// MEMORY
// =============================================================================

/// Frame count used when the caller does not supply one
pub const DEFAULT_MEMORY_FRAMES: usize = 4;

/// Smallest accepted frame count
pub const MIN_MEMORY_FRAMES: usize = 1;

// =============================================================================
// RESULT ROUNDING
// =============================================================================

/// Decimal places for average times and CPU utilization
pub const TIME_METRIC_PRECISION: u32 = 2;

/// Decimal places for throughput and hit rate
pub const RATE_PRECISION: u32 = 4;

/// Round `value` to `places` decimal places
#[inline]
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
