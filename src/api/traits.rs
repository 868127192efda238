/*!
 * API Traits
 * Operation groups exposed by the simulator facade
 */

use super::types::{ScheduleReport, SchedulerComparison};
use crate::core::types::{PageId, SimResult};
use crate::deadlock::{DeadlockInput, DeadlockReport};
use crate::memory::{MemoryReport, MemorySummary, ReplacementPolicy};
use crate::process::ProcessSpec;
use crate::scheduler::SchedulingAlgorithm;

/// CPU scheduling operations
pub trait SchedulingApi: Send + Sync {
    /// Run one algorithm; `quantum` falls back to the configured default for Round Robin
    fn schedule(
        &self,
        processes: Vec<ProcessSpec>,
        algorithm: SchedulingAlgorithm,
        quantum: Option<i64>,
    ) -> SimResult<ScheduleReport>;

    /// Run every algorithm against the same process set
    fn compare_schedulers(
        &self,
        processes: Vec<ProcessSpec>,
        quantum: Option<i64>,
    ) -> SimResult<SchedulerComparison>;
}

/// Page-replacement operations
pub trait MemoryApi: Send + Sync {
    fn simulate_memory(
        &self,
        reference_sequence: &[PageId],
        frame_count: Option<i64>,
        policy: ReplacementPolicy,
    ) -> SimResult<MemoryReport>;

    /// Fault/hit summary for every policy
    fn compare_memory(
        &self,
        reference_sequence: &[PageId],
        frame_count: Option<i64>,
    ) -> SimResult<Vec<MemorySummary>>;
}

/// Deadlock detection operations
pub trait DeadlockApi: Send + Sync {
    fn detect_deadlock(&self, input: &DeadlockInput) -> SimResult<DeadlockReport>;
}

/// Combined simulator interface
pub trait SimulationApi: SchedulingApi + MemoryApi + DeadlockApi + Send + Sync {}

// Blanket implementation for any type that implements all component traits
impl<T> SimulationApi for T where T: SchedulingApi + MemoryApi + DeadlockApi + Send + Sync {}
