/*!
 * OS Simulation Engine
 * Deterministic CPU scheduling, page replacement and deadlock detection
 *
 * Provides:
 * - Scheduling under FCFS, SJF, Priority and Round Robin with timeline metrics
 * - FIFO, LRU and Optimal page replacement over a bounded frame set
 * - Resource-allocation graph validation and wait-for cycle detection
 *
 * Every operation is a pure computation over its input. Transport, file
 * loading and presentation belong to the caller.
 */

pub mod api;
pub mod core;
pub mod deadlock;
pub mod memory;
pub mod metrics;
pub mod monitoring;
pub mod process;
pub mod scheduler;

// Re-exports
pub use api::{
    DeadlockApi, MemoryApi, ScheduleReport, SchedulerComparison, SchedulingApi, SimulationApi,
    SimulationRequest, SimulationResponse, Simulator, SimulatorBuilder,
};
pub use crate::core::{InlineString, SerializableError, SimError, SimResult, SimulatorConfig};
pub use deadlock::{DeadlockDetector, DeadlockInput, DeadlockReport};
pub use memory::{MemoryManager, MemoryReport, MemorySummary, ReplacementPolicy};
pub use metrics::{AggregateMetrics, MetricsCalculator, ProcessMetrics};
pub use monitoring::{init_tracing, TracingConfig};
pub use process::{Process, ProcessSpec, ProcessState};
pub use scheduler::{Schedule, Scheduler, SchedulingAlgorithm, TimeQuantum, TimelineEntry};
