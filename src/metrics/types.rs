/*!
 * Metrics Types
 * Per-process and aggregate scheduling statistics
 */

use crate::core::limits::{round_to, RATE_PRECISION, TIME_METRIC_PRECISION};
use crate::core::types::{Pid, Priority, Ticks};
use crate::scheduler::SchedulingAlgorithm;
use serde::{Deserialize, Serialize};

/// Timing of one completed process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub priority: Priority,
    pub start_time: Ticks,
    pub completion_time: Ticks,
    /// completion − arrival
    pub turnaround_time: Ticks,
    /// turnaround − burst
    pub waiting_time: Ticks,
    /// start − arrival
    pub response_time: Ticks,
}

/// Averages and utilization over a whole schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub avg_waiting_time: f64,
    pub avg_turnaround_time: f64,
    pub avg_response_time: f64,
    /// Percentage of elapsed time spent on non-idle entries
    pub cpu_utilization: f64,
    /// Completed processes per tick
    pub throughput: f64,
}

impl AggregateMetrics {
    /// Presentation rounding: times and utilization to 2 places, throughput to 4
    pub fn rounded(&self) -> Self {
        Self {
            avg_waiting_time: round_to(self.avg_waiting_time, TIME_METRIC_PRECISION),
            avg_turnaround_time: round_to(self.avg_turnaround_time, TIME_METRIC_PRECISION),
            avg_response_time: round_to(self.avg_response_time, TIME_METRIC_PRECISION),
            cpu_utilization: round_to(self.cpu_utilization, TIME_METRIC_PRECISION),
            throughput: round_to(self.throughput, RATE_PRECISION),
        }
    }
}

/// Metrics derived from one schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub per_process: Vec<ProcessMetrics>,
    pub aggregates: AggregateMetrics,
}

/// One row of a cross-algorithm comparison table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub algorithm: SchedulingAlgorithm,
    #[serde(flatten)]
    pub aggregates: AggregateMetrics,
}
