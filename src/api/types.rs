/*!
 * API Types
 * Request and response shapes for the simulator facade
 */

use crate::core::types::{PageId, Ticks};
use crate::deadlock::{DeadlockInput, DeadlockReport};
use crate::memory::{MemoryReport, MemorySummary};
use crate::metrics::{AggregateMetrics, ComparisonRow, ProcessMetrics};
use crate::process::ProcessSpec;
use crate::scheduler::{SchedulingAlgorithm, TimelineEntry};
use serde::{Deserialize, Serialize};

/// Result of one scheduling run with its metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub algorithm: SchedulingAlgorithm,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub quantum: Option<Ticks>,
    pub timeline: Vec<TimelineEntry>,
    pub metrics: Vec<ProcessMetrics>,
    pub aggregates: AggregateMetrics,
    pub log: Vec<String>,
}

/// All four scheduling algorithms over the same process set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerComparison {
    pub results: Vec<ScheduleReport>,
    pub comparison: Vec<ComparisonRow>,
}

/// Operation selected by name, as received from a transport layer
///
/// Algorithm names stay strings here so that an unrecognized one surfaces
/// as `UnknownPolicy` instead of a deserialization failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum SimulationRequest {
    Schedule {
        processes: Vec<ProcessSpec>,
        algorithm: String,
        #[serde(default)]
        quantum: Option<i64>,
    },
    CompareSchedulers {
        processes: Vec<ProcessSpec>,
        #[serde(default)]
        quantum: Option<i64>,
    },
    SimulateMemory {
        reference_sequence: Vec<PageId>,
        #[serde(default)]
        frame_count: Option<i64>,
        algorithm: String,
    },
    CompareMemory {
        reference_sequence: Vec<PageId>,
        #[serde(default)]
        frame_count: Option<i64>,
    },
    DetectDeadlock(DeadlockInput),
}

impl SimulationRequest {
    pub fn operation(&self) -> &'static str {
        match self {
            SimulationRequest::Schedule { .. } => "schedule",
            SimulationRequest::CompareSchedulers { .. } => "compare_schedulers",
            SimulationRequest::SimulateMemory { .. } => "simulate_memory",
            SimulationRequest::CompareMemory { .. } => "compare_memory",
            SimulationRequest::DetectDeadlock(_) => "detect_deadlock",
        }
    }
}

/// Response matching the request's operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", content = "result", rename_all = "snake_case")]
pub enum SimulationResponse {
    Schedule(ScheduleReport),
    CompareSchedulers(SchedulerComparison),
    SimulateMemory(MemoryReport),
    CompareMemory(Vec<MemorySummary>),
    DetectDeadlock(DeadlockReport),
}
