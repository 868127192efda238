/*!
 * CPU Scheduler
 * Deterministic dispatch simulation under FCFS, SJF, Priority and Round Robin
 */

mod dispatch;
mod entry;
mod round_robin;
pub mod types;

pub use types::{CpuSlot, Schedule, SchedulingAlgorithm, TimeQuantum, TimelineEntry};

use crate::core::errors::SimError;
use crate::core::types::SimResult;
use crate::process::{validate_processes, Process};
use tracing::debug;

/// Scheduler configured with one algorithm
///
/// Holds no run-state: each call to [`Scheduler::run`] builds its own ready
/// queue and timeline and returns them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduler {
    algorithm: SchedulingAlgorithm,
    quantum: Option<TimeQuantum>,
}

impl Scheduler {
    pub fn new(algorithm: SchedulingAlgorithm) -> Self {
        Self {
            algorithm,
            quantum: None,
        }
    }

    /// Round Robin scheduler with the given quantum
    pub fn round_robin(quantum: TimeQuantum) -> Self {
        Self::new(SchedulingAlgorithm::RoundRobin).with_quantum(quantum)
    }

    /// Set the quantum (ignored by non-preemptive algorithms)
    pub fn with_quantum(mut self, quantum: TimeQuantum) -> Self {
        self.quantum = Some(quantum);
        self
    }

    pub fn algorithm(&self) -> SchedulingAlgorithm {
        self.algorithm
    }

    pub fn quantum(&self) -> Option<TimeQuantum> {
        self.quantum
    }

    /// Simulate the process set to completion
    ///
    /// Run-state on the supplied records is reset first, so the same records
    /// can be passed to several schedulers.
    pub fn run(&self, mut processes: Vec<Process>) -> SimResult<Schedule> {
        validate_processes(&processes)?;
        processes.iter_mut().for_each(Process::reset);

        debug!(
            algorithm = self.algorithm.as_str(),
            processes = processes.len(),
            "schedule started"
        );

        let recorder = match self.algorithm {
            SchedulingAlgorithm::Fcfs | SchedulingAlgorithm::Sjf | SchedulingAlgorithm::Priority => {
                dispatch::run_to_completion(self.algorithm, &mut processes)
            }
            SchedulingAlgorithm::RoundRobin => {
                let quantum = self.quantum.ok_or_else(|| {
                    SimError::invalid_input("round robin requires a time quantum")
                })?;
                round_robin::run(quantum, &mut processes)
            }
        };

        debug!(
            algorithm = self.algorithm.as_str(),
            slices = recorder.timeline.len(),
            "schedule finished"
        );

        Ok(Schedule {
            algorithm: self.algorithm,
            timeline: recorder.timeline,
            processes,
            log: recorder.log,
        })
    }
}
