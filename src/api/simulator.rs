/*!
 * Simulator Facade
 * Single entry point that validates input, selects the algorithm and packages results
 */

use super::builder::SimulatorBuilder;
use super::traits::{DeadlockApi, MemoryApi, SchedulingApi};
use super::types::{ScheduleReport, SchedulerComparison, SimulationRequest, SimulationResponse};
use crate::core::config::SimulatorConfig;
use crate::core::errors::{SerializableError, SimError};
use crate::core::limits::{round_to, RATE_PRECISION};
use crate::core::types::{PageId, SimResult};
use crate::deadlock::{DeadlockDetector, DeadlockInput, DeadlockReport};
use crate::memory::{FrameCount, MemoryManager, MemoryReport, MemorySummary, ReplacementPolicy};
use crate::metrics::MetricsCalculator;
use crate::monitoring::span_operation;
use crate::process::{build_processes, Process, ProcessSpec};
use crate::scheduler::{Scheduler, SchedulingAlgorithm, TimeQuantum};
use tracing::info;

/// Stateless simulator facade
///
/// Holds only its configuration. Every operation builds its working state
/// from the arguments, so one instance can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    pub fn new(config: SimulatorConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn builder() -> SimulatorBuilder {
        SimulatorBuilder::new()
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Dispatch a request selected by name
    pub fn handle(&self, request: SimulationRequest) -> SimResult<SimulationResponse> {
        match request {
            SimulationRequest::Schedule {
                processes,
                algorithm,
                quantum,
            } => {
                let algorithm = algorithm.parse::<SchedulingAlgorithm>()?;
                self.schedule(processes, algorithm, quantum)
                    .map(SimulationResponse::Schedule)
            }
            SimulationRequest::CompareSchedulers { processes, quantum } => self
                .compare_schedulers(processes, quantum)
                .map(SimulationResponse::CompareSchedulers),
            SimulationRequest::SimulateMemory {
                reference_sequence,
                frame_count,
                algorithm,
            } => {
                let policy = algorithm.parse::<ReplacementPolicy>()?;
                self.simulate_memory(&reference_sequence, frame_count, policy)
                    .map(SimulationResponse::SimulateMemory)
            }
            SimulationRequest::CompareMemory {
                reference_sequence,
                frame_count,
            } => self
                .compare_memory(&reference_sequence, frame_count)
                .map(SimulationResponse::CompareMemory),
            SimulationRequest::DetectDeadlock(input) => self
                .detect_deadlock(&input)
                .map(SimulationResponse::DetectDeadlock),
        }
    }

    /// Decode a JSON request, dispatch it and encode the response
    ///
    /// Failures come back in the flat [`SerializableError`] shape a transport
    /// layer can forward unchanged.
    pub fn handle_json(&self, request: &str) -> Result<String, SerializableError> {
        let request: SimulationRequest = serde_json::from_str(request)
            .map_err(|e| SimError::invalid_input(format!("malformed request: {}", e)))?;
        let response = self.handle(request)?;
        serde_json::to_string(&response)
            .map_err(|e| SerializableError::new("serialization", e.to_string()))
    }

    fn quantum(&self, quantum: Option<i64>) -> SimResult<TimeQuantum> {
        let ticks = match quantum {
            Some(ticks) => ticks,
            None => i64::try_from(self.config.default_quantum).map_err(|_| {
                SimError::invalid_input("default quantum does not fit a signed tick count")
            })?,
        };
        TimeQuantum::new(ticks)
    }

    fn frame_count(&self, frame_count: Option<i64>) -> SimResult<FrameCount> {
        let count = match frame_count {
            Some(count) => count,
            None => i64::try_from(self.config.default_frame_count).map_err(|_| {
                SimError::invalid_input("default frame count does not fit a signed count")
            })?,
        };
        FrameCount::new(count)
    }

    /// Run `algorithm` over already-validated records and attach metrics
    fn run_schedule(
        &self,
        processes: Vec<Process>,
        algorithm: SchedulingAlgorithm,
        quantum: Option<TimeQuantum>,
    ) -> SimResult<ScheduleReport> {
        let scheduler = match quantum {
            Some(quantum) => Scheduler::new(algorithm).with_quantum(quantum),
            None => Scheduler::new(algorithm),
        };
        let schedule = scheduler.run(processes)?;
        let report = MetricsCalculator::for_schedule(&schedule)?;

        let aggregates = if self.config.round_results {
            report.aggregates.rounded()
        } else {
            report.aggregates
        };

        info!(
            "Scheduling [{}] complete: avg WT={:.2}, avg TAT={:.2}",
            algorithm, aggregates.avg_waiting_time, aggregates.avg_turnaround_time
        );

        Ok(ScheduleReport {
            algorithm,
            quantum: quantum
                .filter(|_| algorithm.is_preemptive())
                .map(|q| q.ticks()),
            timeline: schedule.timeline,
            metrics: report.per_process,
            aggregates,
            log: schedule.log,
        })
    }

    fn round_memory(&self, mut report: MemoryReport) -> MemoryReport {
        if self.config.round_results {
            report.hit_rate = round_to(report.hit_rate, RATE_PRECISION);
        }
        report
    }
}

impl SchedulingApi for Simulator {
    fn schedule(
        &self,
        processes: Vec<ProcessSpec>,
        algorithm: SchedulingAlgorithm,
        quantum: Option<i64>,
    ) -> SimResult<ScheduleReport> {
        let span = span_operation("schedule");
        let _entered = span.enter();
        span.record_algorithm(algorithm.as_str());
        span.record_items_processed(processes.len());

        let result = build_processes(processes).and_then(|processes| {
            // The quantum only has to be valid when it is used
            let quantum = match algorithm {
                SchedulingAlgorithm::RoundRobin => Some(self.quantum(quantum)?),
                _ => None,
            };
            self.run_schedule(processes, algorithm, quantum)
        });

        match &result {
            Ok(_) => span.record_result(true),
            Err(e) => span.record_error(&e.to_string()),
        }
        result
    }

    fn compare_schedulers(
        &self,
        processes: Vec<ProcessSpec>,
        quantum: Option<i64>,
    ) -> SimResult<SchedulerComparison> {
        let span = span_operation("compare_schedulers");
        let _entered = span.enter();
        span.record_items_processed(processes.len());

        let result = build_processes(processes).and_then(|processes| {
            let quantum = Some(self.quantum(quantum)?);
            let results = SchedulingAlgorithm::ALL
                .iter()
                .map(|&algorithm| self.run_schedule(processes.clone(), algorithm, quantum))
                .collect::<SimResult<Vec<_>>>()?;

            let comparison =
                MetricsCalculator::compare(results.iter().map(|r| (r.algorithm, r.aggregates)));
            Ok(SchedulerComparison {
                results,
                comparison,
            })
        });

        match &result {
            Ok(_) => span.record_result(true),
            Err(e) => span.record_error(&e.to_string()),
        }
        result
    }
}

impl MemoryApi for Simulator {
    fn simulate_memory(
        &self,
        reference_sequence: &[PageId],
        frame_count: Option<i64>,
        policy: ReplacementPolicy,
    ) -> SimResult<MemoryReport> {
        let span = span_operation("simulate_memory");
        let _entered = span.enter();
        span.record_algorithm(policy.as_str());
        span.record_items_processed(reference_sequence.len());

        let result = self.frame_count(frame_count).and_then(|frames| {
            let report = MemoryManager::new(policy, frames).simulate(reference_sequence)?;
            info!(
                "Memory [{}]: {} faults, hit_rate={:.2}%",
                policy,
                report.total_faults,
                report.hit_rate * 100.0
            );
            Ok(self.round_memory(report))
        });

        match &result {
            Ok(_) => span.record_result(true),
            Err(e) => span.record_error(&e.to_string()),
        }
        result
    }

    fn compare_memory(
        &self,
        reference_sequence: &[PageId],
        frame_count: Option<i64>,
    ) -> SimResult<Vec<MemorySummary>> {
        let span = span_operation("compare_memory");
        let _entered = span.enter();
        span.record_items_processed(reference_sequence.len());

        let result = ReplacementPolicy::ALL
            .iter()
            .map(|&policy| {
                self.simulate_memory(reference_sequence, frame_count, policy)
                    .map(|report| report.summary())
            })
            .collect::<SimResult<Vec<_>>>();

        match &result {
            Ok(summaries) => {
                info!("Memory comparison complete: {} policies", summaries.len());
                span.record_result(true);
            }
            Err(e) => span.record_error(&e.to_string()),
        }
        result
    }
}

impl DeadlockApi for Simulator {
    fn detect_deadlock(&self, input: &DeadlockInput) -> SimResult<DeadlockReport> {
        let span = span_operation("detect_deadlock");
        let _entered = span.enter();
        span.record_items_processed(input.processes.len() + input.resources.len());

        let result = DeadlockDetector::detect(input);

        match &result {
            Ok(report) => {
                info!(
                    "Deadlock detection: {}",
                    if report.deadlocked { "DEADLOCKED" } else { "SAFE" }
                );
                span.record_result(true);
            }
            Err(e) => span.record_error(&e.to_string()),
        }
        result
    }
}
