/*!
 * Metrics Calculator
 * Derives waiting, turnaround, response, utilization and throughput
 */

use super::types::{AggregateMetrics, ComparisonRow, MetricsReport, ProcessMetrics};
use crate::core::errors::SimError;
use crate::core::types::{SimResult, Ticks};
use crate::process::Process;
use crate::scheduler::{Schedule, SchedulingAlgorithm, TimelineEntry};

/// Stateless metrics derivation over scheduler output
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Metrics for a finished schedule
    pub fn for_schedule(schedule: &Schedule) -> SimResult<MetricsReport> {
        Self::calculate(&schedule.processes, &schedule.timeline)
    }

    /// Compute per-process and aggregate metrics
    ///
    /// Elapsed time is the end of the last timeline entry; the timeline is
    /// assumed to start at 0 as produced by the scheduler.
    pub fn calculate(processes: &[Process], timeline: &[TimelineEntry]) -> SimResult<MetricsReport> {
        let elapsed = match timeline.last() {
            Some(entry) if entry.end > 0 => entry.end,
            _ => {
                return Err(SimError::invalid_input(
                    "timeline is empty, elapsed time would be zero",
                ))
            }
        };
        if processes.is_empty() {
            return Err(SimError::invalid_input("process list is empty"));
        }

        let per_process = processes
            .iter()
            .map(Self::process_metrics)
            .collect::<SimResult<Vec<_>>>()?;

        let count = per_process.len() as f64;
        let mean = |f: fn(&ProcessMetrics) -> Ticks| -> f64 {
            per_process.iter().map(|m| f(m) as f64).sum::<f64>() / count
        };

        let idle: Ticks = timeline
            .iter()
            .filter(|e| e.is_idle())
            .map(TimelineEntry::duration)
            .sum();

        let aggregates = AggregateMetrics {
            avg_waiting_time: mean(|m: &ProcessMetrics| m.waiting_time),
            avg_turnaround_time: mean(|m: &ProcessMetrics| m.turnaround_time),
            avg_response_time: mean(|m: &ProcessMetrics| m.response_time),
            cpu_utilization: 100.0 * (elapsed - idle) as f64 / elapsed as f64,
            throughput: count / elapsed as f64,
        };

        Ok(MetricsReport {
            per_process,
            aggregates,
        })
    }

    fn process_metrics(process: &Process) -> SimResult<ProcessMetrics> {
        let (Some(start), Some(completion)) = (process.start_time, process.completion_time) else {
            return Err(SimError::invalid_input(format!(
                "{}: process has not completed",
                process.pid
            )));
        };

        let turnaround = completion.checked_sub(process.arrival_time);
        let waiting = turnaround.and_then(|t| t.checked_sub(process.burst_time));
        let response = start.checked_sub(process.arrival_time);

        match (turnaround, waiting, response) {
            (Some(turnaround_time), Some(waiting_time), Some(response_time)) => {
                Ok(ProcessMetrics {
                    pid: process.pid.clone(),
                    arrival_time: process.arrival_time,
                    burst_time: process.burst_time,
                    priority: process.priority,
                    start_time: start,
                    completion_time: completion,
                    turnaround_time,
                    waiting_time,
                    response_time,
                })
            }
            _ => Err(SimError::invalid_input(format!(
                "{}: start/completion times inconsistent with arrival and burst",
                process.pid
            ))),
        }
    }

    /// Build a comparison table, one row per algorithm in the given order
    pub fn compare<I>(results: I) -> Vec<ComparisonRow>
    where
        I: IntoIterator<Item = (SchedulingAlgorithm, AggregateMetrics)>,
    {
        results
            .into_iter()
            .map(|(algorithm, aggregates)| ComparisonRow {
                algorithm,
                aggregates,
            })
            .collect()
    }
}
