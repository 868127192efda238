/*!
 * Process Set Validation
 * Fail-fast checks run before any scheduling policy
 */

use super::types::{Process, ProcessSpec};
use crate::core::errors::SimError;
use crate::core::limits::IDLE_MARKER;
use crate::core::types::{SimResult, Ticks};
use ahash::RandomState;
use std::collections::HashSet;

/// Convert caller specs into run-state records, stopping at the first violation
pub fn build_processes(specs: Vec<ProcessSpec>) -> SimResult<Vec<Process>> {
    if specs.is_empty() {
        return Err(SimError::invalid_input("process list is empty"));
    }

    let processes = specs
        .into_iter()
        .map(Process::try_from)
        .collect::<SimResult<Vec<_>>>()?;

    validate_processes(&processes)?;
    Ok(processes)
}

/// Validate a process set in input order
///
/// Rejects an empty set, duplicate or reserved pids, bursts below one, and
/// sets whose total run time does not fit the tick clock.
pub fn validate_processes(processes: &[Process]) -> SimResult<()> {
    if processes.is_empty() {
        return Err(SimError::invalid_input("process list is empty"));
    }

    let mut seen: HashSet<&str, RandomState> =
        HashSet::with_capacity_and_hasher(processes.len(), RandomState::new());

    for process in processes {
        if process.pid.is_empty() {
            return Err(SimError::invalid_input("pid cannot be empty"));
        }
        if process.pid == IDLE_MARKER {
            return Err(SimError::invalid_input(format!(
                "pid '{}' is reserved for idle CPU slots",
                IDLE_MARKER
            )));
        }
        if !seen.insert(process.pid.as_str()) {
            return Err(SimError::invalid_input(format!(
                "duplicate pid '{}'",
                process.pid
            )));
        }
        if process.burst_time < 1 {
            return Err(SimError::invalid_input(format!(
                "{}: burst_time must be positive",
                process.pid
            )));
        }
    }

    simulated_horizon(processes)?;
    Ok(())
}

/// Latest instant any schedule of `processes` can reach
///
/// No policy finishes later than the last arrival plus every burst, so a
/// set whose horizon fits in [`Ticks`] never overflows the tick clock.
fn simulated_horizon(processes: &[Process]) -> SimResult<Ticks> {
    let last_arrival = processes.iter().map(|p| p.arrival_time).max().unwrap_or(0);
    processes
        .iter()
        .try_fold(last_arrival, |acc, p| acc.checked_add(p.burst_time))
        .ok_or_else(|| {
            SimError::invalid_input(
                "arrival and burst times too large: the schedule would overflow the tick clock",
            )
        })
}
