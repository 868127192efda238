/*!
 * Process Types
 * Caller input and per-run state for simulated processes
 */

use crate::core::errors::SimError;
use crate::core::limits::IDLE_MARKER;
use crate::core::types::{Pid, Priority, SimResult, Ticks};
use serde::{Deserialize, Serialize};

/// Process state within a single scheduling run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessState {
    /// Arrived (or not yet arrived) and waiting for the CPU
    Ready,
    /// Currently dispatched
    Running,
    /// Remaining burst reached zero
    Completed,
}

/// Process description as supplied by the caller
///
/// Numeric fields are signed so that out-of-range values surface as
/// `InvalidInput` rather than failing to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub pid: Pid,
    pub arrival_time: i64,
    pub burst_time: i64,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub memory_required: i64,
}

impl ProcessSpec {
    pub fn new(pid: impl Into<Pid>, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            pid: pid.into(),
            arrival_time,
            burst_time,
            priority: 0,
            memory_required: 0,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_memory(mut self, memory_required: i64) -> Self {
        self.memory_required = memory_required;
        self
    }
}

/// Simulated process with its run-state
///
/// `remaining_time` is only decremented by preemptive dispatch; start and
/// completion are each written once per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub priority: Priority,
    /// Informational only, never used by the scheduler
    pub memory_required: u64,
    pub state: ProcessState,
    pub remaining_time: Ticks,
    pub start_time: Option<Ticks>,
    pub completion_time: Option<Ticks>,
}

impl Process {
    pub fn new(pid: impl Into<Pid>, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            pid: pid.into(),
            arrival_time,
            burst_time,
            priority: 0,
            memory_required: 0,
            state: ProcessState::Ready,
            remaining_time: burst_time,
            start_time: None,
            completion_time: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_memory(mut self, memory_required: u64) -> Self {
        self.memory_required = memory_required;
        self
    }

    /// Restore the initial run-state so the record can be scheduled again
    pub fn reset(&mut self) {
        self.state = ProcessState::Ready;
        self.remaining_time = self.burst_time;
        self.start_time = None;
        self.completion_time = None;
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.state == ProcessState::Completed
    }

    #[inline]
    pub(crate) fn has_arrived(&self, now: Ticks) -> bool {
        self.arrival_time <= now
    }

    /// Mark as dispatched at `now`; only the first dispatch sets the start time
    pub(crate) fn dispatch(&mut self, now: Ticks) {
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
        self.state = ProcessState::Running;
    }

    /// Consume up to `slice` ticks of remaining burst and return the amount run
    pub(crate) fn run_for(&mut self, slice: Ticks) -> Ticks {
        let ran = slice.min(self.remaining_time);
        self.remaining_time -= ran;
        ran
    }

    /// Return to the ready state after a preempted slice
    pub(crate) fn preempt(&mut self) {
        self.state = ProcessState::Ready;
    }

    pub(crate) fn complete(&mut self, now: Ticks) {
        self.remaining_time = 0;
        self.completion_time = Some(now);
        self.state = ProcessState::Completed;
    }
}

impl TryFrom<ProcessSpec> for Process {
    type Error = SimError;

    fn try_from(spec: ProcessSpec) -> SimResult<Self> {
        if spec.pid.is_empty() {
            return Err(SimError::invalid_input("pid cannot be empty"));
        }
        if spec.pid == IDLE_MARKER {
            return Err(SimError::invalid_input(format!(
                "pid '{}' is reserved for idle CPU slots",
                IDLE_MARKER
            )));
        }
        if spec.arrival_time < 0 {
            return Err(SimError::invalid_input(format!(
                "{}: arrival_time cannot be negative (got {})",
                spec.pid, spec.arrival_time
            )));
        }
        if spec.burst_time < 1 {
            return Err(SimError::invalid_input(format!(
                "{}: burst_time must be positive (got {})",
                spec.pid, spec.burst_time
            )));
        }
        if spec.memory_required < 0 {
            return Err(SimError::invalid_input(format!(
                "{}: memory_required cannot be negative (got {})",
                spec.pid, spec.memory_required
            )));
        }

        Ok(Process::new(spec.pid, spec.arrival_time as Ticks, spec.burst_time as Ticks)
            .with_priority(spec.priority)
            .with_memory(spec.memory_required as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_conversion() {
        let spec = ProcessSpec::new("P1", 3, 5).with_priority(2).with_memory(64);
        let process = Process::try_from(spec).unwrap();

        assert_eq!(process.pid, "P1");
        assert_eq!(process.arrival_time, 3);
        assert_eq!(process.burst_time, 5);
        assert_eq!(process.remaining_time, 5);
        assert_eq!(process.priority, 2);
        assert_eq!(process.memory_required, 64);
        assert_eq!(process.state, ProcessState::Ready);
        assert!(process.start_time.is_none());
    }

    #[test]
    fn test_spec_bounds() {
        assert!(Process::try_from(ProcessSpec::new("P1", -1, 5)).is_err());
        assert!(Process::try_from(ProcessSpec::new("P1", 0, 0)).is_err());
        assert!(Process::try_from(ProcessSpec::new("P1", 0, 1).with_memory(-4)).is_err());
        assert!(Process::try_from(ProcessSpec::new("", 0, 1)).is_err());
        assert!(Process::try_from(ProcessSpec::new("IDLE", 0, 1)).is_err());
        assert!(Process::try_from(ProcessSpec::new("P1", 0, 1).with_priority(-3)).is_ok());
    }

    #[test]
    fn test_run_state_transitions() {
        let mut process = Process::new("P1", 0, 5);

        process.dispatch(2);
        assert_eq!(process.state, ProcessState::Running);
        assert_eq!(process.run_for(3), 3);
        assert_eq!(process.remaining_time, 2);
        process.preempt();

        // Second dispatch keeps the first start time
        process.dispatch(7);
        assert_eq!(process.start_time, Some(2));
        assert_eq!(process.run_for(3), 2);
        process.complete(9);
        assert!(process.is_completed());
        assert_eq!(process.completion_time, Some(9));

        process.reset();
        assert_eq!(process.remaining_time, 5);
        assert!(process.completion_time.is_none());
        assert_eq!(process.state, ProcessState::Ready);
    }

    #[test]
    fn test_spec_deserialization_defaults() {
        let spec: ProcessSpec =
            serde_json::from_str(r#"{"pid": "P2", "arrival_time": 1, "burst_time": 4}"#).unwrap();
        assert_eq!(spec.priority, 0);
        assert_eq!(spec.memory_required, 0);
    }
}
