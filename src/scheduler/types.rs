/*!
 * Scheduler Types
 * Domain types for CPU scheduling runs
 */

use crate::core::errors::SimError;
use crate::core::limits::{IDLE_MARKER, MIN_TIME_QUANTUM};
use crate::core::types::{Pid, SimResult, Ticks};
use crate::process::Process;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// CPU scheduling algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchedulingAlgorithm {
    /// First come, first served (non-preemptive)
    Fcfs,
    /// Shortest job first (non-preemptive)
    Sjf,
    /// Lowest priority number first (non-preemptive)
    Priority,
    /// FIFO ready queue with a fixed quantum (preemptive)
    RoundRobin,
}

impl SchedulingAlgorithm {
    /// Every algorithm, in comparison order
    pub const ALL: [SchedulingAlgorithm; 4] = [
        SchedulingAlgorithm::Fcfs,
        SchedulingAlgorithm::Sjf,
        SchedulingAlgorithm::Priority,
        SchedulingAlgorithm::RoundRobin,
    ];

    /// Display name used in results and comparison tables
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::Sjf => "SJF",
            Self::Priority => "PRIORITY",
            Self::RoundRobin => "RR",
        }
    }

    #[inline]
    pub const fn is_preemptive(&self) -> bool {
        matches!(self, Self::RoundRobin)
    }
}

impl FromStr for SchedulingAlgorithm {
    type Err = SimError;

    fn from_str(s: &str) -> SimResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "fcfs" => Ok(Self::Fcfs),
            "sjf" => Ok(Self::Sjf),
            "priority" | "prio" => Ok(Self::Priority),
            "rr" | "round_robin" | "roundrobin" => Ok(Self::RoundRobin),
            _ => Err(SimError::unknown_policy(format!(
                "scheduling algorithm '{}' (valid: fcfs, sjf, priority, rr)",
                s
            ))),
        }
    }
}

impl fmt::Display for SchedulingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SchedulingAlgorithm {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SchedulingAlgorithm {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Round Robin time quantum in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TimeQuantum(Ticks);

impl TimeQuantum {
    /// Validate a caller-supplied quantum
    pub fn new(ticks: i64) -> SimResult<Self> {
        if ticks < MIN_TIME_QUANTUM as i64 {
            return Err(SimError::invalid_input(format!(
                "time quantum must be a positive integer (got {})",
                ticks
            )));
        }
        Ok(Self(ticks as Ticks))
    }

    #[inline(always)]
    pub const fn ticks(&self) -> Ticks {
        self.0
    }
}

impl<'de> Deserialize<'de> for TimeQuantum {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ticks = i64::deserialize(deserializer)?;
        Self::new(ticks).map_err(serde::de::Error::custom)
    }
}

/// Occupant of the CPU during a timeline entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CpuSlot {
    Idle,
    Process(Pid),
}

impl CpuSlot {
    pub fn as_str(&self) -> &str {
        match self {
            CpuSlot::Idle => IDLE_MARKER,
            CpuSlot::Process(pid) => pid.as_str(),
        }
    }

    pub fn pid(&self) -> Option<&Pid> {
        match self {
            CpuSlot::Idle => None,
            CpuSlot::Process(pid) => Some(pid),
        }
    }
}

impl Serialize for CpuSlot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CpuSlot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s == IDLE_MARKER {
            Ok(CpuSlot::Idle)
        } else {
            Ok(CpuSlot::Process(s.into()))
        }
    }
}

/// Half-open interval `[start, end)` of CPU occupancy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub pid: CpuSlot,
    pub start: Ticks,
    pub end: Ticks,
}

impl TimelineEntry {
    pub fn idle(start: Ticks, end: Ticks) -> Self {
        Self {
            pid: CpuSlot::Idle,
            start,
            end,
        }
    }

    pub fn running(pid: Pid, start: Ticks, end: Ticks) -> Self {
        Self {
            pid: CpuSlot::Process(pid),
            start,
            end,
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.pid == CpuSlot::Idle
    }

    #[inline]
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }
}

/// Output of one scheduling run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub algorithm: SchedulingAlgorithm,
    pub timeline: Vec<TimelineEntry>,
    /// Processes in input order with start/completion filled in
    pub processes: Vec<Process>,
    /// Human-readable step log
    pub log: Vec<String>,
}

impl Schedule {
    /// End instant of the last timeline entry
    pub fn elapsed(&self) -> Ticks {
        self.timeline.last().map(|e| e.end).unwrap_or(0)
    }

    /// Pids in completion order
    pub fn completion_order(&self) -> Vec<Pid> {
        let mut done: Vec<&Process> = self.processes.iter().collect();
        done.sort_by_key(|p| p.completion_time);
        done.into_iter().map(|p| p.pid.clone()).collect()
    }
}
