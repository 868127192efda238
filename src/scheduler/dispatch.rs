/*!
 * Dispatch Loop
 * Shared run-to-completion loop for FCFS, SJF and Priority
 */

use super::entry::SelectionKey;
use super::types::{SchedulingAlgorithm, TimelineEntry};
use crate::core::types::{Pid, Ticks};
use crate::process::Process;
use tracing::trace;

/// Timeline and step log accumulated during one run
#[derive(Debug, Default)]
pub(super) struct Recorder {
    pub timeline: Vec<TimelineEntry>,
    pub log: Vec<String>,
}

impl Recorder {
    pub fn idle(&mut self, from: Ticks, until: Ticks) {
        self.log.push(format!("t={}: CPU idle until t={}", from, until));
        self.timeline.push(TimelineEntry::idle(from, until));
    }

    pub fn slice(&mut self, pid: &Pid, start: Ticks, end: Ticks) {
        trace!(pid = %pid, start, end, "dispatch slice");
        self.timeline.push(TimelineEntry::running(pid.clone(), start, end));
    }

    pub fn note(&mut self, line: String) {
        self.log.push(line);
    }
}

/// Earliest arrival among processes that have not completed
pub(super) fn next_arrival(processes: &[Process]) -> Option<Ticks> {
    processes
        .iter()
        .filter(|p| !p.is_completed())
        .map(|p| p.arrival_time)
        .min()
}

/// Run every process to completion, choosing among ready ones by `algorithm`'s key
pub(super) fn run_to_completion(
    algorithm: SchedulingAlgorithm,
    processes: &mut [Process],
) -> Recorder {
    let mut recorder = Recorder::default();
    let mut now: Ticks = 0;
    let mut completed = 0;

    while completed < processes.len() {
        let selected = processes
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_completed() && p.has_arrived(now))
            .min_by_key(|(index, p)| SelectionKey::new(algorithm, p, *index))
            .map(|(index, _)| index);

        let Some(index) = selected else {
            let Some(arrival) = next_arrival(processes) else {
                break;
            };
            recorder.idle(now, arrival);
            now = arrival;
            continue;
        };

        let process = &mut processes[index];
        process.dispatch(now);
        recorder.note(match algorithm {
            SchedulingAlgorithm::Priority => format!(
                "t={}: {} starts (priority={}, burst={})",
                now, process.pid, process.priority, process.burst_time
            ),
            _ => format!(
                "t={}: {} starts (burst={})",
                now, process.pid, process.burst_time
            ),
        });

        let ran = process.run_for(process.remaining_time);
        let end = now + ran;
        recorder.slice(&process.pid, now, end);
        now = end;

        process.complete(now);
        recorder.note(format!("t={}: {} completed", now, process.pid));
        completed += 1;
    }

    recorder
}
