/*!
 * Round Robin
 * Preemptive dispatch over an explicit FIFO ready queue
 */

use super::dispatch::Recorder;
use super::types::TimeQuantum;
use crate::core::types::Ticks;
use crate::process::Process;
use std::collections::VecDeque;

/// Admits processes to the ready queue in (arrival, input order)
struct ArrivalCursor {
    order: Vec<usize>,
    next: usize,
}

impl ArrivalCursor {
    fn new(processes: &[Process]) -> Self {
        let mut order: Vec<usize> = (0..processes.len()).collect();
        // Stable sort keeps input order for equal arrivals
        order.sort_by_key(|&i| processes[i].arrival_time);
        Self { order, next: 0 }
    }

    /// Enqueue every process that has arrived by `now` and was not admitted yet
    fn admit(&mut self, processes: &[Process], now: Ticks, queue: &mut VecDeque<usize>) {
        while let Some(&index) = self.order.get(self.next) {
            if !processes[index].has_arrived(now) {
                break;
            }
            queue.push_back(index);
            self.next += 1;
        }
    }

    fn peek_arrival(&self, processes: &[Process]) -> Option<Ticks> {
        self.order
            .get(self.next)
            .map(|&index| processes[index].arrival_time)
    }
}

pub(super) fn run(quantum: TimeQuantum, processes: &mut [Process]) -> Recorder {
    let mut recorder = Recorder::default();
    let mut queue: VecDeque<usize> = VecDeque::with_capacity(processes.len());
    let mut arrivals = ArrivalCursor::new(processes);
    let mut now: Ticks = 0;
    let mut completed = 0;

    arrivals.admit(processes, now, &mut queue);

    while completed < processes.len() {
        let Some(index) = queue.pop_front() else {
            let Some(arrival) = arrivals.peek_arrival(processes) else {
                break;
            };
            recorder.idle(now, arrival);
            now = arrival;
            arrivals.admit(processes, now, &mut queue);
            continue;
        };

        let process = &mut processes[index];
        process.dispatch(now);
        let before = process.remaining_time;
        let ran = process.run_for(quantum.ticks());
        recorder.note(format!(
            "t={}: {} runs for {} (remaining={}→{})",
            now, process.pid, ran, before, process.remaining_time
        ));

        let start = now;
        now += ran;
        recorder.slice(&process.pid, start, now);
        let finished = process.remaining_time == 0;

        // Arrivals during the slice queue ahead of the preempted process
        arrivals.admit(processes, now, &mut queue);

        let process = &mut processes[index];
        if finished {
            process.complete(now);
            recorder.note(format!("t={}: {} completed", now, process.pid));
            completed += 1;
        } else {
            process.preempt();
            queue.push_back(index);
        }
    }

    recorder
}
