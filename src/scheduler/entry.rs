/*!
 * Selection Keys
 * Ordering used by the non-preemptive policies to pick the next process
 */

use super::types::SchedulingAlgorithm;
use crate::core::types::Ticks;
use crate::process::Process;

/// Total order over ready processes; the minimum is dispatched next
///
/// `index` is the input position, so equal keys fall back to input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(super) struct SelectionKey {
    primary: i128,
    arrival: Ticks,
    index: usize,
}

impl SelectionKey {
    pub fn new(algorithm: SchedulingAlgorithm, process: &Process, index: usize) -> Self {
        let primary = match algorithm {
            SchedulingAlgorithm::Fcfs => process.arrival_time as i128,
            SchedulingAlgorithm::Sjf => process.remaining_time as i128,
            SchedulingAlgorithm::Priority => process.priority as i128,
            // Round Robin never selects by key; FIFO order mirrors arrival
            SchedulingAlgorithm::RoundRobin => process.arrival_time as i128,
        };

        Self {
            primary,
            arrival: process.arrival_time,
            index,
        }
    }
}
