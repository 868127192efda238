/*!
 * Property Tests
 * Invariants that hold for arbitrary process sets, reference strings and graphs
 */

use os_sim_engine::deadlock::{DeadlockDetector, DeadlockInput, EdgeKind};
use os_sim_engine::memory::{FrameCount, MemoryManager, ReplacementPolicy};
use os_sim_engine::metrics::MetricsCalculator;
use os_sim_engine::scheduler::{Scheduler, SchedulingAlgorithm, TimeQuantum};
use os_sim_engine::Process;
use proptest::prelude::*;

fn process_set() -> impl Strategy<Value = Vec<Process>> {
    prop::collection::vec((0u64..20, 1u64..10, -3i64..5), 1..8).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (arrival, burst, priority))| {
                Process::new(format!("P{}", i), arrival, burst).with_priority(priority)
            })
            .collect()
    })
}

fn scheduler(algorithm: SchedulingAlgorithm, quantum: i64) -> Scheduler {
    match algorithm {
        SchedulingAlgorithm::RoundRobin => Scheduler::round_robin(TimeQuantum::new(quantum).unwrap()),
        other => Scheduler::new(other),
    }
}

proptest! {
    #[test]
    fn prop_timeline_is_contiguous(processes in process_set(), quantum in 1i64..6) {
        let total_burst: u64 = processes.iter().map(|p| p.burst_time).sum();

        for algorithm in SchedulingAlgorithm::ALL {
            let schedule = scheduler(algorithm, quantum).run(processes.clone()).unwrap();

            prop_assert_eq!(schedule.timeline[0].start, 0);
            for pair in schedule.timeline.windows(2) {
                prop_assert_eq!(pair[0].end, pair[1].start);
                prop_assert!(!(pair[0].is_idle() && pair[1].is_idle()));
            }
            prop_assert!(schedule.timeline.iter().all(|e| e.end > e.start));

            let busy: u64 = schedule
                .timeline
                .iter()
                .filter(|e| !e.is_idle())
                .map(|e| e.duration())
                .sum();
            prop_assert_eq!(busy, total_burst);
            prop_assert!(schedule.processes.iter().all(|p| p.is_completed()));
        }
    }

    #[test]
    fn prop_metric_identities(processes in process_set(), quantum in 1i64..6) {
        for algorithm in SchedulingAlgorithm::ALL {
            let schedule = scheduler(algorithm, quantum).run(processes.clone()).unwrap();
            let report = MetricsCalculator::for_schedule(&schedule).unwrap();

            for m in &report.per_process {
                prop_assert_eq!(m.turnaround_time, m.completion_time - m.arrival_time);
                prop_assert_eq!(m.waiting_time, m.turnaround_time - m.burst_time);
                prop_assert!(m.response_time <= m.waiting_time);
                prop_assert!(m.start_time >= m.arrival_time);
            }
            prop_assert!(report.aggregates.cpu_utilization > 0.0);
            prop_assert!(report.aggregates.cpu_utilization <= 100.0);
        }
    }

    #[test]
    fn prop_non_preemptive_runs_each_process_once(processes in process_set()) {
        for algorithm in [SchedulingAlgorithm::Fcfs, SchedulingAlgorithm::Sjf, SchedulingAlgorithm::Priority] {
            let schedule = Scheduler::new(algorithm).run(processes.clone()).unwrap();
            let running = schedule.timeline.iter().filter(|e| !e.is_idle()).count();
            prop_assert_eq!(running, processes.len());

            for p in &schedule.processes {
                prop_assert_eq!(p.completion_time, p.start_time.map(|s| s + p.burst_time));
            }
        }
    }

    #[test]
    fn prop_large_quantum_round_robin_matches_fcfs(processes in process_set()) {
        let max_burst = processes.iter().map(|p| p.burst_time).max().unwrap_or(1);
        let fcfs = Scheduler::new(SchedulingAlgorithm::Fcfs).run(processes.clone()).unwrap();
        let rr = Scheduler::round_robin(TimeQuantum::new(max_burst as i64).unwrap())
            .run(processes)
            .unwrap();

        prop_assert_eq!(fcfs.timeline, rr.timeline);
    }

    #[test]
    fn prop_rerun_is_identical(processes in process_set(), quantum in 1i64..6) {
        for algorithm in SchedulingAlgorithm::ALL {
            let runner = scheduler(algorithm, quantum);
            let first = runner.run(processes.clone()).unwrap();
            let second = runner.run(first.processes.clone()).unwrap();
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn prop_optimal_never_worse(
        references in prop::collection::vec(0i64..8, 1..40),
        frames in 1i64..6,
    ) {
        let faults = |policy| {
            MemoryManager::new(policy, FrameCount::new(frames).unwrap())
                .simulate(&references)
                .unwrap()
                .total_faults
        };

        let optimal = faults(ReplacementPolicy::Optimal);
        prop_assert!(optimal <= faults(ReplacementPolicy::Fifo));
        prop_assert!(optimal <= faults(ReplacementPolicy::Lru));
    }

    #[test]
    fn prop_frame_set_invariants(
        references in prop::collection::vec(-4i64..8, 1..40),
        frames in 1i64..6,
    ) {
        for policy in ReplacementPolicy::ALL {
            let report = MemoryManager::new(policy, FrameCount::new(frames).unwrap())
                .simulate(&references)
                .unwrap();

            prop_assert_eq!(report.total_hits + report.total_faults, references.len());
            prop_assert!(report.hit_rate >= 0.0 && report.hit_rate <= 1.0);

            for step in &report.history {
                prop_assert!(step.frames.len() <= frames as usize);
                prop_assert!(step.frames.contains(&step.page));
                let mut unique = step.frames.clone();
                unique.sort_unstable();
                unique.dedup();
                prop_assert_eq!(unique.len(), step.frames.len());
                if !step.fault {
                    prop_assert!(step.evicted.is_none());
                }
            }
        }
    }

    #[test]
    fn prop_reported_cycle_is_closed_wait_for_path(
        holders in prop::collection::vec(0usize..5, 5),
        requests in prop::collection::vec((0usize..5, 0usize..5), 0..10),
    ) {
        // Resource Ri has one instance held by process P{holders[i]}
        let mut input = DeadlockInput::new();
        for p in 0..5 {
            input = input.with_process(format!("P{}", p));
        }
        for (r, holder) in holders.iter().enumerate() {
            input = input
                .with_resource(format!("R{}", r), 1)
                .with_assignment(format!("R{}", r), format!("P{}", holder));
        }
        for (p, r) in &requests {
            input = input.with_request(format!("P{}", p), format!("R{}", r));
        }

        let report = DeadlockDetector::detect(&input).unwrap();
        prop_assert_eq!(report.deadlocked, report.cycle.is_some());

        if let Some(cycle) = report.cycle {
            prop_assert!(cycle.len() >= 2);
            let waits: Vec<(String, String)> = report
                .graph
                .edges_of(EdgeKind::WaitFor)
                .map(|e| (e.from.to_string(), e.to.to_string()))
                .collect();
            for (i, from) in cycle.iter().enumerate() {
                let to = &cycle[(i + 1) % cycle.len()];
                prop_assert!(waits.contains(&(from.to_string(), to.to_string())));
            }
        }
    }
}
