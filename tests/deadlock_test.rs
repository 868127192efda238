/*!
 * Deadlock Tests
 * Graph validation, wait-for derivation and cycle reporting
 */

use os_sim_engine::deadlock::{
    DeadlockDetector, DeadlockInput, EdgeKind, GraphNode, ResourceAllocationGraph,
};
use os_sim_engine::SimError;
use pretty_assertions::assert_eq;

fn three_way(with_p1_request: bool) -> DeadlockInput {
    let mut input = DeadlockInput::new()
        .with_process("P1")
        .with_process("P2")
        .with_process("P3")
        .with_resource("R1", 1)
        .with_resource("R2", 1)
        .with_resource("R3", 1)
        .with_assignment("R1", "P1")
        .with_assignment("R2", "P2")
        .with_assignment("R3", "P3");
    if with_p1_request {
        input = input.with_request("P1", "R2");
    }
    input.with_request("P2", "R3").with_request("P3", "R1")
}

fn pids(cycle: &[os_sim_engine::InlineString]) -> Vec<&str> {
    cycle.iter().map(|p| p.as_str()).collect()
}

#[test]
fn test_circular_wait_is_deadlocked() {
    let report = DeadlockDetector::detect(&three_way(true)).unwrap();

    assert!(report.deadlocked);
    let cycle = report.cycle.unwrap();
    assert_eq!(pids(&cycle), vec!["P1", "P2", "P3"]);
}

#[test]
fn test_broken_chain_is_safe() {
    let report = DeadlockDetector::detect(&three_way(false)).unwrap();

    assert!(!report.deadlocked);
    assert!(report.cycle.is_none());
    assert_eq!(report.graph.edges_of(EdgeKind::WaitFor).count(), 2);
}

#[test]
fn test_cycle_starts_at_revisited_process() {
    // P1 waits on P2, which is in a cycle with P3; P1 is not part of it
    let input = DeadlockInput::new()
        .with_process("P1")
        .with_process("P2")
        .with_process("P3")
        .with_resource("R2", 1)
        .with_resource("R3", 1)
        .with_assignment("R2", "P2")
        .with_assignment("R3", "P3")
        .with_request("P1", "R2")
        .with_request("P2", "R3")
        .with_request("P3", "R2");

    let report = DeadlockDetector::detect(&input).unwrap();
    assert_eq!(pids(&report.cycle.unwrap()), vec!["P2", "P3"]);
}

#[test]
fn test_free_instance_means_no_wait() {
    let input = DeadlockInput::new()
        .with_process("P1")
        .with_process("P2")
        .with_resource("R1", 2)
        .with_resource("R2", 1)
        .with_assignment("R1", "P1")
        .with_assignment("R2", "P2")
        .with_request("P2", "R1")
        .with_request("P1", "R2");

    let report = DeadlockDetector::detect(&input).unwrap();
    assert!(!report.deadlocked);

    let wait_for: Vec<(&str, &str)> = report
        .graph
        .edges_of(EdgeKind::WaitFor)
        .map(|e| (e.from.as_str(), e.to.as_str()))
        .collect();
    assert_eq!(wait_for, vec![("P1", "P2")]);
}

#[test]
fn test_multi_instance_fully_held_waits_on_every_holder() {
    let input = DeadlockInput::new()
        .with_process("P1")
        .with_process("P2")
        .with_process("P3")
        .with_resource("R1", 2)
        .with_assignment("R1", "P1")
        .with_assignment("R1", "P2")
        .with_request("P3", "R1");

    let rag = ResourceAllocationGraph::new(&input).unwrap();
    let wait_for = rag.wait_for_graph();

    let targets: Vec<&str> = wait_for.waits_on("P3").iter().map(|p| p.as_str()).collect();
    assert_eq!(targets, vec!["P1", "P2"]);
    assert_eq!(wait_for.edge_count(), 2);
}

#[test]
fn test_holder_requesting_more_of_same_resource_does_not_wait_on_itself() {
    let input = DeadlockInput::new()
        .with_process("P1")
        .with_resource("R1", 1)
        .with_assignment("R1", "P1")
        .with_request("P1", "R1");

    let report = DeadlockDetector::detect(&input).unwrap();
    assert!(!report.deadlocked);
    assert_eq!(report.graph.edges_of(EdgeKind::WaitFor).count(), 0);
}

#[test]
fn test_empty_and_edgeless_graphs() {
    let report = DeadlockDetector::detect(&DeadlockInput::new()).unwrap();
    assert!(!report.deadlocked);
    assert!(report.graph.nodes.is_empty());

    let input = DeadlockInput::new().with_process("P1").with_resource("R1", 3);
    let report = DeadlockDetector::detect(&input).unwrap();
    assert!(!report.deadlocked);
    assert_eq!(
        report.graph.nodes,
        vec![
            GraphNode::Process { id: "P1".into() },
            GraphNode::Resource {
                id: "R1".into(),
                instances: 3
            },
        ]
    );
}

#[test]
fn test_graph_lists_declared_and_derived_edges() {
    let report = DeadlockDetector::detect(&three_way(true)).unwrap();

    assert_eq!(report.graph.nodes.len(), 6);
    assert_eq!(report.graph.edges_of(EdgeKind::Request).count(), 3);
    assert_eq!(report.graph.edges_of(EdgeKind::Assignment).count(), 3);
    assert_eq!(report.graph.edges_of(EdgeKind::WaitFor).count(), 3);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["deadlocked"], true);
    assert_eq!(json["graph"]["nodes"][0]["type"], "process");
    assert_eq!(json["graph"]["nodes"][3]["type"], "resource");
    assert_eq!(json["graph"]["edges"][0]["type"], "request");
}

#[test]
fn test_edges_keep_input_order() {
    let input = DeadlockInput::new()
        .with_process("P1")
        .with_process("P2")
        .with_resource("R1", 1)
        .with_resource("R2", 1)
        .with_assignment("R2", "P2")
        .with_assignment("R1", "P1")
        .with_request("P2", "R1")
        .with_request("P1", "R2");

    let report = DeadlockDetector::detect(&input).unwrap();
    let edges = |kind| -> Vec<String> {
        report
            .graph
            .edges_of(kind)
            .map(|e| format!("{}->{}", e.from, e.to))
            .collect()
    };

    assert_eq!(edges(EdgeKind::Assignment), vec!["R2->P2", "R1->P1"]);
    assert_eq!(edges(EdgeKind::Request), vec!["P2->R1", "P1->R2"]);
}

#[test]
fn test_invalid_graphs_rejected() {
    let undeclared = DeadlockInput::new()
        .with_process("P1")
        .with_resource("R1", 1)
        .with_request("P9", "R1");
    assert!(matches!(
        DeadlockDetector::detect(&undeclared),
        Err(SimError::InvalidInput(_))
    ));

    let over_assigned = DeadlockInput::new()
        .with_process("P1")
        .with_process("P2")
        .with_resource("R1", 1)
        .with_assignment("R1", "P1")
        .with_assignment("R1", "P2");
    assert!(matches!(
        DeadlockDetector::detect(&over_assigned),
        Err(SimError::InvalidInput(_))
    ));

    let zero_instances = DeadlockInput::new().with_process("P1").with_resource("R1", 0);
    assert!(DeadlockDetector::detect(&zero_instances).is_err());

    let duplicate = DeadlockInput::new().with_process("P1").with_process("P1");
    assert!(DeadlockDetector::detect(&duplicate).is_err());
}

#[test]
fn test_input_deserializes_with_default_instances() {
    let input: DeadlockInput = serde_json::from_str(
        r#"{
            "processes": ["P1", "P2"],
            "resources": [{"id": "R1"}, {"id": "R2"}],
            "requests": [{"process": "P1", "resource": "R2"}, {"process": "P2", "resource": "R1"}],
            "assignments": [{"resource": "R1", "process": "P1"}, {"resource": "R2", "process": "P2"}]
        }"#,
    )
    .unwrap();

    let report = DeadlockDetector::detect(&input).unwrap();
    assert!(report.deadlocked);
    assert_eq!(pids(&report.cycle.unwrap()), vec!["P1", "P2"]);
}
