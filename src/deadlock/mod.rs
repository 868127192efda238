/*!
 * Deadlock Detection
 * Resource-allocation graph construction, wait-for derivation and cycle search
 */

mod cycle;
pub mod graph;
pub mod types;

pub use graph::{ResourceAllocationGraph, WaitForGraph};
pub use types::{
    AssignmentEdge, DeadlockInput, DeadlockReport, EdgeKind, GraphData, GraphEdge, GraphNode,
    RequestEdge, Resource,
};

use crate::core::types::SimResult;
use tracing::debug;

/// Stateless deadlock detector
pub struct DeadlockDetector;

impl DeadlockDetector {
    /// Validate `input`, derive the wait-for graph, and report the first cycle
    pub fn detect(input: &DeadlockInput) -> SimResult<DeadlockReport> {
        let rag = ResourceAllocationGraph::new(input)?;
        let wait_for = rag.wait_for_graph();
        let cycle = wait_for.find_cycle();

        debug!(
            processes = rag.processes().len(),
            wait_for_edges = wait_for.edge_count(),
            deadlocked = cycle.is_some(),
            "deadlock detection finished"
        );

        Ok(DeadlockReport {
            deadlocked: cycle.is_some(),
            graph: rag.graph_data(&wait_for),
            cycle,
        })
    }
}
