/*!
 * Resource-Allocation Graph
 * Validated RAG and its derived wait-for graph
 */

use super::types::{DeadlockInput, EdgeKind, GraphData, GraphEdge, GraphNode};
use crate::core::errors::SimError;
use crate::core::types::{Pid, ResourceId, SimResult};
use ahash::RandomState;
use std::collections::HashMap;

type IndexMap = HashMap<ResourceId, usize, RandomState>;

#[derive(Debug)]
struct ResourceNode {
    id: ResourceId,
    instances: u64,
    /// Holding process per assignment edge, in input order
    holders: Vec<usize>,
}

impl ResourceNode {
    #[inline]
    fn is_fully_allocated(&self) -> bool {
        self.holders.len() as u64 >= self.instances
    }
}

/// Resource-allocation graph over index-addressed nodes
///
/// Construction validates every edge, so derivation and search never see a
/// dangling reference.
#[derive(Debug)]
pub struct ResourceAllocationGraph {
    processes: Vec<Pid>,
    resources: Vec<ResourceNode>,
    /// (process, resource) per request edge, in input order
    requests: Vec<(usize, usize)>,
    /// (resource, process) per assignment edge, in input order
    assignments: Vec<(usize, usize)>,
}

impl ResourceAllocationGraph {
    pub fn new(input: &DeadlockInput) -> SimResult<Self> {
        let process_index = index_ids(input.processes.iter(), "process")?;

        let mut resource_index: IndexMap =
            HashMap::with_capacity_and_hasher(input.resources.len(), RandomState::new());
        let mut resources = Vec::with_capacity(input.resources.len());
        for resource in &input.resources {
            if resource.id.is_empty() {
                return Err(SimError::invalid_input("resource id cannot be empty"));
            }
            if resource.instances < 1 {
                return Err(SimError::invalid_input(format!(
                    "resource '{}' must have at least one instance (got {})",
                    resource.id, resource.instances
                )));
            }
            if resource_index
                .insert(resource.id.clone(), resources.len())
                .is_some()
            {
                return Err(SimError::invalid_input(format!(
                    "duplicate resource '{}'",
                    resource.id
                )));
            }
            resources.push(ResourceNode {
                id: resource.id.clone(),
                instances: resource.instances as u64,
                holders: Vec::new(),
            });
        }

        let lookup = |map: &IndexMap, id: &str, what: &str| -> SimResult<usize> {
            map.get(id).copied().ok_or_else(|| {
                SimError::invalid_input(format!("edge references undeclared {} '{}'", what, id))
            })
        };

        let mut requests = Vec::with_capacity(input.requests.len());
        for edge in &input.requests {
            let p = lookup(&process_index, &edge.process, "process")?;
            let r = lookup(&resource_index, &edge.resource, "resource")?;
            requests.push((p, r));
        }

        let mut assignments = Vec::with_capacity(input.assignments.len());
        for edge in &input.assignments {
            let r = lookup(&resource_index, &edge.resource, "resource")?;
            let p = lookup(&process_index, &edge.process, "process")?;
            resources[r].holders.push(p);
            assignments.push((r, p));
        }

        if let Some(over) = resources
            .iter()
            .find(|r| r.holders.len() as u64 > r.instances)
        {
            return Err(SimError::invalid_input(format!(
                "resource '{}' has {} assignment edges but only {} instances",
                over.id,
                over.holders.len(),
                over.instances
            )));
        }

        Ok(Self {
            processes: input.processes.clone(),
            resources,
            requests,
            assignments,
        })
    }

    pub fn processes(&self) -> &[Pid] {
        &self.processes
    }

    /// Derive the process-only wait-for graph
    ///
    /// A request on a resource with a free instance is satisfiable and adds
    /// no edge; otherwise the requester waits on every other holder.
    pub fn wait_for_graph(&self) -> WaitForGraph {
        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); self.processes.len()];

        for &(waiter, r) in &self.requests {
            let resource = &self.resources[r];
            if !resource.is_fully_allocated() {
                continue;
            }
            for &holder in &resource.holders {
                if holder != waiter && !adjacency[waiter].contains(&holder) {
                    adjacency[waiter].push(holder);
                }
            }
        }

        WaitForGraph {
            nodes: self.processes.clone(),
            adjacency,
        }
    }

    /// Serialize nodes, declared edges and the derived wait-for edges
    pub fn graph_data(&self, wait_for: &WaitForGraph) -> GraphData {
        let nodes = self
            .processes
            .iter()
            .map(|pid| GraphNode::Process { id: pid.clone() })
            .chain(self.resources.iter().map(|r| GraphNode::Resource {
                id: r.id.clone(),
                instances: r.instances,
            }))
            .collect();

        let requests = self.requests.iter().map(|&(p, r)| GraphEdge {
            from: self.processes[p].clone(),
            to: self.resources[r].id.clone(),
            kind: EdgeKind::Request,
        });
        let assignments = self.assignments.iter().map(|&(r, p)| GraphEdge {
            from: self.resources[r].id.clone(),
            to: self.processes[p].clone(),
            kind: EdgeKind::Assignment,
        });

        GraphData {
            nodes,
            edges: requests
                .chain(assignments)
                .chain(wait_for.edges())
                .collect(),
        }
    }
}

/// Directed graph over processes; `adjacency[a]` lists processes `a` waits on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitForGraph {
    pub(super) nodes: Vec<Pid>,
    pub(super) adjacency: Vec<Vec<usize>>,
}

impl WaitForGraph {
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Pids that `pid` waits on, in derivation order
    pub fn waits_on(&self, pid: &str) -> Vec<&Pid> {
        self.nodes
            .iter()
            .position(|p| p == pid)
            .map(|i| self.adjacency[i].iter().map(|&j| &self.nodes[j]).collect())
            .unwrap_or_default()
    }

    pub fn edges(&self) -> impl Iterator<Item = GraphEdge> + '_ {
        self.adjacency.iter().enumerate().flat_map(move |(from, targets)| {
            targets.iter().map(move |&to| GraphEdge {
                from: self.nodes[from].clone(),
                to: self.nodes[to].clone(),
                kind: EdgeKind::WaitFor,
            })
        })
    }
}

fn index_ids<'a, I>(ids: I, what: &str) -> SimResult<IndexMap>
where
    I: ExactSizeIterator<Item = &'a Pid>,
{
    let mut index: IndexMap = HashMap::with_capacity_and_hasher(ids.len(), RandomState::new());
    for (i, id) in ids.enumerate() {
        if id.is_empty() {
            return Err(SimError::invalid_input(format!("{} id cannot be empty", what)));
        }
        if index.insert(id.clone(), i).is_some() {
            return Err(SimError::invalid_input(format!("duplicate {} '{}'", what, id)));
        }
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_instance_adds_no_wait_edge() {
        let input = DeadlockInput::new()
            .with_process("P1")
            .with_process("P2")
            .with_resource("R1", 2)
            .with_assignment("R1", "P1")
            .with_request("P2", "R1");
        let rag = ResourceAllocationGraph::new(&input).unwrap();
        assert_eq!(rag.wait_for_graph().edge_count(), 0);
    }

    #[test]
    fn test_waits_on_every_holder() {
        let input = DeadlockInput::new()
            .with_process("P1")
            .with_process("P2")
            .with_process("P3")
            .with_resource("R1", 2)
            .with_assignment("R1", "P1")
            .with_assignment("R1", "P2")
            .with_request("P3", "R1");
        let wfg = ResourceAllocationGraph::new(&input).unwrap().wait_for_graph();
        assert_eq!(wfg.waits_on("P3"), vec!["P1", "P2"]);
    }

    #[test]
    fn test_holder_does_not_wait_on_itself() {
        let input = DeadlockInput::new()
            .with_process("P1")
            .with_resource("R1", 1)
            .with_assignment("R1", "P1")
            .with_request("P1", "R1");
        let wfg = ResourceAllocationGraph::new(&input).unwrap().wait_for_graph();
        assert_eq!(wfg.edge_count(), 0);
    }

    #[test]
    fn test_validation_failures() {
        let dangling = DeadlockInput::new()
            .with_process("P1")
            .with_resource("R1", 1)
            .with_request("P9", "R1");
        assert!(ResourceAllocationGraph::new(&dangling).is_err());

        let over_allocated = DeadlockInput::new()
            .with_process("P1")
            .with_process("P2")
            .with_resource("R1", 1)
            .with_assignment("R1", "P1")
            .with_assignment("R1", "P2");
        let err = ResourceAllocationGraph::new(&over_allocated).unwrap_err();
        assert!(err.to_string().contains("only 1 instances"));

        let zero_instances = DeadlockInput::new().with_process("P1").with_resource("R1", 0);
        assert!(ResourceAllocationGraph::new(&zero_instances).is_err());

        let duplicate = DeadlockInput::new().with_process("P1").with_process("P1");
        assert!(ResourceAllocationGraph::new(&duplicate).is_err());
    }
}
