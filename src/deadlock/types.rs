/*!
 * Deadlock Types
 * Resource-allocation graph input and detection report
 */

use crate::core::types::{Pid, ResourceId};
use serde::{Deserialize, Serialize};

fn default_instances() -> i64 {
    1
}

/// Resource declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    /// Instance count, at least one
    #[serde(default = "default_instances")]
    pub instances: i64,
}

impl Resource {
    pub fn new(id: impl Into<ResourceId>, instances: i64) -> Self {
        Self {
            id: id.into(),
            instances,
        }
    }
}

/// Request edge: `process` is waiting for an instance of `resource`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestEdge {
    pub process: Pid,
    pub resource: ResourceId,
}

impl RequestEdge {
    pub fn new(process: impl Into<Pid>, resource: impl Into<ResourceId>) -> Self {
        Self {
            process: process.into(),
            resource: resource.into(),
        }
    }
}

/// Assignment edge: one instance of `resource` is held by `process`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentEdge {
    pub resource: ResourceId,
    pub process: Pid,
}

impl AssignmentEdge {
    pub fn new(resource: impl Into<ResourceId>, process: impl Into<Pid>) -> Self {
        Self {
            resource: resource.into(),
            process: process.into(),
        }
    }
}

/// Graph description supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeadlockInput {
    pub processes: Vec<Pid>,
    pub resources: Vec<Resource>,
    pub requests: Vec<RequestEdge>,
    pub assignments: Vec<AssignmentEdge>,
}

impl DeadlockInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_process(mut self, pid: impl Into<Pid>) -> Self {
        self.processes.push(pid.into());
        self
    }

    pub fn with_resource(mut self, id: impl Into<ResourceId>, instances: i64) -> Self {
        self.resources.push(Resource::new(id, instances));
        self
    }

    pub fn with_request(mut self, process: impl Into<Pid>, resource: impl Into<ResourceId>) -> Self {
        self.requests.push(RequestEdge::new(process, resource));
        self
    }

    pub fn with_assignment(
        mut self,
        resource: impl Into<ResourceId>,
        process: impl Into<Pid>,
    ) -> Self {
        self.assignments.push(AssignmentEdge::new(resource, process));
        self
    }
}

/// Node of the serialized graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GraphNode {
    Process { id: Pid },
    Resource { id: ResourceId, instances: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Process → resource
    Request,
    /// Resource → process
    Assignment,
    /// Process → process, derived
    WaitFor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: Pid,
    pub to: Pid,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
}

/// Nodes and edges for presentation layers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphData {
    pub fn edges_of(&self, kind: EdgeKind) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().filter(move |e| e.kind == kind)
    }
}

/// Outcome of deadlock detection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlockReport {
    pub deadlocked: bool,
    /// Closed path starting at the revisited process; present only when deadlocked
    pub cycle: Option<Vec<Pid>>,
    pub graph: GraphData,
}
