/*!
 * Cycle Search
 * Explicit-stack depth-first search over the wait-for graph
 */

use super::graph::WaitForGraph;
use crate::core::types::Pid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

impl WaitForGraph {
    /// First cycle found, starting at the node the back-edge returns to
    ///
    /// Roots are tried in input order and neighbors in derivation order.
    /// Each node is expanded at most once, so the search is linear in the
    /// size of the graph.
    pub fn find_cycle(&self) -> Option<Vec<Pid>> {
        let mut marks = vec![Mark::Unvisited; self.nodes.len()];
        // (node, index of the next neighbor to explore)
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for root in 0..self.nodes.len() {
            if marks[root] != Mark::Unvisited {
                continue;
            }
            marks[root] = Mark::OnPath;
            stack.push((root, 0));

            while let Some(top) = stack.len().checked_sub(1) {
                let (node, cursor) = stack[top];
                let Some(&next) = self.adjacency[node].get(cursor) else {
                    marks[node] = Mark::Done;
                    stack.pop();
                    continue;
                };
                stack[top].1 += 1;

                match marks[next] {
                    Mark::OnPath => return Some(self.extract_cycle(&stack, next)),
                    Mark::Unvisited => {
                        marks[next] = Mark::OnPath;
                        stack.push((next, 0));
                    }
                    Mark::Done => {}
                }
            }
        }

        None
    }

    fn extract_cycle(&self, stack: &[(usize, usize)], target: usize) -> Vec<Pid> {
        let start = stack
            .iter()
            .position(|&(node, _)| node == target)
            .unwrap_or(0);
        stack[start..]
            .iter()
            .map(|&(node, _)| self.nodes[node].clone())
            .collect()
    }
}
