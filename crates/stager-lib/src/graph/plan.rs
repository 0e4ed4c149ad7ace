//! Execution plan resolution
//!
//! Resolution happens in two passes. A depth-first walk over `depends_on`
//! collects the transitive closure of the requested targets and reports
//! dependency cycles with the offending path. The closure is then ordered
//! with Kahn's algorithm over prerequisite edges plus the soft `before` /
//! `after` edges between closure members; the earliest registered ready
//! target always goes next. Soft edges naming an undeclared target are
//! rejected like unknown prerequisites.

use super::registry::TargetRegistry;
use crate::primitives::{BuildError, BuildResult};
use petgraph::Direction;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};
use std::fmt;
use tracing::debug;

/// Deterministic, cycle-free order of targets for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    targets: Vec<String>,
}

impl ExecutionPlan {
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.targets.iter().any(|t| t == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.targets.iter().position(|t| t == name)
    }
}

impl fmt::Display for ExecutionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.targets.join(" -> "))
    }
}

impl<C> TargetRegistry<C> {
    /// Plan for a single requested target
    pub fn resolve(&self, name: &str) -> BuildResult<ExecutionPlan> {
        self.resolve_all(&[name])
    }

    /// Plan covering every requested target and their prerequisites
    pub fn resolve_all<S: AsRef<str>>(&self, names: &[S]) -> BuildResult<ExecutionPlan> {
        let mut visited = HashSet::new();
        let mut stack = Vec::new();
        let mut closure = Vec::new();

        for name in names {
            let idx = self.lookup(name.as_ref(), None)?;
            self.visit(idx, &mut visited, &mut stack, &mut closure)?;
        }

        closure.sort_unstable();
        let order = self.order(&closure)?;

        let plan = ExecutionPlan {
            targets: order
                .into_iter()
                .map(|idx| self.at(idx).name().to_string())
                .collect(),
        };
        debug!(plan = %plan, "Resolved execution plan");
        Ok(plan)
    }

    fn visit(
        &self,
        idx: usize,
        visited: &mut HashSet<usize>,
        stack: &mut Vec<usize>,
        closure: &mut Vec<usize>,
    ) -> BuildResult<()> {
        if let Some(start) = stack.iter().position(|&on_stack| on_stack == idx) {
            let mut cycle: Vec<&str> = stack[start..]
                .iter()
                .map(|&i| self.at(i).name())
                .collect();
            cycle.push(self.at(idx).name());
            return Err(BuildError::CyclicDependency {
                cycle: cycle.join(" -> "),
            });
        }

        if !visited.insert(idx) {
            return Ok(());
        }

        stack.push(idx);
        let target = self.at(idx);
        for dependency in target.dependencies() {
            let dep_idx = self.lookup(dependency, Some(target.name()))?;
            self.visit(dep_idx, visited, stack, closure)?;
        }
        stack.pop();

        closure.push(idx);
        Ok(())
    }

    /// Topologically order a closure sorted by registration index
    fn order(&self, closure: &[usize]) -> BuildResult<Vec<usize>> {
        // Nodes are added in registration order, so NodeIndex order matches it.
        let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(closure.len(), closure.len());
        let nodes: HashMap<usize, NodeIndex> = closure
            .iter()
            .map(|&idx| (idx, graph.add_node(idx)))
            .collect();
        let member = |name: &String| {
            self.registration_index(name)
                .and_then(|idx| nodes.get(&idx).copied())
        };

        for &idx in closure {
            let target = self.at(idx);
            let node = nodes[&idx];

            // Soft edges may point outside the closure, but never at an undeclared target.
            for name in target.runs_before().iter().chain(target.runs_after()) {
                if !self.contains(name) {
                    return Err(BuildError::UnknownTarget {
                        name: name.clone(),
                        required_by: Some(target.name().to_string()),
                    });
                }
            }

            for dependency in target.dependencies() {
                if let Some(dep_node) = member(dependency) {
                    graph.update_edge(dep_node, node, ());
                }
            }
            for later in target.runs_before() {
                if let Some(later_node) = member(later) {
                    graph.update_edge(node, later_node, ());
                }
            }
            for earlier in target.runs_after() {
                if let Some(earlier_node) = member(earlier) {
                    graph.update_edge(earlier_node, node, ());
                }
            }
        }

        let mut in_degree: Vec<usize> = graph
            .node_indices()
            .map(|node| graph.neighbors_directed(node, Direction::Incoming).count())
            .collect();
        let mut ready: BinaryHeap<Reverse<NodeIndex>> = graph
            .node_indices()
            .filter(|node| in_degree[node.index()] == 0)
            .map(Reverse)
            .collect();

        let mut order = Vec::with_capacity(closure.len());
        while let Some(Reverse(node)) = ready.pop() {
            order.push(graph[node]);
            for next in graph.neighbors_directed(node, Direction::Outgoing) {
                in_degree[next.index()] -= 1;
                if in_degree[next.index()] == 0 {
                    ready.push(Reverse(next));
                }
            }
        }

        if order.len() != closure.len() {
            return Err(BuildError::CyclicDependency {
                cycle: self.describe_ordering_cycle(&graph),
            });
        }

        Ok(order)
    }

    /// Name one cycle left behind by the ordering pass
    fn describe_ordering_cycle(&self, graph: &DiGraph<usize, ()>) -> String {
        let component = tarjan_scc(graph)
            .into_iter()
            .find(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]));

        let Some(mut component) = component else {
            return "unknown cycle".to_string();
        };
        component.sort_unstable();
        let start = component[0];
        let members: HashSet<NodeIndex> = component.iter().copied().collect();

        // Shortest path from `start` back to itself inside the component.
        let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut queue = VecDeque::from([start]);
        let mut closing = None;
        while let Some(node) = queue.pop_front() {
            let mut successors: Vec<NodeIndex> = graph
                .neighbors_directed(node, Direction::Outgoing)
                .filter(|n| members.contains(n))
                .collect();
            successors.sort_unstable();
            if successors.contains(&start) {
                closing = Some(node);
                break;
            }
            for next in successors {
                if next != start && !parent.contains_key(&next) {
                    parent.insert(next, node);
                    queue.push_back(next);
                }
            }
        }

        let mut path = vec![start];
        if let Some(mut node) = closing {
            let mut tail = Vec::new();
            while node != start {
                tail.push(node);
                node = parent[&node];
            }
            path.extend(tail.into_iter().rev());
        }
        path.push(start);

        path.iter()
            .map(|&node| self.at(graph[node]).name())
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

#[cfg(test)]
mod tests {
    include!("plan.test.rs");
}
