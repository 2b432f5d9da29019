//! Correctness Verification
//!
//! Independent reference computations and invariant checks used to verify
//! solver output: flow bounds and conservation for maximum flow, Kruskal's
//! algorithm for spanning tree cost, and Bellman-Ford for shortest distances.
//! None of these share code paths with the solvers they check.

use std::collections::HashMap;

use thiserror::Error;

use crate::algorithm::graph::max_flow::MaxFlowResult;
use crate::algorithm::graph::mst::UnionFind;
use crate::algorithm::traits::NodeId;
use crate::data_structures::graph::{Edge, Weight};

/// Absolute tolerance for floating point comparisons
pub const EPSILON: f64 = 1e-9;

/// Verification error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VerificationError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Unknown node `{0}`")]
    UnknownNode(String),
}

/// Checks capacity bounds and flow conservation on a max-flow result
///
/// Edges naming the same ordered pair share one effective capacity and one
/// flow value, so each pair is counted once. Self-loops are ignored.
pub fn check_flow(result: &MaxFlowResult, source: &str, sink: &str) -> Result<(), VerificationError> {
    let mut seen: HashMap<(&str, &str), Weight> = HashMap::new();
    let mut balance: HashMap<&str, Weight> = HashMap::new();

    for edge in &result.flow_per_edge {
        if edge.flow < -EPSILON || edge.flow > edge.capacity + EPSILON {
            return Err(VerificationError::InvariantViolation(format!(
                "flow {} on {} -> {} outside [0, {}]",
                edge.flow, edge.source, edge.target, edge.capacity
            )));
        }
        if edge.source == edge.target {
            continue;
        }

        let key = (edge.source.as_str(), edge.target.as_str());
        if let Some(&previous) = seen.get(&key) {
            if (previous - edge.flow).abs() > EPSILON {
                return Err(VerificationError::InvariantViolation(format!(
                    "edges {} -> {} disagree on flow ({} vs {})",
                    edge.source, edge.target, previous, edge.flow
                )));
            }
            continue;
        }
        seen.insert(key, edge.flow);

        *balance.entry(edge.source.as_str()).or_default() -= edge.flow;
        *balance.entry(edge.target.as_str()).or_default() += edge.flow;
    }

    for (&node, &net) in &balance {
        if node == source || node == sink {
            continue;
        }
        if net.abs() > EPSILON {
            return Err(VerificationError::InvariantViolation(format!(
                "flow not conserved at `{node}` (net {net})"
            )));
        }
    }

    if source != sink {
        let delivered = balance.get(sink).copied().unwrap_or_default();
        if (delivered - result.max_flow).abs() > EPSILON * result.max_flow.max(1.0) {
            return Err(VerificationError::InvariantViolation(format!(
                "sink receives {delivered} but max flow is {}",
                result.max_flow
            )));
        }
    }

    Ok(())
}

fn index_nodes<S: AsRef<str>>(nodes: &[S]) -> HashMap<&str, NodeId> {
    let mut ids = HashMap::new();
    for node in nodes {
        let next = NodeId(ids.len());
        ids.entry(node.as_ref()).or_insert(next);
    }
    ids
}

/// Cost of a minimum spanning forest by Kruskal's algorithm
///
/// Ties are broken by input order (stable sort).
pub fn kruskal_cost<S: AsRef<str>>(nodes: &[S], edges: &[Edge]) -> Result<Weight, VerificationError> {
    let ids = index_nodes(nodes);
    let lookup = |name: &str| {
        ids.get(name)
            .copied()
            .ok_or_else(|| VerificationError::UnknownNode(name.to_string()))
    };

    let mut sorted: Vec<&Edge> = edges.iter().collect();
    sorted.sort_by(|a, b| a.weight.total_cmp(&b.weight));

    let mut uf = UnionFind::new(ids.len());
    let mut cost = 0.0;
    for edge in sorted {
        if uf.union(lookup(&edge.source)?, lookup(&edge.target)?) {
            cost += edge.weight;
        }
    }
    Ok(cost)
}

/// Undirected single-source distances by Bellman-Ford
///
/// Every parallel edge is relaxed, so with repeated pairs the cheapest one
/// counts. Unreachable nodes map to `+∞`.
pub fn bellman_ford<S: AsRef<str>>(
    nodes: &[S],
    edges: &[Edge],
    source: &str,
) -> Result<HashMap<String, Weight>, VerificationError> {
    let ids = index_nodes(nodes);
    let lookup = |name: &str| {
        ids.get(name)
            .map(|id| id.as_usize())
            .ok_or_else(|| VerificationError::UnknownNode(name.to_string()))
    };

    let mut distances = vec![Weight::INFINITY; ids.len()];
    distances[lookup(source)?] = 0.0;

    let arcs = edges
        .iter()
        .map(|edge| Ok((lookup(&edge.source)?, lookup(&edge.target)?, edge.weight)))
        .collect::<Result<Vec<_>, VerificationError>>()?;

    for _ in 1..ids.len().max(1) {
        let mut changed = false;
        for &(u, v, w) in &arcs {
            for (from, to) in [(u, v), (v, u)] {
                if distances[from] + w < distances[to] {
                    distances[to] = distances[from] + w;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    Ok(ids
        .into_iter()
        .map(|(name, id)| (name.to_string(), distances[id.as_usize()]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::graph::max_flow::FlowEdge;
    use crate::algorithm::graph::max_flow::FlowMetrics;

    fn flow_edge(source: &str, target: &str, capacity: Weight, flow: Weight) -> FlowEdge {
        FlowEdge {
            source: source.to_string(),
            target: target.to_string(),
            capacity,
            flow,
        }
    }

    fn result(max_flow: Weight, flow_per_edge: Vec<FlowEdge>) -> MaxFlowResult {
        MaxFlowResult {
            max_flow,
            flow_per_edge,
            flow_paths: Vec::new(),
            min_cut: Vec::new(),
            cut_edges: Vec::new(),
            metrics: FlowMetrics::default(),
        }
    }

    #[test]
    fn test_conserved_flow_passes() {
        let r = result(
            3.0,
            vec![
                flow_edge("s", "a", 5.0, 3.0),
                flow_edge("a", "t", 3.0, 3.0),
                flow_edge("s", "t", 1.0, 0.0),
            ],
        );
        assert_eq!(check_flow(&r, "s", "t"), Ok(()));
    }

    #[test]
    fn test_over_capacity_is_flagged() {
        let r = result(4.0, vec![flow_edge("s", "t", 3.0, 4.0)]);
        assert!(matches!(
            check_flow(&r, "s", "t"),
            Err(VerificationError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_leaky_node_is_flagged() {
        let r = result(
            2.0,
            vec![flow_edge("s", "a", 5.0, 3.0), flow_edge("a", "t", 5.0, 2.0)],
        );
        assert!(check_flow(&r, "s", "t").is_err());
    }

    #[test]
    fn test_duplicate_pairs_counted_once() {
        let r = result(
            2.0,
            vec![
                flow_edge("s", "t", 2.0, 2.0),
                flow_edge("s", "t", 2.0, 2.0),
            ],
        );
        assert!(check_flow(&r, "s", "t").is_ok());
    }

    #[test]
    fn test_kruskal_forest_cost() {
        let nodes = ["A", "B", "C", "D"];
        let edges = vec![
            Edge::new("A", "B", 1.0),
            Edge::new("B", "C", 5.0),
            Edge::new("A", "C", 2.0),
            Edge::new("D", "D", 0.0),
        ];
        assert_eq!(kruskal_cost(&nodes, &edges), Ok(3.0));
        assert_eq!(
            kruskal_cost(&["A"], &[Edge::new("A", "Q", 1.0)]),
            Err(VerificationError::UnknownNode("Q".to_string()))
        );
    }

    #[test]
    fn test_bellman_ford_distances() {
        let nodes = ["A", "B", "C", "D"];
        let edges = vec![
            Edge::new("A", "B", 4.0),
            Edge::new("C", "A", 1.0),
            Edge::new("B", "C", 2.0),
        ];
        let distances = bellman_ford(&nodes, &edges, "A").unwrap();

        assert_eq!(distances["A"], 0.0);
        assert_eq!(distances["B"], 3.0);
        assert_eq!(distances["C"], 1.0);
        assert!(distances["D"].is_infinite());
    }
}
