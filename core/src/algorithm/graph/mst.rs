//! Minimum Spanning Tree Algorithm Implementation
//!
//! Prim's algorithm in its edge-scanning form: the tree grows from the first
//! declared node, and every round scans the full edge list for the cheapest
//! edge crossing the cut between visited and unvisited vertices.
//!
//! # Theoretical Foundation
//!
//! - **Cut Property**: for any cut (S, V-S), the minimum-weight crossing edge
//!   is safe for the MST
//!
//! # Algorithmic Complexity
//!
//! - **Time**: O(V · E), since each of at most V-1 rounds scans all edges
//! - **Space**: O(V)
//!
//! # Determinism
//!
//! Ties between equally cheap crossing edges go to the edge that appears
//! first in the input. Reported edges keep the direction they were given in.
//!
//! Copyright (c) 2025 Mohammad Atashi. All rights reserved.

use std::cmp::Ordering;
use std::collections::HashMap;

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algorithm::traits::{Algorithm, AlgorithmComplexity, AlgorithmError, AlgorithmId, NodeId};
use crate::config::SolverConfig;
use crate::data_structures::graph::{Edge, GraphBuilder, ResolvedEdge, Weight};

/// Union-Find data structure with path compression and union by rank
#[derive(Debug, Clone)]
pub struct UnionFind {
    /// Parent pointers for each element
    parent: Vec<usize>,
    /// Rank (approximate depth) of each tree
    rank: Vec<usize>,
    /// Number of disjoint sets
    num_components: usize,
}

impl UnionFind {
    /// Create a new Union-Find structure with n elements
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            num_components: n,
        }
    }

    /// Find the root of the set containing x with path compression
    pub fn find(&mut self, x: NodeId) -> NodeId {
        let mut root = x.as_usize();
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = x.as_usize();
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }

        NodeId(root)
    }

    /// Union two sets; returns false when they were already joined
    pub fn union(&mut self, x: NodeId, y: NodeId) -> bool {
        let root_x = self.find(x).as_usize();
        let root_y = self.find(y).as_usize();

        if root_x == root_y {
            return false;
        }

        match self.rank[root_x].cmp(&self.rank[root_y]) {
            Ordering::Less => self.parent[root_x] = root_y,
            Ordering::Greater => self.parent[root_y] = root_x,
            Ordering::Equal => {
                self.parent[root_y] = root_x;
                self.rank[root_x] += 1;
            }
        }

        self.num_components -= 1;
        true
    }

    /// Check if two elements are in the same connected component
    pub fn connected(&mut self, x: NodeId, y: NodeId) -> bool {
        self.find(x) == self.find(y)
    }

    /// Get the number of disjoint components
    pub fn components(&self) -> usize {
        self.num_components
    }
}

/// Whether the computed tree reaches every vertex
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SpanningStatus {
    /// Every vertex is connected by the tree
    Spanning,
    /// The tree stopped early; these vertices could not be reached
    Disconnected { unreached: Vec<String> },
}

/// Performance and behavior statistics for the spanning tree scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MstStatistics {
    /// Rounds that added an edge
    pub rounds: usize,
    /// Edge inspections across all rounds
    pub edges_examined: usize,
}

/// Minimum Spanning Tree result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MstResult {
    /// Total weight of the tree
    pub total_cost: Weight,
    /// Tree edges in the order they were added, as originally supplied
    pub mst_edges: Vec<Edge>,
    pub status: SpanningStatus,
    pub statistics: MstStatistics,
}

impl MstResult {
    pub fn is_spanning(&self) -> bool {
        self.status == SpanningStatus::Spanning
    }
}

/// Structural problems found by [`validate_spanning_tree`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MstError {
    #[error("Invalid MST: expected {expected} edges, found {found}")]
    EdgeCount { expected: usize, found: usize },

    #[error("Invalid MST: contains cycle through edge {0}")]
    ContainsCycle(usize),

    #[error("Invalid MST: edge {edge} references unknown node `{node}`")]
    UnknownNode { edge: usize, node: String },

    #[error("Invalid MST: reported cost {reported} but edges sum to {actual}")]
    CostMismatch { reported: Weight, actual: Weight },
}

/// Validate an MST result for structure and cost
///
/// Verification includes:
/// 1. Edge count of `V - 1` for a spanning result
/// 2. Tree property (no cycles)
/// 3. `total_cost` equal to the sum of edge weights
pub fn validate_spanning_tree<S: AsRef<str>>(nodes: &[S], result: &MstResult) -> Result<(), MstError> {
    let mut ids: HashMap<&str, NodeId> = HashMap::new();
    for node in nodes {
        let next = NodeId(ids.len());
        ids.entry(node.as_ref()).or_insert(next);
    }

    if result.is_spanning() {
        let expected = ids.len().saturating_sub(1);
        if result.mst_edges.len() != expected {
            return Err(MstError::EdgeCount {
                expected,
                found: result.mst_edges.len(),
            });
        }
    }

    let mut uf = UnionFind::new(ids.len());
    let mut actual: Weight = 0.0;
    for (position, edge) in result.mst_edges.iter().enumerate() {
        let lookup = |name: &str| {
            ids.get(name).copied().ok_or_else(|| MstError::UnknownNode {
                edge: position,
                node: name.to_string(),
            })
        };
        let source = lookup(&edge.source)?;
        let target = lookup(&edge.target)?;
        if !uf.union(source, target) {
            return Err(MstError::ContainsCycle(position));
        }
        actual += edge.weight;
    }

    if (actual - result.total_cost).abs() > 1e-9 * actual.abs().max(1.0) {
        return Err(MstError::CostMismatch {
            reported: result.total_cost,
            actual,
        });
    }

    Ok(())
}

/// Prim's minimum spanning tree solver
#[derive(Debug, Clone, Default)]
pub struct MinimumSpanningTreeSolver {
    config: SolverConfig,
}

impl MinimumSpanningTreeSolver {
    /// Create a new MST solver instance
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Computes a minimum spanning tree over undirected edges
    ///
    /// An empty node list yields an empty, zero-cost tree.
    pub fn solve<S: AsRef<str>>(&self, nodes: &[S], edges: &[Edge]) -> Result<MstResult, AlgorithmError> {
        if nodes.is_empty() {
            return Ok(MstResult {
                total_cost: 0.0,
                mst_edges: Vec::new(),
                status: SpanningStatus::Spanning,
                statistics: MstStatistics::default(),
            });
        }

        let graph = GraphBuilder::new(&self.config).index(nodes, edges)?;
        let vertex_count = graph.vertex_count();

        // Start from the first declared node
        let mut visited = vec![false; vertex_count];
        visited[0] = true;
        let mut visited_count = 1;

        let mut statistics = MstStatistics::default();
        let mut mst_edges = Vec::with_capacity(vertex_count.saturating_sub(1));
        let mut total_cost: Weight = 0.0;

        while visited_count < vertex_count {
            let Some(best) = cheapest_crossing_edge(&graph.edges, &visited, &mut statistics) else {
                break;
            };

            let added = if visited[best.source.as_usize()] {
                best.target
            } else {
                best.source
            };
            visited[added.as_usize()] = true;
            visited_count += 1;

            trace!(
                "Round {}: edge {} adds `{}` at cost {}",
                statistics.rounds,
                best.position,
                graph.nodes.name(added),
                best.weight
            );
            mst_edges.push(edges[best.position].clone());
            total_cost += best.weight;
            statistics.rounds += 1;
        }

        let status = if visited_count == vertex_count {
            SpanningStatus::Spanning
        } else {
            let unreached: Vec<String> = graph
                .nodes
                .ids()
                .filter(|v| !visited[v.as_usize()])
                .map(|v| graph.nodes.name(v).to_string())
                .collect();
            debug!("Graph is disconnected; {} node(s) unreached", unreached.len());
            SpanningStatus::Disconnected { unreached }
        };

        debug!(
            "Spanning tree with {} edges and total cost {}",
            mst_edges.len(),
            total_cost
        );

        Ok(MstResult {
            total_cost,
            mst_edges,
            status,
            statistics,
        })
    }
}

/// Cheapest edge with exactly one visited endpoint; the earliest edge wins ties
fn cheapest_crossing_edge<'e>(
    edges: &'e [ResolvedEdge],
    visited: &[bool],
    statistics: &mut MstStatistics,
) -> Option<&'e ResolvedEdge> {
    let mut best: Option<&ResolvedEdge> = None;
    for edge in edges {
        statistics.edges_examined += 1;
        if visited[edge.source.as_usize()] == visited[edge.target.as_usize()] {
            continue;
        }
        if best.map_or(true, |current| edge.weight < current.weight) {
            best = Some(edge);
        }
    }
    best
}

impl Algorithm for MinimumSpanningTreeSolver {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("prim")
    }

    fn name(&self) -> &'static str {
        "Prim's Minimum Spanning Tree"
    }

    fn category(&self) -> &'static str {
        "spanning_tree"
    }

    fn description(&self) -> &'static str {
        "Minimum-cost tree connecting every node of an undirected weighted graph, grown from the first node by repeatedly taking the cheapest edge that crosses the cut."
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity {
            time_complexity: "O(V * E)",
            space_complexity: "O(V)",
        }
    }

    fn config(&self) -> &SolverConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut SolverConfig {
        &mut self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UndeclaredNodePolicy;
    use crate::validation::correctness;
    use approx::assert_relative_eq;

    fn pipes() -> (Vec<&'static str>, Vec<Edge>) {
        let nodes = vec!["A", "B", "C", "D", "E"];
        let edges = vec![
            Edge::new("A", "B", 4.0),
            Edge::new("A", "C", 8.0),
            Edge::new("B", "C", 3.0),
            Edge::new("B", "D", 5.0),
            Edge::new("C", "D", 2.0),
            Edge::new("C", "E", 7.0),
            Edge::new("D", "E", 6.0),
        ];
        (nodes, edges)
    }

    #[test]
    fn test_pipe_network_tree() {
        let (nodes, edges) = pipes();
        let result = MinimumSpanningTreeSolver::new().solve(&nodes, &edges).unwrap();

        assert_relative_eq!(result.total_cost, 15.0);
        assert_eq!(
            result.mst_edges,
            vec![
                Edge::new("A", "B", 4.0),
                Edge::new("B", "C", 3.0),
                Edge::new("C", "D", 2.0),
                Edge::new("D", "E", 6.0),
            ]
        );
        assert!(result.is_spanning());
        assert_eq!(result.statistics.rounds, 4);
        assert_eq!(result.statistics.edges_examined, 4 * edges.len());
    }

    #[test]
    fn test_cost_matches_kruskal() {
        let (nodes, edges) = pipes();
        let result = MinimumSpanningTreeSolver::new().solve(&nodes, &edges).unwrap();

        let kruskal = correctness::kruskal_cost(&nodes, &edges).unwrap();
        assert_relative_eq!(result.total_cost, kruskal);
        assert!(validate_spanning_tree(&nodes, &result).is_ok());
    }

    #[test]
    fn test_ties_go_to_earliest_edge() {
        let nodes = ["A", "B", "C"];
        let edges = vec![
            Edge::new("A", "B", 1.0),
            Edge::new("A", "C", 1.0),
            Edge::new("B", "C", 1.0),
        ];
        let result = MinimumSpanningTreeSolver::new().solve(&nodes, &edges).unwrap();

        assert_eq!(
            result.mst_edges,
            vec![Edge::new("A", "B", 1.0), Edge::new("A", "C", 1.0)]
        );
    }

    #[test]
    fn test_edge_direction_is_preserved() {
        let nodes = ["A", "B"];
        let edges = vec![Edge::new("B", "A", 2.0)];
        let result = MinimumSpanningTreeSolver::new().solve(&nodes, &edges).unwrap();

        assert_eq!(result.mst_edges[0].source, "B");
        assert_eq!(result.mst_edges[0].target, "A");
    }

    #[test]
    fn test_empty_node_list_is_an_empty_tree() {
        let empty: [&str; 0] = [];
        let result = MinimumSpanningTreeSolver::new().solve(&empty, &[]).unwrap();

        assert_eq!(result.total_cost, 0.0);
        assert!(result.mst_edges.is_empty());
        assert!(result.is_spanning());
    }

    #[test]
    fn test_single_node() {
        let result = MinimumSpanningTreeSolver::new().solve(&["A"], &[]).unwrap();
        assert_eq!(result.total_cost, 0.0);
        assert!(result.mst_edges.is_empty());
        assert!(result.is_spanning());
    }

    #[test]
    fn test_disconnected_graph_is_flagged() {
        let nodes = ["A", "B", "C", "D"];
        let edges = vec![Edge::new("A", "B", 1.0), Edge::new("C", "D", 1.0)];
        let result = MinimumSpanningTreeSolver::new().solve(&nodes, &edges).unwrap();

        assert_eq!(result.mst_edges.len(), 1);
        assert_relative_eq!(result.total_cost, 1.0);
        assert_eq!(
            result.status,
            SpanningStatus::Disconnected {
                unreached: vec!["C".to_string(), "D".to_string()]
            }
        );
        assert!(validate_spanning_tree(&nodes, &result).is_ok());
    }

    #[test]
    fn test_zero_cost_edges_are_kept() {
        let nodes = ["A", "B", "C"];
        let edges = vec![Edge::new("A", "B", 0.0), Edge::new("B", "C", 5.0)];
        let result = MinimumSpanningTreeSolver::new().solve(&nodes, &edges).unwrap();

        assert_eq!(result.mst_edges.len(), 2);
        assert_relative_eq!(result.total_cost, 5.0);
    }

    #[test]
    fn test_admitted_nodes_are_spanned() {
        let config = SolverConfig::default().with_undeclared_nodes(UndeclaredNodePolicy::Admit);
        let nodes = ["A", "B"];
        let edges = vec![Edge::new("A", "B", 1.0), Edge::new("B", "X", 2.0)];
        let result = MinimumSpanningTreeSolver::with_config(config)
            .solve(&nodes, &edges)
            .unwrap();

        assert_eq!(result.mst_edges.len(), 2);
        assert_relative_eq!(result.total_cost, 3.0);
    }

    #[test]
    fn test_undeclared_nodes_rejected_by_default() {
        let nodes = ["A", "B"];
        let edges = vec![Edge::new("A", "X", 1.0)];
        let err = MinimumSpanningTreeSolver::new().solve(&nodes, &edges).unwrap_err();
        assert!(matches!(err, AlgorithmError::UndeclaredNode { edge: 0, .. }));
    }

    #[test]
    fn test_validate_detects_cycles_and_bad_costs() {
        let nodes = ["A", "B", "C"];
        let mut result = MstResult {
            total_cost: 3.0,
            mst_edges: vec![Edge::new("A", "B", 1.0), Edge::new("B", "A", 2.0)],
            status: SpanningStatus::Spanning,
            statistics: MstStatistics::default(),
        };
        assert_eq!(
            validate_spanning_tree(&nodes, &result),
            Err(MstError::ContainsCycle(1))
        );

        result.mst_edges = vec![Edge::new("A", "B", 1.0), Edge::new("B", "C", 1.0)];
        assert!(matches!(
            validate_spanning_tree(&nodes, &result),
            Err(MstError::CostMismatch { .. })
        ));
    }

    #[test]
    fn test_union_find() {
        let mut uf = UnionFind::new(5);

        // Initially all separate
        assert_eq!(uf.components(), 5);
        assert!(!uf.connected(NodeId(0), NodeId(1)));

        assert!(uf.union(NodeId(0), NodeId(1)));
        assert_eq!(uf.components(), 4);
        assert!(uf.connected(NodeId(0), NodeId(1)));

        // Union same elements should return false
        assert!(!uf.union(NodeId(0), NodeId(1)));
        assert_eq!(uf.components(), 4);

        assert!(uf.union(NodeId(2), NodeId(3)));
        assert!(uf.union(NodeId(1), NodeId(2)));
        assert_eq!(uf.components(), 2);
        assert!(uf.connected(NodeId(0), NodeId(3)));
    }

    #[test]
    fn test_solver_metadata() {
        let solver = MinimumSpanningTreeSolver::new();
        assert_eq!(solver.category(), "spanning_tree");
        assert_eq!(solver.id(), AlgorithmId::new("prim"));
    }
}
