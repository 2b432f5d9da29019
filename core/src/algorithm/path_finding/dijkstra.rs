//! Dijkstra's Shortest Path Algorithm
//!
//! Single-pair shortest paths over an undirected graph with non-negative
//! weights. Selection is a linear scan over unsettled vertices rather than a
//! heap, which makes the tie-break explicit: among equally distant vertices
//! the one declared first is settled first.
//!
//! # Algorithmic Complexity
//!
//! - **Time**: O(V² + E)
//! - **Space**: O(V)
//!
//! Copyright (c) 2025 Mohammad Atashi. All rights reserved.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{
    Algorithm, AlgorithmComplexity, AlgorithmError, AlgorithmId, EndpointRole, NodeId,
};
use crate::config::SolverConfig;
use crate::data_structures::graph::{AdjacencyMap, Edge, GraphBuilder, NodeIndex, Weight};
use crate::validation::input;

/// One hop of a shortest path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    pub source: String,
    pub target: String,
    pub distance: Weight,
}

/// Outcome of a shortest path query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PathOutcome {
    Reached {
        distance: Weight,
        /// Node identifiers from source to target inclusive
        path: Vec<String>,
        segments: Vec<PathSegment>,
    },
    Unreachable,
}

/// Search statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStatistics {
    /// Vertices whose distance became final
    pub nodes_settled: usize,
    /// Strict improvements to a tentative distance
    pub relaxations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortestPathResult {
    pub source: String,
    pub target: String,
    pub outcome: PathOutcome,
    pub statistics: SearchStatistics,
}

impl ShortestPathResult {
    /// Path length, or `+∞` when the target is unreachable
    pub fn distance(&self) -> Weight {
        match &self.outcome {
            PathOutcome::Reached { distance, .. } => *distance,
            PathOutcome::Unreachable => Weight::INFINITY,
        }
    }

    pub fn path(&self) -> &[String] {
        match &self.outcome {
            PathOutcome::Reached { path, .. } => path,
            PathOutcome::Unreachable => &[],
        }
    }

    pub fn segments(&self) -> &[PathSegment] {
        match &self.outcome {
            PathOutcome::Reached { segments, .. } => segments,
            PathOutcome::Unreachable => &[],
        }
    }

    #[inline]
    pub fn path_exists(&self) -> bool {
        matches!(self.outcome, PathOutcome::Reached { .. })
    }
}

/// Dijkstra shortest path solver
#[derive(Debug, Clone, Default)]
pub struct ShortestPathSolver {
    config: SolverConfig,
}

impl ShortestPathSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Shortest path from `source` to `target` treating every edge as undirected
    pub fn solve<S: AsRef<str>>(
        &self,
        nodes: &[S],
        edges: &[Edge],
        source: &str,
        target: &str,
    ) -> Result<ShortestPathResult, AlgorithmError> {
        input::require_nodes(nodes)?;
        let built = GraphBuilder::new(&self.config).build(nodes, edges)?;
        let index = &built.graph.nodes;
        let s = input::require_endpoint(index, source, EndpointRole::Source)?;
        let t = input::require_endpoint(index, target, EndpointRole::Target)?;

        let mut statistics = SearchStatistics::default();
        let tree = settle(&built.adjacency, s, t, &mut statistics);

        let outcome = match tree.distance(t) {
            Some(distance) => {
                let path = tree.walk_back(t);
                debug!(
                    "Shortest path {} -> {} has length {} over {} hop(s)",
                    source,
                    target,
                    distance,
                    path.len() - 1
                );
                reached(index, &built.adjacency, distance, &path)
            }
            None => {
                debug!("No path from {} to {}", source, target);
                PathOutcome::Unreachable
            }
        };

        Ok(ShortestPathResult {
            source: source.to_string(),
            target: target.to_string(),
            outcome,
            statistics,
        })
    }
}

/// Tentative distances and backpointers left behind by [`settle`]
#[derive(Debug)]
struct SearchTree {
    distances: Vec<Weight>,
    previous: Vec<Option<NodeId>>,
}

impl SearchTree {
    fn distance(&self, v: NodeId) -> Option<Weight> {
        let d = self.distances[v.as_usize()];
        d.is_finite().then_some(d)
    }

    /// Vertices from the root to `v`, inclusive
    fn walk_back(&self, v: NodeId) -> Vec<NodeId> {
        let mut path = vec![v];
        let mut current = v;
        while let Some(prev) = self.previous[current.as_usize()] {
            path.push(prev);
            current = prev;
        }
        path.reverse();
        path
    }
}

fn settle(
    adjacency: &AdjacencyMap,
    source: NodeId,
    target: NodeId,
    statistics: &mut SearchStatistics,
) -> SearchTree {
    let n = adjacency.vertex_count();
    let mut tree = SearchTree {
        distances: vec![Weight::INFINITY; n],
        previous: vec![None; n],
    };
    tree.distances[source.as_usize()] = 0.0;
    let mut settled = vec![false; n];

    loop {
        // Strict `<` over ascending ids: earliest declared vertex wins ties
        let mut next: Option<(NodeId, Weight)> = None;
        for (i, &d) in tree.distances.iter().enumerate() {
            if !settled[i] && d < next.map_or(Weight::INFINITY, |(_, best)| best) {
                next = Some((NodeId(i), d));
            }
        }
        let Some((u, du)) = next else {
            break;
        };
        if u == target {
            break;
        }

        settled[u.as_usize()] = true;
        statistics.nodes_settled += 1;
        trace!("Settled vertex {} at distance {}", u.as_usize(), du);

        for (v, weight) in adjacency.neighbors(u) {
            let candidate = du + weight;
            if candidate < tree.distances[v.as_usize()] {
                tree.distances[v.as_usize()] = candidate;
                tree.previous[v.as_usize()] = Some(u);
                statistics.relaxations += 1;
            }
        }
    }

    tree
}

fn reached(index: &NodeIndex, adjacency: &AdjacencyMap, distance: Weight, path: &[NodeId]) -> PathOutcome {
    let segments = path
        .windows(2)
        .map(|hop| PathSegment {
            source: index.name(hop[0]).to_string(),
            target: index.name(hop[1]).to_string(),
            distance: adjacency.weight(hop[0], hop[1]).unwrap_or_default(),
        })
        .collect();

    PathOutcome::Reached {
        distance,
        path: path.iter().map(|&v| index.name(v).to_string()).collect(),
        segments,
    }
}

impl Algorithm for ShortestPathSolver {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("dijkstra")
    }

    fn name(&self) -> &'static str {
        "Dijkstra's Algorithm"
    }

    fn category(&self) -> &'static str {
        "path_finding"
    }

    fn description(&self) -> &'static str {
        "Single-pair shortest path over an undirected graph with non-negative weights, settling the closest unvisited vertex each step."
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity {
            time_complexity: "O(V^2 + E)",
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
    use crate::config::{DuplicateEdgePolicy, UndeclaredNodePolicy};
    use crate::validation::correctness;
    use approx::assert_relative_eq;

    fn city() -> (Vec<&'static str>, Vec<Edge>) {
        let nodes = vec!["1", "2", "3", "4", "5", "6"];
        let edges = vec![
            Edge::new("1", "2", 7.0),
            Edge::new("1", "3", 9.0),
            Edge::new("1", "6", 14.0),
            Edge::new("2", "3", 10.0),
            Edge::new("2", "4", 15.0),
            Edge::new("3", "4", 11.0),
            Edge::new("3", "6", 2.0),
            Edge::new("4", "5", 6.0),
            Edge::new("5", "6", 9.0),
        ];
        (nodes, edges)
    }

    #[test]
    fn test_city_route() {
        let (nodes, edges) = city();
        let result = ShortestPathSolver::new().solve(&nodes, &edges, "1", "5").unwrap();

        assert!(result.path_exists());
        assert_relative_eq!(result.distance(), 20.0);
        assert_eq!(result.path(), ["1", "3", "6", "5"]);

        let hops: Vec<Weight> = result.segments().iter().map(|s| s.distance).collect();
        assert_eq!(hops, vec![9.0, 2.0, 9.0]);
        assert_eq!(result.segments()[1].source, "3");
        assert_eq!(result.segments()[1].target, "6");
    }

    #[test]
    fn test_tied_vertex_declared_first_settles_first() {
        // 4 and 5 both sit at distance 20; 4 is settled before the target
        let (nodes, edges) = city();
        let result = ShortestPathSolver::new().solve(&nodes, &edges, "1", "5").unwrap();
        assert_eq!(result.statistics.nodes_settled, 5);
    }

    #[test]
    fn test_matches_bellman_ford() {
        let (nodes, edges) = city();
        let reference = correctness::bellman_ford(&nodes, &edges, "1").unwrap();

        for target in &nodes {
            let result = ShortestPathSolver::new().solve(&nodes, &edges, "1", target).unwrap();
            assert_relative_eq!(result.distance(), reference[*target]);
        }
    }

    #[test]
    fn test_unreachable_target() {
        let nodes = ["A", "B", "C"];
        let edges = vec![Edge::new("A", "B", 1.0)];
        let result = ShortestPathSolver::new().solve(&nodes, &edges, "A", "C").unwrap();

        assert_eq!(result.outcome, PathOutcome::Unreachable);
        assert!(!result.path_exists());
        assert!(result.path().is_empty());
        assert!(result.distance().is_infinite());
    }

    #[test]
    fn test_source_equals_target() {
        let (nodes, edges) = city();
        let result = ShortestPathSolver::new().solve(&nodes, &edges, "4", "4").unwrap();

        assert_eq!(result.distance(), 0.0);
        assert_eq!(result.path(), ["4"]);
        assert!(result.segments().is_empty());
    }

    #[test]
    fn test_single_node() {
        let result = ShortestPathSolver::new().solve(&["A"], &[], "A", "A").unwrap();
        assert_eq!(result.distance(), 0.0);
        assert_eq!(result.path(), ["A"]);
    }

    #[test]
    fn test_edges_are_undirected() {
        let nodes = ["A", "B", "C"];
        let edges = vec![Edge::new("B", "A", 2.0), Edge::new("C", "B", 3.0)];
        let result = ShortestPathSolver::new().solve(&nodes, &edges, "A", "C").unwrap();

        assert_eq!(result.distance(), 5.0);
        assert_eq!(result.path(), ["A", "B", "C"]);
    }

    #[test]
    fn test_duplicate_pair_policy_applies() {
        let nodes = ["A", "B"];
        let edges = vec![Edge::new("A", "B", 5.0), Edge::new("B", "A", 2.0)];

        let last = ShortestPathSolver::new().solve(&nodes, &edges, "A", "B").unwrap();
        assert_eq!(last.distance(), 2.0);

        let config = SolverConfig::default().with_duplicate_edges(DuplicateEdgePolicy::Sum);
        let summed = ShortestPathSolver::with_config(config)
            .solve(&nodes, &edges, "A", "B")
            .unwrap();
        assert_eq!(summed.distance(), 7.0);
    }

    #[test]
    fn test_route_through_admitted_node() {
        let config = SolverConfig::default().with_undeclared_nodes(UndeclaredNodePolicy::Admit);
        let nodes = ["A", "B"];
        let edges = vec![Edge::new("A", "hub", 1.0), Edge::new("hub", "B", 1.0)];
        let result = ShortestPathSolver::with_config(config)
            .solve(&nodes, &edges, "A", "B")
            .unwrap();

        assert_eq!(result.path(), ["A", "hub", "B"]);
        assert_eq!(result.distance(), 2.0);
    }

    #[test]
    fn test_endpoint_validation() {
        let (nodes, edges) = city();
        let solver = ShortestPathSolver::new();

        assert_eq!(
            solver.solve(&nodes, &edges, "", "5").unwrap_err(),
            AlgorithmError::MissingEndpoint {
                role: EndpointRole::Source
            }
        );
        assert_eq!(
            solver.solve(&nodes, &edges, "1", "9").unwrap_err(),
            AlgorithmError::UnknownEndpoint {
                role: EndpointRole::Target,
                node: "9".to_string()
            }
        );

        let empty: [&str; 0] = [];
        assert_eq!(
            solver.solve(&empty, &[], "1", "5").unwrap_err(),
            AlgorithmError::EmptyNodeList
        );
    }

    #[test]
    fn test_unreachable_serializes_without_distance() {
        let result = ShortestPathSolver::new()
            .solve(&["A", "B"], &[], "A", "B")
            .unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["outcome"]["status"], "unreachable");
    }
}
