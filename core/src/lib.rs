//! Aqueduct core
//!
//! Three classical graph algorithms over small graphs whose nodes are named
//! by strings:
//!
//! - [`max_flow`]: Ford-Fulkerson with depth-first augmenting paths
//! - [`minimum_spanning_tree`]: Prim's algorithm, scanning every edge per round
//! - [`shortest_path`]: Dijkstra's algorithm with a linear-scan frontier
//!
//! Every call is self-contained: it validates its input, builds the graph it
//! needs, computes, and returns a serializable result. Nothing is cached
//! between calls, and identical inputs always produce identical results.
//!
//! ```
//! use aqueduct_core::{max_flow, Edge};
//!
//! let nodes = ["s", "a", "t"];
//! let edges = vec![Edge::new("s", "a", 3.0), Edge::new("a", "t", 2.0)];
//! let result = max_flow(&nodes, &edges, "s", "t").unwrap();
//! assert_eq!(result.max_flow, 2.0);
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod config;
pub mod data_structures;
pub mod validation;

pub use crate::algorithm::graph::max_flow::{FlowEdge, FlowPath, MaxFlowResult, MaxFlowSolver};
pub use crate::algorithm::graph::mst::{
    validate_spanning_tree, MinimumSpanningTreeSolver, MstResult, SpanningStatus,
};
pub use crate::algorithm::path_finding::dijkstra::{
    PathOutcome, PathSegment, ShortestPathResult, ShortestPathSolver,
};
pub use crate::algorithm::traits::{Algorithm, AlgorithmError, EndpointRole};
pub use crate::config::{DuplicateEdgePolicy, SolverConfig, UndeclaredNodePolicy};
pub use crate::data_structures::graph::{edges_from_records, Edge, EdgeRecord, Weight};

/// Maximum flow from `source` to `sink` with the default configuration
pub fn max_flow<S: AsRef<str>>(
    nodes: &[S],
    edges: &[Edge],
    source: &str,
    sink: &str,
) -> Result<MaxFlowResult, AlgorithmError> {
    max_flow_with_config(nodes, edges, source, sink, &SolverConfig::default())
}

pub fn max_flow_with_config<S: AsRef<str>>(
    nodes: &[S],
    edges: &[Edge],
    source: &str,
    sink: &str,
    config: &SolverConfig,
) -> Result<MaxFlowResult, AlgorithmError> {
    MaxFlowSolver::with_config(config.clone()).solve(nodes, edges, source, sink)
}

/// Minimum spanning tree grown from the first node
pub fn minimum_spanning_tree<S: AsRef<str>>(
    nodes: &[S],
    edges: &[Edge],
) -> Result<MstResult, AlgorithmError> {
    minimum_spanning_tree_with_config(nodes, edges, &SolverConfig::default())
}

pub fn minimum_spanning_tree_with_config<S: AsRef<str>>(
    nodes: &[S],
    edges: &[Edge],
    config: &SolverConfig,
) -> Result<MstResult, AlgorithmError> {
    MinimumSpanningTreeSolver::with_config(config.clone()).solve(nodes, edges)
}

/// Shortest path between two nodes, edges taken as undirected
pub fn shortest_path<S: AsRef<str>>(
    nodes: &[S],
    edges: &[Edge],
    source: &str,
    target: &str,
) -> Result<ShortestPathResult, AlgorithmError> {
    shortest_path_with_config(nodes, edges, source, target, &SolverConfig::default())
}

pub fn shortest_path_with_config<S: AsRef<str>>(
    nodes: &[S],
    edges: &[Edge],
    source: &str,
    target: &str,
    config: &SolverConfig,
) -> Result<ShortestPathResult, AlgorithmError> {
    ShortestPathSolver::with_config(config.clone()).solve(nodes, edges, source, target)
}
