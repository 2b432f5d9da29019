//! Maximum Flow Algorithm Implementation
//!
//! Classical Ford-Fulkerson over a directed residual network. Augmenting
//! paths are found by depth-first search, so paths are not necessarily
//! shortest (this is not Edmonds-Karp).
//!
//! # Residual Network
//!
//! Residual capacity is kept in a map keyed by ordered `(NodeId, NodeId)`
//! pairs. Input edges seed the forward entries; reverse entries start at an
//! implicit zero and come into existence the first time an augmentation
//! pushes flow across their edge. Each vertex remembers the order in which
//! its outgoing arcs were created, and the search tries arcs in that order.
//!
//! # Algorithmic Complexity
//!
//! - **Time**: O(E · f*) for integer capacities, f* being the maximum flow
//! - **Space**: O(V + E)
//!
//! Termination relies on integer capacities; the configurable augmentation
//! bound caps the work on anything else.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::{HashMap, HashSet};

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{
    Algorithm, AlgorithmComplexity, AlgorithmError, AlgorithmId, EndpointRole, NodeId,
};
use crate::config::{DuplicateEdgePolicy, SolverConfig};
use crate::data_structures::graph::{Edge, GraphBuilder, NodeIndex, ResolvedEdge, Weight};
use crate::validation::input;

/// Flow capacity type
pub type Capacity = Weight;

/// Flow value type
pub type Flow = Weight;

/// Flow carried by one input edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub source: String,
    pub target: String,
    /// Effective capacity of the ordered pair after duplicate resolution
    pub capacity: Capacity,
    pub flow: Flow,
}

impl FlowEdge {
    pub fn is_saturated(&self) -> bool {
        self.capacity > 0.0 && self.flow >= self.capacity
    }
}

/// Residual capacity network keyed by ordered node pairs
#[derive(Debug, Clone)]
pub struct FlowNetwork {
    /// Remaining capacity per ordered pair
    residual: HashMap<(NodeId, NodeId), Capacity>,
    /// Capacity each pair was seeded with by the input
    seeded: HashMap<(NodeId, NodeId), Capacity>,
    /// Outgoing arcs per vertex in creation order
    adjacency: Vec<Vec<NodeId>>,
}

impl FlowNetwork {
    /// Create an empty network over `vertex_count` vertices
    pub fn new(vertex_count: usize) -> Self {
        Self {
            residual: HashMap::new(),
            seeded: HashMap::new(),
            adjacency: vec![Vec::new(); vertex_count],
        }
    }

    /// Seeds forward capacities from validated edges; self-loops are skipped
    pub fn from_edges(
        vertex_count: usize,
        edges: &[ResolvedEdge],
        policy: DuplicateEdgePolicy,
    ) -> Self {
        let mut network = Self::new(vertex_count);
        for edge in edges {
            if edge.is_self_loop() {
                warn!(
                    "Ignoring self-loop at edge {} for max flow",
                    edge.position
                );
                continue;
            }
            network.seed(edge.source, edge.target, edge.weight, policy);
        }
        network
    }

    fn seed(&mut self, from: NodeId, to: NodeId, capacity: Capacity, policy: DuplicateEdgePolicy) {
        let existing = self.residual.get(&(from, to)).copied();
        if existing.is_none() {
            self.adjacency[from.as_usize()].push(to);
        }
        let combined = policy.combine(existing, capacity);
        self.residual.insert((from, to), combined);
        self.seeded.insert((from, to), combined);
    }

    /// Remaining capacity on `from → to`, zero for pairs never seen
    #[inline]
    pub fn residual_capacity(&self, from: NodeId, to: NodeId) -> Capacity {
        self.residual.get(&(from, to)).copied().unwrap_or(0.0)
    }

    /// Capacity the input assigned to `from → to`
    #[inline]
    pub fn seeded_capacity(&self, from: NodeId, to: NodeId) -> Capacity {
        self.seeded.get(&(from, to)).copied().unwrap_or(0.0)
    }

    /// Outgoing arcs of `vertex` in creation order
    pub fn arcs(&self, vertex: NodeId) -> &[NodeId] {
        &self.adjacency[vertex.as_usize()]
    }

    fn adjust(&mut self, from: NodeId, to: NodeId, delta: Capacity) {
        let adjacency = &mut self.adjacency;
        let entry = self.residual.entry((from, to)).or_insert_with(|| {
            adjacency[from.as_usize()].push(to);
            0.0
        });
        *entry += delta;
    }

    /// Depth-first search for a path of strictly positive residual arcs
    ///
    /// Visited vertices stay visited after backtracking. `explored` is
    /// incremented for every vertex the search enters.
    pub fn find_augmenting_path(
        &self,
        source: NodeId,
        sink: NodeId,
        explored: &mut usize,
    ) -> Option<Vec<NodeId>> {
        let mut visited = vec![false; self.adjacency.len()];
        // Each frame holds a vertex and the index of its next untried arc
        let mut stack: Vec<(NodeId, usize)> = vec![(source, 0)];
        visited[source.as_usize()] = true;
        *explored += 1;

        while let Some(frame) = stack.last_mut() {
            let (vertex, cursor) = *frame;
            let arcs = self.arcs(vertex);
            if cursor >= arcs.len() {
                stack.pop();
                continue;
            }
            frame.1 += 1;

            let next = arcs[cursor];
            if visited[next.as_usize()] || self.residual_capacity(vertex, next) <= 0.0 {
                continue;
            }
            visited[next.as_usize()] = true;
            *explored += 1;

            if next == sink {
                let mut path: Vec<NodeId> = stack.iter().map(|&(v, _)| v).collect();
                path.push(next);
                return Some(path);
            }
            stack.push((next, 0));
        }

        None
    }

    /// Minimum residual capacity along `path`
    pub fn bottleneck(&self, path: &[NodeId]) -> Capacity {
        path.windows(2)
            .map(|pair| self.residual_capacity(pair[0], pair[1]))
            .fold(Capacity::INFINITY, Capacity::min)
    }

    /// Pushes `amount` along `path`, crediting the reverse arcs
    pub fn augment(&mut self, path: &[NodeId], amount: Flow) {
        for pair in path.windows(2) {
            self.adjust(pair[0], pair[1], -amount);
            self.adjust(pair[1], pair[0], amount);
        }
    }

    /// Net flow on `from → to`
    ///
    /// This is the capacity pushed back onto the reverse arc, minus whatever
    /// the input itself seeded there through an anti-parallel edge.
    pub fn net_flow(&self, from: NodeId, to: NodeId) -> Flow {
        (self.residual_capacity(to, from) - self.seeded_capacity(to, from)).max(0.0)
    }

    /// Vertices reachable from `source` through positive residual arcs
    pub fn reachable_from(&self, source: NodeId) -> Vec<bool> {
        let mut reachable = vec![false; self.adjacency.len()];
        let mut stack = vec![source];
        reachable[source.as_usize()] = true;

        while let Some(vertex) = stack.pop() {
            for &next in self.arcs(vertex) {
                if !reachable[next.as_usize()] && self.residual_capacity(vertex, next) > 0.0 {
                    reachable[next.as_usize()] = true;
                    stack.push(next);
                }
            }
        }

        reachable
    }
}

/// Augmenting path with the flow it carried
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowPath {
    /// Path vertices
    pub path: Vec<String>,
    /// Flow amount along path
    pub flow: Flow,
}

/// Flow algorithm performance metrics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowMetrics {
    /// Number of augmenting paths applied
    pub augmentations: usize,
    /// Vertices entered across all path searches
    pub nodes_explored: usize,
}

/// Maximum flow result with detailed flow information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxFlowResult {
    /// Maximum flow value
    pub max_flow: Flow,
    /// One entry per input edge, in input order
    pub flow_per_edge: Vec<FlowEdge>,
    /// Augmenting paths in the order they were applied
    pub flow_paths: Vec<FlowPath>,
    /// Source side of the minimum cut, in node order
    pub min_cut: Vec<String>,
    /// Distinct input arcs leaving the source side
    pub cut_edges: Vec<FlowEdge>,
    /// Algorithm performance metrics
    pub metrics: FlowMetrics,
}

impl MaxFlowResult {
    /// First reported edge for each distinct ordered pair
    ///
    /// Repeated pairs share one effective capacity and one flow, so every
    /// aggregate counts a pair once.
    pub fn distinct_edges(&self) -> impl Iterator<Item = &FlowEdge> {
        let mut seen = HashSet::new();
        self.flow_per_edge
            .iter()
            .filter_map(move |edge| {
                seen.insert((edge.source.as_str(), edge.target.as_str()))
                    .then_some(edge)
            })
    }

    /// Distinct pairs carrying positive flow
    pub fn active_edges(&self) -> impl Iterator<Item = &FlowEdge> {
        self.distinct_edges().filter(|edge| edge.flow > 0.0)
    }

    /// Sum of effective capacities over distinct pairs
    pub fn total_capacity(&self) -> Capacity {
        self.distinct_edges().map(|edge| edge.capacity).sum()
    }

    /// Maximum flow as a fraction of total capacity, `None` without capacity
    pub fn utilization(&self) -> Option<f64> {
        let total = self.total_capacity();
        (total > 0.0).then(|| self.max_flow / total)
    }

    /// Capacity of the minimum cut; equals `max_flow`
    pub fn cut_capacity(&self) -> Capacity {
        self.cut_edges.iter().map(|edge| edge.capacity).sum()
    }
}

/// Ford-Fulkerson maximum flow solver
#[derive(Debug, Clone, Default)]
pub struct MaxFlowSolver {
    config: SolverConfig,
}

impl MaxFlowSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Computes the maximum flow from `source` to `sink`
    ///
    /// Edges are directed: capacity runs from `source` to `target` only.
    pub fn solve<S: AsRef<str>>(
        &self,
        nodes: &[S],
        edges: &[Edge],
        source: &str,
        sink: &str,
    ) -> Result<MaxFlowResult, AlgorithmError> {
        input::require_nodes(nodes)?;
        let graph = GraphBuilder::new(&self.config).index(nodes, edges)?;
        let s = input::require_endpoint(&graph.nodes, source, EndpointRole::Source)?;
        let t = input::require_endpoint(&graph.nodes, sink, EndpointRole::Sink)?;

        let mut network =
            FlowNetwork::from_edges(graph.vertex_count(), &graph.edges, self.config.duplicate_edges);
        let mut metrics = FlowMetrics::default();
        let mut flow_paths = Vec::new();
        let mut max_flow: Flow = 0.0;

        debug!("Ford-Fulkerson from `{}` to `{}`", source, sink);

        if s != t {
            while let Some(path) = network.find_augmenting_path(s, t, &mut metrics.nodes_explored) {
                if let Some(limit) = self.config.max_augmentations {
                    if metrics.augmentations >= limit {
                        return Err(AlgorithmError::ResourceExhausted(format!(
                            "augmenting path limit of {} reached",
                            limit
                        )));
                    }
                }

                let bottleneck = network.bottleneck(&path);
                network.augment(&path, bottleneck);
                max_flow += bottleneck;
                metrics.augmentations += 1;

                let names: Vec<String> = path
                    .iter()
                    .map(|&v| graph.nodes.name(v).to_string())
                    .collect();
                trace!("Augmented {} along {}", bottleneck, names.join(" -> "));
                flow_paths.push(FlowPath {
                    path: names,
                    flow: bottleneck,
                });
            }
        }

        let flow_per_edge: Vec<FlowEdge> = graph
            .edges
            .iter()
            .map(|edge| Self::edge_flow(&network, &graph.nodes, edge))
            .collect();

        let (min_cut, cut_edges) = if s == t {
            (Vec::new(), Vec::new())
        } else {
            let reachable = network.reachable_from(s);
            let min_cut = graph
                .nodes
                .ids()
                .filter(|v| reachable[v.as_usize()])
                .map(|v| graph.nodes.name(v).to_string())
                .collect();

            let mut seen = HashSet::new();
            let cut_edges = graph
                .edges
                .iter()
                .zip(&flow_per_edge)
                .filter(|(edge, _)| {
                    reachable[edge.source.as_usize()] && !reachable[edge.target.as_usize()]
                })
                .filter(|(edge, _)| seen.insert((edge.source, edge.target)))
                .map(|(_, flow)| flow.clone())
                .collect();
            (min_cut, cut_edges)
        };

        debug!(
            "Maximum flow {} after {} augmentations",
            max_flow, metrics.augmentations
        );

        Ok(MaxFlowResult {
            max_flow,
            flow_per_edge,
            flow_paths,
            min_cut,
            cut_edges,
            metrics,
        })
    }

    fn edge_flow(network: &FlowNetwork, nodes: &NodeIndex, edge: &ResolvedEdge) -> FlowEdge {
        let (capacity, flow) = if edge.is_self_loop() {
            (edge.weight, 0.0)
        } else {
            (
                network.seeded_capacity(edge.source, edge.target),
                network.net_flow(edge.source, edge.target),
            )
        };
        FlowEdge {
            source: nodes.name(edge.source).to_string(),
            target: nodes.name(edge.target).to_string(),
            capacity,
            flow,
        }
    }
}

impl Algorithm for MaxFlowSolver {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("ford_fulkerson")
    }

    fn name(&self) -> &'static str {
        "Ford-Fulkerson"
    }

    fn category(&self) -> &'static str {
        "max_flow"
    }

    fn description(&self) -> &'static str {
        "Maximum flow between a source and a sink over directed capacities, found by repeated depth-first augmentation of a residual network."
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity {
            time_complexity: "O(E * f)",
            space_complexity: "O(V + E)",
        }
    }

    fn config(&self) -> &SolverConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut SolverConfig {
        &mut self.config
    }
}
