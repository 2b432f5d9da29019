//! Graph representation shared by the solvers
//!
//! Callers describe a graph as an ordered list of string node identifiers
//! and an ordered list of weighted edges. Nothing here outlives a single
//! solver call: every invocation interns the identifiers into dense
//! [`NodeId`]s, validates and resolves the edges, and (for the undirected
//! solvers) derives an insertion-ordered adjacency map.
//!
//! # Ordering
//! Node ids follow declaration order, and neighbor maps follow edge order.
//! Every tie-break rule in the solvers is expressed in terms of these two
//! orders, which is what makes repeated calls produce identical results.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{AlgorithmError, NodeId};
use crate::config::{DuplicateEdgePolicy, SolverConfig, UndeclaredNodePolicy};
use crate::validation::input;

/// Numeric edge weight: capacity, cost or distance depending on the solver
pub type Weight = f64;

/// A weighted edge between two named nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub weight: Weight,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: Weight) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }
}

/// Edge as produced by form-style front ends, with a context-specific weight field
///
/// Exactly which of `cost`, `distance` or `capacity` is populated depends on
/// the algorithm the record was entered for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Weight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<Weight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<Weight>,
}

impl EdgeRecord {
    /// First present field among `cost`, `distance`, `capacity`
    ///
    /// Presence is what counts: a cost of exactly zero is returned as zero
    /// rather than falling through to the next field.
    pub fn resolve_weight(&self) -> Option<Weight> {
        self.cost.or(self.distance).or(self.capacity)
    }

    /// Converts the record at `position` in its list into an [`Edge`]
    pub fn into_edge(self, position: usize) -> Result<Edge, AlgorithmError> {
        let weight = self
            .resolve_weight()
            .ok_or(AlgorithmError::MissingWeight { edge: position })?;
        Ok(Edge {
            source: self.source,
            target: self.target,
            weight,
        })
    }
}

/// Converts a whole list of records, failing on the first one without a weight
pub fn edges_from_records(records: Vec<EdgeRecord>) -> Result<Vec<Edge>, AlgorithmError> {
    records
        .into_iter()
        .enumerate()
        .map(|(position, record)| record.into_edge(position))
        .collect()
}

/// Bidirectional mapping between node identifiers and dense ids
#[derive(Debug, Clone, Default)]
pub struct NodeIndex {
    names: Vec<String>,
    lookup: HashMap<String, NodeId>,
    declared: usize,
}

impl NodeIndex {
    /// Interns the declared nodes; repeated identifiers collapse onto their first occurrence
    pub fn from_declared<S: AsRef<str>>(nodes: &[S]) -> Result<Self, AlgorithmError> {
        let mut index = Self::default();
        for (position, node) in nodes.iter().enumerate() {
            let name = node.as_ref();
            if name.trim().is_empty() {
                return Err(AlgorithmError::EmptyNodeId { position });
            }
            index.intern(name);
        }
        index.declared = index.names.len();
        Ok(index)
    }

    /// Returns the id for `name`, allocating a new one if it is unknown
    pub fn intern(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.lookup.get(name) {
            return id;
        }
        let id = NodeId(self.names.len());
        self.names.push(name.to_string());
        self.lookup.insert(name.to_string(), id);
        id
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.lookup.get(name).copied()
    }

    #[inline]
    pub fn name(&self, id: NodeId) -> &str {
        &self.names[id.as_usize()]
    }

    /// Whether `id` came from the node list rather than from an edge
    #[inline]
    pub fn is_declared(&self, id: NodeId) -> bool {
        id.as_usize() < self.declared
    }

    /// Number of vertices, implicit ones included
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn declared_len(&self) -> usize {
        self.declared
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.names.len()).map(NodeId)
    }
}

/// A validated edge over interned endpoints
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedEdge {
    /// Position of the edge in the caller's list
    pub position: usize,
    pub source: NodeId,
    pub target: NodeId,
    pub weight: Weight,
}

impl ResolvedEdge {
    #[inline]
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// Validated nodes and edges of one solver call
#[derive(Debug, Clone)]
pub struct IndexedGraph {
    pub nodes: NodeIndex,
    pub edges: Vec<ResolvedEdge>,
}

impl IndexedGraph {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.nodes.len()
    }

    /// Undirected adjacency in which every edge contributes both directions
    pub fn adjacency(&self, policy: DuplicateEdgePolicy) -> AdjacencyMap {
        let mut adjacency = AdjacencyMap::with_vertices(self.vertex_count());
        for edge in &self.edges {
            adjacency.connect(edge.source, edge.target, edge.weight, policy);
        }
        adjacency
    }
}

/// Node → (neighbor → weight), neighbors kept in insertion order
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyMap {
    neighbors: Vec<IndexMap<NodeId, Weight>>,
}

impl AdjacencyMap {
    /// Every vertex starts with an empty neighbor map, isolated ones included
    pub fn with_vertices(vertex_count: usize) -> Self {
        Self {
            neighbors: vec![IndexMap::new(); vertex_count],
        }
    }

    /// Records an undirected edge in both directions
    pub fn connect(&mut self, u: NodeId, v: NodeId, weight: Weight, policy: DuplicateEdgePolicy) {
        self.insert_arc(u, v, weight, policy);
        if u != v {
            self.insert_arc(v, u, weight, policy);
        }
    }

    fn insert_arc(&mut self, from: NodeId, to: NodeId, weight: Weight, policy: DuplicateEdgePolicy) {
        let slot = &mut self.neighbors[from.as_usize()];
        let combined = policy.combine(slot.get(&to).copied(), weight);
        slot.insert(to, combined);
    }

    pub fn neighbors(&self, u: NodeId) -> impl Iterator<Item = (NodeId, Weight)> + '_ {
        self.neighbors[u.as_usize()]
            .iter()
            .map(|(&v, &weight)| (v, weight))
    }

    pub fn weight(&self, u: NodeId, v: NodeId) -> Option<Weight> {
        self.neighbors[u.as_usize()].get(&v).copied()
    }

    pub fn degree(&self, u: NodeId) -> usize {
        self.neighbors[u.as_usize()].len()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.neighbors.len()
    }
}

/// Indexed graph together with its undirected adjacency
#[derive(Debug, Clone)]
pub struct UndirectedGraph {
    pub graph: IndexedGraph,
    pub adjacency: AdjacencyMap,
}

/// Turns caller-supplied node and edge lists into solver-ready structures
#[derive(Debug, Clone, Copy)]
pub struct GraphBuilder<'a> {
    config: &'a SolverConfig,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(config: &'a SolverConfig) -> Self {
        Self { config }
    }

    /// Interns nodes and validates every edge, without building adjacency
    pub fn index<S: AsRef<str>>(
        &self,
        nodes: &[S],
        edges: &[Edge],
    ) -> Result<IndexedGraph, AlgorithmError> {
        let mut index = NodeIndex::from_declared(nodes)?;
        let resolved = input::resolve_edges(&mut index, edges, self.config.undeclared_nodes)?;

        let implicit = index.len() - index.declared_len();
        if implicit > 0 {
            debug_assert_eq!(self.config.undeclared_nodes, UndeclaredNodePolicy::Admit);
            warn!(
                "Admitted {} undeclared node(s) referenced only by edges",
                implicit
            );
        }
        debug!(
            "Indexed graph with {} vertices and {} edges",
            index.len(),
            resolved.len()
        );

        Ok(IndexedGraph {
            nodes: index,
            edges: resolved,
        })
    }

    /// Full undirected build used by the spanning tree and shortest path solvers
    pub fn build<S: AsRef<str>>(
        &self,
        nodes: &[S],
        edges: &[Edge],
    ) -> Result<UndirectedGraph, AlgorithmError> {
        let graph = self.index(nodes, edges)?;
        let adjacency = graph.adjacency(self.config.duplicate_edges);
        Ok(UndirectedGraph { graph, adjacency })
    }
}
