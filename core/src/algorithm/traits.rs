//! Core algorithm trait definitions for Aqueduct
//!
//! This module establishes the shared vocabulary of the three solvers: the
//! dense node identifier used inside every algorithm, the error taxonomy
//! reported to callers, and the `Algorithm` trait through which solvers
//! expose their names and string-typed parameters.
//!
//! # Key Design Principles
//! - Validation failures are distinct, catchable error variants
//! - Algorithmic edge cases (disconnection, zero flow) are results, not errors
//! - Solvers hold configuration only, never per-call state
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;
use std::fmt::{self, Debug, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SolverConfig;
use crate::data_structures::graph::Weight;

/// Universal algorithm identifier for type-safe dispatch
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmId(String);

impl AlgorithmId {
    pub fn new(name: &str) -> Self {
        Self(name.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Dense vertex identifier assigned by `NodeIndex` in declaration order
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

/// Which endpoint of a request a validation failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointRole {
    Source,
    Sink,
    Target,
}

impl EndpointRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Sink => "sink",
            Self::Target => "target",
        }
    }
}

impl Display for EndpointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comprehensive error types for algorithm operations
///
/// Every variant except `ResourceExhausted` is a validation failure that is
/// detected before any algorithm work starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlgorithmError {
    #[error("node list is empty")]
    EmptyNodeList,

    #[error("node at position {position} has an empty identifier")]
    EmptyNodeId { position: usize },

    #[error("no {role} node was given")]
    MissingEndpoint { role: EndpointRole },

    #[error("{role} node `{node}` is not among the declared nodes")]
    UnknownEndpoint { role: EndpointRole, node: String },

    #[error("edge {edge} references undeclared node `{node}`")]
    UndeclaredNode { edge: usize, node: String },

    #[error("edge {edge} is malformed: {reason}")]
    MalformedEdge { edge: usize, reason: String },

    #[error("edge {edge} has invalid weight {weight}; weights must be finite and non-negative")]
    InvalidWeight { edge: usize, weight: Weight },

    #[error("edge {edge} carries none of cost, distance or capacity")]
    MissingWeight { edge: usize },

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),
}

impl AlgorithmError {
    /// Whether the caller can fix the failure by correcting its input
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::ResourceExhausted(_))
    }
}

/// Algorithm complexity information
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlgorithmComplexity {
    pub time_complexity: &'static str,
    pub space_complexity: &'static str,
}

/// Main algorithm trait
///
/// # Invariants
/// - Thread-safe execution
/// - State isolation between runs
/// - Deterministic behavior for given inputs
pub trait Algorithm: Debug + Send + Sync {
    /// Returns the algorithm's unique identifier
    fn id(&self) -> AlgorithmId;

    /// Returns the algorithm's descriptive name
    fn name(&self) -> &'static str;

    /// Returns the algorithm's category (e.g., max_flow, path_finding)
    fn category(&self) -> &'static str;

    /// Returns a short description of what the algorithm computes
    fn description(&self) -> &'static str;

    /// Returns the algorithm's asymptotic complexity in Big-O notation
    fn complexity(&self) -> AlgorithmComplexity;

    /// Configuration the solver runs with
    fn config(&self) -> &SolverConfig;

    fn config_mut(&mut self) -> &mut SolverConfig;

    /// Sets algorithm parameter with type validation
    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        self.config_mut().set_parameter(name, value)
    }

    /// Gets algorithm parameter value
    fn get_parameter(&self, name: &str) -> Option<String> {
        self.config().get_parameter(name)
    }

    /// All parameters rendered as strings
    fn get_parameters(&self) -> HashMap<String, String> {
        self.config().to_parameters()
    }
}
