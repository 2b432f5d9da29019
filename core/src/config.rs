//! Solver configuration
//!
//! A single typed configuration shared by the three solvers. It can be built
//! in code, deserialized from JSON, or adjusted one string-typed parameter at
//! a time through [`Algorithm::set_parameter`](crate::algorithm::Algorithm::set_parameter).

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::AlgorithmError;
use crate::data_structures::graph::Weight;

/// Upper bound on Ford-Fulkerson augmentations unless configured otherwise
pub const DEFAULT_MAX_AUGMENTATIONS: usize = 1_000_000;

/// How two input edges naming the same ordered pair are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateEdgePolicy {
    /// The later edge overwrites the earlier one
    #[default]
    LastWins,
    /// Weights of parallel edges are added together
    Sum,
}

impl DuplicateEdgePolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LastWins => "last_wins",
            Self::Sum => "sum",
        }
    }

    /// Value stored for a pair that already holds `existing`
    #[inline]
    pub fn combine(self, existing: Option<Weight>, incoming: Weight) -> Weight {
        match (self, existing) {
            (Self::Sum, Some(current)) => current + incoming,
            _ => incoming,
        }
    }
}

impl FromStr for DuplicateEdgePolicy {
    type Err = AlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last_wins" | "last-wins" => Ok(Self::LastWins),
            "sum" => Ok(Self::Sum),
            other => Err(AlgorithmError::InvalidParameter {
                name: "duplicate_edges".to_string(),
                reason: format!("unknown policy `{other}`; valid options: last_wins, sum"),
            }),
        }
    }
}

impl fmt::Display for DuplicateEdgePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happens to edges whose endpoints were never declared as nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndeclaredNodePolicy {
    /// Fail validation with `AlgorithmError::UndeclaredNode`
    #[default]
    Reject,
    /// Append the endpoint as an implicit vertex after the declared ones
    Admit,
}

impl UndeclaredNodePolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Admit => "admit",
        }
    }
}

impl FromStr for UndeclaredNodePolicy {
    type Err = AlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "admit" => Ok(Self::Admit),
            other => Err(AlgorithmError::InvalidParameter {
                name: "undeclared_nodes".to_string(),
                reason: format!("unknown policy `{other}`; valid options: reject, admit"),
            }),
        }
    }
}

impl fmt::Display for UndeclaredNodePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration shared by every solver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Maximum number of augmenting paths; `None` means unbounded
    pub max_augmentations: Option<usize>,
    /// Combination rule for repeated (source, target) pairs
    pub duplicate_edges: DuplicateEdgePolicy,
    /// Treatment of edge endpoints missing from the node list
    pub undeclared_nodes: UndeclaredNodePolicy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_augmentations: Some(DEFAULT_MAX_AUGMENTATIONS),
            duplicate_edges: DuplicateEdgePolicy::default(),
            undeclared_nodes: UndeclaredNodePolicy::default(),
        }
    }
}

impl SolverConfig {
    pub const PARAMETERS: [&'static str; 3] =
        ["max_augmentations", "duplicate_edges", "undeclared_nodes"];

    pub fn with_max_augmentations(mut self, limit: Option<usize>) -> Self {
        self.max_augmentations = limit;
        self
    }

    pub fn with_duplicate_edges(mut self, policy: DuplicateEdgePolicy) -> Self {
        self.duplicate_edges = policy;
        self
    }

    pub fn with_undeclared_nodes(mut self, policy: UndeclaredNodePolicy) -> Self {
        self.undeclared_nodes = policy;
        self
    }

    /// Sets a parameter from its string form
    pub fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        match name {
            "max_augmentations" => {
                self.max_augmentations = match value.trim() {
                    "none" | "unbounded" => None,
                    raw => {
                        let limit = raw.parse::<usize>().map_err(|_| {
                            AlgorithmError::InvalidParameter {
                                name: name.to_string(),
                                reason: "must be a positive integer or `none`".to_string(),
                            }
                        })?;
                        if limit == 0 {
                            return Err(AlgorithmError::InvalidParameter {
                                name: name.to_string(),
                                reason: "must be greater than zero".to_string(),
                            });
                        }
                        Some(limit)
                    }
                };
                Ok(())
            }
            "duplicate_edges" => {
                self.duplicate_edges = value.parse()?;
                Ok(())
            }
            "undeclared_nodes" => {
                self.undeclared_nodes = value.parse()?;
                Ok(())
            }
            _ => Err(AlgorithmError::InvalidParameter {
                name: name.to_string(),
                reason: format!(
                    "unknown parameter; valid parameters: {}",
                    Self::PARAMETERS.join(", ")
                ),
            }),
        }
    }

    pub fn get_parameter(&self, name: &str) -> Option<String> {
        match name {
            "max_augmentations" => Some(match self.max_augmentations {
                Some(limit) => limit.to_string(),
                None => "none".to_string(),
            }),
            "duplicate_edges" => Some(self.duplicate_edges.to_string()),
            "undeclared_nodes" => Some(self.undeclared_nodes.to_string()),
            _ => None,
        }
    }

    pub fn to_parameters(&self) -> HashMap<String, String> {
        Self::PARAMETERS
            .iter()
            .filter_map(|name| Some((name.to_string(), self.get_parameter(name)?)))
            .collect()
    }
}
