//! Fail-fast input validation
//!
//! All checks run before any solver work: a call either passes every check
//! here or returns the first `AlgorithmError` encountered, in input order.

use crate::algorithm::traits::{AlgorithmError, EndpointRole, NodeId};
use crate::config::UndeclaredNodePolicy;
use crate::data_structures::graph::{Edge, NodeIndex, ResolvedEdge, Weight};

/// The node list must not be empty
pub fn require_nodes<S: AsRef<str>>(nodes: &[S]) -> Result<(), AlgorithmError> {
    if nodes.is_empty() {
        return Err(AlgorithmError::EmptyNodeList);
    }
    Ok(())
}

/// Resolves a source, sink or target against the declared nodes
///
/// Implicit vertices admitted from edges do not qualify.
pub fn require_endpoint(
    index: &NodeIndex,
    name: &str,
    role: EndpointRole,
) -> Result<NodeId, AlgorithmError> {
    if name.trim().is_empty() {
        return Err(AlgorithmError::MissingEndpoint { role });
    }
    match index.get(name) {
        Some(id) if index.is_declared(id) => Ok(id),
        _ => Err(AlgorithmError::UnknownEndpoint {
            role,
            node: name.to_string(),
        }),
    }
}

/// Weights must be finite and non-negative
#[inline]
pub fn validate_weight(position: usize, weight: Weight) -> Result<Weight, AlgorithmError> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(weight)
    } else {
        Err(AlgorithmError::InvalidWeight {
            edge: position,
            weight,
        })
    }
}

/// Validates every edge and maps its endpoints onto `index`
pub fn resolve_edges(
    index: &mut NodeIndex,
    edges: &[Edge],
    policy: UndeclaredNodePolicy,
) -> Result<Vec<ResolvedEdge>, AlgorithmError> {
    let mut resolved = Vec::with_capacity(edges.len());

    for (position, edge) in edges.iter().enumerate() {
        if edge.source.trim().is_empty() || edge.target.trim().is_empty() {
            return Err(AlgorithmError::MalformedEdge {
                edge: position,
                reason: "source and target must both be named".to_string(),
            });
        }
        let weight = validate_weight(position, edge.weight)?;
        let source = resolve_endpoint(index, position, &edge.source, policy)?;
        let target = resolve_endpoint(index, position, &edge.target, policy)?;

        resolved.push(ResolvedEdge {
            position,
            source,
            target,
            weight,
        });
    }

    Ok(resolved)
}

fn resolve_endpoint(
    index: &mut NodeIndex,
    position: usize,
    name: &str,
    policy: UndeclaredNodePolicy,
) -> Result<NodeId, AlgorithmError> {
    if let Some(id) = index.get(name) {
        return Ok(id);
    }
    match policy {
        UndeclaredNodePolicy::Reject => Err(AlgorithmError::UndeclaredNode {
            edge: position,
            node: name.to_string(),
        }),
        UndeclaredNodePolicy::Admit => Ok(index.intern(name)),
    }
}
