//! Text formats accepted on the command line
//!
//! Nodes are a comma-separated list. Edges are one per line as
//! `source target value`, whitespace separated.

use aqueduct_core::{Edge, Weight};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("line {line}: expected `source target value`, found {found} field(s)")]
    FieldCount { line: usize, found: usize },

    #[error("line {line}: `{value}` is not a number")]
    InvalidValue { line: usize, value: String },
}

/// Splits on commas, trims each entry, and drops the empty ones
pub fn parse_nodes(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|node| !node.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses edge lines; blank lines are skipped and line numbers are 1-based
pub fn parse_edges(input: &str) -> Result<Vec<Edge>, ParseError> {
    let mut edges = Vec::new();
    for (i, raw) in input.lines().enumerate() {
        let line = i + 1;
        let fields: Vec<&str> = raw.split_whitespace().collect();
        match fields.as_slice() {
            [] => continue,
            [source, target, value] => {
                let weight = value
                    .parse::<Weight>()
                    .ok()
                    .filter(|w| w.is_finite())
                    .ok_or_else(|| ParseError::InvalidValue {
                        line,
                        value: value.to_string(),
                    })?;
                edges.push(Edge::new(*source, *target, weight));
            }
            _ => {
                return Err(ParseError::FieldCount {
                    line,
                    found: fields.len(),
                })
            }
        }
    }
    Ok(edges)
}

/// Built-in data set for one algorithm
#[derive(Debug, Clone, Copy)]
pub struct Example {
    pub nodes: &'static str,
    pub edges: &'static str,
}

pub const FLOW_EXAMPLE: Example = Example {
    nodes: "A,B,C,D,E,F",
    edges: "A B 10\nA C 8\nB C 2\nB D 4\nB E 8\nC E 9\nD F 10\nE F 10",
};

pub const TREE_EXAMPLE: Example = Example {
    nodes: "A,B,C,D,E",
    edges: "A B 4\nA C 8\nB C 3\nB D 5\nC D 2\nC E 7\nD E 6",
};

pub const PATH_EXAMPLE: Example = Example {
    nodes: "1,2,3,4,5,6",
    edges: "1 2 7\n1 3 9\n1 6 14\n2 3 10\n2 4 15\n3 4 11\n3 6 2\n4 5 6\n5 6 9",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nodes_are_trimmed_and_empties_dropped() {
        assert_eq!(parse_nodes(" A, B ,,C,"), vec!["A", "B", "C"]);
        assert!(parse_nodes("  ").is_empty());
    }

    #[test]
    fn edges_skip_blank_lines() {
        let edges = parse_edges("A B 10\n\n  \nB C 2.5\n").unwrap();
        assert_eq!(
            edges,
            vec![Edge::new("A", "B", 10.0), Edge::new("B", "C", 2.5)]
        );
    }

    #[test]
    fn edge_errors_name_the_line() {
        assert_eq!(
            parse_edges("A B 1\nA C").unwrap_err(),
            ParseError::FieldCount { line: 2, found: 2 }
        );
        assert_eq!(
            parse_edges("A B ten").unwrap_err(),
            ParseError::InvalidValue {
                line: 1,
                value: "ten".to_string()
            }
        );
        assert!(parse_edges("A B 1 2").is_err());
        assert!(parse_edges("A B inf").is_err());
    }

    #[test]
    fn examples_parse() {
        for example in [FLOW_EXAMPLE, TREE_EXAMPLE, PATH_EXAMPLE] {
            assert!(!parse_nodes(example.nodes).is_empty());
            assert!(parse_edges(example.edges).is_ok());
        }
    }
}
