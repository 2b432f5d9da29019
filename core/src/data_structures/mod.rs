//! Graph data structures

pub mod graph;

pub use self::graph::{Edge, EdgeRecord, GraphBuilder, NodeIndex, Weight};
