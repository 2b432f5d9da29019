//! Network flow and spanning tree algorithms
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod max_flow;
pub mod mst;

pub use self::max_flow::{FlowEdge, FlowNetwork, MaxFlowResult, MaxFlowSolver};
pub use self::mst::{MinimumSpanningTreeSolver, MstResult, SpanningStatus};
