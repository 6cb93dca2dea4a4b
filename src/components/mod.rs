//! UI components.

pub mod node_graph;
