//! Trait definitions for graph abstractions.
//!
//! The traversal algorithms in [`algorithms`](crate::utils::graph::algorithms) are written
//! against these traits rather than against [`DirectedGraph`](crate::utils::graph::DirectedGraph)
//! directly, so that call graph queries can run the same code in either edge direction.
//!
//! - [`GraphBase`] - node count and node iteration
//! - [`Successors`] - forward edge traversal
//! - [`Predecessors`] - backward edge traversal

use crate::utils::graph::NodeId;

/// Base trait providing core graph properties.
pub trait GraphBase {
    /// Returns the number of nodes in the graph.
    fn node_count(&self) -> usize;

    /// Returns an iterator over all node identifiers in the graph, in insertion order.
    fn node_ids(&self) -> impl Iterator<Item = NodeId>;
}

/// Trait for graphs that support forward edge traversal.
///
/// For a directed edge `(u, v)`, node `v` is a successor of `u`.
pub trait Successors: GraphBase {
    /// Returns an iterator over the successor nodes of the given node.
    ///
    /// # Panics
    ///
    /// May panic if `node` is not a valid node in the graph.
    fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId>;
}

/// Trait for graphs that support backward edge traversal.
///
/// For a directed edge `(u, v)`, node `u` is a predecessor of `v`. In a call graph the
/// predecessors of a method are its callers.
pub trait Predecessors: GraphBase {
    /// Returns an iterator over the predecessor nodes of the given node.
    ///
    /// # Panics
    ///
    /// May panic if `node` is not a valid node in the graph.
    fn predecessors(&self, node: NodeId) -> impl Iterator<Item = NodeId>;
}
