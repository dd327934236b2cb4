//! Node identifier for directed graphs.
//!
//! [`NodeId`] is the dense index a [`DirectedGraph`](crate::utils::graph::DirectedGraph) assigns
//! to every node it stores. Domain handles (such as a method handle in the call graph) are mapped
//! to node ids by the owner of the graph, never by the graph itself.

use std::fmt;

/// A strongly-typed identifier for nodes within a directed graph.
///
/// Node ids are assigned sequentially from 0 by
/// [`DirectedGraph::add_node`](crate::utils::graph::DirectedGraph::add_node), which makes them
/// suitable as indices into per-node side tables such as visited bitmaps.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Creates a new `NodeId` from a raw index value.
    ///
    /// Intended for internal use and testing; ids obtained from a graph are always valid for
    /// that graph, hand-made ones are not.
    #[must_use]
    #[inline]
    pub const fn new(index: usize) -> Self {
        NodeId(index)
    }

    /// Returns the raw 0-based index of this node.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_node_id_index_roundtrip() {
        assert_eq!(NodeId::new(42).index(), 42);
        assert_eq!(NodeId::new(0).index(), 0);
    }

    #[test]
    fn test_node_id_ordering_and_hash() {
        let mut nodes = vec![NodeId::new(3), NodeId::new(1), NodeId::new(2)];
        nodes.sort();
        assert_eq!(nodes, vec![NodeId::new(1), NodeId::new(2), NodeId::new(3)]);

        let set: HashSet<NodeId> = [NodeId::new(1), NodeId::new(1), NodeId::new(2)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_node_id_formatting() {
        assert_eq!(format!("{:?}", NodeId::new(7)), "NodeId(7)");
        assert_eq!(format!("{}", NodeId::new(7)), "n7");
    }
}
