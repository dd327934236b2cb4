//! Graph traversal algorithms.
//!
//! Breadth-first traversal and bounded path enumeration over anything implementing
//! [`Successors`]. Caller-side queries of the call graph run the same algorithms over the
//! [`Reversed`] view, which swaps successor and predecessor edges.
//!
//! # Algorithms
//!
//! - [`bfs`] - Lazy breadth-first search iterator
//! - [`bfs_within`] - Breadth-first search bounded by a number of layers
//! - [`simple_paths`] - Depth-first enumeration of cycle-free paths bounded by a number of hops

use std::collections::VecDeque;

use crate::utils::graph::{GraphBase, NodeId, Predecessors, Successors};

/// A view of a graph with every edge reversed.
///
/// The successors of a node in the view are its predecessors in the wrapped graph. Wrapping is
/// free; no edge data is copied.
///
/// # Examples
///
/// ```rust
/// use callscope::graph::{algorithms::{bfs, Reversed}, DirectedGraph};
///
/// let mut graph: DirectedGraph<(), ()> = DirectedGraph::new();
/// let a = graph.add_node(());
/// let b = graph.add_node(());
/// graph.add_edge(a, b, ())?;
///
/// let upstream: Vec<_> = bfs(&Reversed(&graph), b).collect();
/// assert_eq!(upstream, vec![b, a]);
/// # Ok::<(), callscope::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Reversed<'g, G>(pub &'g G);

impl<G: GraphBase> GraphBase for Reversed<'_, G> {
    fn node_count(&self) -> usize {
        self.0.node_count()
    }

    fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        self.0.node_ids()
    }
}

impl<G: Predecessors> Successors for Reversed<'_, G> {
    fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> {
        self.0.predecessors(node)
    }
}

impl<G: Successors> Predecessors for Reversed<'_, G> {
    fn predecessors(&self, node: NodeId) -> impl Iterator<Item = NodeId> {
        self.0.successors(node)
    }
}

/// Breadth-first search iterator over graph nodes.
///
/// Visits every node reachable from the start node exactly once, nearest first. Successors
/// are enqueued in the order the graph reports them.
pub struct BfsIterator<'g, G: Successors> {
    graph: &'g G,
    queue: VecDeque<NodeId>,
    visited: Vec<bool>,
}

impl<'g, G: Successors> BfsIterator<'g, G> {
    fn new(graph: &'g G, start: NodeId) -> Self {
        let node_count = graph.node_count();
        let mut visited = vec![false; node_count];
        let mut queue = VecDeque::new();
        if start.index() < node_count {
            visited[start.index()] = true;
            queue.push_back(start);
        }

        BfsIterator {
            graph,
            queue,
            visited,
        }
    }
}

impl<G: Successors> Iterator for BfsIterator<'_, G> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        for succ in self.graph.successors(node) {
            if !self.visited[succ.index()] {
                self.visited[succ.index()] = true;
                self.queue.push_back(succ);
            }
        }
        Some(node)
    }
}

/// Returns a breadth-first search iterator starting from the given node.
///
/// The start node is yielded first. An out-of-range start node yields nothing.
///
/// # Arguments
///
/// * `graph` - The graph to traverse
/// * `start` - The starting node for traversal
///
/// # Complexity
///
/// - Time: O(V + E)
/// - Space: O(V)
pub fn bfs<G: Successors>(graph: &G, start: NodeId) -> BfsIterator<'_, G> {
    BfsIterator::new(graph, start)
}

/// Collects every node reachable from `start` in at most `max_depth` edges.
///
/// Layer 0 is `start` itself, so `max_depth == 0` returns `[start]`. Nodes are returned in
/// breadth-first discovery order and each node appears once, at the first layer it is reached.
/// Because a node's membership only depends on its distance from `start`, the result for a
/// larger `max_depth` is always a superset of the result for a smaller one.
///
/// # Arguments
///
/// * `graph` - The graph to traverse
/// * `start` - The node at layer 0
/// * `max_depth` - Last layer to include
///
/// # Returns
///
/// The reached nodes, or an empty vector if `start` is not part of the graph.
pub fn bfs_within<G: Successors>(graph: &G, start: NodeId, max_depth: usize) -> Vec<NodeId> {
    let node_count = graph.node_count();
    if start.index() >= node_count {
        return Vec::new();
    }

    let mut visited = vec![false; node_count];
    visited[start.index()] = true;
    let mut reached = vec![start];
    let mut frontier = vec![start];

    for _ in 0..max_depth {
        let mut next = Vec::new();
        for &node in &frontier {
            for succ in graph.successors(node) {
                if !visited[succ.index()] {
                    visited[succ.index()] = true;
                    next.push(succ);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        reached.extend_from_slice(&next);
        frontier = next;
    }

    reached
}

/// Enumerates cycle-free paths starting at `start`, depth first.
///
/// A path is extended with every successor of its last node that does not already occur in
/// the path. A path is emitted when it already spans `max_hops` edges, or when its last node
/// has no successors at all. A path whose last node only leads back into the path is
/// discarded.
///
/// Paths are emitted in depth-first pre-order, following successor order. Every emitted path
/// starts with `start` and holds at most `max_hops + 1` nodes.
///
/// # Arguments
///
/// * `graph` - The graph to traverse
/// * `start` - First node of every path
/// * `max_hops` - Maximum number of edges per path
///
/// # Returns
///
/// All bounded paths ending in a sink or at the hop bound, or an empty vector if `start` is
/// not part of the graph.
///
/// # Complexity
///
/// Exponential in `max_hops` for densely connected graphs; keep the bound small.
pub fn simple_paths<G: Successors>(graph: &G, start: NodeId, max_hops: usize) -> Vec<Vec<NodeId>> {
    if start.index() >= graph.node_count() {
        return Vec::new();
    }

    let mut paths = Vec::new();
    let mut stack = vec![vec![start]];

    while let Some(path) = stack.pop() {
        let Some(&last) = path.last() else {
            continue;
        };
        if path.len() > max_hops {
            paths.push(path);
            continue;
        }

        let mut has_successors = false;
        let mut extensions: Vec<NodeId> = Vec::new();
        for succ in graph.successors(last) {
            has_successors = true;
            if !path.contains(&succ) && !extensions.contains(&succ) {
                extensions.push(succ);
            }
        }

        if !has_successors {
            paths.push(path);
            continue;
        }

        // reversed so that the first successor is expanded first
        for succ in extensions.into_iter().rev() {
            let mut extended = path.clone();
            extended.push(succ);
            stack.push(extended);
        }
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::graph::DirectedGraph;

    /// Builds a graph from an edge list over `count` nodes.
    fn graph_from_edges(count: usize, edges: &[(usize, usize)]) -> DirectedGraph<(), ()> {
        let mut graph = DirectedGraph::new();
        for _ in 0..count {
            graph.add_node(());
        }
        for &(from, to) in edges {
            graph
                .add_edge(NodeId::new(from), NodeId::new(to), ())
                .unwrap();
        }
        graph
    }

    fn ids(raw: &[usize]) -> Vec<NodeId> {
        raw.iter().copied().map(NodeId::new).collect()
    }

    #[test]
    fn test_bfs_order() {
        // 0 -> 1, 0 -> 2, 1 -> 3, 2 -> 3
        let graph = graph_from_edges(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]);
        let order: Vec<_> = bfs(&graph, NodeId::new(0)).collect();
        assert_eq!(order, ids(&[0, 1, 2, 3]));
    }

    #[test]
    fn test_bfs_invalid_start() {
        let graph = graph_from_edges(2, &[(0, 1)]);
        assert_eq!(bfs(&graph, NodeId::new(9)).count(), 0);
    }

    #[test]
    fn test_reversed_view_swaps_directions() {
        let graph = graph_from_edges(3, &[(0, 1), (1, 2)]);
        let reversed = Reversed(&graph);
        assert_eq!(
            Successors::successors(&reversed, NodeId::new(1)).collect::<Vec<_>>(),
            ids(&[0])
        );
        assert_eq!(
            Predecessors::predecessors(&reversed, NodeId::new(1)).collect::<Vec<_>>(),
            ids(&[2])
        );
        assert_eq!(bfs(&reversed, NodeId::new(2)).collect::<Vec<_>>(), ids(&[2, 1, 0]));
    }

    #[test]
    fn test_bfs_within_layers() {
        // chain 0 -> 1 -> 2 -> 3
        let graph = graph_from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        let start = NodeId::new(0);

        assert_eq!(bfs_within(&graph, start, 0), ids(&[0]));
        assert_eq!(bfs_within(&graph, start, 1), ids(&[0, 1]));
        assert_eq!(bfs_within(&graph, start, 2), ids(&[0, 1, 2]));
        assert_eq!(bfs_within(&graph, start, 10), ids(&[0, 1, 2, 3]));
        assert!(bfs_within(&graph, NodeId::new(7), 3).is_empty());
    }

    #[test]
    fn test_bfs_within_monotonic_with_cycle() {
        // 0 -> 1 -> 2 -> 0, 2 -> 3
        let graph = graph_from_edges(4, &[(0, 1), (1, 2), (2, 0), (2, 3)]);
        let mut previous = Vec::new();
        for depth in 0..5 {
            let current = bfs_within(&graph, NodeId::new(0), depth);
            assert!(previous.iter().all(|n| current.contains(n)));
            previous = current;
        }
        assert_eq!(previous.len(), 4);
    }

    #[test]
    fn test_simple_paths_branching() {
        // 0 -> 1 -> 3, 0 -> 2
        let graph = graph_from_edges(4, &[(0, 1), (0, 2), (1, 3)]);
        let paths = simple_paths(&graph, NodeId::new(0), 5);
        assert_eq!(paths, vec![ids(&[0, 1, 3]), ids(&[0, 2])]);
    }

    #[test]
    fn test_simple_paths_respects_hop_bound() {
        let graph = graph_from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        assert_eq!(simple_paths(&graph, NodeId::new(0), 0), vec![ids(&[0])]);
        assert_eq!(simple_paths(&graph, NodeId::new(0), 2), vec![ids(&[0, 1, 2])]);
    }

    #[test]
    fn test_simple_paths_cycle_terminates() {
        // 0 -> 1 -> 2 -> 0 and a self loop on 1
        let graph = graph_from_edges(3, &[(0, 1), (1, 1), (1, 2), (2, 0)]);
        assert!(simple_paths(&graph, NodeId::new(0), 10).is_empty());
        assert_eq!(simple_paths(&graph, NodeId::new(0), 1), vec![ids(&[0, 1])]);
    }

    #[test]
    fn test_simple_paths_keep_exit_from_cycle() {
        // 0 <-> 1, 1 -> 2
        let graph = graph_from_edges(3, &[(0, 1), (1, 0), (1, 2)]);
        assert_eq!(simple_paths(&graph, NodeId::new(0), 10), vec![ids(&[0, 1, 2])]);
        assert!(simple_paths(&graph, NodeId::new(1), 10)
            .iter()
            .all(|path| path.last() == Some(&NodeId::new(2))));
    }

    #[test]
    fn test_simple_paths_invalid_start() {
        let graph = graph_from_edges(1, &[]);
        assert!(simple_paths(&graph, NodeId::new(3), 2).is_empty());
    }
}
