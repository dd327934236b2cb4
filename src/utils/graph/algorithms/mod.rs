//! Graph algorithms used by the analyses.
//!
//! # Available Algorithms
//!
//! | Algorithm | Complexity | Use Case |
//! |-----------|------------|----------|
//! | [`bfs`] | O(V + E) | Forward or backward reachability |
//! | [`bfs_within`] | O(V + E) | Reachability bounded by a number of layers |
//! | [`simple_paths`] | exponential in the hop bound | Enumerating caller chains |
//!
//! Every algorithm is generic over [`Successors`](crate::utils::graph::Successors). Wrap a graph
//! in [`Reversed`] to walk it against the edge direction.
//!
//! # Examples
//!
//! ```rust
//! use callscope::graph::{algorithms, DirectedGraph};
//!
//! let mut graph: DirectedGraph<&str, ()> = DirectedGraph::new();
//! let a = graph.add_node("A");
//! let b = graph.add_node("B");
//! let c = graph.add_node("C");
//! graph.add_edge(a, b, ())?;
//! graph.add_edge(b, c, ())?;
//!
//! assert_eq!(algorithms::bfs_within(&graph, a, 1), vec![a, b]);
//! assert_eq!(algorithms::simple_paths(&graph, a, 5), vec![vec![a, b, c]]);
//! # Ok::<(), callscope::Error>(())
//! ```

mod traversal;

pub use traversal::{bfs, bfs_within, simple_paths, BfsIterator, Reversed};
