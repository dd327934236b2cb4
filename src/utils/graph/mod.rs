//! Generic directed graph infrastructure.
//!
//! The call graph is stored in a [`DirectedGraph`] whose node payload is a method handle and
//! whose edge payload is the list of call sites that produced the edge. The graph itself knows
//! nothing about methods; it provides storage, adjacency in both directions, and the traversal
//! algorithms in [`algorithms`].
//!
//! # Key Components
//!
//! - [`NodeId`] - Strongly-typed node identifier
//! - [`EdgeId`] - Strongly-typed edge identifier
//! - [`DirectedGraph`] - Adjacency-list directed graph with typed node and edge data
//! - [`GraphBase`], [`Successors`], [`Predecessors`] - Traits the algorithms are written against
//! - [`algorithms`] - Breadth-first search, bounded layers, bounded path enumeration
//!
//! # Thread Safety
//!
//! All graph types are [`Send`] and [`Sync`] when their node and edge data types are. Graphs are
//! built on a single thread, then queried concurrently without locks.

pub mod algorithms;
mod directed;
mod edge;
mod node;
mod traits;

pub use directed::DirectedGraph;
pub use edge::EdgeId;
pub use node::NodeId;
pub use traits::{GraphBase, Predecessors, Successors};
