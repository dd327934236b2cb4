//! Whole-program call graph construction and queries.
//!
//! The call graph is built by scanning every block of every method for invocation statements
//! and resolving their targets through the [`Hierarchy`](crate::analysis::Hierarchy). Virtual,
//! interface and dynamic invocations are resolved with Class Hierarchy Analysis, so a single
//! statement may produce edges to every override a receiver could reach.
//!
//! The implementation uses the generic graph infrastructure in [`crate::graph`], and the
//! caller-side queries run the standard traversals over a reversed view of the graph.
//!
//! # Components
//!
//! - [`CallGraph`]: The call graph with its forward and caller-side queries
//! - [`CallSite`]: A specific invocation statement that contributed to an edge
//! - [`CallTarget`]: The outcome of resolving one invocation
//! - [`CallGraphStats`]: Summary counters, including resolution warnings
//!
//! # Example
//!
//! ```rust,ignore
//! use callscope::analysis::{CallGraph, Hierarchy};
//!
//! let hierarchy = Hierarchy::new(&project);
//! let call_graph = CallGraph::build(&hierarchy)?;
//!
//! // Methods a given method calls
//! for callee in call_graph.next(method) {
//!     println!("Calls: {}", project.method(callee).unwrap());
//! }
//!
//! // Everything that reaches `method` within three caller hops
//! let affected = call_graph.get_call_func_set(method, 3);
//!
//! // Concrete caller chains, innermost first
//! for chain in call_graph.get_call_chain(method, 5) {
//!     println!("{chain:?}");
//! }
//! ```

mod graph;
mod site;

pub use graph::{CallGraph, CallGraphStats};
pub use site::{CallSite, CallTarget};
