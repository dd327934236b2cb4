//! Class hierarchy and call graph analysis over a loaded [`Project`](crate::project::Project).
//!
//! This module provides the two analyses of the crate. Both are built on top of the generic
//! graph infrastructure in [`crate::graph`] and the project model in [`crate::project`].
//!
//! # Architecture
//!
//! The analysis module is organized into focused sub-modules:
//!
//! - [`hierarchy`] - Class Hierarchy Analysis: relations, visibility and dispatch
//! - [`callgraph`] - Method-level call graph resolved through the hierarchy
//!
//! Construction order is strict: a [`Hierarchy`] borrows the project, and a [`CallGraph`] is
//! built from a hierarchy. The call graph owns its data once built.
//!
//! # Usage
//!
//! ```rust
//! use callscope::analysis::{CallGraph, CallGraphConfig, Hierarchy, HierarchyConfig};
//! use callscope::project::ProjectLoader;
//!
//! let project = ProjectLoader::new().build()?;
//! let hierarchy = Hierarchy::with_config(&project, HierarchyConfig::precise());
//! let graph = CallGraph::build_with_config(&hierarchy, CallGraphConfig::sequential())?;
//! assert_eq!(graph.method_count(), 0);
//! # Ok::<(), callscope::Error>(())
//! ```

pub mod callgraph;
mod config;
pub mod hierarchy;

// Re-export primary types at module level
pub use callgraph::{CallGraph, CallGraphStats, CallSite, CallTarget};
pub use config::{CallGraphConfig, DeferredInvocation, DispatchVisibility, HierarchyConfig};
pub use hierarchy::{Hierarchy, HierarchyResult};
