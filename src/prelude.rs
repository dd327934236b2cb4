//! # callscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types from the
//! callscope library. Import it to get the project model, both analyses and their
//! configuration in one line.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all callscope operations
pub use crate::Error;

/// Errors raised by hierarchy queries
pub use crate::HierarchyError;

/// The result type used throughout callscope
pub use crate::Result;

// ================================================================================================
// Project Model
// ================================================================================================

/// Program entities and their handles
pub use crate::project::{
    Block, BlockId, Class, ClassId, InvokeExpr, InvokeKind, Method, MethodId, Modifiers, Project,
    Statement, Value, CONSTRUCTOR_NAME,
};

/// Builder used to assemble a project
pub use crate::project::{ClassDef, MethodDef, ProjectLoader};

// ================================================================================================
// Analysis
// ================================================================================================

/// Class Hierarchy Analysis
pub use crate::analysis::{Hierarchy, HierarchyResult};

/// Call graph and its building blocks
pub use crate::analysis::{CallGraph, CallGraphStats, CallSite, CallTarget};

/// Analysis configuration
pub use crate::analysis::{
    CallGraphConfig, DeferredInvocation, DispatchVisibility, HierarchyConfig,
};

// ================================================================================================
// Graph Infrastructure
// ================================================================================================

/// Generic graph types for custom traversals over the call graph
pub use crate::graph::{DirectedGraph, EdgeId, NodeId, Predecessors, Successors};
