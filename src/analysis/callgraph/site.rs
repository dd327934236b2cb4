//! Call site representation and call target types.
//!
//! This module defines the types used to represent individual invocations and the outcome of
//! resolving them against the class hierarchy.

use crate::project::{BlockId, InvokeExpr, InvokeKind, MethodId};

/// A single invocation that contributed to a caller/callee edge.
///
/// The location is precise down to the statement: `block` and `statement` index into the
/// [`Project`](crate::project::Project) the graph was built from. An invocation resolved to
/// several targets contributes one `CallSite` to each resulting edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// The method containing the invocation
    pub caller: MethodId,
    /// The basic block containing the invocation
    pub block: BlockId,
    /// Index of the statement inside the block
    pub statement: usize,
    /// The invocation as written in the bytecode
    pub invoke: InvokeExpr,
}

impl CallSite {
    /// Returns the dispatch kind of the invocation.
    #[must_use]
    pub const fn kind(&self) -> InvokeKind {
        self.invoke.kind
    }

    /// Returns `true` if the invocation is resolved through abstract dispatch.
    ///
    /// Such call sites may appear on several edges, one per possible receiver implementation.
    #[must_use]
    pub const fn is_dynamic_dispatch(&self) -> bool {
        self.invoke.kind.is_dynamic_dispatch()
    }
}

/// Outcome of resolving one invocation during call graph construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallTarget {
    /// The referenced class is not part of the project; no edge is created.
    External,

    /// The referenced class is part of the project but declares no method with the referenced
    /// name and parameter signature; no edge is created.
    Missing,

    /// The hierarchy resolved the invocation to one or more project methods.
    Resolved(Vec<MethodId>),

    /// The hierarchy found no concrete implementation; the referenced method is used as the
    /// sole target.
    Unresolved(MethodId),
}

impl CallTarget {
    /// Returns the methods that receive an edge from the caller.
    ///
    /// Empty for [`CallTarget::External`] and [`CallTarget::Missing`].
    #[must_use]
    pub fn targets(&self) -> &[MethodId] {
        match self {
            CallTarget::External | CallTarget::Missing => &[],
            CallTarget::Resolved(targets) => targets,
            CallTarget::Unresolved(method) => std::slice::from_ref(method),
        }
    }

    /// Returns `true` if the hierarchy produced at least one target.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, CallTarget::Resolved(_))
    }

    /// Returns `true` if the invocation may reach more than one target.
    #[must_use]
    pub fn is_polymorphic(&self) -> bool {
        matches!(self, CallTarget::Resolved(targets) if targets.len() > 1)
    }
}
