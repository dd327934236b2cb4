use thiserror::Error;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Project loading, hierarchy queries and call graph construction all report their failures
/// through this type. Hierarchy failures are wrapped in [`Error::Hierarchy`] so that callers can
/// still distinguish a contract violation (wrong entity kind) from an unresolved dispatch.
///
/// # Error Categories
///
/// ## Project Model Errors
/// - [`Error::DuplicateClass`] - Two classes share a fully-qualified name
/// - [`Error::DuplicateMethod`] - Two methods share a `(class, name, parameters)` identity
/// - [`Error::UnknownEnclosingClass`] - A method was declared for a class that does not exist
///
/// ## Analysis Errors
/// - [`Error::Hierarchy`] - A hierarchy query failed, see [`HierarchyError`]
/// - [`Error::GraphError`] - Graph structure misuse (invalid node or edge handle)
///
/// # Examples
///
/// ```rust
/// use callscope::{Error, HierarchyError};
///
/// fn describe(err: &Error) -> &'static str {
///     match err {
///         Error::Hierarchy(HierarchyError::NoConcreteDispatch { .. }) => "unresolved dispatch",
///         Error::Hierarchy(_) => "hierarchy contract violation",
///         _ => "other",
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A class with the same fully-qualified name was already loaded.
    ///
    /// Class names are the identity of a class inside a project, duplicates would make
    /// every name based cross reference ambiguous.
    #[error("Duplicate class definition - {0}")]
    DuplicateClass(String),
    /// A method with the same `(class, name, parameters)` triple was already loaded.
    #[error("Duplicate method definition - {0}")]
    DuplicateMethod(String),
    /// A method body references an enclosing class that is not part of the project.
    #[error("Enclosing class of method is not part of the project - {0}")]
    UnknownEnclosingClass(String),
    /// A hierarchy query failed.
    ///
    /// Only the wrong-entity-kind variants are expected to surface here during call graph
    /// construction; unresolved dispatch is absorbed by the builder.
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
    /// Graph structure error.
    ///
    /// Raised when an operation references a node or edge that does not exist in the
    /// underlying directed graph.
    #[error("{0}")]
    GraphError(String),
}

/// Errors raised by [`Hierarchy`](crate::analysis::Hierarchy) queries.
///
/// `NotAClass` and `NotAnInterface` signal that a query was applied to the wrong kind of entity;
/// they are programming-contract violations and propagate to the caller. `NoConcreteDispatch` is
/// the expected outcome of resolving calls whose implementation lives outside the project and is
/// recovered from during call graph construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    /// The query requires a class but was given an interface.
    #[error("{0} is an interface, class needed")]
    NotAClass(String),
    /// The query requires an interface but was given a class.
    #[error("{0} is not an interface")]
    NotAnInterface(String),
    /// The class handle does not belong to the analysed project.
    #[error("Unknown class handle - {0}")]
    UnknownClass(usize),
    /// The method handle does not belong to the analysed project.
    #[error("Unknown method handle - {0}")]
    UnknownMethod(usize),
    /// No ancestor of the receiver provides a matching, visible implementation.
    #[error("Could not resolve concrete dispatch of {method} on {class}")]
    NoConcreteDispatch {
        /// Receiver class the lookup started from
        class: String,
        /// Signature of the requested method
        method: String,
    },
}

impl HierarchyError {
    /// Returns `true` for the recoverable [`HierarchyError::NoConcreteDispatch`] variant.
    #[must_use]
    pub const fn is_no_concrete_dispatch(&self) -> bool {
        matches!(self, Self::NoConcreteDispatch { .. })
    }
}
