//! Configuration for hierarchy and call graph construction
//!
//! Both analyses run with sensible defaults; the configuration types exist for the cases where
//! a caller needs to teach the hierarchy about another callback framework, wants the stricter
//! visibility check during concrete dispatch, or needs a deterministic single-threaded build.

/// Maps an interface to the method the runtime eventually invokes on its implementers.
///
/// Constructing an instance of a class that implements `interface` is treated as a call to the
/// class's `entry_method`. This models callback frameworks where registering an object leads to
/// a later invocation that the bytecode never spells out.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeferredInvocation {
    /// Fully-qualified interface name, matched literally against declared interface names
    pub interface: String,
    /// Simple name of the method invoked on implementers
    pub entry_method: String,
}

impl DeferredInvocation {
    /// Creates a new table row.
    pub fn new(interface: impl Into<String>, entry_method: impl Into<String>) -> Self {
        DeferredInvocation {
            interface: interface.into(),
            entry_method: entry_method.into(),
        }
    }

    /// The built-in table: thread and HTTP callbacks, plus reactive subscriptions.
    #[must_use]
    pub fn defaults() -> Vec<DeferredInvocation> {
        vec![
            DeferredInvocation::new("java.lang.Runnable", "run"),
            DeferredInvocation::new("okhttp3.Callback", "run"),
            DeferredInvocation::new("io.reactivex.SingleOnSubscribe", "subscribe"),
            DeferredInvocation::new("io.reactivex.ObservableOnSubscribe", "subscribe"),
        ]
    }
}

/// Whose visibility concrete dispatch checks when it finds a matching declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchVisibility {
    /// The requested method must be visible from the ancestor that declares the match.
    #[default]
    RequestedMethod,
    /// The matching declaration must be visible from the receiver class.
    CandidateMethod,
}

/// Configuration for [`Hierarchy`](crate::analysis::Hierarchy) construction and dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyConfig {
    /// Ordered table of callback interfaces; the first matching row wins
    pub deferred_invocations: Vec<DeferredInvocation>,

    /// Visibility rule applied while walking ancestors during concrete dispatch
    pub dispatch_visibility: DispatchVisibility,

    /// Register interfaces as sub-interfaces of the project interfaces they extend.
    /// When disabled, every interface only reaches its own implementers.
    pub model_interface_extension: bool,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            deferred_invocations: DeferredInvocation::defaults(),
            dispatch_visibility: DispatchVisibility::RequestedMethod,
            model_interface_extension: false,
        }
    }
}

impl HierarchyConfig {
    /// Creates a configuration with the stricter dispatch semantics
    ///
    /// Concrete dispatch checks the visibility of the matching declaration from the receiver,
    /// and interface extension is modelled so that calls through a super-interface reach the
    /// implementers of its sub-interfaces.
    #[must_use]
    pub fn precise() -> Self {
        Self {
            deferred_invocations: DeferredInvocation::defaults(),
            dispatch_visibility: DispatchVisibility::CandidateMethod,
            model_interface_extension: true,
        }
    }

    /// Creates a configuration that does not recognise any callback interface
    #[must_use]
    pub fn without_deferred_invocations() -> Self {
        Self {
            deferred_invocations: Vec::new(),
            ..Self::default()
        }
    }

    /// Appends a row to the deferred-invocation table
    #[must_use]
    pub fn with_deferred_invocation(
        mut self,
        interface: impl Into<String>,
        entry_method: impl Into<String>,
    ) -> Self {
        self.deferred_invocations
            .push(DeferredInvocation::new(interface, entry_method));
        self
    }

    /// Sets the visibility rule used by concrete dispatch
    #[must_use]
    pub fn with_dispatch_visibility(mut self, visibility: DispatchVisibility) -> Self {
        self.dispatch_visibility = visibility;
        self
    }

    /// Enables or disables modelling of interface extension
    #[must_use]
    pub fn with_interface_extension(mut self, enabled: bool) -> Self {
        self.model_interface_extension = enabled;
        self
    }
}

/// Configuration for [`CallGraph`](crate::analysis::CallGraph) construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallGraphConfig {
    /// Resolve call sites of different blocks on the rayon thread pool.
    /// The resulting graph is identical to a sequential build.
    pub parallel: bool,

    /// Enable caller-chain enumeration through `get_call_chain`.
    /// When disabled, the query returns no chains; caller sets and `prev` are unaffected.
    pub index_callers: bool,
}

impl Default for CallGraphConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            index_callers: true,
        }
    }
}

impl CallGraphConfig {
    /// Creates a configuration that resolves every call site on the calling thread
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Creates the minimal configuration: sequential build, caller chains disabled
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            parallel: false,
            index_callers: false,
        }
    }
}
