//! Call graph construction and queries.
//!
//! This module provides [`CallGraph`], a method-level call graph built on top of the generic
//! [`DirectedGraph`] infrastructure and resolved through a [`Hierarchy`].

use std::sync::OnceLock;

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use strum::{EnumCount, IntoEnumIterator};
use tracing::{debug, warn};

use crate::{
    analysis::{
        callgraph::{CallSite, CallTarget},
        CallGraphConfig, Hierarchy,
    },
    project::{Block, BlockId, InvokeExpr, InvokeKind, MethodId, Project},
    utils::{
        dot::DotWriter,
        graph::{
            algorithms::{bfs, bfs_within, simple_paths, Reversed},
            DirectedGraph, EdgeId, NodeId,
        },
    },
    Error, Result,
};

/// Resolved invocations of one block, produced by the resolution phase.
struct BlockCalls<'p> {
    caller: MethodId,
    block: BlockId,
    calls: Vec<ResolvedCall<'p>>,
}

struct ResolvedCall<'p> {
    statement: usize,
    invoke: &'p InvokeExpr,
    target: CallTarget,
}

/// Warning and resolution counters collected while merging.
#[derive(Debug, Clone, Copy, Default)]
struct ResolutionCounters {
    invocations: usize,
    resolved: usize,
    polymorphic: usize,
    unresolved_dispatches: usize,
    external_calls: usize,
    missing_methods: usize,
}

/// Method-level call graph of a project.
///
/// Every method that encloses at least one block is a node, as is every method that is the
/// target of a resolved invocation. An edge `caller -> callee` exists when at least one
/// invocation inside `caller` resolves to `callee`; the edge carries every such [`CallSite`]
/// in block and statement order.
///
/// # Construction
///
/// [`CallGraph::build`] runs in two phases:
///
/// 1. **Resolution** - each block's invocations are resolved against the hierarchy. With
///    [`CallGraphConfig::parallel`] this runs on the rayon thread pool, one task per block.
/// 2. **Merge** - a single writer walks the per-block results in block order and creates nodes,
///    edges and call sites, so the resulting graph does not depend on scheduling.
///
/// Resolution rules per invocation:
///
/// - the referenced class is not part of the project: skipped silently
/// - the class exists but declares no matching method: warning, skipped
/// - dispatch fails with [`HierarchyError::NoConcreteDispatch`](crate::HierarchyError) or
///   yields no receivers: warning, the referenced method becomes the only target
/// - any other hierarchy error aborts the build
///
/// # Thread Safety
///
/// `CallGraph` owns its data and is [`Send`] and [`Sync`]. Lazily computed views use
/// [`OnceLock`].
///
/// # Examples
///
/// ```rust
/// use callscope::analysis::{CallGraph, Hierarchy};
/// use callscope::project::{ClassDef, InvokeExpr, InvokeKind, MethodDef, ProjectLoader, Statement};
///
/// let call = InvokeExpr::new(InvokeKind::Static, "app.Util", "helper", Vec::<String>::new());
/// let project = ProjectLoader::new()
///     .class(ClassDef::new("app.Main").method(MethodDef::new("main").block([Statement::Invoke(call)])))
///     .class(ClassDef::new("app.Util").method(MethodDef::new("helper").block([])))
///     .build()?;
///
/// let hierarchy = Hierarchy::new(&project);
/// let graph = CallGraph::build(&hierarchy)?;
///
/// let main = project.find_method("app.Main", "main", &[]).unwrap();
/// let helper = project.find_method("app.Util", "helper", &[]).unwrap();
/// assert_eq!(graph.next(main), vec![helper]);
/// assert_eq!(graph.get_call_sites(main, helper).len(), 1);
/// # Ok::<(), callscope::Error>(())
/// ```
pub struct CallGraph {
    /// Node data is the method, edge data the call sites of that caller/callee pair
    graph: DirectedGraph<MethodId, Vec<CallSite>>,
    method_to_node: FxHashMap<MethodId, NodeId>,
    config: CallGraphConfig,
    counters: ResolutionCounters,
    entry_points: OnceLock<Vec<MethodId>>,
}

impl CallGraph {
    /// Builds the call graph with the default [`CallGraphConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Hierarchy`] if a hierarchy query is applied to the wrong kind of entity.
    pub fn build(hierarchy: &Hierarchy<'_>) -> Result<Self> {
        Self::build_with_config(hierarchy, CallGraphConfig::default())
    }

    /// Builds the call graph with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Hierarchy`] if a hierarchy query is applied to the wrong kind of entity,
    /// or [`Error::GraphError`] if graph construction is inconsistent.
    pub fn build_with_config(hierarchy: &Hierarchy<'_>, config: CallGraphConfig) -> Result<Self> {
        let project = hierarchy.project();
        let blocks = project.block_slice();

        let resolved: Vec<BlockCalls<'_>> = if config.parallel {
            blocks
                .par_iter()
                .enumerate()
                .map(|(index, block)| resolve_block(hierarchy, BlockId::new(index), block))
                .collect::<Result<Vec<_>>>()?
        } else {
            blocks
                .iter()
                .enumerate()
                .map(|(index, block)| resolve_block(hierarchy, BlockId::new(index), block))
                .collect::<Result<Vec<_>>>()?
        };

        let mut callgraph = CallGraph {
            graph: DirectedGraph::with_capacity(project.method_count(), blocks.len()),
            method_to_node: FxHashMap::default(),
            config,
            counters: ResolutionCounters::default(),
            entry_points: OnceLock::new(),
        };
        let mut edge_index: FxHashMap<(NodeId, NodeId), EdgeId> = FxHashMap::default();

        for block_calls in resolved {
            let caller_node = callgraph.intern(block_calls.caller);

            for call in block_calls.calls {
                callgraph.count(&call.target);

                for &target in call.target.targets() {
                    let target_node = callgraph.intern(target);
                    let site = CallSite {
                        caller: block_calls.caller,
                        block: block_calls.block,
                        statement: call.statement,
                        invoke: call.invoke.clone(),
                    };

                    match edge_index.get(&(caller_node, target_node)) {
                        Some(&edge) => callgraph
                            .graph
                            .edge_mut(edge)
                            .ok_or_else(|| Error::GraphError(format!("Missing edge {edge}")))?
                            .push(site),
                        None => {
                            let edge =
                                callgraph.graph.add_edge(caller_node, target_node, vec![site])?;
                            edge_index.insert((caller_node, target_node), edge);
                        }
                    }
                }
            }
        }

        debug!(
            "Built call graph: {} methods, {} edges, {} invocations ({} unresolved, {} external)",
            callgraph.graph.node_count(),
            callgraph.graph.edge_count(),
            callgraph.counters.invocations,
            callgraph.counters.unresolved_dispatches,
            callgraph.counters.external_calls
        );

        Ok(callgraph)
    }

    fn intern(&mut self, method: MethodId) -> NodeId {
        if let Some(&node) = self.method_to_node.get(&method) {
            return node;
        }
        let node = self.graph.add_node(method);
        self.method_to_node.insert(method, node);
        node
    }

    fn count(&mut self, target: &CallTarget) {
        let counters = &mut self.counters;
        counters.invocations += 1;
        match target {
            CallTarget::External => counters.external_calls += 1,
            CallTarget::Missing => counters.missing_methods += 1,
            CallTarget::Unresolved(_) => counters.unresolved_dispatches += 1,
            CallTarget::Resolved(_) => {
                counters.resolved += 1;
                if target.is_polymorphic() {
                    counters.polymorphic += 1;
                }
            }
        }
    }

    fn node_of(&self, method: MethodId) -> Option<NodeId> {
        self.method_to_node.get(&method).copied()
    }

    fn method_at(&self, node: NodeId) -> Option<MethodId> {
        self.graph.node(node).copied()
    }

    fn to_methods(&self, nodes: impl IntoIterator<Item = NodeId>) -> Vec<MethodId> {
        nodes
            .into_iter()
            .filter_map(|node| self.method_at(node))
            .collect()
    }

    /// Returns the configuration the graph was built with.
    #[must_use]
    pub fn config(&self) -> CallGraphConfig {
        self.config
    }

    /// Returns the underlying directed graph.
    #[must_use]
    pub fn graph(&self) -> &DirectedGraph<MethodId, Vec<CallSite>> {
        &self.graph
    }

    /// Returns the number of methods in the graph.
    #[must_use]
    pub fn method_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of distinct caller/callee pairs.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns `true` if `method` is a node of the graph.
    #[must_use]
    pub fn contains(&self, method: MethodId) -> bool {
        self.method_to_node.contains_key(&method)
    }

    /// Iterates over all methods in node order.
    pub fn methods(&self) -> impl Iterator<Item = MethodId> + '_ {
        self.graph.nodes().map(|(_, &method)| method)
    }

    /// Returns the call sites inside `method` that resolve to `target`.
    ///
    /// Sites are ordered by block, then by statement. Empty if there is no such edge.
    #[must_use]
    pub fn get_call_sites(&self, method: MethodId, target: MethodId) -> &[CallSite] {
        let (Some(source), Some(dest)) = (self.node_of(method), self.node_of(target)) else {
            return &[];
        };
        self.graph
            .find_edge(source, dest)
            .and_then(|edge| self.graph.edge(edge))
            .map_or(&[], Vec::as_slice)
    }

    /// Returns the direct callees of `method`.
    #[must_use]
    pub fn next(&self, method: MethodId) -> Vec<MethodId> {
        match self.node_of(method) {
            Some(node) => self.to_methods(self.graph.successors(node)),
            None => Vec::new(),
        }
    }

    /// Returns the direct callers of `method`.
    #[must_use]
    pub fn prev(&self, method: MethodId) -> Vec<MethodId> {
        match self.node_of(method) {
            Some(node) => self.to_methods(self.graph.predecessors(node)),
            None => Vec::new(),
        }
    }

    /// Same as [`CallGraph::next`].
    #[must_use]
    pub fn callees(&self, method: MethodId) -> Vec<MethodId> {
        self.next(method)
    }

    /// Same as [`CallGraph::prev`].
    #[must_use]
    pub fn callers(&self, method: MethodId) -> Vec<MethodId> {
        self.prev(method)
    }

    /// Returns `method` and every method that reaches it in at most `depth` caller hops.
    ///
    /// Methods are returned once each, in breadth-first order starting with `method`. The
    /// result for a larger `depth` is a superset of the result for a smaller one. Empty if
    /// `method` is not part of the graph.
    #[must_use]
    pub fn get_call_func_set(&self, method: MethodId, depth: usize) -> Vec<MethodId> {
        match self.node_of(method) {
            Some(node) => self.to_methods(bfs_within(&Reversed(&self.graph), node, depth)),
            None => Vec::new(),
        }
    }

    /// Enumerates caller chains ending in `method`.
    ///
    /// Each chain is `[method, caller, caller-of-caller, ...]` with no repeated method. A chain
    /// is reported when it reaches `depth` caller hops or ends in a method without callers.
    /// A chain whose last method is only called from methods already on it is dropped.
    /// Chains are produced depth first.
    ///
    /// Empty if `method` is not part of the graph, has no callers, or
    /// [`CallGraphConfig::index_callers`] is disabled.
    #[must_use]
    pub fn get_call_chain(&self, method: MethodId, depth: usize) -> Vec<Vec<MethodId>> {
        if !self.config.index_callers {
            return Vec::new();
        }
        let Some(node) = self.node_of(method) else {
            return Vec::new();
        };
        if self.graph.in_degree(node) == 0 {
            return Vec::new();
        }

        simple_paths(&Reversed(&self.graph), node, depth)
            .into_iter()
            .map(|path| self.to_methods(path))
            .collect()
    }

    /// Returns every method reachable from `method` by following calls, `method` included.
    #[must_use]
    pub fn reachable_from(&self, method: MethodId) -> Vec<MethodId> {
        match self.node_of(method) {
            Some(node) => self.to_methods(bfs(&self.graph, node)),
            None => Vec::new(),
        }
    }

    /// Returns methods that no other method calls.
    ///
    /// Computed on first access and cached.
    pub fn entry_points(&self) -> &[MethodId] {
        self.entry_points
            .get_or_init(|| self.to_methods(self.graph.entry_nodes()))
    }

    /// Returns methods that call no other method.
    #[must_use]
    pub fn leaf_methods(&self) -> Vec<MethodId> {
        self.to_methods(self.graph.exit_nodes())
    }

    /// Returns summary statistics.
    #[must_use]
    pub fn stats(&self) -> CallGraphStats {
        let mut calls_by_kind = [0usize; InvokeKind::COUNT];
        let mut total_call_sites = 0;
        for (_, sites) in self.graph.edges() {
            total_call_sites += sites.len();
            for site in sites {
                calls_by_kind[site.kind() as usize] += 1;
            }
        }

        CallGraphStats {
            method_count: self.method_count(),
            edge_count: self.edge_count(),
            total_call_sites,
            calls_by_kind,
            entry_points: self.entry_points().len(),
            leaf_methods: self.graph.exit_nodes().count(),
            invocations: self.counters.invocations,
            resolved_invocations: self.counters.resolved,
            polymorphic_invocations: self.counters.polymorphic,
            unresolved_dispatches: self.counters.unresolved_dispatches,
            external_calls: self.counters.external_calls,
            missing_methods: self.counters.missing_methods,
        }
    }

    /// Renders the graph in Graphviz DOT format.
    ///
    /// Node labels are method signatures looked up in `project`, which must be the project the
    /// graph was built from. Entry points are filled light green, leaves light blue. Edges with
    /// more than one call site are labelled with the count.
    #[must_use]
    pub fn to_dot(&self, project: &Project, title: Option<&str>) -> String {
        let mut dot = DotWriter::new("CallGraph", title);

        for (node, &method) in self.graph.nodes() {
            let label = project
                .method(method)
                .map_or_else(|| method.to_string(), ToString::to_string);
            let fill = if self.graph.in_degree(node) == 0 {
                Some("lightgreen")
            } else if self.graph.out_degree(node) == 0 {
                Some("lightblue")
            } else {
                None
            };
            dot.node(node, &label, fill);
        }

        for node in self.graph.node_ids() {
            for (edge, sites) in self.graph.outgoing_edges(node) {
                let Some((source, target)) = self.graph.edge_endpoints(edge) else {
                    continue;
                };
                let count = (sites.len() > 1).then(|| sites.len().to_string());
                dot.edge(source, target, count.as_deref());
            }
        }

        dot.finish()
    }
}

/// Resolves every invocation in `block`.
fn resolve_block<'p>(
    hierarchy: &Hierarchy<'p>,
    id: BlockId,
    block: &'p Block,
) -> Result<BlockCalls<'p>> {
    let mut calls = Vec::new();
    for (statement, invoke) in block.invocations() {
        let target = resolve_call(hierarchy, block.method, invoke)?;
        calls.push(ResolvedCall {
            statement,
            invoke,
            target,
        });
    }

    Ok(BlockCalls {
        caller: block.method,
        block: id,
        calls,
    })
}

fn resolve_call(
    hierarchy: &Hierarchy<'_>,
    caller: MethodId,
    invoke: &InvokeExpr,
) -> Result<CallTarget> {
    let project = hierarchy.project();
    if project.class_id(&invoke.class_name).is_none() {
        return Ok(CallTarget::External);
    }

    let Some(callee) = project.find_method(&invoke.class_name, &invoke.method_name, &invoke.params)
    else {
        warn!("external method: {invoke}");
        return Ok(CallTarget::Missing);
    };

    match hierarchy.resolve_invoke(invoke, callee, caller) {
        Ok(targets) if !targets.is_empty() => Ok(CallTarget::Resolved(targets)),
        Ok(_) => {
            warn!("no concrete receiver for {invoke}, using the referenced method");
            Ok(CallTarget::Unresolved(callee))
        }
        Err(err) if err.is_no_concrete_dispatch() => {
            warn!("{err}");
            Ok(CallTarget::Unresolved(callee))
        }
        Err(err) => Err(err.into()),
    }
}

/// Summary statistics of a [`CallGraph`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallGraphStats {
    /// Number of methods in the graph
    pub method_count: usize,
    /// Number of distinct caller/callee pairs
    pub edge_count: usize,
    /// Number of call sites over all edges
    pub total_call_sites: usize,
    /// Call sites per invocation kind, indexed by `InvokeKind as usize`
    pub calls_by_kind: [usize; InvokeKind::COUNT],
    /// Methods without callers
    pub entry_points: usize,
    /// Methods without callees
    pub leaf_methods: usize,
    /// Invocation statements seen during construction
    pub invocations: usize,
    /// Invocations the hierarchy resolved to at least one target
    pub resolved_invocations: usize,
    /// Invocations resolved to more than one target
    pub polymorphic_invocations: usize,
    /// Invocations that fell back to the referenced method
    pub unresolved_dispatches: usize,
    /// Invocations into classes outside the project
    pub external_calls: usize,
    /// Invocations into project classes that lack the referenced method
    pub missing_methods: usize,
}

impl CallGraphStats {
    /// Returns the number of call sites of the given kind.
    #[must_use]
    pub fn calls_of_kind(&self, kind: InvokeKind) -> usize {
        self.calls_by_kind[kind as usize]
    }

    /// Iterates over `(kind, call sites)` for every invocation kind.
    pub fn kinds(&self) -> impl Iterator<Item = (InvokeKind, usize)> + '_ {
        InvokeKind::iter().map(|kind| (kind, self.calls_of_kind(kind)))
    }

    /// Fraction of in-project invocations resolved without falling back to the referenced
    /// method, in `[0.0, 1.0]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn resolution_rate(&self) -> f64 {
        let in_project = self.resolved_invocations + self.unresolved_dispatches;
        if in_project == 0 {
            1.0
        } else {
            self.resolved_invocations as f64 / in_project as f64
        }
    }
}

impl std::fmt::Display for CallGraphStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} methods, {} edges, {} call sites",
            self.method_count, self.edge_count, self.total_call_sites
        )?;
        for (kind, count) in self.kinds().filter(|(_, count)| *count > 0) {
            write!(f, ", {kind}: {count}")?;
        }
        if self.unresolved_dispatches > 0 || self.missing_methods > 0 {
            write!(
                f,
                " ({} unresolved, {} missing)",
                self.unresolved_dispatches, self.missing_methods
            )?;
        }
        Ok(())
    }
}
