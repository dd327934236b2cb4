//! Dispatch resolution on top of the class hierarchy.
//!
//! Each [`InvokeKind`] maps to one resolution strategy:
//!
//! | Kind | Strategy |
//! |------|----------|
//! | `Virtual`, `Interface`, `Dynamic` | [`Hierarchy::resolve_abstract_dispatch`] on the declaring class |
//! | `Special` | [`Hierarchy::resolve_special_dispatch`] |
//! | `Static` | the referenced method itself |
//!
//! Abstract dispatch enumerates every concrete receiver class the call could reach and runs
//! [`Hierarchy::resolve_concrete_dispatch`] for each of them. A receiver for which no visible
//! implementation exists aborts the whole resolution with
//! [`HierarchyError::NoConcreteDispatch`]; the call graph treats that as "no resolved targets".

use rustc_hash::FxHashSet;

use crate::{
    analysis::{
        hierarchy::{Hierarchy, HierarchyResult},
        DispatchVisibility,
    },
    project::{ClassId, InvokeExpr, InvokeKind, MethodId, Modifiers},
    HierarchyError,
};

impl Hierarchy<'_> {
    /// Resolves `method` on a receiver of exactly class `cls`.
    ///
    /// Walks `cls` and its ancestors nearest first and returns the first declared method with
    /// the same name and parameter signature that passes the visibility check selected by
    /// [`HierarchyConfig::dispatch_visibility`](crate::analysis::HierarchyConfig::dispatch_visibility).
    ///
    /// # Errors
    ///
    /// - [`HierarchyError::NotAClass`] if `cls` is an interface
    /// - [`HierarchyError::NoConcreteDispatch`] if no ancestor provides a visible match
    /// - [`HierarchyError::UnknownClass`] / [`HierarchyError::UnknownMethod`] for foreign handles
    pub fn resolve_concrete_dispatch(
        &self,
        cls: ClassId,
        method: MethodId,
    ) -> HierarchyResult<MethodId> {
        let receiver = self.expect_class(cls)?;
        let requested = self.method_entry(method)?;

        for ancestor in self.get_super_classes_including(cls)? {
            let class = self.class_entry(ancestor)?;
            for &candidate in &class.methods {
                if !self
                    .method_entry(candidate)?
                    .matches(&requested.name, &requested.params)
                {
                    continue;
                }
                let visible = match self.config.dispatch_visibility {
                    DispatchVisibility::RequestedMethod => {
                        self.is_visible_method(ancestor, method)?
                    }
                    DispatchVisibility::CandidateMethod => {
                        self.is_visible_method(cls, candidate)?
                    }
                };
                if visible {
                    return Ok(candidate);
                }
            }
        }

        Err(HierarchyError::NoConcreteDispatch {
            class: receiver.name.clone(),
            method: requested.to_string(),
        })
    }

    /// Resolves `method` on every concrete receiver compatible with `cls`.
    ///
    /// Receivers are the sub-classes of `cls` including itself, or, for an interface, the
    /// sub-classes of every implementer. ABSTRACT receivers are skipped. The result holds each
    /// target once, in the order receivers were visited.
    ///
    /// # Errors
    ///
    /// [`HierarchyError::NoConcreteDispatch`] as soon as one receiver has no visible
    /// implementation, plus the errors of the relation queries for foreign handles.
    pub fn resolve_abstract_dispatch(
        &self,
        cls: ClassId,
        method: MethodId,
    ) -> HierarchyResult<Vec<MethodId>> {
        let receivers = if self.class_entry(cls)?.is_interface() {
            let mut seen = FxHashSet::default();
            let mut receivers = Vec::new();
            for implementer in self.get_implementers(cls)? {
                for class in self.get_sub_classes_including(implementer)? {
                    if seen.insert(class) {
                        receivers.push(class);
                    }
                }
            }
            receivers
        } else {
            self.get_sub_classes_including(cls)?
        };

        let mut seen = FxHashSet::default();
        let mut targets = Vec::new();
        for receiver in receivers {
            if self.class_entry(receiver)?.is_abstract() {
                continue;
            }
            let target = self.resolve_concrete_dispatch(receiver, method)?;
            if seen.insert(target) {
                targets.push(target);
            }
        }
        Ok(targets)
    }

    /// Resolves a non-virtual call to `method` made from inside `container`.
    ///
    /// - A constructor of a class implementing a deferred-invocation interface resolves to the
    ///   class's entry method (see [`resolve_deferred_entry`](Self::resolve_deferred_entry))
    /// - Other constructors and PRIVATE methods resolve to themselves
    /// - If the declaring class of `method` is a strict sub-class of the container's class, the
    ///   call is dispatched concretely from the container's class
    /// - Everything else resolves to `method`
    ///
    /// # Errors
    ///
    /// [`HierarchyError::NoConcreteDispatch`] from the concrete dispatch step, or
    /// [`HierarchyError::UnknownMethod`] for foreign handles.
    pub fn resolve_special_dispatch(
        &self,
        method: MethodId,
        container: MethodId,
    ) -> HierarchyResult<MethodId> {
        let callee = self.method_entry(method)?;
        let caller = self.method_entry(container)?;

        if callee.is_constructor() {
            if let Some(entry) = self.resolve_deferred_entry(callee.class)? {
                return Ok(entry);
            }
        }

        if callee.is_constructor() || callee.has(Modifiers::PRIVATE) {
            return Ok(method);
        }

        let both_classes = !self.class_entry(callee.class)?.is_interface()
            && !self.class_entry(caller.class)?.is_interface();
        if both_classes && self.is_subclass(callee.class, caller.class)? {
            return self.resolve_concrete_dispatch(caller.class, method);
        }

        Ok(method)
    }

    /// Returns the entry method the runtime invokes on instances of `cls`, if `cls` implements a
    /// deferred-invocation interface.
    ///
    /// Rows of [`HierarchyConfig::deferred_invocations`](crate::analysis::HierarchyConfig::deferred_invocations)
    /// are tried in order. A row matches when `cls` names its interface among its declared
    /// interfaces and declares a method with its entry name; the first such method is returned.
    ///
    /// # Errors
    ///
    /// [`HierarchyError::UnknownClass`] for foreign handles.
    pub fn resolve_deferred_entry(&self, cls: ClassId) -> HierarchyResult<Option<MethodId>> {
        let class = self.class_entry(cls)?;
        Ok(self
            .config
            .deferred_invocations
            .iter()
            .filter(|row| class.declares_interface(&row.interface))
            .find_map(|row| self.project.find_method_by_name(cls, &row.entry_method)))
    }

    /// Resolves the possible targets of `invoke`, whose referenced method is `method`, made
    /// from inside `container`.
    ///
    /// # Errors
    ///
    /// Whatever the selected strategy returns; see the module documentation.
    pub fn resolve_invoke(
        &self,
        invoke: &InvokeExpr,
        method: MethodId,
        container: MethodId,
    ) -> HierarchyResult<Vec<MethodId>> {
        match invoke.kind {
            InvokeKind::Virtual | InvokeKind::Interface | InvokeKind::Dynamic => {
                let declaring = self.method_entry(method)?.class;
                self.resolve_abstract_dispatch(declaring, method)
            }
            InvokeKind::Special => Ok(vec![self.resolve_special_dispatch(method, container)?]),
            InvokeKind::Static => Ok(vec![method]),
        }
    }
}
