//! Class Hierarchy Analysis (CHA).
//!
//! This module derives the inheritance structure of a [`Project`] and answers the queries the
//! call graph needs to resolve invocations:
//!
//! - **Relations**: super-classes, transitive sub-classes, sub-interfaces and implementers
//! - **Visibility**: class and method accessibility by modifier and package
//! - **Dispatch**: concrete, abstract and special dispatch, plus the per-invocation entry point
//!   [`Hierarchy::resolve_invoke`]
//!
//! # Construction
//!
//! Direct relations are computed eagerly: the direct sub-classes of every class, the direct
//! implementers of every interface (closed over sub-classing right away), and, when
//! [`HierarchyConfig::model_interface_extension`] is set, the direct sub-interfaces of every
//! interface. Transitive sub-class and sub-interface sets are computed on first request and
//! memoized per handle in [`OnceLock`] slots, so concurrent first requests for the same class
//! compute the set once and every caller observes the same result.
//!
//! Names that do not resolve inside the project (library super-classes, platform interfaces)
//! end the corresponding chain; they are never an error.
//!
//! # Thread Safety
//!
//! [`Hierarchy`] is [`Send`] and [`Sync`]. All queries take `&self`.
//!
//! # Examples
//!
//! ```rust
//! use callscope::{analysis::Hierarchy, project::{ClassDef, Modifiers, ProjectLoader}};
//!
//! let project = ProjectLoader::new()
//!     .class(ClassDef::interface("app.Iface").modifiers(Modifiers::PUBLIC))
//!     .class(ClassDef::new("app.A").implements("app.Iface"))
//!     .class(ClassDef::new("app.B").extends("app.A"))
//!     .build()?;
//!
//! let hierarchy = Hierarchy::new(&project);
//! let iface = project.class_id("app.Iface").unwrap();
//! assert_eq!(hierarchy.get_implementers(iface)?.len(), 2);
//! # Ok::<(), callscope::Error>(())
//! ```

mod dispatch;
mod visibility;

use std::sync::OnceLock;

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::{
    analysis::HierarchyConfig,
    project::{Class, ClassId, Method, MethodId, Project},
    HierarchyError,
};

/// Result type of hierarchy queries.
pub type HierarchyResult<T> = std::result::Result<T, HierarchyError>;

/// Class and interface hierarchy of a project, with dispatch resolution.
///
/// All relation tables are indexed by [`ClassId::index`]. Tables that only make sense for one
/// kind of entity (sub-classes for classes, implementers for interfaces) hold an empty list for
/// the other kind.
pub struct Hierarchy<'p> {
    /// The analysed project
    project: &'p Project,
    /// Construction and dispatch options
    config: HierarchyConfig,
    /// Direct sub-classes per class
    dir_sub_classes: Vec<Vec<ClassId>>,
    /// Direct sub-interfaces per interface
    dir_sub_interfaces: Vec<Vec<ClassId>>,
    /// Implementers per interface, closed over sub-classing
    implementers: Vec<Vec<ClassId>>,
    /// Memoized transitive sub-classes per class
    sub_classes: Vec<OnceLock<Vec<ClassId>>>,
    /// Memoized transitive sub-interfaces per interface
    sub_interfaces: Vec<OnceLock<Vec<ClassId>>>,
}

impl<'p> Hierarchy<'p> {
    /// Builds the hierarchy of `project` with the default configuration.
    #[must_use]
    pub fn new(project: &'p Project) -> Self {
        Self::with_config(project, HierarchyConfig::default())
    }

    /// Builds the hierarchy of `project` with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `project` - The project to analyse
    /// * `config` - Deferred-invocation table, dispatch visibility and interface extension
    #[must_use]
    pub fn with_config(project: &'p Project, config: HierarchyConfig) -> Self {
        let count = project.class_count();
        let mut hierarchy = Hierarchy {
            project,
            config,
            dir_sub_classes: vec![Vec::new(); count],
            dir_sub_interfaces: vec![Vec::new(); count],
            implementers: vec![Vec::new(); count],
            sub_classes: (0..count).map(|_| OnceLock::new()).collect(),
            sub_interfaces: (0..count).map(|_| OnceLock::new()).collect(),
        };

        for (id, class) in project.classes() {
            if class.is_interface() {
                if hierarchy.config.model_interface_extension {
                    for parent in project_interfaces(project, class) {
                        hierarchy.dir_sub_interfaces[parent.index()].push(id);
                    }
                }
                continue;
            }

            if let Some(parent) = class
                .super_class
                .as_deref()
                .and_then(|name| project.class_id(name))
            {
                hierarchy.dir_sub_classes[parent.index()].push(id);
            }

            for interface in project_interfaces(project, class) {
                let direct = &mut hierarchy.implementers[interface.index()];
                if !direct.contains(&id) {
                    direct.push(id);
                }
            }
        }

        // Close implementers over sub-classing
        for index in 0..count {
            if hierarchy.implementers[index].is_empty() {
                continue;
            }
            let direct = std::mem::take(&mut hierarchy.implementers[index]);
            let mut seen = FxHashSet::default();
            let mut closed = Vec::with_capacity(direct.len());
            for implementer in direct {
                for class in hierarchy.sub_classes_including_of(implementer) {
                    if seen.insert(class) {
                        closed.push(class);
                    }
                }
            }
            hierarchy.implementers[index] = closed;
        }

        debug!(
            classes = count,
            interfaces = project.classes().filter(|(_, c)| c.is_interface()).count(),
            "class hierarchy built"
        );

        hierarchy
    }

    /// Returns the analysed project.
    #[must_use]
    pub fn project(&self) -> &'p Project {
        self.project
    }

    /// Returns the configuration the hierarchy was built with.
    #[must_use]
    pub fn config(&self) -> &HierarchyConfig {
        &self.config
    }

    /// Returns the ancestors of `cls`, nearest first, excluding `cls`.
    ///
    /// The walk stops at the first super-class name that does not resolve inside the project,
    /// and at the first class seen twice on malformed cyclic input.
    ///
    /// # Errors
    ///
    /// [`HierarchyError::NotAClass`] if `cls` is an interface,
    /// [`HierarchyError::UnknownClass`] if it is not part of the project.
    pub fn get_super_classes(&self, cls: ClassId) -> HierarchyResult<Vec<ClassId>> {
        self.expect_class(cls)?;
        Ok(self.super_chain(cls))
    }

    /// Returns `cls` followed by its ancestors, nearest first.
    ///
    /// # Errors
    ///
    /// Same as [`get_super_classes`](Self::get_super_classes).
    pub fn get_super_classes_including(&self, cls: ClassId) -> HierarchyResult<Vec<ClassId>> {
        let mut result = vec![cls];
        result.extend(self.get_super_classes(cls)?);
        Ok(result)
    }

    /// Returns the transitive sub-classes of `cls`, excluding `cls`.
    ///
    /// The set is computed on first request and memoized. Each sub-class is listed after its own
    /// descendants.
    ///
    /// # Errors
    ///
    /// [`HierarchyError::NotAClass`] if `cls` is an interface,
    /// [`HierarchyError::UnknownClass`] if it is not part of the project.
    pub fn get_sub_classes(&self, cls: ClassId) -> HierarchyResult<&[ClassId]> {
        self.expect_class(cls)?;
        Ok(self.sub_classes_of(cls))
    }

    /// Returns the transitive sub-classes of `cls` followed by `cls` itself.
    ///
    /// # Errors
    ///
    /// Same as [`get_sub_classes`](Self::get_sub_classes).
    pub fn get_sub_classes_including(&self, cls: ClassId) -> HierarchyResult<Vec<ClassId>> {
        self.expect_class(cls)?;
        Ok(self.sub_classes_including_of(cls))
    }

    /// Returns the transitive sub-interfaces of `interface`, excluding `interface`.
    ///
    /// Empty unless [`HierarchyConfig::model_interface_extension`] is enabled.
    ///
    /// # Errors
    ///
    /// [`HierarchyError::NotAnInterface`] if `interface` is a class,
    /// [`HierarchyError::UnknownClass`] if it is not part of the project.
    pub fn get_sub_interfaces(&self, interface: ClassId) -> HierarchyResult<&[ClassId]> {
        self.expect_interface(interface)?;
        Ok(self.sub_interfaces[interface.index()].get_or_init(|| {
            descendants(interface, &self.dir_sub_interfaces, &self.sub_interfaces)
        }))
    }

    /// Returns the transitive sub-interfaces of `interface` followed by `interface` itself.
    ///
    /// # Errors
    ///
    /// Same as [`get_sub_interfaces`](Self::get_sub_interfaces).
    pub fn get_sub_interfaces_including(
        &self,
        interface: ClassId,
    ) -> HierarchyResult<Vec<ClassId>> {
        let mut result = self.get_sub_interfaces(interface)?.to_vec();
        result.push(interface);
        Ok(result)
    }

    /// Returns every class implementing `interface` or one of its sub-interfaces, directly or
    /// through a super-class.
    ///
    /// # Errors
    ///
    /// [`HierarchyError::NotAnInterface`] if `interface` is a class,
    /// [`HierarchyError::UnknownClass`] if it is not part of the project.
    pub fn get_implementers(&self, interface: ClassId) -> HierarchyResult<Vec<ClassId>> {
        let mut seen = FxHashSet::default();
        let mut result = Vec::new();
        for sub in self.get_sub_interfaces_including(interface)? {
            for &class in &self.implementers[sub.index()] {
                if seen.insert(class) {
                    result.push(class);
                }
            }
        }
        Ok(result)
    }

    /// Returns `true` if `parent` is a strict ancestor of `child`.
    ///
    /// # Errors
    ///
    /// Same as [`get_super_classes`](Self::get_super_classes) for `child`.
    pub fn is_subclass(&self, child: ClassId, parent: ClassId) -> HierarchyResult<bool> {
        Ok(self.get_super_classes(child)?.contains(&parent))
    }

    /// Returns `true` if `parent` is `child` or one of its ancestors.
    ///
    /// # Errors
    ///
    /// Same as [`get_super_classes`](Self::get_super_classes) for `child`.
    pub fn is_subclass_including(&self, child: ClassId, parent: ClassId) -> HierarchyResult<bool> {
        Ok(self.get_super_classes_including(child)?.contains(&parent))
    }

    /// Looks up a class, failing for foreign handles.
    fn class_entry(&self, id: ClassId) -> HierarchyResult<&'p Class> {
        self.project
            .class(id)
            .ok_or(HierarchyError::UnknownClass(id.index()))
    }

    /// Looks up a class that must not be an interface.
    fn expect_class(&self, id: ClassId) -> HierarchyResult<&'p Class> {
        let class = self.class_entry(id)?;
        if class.is_interface() {
            return Err(HierarchyError::NotAClass(class.name.clone()));
        }
        Ok(class)
    }

    /// Looks up a class that must be an interface.
    fn expect_interface(&self, id: ClassId) -> HierarchyResult<&'p Class> {
        let class = self.class_entry(id)?;
        if !class.is_interface() {
            return Err(HierarchyError::NotAnInterface(class.name.clone()));
        }
        Ok(class)
    }

    /// Looks up a method, failing for foreign handles.
    fn method_entry(&self, id: MethodId) -> HierarchyResult<&'p Method> {
        self.project
            .method(id)
            .ok_or(HierarchyError::UnknownMethod(id.index()))
    }

    /// Ancestor walk without the kind check.
    fn super_chain(&self, cls: ClassId) -> Vec<ClassId> {
        let mut chain = Vec::new();
        let mut seen = FxHashSet::default();
        seen.insert(cls);

        let mut current = cls;
        while let Some(parent) = self
            .project
            .class(current)
            .and_then(|class| class.super_class.as_deref())
            .and_then(|name| self.project.class_id(name))
        {
            if !seen.insert(parent) {
                break;
            }
            chain.push(parent);
            current = parent;
        }
        chain
    }

    /// Memoized transitive sub-classes without the kind check.
    fn sub_classes_of(&self, cls: ClassId) -> &[ClassId] {
        self.sub_classes[cls.index()]
            .get_or_init(|| descendants(cls, &self.dir_sub_classes, &self.sub_classes))
    }

    fn sub_classes_including_of(&self, cls: ClassId) -> Vec<ClassId> {
        let mut result = self.sub_classes_of(cls).to_vec();
        result.push(cls);
        result
    }
}

/// Project interfaces named by `class`, in declaration order.
fn project_interfaces<'a>(
    project: &'a Project,
    class: &'a Class,
) -> impl Iterator<Item = ClassId> + 'a {
    class.interfaces.iter().filter_map(move |name| {
        let (id, target) = project.class_by_name(name)?;
        target.is_interface().then_some(id)
    })
}

/// Collects the transitive descendants of `root` over `children`, each listed after its own
/// descendants.
///
/// Descendant sets already present in `memo` are reused instead of walked again. Every node is
/// reported once, so cyclic input terminates.
fn descendants(
    root: ClassId,
    children: &[Vec<ClassId>],
    memo: &[OnceLock<Vec<ClassId>>],
) -> Vec<ClassId> {
    let mut result = Vec::new();
    let mut seen = FxHashSet::default();
    seen.insert(root);

    // (node, index of the next child to visit)
    let mut stack = vec![(root, 0usize)];
    while let Some(frame) = stack.last_mut() {
        let (node, next) = *frame;
        let Some(&child) = children[node.index()].get(next) else {
            stack.pop();
            if node != root {
                result.push(node);
            }
            continue;
        };
        frame.1 += 1;

        if !seen.insert(child) {
            continue;
        }
        if let Some(known) = memo[child.index()].get() {
            for &descendant in known {
                if seen.insert(descendant) {
                    result.push(descendant);
                }
            }
            result.push(child);
            continue;
        }
        stack.push((child, 0));
    }

    result
}
