//! ProjectLoader builder API for assembling a [`Project`] from parser output.
//!
//! The bytecode parser is an external collaborator. It describes every class with a
//! [`ClassDef`] and every method with a [`MethodDef`]; the loader validates identities,
//! assigns handles and freezes the result into an immutable [`Project`].

use tracing::debug;

use crate::{
    project::{Block, BlockId, Class, ClassId, Method, MethodId, Modifiers, Project, Statement},
    Error, Result,
};

/// Description of a class or interface, as handed over by the parser.
#[derive(Debug, Clone)]
pub struct ClassDef {
    name: String,
    super_class: Option<String>,
    interfaces: Vec<String>,
    modifiers: Modifiers,
    methods: Vec<MethodDef>,
}

impl ClassDef {
    /// Starts the description of a class with the given fully-qualified name.
    ///
    /// The class starts without modifiers, which means package visibility.
    pub fn new(name: impl Into<String>) -> Self {
        ClassDef {
            name: name.into(),
            super_class: None,
            interfaces: Vec::new(),
            modifiers: Modifiers::empty(),
            methods: Vec::new(),
        }
    }

    /// Starts the description of an interface: INTERFACE and ABSTRACT are preset.
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name).modifiers(Modifiers::INTERFACE | Modifiers::ABSTRACT)
    }

    /// Sets the direct super-class name.
    #[must_use]
    pub fn extends(mut self, super_class: impl Into<String>) -> Self {
        self.super_class = Some(super_class.into());
        self
    }

    /// Appends a directly implemented (or extended, for interfaces) interface name.
    #[must_use]
    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Adds modifiers to the class.
    #[must_use]
    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    /// Appends a declared method.
    #[must_use]
    pub fn method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }
}

/// Description of a method and its body, as handed over by the parser.
#[derive(Debug, Clone)]
pub struct MethodDef {
    name: String,
    params: Vec<String>,
    modifiers: Modifiers,
    blocks: Vec<Vec<Statement>>,
}

impl MethodDef {
    /// Starts the description of a method with the given simple name and no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        MethodDef {
            name: name.into(),
            params: Vec::new(),
            modifiers: Modifiers::empty(),
            blocks: Vec::new(),
        }
    }

    /// Sets the parameter type signature.
    #[must_use]
    pub fn params<P, S>(mut self, params: P) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Adds modifiers to the method.
    #[must_use]
    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    /// Appends a basic block with the given statements.
    #[must_use]
    pub fn block(mut self, statements: impl IntoIterator<Item = Statement>) -> Self {
        self.blocks.push(statements.into_iter().collect());
        self
    }
}

/// Builder for creating [`Project`] instances.
///
/// Classes are registered first, in the order they were added; methods declared through
/// [`ClassDef::method`] follow in declaration order, then methods attached with
/// [`ProjectLoader::method_of`]. Handles are assigned in that order, so the same input always
/// yields the same handles.
///
/// # Usage Examples
///
/// ```rust
/// use callscope::project::{ClassDef, MethodDef, Modifiers, ProjectLoader};
///
/// let project = ProjectLoader::new()
///     .class(
///         ClassDef::new("app.Base")
///             .modifiers(Modifiers::PUBLIC)
///             .method(MethodDef::new("foo").modifiers(Modifiers::PUBLIC)),
///     )
///     .class(ClassDef::new("app.Derived").extends("app.Base").modifiers(Modifiers::PUBLIC))
///     .build()?;
///
/// assert_eq!(project.class_count(), 2);
/// assert!(project.find_method("app.Base", "foo", &[]).is_some());
/// # Ok::<(), callscope::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProjectLoader {
    /// Class descriptions, in registration order
    classes: Vec<ClassDef>,
    /// Methods attached to a class by name after the fact
    detached: Vec<(String, MethodDef)>,
}

impl ProjectLoader {
    /// Create a new ProjectLoader builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a class.
    #[must_use]
    pub fn class(mut self, class: ClassDef) -> Self {
        self.classes.push(class);
        self
    }

    /// Registers several classes at once.
    #[must_use]
    pub fn classes(mut self, classes: impl IntoIterator<Item = ClassDef>) -> Self {
        self.classes.extend(classes);
        self
    }

    /// Attaches a method to a class that is registered by name.
    ///
    /// Useful for parsers that emit method bodies separately from class headers. The class must
    /// be registered by the time [`build`](Self::build) runs.
    #[must_use]
    pub fn method_of(mut self, class_name: impl Into<String>, method: MethodDef) -> Self {
        self.detached.push((class_name.into(), method));
        self
    }

    /// Validates the registered definitions and freezes them into a [`Project`].
    ///
    /// # Errors
    /// Returns an error if:
    /// - Two classes share a fully-qualified name ([`Error::DuplicateClass`])
    /// - Two methods share a `(class, name, parameters)` identity ([`Error::DuplicateMethod`])
    /// - A method was attached to a class that is not registered
    ///   ([`Error::UnknownEnclosingClass`])
    pub fn build(self) -> Result<Project> {
        let mut project = Project::with_capacity(self.classes.len());
        let mut pending = Vec::with_capacity(self.classes.len());

        for def in self.classes {
            if project.class_index.contains_key(&def.name) {
                return Err(Error::DuplicateClass(def.name));
            }

            let id = ClassId::new(project.classes.len());
            project.class_index.insert(def.name.clone(), id);
            project.classes.push(Class {
                name: def.name,
                super_class: def.super_class,
                interfaces: def.interfaces,
                modifiers: def.modifiers,
                methods: Vec::new(),
            });
            pending.push((id, def.methods));
        }

        for (class, methods) in pending {
            for method in methods {
                add_method(&mut project, class, method)?;
            }
        }

        for (class_name, method) in self.detached {
            let class = project
                .class_index
                .get(&class_name)
                .copied()
                .ok_or(Error::UnknownEnclosingClass(class_name))?;
            add_method(&mut project, class, method)?;
        }

        debug!(
            classes = project.classes.len(),
            methods = project.methods.len(),
            blocks = project.blocks.len(),
            "project loaded"
        );

        Ok(project)
    }
}

/// Registers `def` as a method of `class`, together with its blocks.
fn add_method(project: &mut Project, class: ClassId, def: MethodDef) -> Result<MethodId> {
    let class_name = project.classes[class.index()].name.clone();
    let duplicate = project.classes[class.index()]
        .methods
        .iter()
        .any(|&existing| project.methods[existing.index()].matches(&def.name, &def.params));

    let id = MethodId::new(project.methods.len());
    let mut method = Method {
        class,
        class_name,
        name: def.name,
        params: def.params,
        modifiers: def.modifiers,
        blocks: Vec::with_capacity(def.blocks.len()),
    };
    if duplicate {
        return Err(Error::DuplicateMethod(method.to_string()));
    }

    for statements in def.blocks {
        method.blocks.push(BlockId::new(project.blocks.len()));
        project.blocks.push(Block {
            method: id,
            statements,
        });
    }

    project.classes[class.index()].methods.push(id);
    project.methods.push(method);
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{InvokeExpr, InvokeKind};

    #[test]
    fn test_handles_follow_registration_order() {
        let project = ProjectLoader::new()
            .class(ClassDef::new("a.A").method(MethodDef::new("x")))
            .class(
                ClassDef::new("a.B")
                    .method(MethodDef::new("y").block([]).block([]))
                    .method(MethodDef::new("z")),
            )
            .method_of("a.A", MethodDef::new("w").block([]))
            .build()
            .unwrap();

        assert_eq!(project.class_id("a.B"), Some(ClassId::new(1)));
        let names: Vec<_> = project.methods().map(|(_, m)| m.name.as_str()).collect();
        assert_eq!(names, vec!["x", "y", "z", "w"]);

        let blocks: Vec<_> = project.blocks().map(|(_, b)| b.method).collect();
        assert_eq!(
            blocks,
            vec![MethodId::new(1), MethodId::new(1), MethodId::new(3)]
        );
        assert_eq!(
            project.class(ClassId::new(0)).unwrap().methods,
            vec![MethodId::new(0), MethodId::new(3)]
        );
    }

    #[test]
    fn test_duplicate_class_rejected() {
        let result = ProjectLoader::new()
            .class(ClassDef::new("a.A"))
            .class(ClassDef::interface("a.A"))
            .build();
        assert!(matches!(result, Err(Error::DuplicateClass(name)) if name == "a.A"));
    }

    #[test]
    fn test_duplicate_method_rejected() {
        let result = ProjectLoader::new()
            .class(
                ClassDef::new("a.A")
                    .method(MethodDef::new("foo").params(["int"]))
                    .method(MethodDef::new("foo").params(["int"])),
            )
            .build();
        assert!(matches!(result, Err(Error::DuplicateMethod(sig)) if sig == "a.A.foo(int)"));
    }

    #[test]
    fn test_overloads_are_distinct() {
        let project = ProjectLoader::new()
            .class(
                ClassDef::new("a.A")
                    .method(MethodDef::new("foo").params(["int"]))
                    .method(MethodDef::new("foo").params(["long"])),
            )
            .build()
            .unwrap();
        assert_eq!(project.method_count(), 2);
    }

    #[test]
    fn test_detached_method_needs_class() {
        let result = ProjectLoader::new()
            .method_of("a.Missing", MethodDef::new("foo"))
            .build();
        assert!(matches!(result, Err(Error::UnknownEnclosingClass(name)) if name == "a.Missing"));
    }

    #[test]
    fn test_bodies_are_kept() {
        let call = InvokeExpr::new(InvokeKind::Static, "a.A", "bar", Vec::<String>::new());
        let project = ProjectLoader::new()
            .class(
                ClassDef::new("a.A")
                    .method(MethodDef::new("foo").block([Statement::Invoke(call.clone())])),
            )
            .build()
            .unwrap();

        let (_, block) = project.blocks().next().unwrap();
        assert_eq!(block.statements[0].invoke_expr(), Some(&call));
    }
}
