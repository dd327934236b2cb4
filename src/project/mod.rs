//! In-memory project model consumed by the analyses.
//!
//! A [`Project`] is the parsed form of a program: its classes and interfaces, their methods,
//! and the method bodies lowered into basic blocks of statements. It is produced once by the
//! [`ProjectLoader`] and never mutated afterwards.
//!
//! # Architecture
//!
//! Classes, methods and blocks live in three arenas and are addressed by stable integer handles
//! ([`ClassId`], [`MethodId`], [`BlockId`]). Cross references that the bytecode expresses by name
//! (super-class, implemented interfaces, callee references) stay names; they are resolved by
//! identity lookup when an analysis needs them, and a name that does not resolve marks code
//! outside the project.
//!
//! # Key Components
//!
//! - [`Project`] - Immutable arena of classes, methods and blocks with lookup by identity
//! - [`ProjectLoader`] - Builder validating identities and assigning handles
//! - [`Class`], [`Method`], [`Block`] - Entities stored in the arenas
//! - [`Statement`], [`InvokeExpr`] - Statement model, reduced to what call resolution needs
//! - [`Modifiers`], [`InvokeKind`] - Modifier flags and dispatch kinds
//!
//! # Usage Examples
//!
//! ```rust
//! use callscope::project::{
//!     ClassDef, InvokeExpr, InvokeKind, MethodDef, Modifiers, ProjectLoader, Statement,
//! };
//!
//! let call = InvokeExpr::new(InvokeKind::Static, "app.Util", "helper", Vec::<String>::new());
//! let project = ProjectLoader::new()
//!     .class(
//!         ClassDef::new("app.Util")
//!             .modifiers(Modifiers::PUBLIC)
//!             .method(MethodDef::new("main").block([Statement::Invoke(call)]))
//!             .method(MethodDef::new("helper").modifiers(Modifiers::STATIC)),
//!     )
//!     .build()?;
//!
//! for (id, block) in project.blocks() {
//!     let method = project.method(block.method).unwrap();
//!     println!("{id} belongs to {method}");
//! }
//! # Ok::<(), callscope::Error>(())
//! ```

mod body;
mod class;
mod loader;
mod method;
mod types;

pub use body::{Block, InvokeExpr, Statement, Value};
pub use class::Class;
pub use loader::{ClassDef, MethodDef, ProjectLoader};
pub use method::{Method, CONSTRUCTOR_NAME};
pub use types::{BlockId, ClassId, InvokeKind, MethodId, Modifiers};

use rustc_hash::FxHashMap;

/// Immutable container of classes, methods and basic blocks.
///
/// Built by [`ProjectLoader::build`]. All accessors taking a handle return `None` for handles
/// that do not belong to this project.
#[derive(Debug, Clone, Default)]
pub struct Project {
    pub(crate) classes: Vec<Class>,
    pub(crate) class_index: FxHashMap<String, ClassId>,
    pub(crate) methods: Vec<Method>,
    pub(crate) blocks: Vec<Block>,
}

impl Project {
    pub(crate) fn with_capacity(classes: usize) -> Self {
        Project {
            classes: Vec::with_capacity(classes),
            class_index: FxHashMap::with_capacity_and_hasher(classes, Default::default()),
            methods: Vec::new(),
            blocks: Vec::new(),
        }
    }

    /// Returns the class behind `id`.
    #[must_use]
    pub fn class(&self, id: ClassId) -> Option<&Class> {
        self.classes.get(id.index())
    }

    /// Looks up a class by its fully-qualified name.
    #[must_use]
    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.class_index.get(name).copied()
    }

    /// Looks up a class by its fully-qualified name and returns it with its handle.
    #[must_use]
    pub fn class_by_name(&self, name: &str) -> Option<(ClassId, &Class)> {
        let id = self.class_id(name)?;
        Some((id, &self.classes[id.index()]))
    }

    /// Iterates over all classes and interfaces, in registration order.
    pub fn classes(&self) -> impl Iterator<Item = (ClassId, &Class)> + '_ {
        self.classes
            .iter()
            .enumerate()
            .map(|(i, class)| (ClassId::new(i), class))
    }

    /// Returns the number of classes and interfaces.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Returns the method behind `id`.
    #[must_use]
    pub fn method(&self, id: MethodId) -> Option<&Method> {
        self.methods.get(id.index())
    }

    /// Looks up a method by its identity triple.
    ///
    /// Returns `None` if the class is not part of the project or declares no method with exactly
    /// this name and parameter signature. Inherited methods are not considered.
    #[must_use]
    pub fn find_method(&self, class_name: &str, name: &str, params: &[String]) -> Option<MethodId> {
        let (_, class) = self.class_by_name(class_name)?;
        class
            .methods
            .iter()
            .copied()
            .find(|id| self.methods[id.index()].matches(name, params))
    }

    /// Returns the first method of `class` with the given simple name, in declaration order.
    #[must_use]
    pub fn find_method_by_name(&self, class: ClassId, name: &str) -> Option<MethodId> {
        self.class(class)?
            .methods
            .iter()
            .copied()
            .find(|id| self.methods[id.index()].name == name)
    }

    /// Iterates over all methods, in registration order.
    pub fn methods(&self) -> impl Iterator<Item = (MethodId, &Method)> + '_ {
        self.methods
            .iter()
            .enumerate()
            .map(|(i, method)| (MethodId::new(i), method))
    }

    /// Returns the number of methods.
    #[must_use]
    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    /// Returns the basic block behind `id`.
    #[must_use]
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id.index())
    }

    /// Iterates over all basic blocks together with their handle.
    ///
    /// Blocks are grouped by method and ordered as the methods were registered.
    pub fn blocks(&self) -> impl Iterator<Item = (BlockId, &Block)> + '_ {
        self.blocks
            .iter()
            .enumerate()
            .map(|(i, block)| (BlockId::new(i), block))
    }

    /// Returns the basic blocks as a slice indexed by [`BlockId::index`].
    #[must_use]
    pub fn block_slice(&self) -> &[Block] {
        &self.blocks
    }

    /// Returns the number of basic blocks.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}
