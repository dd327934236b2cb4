//! Methods of a project.

use std::fmt;

use crate::project::{BlockId, ClassId, Modifiers};

/// Simple name the bytecode uses for instance constructors.
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// A method, identified by `(declaring class name, name, parameter signature)`.
#[derive(Debug, Clone)]
pub struct Method {
    /// Handle of the declaring class
    pub class: ClassId,
    /// Fully-qualified name of the declaring class
    pub class_name: String,
    /// Simple name
    pub name: String,
    /// Parameter type signature, in declaration order
    pub params: Vec<String>,
    /// Access and kind modifiers
    pub modifiers: Modifiers,
    /// Basic blocks of the body, empty for abstract and native methods
    pub blocks: Vec<BlockId>,
}

impl Method {
    /// Returns `true` for instance constructors.
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }

    /// Returns `true` if name and parameter signature match, regardless of the declaring class.
    #[must_use]
    pub fn matches(&self, name: &str, params: &[String]) -> bool {
        self.name == name && self.params == params
    }

    /// Returns `true` if the method carries the given modifier.
    #[must_use]
    pub fn has(&self, modifier: Modifiers) -> bool {
        self.modifiers.contains(modifier)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}({})",
            self.class_name,
            self.name,
            self.params.join(",")
        )
    }
}
