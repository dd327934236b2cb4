//! Classes and interfaces of a project.

use crate::project::{MethodId, Modifiers};

/// A class or interface as produced by the bytecode parser.
///
/// Super-class and interface references are kept by name. A name that does not resolve inside
/// the [`Project`](crate::project::Project) marks the boundary of the analysed code; the
/// hierarchy stops there.
#[derive(Debug, Clone)]
pub struct Class {
    /// Fully-qualified, dot separated name
    pub name: String,
    /// Name of the direct super-class, if any
    pub super_class: Option<String>,
    /// Names of the directly implemented (or, for interfaces, extended) interfaces
    pub interfaces: Vec<String>,
    /// Access and kind modifiers
    pub modifiers: Modifiers,
    /// Declared methods, in declaration order
    pub methods: Vec<MethodId>,
}

impl Class {
    /// Returns `true` if the class carries the INTERFACE modifier.
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.modifiers.contains(Modifiers::INTERFACE)
    }

    /// Returns `true` if the class carries the ABSTRACT modifier.
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(Modifiers::ABSTRACT)
    }

    /// Returns the package of the class: every name component but the last.
    ///
    /// Classes in the default package return an empty string.
    #[must_use]
    pub fn package(&self) -> &str {
        self.name.rsplit_once('.').map_or("", |(package, _)| package)
    }

    /// Returns `true` if the class names `interface` among its direct interfaces.
    #[must_use]
    pub fn declares_interface(&self, interface: &str) -> bool {
        self.interfaces.iter().any(|name| name == interface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str, modifiers: Modifiers) -> Class {
        Class {
            name: name.to_string(),
            super_class: None,
            interfaces: vec!["java.lang.Runnable".to_string()],
            modifiers,
            methods: Vec::new(),
        }
    }

    #[test]
    fn test_package() {
        assert_eq!(class("com.app.Main", Modifiers::PUBLIC).package(), "com.app");
        assert_eq!(class("com.app.Main$1", Modifiers::PUBLIC).package(), "com.app");
        assert_eq!(class("Main", Modifiers::PUBLIC).package(), "");
    }

    #[test]
    fn test_kind_flags() {
        let iface = class("a.I", Modifiers::PUBLIC | Modifiers::INTERFACE | Modifiers::ABSTRACT);
        assert!(iface.is_interface());
        assert!(iface.is_abstract());
        assert!(!class("a.C", Modifiers::PUBLIC).is_interface());
        assert!(iface.declares_interface("java.lang.Runnable"));
        assert!(!iface.declares_interface("okhttp3.Callback"));
    }
}
