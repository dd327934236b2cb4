//! Access checks between classes and methods.
//!
//! Packages are derived from qualified names: two classes share a package when every name
//! component but the last is equal. Access without an explicit modifier is package access.

use crate::{
    analysis::hierarchy::{Hierarchy, HierarchyResult},
    project::{ClassId, MethodId, Modifiers},
};

impl Hierarchy<'_> {
    /// Returns `true` if class `to` is accessible from class `from`.
    ///
    /// PUBLIC classes are visible from everywhere; PROTECTED and PRIVATE (nested) classes are
    /// never considered visible; package classes are visible from their own package.
    ///
    /// # Errors
    ///
    /// [`HierarchyError::UnknownClass`](crate::HierarchyError::UnknownClass) for foreign handles.
    pub fn is_visible_class(&self, from: ClassId, to: ClassId) -> HierarchyResult<bool> {
        let target = self.class_entry(to)?;
        let origin = self.class_entry(from)?;

        if target.modifiers.contains(Modifiers::PUBLIC) {
            return Ok(true);
        }
        if target
            .modifiers
            .intersects(Modifiers::PROTECTED | Modifiers::PRIVATE)
        {
            return Ok(false);
        }
        Ok(origin.package() == target.package())
    }

    /// Returns `true` if `method` is accessible from class `from`.
    ///
    /// The declaring class must be visible first. Then PUBLIC methods are visible, PRIVATE
    /// methods only from the declaring class, PROTECTED methods from sub-classes and the
    /// declaring package, package methods from the declaring package.
    ///
    /// # Errors
    ///
    /// [`HierarchyError::UnknownClass`](crate::HierarchyError::UnknownClass) or
    /// [`HierarchyError::UnknownMethod`](crate::HierarchyError::UnknownMethod) for foreign
    /// handles.
    pub fn is_visible_method(&self, from: ClassId, method: MethodId) -> HierarchyResult<bool> {
        let method = self.method_entry(method)?;
        if !self.is_visible_class(from, method.class)? {
            return Ok(false);
        }

        if method.has(Modifiers::PUBLIC) {
            return Ok(true);
        }
        if method.has(Modifiers::PRIVATE) {
            return Ok(from == method.class);
        }

        let same_package =
            self.class_entry(from)?.package() == self.class_entry(method.class)?.package();
        if method.has(Modifiers::PROTECTED) {
            let inherits = from == method.class || self.super_chain(from).contains(&method.class);
            return Ok(inherits || same_package);
        }
        Ok(same_package)
    }
}
