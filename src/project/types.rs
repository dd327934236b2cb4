//! Handles, modifier flags and dispatch kinds shared by the project model and the analyses.

use std::fmt;

use bitflags::bitflags;
use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString};

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub(crate) usize);

        impl $name {
            /// Creates a handle from a raw arena index.
            #[must_use]
            #[inline]
            pub const fn new(index: usize) -> Self {
                $name(index)
            }

            /// Returns the raw arena index of this handle.
            #[must_use]
            #[inline]
            pub const fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

handle!(
    /// Stable handle of a class or interface inside a [`Project`](crate::project::Project).
    ClassId,
    "class#"
);
handle!(
    /// Stable handle of a method inside a [`Project`](crate::project::Project).
    MethodId,
    "method#"
);
handle!(
    /// Stable handle of a basic block inside a [`Project`](crate::project::Project).
    BlockId,
    "block#"
);

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Access and kind modifiers of classes and methods
    pub struct Modifiers: u32 {
        /// Accessible from any class
        const PUBLIC = 0x0001;
        /// Accessible only from the declaring class
        const PRIVATE = 0x0002;
        /// Accessible from subclasses and the declaring package
        const PROTECTED = 0x0004;
        /// Static member, not interpreted by the hierarchy
        const STATIC = 0x0008;
        /// Final member, not interpreted by the hierarchy
        const FINAL = 0x0010;
        /// Class cannot be instantiated, method has no body
        const ABSTRACT = 0x0400;
        /// The class is an interface
        const INTERFACE = 0x0200;
    }
}

impl Modifiers {
    /// Builds a modifier set from textual tags as emitted by the bytecode parser.
    ///
    /// Tags are matched case-insensitively against the flag names (`"public"`, `"ABSTRACT"`).
    /// Tags without a matching flag, such as `"synchronized"`, are ignored.
    #[must_use]
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tags.into_iter()
            .filter_map(|tag| Self::from_name(&tag.as_ref().to_ascii_uppercase()))
            .fold(Self::empty(), |acc, flag| acc | flag)
    }

    /// Returns `true` if none of PUBLIC, PRIVATE or PROTECTED is set (package access).
    #[must_use]
    pub fn is_package_private(self) -> bool {
        !self.intersects(Self::PUBLIC | Self::PRIVATE | Self::PROTECTED)
    }
}

/// Dispatch kind of an invocation.
///
/// Determines which resolution algorithm the [`Hierarchy`](crate::analysis::Hierarchy) applies
/// to the referenced method.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum InvokeKind {
    /// Virtual dispatch on the runtime class of the receiver.
    Virtual,
    /// Dispatch through an interface reference.
    Interface,
    /// Non-virtual call: constructors, private methods and `super` calls.
    Special,
    /// Static call, no receiver.
    Static,
    /// Dynamically bound call site, resolved like a virtual call.
    Dynamic,
}

impl InvokeKind {
    /// Returns `true` for the kinds resolved through abstract dispatch.
    #[must_use]
    pub const fn is_dynamic_dispatch(&self) -> bool {
        matches!(self, Self::Virtual | Self::Interface | Self::Dynamic)
    }
}
