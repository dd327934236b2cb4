// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # callscope
//!
//! Class Hierarchy Analysis and whole-program call graph construction for parsed
//! object-oriented bytecode.
//!
//! `callscope` takes an already parsed program (classes, methods, basic blocks and the
//! invocation statements inside them) and answers two families of questions:
//!
//! - **Hierarchy** - which classes extend or implement a type, which declarations are visible
//!   from where, and which implementations a call can reach at run time
//! - **Call graph** - who calls whom, through which statements, and which methods are affected
//!   by a change to a given method
//!
//! ## Features
//!
//! - **Class Hierarchy Analysis** - transitive sub-classes, sub-interfaces and implementers,
//!   memoized per class and safe to query from many threads
//! - **Dispatch resolution** - concrete, abstract and special dispatch with package and
//!   modifier based visibility
//! - **Callback modelling** - constructing an object that implements a known callback interface
//!   is treated as a call to its entry method; the table is configurable
//! - **Parallel construction** - call sites are resolved on the rayon thread pool and merged
//!   deterministically
//! - **Impact queries** - bounded caller sets and caller chains
//!
//! ## Quick Start
//!
//! ```rust
//! use callscope::prelude::*;
//!
//! let call = InvokeExpr::new(InvokeKind::Virtual, "app.Shape", "area", Vec::<String>::new());
//! let project = ProjectLoader::new()
//!     .class(
//!         ClassDef::new("app.Shape")
//!             .modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
//!             .method(MethodDef::new("area").modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)),
//!     )
//!     .class(
//!         ClassDef::new("app.Circle")
//!             .modifiers(Modifiers::PUBLIC)
//!             .extends("app.Shape")
//!             .method(MethodDef::new("area").modifiers(Modifiers::PUBLIC)),
//!     )
//!     .class(
//!         ClassDef::new("app.Main")
//!             .modifiers(Modifiers::PUBLIC)
//!             .method(MethodDef::new("main").block([Statement::Invoke(call)])),
//!     )
//!     .build()?;
//!
//! let hierarchy = Hierarchy::new(&project);
//! let graph = CallGraph::build(&hierarchy)?;
//!
//! let main = project.find_method("app.Main", "main", &[]).unwrap();
//! let circle_area = project.find_method("app.Circle", "area", &[]).unwrap();
//! assert_eq!(graph.next(main), vec![circle_area]);
//! # Ok::<(), callscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`prelude`] - Convenient re-exports of commonly used types
//! - [`project`] - The in-memory program model and its loader
//! - [`analysis`] - [`Hierarchy`](analysis::Hierarchy) and [`CallGraph`](analysis::CallGraph)
//! - [`graph`] - Generic directed graph and traversal algorithms
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Diagnostics
//!
//! Non-fatal findings (invocations of methods a project class does not declare, dispatches
//! without a visible implementation) are reported as `tracing` warnings. Install any
//! `tracing` subscriber to see them.

pub(crate) mod error;
pub(crate) mod utils;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust
/// use callscope::prelude::*;
///
/// let project = ProjectLoader::new().build()?;
/// let hierarchy = Hierarchy::new(&project);
/// let graph = CallGraph::build(&hierarchy)?;
/// assert!(graph.entry_points().is_empty());
/// # Ok::<(), callscope::Error>(())
/// ```
pub mod prelude;

/// In-memory model of a parsed program.
///
/// The model is produced by a bytecode parser, or by hand through the
/// [`ProjectLoader`](project::ProjectLoader) builder, and is read-only afterwards.
///
/// # Key Types
///
/// - [`project::Project`] - Arena of classes, methods and blocks with name lookup
/// - [`project::Class`], [`project::Method`], [`project::Block`] - The program entities
/// - [`project::InvokeExpr`] - An invocation as written in the bytecode
/// - [`project::Modifiers`] - Access and kind flags
pub mod project;

/// Class Hierarchy Analysis and call graph construction.
pub mod analysis;

pub use utils::graph;

/// `callscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
/// This is used consistently throughout the crate for all fallible operations.
///
/// # Examples
///
/// ```rust
/// use callscope::{analysis::{CallGraph, Hierarchy}, project::Project, Result};
///
/// fn edge_count(project: &Project) -> Result<usize> {
///     let hierarchy = Hierarchy::new(project);
///     Ok(CallGraph::build(&hierarchy)?.edge_count())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `callscope` Error type
///
/// The main error type for all operations in this crate. Hierarchy failures are wrapped in
/// [`Error::Hierarchy`].
///
/// # Examples
///
/// ```rust
/// use callscope::{project::{ClassDef, ProjectLoader}, Error};
///
/// let result = ProjectLoader::new()
///     .class(ClassDef::new("a.A"))
///     .class(ClassDef::new("a.A"))
///     .build();
/// assert!(matches!(result, Err(Error::DuplicateClass(_))));
/// ```
pub use error::{Error, HierarchyError};
