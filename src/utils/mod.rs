//! Shared infrastructure used by the analyses.

pub(crate) mod dot;
pub mod graph;
