//! Crate-internal test support.
