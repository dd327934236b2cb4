//! Graphviz DOT output.
//!
//! [`DotWriter`] accumulates node and edge statements for a single `digraph` and renders them
//! with escaped labels, so that method signatures such as `List<T>.get(int)` survive intact.

use std::fmt::Write;

/// Escapes a string for use inside a double-quoted DOT label.
#[must_use]
pub fn escape_label(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            '<' => out.push_str("\\<"),
            '>' => out.push_str("\\>"),
            _ => out.push(c),
        }
    }
    out
}

/// Incremental builder for a DOT `digraph`.
pub struct DotWriter {
    out: String,
}

impl DotWriter {
    /// Starts a new digraph named `name` with an optional title label.
    pub fn new(name: &str, title: Option<&str>) -> Self {
        let mut out = String::new();
        let _ = writeln!(out, "digraph {name} {{");
        if let Some(title) = title {
            let _ = writeln!(out, "    label=\"{}\";", escape_label(title));
            let _ = writeln!(out, "    labelloc=t;");
        }
        let _ = writeln!(out, "    node [shape=box, fontname=\"Courier\", fontsize=10];");
        let _ = writeln!(out, "    edge [fontname=\"Courier\", fontsize=9];");
        let _ = writeln!(out);
        DotWriter { out }
    }

    /// Emits a node statement; `fill` selects a filled style with the given color.
    pub fn node(&mut self, id: impl std::fmt::Display, label: &str, fill: Option<&str>) {
        let label = escape_label(label);
        let _ = match fill {
            Some(color) => writeln!(
                self.out,
                "    {id} [label=\"{label}\", style=filled, fillcolor={color}];"
            ),
            None => writeln!(self.out, "    {id} [label=\"{label}\"];"),
        };
    }

    /// Emits an edge statement with an optional label.
    pub fn edge(
        &mut self,
        from: impl std::fmt::Display,
        to: impl std::fmt::Display,
        label: Option<&str>,
    ) {
        let _ = match label {
            Some(label) => writeln!(
                self.out,
                "    {from} -> {to} [label=\"{}\"];",
                escape_label(label)
            ),
            None => writeln!(self.out, "    {from} -> {to};"),
        };
    }

    /// Closes the digraph and returns the rendered text.
    #[must_use]
    pub fn finish(mut self) -> String {
        self.out.push_str("}\n");
        self.out
    }
}
