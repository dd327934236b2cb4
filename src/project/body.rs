//! Method bodies: basic blocks, statements and invoke expressions.
//!
//! The bytecode parser lowers every method body into basic blocks of statements. Only
//! invocations matter to the analyses, so every other statement is carried as opaque text.

use std::fmt;

use crate::project::{InvokeKind, MethodId};

/// Reference to a callee together with the dispatch kind of the call.
///
/// The reference is symbolic: `class_name` may name a class that is not part of the project
/// (library code), in which case the call graph ignores the invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvokeExpr {
    /// Dispatch kind of the invocation
    pub kind: InvokeKind,
    /// Fully-qualified name of the class the callee is referenced through
    pub class_name: String,
    /// Simple name of the callee
    pub method_name: String,
    /// Parameter type signature of the callee, in declaration order
    pub params: Vec<String>,
}

impl InvokeExpr {
    /// Creates a new invoke expression.
    ///
    /// # Arguments
    ///
    /// * `kind` - Dispatch kind of the call
    /// * `class_name` - Fully-qualified name of the referenced class
    /// * `method_name` - Simple name of the referenced method
    /// * `params` - Parameter type names, in declaration order
    pub fn new<C, M, P, S>(kind: InvokeKind, class_name: C, method_name: M, params: P) -> Self
    where
        C: Into<String>,
        M: Into<String>,
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        InvokeExpr {
            kind,
            class_name: class_name.into(),
            method_name: method_name.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for InvokeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}.{}({})",
            self.kind,
            self.class_name,
            self.method_name,
            self.params.join(",")
        )
    }
}

/// Right-hand side of an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// The assigned value is the result of a call.
    Invoke(InvokeExpr),
    /// Any other expression, kept as text.
    Other(String),
}

/// A single statement of a basic block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// A call whose result is discarded.
    Invoke(InvokeExpr),
    /// An assignment to a local.
    Assign {
        /// Name of the assigned local
        target: String,
        /// Assigned value
        value: Value,
    },
    /// Any other statement, kept as text.
    Other(String),
}

impl Statement {
    /// Returns the invocation carried by this statement, if any.
    ///
    /// Both bare invocations and assignments whose right-hand side is an invocation qualify.
    #[must_use]
    pub fn invoke_expr(&self) -> Option<&InvokeExpr> {
        match self {
            Statement::Invoke(expr)
            | Statement::Assign {
                value: Value::Invoke(expr),
                ..
            } => Some(expr),
            _ => None,
        }
    }
}

impl From<InvokeExpr> for Statement {
    fn from(expr: InvokeExpr) -> Self {
        Statement::Invoke(expr)
    }
}

/// A basic block: an ordered list of statements owned by one method.
#[derive(Debug, Clone)]
pub struct Block {
    /// The enclosing method
    pub method: MethodId,
    /// Statements in execution order
    pub statements: Vec<Statement>,
}

impl Block {
    /// Returns `(statement index, invocation)` for every statement carrying an invocation.
    pub fn invocations(&self) -> impl Iterator<Item = (usize, &InvokeExpr)> + '_ {
        self.statements
            .iter()
            .enumerate()
            .filter_map(|(index, stmt)| stmt.invoke_expr().map(|expr| (index, expr)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str) -> InvokeExpr {
        InvokeExpr::new(InvokeKind::Virtual, "a.A", name, ["int"])
    }

    #[test]
    fn test_invoke_expr_on_statements() {
        assert_eq!(Statement::Invoke(call("foo")).invoke_expr(), Some(&call("foo")));

        let assign = Statement::Assign {
            target: "r0".to_string(),
            value: Value::Invoke(call("bar")),
        };
        assert_eq!(assign.invoke_expr().map(|e| e.method_name.as_str()), Some("bar"));

        let plain = Statement::Assign {
            target: "r1".to_string(),
            value: Value::Other("r0 + 1".to_string()),
        };
        assert!(plain.invoke_expr().is_none());
        assert!(Statement::Other("return".to_string()).invoke_expr().is_none());
    }

    #[test]
    fn test_block_invocations_keep_statement_index() {
        let block = Block {
            method: MethodId::new(0),
            statements: vec![
                Statement::Other("nop".to_string()),
                call("foo").into(),
                Statement::Other("nop".to_string()),
                call("bar").into(),
            ],
        };
        let found: Vec<_> = block
            .invocations()
            .map(|(index, expr)| (index, expr.method_name.clone()))
            .collect();
        assert_eq!(found, vec![(1, "foo".to_string()), (3, "bar".to_string())]);
    }

    #[test]
    fn test_invoke_expr_display() {
        let expr = InvokeExpr::new(InvokeKind::Static, "a.U", "max", ["int", "int"]);
        assert_eq!(expr.to_string(), "static a.U.max(int,int)");
    }
}
