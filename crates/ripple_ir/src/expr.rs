//! Boolean expression trees over named signals.
//!
//! [`Expr`] is the right-hand side of an update equation or the body of a
//! function definition. Its five forms mirror the surface syntax of the
//! netlist language: signal references, `/` negation, `*` conjunction,
//! `+` disjunction, and calls to named function definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A boolean expression over named signals.
///
/// Expressions are immutable once constructed. Evaluation resolves signal
/// names against the current environment; `Call` arguments are evaluated in
/// the caller's scope and bound to the definition's formal parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    /// A reference to a named signal.
    Signal(String),
    /// Negation (`/e`).
    Not(Box<Expr>),
    /// Conjunction (`a * b`).
    And(Box<Expr>, Box<Expr>),
    /// Disjunction (`a + b`).
    Or(Box<Expr>, Box<Expr>),
    /// An invocation of a named function definition, e.g. `xor(A, /B)`.
    Call {
        /// The function name.
        name: String,
        /// The argument expressions, evaluated in the caller's scope.
        args: Vec<Expr>,
    },
}

impl Expr {
    /// Creates a signal reference.
    pub fn signal(name: impl Into<String>) -> Self {
        Expr::Signal(name.into())
    }

    /// Creates a negation.
    pub fn not(inner: Expr) -> Self {
        Expr::Not(Box::new(inner))
    }

    /// Creates a conjunction.
    pub fn and(lhs: Expr, rhs: Expr) -> Self {
        Expr::And(Box::new(lhs), Box::new(rhs))
    }

    /// Creates a disjunction.
    pub fn or(lhs: Expr, rhs: Expr) -> Self {
        Expr::Or(Box::new(lhs), Box::new(rhs))
    }

    /// Creates a function invocation.
    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            name: name.into(),
            args,
        }
    }

    // Precedence levels for display: Or < And < Not < atoms.
    fn precedence(&self) -> u8 {
        match self {
            Expr::Or(..) => 0,
            Expr::And(..) => 1,
            Expr::Not(..) => 2,
            Expr::Signal(_) | Expr::Call { .. } => 3,
        }
    }

    fn fmt_prec(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        let parens = self.precedence() < min;
        if parens {
            write!(f, "(")?;
        }
        match self {
            Expr::Signal(name) => write!(f, "{name}")?,
            Expr::Not(inner) => {
                write!(f, "/")?;
                inner.fmt_prec(f, 2)?;
            }
            Expr::And(lhs, rhs) => {
                lhs.fmt_prec(f, 1)?;
                write!(f, " * ")?;
                rhs.fmt_prec(f, 1)?;
            }
            Expr::Or(lhs, rhs) => {
                lhs.fmt_prec(f, 0)?;
                write!(f, " + ")?;
                rhs.fmt_prec(f, 0)?;
            }
            Expr::Call { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    arg.fmt_prec(f, 0)?;
                }
                write!(f, ")")?;
            }
        }
        if parens {
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_prec(f, 0)
    }
}
