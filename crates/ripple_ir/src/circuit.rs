//! The top-level circuit description.
//!
//! A [`Circuit`] is the primary output of the (external) parser and the
//! input to the simulator: declared inputs, outputs and latches, the
//! function definitions, the update equations in source order, and one
//! input trace per declared input signal.

use crate::def::DefTable;
use crate::expr::Expr;
use crate::trace::Trace;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One update equation, `signal = expression`.
///
/// Updates are applied strictly in declared order within each cycle; an
/// update may read signals written by earlier updates in the same cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    /// The signal being assigned.
    pub target: String,
    /// The expression whose value the signal receives.
    pub expr: Expr,
}

impl Update {
    /// Creates an update equation.
    pub fn new(target: impl Into<String>, expr: Expr) -> Self {
        Self {
            target: target.into(),
            expr,
        }
    }
}

impl fmt::Display for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.target, self.expr)
    }
}

/// Returns the name of a latch's output signal: the latch name plus `'`.
///
/// The latch output is written only by the simulator's propagation step,
/// never by an update equation.
pub fn latch_output(latch: &str) -> String {
    format!("{latch}'")
}

/// A complete circuit description with its simulation inputs.
///
/// Built once by the parser and immutable for the duration of a run. The
/// simulation length is not stored: it is the common length of all input
/// traces, validated by the simulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    /// The circuit name.
    pub name: String,
    /// Declared input signal names.
    pub inputs: Vec<String>,
    /// Declared output signal names.
    pub outputs: Vec<String>,
    /// Declared latch (input) signal names.
    pub latches: Vec<String>,
    /// The function definitions usable in update expressions.
    pub definitions: DefTable,
    /// The update equations, in source order.
    pub updates: Vec<Update>,
    /// One input trace per declared input signal.
    pub siminputs: Vec<Trace>,
}

impl Circuit {
    /// Returns the input trace for the given signal, if any.
    pub fn siminput(&self, signal: &str) -> Option<&Trace> {
        self.siminputs.iter().find(|t| t.signal == signal)
    }
}
