//! Circuit description types for the ripple netlist simulator.
//!
//! This crate defines the immutable data model handed from the parser to the
//! simulation engine: boolean [`Expr`] trees, function [`Def`]initions,
//! update equations, per-signal [`Trace`]s, and the top-level [`Circuit`].

#![warn(missing_docs)]

pub mod circuit;
pub mod def;
pub mod error;
pub mod expr;
pub mod trace;

pub use circuit::{latch_output, Circuit, Update};
pub use def::{Def, DefTable};
pub use error::IrError;
pub use expr::Expr;
pub use trace::Trace;
