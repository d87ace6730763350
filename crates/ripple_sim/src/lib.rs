//! Cycle-stepped simulation engine for the ripple netlist simulator.
//!
//! This crate consumes a fully-built [`Circuit`](ripple_ir::Circuit) from
//! `ripple_ir` together with one input trace per declared input signal, and
//! computes the time series of every output signal, carrying latch state
//! from one cycle to the next with a one-cycle delay.
//!
//! # Architecture
//!
//! Signal values live in an [`Environment`]: an arena of scope records whose
//! root scope spans the whole run and whose child scopes exist only for the
//! duration of one function call. The recursive [`evaluator`] resolves the
//! five expression forms against the environment; the [`kernel`] drives
//! cycle 0 and every subsequent cycle, applying update equations strictly in
//! declared order.
//!
//! # Usage
//!
//! ```ignore
//! use ripple_sim::{simulate, SimConfig};
//!
//! let result = simulate(&circuit, &SimConfig::default())?;
//! for trace in &result.outputs {
//!     println!("{trace}");
//! }
//! ```
//!
//! # Modules
//!
//! - `error` — Simulation error types
//! - `env` — The scoped signal environment
//! - `evaluator` — Recursive expression evaluation
//! - `kernel` — The cycle-stepped simulation driver

#![warn(missing_docs)]

pub mod env;
pub mod error;
pub mod evaluator;
pub mod kernel;

use ripple_ir::Circuit;
use serde::{Deserialize, Serialize};

pub use env::{Environment, ScopeId};
pub use error::SimError;
pub use evaluator::{eval_expr, EvalContext, DEFAULT_MAX_CALL_DEPTH};
pub use kernel::{SimResult, Simulator};

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Maximum number of nested function calls before the run aborts with
    /// [`SimError::CallDepthExceeded`].
    pub max_call_depth: u32,
    /// Whether to record a per-cycle snapshot of all signal bindings into
    /// the [`SimResult`].
    pub record_snapshots: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            record_snapshots: false,
        }
    }
}

/// High-level entry point: runs one full simulation of a circuit.
///
/// Creates a [`Simulator`], validates the input traces, and drives every
/// cycle to completion. On success all output traces in the returned
/// [`SimResult`] are fully populated; on failure no partial result is
/// delivered.
pub fn simulate(circuit: &Circuit, config: &SimConfig) -> Result<SimResult, SimError> {
    Simulator::new(circuit, config)?.run()
}
