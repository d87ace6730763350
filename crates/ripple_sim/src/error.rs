//! Simulation error types for the cycle-stepped simulator.
//!
//! Every failure that can occur during simulation setup or execution is a
//! variant of [`SimError`]. All of them are fatal: the run aborts with no
//! partial output.

/// Errors that can occur during simulation setup or execution.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A referenced signal has no binding reachable from the evaluating scope.
    #[error("undefined signal `{name}`")]
    UndefinedSignal {
        /// The unresolved signal name.
        name: String,
    },

    /// A call names a function with no registered definition.
    #[error("undefined function `{name}`")]
    UndefinedFunction {
        /// The unresolved function name.
        name: String,
    },

    /// A call's argument count disagrees with the definition's parameter count.
    #[error("function `{function}` expects {expected} argument(s), got {found}")]
    ArityMismatch {
        /// The called function.
        function: String,
        /// The definition's parameter count.
        expected: usize,
        /// The number of arguments supplied.
        found: usize,
    },

    /// An input signal has no matching input trace, or its trace is empty.
    #[error("missing or empty input trace for signal `{signal}`")]
    MissingInputTrace {
        /// The input signal without a usable trace.
        signal: String,
    },

    /// Input traces disagree on length.
    #[error("input trace for `{signal}` has length {found}, expected {expected}")]
    TraceLengthMismatch {
        /// The signal whose trace has the odd length.
        signal: String,
        /// The length established by earlier input traces.
        expected: usize,
        /// The offending trace's length.
        found: usize,
    },

    /// An update equation targets a latch output signal.
    ///
    /// Latch outputs are written only by the simulator's propagation step.
    #[error("update equation assigns latch output `{target}`")]
    LatchOutputAssigned {
        /// The latch output signal named as an update target.
        target: String,
    },

    /// Function calls nested deeper than the configured limit, indicating
    /// runaway recursion between definitions.
    #[error("call depth limit exceeded ({limit} nested calls)")]
    CallDepthExceeded {
        /// The configured maximum call depth.
        limit: u32,
    },
}
