//! Construction-time validation errors for circuit descriptions.

/// Errors raised while assembling a circuit description.
///
/// These indicate an ill-formed description handed over by the parser, not a
/// simulation failure; run-time errors live in `ripple_sim`.
#[derive(Debug, thiserror::Error)]
pub enum IrError {
    /// A formal parameter name appears twice in one definition.
    #[error("duplicate formal parameter `{param}` in definition of `{function}`")]
    DuplicateParam {
        /// The definition's function name.
        function: String,
        /// The repeated parameter name.
        param: String,
    },

    /// Two definitions share one function name.
    #[error("duplicate definition of function `{name}`")]
    DuplicateDef {
        /// The repeated function name.
        name: String,
    },
}
