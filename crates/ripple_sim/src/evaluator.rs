//! Recursive evaluator for boolean expressions.
//!
//! [`eval_expr`] walks an [`Expr`] tree, reading signal values from the
//! [`Environment`] and dispatching user-function calls through the circuit's
//! definition table. Call bodies run in a fresh child scope of the root,
//! holding only the formal-parameter bindings, so calls can never leak
//! bindings into the caller's scope.

use ripple_ir::{DefTable, Expr};

use crate::env::{Environment, ScopeId};
use crate::error::SimError;

/// The default limit on nested function calls.
///
/// Definitions may reference each other (or themselves); the depth limit
/// turns runaway recursion into a [`SimError::CallDepthExceeded`] instead of
/// overflowing the stack.
pub const DEFAULT_MAX_CALL_DEPTH: u32 = 64;

/// Context for expression evaluation.
///
/// Holds the definition table and the call-depth limit; the mutable
/// [`Environment`] is passed separately because call handling allocates
/// and discards scopes.
pub struct EvalContext<'a> {
    /// The circuit's function definitions.
    pub defs: &'a DefTable,
    /// Maximum number of nested function calls before the run aborts.
    pub max_call_depth: u32,
}

/// Evaluates an expression to a boolean in the given scope.
pub fn eval_expr(
    ctx: &EvalContext<'_>,
    env: &mut Environment,
    scope: ScopeId,
    expr: &Expr,
) -> Result<bool, SimError> {
    eval_at_depth(ctx, env, scope, expr, 0)
}

fn eval_at_depth(
    ctx: &EvalContext<'_>,
    env: &mut Environment,
    scope: ScopeId,
    expr: &Expr,
    depth: u32,
) -> Result<bool, SimError> {
    match expr {
        Expr::Signal(name) => env.get(scope, name),

        Expr::Not(inner) => Ok(!eval_at_depth(ctx, env, scope, inner, depth)?),

        // Both operands are evaluated even when the left one already decides
        // the result; an error on either side aborts the run.
        Expr::And(lhs, rhs) => {
            let l = eval_at_depth(ctx, env, scope, lhs, depth)?;
            let r = eval_at_depth(ctx, env, scope, rhs, depth)?;
            Ok(l && r)
        }

        Expr::Or(lhs, rhs) => {
            let l = eval_at_depth(ctx, env, scope, lhs, depth)?;
            let r = eval_at_depth(ctx, env, scope, rhs, depth)?;
            Ok(l || r)
        }

        Expr::Call { name, args } => {
            let def = ctx
                .defs
                .get(name)
                .ok_or_else(|| SimError::UndefinedFunction { name: name.clone() })?;
            if args.len() != def.arity() {
                return Err(SimError::ArityMismatch {
                    function: name.clone(),
                    expected: def.arity(),
                    found: args.len(),
                });
            }
            if depth >= ctx.max_call_depth {
                return Err(SimError::CallDepthExceeded {
                    limit: ctx.max_call_depth,
                });
            }

            // Arguments are evaluated in the caller's scope.
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(eval_at_depth(ctx, env, scope, arg, depth)?);
            }

            // The body runs in a fresh child of the root scope (definitions
            // are global), never of the caller's scope.
            let mark = env.scope_count();
            let call_scope = env.child_scope(Environment::ROOT);
            for (param, value) in def.params.iter().zip(values) {
                env.set(call_scope, param.clone(), value);
            }
            let result = eval_at_depth(ctx, env, call_scope, &def.body, depth + 1);
            env.truncate(mark);
            result
        }
    }
}
