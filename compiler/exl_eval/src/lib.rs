//! Evaluator for EXL expression trees.
//!
//! # Architecture
//!
//! - [`NodeEval`]: evaluation entry points on [`Node`]
//! - `interpreter`: the tree walker, with per-node error degradation
//! - [`evaluate_binary`] / [`evaluate_unary`]: direct operator dispatch
//! - `builtins`: `int`, `float`, `string`, `bool`, `abs`, `rand`, `scale`,
//!   `min`, `max`, `length`
//! - [`MapContext`]: a map-backed [`Context`] for hosts and tests
//!
//! # Resolution
//!
//! Symbol and call nodes resolve their name once and keep the resolver.
//! Re-evaluating a tree calls cached resolvers directly:
//!
//! ```text
//! let tree = exl_parse::parse("scale(level, 0, 127, 0, 1)")?;
//! for _ in 0..blocks {
//!     let gain = tree.eval_to_float(&ctx)?;   // `level` resolved once
//! }
//! ```

mod builtins;
mod context;
pub mod errors;
mod interpreter;
mod operators;

pub use builtins::{lookup as lookup_builtin, names as builtin_names};
pub use context::{ConstResolver, EmptyContext, MapContext};
pub use errors::{Arity, EvalError, EvalResult};
pub use interpreter::{eval_node, try_eval_node};
pub use operators::{evaluate_binary, evaluate_unary};

use exl_ir::{Context, ListOwner, ListSlot, Node, Value, ValueError, ValueKind, ValueList};

/// Evaluation of a parsed expression against a host context.
pub trait NodeEval {
    /// Evaluate to a value. Errors inside the tree degrade to null.
    fn eval(&self, ctx: &dyn Context) -> Value;

    /// Evaluate into an existing value, replacing its payload.
    fn eval_into(&self, ctx: &dyn Context, out: &mut Value) {
        *out = self.eval(ctx);
    }

    fn eval_to_int(&self, ctx: &dyn Context) -> Result<i64, EvalError> {
        Ok(self.eval(ctx).to_int()?)
    }

    fn eval_to_float(&self, ctx: &dyn Context) -> Result<f64, EvalError> {
        Ok(self.eval(ctx).to_float()?)
    }

    /// Null reads as `false`.
    fn eval_to_bool(&self, ctx: &dyn Context) -> Result<bool, EvalError> {
        Ok(self.eval(ctx).to_bool()?)
    }

    fn eval_to_string(&self, ctx: &dyn Context) -> Result<String, EvalError> {
        Ok(self.eval(ctx).to_text()?.into_owned())
    }

    /// Evaluate to a list the caller owns. A borrowed host list is copied.
    fn eval_to_list(&self, ctx: &dyn Context) -> Result<ValueList, EvalError> {
        match self.eval(ctx) {
            Value::List(ListSlot::Owned(mut list)) => {
                list.set_owner(ListOwner::Unowned);
                Ok(list)
            }
            Value::List(ListSlot::Borrowed(shared)) => Ok(shared.copy()),
            other => Err(ValueError::Coerce {
                from: other.kind(),
                to: ValueKind::List,
            }
            .into()),
        }
    }
}

impl NodeEval for Node {
    fn eval(&self, ctx: &dyn Context) -> Value {
        eval_node(self, ctx)
    }
}

#[cfg(test)]
mod tests;
