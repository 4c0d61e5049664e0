//! Evaluator tests, grouped by the module under test.

#![allow(clippy::unwrap_used, clippy::expect_used)]


use exl_ir::Value;

use crate::{MapContext, NodeEval};

/// Context with `i`=42, `f`=123.0, `b`=true, `s`="a value".
pub(crate) fn fixed_context() -> MapContext {
    MapContext::new()
        .with("i", 42i64)
        .with("f", 123.0)
        .with("b", true)
        .with("s", "a value")
}

/// Parse and evaluate against the fixed context.
pub(crate) fn eval(source: &str) -> Value {
    let tree = exl_parse::parse(source).unwrap();
    tree.eval(&fixed_context())
}

/// Parse, evaluate, and render the result.
pub(crate) fn eval_str(source: &str) -> String {
    eval(source).to_string()
}
