//! `exl eval`: evaluate an expression.

use std::time::Instant;

use exl_eval::NodeEval;

use super::parse_or_exit;
use crate::config::EvalConfig;

/// Evaluate `source` `config.repeat` times against the `--set` bindings
/// and print the last result.
///
/// The tree is parsed once; later rounds run on cached resolvers.
pub fn eval_expr(source: &str, config: &EvalConfig) {
    let tree = parse_or_exit(source);
    let ctx = config.context();

    let start = Instant::now();
    let mut value = tree.eval(&ctx);
    for _ in 1..config.repeat {
        tree.eval_into(&ctx, &mut value);
    }
    let elapsed = start.elapsed();

    println!("{value}");
    if config.repeat > 1 {
        eprintln!(
            "{} evaluations in {elapsed:?} ({:?} each)",
            config.repeat,
            elapsed / u32::try_from(config.repeat).unwrap_or(u32::MAX)
        );
    }
}
