//! Command handlers for the `exl` CLI.
//!
//! Each handler prints its own output and exits the process with status 1
//! on failure.

mod eval;
mod parse;
mod test;

pub use eval::eval_expr;
pub use parse::parse_expr;
pub use test::run_vector_files;

use std::io::IsTerminal;

use exl_ir::Node;

use crate::diagnostics::render_parse_error;

/// Parse `source`, or print a diagnostic and exit.
pub(crate) fn parse_or_exit(source: &str) -> Node {
    match exl_parse::parse(source) {
        Ok(tree) => tree,
        Err(err) => {
            let color = std::io::stderr().is_terminal();
            eprint!("{}", render_parse_error(source, &err, color));
            std::process::exit(1);
        }
    }
}
