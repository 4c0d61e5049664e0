//! Parser for EXL expressions.
//!
//! ```text
//! expr      := expr ('||' | '&&') expr
//!            | expr ('==' | '!=' | '<' | '>' | '<=' | '>=') expr
//!            | expr ('+' | '-' | '*' | '/' | '%') expr
//!            | ('!' | '-') expr
//!            | primary
//! primary   := literal | symbol | call | index
//!            | '(' items? ')' | '[' items? ']'
//! call      := symbol '(' items? ')'
//! index     := primary '[' items ']'     // no space before '['
//! items     := expr ((',' | WS) expr)* ','?
//! ```
//!
//! Top-level input is itself an item list: `a b c` is `list(a,b,c)`.

mod error;
mod parser;

pub use error::ParseError;

use exl_ir::Node;

use parser::Parser;

/// Parse a complete expression.
#[tracing::instrument(level = "debug", skip(source), fields(len = source.len()))]
pub fn parse(source: &str) -> Result<Node, ParseError> {
    let result = Parser::new(source).run();
    match &result {
        Ok(node) => tracing::debug!(nodes = node.count(), "parsed"),
        Err(err) => tracing::debug!(%err, "parse failed"),
    }
    result
}
