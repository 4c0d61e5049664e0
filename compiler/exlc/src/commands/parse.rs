//! `exl parse`: print the tree for an expression.

use super::parse_or_exit;

/// Print the prefix rendering of `source`, then its re-parsable infix form.
pub fn parse_expr(source: &str) {
    let tree = parse_or_exit(source);
    println!("{tree}");
    println!("  source: {}", tree.source());
    println!("  nodes:  {}", tree.count());
}
