//! Text rendering of expression trees.
//!
//! Two forms:
//!
//! - `Display` on [`Node`] is the canonical prefix form used by golden
//!   vectors: `a + b * c` renders `+(a,*(b,c))`.
//! - [`Source`] renders fully parenthesized infix text that parses back to
//!   an equivalent tree: `(a + (b * c))`.

use std::fmt::{self, Write};

use exl_stack::ensure_sufficient_stack;

use super::{BlockKind, Node, NodeKind, OpKind};
use crate::Value;

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match &self.kind {
            NodeKind::Literal(value) => write!(f, "{value}"),
            NodeKind::Symbol(symbol) => f.write_str(symbol.name()),
            NodeKind::Operator(operator) => {
                write!(f, "{}", operator.op)?;
                write_args(f, &operator.operands)
            }
            NodeKind::Block(block) => match &block.kind {
                BlockKind::Paren => match block.children.as_slice() {
                    [only] => write!(f, "{only}"),
                    children => write_args(f, children),
                },
                BlockKind::List => {
                    f.write_str("list")?;
                    write_args(f, &block.children)
                }
                BlockKind::Array => {
                    f.write_str("array")?;
                    write_args(f, &block.children)
                }
                BlockKind::Index => {
                    f.write_str("index")?;
                    write_args(f, &block.children)
                }
                BlockKind::Call(call) => {
                    f.write_str(call.name())?;
                    write_args(f, &block.children)
                }
            },
        })
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, nodes: &[Node]) -> fmt::Result {
    f.write_char('(')?;
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            f.write_char(',')?;
        }
        write!(f, "{node}")?;
    }
    f.write_char(')')
}

/// Infix source rendering of a node. See [`Node::source`].
pub struct Source<'a>(pub(super) &'a Node);

impl fmt::Display for Source<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| write_source(f, self.0))
    }
}

fn write_source(f: &mut fmt::Formatter<'_>, node: &Node) -> fmt::Result {
    match &node.kind {
        NodeKind::Literal(value) => write_literal(f, value),
        NodeKind::Symbol(symbol) => f.write_str(symbol.name()),
        NodeKind::Operator(operator) => match operator.operands.as_slice() {
            // The space keeps `- 1` from folding into a negative literal.
            [operand] if operator.op == OpKind::Negate => write!(f, "(- {})", operand.source()),
            [operand] => write!(f, "({}{})", operator.op, operand.source()),
            [left, right] => write!(
                f,
                "({} {} {})",
                left.source(),
                operator.op,
                right.source()
            ),
            operands => {
                write!(f, "{}", operator.op)?;
                write_sequence(f, '(', operands, ')')
            }
        },
        NodeKind::Block(block) => match &block.kind {
            BlockKind::List => match block.children.as_slice() {
                // `(x)` would be a group.
                [only] => write!(f, "({},)", only.source()),
                children => write_sequence(f, '(', children, ')'),
            },
            BlockKind::Paren => write_sequence(f, '(', &block.children, ')'),
            BlockKind::Array => write_sequence(f, '[', &block.children, ']'),
            BlockKind::Index => match block.children.split_first() {
                Some((base, indexes)) => {
                    write!(f, "{}", base.source())?;
                    write_sequence(f, '[', indexes, ']')
                }
                None => f.write_str("[]"),
            },
            BlockKind::Call(call) => {
                f.write_str(call.name())?;
                write_sequence(f, '(', &block.children, ')')
            }
        },
    }
}

fn write_sequence(
    f: &mut fmt::Formatter<'_>,
    open: char,
    nodes: &[Node],
    close: char,
) -> fmt::Result {
    f.write_char(open)?;
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", node.source())?;
    }
    f.write_char(close)
}

fn write_literal(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Int(n) => write!(f, "{n}"),
        Value::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:.1}"),
        Value::Float(x) => write!(f, "{x}"),
        Value::Str(s) => {
            f.write_char('"')?;
            for c in s.chars() {
                if c == '"' || c == '\\' {
                    f.write_char('\\')?;
                }
                f.write_char(c)?;
            }
            f.write_char('"')
        }
        other => write!(f, "{other}"),
    }
}
