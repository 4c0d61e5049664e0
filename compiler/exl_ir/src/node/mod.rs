//! Expression tree.
//!
//! A parsed expression is a tree of [`Node`]s. Structure is fixed once the
//! parser returns; the only interior mutability is the write-once resolver
//! cache on symbol and call nodes.
//!
//! Children are owned vectors. Dropping a node drops its subtree and any
//! resolvers cached inside it; the subtree is flattened onto a heap work
//! list first, so drop depth does not grow with tree depth.

mod op;
mod render;

use crate::resolver::ResolverSlot;
use crate::{Span, Value};

pub use op::{Associativity, OpKind};
pub use render::Source;

/// One element of a parsed expression.
#[derive(Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

#[derive(Debug)]
pub enum NodeKind {
    /// Int, float, or string constant.
    Literal(Value),
    Symbol(Symbol),
    Operator(Operator),
    Block(Block),
}

/// Named reference resolved through the host context.
#[derive(Debug)]
pub struct Symbol {
    name: String,
    slot: ResolverSlot,
}

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Symbol {
            name: name.into(),
            slot: ResolverSlot::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn slot(&self) -> &ResolverSlot {
        &self.slot
    }
}

/// Unary or binary operator applied to its operands.
///
/// `operands.len()` always equals `op.arity()`.
#[derive(Debug)]
pub struct Operator {
    pub op: OpKind,
    pub operands: Vec<Node>,
}

/// Bracketed group or call with ordered children.
#[derive(Debug)]
pub struct Block {
    pub kind: BlockKind,
    pub children: Vec<Node>,
}

#[derive(Debug)]
pub enum BlockKind {
    /// `( expr )`; exactly one child.
    Paren,
    /// `(a, b)`, `a b`, or `()`.
    List,
    /// `[a, b]`.
    Array,
    /// `base[i, ...]`; the first child is the base.
    Index,
    /// `name(args...)`.
    Call(Call),
}

/// Function call target.
///
/// Builtin functions and host resolvers share the same cache slot; the
/// first successful lookup wins for the node's lifetime.
#[derive(Debug)]
pub struct Call {
    name: String,
    slot: ResolverSlot,
}

impl Call {
    pub fn new(name: impl Into<String>) -> Self {
        Call {
            name: name.into(),
            slot: ResolverSlot::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn slot(&self) -> &ResolverSlot {
        &self.slot
    }
}

impl Node {
    pub fn literal(value: Value, span: Span) -> Self {
        Node {
            kind: NodeKind::Literal(value),
            span,
        }
    }

    pub fn symbol(name: impl Into<String>, span: Span) -> Self {
        Node {
            kind: NodeKind::Symbol(Symbol::new(name)),
            span,
        }
    }

    pub fn operator(op: OpKind, operands: Vec<Node>, span: Span) -> Self {
        debug_assert_eq!(operands.len(), op.arity());
        Node {
            kind: NodeKind::Operator(Operator { op, operands }),
            span,
        }
    }

    pub fn block(kind: BlockKind, children: Vec<Node>, span: Span) -> Self {
        Node {
            kind: NodeKind::Block(Block { kind, children }),
            span,
        }
    }

    pub fn call(name: impl Into<String>, args: Vec<Node>, span: Span) -> Self {
        Node::block(BlockKind::Call(Call::new(name)), args, span)
    }

    /// Symbol name, if this is a symbol reference.
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match &self.kind {
            NodeKind::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    /// Consume a symbol node, returning its name.
    pub fn into_symbol_name(mut self) -> Result<String, Node> {
        match &mut self.kind {
            NodeKind::Symbol(symbol) => Ok(std::mem::take(&mut symbol.name)),
            _ => Err(self),
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.kind, NodeKind::Literal(_))
    }

    /// Direct children in evaluation order.
    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Literal(_) | NodeKind::Symbol(_) => &[],
            NodeKind::Operator(operator) => &operator.operands,
            NodeKind::Block(block) => &block.children,
        }
    }

    /// Number of nodes in this subtree.
    pub fn count(&self) -> usize {
        exl_stack::ensure_sufficient_stack(|| {
            1 + self.children().iter().map(Node::count).sum::<usize>()
        })
    }

    /// Renders as re-parseable, fully parenthesized source text.
    pub fn source(&self) -> Source<'_> {
        Source(self)
    }

    /// Detach the direct children, leaving this node childless.
    fn take_children(&mut self) -> Vec<Node> {
        match &mut self.kind {
            NodeKind::Literal(_) | NodeKind::Symbol(_) => Vec::new(),
            NodeKind::Operator(operator) => std::mem::take(&mut operator.operands),
            NodeKind::Block(block) => std::mem::take(&mut block.children),
        }
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = self.take_children();
        while let Some(mut node) = pending.pop() {
            let mut children = node.take_children();
            pending.append(&mut children);
            // `node` is childless here, so its own drop is shallow
        }
    }
}
