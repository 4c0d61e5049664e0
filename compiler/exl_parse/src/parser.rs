//! Operand/operator dual-stack machine.
//!
//! Tokens are consumed one at a time. Operands go on the operand stack;
//! operators wait on the entry stack until an operator of lower
//! precedence (or a separator) forces them to reduce. Opening brackets push
//! a marker onto the entry stack; everything parsed until the matching
//! close is collected into that marker's block.
//!
//! Two operands with nothing between them are separate items of the
//! enclosing group, so `a b c` and `a, b, c` build the same list. The
//! exceptions are postfix forms: a symbol followed by `(` opens a call,
//! and a `[` written directly against an operand opens an index.

use exl_ir::{Associativity, BlockKind, Node, OpKind, Span, Value};
use exl_lexer::{LexError, Lexer, Token, TokenKind};
use smallvec::SmallVec;
use tracing::trace;

use crate::ParseError;

enum FrameKind {
    TopLevel,
    Paren,
    Array,
    Call { name: String, name_span: Span },
    /// Holds the base operand being indexed.
    Index(Node),
}

impl FrameKind {
    fn brackets(&self) -> Option<(char, char)> {
        match self {
            FrameKind::TopLevel => None,
            FrameKind::Paren | FrameKind::Call { .. } => Some(('(', ')')),
            FrameKind::Array | FrameKind::Index(_) => Some(('[', ']')),
        }
    }
}

struct Frame {
    kind: FrameKind,
    /// Operand stack height when the frame opened.
    base: usize,
    /// Span of the opening bracket.
    span: Span,
    /// Set once a comma separated two items.
    comma: bool,
}

enum Entry {
    Operator(OpKind, Span),
    Marker(Frame),
}

#[derive(Copy, Clone)]
struct Prev {
    span: Span,
    symbol: bool,
}

pub(crate) struct Parser<'src> {
    lexer: Lexer<'src>,
    operands: Vec<Node>,
    entries: SmallVec<[Entry; 16]>,
    expect_operand: bool,
    prev: Option<Prev>,
}

impl<'src> Parser<'src> {
    pub(crate) fn new(source: &'src str) -> Self {
        let mut entries = SmallVec::new();
        entries.push(Entry::Marker(Frame {
            kind: FrameKind::TopLevel,
            base: 0,
            span: Span::point(0),
            comma: false,
        }));
        Parser {
            lexer: Lexer::new(source),
            operands: Vec::new(),
            entries,
            expect_operand: true,
            prev: None,
        }
    }

    pub(crate) fn run(mut self) -> Result<Node, ParseError> {
        while let Some(token) = self.lexer.next() {
            self.step(token?)?;
        }
        self.finish()
    }

    fn step(&mut self, token: Token) -> Result<(), ParseError> {
        let Token { kind, span } = token;
        let prev = self.prev.replace(Prev {
            span,
            symbol: matches!(kind, TokenKind::Ident),
        });
        match kind {
            TokenKind::Int(n) => self.push_int(n, span),
            TokenKind::Float(x) => self.push_float(x, span),
            TokenKind::Str(text) => self.push_operand(Node::literal(Value::string(&text), span)),
            TokenKind::Ident => {
                let name = self.lexer.slice(span);
                self.push_operand(Node::symbol(name, span))
            }
            TokenKind::LParen => self.open_paren(prev, span),
            TokenKind::LBracket => self.open_bracket(prev, span),
            TokenKind::RParen => self.close(')', span),
            TokenKind::RBracket => self.close(']', span),
            TokenKind::Comma => self.comma(span),
            other => self.operator(&other, span),
        }
    }

    // Operands

    fn push_operand(&mut self, node: Node) -> Result<(), ParseError> {
        if !self.expect_operand {
            self.reduce_to_marker()?;
        }
        trace!(node = %node, "shift operand");
        self.operands.push(node);
        self.expect_operand = false;
        Ok(())
    }

    fn push_int(&mut self, magnitude: u64, span: Span) -> Result<(), ParseError> {
        let (n, span) = match self.take_adjacent_negate(span) {
            Some(op_span) => (0i64.checked_sub_unsigned(magnitude), op_span.merge(span)),
            None => (i64::try_from(magnitude).ok(), span),
        };
        let Some(n) = n else {
            return Err(ParseError::Lex(LexError::MalformedNumber {
                text: self.lexer.slice(span).to_string(),
                span,
            }));
        };
        self.push_operand(Node::literal(Value::int(n), span))
    }

    fn push_float(&mut self, x: f64, span: Span) -> Result<(), ParseError> {
        let (x, span) = match self.take_adjacent_negate(span) {
            Some(op_span) => (-x, op_span.merge(span)),
            None => (x, span),
        };
        self.push_operand(Node::literal(Value::float(x), span))
    }

    /// A `-` written directly against a number folds into the literal.
    ///
    /// Pops the pending negate and returns its span when it applies.
    fn take_adjacent_negate(&mut self, span: Span) -> Option<Span> {
        if !self.expect_operand {
            return None;
        }
        match self.entries.last() {
            Some(&Entry::Operator(OpKind::Negate, op_span)) if op_span.touches(span) => {
                self.entries.pop();
                Some(op_span)
            }
            _ => None,
        }
    }

    // Operators

    fn operator(&mut self, kind: &TokenKind, span: Span) -> Result<(), ParseError> {
        if !self.expect_operand {
            if let Some(op) = kind.binary_op() {
                self.reduce_while(|top| binds_before(top, op))?;
                trace!(op = op.symbol(), "shift operator");
                self.entries.push(Entry::Operator(op, span));
                self.expect_operand = true;
                return Ok(());
            }
            // `a !b` starts a new item
            if kind.unary_op().is_some() {
                self.reduce_to_marker()?;
                self.expect_operand = true;
            }
        }
        match kind.unary_op() {
            Some(op) => {
                trace!(op = op.symbol(), "shift prefix operator");
                self.entries.push(Entry::Operator(op, span));
                Ok(())
            }
            None => Err(ParseError::UnexpectedToken {
                text: self.lexer.slice(span).to_string(),
                span,
            }),
        }
    }

    fn reduce_while(&mut self, mut pred: impl FnMut(OpKind) -> bool) -> Result<(), ParseError> {
        while let Some(&Entry::Operator(op, span)) = self.entries.last() {
            if !pred(op) {
                break;
            }
            self.entries.pop();
            self.apply(op, span)?;
        }
        Ok(())
    }

    fn reduce_to_marker(&mut self) -> Result<(), ParseError> {
        self.reduce_while(|_| true)
    }

    /// Pop `op.arity()` operands and push the operator node built from them.
    fn apply(&mut self, op: OpKind, span: Span) -> Result<(), ParseError> {
        let base = self.frame().map_or(0, |frame| frame.base);
        let arity = op.arity();
        if self.operands.len() < base + arity {
            return Err(ParseError::MissingOperand { op, span });
        }
        let operands = self.operands.split_off(self.operands.len() - arity);
        let node_span = operands
            .iter()
            .fold(span, |acc, operand| acc.merge(operand.span));
        trace!(op = op.symbol(), "reduce");
        self.operands.push(Node::operator(op, operands, node_span));
        Ok(())
    }

    fn frame(&self) -> Option<&Frame> {
        self.entries.iter().rev().find_map(|entry| match entry {
            Entry::Marker(frame) => Some(frame),
            Entry::Operator(..) => None,
        })
    }

    /// Error for a separator or close that arrived where an operand was due.
    fn dangling(&self, text: &str, span: Span) -> ParseError {
        match self.entries.last() {
            Some(&Entry::Operator(op, op_span)) => ParseError::MissingOperand { op, span: op_span },
            _ => ParseError::UnexpectedToken {
                text: text.to_string(),
                span,
            },
        }
    }

    // Brackets

    fn open(&mut self, kind: FrameKind, span: Span) {
        trace!(base = self.operands.len(), "open block");
        self.entries.push(Entry::Marker(Frame {
            kind,
            base: self.operands.len(),
            span,
            comma: false,
        }));
        self.expect_operand = true;
    }

    fn open_paren(&mut self, prev: Option<Prev>, span: Span) -> Result<(), ParseError> {
        if !self.expect_operand && prev.is_some_and(|p| p.symbol) {
            if let Some(node) = self.operands.pop() {
                let name_span = node.span;
                match node.into_symbol_name() {
                    Ok(name) => {
                        self.open(FrameKind::Call { name, name_span }, span);
                        return Ok(());
                    }
                    Err(node) => self.operands.push(node),
                }
            }
        }
        if !self.expect_operand {
            self.reduce_to_marker()?;
        }
        self.open(FrameKind::Paren, span);
        Ok(())
    }

    fn open_bracket(&mut self, prev: Option<Prev>, span: Span) -> Result<(), ParseError> {
        if !self.expect_operand && prev.is_some_and(|p| p.span.touches(span)) {
            if let Some(base) = self.operands.pop() {
                self.open(FrameKind::Index(base), span);
                return Ok(());
            }
        }
        if !self.expect_operand {
            self.reduce_to_marker()?;
        }
        self.open(FrameKind::Array, span);
        Ok(())
    }

    fn comma(&mut self, span: Span) -> Result<(), ParseError> {
        if self.expect_operand {
            return Err(self.dangling(",", span));
        }
        self.reduce_to_marker()?;
        if let Some(Entry::Marker(frame)) = self.entries.last_mut() {
            frame.comma = true;
        }
        self.expect_operand = true;
        Ok(())
    }

    fn close(&mut self, close: char, span: Span) -> Result<(), ParseError> {
        if self.expect_operand {
            if let Some(&Entry::Operator(op, op_span)) = self.entries.last() {
                return Err(ParseError::MissingOperand { op, span: op_span });
            }
        }
        self.reduce_to_marker()?;
        let Some(Entry::Marker(frame)) = self.entries.pop() else {
            return Err(ParseError::Unmatched { close, span });
        };
        let Some((_, expected)) = frame.kind.brackets() else {
            return Err(ParseError::Unmatched { close, span });
        };
        if expected != close {
            return Err(ParseError::Mismatched {
                expected,
                found: close,
                span,
            });
        }

        let items = self.operands.split_off(frame.base);
        let outer = frame.span.merge(span);
        let node = match frame.kind {
            FrameKind::Paren if items.len() == 1 && !frame.comma => {
                Node::block(BlockKind::Paren, items, outer)
            }
            FrameKind::Paren => Node::block(BlockKind::List, items, outer),
            FrameKind::Array => Node::block(BlockKind::Array, items, outer),
            FrameKind::Call { name, name_span } => Node::call(name, items, name_span.merge(span)),
            FrameKind::Index(base) => {
                if items.is_empty() {
                    return Err(ParseError::EmptyIndex { span: outer });
                }
                let index_span = base.span.merge(span);
                let mut children = Vec::with_capacity(items.len() + 1);
                children.push(base);
                children.extend(items);
                Node::block(BlockKind::Index, children, index_span)
            }
            FrameKind::TopLevel => return Err(ParseError::Unmatched { close, span }),
        };
        trace!(node = %node, "close block");
        self.operands.push(node);
        self.expect_operand = false;
        Ok(())
    }

    // End of input

    fn finish(mut self) -> Result<Node, ParseError> {
        let end = self.lexer.end_span();
        if self.expect_operand {
            if let Some(&Entry::Operator(op, span)) = self.entries.last() {
                return Err(ParseError::MissingOperand { op, span });
            }
        }
        self.reduce_to_marker()?;
        let frame = match self.entries.pop() {
            Some(Entry::Marker(frame)) => frame,
            _ => return Err(ParseError::Empty { span: end }),
        };
        if let Some((open, _)) = frame.kind.brackets() {
            return Err(ParseError::Unclosed {
                open,
                span: frame.span,
            });
        }

        let mut items = std::mem::take(&mut self.operands);
        if items.len() == 1 && !frame.comma {
            if let Some(node) = items.pop() {
                return Ok(node);
            }
        }
        match (items.first(), items.last()) {
            (Some(first), Some(last)) => {
                let span = first.span.merge(last.span);
                Ok(Node::block(BlockKind::List, items, span))
            }
            _ => Err(ParseError::Empty { span: end }),
        }
    }
}

/// Whether the stacked operator `top` reduces before `incoming` is shifted.
fn binds_before(top: OpKind, incoming: OpKind) -> bool {
    let (top_prec, incoming_prec) = (top.precedence(), incoming.precedence());
    top_prec > incoming_prec
        || (top_prec == incoming_prec && incoming.associativity() == Associativity::Left)
}
