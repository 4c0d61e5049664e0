//! Operator kinds and their parsing properties.

use std::fmt;

/// Unary and binary operators.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum OpKind {
    // Unary
    Not,    // !
    Negate, // -

    // Arithmetic
    Add, // +
    Sub, // -
    Mul, // *
    Div, // /
    Mod, // %

    // Comparison
    Eq,    // ==
    NotEq, // !=
    Lt,    // <
    Gt,    // >
    LtEq,  // <=
    GtEq,  // >=

    // Logical
    And, // &&
    Or,  // ||
}

/// How operators of equal precedence group.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Associativity {
    Left,
    Right,
}

impl OpKind {
    /// Number of operands: 1 for `!` and unary `-`, 2 otherwise.
    #[inline]
    pub fn arity(self) -> usize {
        match self {
            OpKind::Not | OpKind::Negate => 1,
            _ => 2,
        }
    }

    #[inline]
    pub fn is_unary(self) -> bool {
        self.arity() == 1
    }

    /// Binding strength (higher = tighter).
    ///
    /// Relational and equality operators share one level; `&&` binds
    /// tighter than `||`.
    pub fn precedence(self) -> u8 {
        match self {
            OpKind::Not | OpKind::Negate => 7,
            OpKind::Mul | OpKind::Div | OpKind::Mod => 6,
            OpKind::Add | OpKind::Sub => 5,
            OpKind::Eq
            | OpKind::NotEq
            | OpKind::Lt
            | OpKind::Gt
            | OpKind::LtEq
            | OpKind::GtEq => 4,
            OpKind::And => 2,
            OpKind::Or => 1,
        }
    }

    /// Prefix operators nest to the right; binary operators chain left.
    #[inline]
    pub fn associativity(self) -> Associativity {
        if self.is_unary() {
            Associativity::Right
        } else {
            Associativity::Left
        }
    }

    /// Source spelling, also used as the rendered operator name.
    pub fn symbol(self) -> &'static str {
        match self {
            OpKind::Not => "!",
            OpKind::Negate | OpKind::Sub => "-",
            OpKind::Add => "+",
            OpKind::Mul => "*",
            OpKind::Div => "/",
            OpKind::Mod => "%",
            OpKind::Eq => "==",
            OpKind::NotEq => "!=",
            OpKind::Lt => "<",
            OpKind::Gt => ">",
            OpKind::LtEq => "<=",
            OpKind::GtEq => ">=",
            OpKind::And => "&&",
            OpKind::Or => "||",
        }
    }

    /// True for operators whose operands are only ever read as booleans.
    #[inline]
    pub fn is_logical(self) -> bool {
        matches!(self, OpKind::Not | OpKind::And | OpKind::Or)
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
