//! Evaluation errors.
//!
//! None of these escape [`NodeEval::eval`](crate::NodeEval::eval): the node
//! that raised one logs it and yields null. They surface only through the
//! typed `eval_to_*` helpers and the operator/builtin entry points.

use std::fmt;

use exl_ir::{ErrorKind, OpKind, Value, ValueError, ValueKind};
use thiserror::Error;

/// Result of an operator or builtin.
pub type EvalResult = Result<Value, EvalError>;

/// Argument count accepted by a builtin.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(1) => write!(f, "1 argument"),
            Arity::Exactly(n) => write!(f, "{n} arguments"),
            Arity::AtLeast(1) => write!(f, "at least 1 argument"),
            Arity::AtLeast(n) => write!(f, "at least {n} arguments"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error(transparent)]
    Value(#[from] ValueError),

    #[error("cannot apply `{op}` to {left} and {right}")]
    TypeMismatch {
        op: OpKind,
        left: ValueKind,
        right: ValueKind,
    },

    #[error("cannot apply `{op}` to {operand}")]
    InvalidOperand { op: OpKind, operand: ValueKind },

    #[error("integer overflow in {op}")]
    Overflow { op: &'static str },

    #[error("cannot index into {found}")]
    NotAList { found: ValueKind },

    #[error("`{name}` takes {expected}, found {found}")]
    WrongArgCount {
        name: &'static str,
        expected: Arity,
        found: usize,
    },

    #[error("`{name}` does not accept {found}")]
    InvalidArgument { name: &'static str, found: ValueKind },
}

impl EvalError {
    /// Category in the runtime error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::Value(err) => err.kind(),
            _ => ErrorKind::Type,
        }
    }
}

#[cold]
pub(crate) fn type_mismatch(op: OpKind, left: &Value, right: &Value) -> EvalError {
    EvalError::TypeMismatch {
        op,
        left: left.kind(),
        right: right.kind(),
    }
}

#[cold]
pub(crate) fn overflow(op: &'static str) -> EvalError {
    EvalError::Overflow { op }
}
