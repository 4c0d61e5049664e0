//! Parse errors.

use exl_ir::{OpKind, Span};
use exl_lexer::LexError;
use thiserror::Error;

/// Why an expression failed to parse. Parsing never yields a partial tree.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("unexpected `{text}`")]
    UnexpectedToken { text: String, span: Span },

    #[error("missing operand for `{op}`")]
    MissingOperand { op: OpKind, span: Span },

    #[error("unclosed `{open}`")]
    Unclosed { open: char, span: Span },

    #[error("unmatched `{close}`")]
    Unmatched { close: char, span: Span },

    #[error("expected `{expected}` but found `{found}`")]
    Mismatched {
        expected: char,
        found: char,
        span: Span,
    },

    #[error("index expression needs at least one index")]
    EmptyIndex { span: Span },

    #[error("empty expression")]
    Empty { span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(err) => err.span(),
            ParseError::UnexpectedToken { span, .. }
            | ParseError::MissingOperand { span, .. }
            | ParseError::Unclosed { span, .. }
            | ParseError::Unmatched { span, .. }
            | ParseError::Mismatched { span, .. }
            | ParseError::EmptyIndex { span }
            | ParseError::Empty { span } => *span,
        }
    }

    /// The offending token text, when there is one.
    pub fn argument(&self) -> Option<String> {
        match self {
            ParseError::Lex(err) => Some(err.text().to_string()),
            ParseError::UnexpectedToken { text, .. } => Some(text.clone()),
            ParseError::MissingOperand { op, .. } => Some(op.symbol().to_string()),
            ParseError::Unclosed { open, .. } => Some(open.to_string()),
            ParseError::Unmatched { close, .. } => Some(close.to_string()),
            ParseError::Mismatched { found, .. } => Some(found.to_string()),
            ParseError::EmptyIndex { .. } | ParseError::Empty { .. } => None,
        }
    }
}
