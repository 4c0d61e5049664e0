//! Tokenizer for EXL expressions.
//!
//! A logos-generated scanner produces raw tokens; this crate then cooks
//! them into [`Token`]s: number text becomes `u64`/`f64`, string literals
//! are unquoted and unescaped, and scanner failures become [`LexError`]s.
//!
//! Tokens are produced lazily by [`Lexer`], so the parser pulls one token
//! at a time and stops at the first error.
//!
//! Notes on the surface syntax:
//! - A number with a `.` is a float (`1.`, `.5`, `1.25`); otherwise an int.
//! - `-` is always its own token. `--1` is two minus tokens and a literal.
//! - Strings take `"` or `'` delimiters. A backslash escapes the delimiter
//!   or another backslash; any other escape is kept verbatim.
//! - There are no boolean literals; `true` is an identifier.

use std::fmt;

use exl_ir::{OpKind, Span};
use logos::Logos;
use thiserror::Error;

/// Raw token from logos (before cooking).
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    // === Literals ===
    #[regex(r"[0-9]+")]
    Int,
    #[regex(r"[0-9]+\.[0-9]*")]
    #[regex(r"\.[0-9]+")]
    Float,
    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'([^'\\]|\\.)*'")]
    Str,

    // Recognized only to report them precisely.
    #[regex(r#""([^"\\]|\\.)*\\?"#)]
    #[regex(r"'([^'\\]|\\.)*\\?")]
    UnterminatedStr,
    #[regex(r"[0-9]+[A-Za-z_][A-Za-z0-9_]*")]
    #[regex(r"[0-9]*\.[0-9]*\.[0-9.]*")]
    #[regex(r"[0-9]*\.[0-9]+[A-Za-z_][A-Za-z0-9_]*")]
    MalformedNumber,

    // === Identifiers ===
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    // === Delimiters ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,

    // === Operators ===
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("!")]
    Bang,
}

/// Cooked token kind.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// Integer magnitude; a leading `-` is folded in by the parser.
    Int(u64),
    Float(f64),
    /// Unescaped string contents.
    Str(String),
    /// Identifier; the name is the token's source text.
    Ident,

    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    EqEq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    AndAnd,
    OrOr,
    Bang,
}

impl TokenKind {
    /// Operator for this token in infix position.
    pub fn binary_op(&self) -> Option<OpKind> {
        match self {
            TokenKind::Plus => Some(OpKind::Add),
            TokenKind::Minus => Some(OpKind::Sub),
            TokenKind::Star => Some(OpKind::Mul),
            TokenKind::Slash => Some(OpKind::Div),
            TokenKind::Percent => Some(OpKind::Mod),
            TokenKind::EqEq => Some(OpKind::Eq),
            TokenKind::NotEq => Some(OpKind::NotEq),
            TokenKind::Lt => Some(OpKind::Lt),
            TokenKind::Gt => Some(OpKind::Gt),
            TokenKind::LtEq => Some(OpKind::LtEq),
            TokenKind::GtEq => Some(OpKind::GtEq),
            TokenKind::AndAnd => Some(OpKind::And),
            TokenKind::OrOr => Some(OpKind::Or),
            _ => None,
        }
    }

    /// Operator for this token in prefix position.
    pub fn unary_op(&self) -> Option<OpKind> {
        match self {
            TokenKind::Minus => Some(OpKind::Negate),
            TokenKind::Bang => Some(OpKind::Not),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, TokenKind::Int(_) | TokenKind::Float(_))
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Int(n) => write!(f, "{n}"),
            TokenKind::Float(x) => write!(f, "{x}"),
            TokenKind::Str(s) => write!(f, "{s:?}"),
            TokenKind::Ident => f.write_str("identifier"),
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
            TokenKind::LBracket => f.write_str("["),
            TokenKind::RBracket => f.write_str("]"),
            TokenKind::Comma => f.write_str(","),
            other => match other.binary_op().or_else(|| other.unary_op()) {
                Some(op) => write!(f, "{op}"),
                None => f.write_str("?"),
            },
        }
    }
}

/// A cooked token and where it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// Error produced while scanning.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unrecognized token `{text}`")]
    Unrecognized { text: String, span: Span },

    #[error("unterminated string literal")]
    UnterminatedString { text: String, span: Span },

    #[error("malformed number `{text}`")]
    MalformedNumber { text: String, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::Unrecognized { span, .. }
            | LexError::UnterminatedString { span, .. }
            | LexError::MalformedNumber { span, .. } => *span,
        }
    }

    /// Offending source text.
    pub fn text(&self) -> &str {
        match self {
            LexError::Unrecognized { text, .. }
            | LexError::UnterminatedString { text, .. }
            | LexError::MalformedNumber { text, .. } => text,
        }
    }
}

/// Lazy token stream over an expression.
pub struct Lexer<'src> {
    source: &'src str,
    inner: logos::Lexer<'src, RawToken>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            source,
            inner: RawToken::lexer(source),
        }
    }

    /// Source text covered by `span`.
    pub fn slice(&self, span: Span) -> &'src str {
        self.source.get(span.to_range()).unwrap_or_default()
    }

    /// Span just past the last byte of input.
    pub fn end_span(&self) -> Span {
        Span::point(u32::try_from(self.source.len()).unwrap_or(u32::MAX))
    }

    fn cook(raw: RawToken, slice: &str, span: Span) -> Result<TokenKind, LexError> {
        let kind = match raw {
            RawToken::Int => TokenKind::Int(slice.parse().map_err(|_| malformed(slice, span))?),
            RawToken::Float => {
                let parsed = if slice.ends_with('.') {
                    format!("{slice}0").parse()
                } else {
                    slice.parse()
                };
                TokenKind::Float(parsed.map_err(|_| malformed(slice, span))?)
            }
            RawToken::Str => TokenKind::Str(unescape_string(slice)),
            RawToken::UnterminatedStr => {
                return Err(LexError::UnterminatedString {
                    text: slice.to_string(),
                    span,
                })
            }
            RawToken::MalformedNumber => return Err(malformed(slice, span)),
            RawToken::Ident => TokenKind::Ident,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Percent => TokenKind::Percent,
            RawToken::EqEq => TokenKind::EqEq,
            RawToken::NotEq => TokenKind::NotEq,
            RawToken::Lt => TokenKind::Lt,
            RawToken::Gt => TokenKind::Gt,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::AndAnd => TokenKind::AndAnd,
            RawToken::OrOr => TokenKind::OrOr,
            RawToken::Bang => TokenKind::Bang,
        };
        Ok(kind)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw = self.inner.next()?;
        let span = Span::from_range(self.inner.span());
        let slice = self.inner.slice();
        Some(match raw {
            Ok(raw) => Lexer::cook(raw, slice, span).map(|kind| Token::new(kind, span)),
            Err(()) if slice.starts_with(['"', '\'']) => Err(LexError::UnterminatedString {
                text: slice.to_string(),
                span,
            }),
            Err(()) => Err(LexError::Unrecognized {
                text: slice.to_string(),
                span,
            }),
        })
    }
}

/// Tokenize a whole expression, stopping at the first error.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).collect()
}

fn malformed(slice: &str, span: Span) -> LexError {
    LexError::MalformedNumber {
        text: slice.to_string(),
        span,
    }
}

/// Strip the delimiters and process escapes.
///
/// Only `\<delimiter>` and `\\` are escapes; other backslash pairs are kept
/// as written.
fn unescape_string(slice: &str) -> String {
    let mut chars = slice.chars();
    let delimiter = chars.next().unwrap_or('"');
    chars.next_back();

    let mut result = String::with_capacity(slice.len());
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(c) if c == delimiter || c == '\\' => result.push(c),
                Some(c) => {
                    result.push('\\');
                    result.push(c);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(c);
        }
    }
    result
}
