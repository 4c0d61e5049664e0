//! Errors raised by value coercion, comparison, and list access.

use thiserror::Error;

use super::ValueKind;

/// Category of a runtime error.
///
/// Unresolved symbols are deliberately absent: they evaluate to null and
/// are not errors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// An operation on a type with no defined coercion.
    Type,
    /// Out-of-bounds list access.
    Index,
}

/// Error from a `Value` or `ValueList` operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("cannot coerce {from} to {to}")]
    Coerce { from: ValueKind, to: ValueKind },

    #[error("cannot compare {left} with {right}")]
    Compare { left: ValueKind, right: ValueKind },

    #[error("index {index} out of bounds for list of length {len}")]
    Index { index: i64, len: usize },
}

impl ValueError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValueError::Coerce { .. } | ValueError::Compare { .. } => ErrorKind::Type,
            ValueError::Index { .. } => ErrorKind::Index,
        }
    }
}
