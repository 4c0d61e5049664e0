//! Runtime values.
//!
//! A `Value` holds exactly one payload: null, int, float, bool, string, or
//! list. Null is distinct from every typed zero and is what an unresolved
//! symbol evaluates to.
//!
//! # List ownership
//!
//! A list payload is either owned by the value (dropped with it) or
//! borrowed from the host through a [`SharedList`] handle, in which case
//! the host keeps its own handle and the value never mutates the list.
//! Moving a list between values is always explicit:
//!
//! ```text
//! let mut a = Value::null();
//! a.set_owned_list(list);          // a owns it
//! let list = a.take_list();        // ownership back out, a is now null
//! b.set_owned_list(list.copy());   // deep copy, b owns the copy
//! ```
//!
//! # Strings
//!
//! String payloads are capped at [`MAX_STRING_LEN`] bytes and live in a
//! shared immutable buffer, so copying a literal during evaluation does
//! not allocate.

mod error;
mod heap;
mod list;

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

pub use error::{ErrorKind, ValueError};
pub use heap::Heap;
pub use list::{ListOwner, SharedList, ValueList};

/// Maximum byte length of a string value. Longer text is truncated at the
/// nearest char boundary.
pub const MAX_STRING_LEN: usize = 1024;

/// Value type tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Int,
    Float,
    Bool,
    String,
    List,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Bool => "bool",
            ValueKind::String => "string",
            ValueKind::List => "list",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// List payload of a value.
pub enum ListSlot {
    /// Dropped together with the value.
    Owned(ValueList),
    /// Lent by the host; the host's handle keeps it alive.
    Borrowed(SharedList),
}

impl ListSlot {
    #[inline]
    pub fn list(&self) -> &ValueList {
        match self {
            ListSlot::Owned(list) => list,
            ListSlot::Borrowed(shared) => shared,
        }
    }
}

impl Clone for ListSlot {
    fn clone(&self) -> Self {
        match self {
            ListSlot::Owned(list) => {
                let mut copy = list.copy();
                copy.set_owner(ListOwner::Value);
                ListSlot::Owned(copy)
            }
            ListSlot::Borrowed(shared) => ListSlot::Borrowed(shared.clone()),
        }
    }
}

/// Runtime value produced by evaluation.
///
/// `Clone` is a deep copy of owned lists.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(Heap<str>),
    List(ListSlot),
}

// Factory methods

impl Value {
    #[inline]
    pub const fn null() -> Self {
        Value::Null
    }

    #[inline]
    pub const fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub const fn float(f: f64) -> Self {
        Value::Float(f)
    }

    #[inline]
    pub const fn bool(b: bool) -> Self {
        Value::Bool(b)
    }

    /// String value, truncated to [`MAX_STRING_LEN`].
    pub fn string(text: &str) -> Self {
        Value::Str(Heap::from_str(bounded(text)))
    }

    /// Value that owns `list`.
    pub fn list(mut list: ValueList) -> Self {
        list.set_owner(ListOwner::Value);
        Value::List(ListSlot::Owned(list))
    }

    /// Value that borrows a host list.
    pub fn shared_list(list: &SharedList) -> Self {
        Value::List(ListSlot::Borrowed(list.clone()))
    }
}

// Setters. Each discards the previous payload, dropping an owned list.

impl Value {
    pub fn set_null(&mut self) {
        *self = Value::Null;
    }

    pub fn set_int(&mut self, n: i64) {
        *self = Value::Int(n);
    }

    pub fn set_float(&mut self, f: f64) {
        *self = Value::Float(f);
    }

    pub fn set_bool(&mut self, b: bool) {
        *self = Value::Bool(b);
    }

    pub fn set_string(&mut self, text: &str) {
        *self = Value::string(text);
    }

    /// Borrow a host list; the caller keeps ownership.
    pub fn set_list(&mut self, list: &SharedList) {
        *self = Value::shared_list(list);
    }

    /// Take ownership of `list`.
    pub fn set_owned_list(&mut self, list: ValueList) {
        *self = Value::list(list);
    }

    /// Transfer an owned list out, leaving this value null.
    ///
    /// Returns `None` (and leaves the value untouched) when the value is not
    /// a list. A borrowed list cannot be transferred: the reference is
    /// cleared and `None` is returned.
    pub fn take_list(&mut self) -> Option<ValueList> {
        match std::mem::take(self) {
            Value::List(ListSlot::Owned(mut list)) => {
                list.set_owner(ListOwner::Unowned);
                Some(list)
            }
            Value::List(ListSlot::Borrowed(_)) => None,
            other => {
                *self = other;
                None
            }
        }
    }

    /// True when this value is responsible for dropping its list.
    pub fn owns_list(&self) -> bool {
        matches!(self, Value::List(ListSlot::Owned(list)) if list.owner() == ListOwner::Value)
    }
}

// Accessors

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Bool(_) => ValueKind::Bool,
            Value::Str(_) => ValueKind::String,
            Value::List(_) => ValueKind::List,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ValueList> {
        match self {
            Value::List(slot) => Some(slot.list()),
            _ => None,
        }
    }
}

// Coercion

impl Value {
    /// Convert the payload in place.
    ///
    /// Numbers and strings convert both ways (floats render with six
    /// fractional digits), booleans to and from `"true"`/`"false"`, and
    /// null only to `false`. A list is never produced from a scalar and
    /// never converted into one.
    pub fn coerce(&mut self, to: ValueKind) -> Result<(), ValueError> {
        let converted = match to {
            ValueKind::Null => Value::Null,
            ValueKind::Int => Value::Int(self.to_int()?),
            ValueKind::Float => Value::Float(self.to_float()?),
            ValueKind::Bool => Value::Bool(self.to_bool()?),
            ValueKind::String => match self {
                Value::Str(_) => return Ok(()),
                _ => Value::string(&self.to_text()?),
            },
            ValueKind::List => {
                return match self {
                    Value::List(_) => Ok(()),
                    _ => Err(self.coerce_error(ValueKind::List)),
                };
            }
        };
        *self = converted;
        Ok(())
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "float to int coercion truncates toward zero and saturates"
    )]
    pub fn to_int(&self) -> Result<i64, ValueError> {
        match self {
            Value::Int(n) => Ok(*n),
            Value::Float(f) => Ok(*f as i64),
            Value::Bool(b) => Ok(i64::from(*b)),
            Value::Str(s) => {
                let text = s.trim();
                text.parse::<i64>()
                    .ok()
                    .or_else(|| text.parse::<f64>().ok().map(|f| f as i64))
                    .ok_or_else(|| self.coerce_error(ValueKind::Int))
            }
            Value::Null | Value::List(_) => Err(self.coerce_error(ValueKind::Int)),
        }
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "int to float promotion follows C semantics"
    )]
    pub fn to_float(&self) -> Result<f64, ValueError> {
        match self {
            Value::Int(n) => Ok(*n as f64),
            Value::Float(f) => Ok(*f),
            Value::Bool(b) => Ok(f64::from(u8::from(*b))),
            Value::Str(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| self.coerce_error(ValueKind::Float)),
            Value::Null | Value::List(_) => Err(self.coerce_error(ValueKind::Float)),
        }
    }

    pub fn to_bool(&self) -> Result<bool, ValueError> {
        match self {
            Value::Null => Ok(false),
            Value::Bool(b) => Ok(*b),
            Value::Int(n) => Ok(*n != 0),
            Value::Float(f) => Ok(*f != 0.0),
            Value::Str(s) => match &**s {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(self.coerce_error(ValueKind::Bool)),
            },
            Value::List(_) => Err(self.coerce_error(ValueKind::Bool)),
        }
    }

    /// String form of a scalar; borrows when the value is already a string.
    pub fn to_text(&self) -> Result<Cow<'_, str>, ValueError> {
        match self {
            Value::Str(s) => Ok(Cow::Borrowed(s)),
            Value::Int(n) => Ok(Cow::Owned(n.to_string())),
            Value::Float(f) => Ok(Cow::Owned(format!("{f:.6}"))),
            Value::Bool(b) => Ok(Cow::Borrowed(if *b { "true" } else { "false" })),
            Value::Null | Value::List(_) => Err(self.coerce_error(ValueKind::String)),
        }
    }

    fn coerce_error(&self, to: ValueKind) -> ValueError {
        ValueError::Coerce {
            from: self.kind(),
            to,
        }
    }
}

// Comparison

impl Value {
    /// Three-way comparison.
    ///
    /// Strings compare lexicographically. Numbers compare numerically,
    /// promoting int to float when the types differ; booleans take part as
    /// 0 and 1. Null equals only null. Lists and mixed string/number pairs
    /// are a `Compare` error.
    #[expect(
        clippy::cast_precision_loss,
        reason = "mixed int/float comparison promotes to float"
    )]
    pub fn compare(&self, other: &Value) -> Result<Ordering, ValueError> {
        match (self, other) {
            (Value::Null, Value::Null) => Ok(Ordering::Equal),
            (Value::Int(a), Value::Int(b)) => Ok(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => Ok(a.total_cmp(b)),
            (Value::Int(a), Value::Float(b)) => Ok((*a as f64).total_cmp(b)),
            (Value::Float(a), Value::Int(b)) => Ok(a.total_cmp(&(*b as f64))),
            (Value::Bool(a), Value::Bool(b)) => Ok(a.cmp(b)),
            (Value::Bool(_), Value::Int(_) | Value::Float(_))
            | (Value::Int(_) | Value::Float(_), Value::Bool(_)) => {
                Ok(self.to_float()?.total_cmp(&other.to_float()?))
            }
            (Value::Str(a), Value::Str(b)) => Ok((**a).cmp(&**b)),
            _ => Err(ValueError::Compare {
                left: self.kind(),
                right: other.kind(),
            }),
        }
    }
}

/// Truncate `text` to at most [`MAX_STRING_LEN`] bytes on a char boundary.
fn bounded(text: &str) -> &str {
    if text.len() <= MAX_STRING_LEN {
        return text;
    }
    let mut end = MAX_STRING_LEN;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

// Trait implementations

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(n) => write!(f, "Float({n})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::List(ListSlot::Owned(list)) => write!(f, "List({list:?})"),
            Value::List(ListSlot::Borrowed(list)) => write!(f, "BorrowedList({:?})", &**list),
        }
    }
}

/// Tagged rendering used by the golden vectors: `null`, `i(3)`,
/// `f(1.500000)`, `b(true)`, `s(text)`, `list(i(1),i(2))`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Int(n) => write!(f, "i({n})"),
            Value::Float(n) => write!(f, "f({n:.6})"),
            Value::Bool(b) => write!(f, "b({b})"),
            Value::Str(s) => write!(f, "s({})", &**s),
            Value::List(slot) => {
                write!(f, "list(")?;
                for (i, item) in slot.list().iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a.list() == b.list(),
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::string(text)
    }
}

impl From<ValueList> for Value {
    fn from(list: ValueList) -> Self {
        Value::list(list)
    }
}

#[cfg(test)]
mod tests;
