//! Ordered, ownership-tagged sequences of values.

use std::fmt;
use std::slice;

use super::{Heap, Value, ValueError};

/// Who is responsible for dropping a list.
///
/// A list placed into a `Value` with [`Value::set_owned_list`] is tagged
/// `Value`; everything else (fresh lists, copies, lists taken back out)
/// is `Unowned` until the caller decides.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum ListOwner {
    #[default]
    Unowned,
    Value,
}

/// A list shared with the host.
///
/// The host keeps its own handle; values holding a `SharedList` only
/// borrow it and never mutate it.
pub type SharedList = Heap<ValueList>;

/// Ordered sequence of values. Insertion order is significant.
#[derive(Default)]
pub struct ValueList {
    items: Vec<Value>,
    owner: ListOwner,
}

impl ValueList {
    pub fn new() -> Self {
        ValueList::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ValueList {
            items: Vec::with_capacity(capacity),
            owner: ListOwner::Unowned,
        }
    }

    /// Deep copy: every element is duplicated, nested lists included.
    ///
    /// Borrowed nested lists stay borrowed in the copy; the copy itself
    /// comes back `Unowned`.
    pub fn copy(&self) -> ValueList {
        ValueList {
            items: self.items.clone(),
            owner: ListOwner::Unowned,
        }
    }

    /// Move this list into a handle that can be lent to values.
    pub fn into_shared(mut self) -> SharedList {
        self.owner = ListOwner::Unowned;
        Heap::new(self)
    }

    #[inline]
    pub fn owner(&self) -> ListOwner {
        self.owner
    }

    #[inline]
    pub fn set_owner(&mut self, owner: ListOwner) {
        self.owner = owner;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, value: Value) {
        self.items.push(value);
    }

    /// Bounds-checked element access.
    pub fn get(&self, index: usize) -> Result<&Value, ValueError> {
        self.items.get(index).ok_or(ValueError::Index {
            index: i64::try_from(index).unwrap_or(i64::MAX),
            len: self.items.len(),
        })
    }

    /// Element access with a signed index as produced by evaluation.
    ///
    /// Negative indexes are out of bounds.
    pub fn get_signed(&self, index: i64) -> Result<&Value, ValueError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.items.get(i))
            .ok_or(ValueError::Index {
                index,
                len: self.items.len(),
            })
    }

    #[inline]
    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn into_values(self) -> Vec<Value> {
        self.items
    }
}

impl Clone for ValueList {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl PartialEq for ValueList {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl fmt::Debug for ValueList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl From<Vec<Value>> for ValueList {
    fn from(items: Vec<Value>) -> Self {
        ValueList {
            items,
            owner: ListOwner::Unowned,
        }
    }
}

impl FromIterator<Value> for ValueList {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        ValueList::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for &'a ValueList {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
