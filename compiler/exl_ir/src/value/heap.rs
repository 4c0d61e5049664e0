//! Shared immutable heap storage for values.
//!
//! `Heap<T>` wraps an `Arc` with a crate-private constructor so every
//! shared allocation is created through a `Value`/`ValueList` factory.
//! Copying a string literal out of the tree is then a reference-count
//! bump instead of a fresh allocation on every evaluation.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Immutable, cheaply clonable heap payload.
pub struct Heap<T: ?Sized>(Arc<T>);

impl<T> Heap<T> {
    #[inline]
    pub(crate) fn new(value: T) -> Self {
        Heap(Arc::new(value))
    }
}

impl Heap<str> {
    #[inline]
    pub(crate) fn from_str(text: &str) -> Self {
        Heap(Arc::from(text))
    }
}

impl<T: ?Sized> Heap<T> {
    /// True when both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized + PartialEq> PartialEq for Heap<T> {
    fn eq(&self, other: &Self) -> bool {
        *self.0 == *other.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (*self.0).fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heap_deref() {
        let h = Heap::new(42i64);
        assert_eq!(*h, 42);
    }

    #[test]
    fn test_heap_clone_shares_allocation() {
        let h1 = Heap::from_str("a value");
        let h2 = h1.clone();
        assert_eq!(&*h1, &*h2);
        assert!(Heap::ptr_eq(&h1, &h2));
    }

    #[test]
    fn test_heap_eq_is_structural() {
        assert_eq!(Heap::from_str("loop"), Heap::from_str("loop"));
        assert_ne!(Heap::from_str("loop"), Heap::from_str("track"));
    }
}
