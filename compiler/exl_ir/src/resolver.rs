//! Host resolution protocol.
//!
//! The host implements [`Context`] and hands out a [`Resolver`] per symbol
//! or custom function call. Each node asks once and keeps what it gets in
//! its [`ResolverSlot`]; later evaluations call the resolver directly and
//! never touch the context's lookup methods again.
//!
//! A name the context cannot resolve is not cached. The next evaluation
//! asks again, so a host can bind names after the tree was first used.

use std::cell::OnceCell;
use std::fmt;

use crate::node::{Call, Symbol};
use crate::Value;

/// Produces the runtime value of a symbol or function call.
///
/// `args` holds the evaluated call arguments in order; symbols receive an
/// empty slice.
pub trait Resolver: Send {
    fn value(&self, ctx: &dyn Context, args: &[Value]) -> Value;
}

impl<F> Resolver for F
where
    F: Fn(&dyn Context, &[Value]) -> Value + Send,
{
    fn value(&self, ctx: &dyn Context, args: &[Value]) -> Value {
        self(ctx, args)
    }
}

/// What kind of name failed to resolve.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnresolvedKind {
    Symbol,
    Function,
}

/// Evaluation environment supplied by the host.
///
/// A context is borrowed only for the duration of one evaluation. Resolvers
/// it returns are owned by the requesting node from then on.
pub trait Context {
    /// Resolver for a symbol reference, or `None` when the name is unbound.
    fn symbol_resolver(&self, symbol: &Symbol) -> Option<Box<dyn Resolver>>;

    /// Resolver for a call to a non-builtin function.
    fn function_resolver(&self, call: &Call) -> Option<Box<dyn Resolver>> {
        let _ = call;
        None
    }

    /// Called each time a name fails to resolve.
    fn unresolved(&self, name: &str, kind: UnresolvedKind) {
        let _ = (name, kind);
    }
}

/// Write-once resolver cache held by symbol and call nodes.
#[derive(Default)]
pub struct ResolverSlot {
    cell: OnceCell<Box<dyn Resolver>>,
}

impl ResolverSlot {
    pub fn new() -> Self {
        ResolverSlot::default()
    }

    /// Cached resolver, if any.
    #[inline]
    pub fn get(&self) -> Option<&dyn Resolver> {
        self.cell.get().map(AsRef::as_ref)
    }

    /// Cached resolver, or the result of `resolve` stored for next time.
    ///
    /// `resolve` runs only while the slot is empty. A `None` result is not
    /// stored.
    pub fn get_or_resolve<F>(&self, resolve: F) -> Option<&dyn Resolver>
    where
        F: FnOnce() -> Option<Box<dyn Resolver>>,
    {
        if let Some(resolver) = self.cell.get() {
            return Some(resolver.as_ref());
        }
        let resolver = resolve()?;
        Some(self.cell.get_or_init(|| resolver).as_ref())
    }

    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl fmt::Debug for ResolverSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_resolved() {
            "resolved"
        } else {
            "unresolved"
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    struct Empty;

    impl Context for Empty {
        fn symbol_resolver(&self, _symbol: &Symbol) -> Option<Box<dyn Resolver>> {
            None
        }
    }

    #[test]
    fn test_closure_is_resolver() {
        let r = |_: &dyn Context, args: &[Value]| Value::int(i64::try_from(args.len()).unwrap_or(0));
        assert_eq!(r.value(&Empty, &[Value::null(), Value::null()]), Value::int(2));
    }

    #[test]
    fn test_slot_caches_success_once() {
        let slot = ResolverSlot::new();
        let calls = Cell::new(0);
        let make = || {
            calls.set(calls.get() + 1);
            Some(Box::new(|_: &dyn Context, _: &[Value]| Value::int(7)) as Box<dyn Resolver>)
        };
        assert!(slot.get_or_resolve(make).is_some());
        assert!(slot.get_or_resolve(make).is_some());
        assert_eq!(calls.get(), 1);
        assert!(slot.is_resolved());
        assert_eq!(slot.get().map(|r| r.value(&Empty, &[])), Some(Value::int(7)));
    }

    #[test]
    fn test_slot_does_not_cache_failure() {
        let slot = ResolverSlot::new();
        let calls = Cell::new(0);
        let fail = || {
            calls.set(calls.get() + 1);
            None
        };
        assert!(slot.get_or_resolve(fail).is_none());
        assert!(slot.get_or_resolve(fail).is_none());
        assert_eq!(calls.get(), 2);
        assert!(!slot.is_resolved());
        assert_eq!(format!("{slot:?}"), "unresolved");
    }
}
