//! Ready-made contexts for hosts that keep their bindings in a map.

use std::fmt;
use std::sync::Arc;

use exl_ir::{Call, Context, ListSlot, Resolver, Symbol, UnresolvedKind, Value, ValueList};
use rustc_hash::FxHashMap;
use tracing::trace;

/// Resolver that always yields the same value.
#[derive(Clone, Debug)]
pub struct ConstResolver(pub Value);

impl Resolver for ConstResolver {
    fn value(&self, _ctx: &dyn Context, _args: &[Value]) -> Value {
        self.0.clone()
    }
}

/// Context that resolves nothing; every symbol evaluates to null.
#[derive(Copy, Clone, Debug, Default)]
pub struct EmptyContext;

impl Context for EmptyContext {
    fn symbol_resolver(&self, _symbol: &Symbol) -> Option<Box<dyn Resolver>> {
        None
    }
}

/// Replace every owned list in `value`, nested ones included, with a
/// shared handle.
fn into_shared_lists(value: Value) -> Value {
    match value {
        Value::List(ListSlot::Owned(list)) => {
            let items: ValueList = list.into_values().into_iter().map(into_shared_lists).collect();
            Value::shared_list(&items.into_shared())
        }
        other => other,
    }
}

type HostFn = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// Context backed by a symbol map and a table of host functions.
///
/// A symbol's value is captured when a node first resolves it. Changing a
/// binding afterwards affects only trees that have not resolved that name.
///
/// Owned lists are moved into shared handles on [`MapContext::set`], so
/// reading a list symbol clones a handle instead of the elements.
#[derive(Clone, Default)]
pub struct MapContext {
    symbols: FxHashMap<String, Value>,
    functions: FxHashMap<String, HostFn>,
}

impl MapContext {
    pub fn new() -> Self {
        MapContext::default()
    }

    /// Builder form of [`MapContext::set`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.symbols.insert(name.into(), into_shared_lists(value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.symbols.get(name)
    }

    /// Register a host function callable by name from expressions.
    ///
    /// Builtins of the same name take priority.
    pub fn register_function<F>(&mut self, name: impl Into<String>, func: F)
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.functions.insert(name.into(), Arc::new(func));
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Context for MapContext {
    fn symbol_resolver(&self, symbol: &Symbol) -> Option<Box<dyn Resolver>> {
        let value = self.symbols.get(symbol.name())?;
        Some(Box::new(ConstResolver(value.clone())))
    }

    fn function_resolver(&self, call: &Call) -> Option<Box<dyn Resolver>> {
        let func = Arc::clone(self.functions.get(call.name())?);
        Some(Box::new(move |_: &dyn Context, args: &[Value]| func(args)))
    }

    fn unresolved(&self, name: &str, kind: UnresolvedKind) {
        trace!(name, ?kind, "name not bound in map context");
    }
}

impl fmt::Debug for MapContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut functions: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        functions.sort_unstable();
        f.debug_struct("MapContext")
            .field("symbols", &self.symbols)
            .field("functions", &functions)
            .finish()
    }
}
