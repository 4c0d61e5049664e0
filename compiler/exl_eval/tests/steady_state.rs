//! Re-evaluating a resolved tree must not touch the heap.
//!
//! Allocations are counted per thread, so tests running in parallel do not
//! see each other's traffic.

#![allow(unsafe_code)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use exl_eval::{MapContext, NodeEval};
use exl_ir::{Value, ValueList};
use exl_parse::parse;
use pretty_assertions::assert_eq;

struct CountingAlloc;

thread_local! {
    static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
}

fn count_one() {
    // TLS may already be gone while a thread shuts down
    let _ = ALLOCATIONS.try_with(|n| n.set(n.get() + 1));
}

// SAFETY: every call is forwarded unchanged to the system allocator.
unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        count_one();
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        count_one();
        System.realloc(ptr, layout, new_size)
    }
}

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

fn allocations() -> usize {
    ALLOCATIONS.with(Cell::get)
}

fn context() -> MapContext {
    MapContext::new()
        .with("level", 96i64)
        .with("gain", 0.5)
        .with("name", "lead")
        .with(
            "notes",
            Value::list(ValueList::from(vec![
                Value::int(60),
                Value::int(64),
                Value::int(67),
            ])),
        )
        .with(
            "chords",
            Value::list(ValueList::from(vec![Value::list(ValueList::from(vec![
                Value::int(1),
                Value::int(2),
            ]))])),
        )
}

/// Allocations made by `runs` re-evaluations after a warm-up pass.
fn steady_state_allocations(source: &str, runs: usize) -> usize {
    let ctx = context();
    let tree = parse(source).unwrap();
    let mut out = Value::Null;
    tree.eval_into(&ctx, &mut out);
    let expected = out.clone();

    let before = allocations();
    for _ in 0..runs {
        tree.eval_into(&ctx, &mut out);
    }
    let after = allocations();
    assert_eq!(out, expected, "{source}");
    after - before
}

#[test]
fn test_reevaluation_does_not_allocate() {
    for source in [
        "level * 2 + 1",
        "level > 64 && !(gain < 0.1)",
        "scale(level, 0, 127, 0.0, 1.0) * gain",
        "name",
        "notes",
        "length(notes)",
        "notes[1]",
        "max(notes) - min(notes)",
        "chords[0]",
        "chords[0][1]",
        "1 / 0",
    ] {
        assert_eq!(steady_state_allocations(source, 1_000), 0, "{source}");
    }
}

#[test]
fn test_owned_bindings_are_shared() {
    let ctx = context();
    let first = parse("notes").unwrap().eval(&ctx);
    assert!(!first.owns_list());
    assert_eq!(first, *ctx.get("notes").unwrap());
}

#[test]
fn test_counter_sees_allocations() {
    // a list literal builds a fresh list on every pass
    assert!(steady_state_allocations("[level, 1]", 10) >= 10);
}
