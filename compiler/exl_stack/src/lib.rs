//! Stack safety for recursive walks over expression trees.
//!
//! Parsing is iterative (two explicit stacks), but evaluation and
//! rendering recurse once per tree level. A pathological expression such
//! as ten thousand nested parentheses would otherwise overflow the native
//! stack of an audio thread, so every recursive walk enters through
//! [`ensure_sufficient_stack`].
//!
//! - **Native targets**: grows the stack on demand with `stacker`.
//! - **WASM targets**: plain passthrough.
//!
//! Red zone is 64KB, growth is 1MB per segment. Expression trees are
//! shallow in practice, so the growth path is cold.

/// Minimum stack space to keep available before recursing.
const RED_ZONE: usize = 64 * 1024;

/// Stack space to allocate when growing.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
///
/// ```text
/// fn eval(node: &Node, ctx: &dyn Context) -> Value {
///     ensure_sufficient_stack(|| match &node.kind { ... })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version: call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shallow_recursion() {
        fn depth(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
        }

        assert_eq!(depth(16), 16);
    }

    #[test]
    fn test_deep_recursion() {
        fn nested_sum(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { nested_sum(n - 1) + n % 3 })
        }

        assert_eq!(nested_sum(100_000), (1..=100_000u64).map(|n| n % 3).sum());
    }

    #[test]
    fn test_passes_result_through() {
        let result: Result<i64, &str> = ensure_sufficient_stack(|| Err("bad operand"));
        assert_eq!(result, Err("bad operand"));
    }
}
