//! Property-based tests for the parser.
//!
//! - The parser never panics, whatever the input.
//! - Source rendering is a fixed point: rendering a parsed tree as source
//!   and parsing that again yields the same canonical tree.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use exl_parse::parse;
use proptest::prelude::*;

/// Generate a symbol name.
fn arb_ident() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "x", "level", "loop_1"]).prop_map(String::from)
}

fn arb_binop() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "+", "-", "*", "/", "%", "==", "!=", "<", ">", "<=", ">=", "&&", "||",
    ])
}

fn arb_leaf() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_ident(),
        (0i64..1000).prop_map(|n| n.to_string()),
        (0u32..1000).prop_map(|n| format!("{}.5", n)),
        "[a-z ]{0,8}".prop_map(|s| format!("\"{s}\"")),
    ]
}

/// Generate well-formed expression source.
fn arb_expr() -> impl Strategy<Value = String> {
    arb_leaf().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            (inner.clone(), arb_binop(), inner.clone())
                .prop_map(|(l, op, r)| format!("{l} {op} {r}")),
            inner.clone().prop_map(|e| format!("({e})")),
            inner.clone().prop_map(|e| format!("-{e}")),
            inner.clone().prop_map(|e| format!("!{e}")),
            (arb_ident(), prop::collection::vec(inner.clone(), 0..3))
                .prop_map(|(f, args)| format!("{f}({})", args.join(", "))),
            prop::collection::vec(inner.clone(), 0..3)
                .prop_map(|items| format!("[{}]", items.join(", "))),
            (inner.clone(), inner).prop_map(|(base, i)| format!("({base})[{i}]")),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn parse_never_panics(source in "[a-z0-9 +*/%<>=!&|(),\\[\\]'\"._-]{0,40}") {
        let _ = parse(&source);
    }

    #[test]
    fn generated_expressions_parse(source in arb_expr()) {
        prop_assert!(parse(&source).is_ok(), "failed to parse {:?}", source);
    }

    #[test]
    fn source_rendering_is_fixed_point(source in arb_expr()) {
        let tree = parse(&source).unwrap();
        let rendered = tree.source().to_string();
        let reparsed = parse(&rendered).unwrap();
        prop_assert_eq!(tree.to_string(), reparsed.to_string(), "source {:?} rendered {:?}", source, rendered);
    }
}
