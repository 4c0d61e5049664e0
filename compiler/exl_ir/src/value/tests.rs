#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cmp::Ordering;

use pretty_assertions::assert_eq;

use super::*;

fn ints(ns: &[i64]) -> ValueList {
    ns.iter().copied().map(Value::int).collect()
}

#[test]
fn test_value_display() {
    assert_eq!(Value::null().to_string(), "null");
    assert_eq!(Value::int(42).to_string(), "i(42)");
    assert_eq!(Value::float(1.2).to_string(), "f(1.200000)");
    assert_eq!(Value::bool(true).to_string(), "b(true)");
    assert_eq!(Value::string("a value").to_string(), "s(a value)");
    assert_eq!(Value::list(ints(&[1, 2])).to_string(), "list(i(1),i(2))");
    assert_eq!(Value::list(ValueList::new()).to_string(), "list()");
}

#[test]
fn test_default_is_null() {
    assert!(Value::default().is_null());
    assert_eq!(Value::default().kind(), ValueKind::Null);
}

#[test]
fn test_setters_replace_payload() {
    let mut v = Value::list(ints(&[1, 2, 3]));
    v.set_int(7);
    assert_eq!(v, Value::int(7));
    v.set_float(0.5);
    assert_eq!(v, Value::float(0.5));
    v.set_bool(false);
    assert_eq!(v, Value::bool(false));
    v.set_string("x");
    assert_eq!(v.as_str(), Some("x"));
    v.set_null();
    assert!(v.is_null());
}

#[test]
fn test_string_truncated_on_char_boundary() {
    let long = "é".repeat(MAX_STRING_LEN);
    let v = Value::string(&long);
    let s = v.as_str().unwrap();
    assert!(s.len() <= MAX_STRING_LEN);
    assert_eq!(s.len(), MAX_STRING_LEN);
    assert!(s.chars().all(|c| c == 'é'));

    let odd = format!("a{}", "é".repeat(MAX_STRING_LEN));
    let v = Value::string(&odd);
    assert_eq!(v.as_str().unwrap().len(), MAX_STRING_LEN - 1);
}

// Ownership

#[test]
fn test_owned_list_roundtrip() {
    let mut v = Value::null();
    v.set_owned_list(ints(&[1, 2]));
    assert!(v.owns_list());
    assert_eq!(v.as_list().unwrap().owner(), ListOwner::Value);

    let list = v.take_list().unwrap();
    assert!(v.is_null());
    assert_eq!(list.owner(), ListOwner::Unowned);
    assert_eq!(list.len(), 2);
}

#[test]
fn test_borrowed_list_is_not_owned() {
    let shared = ints(&[1, 2, 3]).into_shared();
    let mut v = Value::null();
    v.set_list(&shared);
    assert!(!v.owns_list());
    assert_eq!(v.as_list().unwrap().len(), 3);

    assert!(v.take_list().is_none());
    assert!(v.is_null());
    // the host handle is untouched
    assert_eq!(shared.len(), 3);
}

#[test]
fn test_take_list_on_scalar_keeps_value() {
    let mut v = Value::int(3);
    assert!(v.take_list().is_none());
    assert_eq!(v, Value::int(3));
}

#[test]
fn test_deep_copy_survives_original_drop() {
    let inner = ints(&[2, 3]);
    let outer: ValueList = vec![Value::int(1), Value::list(inner)].into();
    let original = Value::list(outer);

    let copy = original.clone();
    drop(original);

    assert_eq!(copy.to_string(), "list(i(1),list(i(2),i(3)))");
    assert!(copy.owns_list());
    let nested = copy.as_list().unwrap().get(1).unwrap();
    assert!(nested.owns_list());
}

#[test]
fn test_copy_of_borrowed_nested_stays_borrowed() {
    let shared = ints(&[9]).into_shared();
    let outer: ValueList = vec![Value::shared_list(&shared)].into();
    let copy = outer.copy();
    drop(outer);
    let nested = copy.get(0).unwrap();
    assert!(!nested.owns_list());
    assert!(Heap::ptr_eq(
        match nested {
            Value::List(ListSlot::Borrowed(h)) => h,
            _ => panic!("expected borrowed list"),
        },
        &shared
    ));
}

#[test]
fn test_list_get_out_of_bounds() {
    let list = ints(&[1]);
    assert_eq!(list.get(0).unwrap(), &Value::int(1));
    let err = list.get(4).unwrap_err();
    assert_eq!(err, ValueError::Index { index: 4, len: 1 });
    assert_eq!(err.kind(), ErrorKind::Index);
    assert_eq!(
        list.get_signed(-1).unwrap_err(),
        ValueError::Index { index: -1, len: 1 }
    );
}

// Coercion

#[test]
fn test_coerce_numbers_to_string() {
    let mut v = Value::float(2.5);
    v.coerce(ValueKind::String).unwrap();
    assert_eq!(v.as_str(), Some("2.500000"));

    let mut v = Value::int(-17);
    v.coerce(ValueKind::String).unwrap();
    assert_eq!(v.as_str(), Some("-17"));
}

#[test]
fn test_coerce_string_to_numbers() {
    let mut v = Value::string("12");
    v.coerce(ValueKind::Int).unwrap();
    assert_eq!(v, Value::int(12));

    let mut v = Value::string("3.75");
    v.coerce(ValueKind::Int).unwrap();
    assert_eq!(v, Value::int(3));

    let mut v = Value::string("3.75");
    v.coerce(ValueKind::Float).unwrap();
    assert_eq!(v, Value::float(3.75));

    let mut v = Value::string("abc");
    assert_eq!(
        v.coerce(ValueKind::Int),
        Err(ValueError::Coerce {
            from: ValueKind::String,
            to: ValueKind::Int
        })
    );
    // failed coercion leaves the payload alone
    assert_eq!(v.as_str(), Some("abc"));
}

#[test]
fn test_coerce_bool_and_string() {
    let mut v = Value::bool(true);
    v.coerce(ValueKind::String).unwrap();
    assert_eq!(v.as_str(), Some("true"));
    v.coerce(ValueKind::Bool).unwrap();
    assert_eq!(v, Value::bool(true));

    let mut v = Value::string("yes");
    assert!(v.coerce(ValueKind::Bool).is_err());
}

#[test]
fn test_coerce_numbers_to_bool() {
    assert_eq!(Value::int(0).to_bool(), Ok(false));
    assert_eq!(Value::int(-3).to_bool(), Ok(true));
    assert_eq!(Value::float(0.0).to_bool(), Ok(false));
    assert_eq!(Value::null().to_bool(), Ok(false));
    assert_eq!(Value::bool(true).to_int(), Ok(1));
    assert_eq!(Value::float(-2.9).to_int(), Ok(-2));
}

#[test]
fn test_coerce_list_rules() {
    let mut v = Value::int(1);
    let err = v.coerce(ValueKind::List).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);

    let mut v = Value::list(ints(&[1]));
    v.coerce(ValueKind::List).unwrap();
    assert!(v.coerce(ValueKind::Int).is_err());
    assert!(v.coerce(ValueKind::String).is_err());
}

#[test]
fn test_coerce_null() {
    let mut v = Value::null();
    assert!(v.coerce(ValueKind::Int).is_err());
    let mut v = Value::int(4);
    v.coerce(ValueKind::Null).unwrap();
    assert!(v.is_null());
}

// Comparison

#[test]
fn test_compare_numbers() {
    assert_eq!(Value::int(1).compare(&Value::int(2)), Ok(Ordering::Less));
    assert_eq!(
        Value::int(2).compare(&Value::float(2.0)),
        Ok(Ordering::Equal)
    );
    assert_eq!(
        Value::float(2.5).compare(&Value::int(2)),
        Ok(Ordering::Greater)
    );
    assert_eq!(Value::bool(true).compare(&Value::int(1)), Ok(Ordering::Equal));
    assert_eq!(
        Value::bool(false).compare(&Value::bool(true)),
        Ok(Ordering::Less)
    );
}

#[test]
fn test_compare_strings() {
    assert_eq!(
        Value::string("abc").compare(&Value::string("abd")),
        Ok(Ordering::Less)
    );
    assert_eq!(
        Value::string("b").compare(&Value::string("a")),
        Ok(Ordering::Greater)
    );
}

#[test]
fn test_compare_incompatible() {
    let list = Value::list(ints(&[1]));
    assert_eq!(
        list.compare(&Value::int(1)),
        Err(ValueError::Compare {
            left: ValueKind::List,
            right: ValueKind::Int
        })
    );
    assert!(Value::string("1").compare(&Value::int(1)).is_err());
    assert!(Value::null().compare(&Value::int(0)).is_err());
    assert_eq!(Value::null().compare(&Value::null()), Ok(Ordering::Equal));
}
