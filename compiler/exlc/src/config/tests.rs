#![allow(clippy::unwrap_used, clippy::expect_used)]

use exl_ir::Value;
use pretty_assertions::assert_eq;

use super::{binding_value, parse_eval_options, ConfigError, EvalConfig};

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

#[test]
fn test_defaults() {
    assert_eq!(parse_eval_options(&[]).unwrap(), EvalConfig::default());
    assert_eq!(EvalConfig::default().repeat, 1);
}

#[test]
fn test_bindings_and_repeat() {
    let config =
        parse_eval_options(&args(&["--set", "level=3", "--set=name=a=b", "--repeat=10"])).unwrap();
    assert_eq!(
        config.bindings,
        vec![
            ("level".to_string(), "3".to_string()),
            ("name".to_string(), "a=b".to_string()),
        ]
    );
    assert_eq!(config.repeat, 10);
}

#[test]
fn test_option_errors() {
    assert_eq!(
        parse_eval_options(&args(&["--set"])),
        Err(ConfigError::MissingBinding)
    );
    assert_eq!(
        parse_eval_options(&args(&["--set", "novalue"])),
        Err(ConfigError::MalformedBinding {
            arg: "novalue".to_string()
        })
    );
    assert_eq!(
        parse_eval_options(&args(&["--set", "=1"])),
        Err(ConfigError::MalformedBinding {
            arg: "=1".to_string()
        })
    );
    assert_eq!(
        parse_eval_options(&args(&["--repeat=0"])),
        Err(ConfigError::InvalidRepeat {
            value: "0".to_string()
        })
    );
    assert_eq!(
        parse_eval_options(&args(&["--fast"])),
        Err(ConfigError::UnknownOption {
            arg: "--fast".to_string()
        })
    );
}

#[test]
fn test_binding_values() {
    assert_eq!(binding_value("3"), Value::int(3));
    assert_eq!(binding_value("-2.5"), Value::float(-2.5));
    assert_eq!(binding_value("1 + 1"), Value::int(2));
    assert_eq!(binding_value("[1, 2]").to_string(), "list(i(1),i(2))");
    assert_eq!(binding_value("hello"), Value::string("hello"));
    assert_eq!(binding_value("(oops"), Value::string("(oops"));
}

#[test]
fn test_context_later_binding_wins() {
    let config = parse_eval_options(&args(&["--set", "x=1", "--set", "x=2"])).unwrap();
    let ctx = config.context();
    assert_eq!(ctx.get("x"), Some(&Value::int(2)));
    assert_eq!(ctx.len(), 1);
}
