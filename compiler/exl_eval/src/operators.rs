//! Operator implementations.
//!
//! Dispatch is a direct match over operand types. Int arithmetic is
//! checked; any float operand promotes the pair to float, and booleans act
//! as 0 and 1. A zero divisor yields null instead of an error.
//!
//! Null is only meaningful to the logical operators, where it reads as
//! false. Everywhere else a null operand is a type error.

use exl_ir::{OpKind, Value, ValueKind, ValueList};
use tracing::trace;

use crate::errors::{overflow, type_mismatch, EvalError, EvalResult};

/// Operand pair after numeric promotion.
enum Numbers {
    Int(i64, i64),
    Float(f64, f64),
}

fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Int(n) => Some(*n),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "int operands promote to float when mixed with a float"
)]
fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Float(x) => Some(*x),
        Value::Int(n) => Some(*n as f64),
        Value::Bool(b) => Some(f64::from(u8::from(*b))),
        _ => None,
    }
}

fn promote(left: &Value, right: &Value) -> Option<Numbers> {
    if let (Some(a), Some(b)) = (as_int(left), as_int(right)) {
        return Some(Numbers::Int(a, b));
    }
    match (as_float(left), as_float(right)) {
        (Some(a), Some(b)) => Some(Numbers::Float(a, b)),
        _ => None,
    }
}

/// Checked int result, mapping `None` to an overflow error.
#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> EvalResult {
    result.map(Value::Int).ok_or_else(|| overflow(op_name))
}

/// Evaluate a prefix operator.
#[expect(
    clippy::needless_pass_by_value,
    reason = "callers hand over freshly evaluated operands"
)]
pub fn evaluate_unary(value: Value, op: OpKind) -> EvalResult {
    match (op, &value) {
        (OpKind::Not, _) => Ok(Value::Bool(!value.to_bool()?)),
        (OpKind::Negate, Value::Int(n)) => checked_arith(n.checked_neg(), "negation"),
        (OpKind::Negate, Value::Float(x)) => Ok(Value::Float(-x)),
        (OpKind::Negate, Value::Bool(b)) => Ok(Value::Int(if *b { -1 } else { 0 })),
        _ => Err(EvalError::InvalidOperand {
            op,
            operand: value.kind(),
        }),
    }
}

/// Evaluate a binary operator on two already evaluated operands.
///
/// `&&` and `||` here evaluate both sides; short-circuiting happens in the
/// tree walker, which only calls this once both values exist.
#[expect(
    clippy::needless_pass_by_value,
    reason = "callers hand over freshly evaluated operands"
)]
pub fn evaluate_binary(left: Value, right: Value, op: OpKind) -> EvalResult {
    match op {
        OpKind::Add | OpKind::Sub | OpKind::Mul | OpKind::Div | OpKind::Mod => {
            eval_arithmetic(&left, &right, op)
        }
        OpKind::Eq | OpKind::NotEq | OpKind::Lt | OpKind::Gt | OpKind::LtEq | OpKind::GtEq => {
            eval_comparison(&left, &right, op)
        }
        OpKind::And => Ok(Value::Bool(left.to_bool()? && right.to_bool()?)),
        OpKind::Or => Ok(Value::Bool(left.to_bool()? || right.to_bool()?)),
        OpKind::Not | OpKind::Negate => Err(type_mismatch(op, &left, &right)),
    }
}

fn eval_arithmetic(left: &Value, right: &Value, op: OpKind) -> EvalResult {
    match (left, right, op) {
        (Value::Str(a), Value::Str(b), OpKind::Add) => {
            let mut joined = String::with_capacity(a.len().saturating_add(b.len()));
            joined.push_str(a);
            joined.push_str(b);
            return Ok(Value::string(&joined));
        }
        (Value::List(a), Value::List(b), OpKind::Add) => {
            let joined: ValueList = a.list().iter().chain(b.list().iter()).cloned().collect();
            return Ok(Value::list(joined));
        }
        _ => {}
    }
    match promote(left, right) {
        Some(Numbers::Int(a, b)) => eval_int_binary(a, b, op),
        Some(Numbers::Float(a, b)) => Ok(eval_float_binary(a, b, op)),
        None => Err(type_mismatch(op, left, right)),
    }
}

fn eval_int_binary(a: i64, b: i64, op: OpKind) -> EvalResult {
    match op {
        OpKind::Add => checked_arith(a.checked_add(b), "addition"),
        OpKind::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        OpKind::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        OpKind::Div if b == 0 => Ok(zero_divisor(op)),
        OpKind::Div => checked_arith(a.checked_div(b), "division"),
        OpKind::Mod if b == 0 => Ok(zero_divisor(op)),
        OpKind::Mod => checked_arith(a.checked_rem(b), "remainder"),
        _ => Err(EvalError::TypeMismatch {
            op,
            left: ValueKind::Int,
            right: ValueKind::Int,
        }),
    }
}

fn eval_float_binary(a: f64, b: f64, op: OpKind) -> Value {
    match op {
        OpKind::Add => Value::Float(a + b),
        OpKind::Sub => Value::Float(a - b),
        OpKind::Mul => Value::Float(a * b),
        OpKind::Div | OpKind::Mod if b == 0.0 => zero_divisor(op),
        OpKind::Div => Value::Float(a / b),
        OpKind::Mod => Value::Float(a % b),
        _ => Value::Null,
    }
}

fn zero_divisor(op: OpKind) -> Value {
    trace!(op = op.symbol(), "zero divisor, result is null");
    Value::Null
}

fn eval_comparison(left: &Value, right: &Value, op: OpKind) -> EvalResult {
    let ordering = left.compare(right)?;
    let result = match op {
        OpKind::Eq => ordering.is_eq(),
        OpKind::NotEq => ordering.is_ne(),
        OpKind::Lt => ordering.is_lt(),
        OpKind::Gt => ordering.is_gt(),
        OpKind::LtEq => ordering.is_le(),
        OpKind::GtEq => ordering.is_ge(),
        _ => return Err(type_mismatch(op, left, right)),
    };
    Ok(Value::Bool(result))
}
