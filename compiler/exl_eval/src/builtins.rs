//! Built-in functions.
//!
//! Builtins are ordinary resolvers: a call node looks its name up here
//! before asking the host, and caches whatever it finds. A builtin that
//! fails logs the error and returns null, like any other node.

use exl_ir::{Context, Resolver, Value, ValueKind};
use rand::Rng;
use tracing::debug;

use crate::errors::{overflow, Arity, EvalError, EvalResult};

type BuiltinFn = fn(&[Value]) -> EvalResult;

/// A named builtin with its accepted argument count.
#[derive(Copy, Clone)]
pub(crate) struct Builtin {
    name: &'static str,
    arity: Arity,
    func: BuiltinFn,
}

impl Builtin {
    pub(crate) fn call(&self, args: &[Value]) -> EvalResult {
        if !self.arity.accepts(args.len()) {
            return Err(EvalError::WrongArgCount {
                name: self.name,
                expected: self.arity,
                found: args.len(),
            });
        }
        (self.func)(args)
    }
}

impl Resolver for Builtin {
    fn value(&self, _ctx: &dyn Context, args: &[Value]) -> Value {
        self.call(args).unwrap_or_else(|err| {
            debug!(function = self.name, error = %err, "builtin call degraded to null");
            Value::Null
        })
    }
}

static BUILTINS: &[Builtin] = &[
    Builtin {
        name: "int",
        arity: Arity::Exactly(1),
        func: builtin_int,
    },
    Builtin {
        name: "float",
        arity: Arity::Exactly(1),
        func: builtin_float,
    },
    Builtin {
        name: "string",
        arity: Arity::Exactly(1),
        func: builtin_string,
    },
    Builtin {
        name: "bool",
        arity: Arity::Exactly(1),
        func: builtin_bool,
    },
    Builtin {
        name: "abs",
        arity: Arity::Exactly(1),
        func: builtin_abs,
    },
    Builtin {
        name: "rand",
        arity: Arity::Exactly(2),
        func: builtin_rand,
    },
    Builtin {
        name: "scale",
        arity: Arity::Exactly(5),
        func: builtin_scale,
    },
    Builtin {
        name: "min",
        arity: Arity::AtLeast(1),
        func: builtin_min,
    },
    Builtin {
        name: "max",
        arity: Arity::AtLeast(1),
        func: builtin_max,
    },
    Builtin {
        name: "length",
        arity: Arity::Exactly(1),
        func: builtin_length,
    },
];

pub(crate) fn find(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|builtin| builtin.name == name)
}

/// Resolver for a builtin name, if there is one.
pub fn lookup(name: &str) -> Option<Box<dyn Resolver>> {
    find(name).map(|builtin| Box::new(*builtin) as Box<dyn Resolver>)
}

/// Names of all builtin functions.
pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|builtin| builtin.name)
}

// Casts

fn builtin_int(args: &[Value]) -> EvalResult {
    Ok(Value::Int(args[0].to_int()?))
}

fn builtin_float(args: &[Value]) -> EvalResult {
    Ok(Value::Float(args[0].to_float()?))
}

fn builtin_string(args: &[Value]) -> EvalResult {
    Ok(Value::string(&args[0].to_text()?))
}

fn builtin_bool(args: &[Value]) -> EvalResult {
    Ok(Value::Bool(args[0].to_bool()?))
}

// Math

fn builtin_abs(args: &[Value]) -> EvalResult {
    match &args[0] {
        Value::Int(n) => n.checked_abs().map(Value::Int).ok_or_else(|| overflow("abs")),
        Value::Float(x) => Ok(Value::Float(x.abs())),
        Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
        other => Err(EvalError::InvalidArgument {
            name: "abs",
            found: other.kind(),
        }),
    }
}

/// `rand(low, high)`: inclusive on both ends. A float bound makes the
/// result a float. Reversed bounds are swapped.
fn builtin_rand(args: &[Value]) -> EvalResult {
    let (low, high) = (&args[0], &args[1]);
    for arg in [low, high] {
        if matches!(arg, Value::Null | Value::List(_)) {
            return Err(EvalError::InvalidArgument {
                name: "rand",
                found: arg.kind(),
            });
        }
    }
    let mut rng = rand::thread_rng();
    if matches!(low, Value::Float(_)) || matches!(high, Value::Float(_)) {
        let (a, b) = (low.to_float()?, high.to_float()?);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        if !lo.is_finite() || !hi.is_finite() {
            return Err(EvalError::InvalidArgument {
                name: "rand",
                found: ValueKind::Float,
            });
        }
        Ok(Value::Float(rng.gen_range(lo..=hi)))
    } else {
        let (a, b) = (low.to_int()?, high.to_int()?);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        Ok(Value::Int(rng.gen_range(lo..=hi)))
    }
}

/// `scale(v, low_in, high_in, low_out, high_out)`: linear map of `v` from
/// the input range onto the output range. All-int arguments give a rounded
/// int. An empty input range gives null.
#[expect(
    clippy::cast_possible_truncation,
    reason = "all-int scaling rounds back to int and saturates"
)]
fn builtin_scale(args: &[Value]) -> EvalResult {
    let mut nums = [0.0; 5];
    for (slot, arg) in nums.iter_mut().zip(args) {
        *slot = match arg {
            Value::Int(_) | Value::Float(_) | Value::Bool(_) => arg.to_float()?,
            other => {
                return Err(EvalError::InvalidArgument {
                    name: "scale",
                    found: other.kind(),
                })
            }
        };
    }
    let [v, low_in, high_in, low_out, high_out] = nums;
    let span_in = high_in - low_in;
    if span_in == 0.0 {
        return Ok(Value::Null);
    }
    let scaled = low_out + (v - low_in) * (high_out - low_out) / span_in;
    if args.iter().all(|arg| matches!(arg, Value::Int(_))) {
        Ok(Value::Int(scaled.round() as i64))
    } else {
        Ok(Value::Float(scaled))
    }
}

fn builtin_min(args: &[Value]) -> EvalResult {
    extremum("min", args, std::cmp::Ordering::Less)
}

fn builtin_max(args: &[Value]) -> EvalResult {
    extremum("max", args, std::cmp::Ordering::Greater)
}

/// Pick the value that compares `wanted` against every other. A single
/// list argument is searched element-wise.
fn extremum(name: &'static str, args: &[Value], wanted: std::cmp::Ordering) -> EvalResult {
    let values = match args {
        [Value::List(slot)] => slot.list().as_slice(),
        _ => args,
    };
    let Some((first, rest)) = values.split_first() else {
        return Ok(Value::Null);
    };
    let mut best = first;
    for candidate in rest {
        if !is_orderable(candidate) {
            return Err(EvalError::InvalidArgument {
                name,
                found: candidate.kind(),
            });
        }
        if candidate.compare(best)? == wanted {
            best = candidate;
        }
    }
    if !is_orderable(best) {
        return Err(EvalError::InvalidArgument {
            name,
            found: best.kind(),
        });
    }
    Ok(best.clone())
}

fn is_orderable(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::List(_))
}

// Lists

fn builtin_length(args: &[Value]) -> EvalResult {
    let len = match &args[0] {
        Value::List(slot) => slot.list().len(),
        Value::Str(s) => s.chars().count(),
        other => {
            return Err(EvalError::InvalidArgument {
                name: "length",
                found: other.kind(),
            })
        }
    };
    Ok(Value::Int(i64::try_from(len).unwrap_or(i64::MAX)))
}

