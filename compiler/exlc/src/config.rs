//! Driver configuration, built from the command line.

use exl_eval::{EmptyContext, MapContext, NodeEval};
use exl_ir::Value;
use thiserror::Error;

/// Options for `exl eval`.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalConfig {
    /// Symbol bindings from `--set name=value`, in command-line order.
    pub bindings: Vec<(String, String)>,
    /// Number of times to evaluate the parsed tree.
    pub repeat: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            bindings: Vec::new(),
            repeat: 1,
        }
    }
}

impl EvalConfig {
    /// Build the evaluation context. Later bindings of a name win.
    pub fn context(&self) -> MapContext {
        let mut ctx = MapContext::new();
        for (name, text) in &self.bindings {
            ctx.set(name.as_str(), binding_value(text));
        }
        ctx
    }
}

/// Options for `exl test`.
#[derive(Clone, Debug)]
pub struct VectorRunConfig {
    /// Run vectors in parallel.
    pub parallel: bool,
    /// Print every vector, not just failures.
    pub verbose: bool,
    /// Only run vectors whose source contains this substring.
    pub filter: Option<String>,
}

impl Default for VectorRunConfig {
    fn default() -> Self {
        VectorRunConfig {
            parallel: true,
            verbose: false,
            filter: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("`--set` expects `name=value`, found `{arg}`")]
    MalformedBinding { arg: String },

    #[error("`--set` needs a value")]
    MissingBinding,

    #[error("`--repeat` expects a positive count, found `{value}`")]
    InvalidRepeat { value: String },

    #[error("unknown option `{arg}`")]
    UnknownOption { arg: String },
}

/// Parse the options following `exl eval <expr>`.
pub fn parse_eval_options(args: &[String]) -> Result<EvalConfig, ConfigError> {
    let mut config = EvalConfig::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--set" {
            let binding = iter.next().ok_or(ConfigError::MissingBinding)?;
            config.bindings.push(split_binding(binding)?);
        } else if let Some(binding) = arg.strip_prefix("--set=") {
            config.bindings.push(split_binding(binding)?);
        } else if let Some(count) = arg.strip_prefix("--repeat=") {
            config.repeat = match count.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidRepeat {
                        value: count.to_string(),
                    })
                }
            };
        } else {
            return Err(ConfigError::UnknownOption { arg: arg.clone() });
        }
    }
    Ok(config)
}

fn split_binding(binding: &str) -> Result<(String, String), ConfigError> {
    match binding.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(ConfigError::MalformedBinding {
            arg: binding.to_string(),
        }),
    }
}

/// Value for a `--set` binding.
///
/// The text is evaluated as an expression with no symbols bound, so
/// `n=3` binds an int and `xs=[1,2]` a list. Text that does not parse, or
/// evaluates to null, binds as a plain string.
pub fn binding_value(text: &str) -> Value {
    match exl_parse::parse(text) {
        Ok(tree) => match tree.eval(&EmptyContext) {
            Value::Null => Value::string(text),
            value => value,
        },
        Err(_) => Value::string(text),
    }
}

#[cfg(test)]
mod tests;
