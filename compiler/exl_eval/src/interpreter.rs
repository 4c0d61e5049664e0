//! Tree walker.
//!
//! Every node evaluates to a value. A node whose evaluation raises a type
//! or index error logs it and evaluates to null, so one bad operand nulls
//! out its own sub-expression and whatever depends on it, but nothing
//! else. Unresolved names are not errors: they are reported to the
//! context and evaluate to null.

use exl_ir::{
    Block, BlockKind, Call, Context, Node, NodeKind, OpKind, Operator, Symbol, UnresolvedKind,
    Value, ValueList,
};
use exl_stack::ensure_sufficient_stack;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::builtins;
use crate::errors::{Arity, EvalError, EvalResult};
use crate::operators::{evaluate_binary, evaluate_unary};

/// Evaluate `node`, degrading errors to null.
pub fn eval_node(node: &Node, ctx: &dyn Context) -> Value {
    ensure_sufficient_stack(|| {
        try_eval_node(node, ctx).unwrap_or_else(|err| {
            debug!(
                node = %node,
                error = %err,
                kind = ?err.kind(),
                "sub-expression evaluated to null"
            );
            Value::Null
        })
    })
}

/// Evaluate `node`, surfacing an error raised by the node itself.
///
/// Children still degrade to null on their own errors.
pub fn try_eval_node(node: &Node, ctx: &dyn Context) -> EvalResult {
    match &node.kind {
        NodeKind::Literal(value) => Ok(value.clone()),
        NodeKind::Symbol(symbol) => Ok(eval_symbol(symbol, ctx)),
        NodeKind::Operator(operator) => eval_operator(operator, ctx),
        NodeKind::Block(block) => eval_block(block, ctx),
    }
}

fn eval_symbol(symbol: &Symbol, ctx: &dyn Context) -> Value {
    let resolver = symbol.slot().get_or_resolve(|| {
        let resolver = ctx.symbol_resolver(symbol);
        if resolver.is_some() {
            trace!(symbol = symbol.name(), "cached symbol resolver");
        }
        resolver
    });
    match resolver {
        Some(resolver) => resolver.value(ctx, &[]),
        None => {
            trace!(symbol = symbol.name(), "unresolved symbol");
            ctx.unresolved(symbol.name(), UnresolvedKind::Symbol);
            Value::Null
        }
    }
}

fn eval_operator(operator: &Operator, ctx: &dyn Context) -> EvalResult {
    match (operator.op, operator.operands.as_slice()) {
        (OpKind::And, [left, right]) => {
            if !eval_node(left, ctx).to_bool()? {
                return Ok(Value::Bool(false));
            }
            Ok(Value::Bool(eval_node(right, ctx).to_bool()?))
        }
        (OpKind::Or, [left, right]) => {
            if eval_node(left, ctx).to_bool()? {
                return Ok(Value::Bool(true));
            }
            Ok(Value::Bool(eval_node(right, ctx).to_bool()?))
        }
        (op, [operand]) => evaluate_unary(eval_node(operand, ctx), op),
        (op, [left, right]) => {
            let left = eval_node(left, ctx);
            let right = eval_node(right, ctx);
            evaluate_binary(left, right, op)
        }
        (op, operands) => Err(EvalError::WrongArgCount {
            name: op.symbol(),
            expected: Arity::Exactly(op.arity()),
            found: operands.len(),
        }),
    }
}

fn eval_block(block: &Block, ctx: &dyn Context) -> EvalResult {
    match &block.kind {
        BlockKind::Paren => match block.children.as_slice() {
            [only] => Ok(eval_node(only, ctx)),
            children => Ok(eval_list(children, ctx)),
        },
        BlockKind::List | BlockKind::Array => Ok(eval_list(&block.children, ctx)),
        BlockKind::Index => eval_index(&block.children, ctx),
        BlockKind::Call(call) => Ok(eval_call(call, &block.children, ctx)),
    }
}

fn eval_list(children: &[Node], ctx: &dyn Context) -> Value {
    let mut list = ValueList::with_capacity(children.len());
    for child in children {
        list.push(eval_node(child, ctx));
    }
    Value::list(list)
}

/// `base[i]` yields one element; `base[i j ...]` yields a list of them.
fn eval_index(children: &[Node], ctx: &dyn Context) -> EvalResult {
    let Some((base, indexes)) = children.split_first() else {
        return Ok(Value::Null);
    };
    let base = eval_node(base, ctx);
    let list = base
        .as_list()
        .ok_or(EvalError::NotAList { found: base.kind() })?;
    match indexes {
        [index] => {
            let i = eval_node(index, ctx).to_int()?;
            Ok(list.get_signed(i)?.clone())
        }
        many => {
            let mut picked = ValueList::with_capacity(many.len());
            for index in many {
                let i = eval_node(index, ctx).to_int()?;
                picked.push(list.get_signed(i)?.clone());
            }
            Ok(Value::list(picked))
        }
    }
}

/// Builtins take priority over host functions; either is cached on the
/// call node once found.
fn eval_call(call: &Call, args: &[Node], ctx: &dyn Context) -> Value {
    let resolver = call.slot().get_or_resolve(|| {
        let resolver = builtins::lookup(call.name()).or_else(|| ctx.function_resolver(call));
        if resolver.is_some() {
            trace!(function = call.name(), "cached function resolver");
        }
        resolver
    });
    let Some(resolver) = resolver else {
        trace!(function = call.name(), "unresolved function");
        ctx.unresolved(call.name(), UnresolvedKind::Function);
        return Value::Null;
    };
    // inline room for the widest builtin, `scale`
    let values: SmallVec<[Value; 8]> = args.iter().map(|arg| eval_node(arg, ctx)).collect();
    resolver.value(ctx, &values)
}
