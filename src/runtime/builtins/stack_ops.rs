use crate::runtime::{
    RuntimeContext,
    ds::{DsKind, DsStack},
    error::RuntimeError,
    value::Value,
};

use super::helpers::{arg_handle, check_arity, check_min_arity, handle_value};

const KIND: DsKind = DsKind::Stack;

fn stack<'a>(ctx: &'a dyn RuntimeContext, args: &[Value]) -> Result<&'a DsStack, RuntimeError> {
    ctx.collections().stacks.ds_get(arg_handle(args, 0, KIND)?)
}

fn stack_mut<'a>(
    ctx: &'a mut dyn RuntimeContext,
    args: &[Value],
) -> Result<&'a mut DsStack, RuntimeError> {
    let index = arg_handle(args, 0, KIND)?;
    ctx.collections_mut().stacks.ds_get_mut(index)
}

pub(super) fn builtin_ds_stack_create(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 0, "ds_stack_create")?;
    Ok(handle_value(ctx.collections_mut().stacks.ds_new(DsStack::new())))
}

pub(super) fn builtin_ds_stack_destroy(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "ds_stack_destroy")?;
    let index = arg_handle(&args, 0, KIND)?;
    ctx.collections_mut().stacks.ds_delete(index)?;
    Ok(Value::Undefined)
}

pub(super) fn builtin_ds_stack_clear(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "ds_stack_clear")?;
    stack_mut(ctx, &args)?.clear();
    Ok(Value::Undefined)
}

/// `ds_stack_push(id, value, ...)`: pushes every value in order, so the last
/// argument ends on top.
pub(super) fn builtin_ds_stack_push(
    ctx: &mut dyn RuntimeContext,
    mut args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_min_arity(&args, 2, "ds_stack_push")?;
    let values = args.split_off(1);
    let stack = stack_mut(ctx, &args)?;
    for value in values {
        stack.push(value);
    }
    Ok(Value::Undefined)
}

pub(super) fn builtin_ds_stack_pop(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "ds_stack_pop")?;
    stack_mut(ctx, &args)?.pop()
}

pub(super) fn builtin_ds_stack_top(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "ds_stack_top")?;
    stack(ctx, &args)?
        .top()
        .cloned()
        .ok_or(RuntimeError::EmptyCollection { kind: KIND, op: "top" })
}

pub(super) fn builtin_ds_stack_size(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "ds_stack_size")?;
    Ok(Value::Integer(stack(ctx, &args)?.len() as i64))
}

pub(super) fn builtin_ds_stack_empty(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "ds_stack_empty")?;
    Ok(Value::from(stack(ctx, &args)?.is_empty()))
}
