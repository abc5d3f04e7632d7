use crate::runtime::{
    RuntimeContext,
    ds::{DsKind, DsPriority},
    error::RuntimeError,
    value::Value,
};

use super::helpers::{arg_handle, check_arity, handle_value};

const KIND: DsKind = DsKind::Priority;

fn queue<'a>(ctx: &'a dyn RuntimeContext, args: &[Value]) -> Result<&'a DsPriority, RuntimeError> {
    ctx.collections().priorities.ds_get(arg_handle(args, 0, KIND)?)
}

fn queue_mut<'a>(
    ctx: &'a mut dyn RuntimeContext,
    args: &[Value],
) -> Result<&'a mut DsPriority, RuntimeError> {
    let index = arg_handle(args, 0, KIND)?;
    ctx.collections_mut().priorities.ds_get_mut(index)
}

fn empty(op: &'static str) -> RuntimeError {
    RuntimeError::EmptyCollection { kind: KIND, op }
}

pub(super) fn builtin_ds_priority_create(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 0, "ds_priority_create")?;
    Ok(handle_value(
        ctx.collections_mut().priorities.ds_new(DsPriority::new()),
    ))
}

pub(super) fn builtin_ds_priority_destroy(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "ds_priority_destroy")?;
    let index = arg_handle(&args, 0, KIND)?;
    ctx.collections_mut().priorities.ds_delete(index)?;
    Ok(Value::Undefined)
}

pub(super) fn builtin_ds_priority_clear(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "ds_priority_clear")?;
    queue_mut(ctx, &args)?.clear();
    Ok(Value::Undefined)
}

pub(super) fn builtin_ds_priority_empty(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "ds_priority_empty")?;
    Ok(Value::from(queue(ctx, &args)?.is_empty()))
}

pub(super) fn builtin_ds_priority_size(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "ds_priority_size")?;
    Ok(Value::Integer(queue(ctx, &args)?.len() as i64))
}

/// `ds_priority_add(id, value, priority)`.
pub(super) fn builtin_ds_priority_add(
    ctx: &mut dyn RuntimeContext,
    mut args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 3, "ds_priority_add")?;
    let priority = args.pop().unwrap_or_default();
    let value = args.pop().unwrap_or_default();
    queue_mut(ctx, &args)?.push(priority, value)?;
    Ok(Value::Undefined)
}

pub(super) fn builtin_ds_priority_delete_min(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "ds_priority_delete_min")?;
    let (_, value) = queue_mut(ctx, &args)?.pop_min()?;
    Ok(value)
}

pub(super) fn builtin_ds_priority_delete_max(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "ds_priority_delete_max")?;
    let (_, value) = queue_mut(ctx, &args)?.pop_max()?;
    Ok(value)
}

pub(super) fn builtin_ds_priority_find_min(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "ds_priority_find_min")?;
    let (_, value) = queue(ctx, &args)?.peek_min().ok_or(empty("find_min"))?;
    Ok(value.clone())
}

pub(super) fn builtin_ds_priority_find_max(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "ds_priority_find_max")?;
    let (_, value) = queue(ctx, &args)?.peek_max().ok_or(empty("find_max"))?;
    Ok(value.clone())
}
