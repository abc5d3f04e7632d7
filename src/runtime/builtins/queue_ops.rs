use crate::runtime::{
    RuntimeContext,
    ds::{DsKind, DsQueue},
    error::RuntimeError,
    value::Value,
};

use super::helpers::{arg_handle, check_arity, check_min_arity, handle_value};

const KIND: DsKind = DsKind::Queue;

fn queue<'a>(ctx: &'a dyn RuntimeContext, args: &[Value]) -> Result<&'a DsQueue, RuntimeError> {
    ctx.collections().queues.ds_get(arg_handle(args, 0, KIND)?)
}

fn queue_mut<'a>(
    ctx: &'a mut dyn RuntimeContext,
    args: &[Value],
) -> Result<&'a mut DsQueue, RuntimeError> {
    let index = arg_handle(args, 0, KIND)?;
    ctx.collections_mut().queues.ds_get_mut(index)
}

pub(super) fn builtin_ds_queue_create(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 0, "ds_queue_create")?;
    Ok(handle_value(ctx.collections_mut().queues.ds_new(DsQueue::new())))
}

pub(super) fn builtin_ds_queue_destroy(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "ds_queue_destroy")?;
    let index = arg_handle(&args, 0, KIND)?;
    ctx.collections_mut().queues.ds_delete(index)?;
    Ok(Value::Undefined)
}

pub(super) fn builtin_ds_queue_clear(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "ds_queue_clear")?;
    queue_mut(ctx, &args)?.clear();
    Ok(Value::Undefined)
}

/// `ds_queue_copy(id)`: new queue holding aliases of `id`'s values.
pub(super) fn builtin_ds_queue_copy(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "ds_queue_copy")?;
    let copy = queue(ctx, &args)?.clone();
    Ok(handle_value(ctx.collections_mut().queues.ds_new(copy)))
}

pub(super) fn builtin_ds_queue_empty(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "ds_queue_empty")?;
    Ok(Value::from(queue(ctx, &args)?.is_empty()))
}

pub(super) fn builtin_ds_queue_size(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "ds_queue_size")?;
    Ok(Value::Integer(queue(ctx, &args)?.len() as i64))
}

/// `ds_queue_enqueue(id, value, ...)`: appends every value in order.
pub(super) fn builtin_ds_queue_enqueue(
    ctx: &mut dyn RuntimeContext,
    mut args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_min_arity(&args, 2, "ds_queue_enqueue")?;
    let values = args.split_off(1);
    let queue = queue_mut(ctx, &args)?;
    for value in values {
        queue.push_back(value);
    }
    Ok(Value::Undefined)
}

pub(super) fn builtin_ds_queue_dequeue(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "ds_queue_dequeue")?;
    queue_mut(ctx, &args)?.pop_front()
}

pub(super) fn builtin_ds_queue_head(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "ds_queue_head")?;
    queue(ctx, &args)?
        .front()
        .cloned()
        .ok_or(RuntimeError::EmptyCollection { kind: KIND, op: "head" })
}

pub(super) fn builtin_ds_queue_tail(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "ds_queue_tail")?;
    queue(ctx, &args)?
        .back()
        .cloned()
        .ok_or(RuntimeError::EmptyCollection { kind: KIND, op: "tail" })
}
