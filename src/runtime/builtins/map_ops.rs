use crate::runtime::{
    RuntimeContext,
    ds::{DsKind, DsMap},
    error::RuntimeError,
    value::Value,
};

use super::helpers::{arg_handle, check_arity, handle_value};

const KIND: DsKind = DsKind::Map;

fn map<'a>(ctx: &'a dyn RuntimeContext, args: &[Value]) -> Result<&'a DsMap, RuntimeError> {
    ctx.collections().maps.ds_get(arg_handle(args, 0, KIND)?)
}

fn map_mut<'a>(
    ctx: &'a mut dyn RuntimeContext,
    args: &[Value],
) -> Result<&'a mut DsMap, RuntimeError> {
    let index = arg_handle(args, 0, KIND)?;
    ctx.collections_mut().maps.ds_get_mut(index)
}

pub(super) fn builtin_ds_map_create(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 0, "ds_map_create")?;
    Ok(handle_value(ctx.collections_mut().maps.ds_new(DsMap::new())))
}

pub(super) fn builtin_ds_map_destroy(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "ds_map_destroy")?;
    let index = arg_handle(&args, 0, KIND)?;
    ctx.collections_mut().maps.ds_delete(index)?;
    Ok(Value::Undefined)
}

pub(super) fn builtin_ds_map_clear(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "ds_map_clear")?;
    map_mut(ctx, &args)?.clear();
    Ok(Value::Undefined)
}

/// `ds_map_copy(id, source)`: replaces the contents of `id` with those of
/// `source`.
pub(super) fn builtin_ds_map_copy(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 2, "ds_map_copy")?;
    let source_index = arg_handle(&args, 1, KIND)?;
    let source = ctx.collections().maps.ds_get(source_index)?.clone();
    map_mut(ctx, &args)?.copy_from(source);
    Ok(Value::Undefined)
}

pub(super) fn builtin_ds_map_exists(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 2, "ds_map_exists")?;
    Ok(Value::from(map(ctx, &args)?.contains_key(&args[1])?))
}

pub(super) fn builtin_ds_map_add(
    ctx: &mut dyn RuntimeContext,
    mut args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 3, "ds_map_add")?;
    let value = args.pop().unwrap_or_default();
    let key = args.pop().unwrap_or_default();
    Ok(Value::from(map_mut(ctx, &args)?.add(key, value)?))
}

pub(super) fn builtin_ds_map_replace(
    ctx: &mut dyn RuntimeContext,
    mut args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 3, "ds_map_replace")?;
    let value = args.pop().unwrap_or_default();
    let key = args.pop().unwrap_or_default();
    Ok(Value::from(map_mut(ctx, &args)?.replace(key, value)?))
}

pub(super) fn builtin_ds_map_delete(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 2, "ds_map_delete")?;
    map_mut(ctx, &args)?.erase(&args[1])?;
    Ok(Value::Undefined)
}

pub(super) fn builtin_ds_map_empty(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "ds_map_empty")?;
    Ok(Value::from(map(ctx, &args)?.is_empty()))
}

pub(super) fn builtin_ds_map_size(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "ds_map_size")?;
    Ok(Value::Integer(map(ctx, &args)?.len() as i64))
}

/// Value stored under the key, or `undefined`.
pub(super) fn builtin_ds_map_find_value(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 2, "ds_map_find_value")?;
    Ok(map(ctx, &args)?.find(&args[1])?.cloned().unwrap_or_default())
}

pub(super) fn builtin_ds_map_find_first(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "ds_map_find_first")?;
    map(ctx, &args)?
        .first_key()
        .cloned()
        .ok_or(RuntimeError::EmptyCollection {
            kind: KIND,
            op: "find_first",
        })
}

pub(super) fn builtin_ds_map_find_last(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "ds_map_find_last")?;
    map(ctx, &args)?
        .last_key()
        .cloned()
        .ok_or(RuntimeError::EmptyCollection {
            kind: KIND,
            op: "find_last",
        })
}

/// Key after the given one, or `undefined` when it is missing or last.
pub(super) fn builtin_ds_map_find_next(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 2, "ds_map_find_next")?;
    Ok(map(ctx, &args)?.next_key(&args[1])?.cloned().unwrap_or_default())
}

pub(super) fn builtin_ds_map_find_previous(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 2, "ds_map_find_previous")?;
    Ok(map(ctx, &args)?
        .previous_key(&args[1])?
        .cloned()
        .unwrap_or_default())
}
