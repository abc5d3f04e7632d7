use crate::runtime::{RuntimeContext, error::RuntimeError, value::Value};

use super::helpers::{arg_usize, check_arity, check_arity_range};

/// `array_create(size, [value])`: array of `size` copies of `value`
/// (default `undefined`).
pub(super) fn builtin_array_create(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity_range(&args, 1, 2, "array_create")?;
    let size = arg_usize(&args, 0, 0)?;
    let fill = args.get(1).cloned().unwrap_or_default();
    let mut elements = Vec::new();
    elements
        .try_reserve_exact(size)
        .map_err(|_| RuntimeError::InvalidArgument {
            name: "array_create",
            reason: "size exceeds available memory",
        })?;
    elements.resize(size, fill);
    Ok(ctx.make_array(elements))
}

pub(super) fn builtin_array_length(
    _ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "array_length")?;
    Ok(Value::Integer(args[0].as_array()?.len() as i64))
}

pub(super) fn builtin_array_get(
    _ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 2, "array_get")?;
    let array = args[0].as_array()?;
    let len = array.len();
    let index = arg_usize(&args, 1, len)?;
    array
        .get(index)
        .ok_or(RuntimeError::IndexOutOfBounds {
            index: index as i64,
            len,
        })
}
