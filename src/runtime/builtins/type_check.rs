use crate::runtime::{RuntimeContext, error::RuntimeError, value::Value};

use super::helpers::check_arity;

pub(super) fn builtin_typeof(
    _ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "typeof")?;
    Ok(Value::from(args[0].type_tag().script_name()))
}

pub(super) fn builtin_is_real(
    _ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "is_real")?;
    Ok(Value::from(matches!(args[0], Value::Real(_))))
}

pub(super) fn builtin_is_int64(
    _ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "is_int64")?;
    Ok(Value::from(args[0].is_integral()))
}

pub(super) fn builtin_is_numeric(
    _ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "is_numeric")?;
    Ok(Value::from(args[0].is_numeric()))
}

pub(super) fn builtin_is_string(
    _ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "is_string")?;
    Ok(Value::from(args[0].is_string()))
}

pub(super) fn builtin_is_array(
    _ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "is_array")?;
    Ok(Value::from(args[0].is_array()))
}

pub(super) fn builtin_is_undefined(
    _ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "is_undefined")?;
    Ok(Value::from(args[0].is_undefined()))
}
