use crate::runtime::{
    RuntimeContext,
    ds::{self, DsKind},
    error::RuntimeError,
    value::Value,
};

use super::helpers::check_arity;

/// `ds_exists(id, type)`: whether `id` names a live collection of the kind
/// with script code `type`. Unknown codes and malformed ids are simply false.
pub(super) fn builtin_ds_exists(
    ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 2, "ds_exists")?;
    let kind = DsKind::from_code(args[1].as_integer()?);
    let index = args[0]
        .as_integer()
        .ok()
        .and_then(|raw| usize::try_from(raw).ok());
    let exists = match (index, kind) {
        (Some(index), Some(kind)) => ctx.collections().exists(index, kind),
        _ => false,
    };
    Ok(Value::from(exists))
}

/// `ds_set_precision(epsilon)`: replaces the process-wide comparison
/// tolerance. Existing collections keep their order.
pub(super) fn builtin_ds_set_precision(
    _ctx: &mut dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    check_arity(&args, 1, "ds_set_precision")?;
    let epsilon = args[0].as_real()?;
    if !epsilon.is_finite() || epsilon < 0.0 {
        return Err(RuntimeError::InvalidArgument {
            name: "ds_set_precision",
            reason: "precision must be finite and non-negative",
        });
    }
    ds::set_epsilon(epsilon);
    Ok(Value::Undefined)
}
