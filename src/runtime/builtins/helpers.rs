use crate::runtime::{
    ds::{DsIndex, DsKind},
    error::RuntimeError,
    value::Value,
};

pub(super) fn check_arity(
    args: &[Value],
    expected: usize,
    name: &'static str,
) -> Result<(), RuntimeError> {
    if args.len() != expected {
        return Err(RuntimeError::Arity {
            name,
            expected: expected.to_string(),
            got: args.len(),
        });
    }
    Ok(())
}

pub(super) fn check_arity_range(
    args: &[Value],
    min: usize,
    max: usize,
    name: &'static str,
) -> Result<(), RuntimeError> {
    if args.len() < min || args.len() > max {
        return Err(RuntimeError::Arity {
            name,
            expected: format!("{}..{}", min, max),
            got: args.len(),
        });
    }
    Ok(())
}

pub(super) fn check_min_arity(
    args: &[Value],
    min: usize,
    name: &'static str,
) -> Result<(), RuntimeError> {
    if args.len() < min {
        return Err(RuntimeError::Arity {
            name,
            expected: format!("at least {}", min),
            got: args.len(),
        });
    }
    Ok(())
}

/// Reads a collection handle. Handles are integers; a negative or fractional
/// number can never name a collection.
pub(super) fn arg_handle(
    args: &[Value],
    index: usize,
    kind: DsKind,
) -> Result<DsIndex, RuntimeError> {
    let raw = args[index].as_integer()?;
    DsIndex::try_from(raw).map_err(|_| RuntimeError::InvalidHandle { kind, index: raw })
}

pub(super) fn handle_value(index: DsIndex) -> Value {
    Value::Integer(index as i64)
}

/// Reads a non-negative array index or size.
pub(super) fn arg_usize(args: &[Value], index: usize, len: usize) -> Result<usize, RuntimeError> {
    let raw = args[index].as_integer()?;
    usize::try_from(raw).map_err(|_| RuntimeError::IndexOutOfBounds { index: raw, len })
}
