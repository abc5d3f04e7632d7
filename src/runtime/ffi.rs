//! Native call signature encoding.
//!
//! The native-library loader lives outside this crate; it receives a signature
//! string with one character per parameter followed by one for the return type.

use crate::runtime::{error::RuntimeError, value::Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiType {
    Real,
    String,
}

impl FfiType {
    pub fn sig_char(self) -> char {
        match self {
            FfiType::Real => 'r',
            FfiType::String => 's',
        }
    }

    /// Native type for an argument. Arrays, handles and `undefined` have no
    /// native representation.
    pub fn of(value: &Value) -> Result<Self, RuntimeError> {
        match value {
            Value::Integer(_) | Value::Real(_) => Ok(FfiType::Real),
            Value::String(_) => Ok(FfiType::String),
            other => Err(other.mismatch("Real or String")),
        }
    }
}

/// Signature for a call with `args` returning `returns`.
pub fn encode_signature(args: &[Value], returns: FfiType) -> Result<String, RuntimeError> {
    let mut sig = String::with_capacity(args.len() + 1);
    for arg in args {
        sig.push(FfiType::of(arg)?.sig_char());
    }
    sig.push(returns.sig_char());
    Ok(sig)
}
