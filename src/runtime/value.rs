use std::fmt;

use crate::runtime::{error::RuntimeError, gc::ArrayRef, str_buf::StrBuf};

/// Runtime value passed between the interpreter, builtins and collections.
///
/// ## Memory Management Model
///
/// Scalars (`Undefined`, `Integer`, `Real`, `Handle`) are unboxed and copied.
/// `String` and `Array` alias shared buffers: cloning a value is O(1) and bumps
/// the buffer's owner count, dropping it releases that ownership, and the
/// buffer is freed when the last owner goes away. Moving a value transfers
/// ownership, so a released value cannot be touched again.
///
/// ### Cycles
///
/// Strings are immutable and can never form cycles. Arrays are mutable and can
/// reference an ancestor when written through the shared-by-reference path
/// ([`GcHeap::array_set_shared`](crate::runtime::gc::GcHeap::array_set_shared)).
/// Owner counts alone cannot reclaim such a cycle; every array buffer is
/// therefore registered with a [`GcHeap`](crate::runtime::gc::GcHeap) whose
/// tracing pass reclaims cycles that are unreachable from the roots.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Undefined,
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit floating point number.
    Real(f64),
    /// Immutable byte string.
    String(StrBuf),
    /// Mutable, copy-on-write array of values.
    Array(ArrayRef),
    /// Opaque resource id owned by some other subsystem.
    Handle(u64),
}

/// Variant discriminant, used by predicates and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Undefined,
    Integer,
    Real,
    String,
    Array,
    Handle,
}

impl TypeTag {
    /// Canonical label used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            TypeTag::Undefined => "Undefined",
            TypeTag::Integer => "Integer",
            TypeTag::Real => "Real",
            TypeTag::String => "String",
            TypeTag::Array => "Array",
            TypeTag::Handle => "Handle",
        }
    }

    /// Label reported to scripts by `typeof`.
    pub fn script_name(self) -> &'static str {
        match self {
            TypeTag::Undefined => "undefined",
            TypeTag::Integer => "int64",
            TypeTag::Real => "number",
            TypeTag::String => "string",
            TypeTag::Array => "array",
            TypeTag::Handle => "ptr",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Builds a string value over a freshly allocated buffer.
    pub fn make_string(bytes: impl AsRef<[u8]>) -> Self {
        Value::String(StrBuf::new(bytes.as_ref()))
    }

    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Undefined => TypeTag::Undefined,
            Value::Integer(_) => TypeTag::Integer,
            Value::Real(_) => TypeTag::Real,
            Value::String(_) => TypeTag::String,
            Value::Array(_) => TypeTag::Array,
            Value::Handle(_) => TypeTag::Handle,
        }
    }

    /// Returns the canonical runtime type label used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_tag().name()
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Real(_))
    }

    pub fn is_integral(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Reads a numeric value as a real.
    pub fn as_real(&self) -> Result<f64, RuntimeError> {
        match self {
            Value::Integer(v) => Ok(*v as f64),
            Value::Real(v) => Ok(*v),
            other => Err(other.mismatch("Real")),
        }
    }

    /// Reads a numeric value as an integer. Reals are accepted only when they
    /// hold a whole number.
    pub fn as_integer(&self) -> Result<i64, RuntimeError> {
        match self {
            Value::Integer(v) => Ok(*v),
            Value::Real(v) if v.fract() == 0.0 && v.is_finite() => Ok(*v as i64),
            other => Err(other.mismatch("Integer")),
        }
    }

    pub fn as_bytes(&self) -> Result<&[u8], RuntimeError> {
        match self {
            Value::String(s) => Ok(s.as_bytes()),
            other => Err(other.mismatch("String")),
        }
    }

    pub fn as_array(&self) -> Result<&ArrayRef, RuntimeError> {
        match self {
            Value::Array(array) => Ok(array),
            other => Err(other.mismatch("Array")),
        }
    }

    /// Rejects arrays where a scalar is required.
    pub fn expect_scalar(&self) -> Result<&Self, RuntimeError> {
        match self {
            Value::Array(_) => Err(self.mismatch("scalar")),
            _ => Ok(self),
        }
    }

    pub(crate) fn mismatch(&self, expected: &'static str) -> RuntimeError {
        RuntimeError::TypeMismatch {
            expected,
            got: self.type_name(),
        }
    }

    /// Converts a value to display text without quoting strings.
    pub fn to_string_value(&self) -> String {
        match self {
            Value::String(s) => s.to_string_lossy().into_owned(),
            other => other.to_string(),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(StrBuf::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(StrBuf::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut open = Vec::new();
        write_value(f, self, &mut open)
    }
}

// `open` holds the arrays currently being printed so a cycle prints as `[...]`
// instead of recursing forever.
fn write_value(
    f: &mut fmt::Formatter<'_>,
    value: &Value,
    open: &mut Vec<*const ()>,
) -> fmt::Result {
    match value {
        Value::Undefined => write!(f, "undefined"),
        Value::Integer(v) => write!(f, "{}", v),
        Value::Real(v) => write!(f, "{}", v),
        Value::String(s) => write!(f, "\"{}\"", s.to_string_lossy()),
        Value::Handle(id) => write!(f, "<handle {}>", id),
        Value::Array(array) => {
            let id = array.as_ptr();
            if open.contains(&id) {
                return write!(f, "[...]");
            }
            open.push(id);
            write!(f, "[")?;
            for (i, element) in array.to_vec().iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write_value(f, element, open)?;
            }
            open.pop();
            write!(f, "]")
        }
    }
}
