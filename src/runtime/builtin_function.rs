use std::fmt;

use crate::runtime::{BuiltinFn, RuntimeContext, error::RuntimeError, value::Value};

/// Entry of the builtin table: script-visible name, a usage line for
/// diagnostics and listings, and the native function.
#[derive(Clone)]
pub struct BuiltinFunction {
    pub name: &'static str,
    pub signature: &'static str,
    pub func: BuiltinFn,
}

impl BuiltinFunction {
    pub fn call(
        &self,
        ctx: &mut dyn RuntimeContext,
        args: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        tracing::trace!(builtin = self.name, argc = args.len(), "builtin call");
        (self.func)(ctx, args)
    }
}

impl fmt::Debug for BuiltinFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BuiltinFunction({})", self.signature)
    }
}

impl PartialEq for BuiltinFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
