use crate::runtime::{builtins::get_builtin, error::RuntimeError, value::Value};

use super::VM;

impl VM {
    pub fn call_builtin(&mut self, name: &str, args: Vec<Value>) -> Result<Value, RuntimeError> {
        let builtin =
            get_builtin(name).ok_or_else(|| RuntimeError::UnknownBuiltin(name.to_string()))?;
        builtin.call(self, args)
    }

    /// Calls a builtin with the top `num_args` stack values as arguments, in
    /// push order, and pushes its result.
    pub fn execute_builtin_call(&mut self, name: &str, num_args: usize) -> Result<(), RuntimeError> {
        let start = self
            .stack
            .len()
            .checked_sub(num_args)
            .ok_or(RuntimeError::StackUnderflow)?;
        let args = self.stack.split_off(start);
        let result = self.call_builtin(name, args)?;
        self.push(result)
    }
}
