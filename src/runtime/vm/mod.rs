use crate::runtime::{
    RuntimeContext,
    config::{ConfigError, RuntimeConfig},
    ds::{self, Collections},
    error::RuntimeError,
    gc::GcHeap,
    value::Value,
};

mod function_call;
mod gc_ops;

/// Host for everything the interpreter hands to the runtime: the evaluation
/// stack, global slots, the array heap and the script collections.
///
/// The bytecode loop itself lives outside this crate. It drives the VM
/// through [`push`](Self::push)/[`pop`](Self::pop), calls builtins by name and
/// invokes [`safe_point`](Self::safe_point) between instructions.
pub struct VM {
    stack: Vec<Value>,
    max_stack: usize,
    last_popped: Value,
    pub globals: Vec<Value>,
    pub gc_heap: GcHeap,
    pub collections: Collections,
    integrity_checks: bool,
}

impl Default for VM {
    fn default() -> Self {
        Self::new()
    }
}

impl VM {
    /// VM with default settings. The process-wide comparison tolerance is left
    /// untouched.
    pub fn new() -> Self {
        Self::build(&RuntimeConfig::default())
    }

    /// VM configured from `config`, which also installs its comparison
    /// tolerance process-wide.
    pub fn with_config(config: &RuntimeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        ds::set_epsilon(config.epsilon);
        Ok(Self::build(config))
    }

    fn build(config: &RuntimeConfig) -> Self {
        let mut gc_heap = GcHeap::with_threshold(config.gc_threshold);
        gc_heap.set_enabled(config.gc_enabled);
        Self {
            stack: Vec::new(),
            max_stack: config.max_stack,
            last_popped: Value::Undefined,
            globals: Vec::new(),
            gc_heap,
            collections: Collections::new(),
            integrity_checks: config.integrity_checks,
        }
    }

    pub fn set_gc_enabled(&mut self, enabled: bool) {
        self.gc_heap.set_enabled(enabled);
    }

    pub fn set_gc_threshold(&mut self, threshold: usize) {
        self.gc_heap.set_threshold(threshold);
    }

    pub fn set_integrity_checks(&mut self, enabled: bool) {
        self.integrity_checks = enabled;
    }

    pub fn push(&mut self, value: Value) -> Result<(), RuntimeError> {
        if self.stack.len() >= self.max_stack {
            return Err(RuntimeError::StackOverflow {
                limit: self.max_stack,
            });
        }
        self.stack.push(value);
        Ok(())
    }

    /// Pops the top value. A copy is kept as the last popped value, which
    /// stays a root until the next pop.
    pub fn pop(&mut self) -> Result<Value, RuntimeError> {
        let value = self.stack.pop().ok_or(RuntimeError::StackUnderflow)?;
        self.last_popped = value.clone();
        Ok(value)
    }

    /// Value `back` slots below the top.
    pub fn peek(&self, back: usize) -> Result<&Value, RuntimeError> {
        back
            .checked_add(1)
            .and_then(|depth| self.stack.len().checked_sub(depth))
            .map(|i| &self.stack[i])
            .ok_or(RuntimeError::StackUnderflow)
    }

    pub fn stack_len(&self) -> usize {
        self.stack.len()
    }

    /// After a program completes execution, this returns the final result.
    pub fn last_popped_stack_elem(&self) -> &Value {
        &self.last_popped
    }

    pub fn set_global(&mut self, index: usize, value: Value) {
        if index >= self.globals.len() {
            self.globals.resize(index + 1, Value::Undefined);
        }
        self.globals[index] = value;
    }

    pub fn global(&self, index: usize) -> Value {
        self.globals.get(index).cloned().unwrap_or_default()
    }

    /// Allocates an array, collecting first when the allocation threshold has
    /// been reached.
    pub fn make_array(&mut self, elements: Vec<Value>) -> Value {
        self.safe_point();
        self.gc_heap.make_array(elements)
    }

    /// Copy-on-write store into the array held by global `index`.
    pub fn set_global_element(
        &mut self,
        index: usize,
        element: usize,
        value: Value,
    ) -> Result<(), RuntimeError> {
        if index >= self.globals.len() {
            return Err(Value::Undefined.mismatch("Array"));
        }
        self.gc_heap
            .array_set(&mut self.globals[index], element, value)
    }
}

impl RuntimeContext for VM {
    fn collections(&self) -> &Collections {
        &self.collections
    }

    fn collections_mut(&mut self) -> &mut Collections {
        &mut self.collections
    }

    fn gc_heap_mut(&mut self) -> &mut GcHeap {
        &mut self.gc_heap
    }

    fn make_array(&mut self, elements: Vec<Value>) -> Value {
        VM::make_array(self, elements)
    }
}

#[cfg(test)]
mod function_call_test;
