//! Value representation, ownership and the script collection library.
//!
//! # Ownership Model
//! String buffers are immutable and reference counted; they can never form
//! cycles, so owner counts alone reclaim them. Array buffers are reference
//! counted too, but a write through the shared-by-reference path can make an
//! array reach one of its ancestors. Every array buffer is therefore
//! registered with the [`gc::GcHeap`], whose tracing pass runs at interpreter
//! safe points and reclaims cycles no root can reach.
//!
//! Collections never trigger a collection themselves; they only hold values,
//! and the VM offers their contents to the collector as roots.
use crate::runtime::{ds::Collections, error::RuntimeError, gc::GcHeap, value::Value};

pub mod builtin_function;
pub mod builtins;
pub mod config;
pub mod ds;
pub mod error;
pub mod ffi;
pub mod gc;
pub mod leak_detector;
pub mod str_buf;
pub mod value;
pub mod vm;

pub type BuiltinFn = fn(&mut dyn RuntimeContext, Vec<Value>) -> Result<Value, RuntimeError>;

/// What builtins may reach of the hosting runtime.
pub trait RuntimeContext {
    fn collections(&self) -> &Collections;
    fn collections_mut(&mut self) -> &mut Collections;
    fn gc_heap_mut(&mut self) -> &mut GcHeap;

    /// Allocates an array; may run a collection first.
    fn make_array(&mut self, elements: Vec<Value>) -> Value;
}
