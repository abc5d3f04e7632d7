//! Value and collection runtime for a dynamically typed scripting language.
//!
//! The entry points are [`Value`], the [`VM`] that hosts values for an
//! interpreter, and the script collections under [`runtime::ds`].
pub mod runtime;

pub use runtime::{
    RuntimeContext,
    config::{ConfigError, RuntimeConfig},
    ds::{Collections, DsComparator, DsKind, DsMap, DsPriority, DsQueue, DsStack},
    error::{OwnershipViolation, RuntimeError},
    ffi::{FfiType, encode_signature},
    gc::{ArrayRef, CollectReport, GcHeap},
    str_buf::StrBuf,
    value::{TypeTag, Value},
    vm::VM,
};
