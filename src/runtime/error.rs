use thiserror::Error;

use crate::runtime::ds::DsKind;

/// Recoverable runtime failure.
///
/// Every variant is surfaced to the interpreter as a script-level error: the
/// offending statement aborts and execution continues.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },

    #[error("unsupported key type: {got} values cannot be ordered")]
    UnsupportedKeyType { got: &'static str },

    #[error("{op} on empty {kind}")]
    EmptyCollection { kind: DsKind, op: &'static str },

    #[error("invalid {kind} handle {index}")]
    InvalidHandle { kind: DsKind, index: i64 },

    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: i64, len: usize },

    #[error("wrong number of arguments to {name}: expected {expected}, got {got}")]
    Arity {
        name: &'static str,
        expected: String,
        got: usize,
    },

    #[error("invalid argument to {name}: {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: &'static str,
    },

    #[error("unknown builtin `{0}`")]
    UnknownBuiltin(String),

    #[error("evaluation stack underflow")]
    StackUnderflow,

    #[error("evaluation stack overflow (limit {limit})")]
    StackOverflow { limit: usize },
}

/// Broken ownership bookkeeping.
///
/// These are bugs in the runtime itself, never script errors. Continuing after
/// one risks reading reclaimed memory, so callers hand them to [`fatal`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OwnershipViolation {
    #[error(
        "array buffer in slot {slot} is reachable through {aliases} aliases but its owner count is {owners}"
    )]
    OverCounted {
        slot: u32,
        aliases: usize,
        owners: usize,
    },

    #[error("array buffer in slot {slot} was reclaimed by the collector but is still reachable")]
    ReclaimedBufferReachable { slot: u32 },

    #[error("heap slot {slot} tracks an array buffer that records slot {recorded}")]
    SlotMismatch { slot: u32, recorded: u32 },
}

/// Aborts the process with a diagnostic naming the violated invariant.
/// Never unwinds: `catch_unwind` cannot intercept it.
pub fn fatal(violation: &OwnershipViolation) -> ! {
    tracing::error!(%violation, "ownership invariant violated");
    eprintln!("fatal: ownership invariant violated: {violation}");
    std::process::abort()
}
