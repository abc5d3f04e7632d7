use std::{
    borrow::Cow,
    fmt,
    rc::{Rc, Weak},
};

use crate::runtime::leak_detector;

/// Immutable, reference-counted byte buffer backing `Value::String`.
///
/// Contents are raw bytes: embedded zero bytes are allowed and ordering is
/// byte-lexicographic. Since a buffer can never be mutated after construction,
/// plain reference counting is enough to reclaim it; strings never take part
/// in cycles.
///
/// Using `Rc<[u8]>` rather than `Rc<Vec<u8>>` keeps the payload one indirection
/// away from the value.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StrBuf(Rc<[u8]>);

impl StrBuf {
    /// Allocates a fresh buffer with an owner count of 1.
    pub fn new(bytes: &[u8]) -> Self {
        leak_detector::record_string();
        Self(Rc::from(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of live values aliasing this buffer.
    pub fn owner_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    pub fn ptr_eq(&self, other: &StrBuf) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Returns a non-owning observer, used by diagnostics and tests to check
    /// when the buffer is released.
    pub fn downgrade(&self) -> WeakStrBuf {
        WeakStrBuf(Rc::downgrade(&self.0))
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl fmt::Debug for StrBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_string_lossy())
    }
}

impl From<&str> for StrBuf {
    fn from(value: &str) -> Self {
        Self::new(value.as_bytes())
    }
}

impl From<String> for StrBuf {
    fn from(value: String) -> Self {
        leak_detector::record_string();
        Self(Rc::from(value.into_bytes().into_boxed_slice()))
    }
}

impl From<Vec<u8>> for StrBuf {
    fn from(value: Vec<u8>) -> Self {
        leak_detector::record_string();
        Self(Rc::from(value.into_boxed_slice()))
    }
}

/// Non-owning observer of a [`StrBuf`].
#[derive(Clone)]
pub struct WeakStrBuf(Weak<[u8]>);

impl WeakStrBuf {
    /// Returns `true` while at least one owner keeps the buffer alive.
    pub fn is_live(&self) -> bool {
        self.0.strong_count() > 0
    }

    pub fn owner_count(&self) -> usize {
        self.0.strong_count()
    }
}
