use crate::runtime::{
    ds::DsKind,
    error::{OwnershipViolation, RuntimeError},
    gc::{IntegrityCheck, IntegrityReport},
    value::Value,
};

/// LIFO stack.
#[derive(Debug, Clone, Default)]
pub struct DsStack {
    items: Vec<Value>,
}

impl DsStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: Value) {
        self.items.push(value);
    }

    pub fn pop(&mut self) -> Result<Value, RuntimeError> {
        self.items.pop().ok_or(RuntimeError::EmptyCollection {
            kind: DsKind::Stack,
            op: "pop",
        })
    }

    pub fn top(&self) -> Option<&Value> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Values from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.items.iter()
    }

    pub fn integrity_touch(&self, check: &mut IntegrityCheck) {
        check.touch_all(&self.items);
    }

    /// Verifies that no held array buffer is reachable through more aliases
    /// than its owner count and that none of them has been reclaimed.
    pub fn integrity_check(&self) -> Result<IntegrityReport, OwnershipViolation> {
        let mut check = IntegrityCheck::new();
        self.integrity_touch(&mut check);
        check.finish()
    }
}
