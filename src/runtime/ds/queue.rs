use std::collections::VecDeque;

use crate::runtime::{ds::DsKind, error::RuntimeError, gc::IntegrityCheck, value::Value};

/// FIFO queue.
#[derive(Debug, Clone, Default)]
pub struct DsQueue {
    items: VecDeque<Value>,
}

impl DsQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, value: Value) {
        self.items.push_back(value);
    }

    pub fn pop_front(&mut self) -> Result<Value, RuntimeError> {
        self.items.pop_front().ok_or(RuntimeError::EmptyCollection {
            kind: DsKind::Queue,
            op: "pop_front",
        })
    }

    pub fn front(&self) -> Option<&Value> {
        self.items.front()
    }

    pub fn back(&self) -> Option<&Value> {
        self.items.back()
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

    /// Values from front to back.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.items.iter()
    }

    pub fn integrity_touch(&self, check: &mut IntegrityCheck) {
        check.touch_all(&self.items);
    }
}
