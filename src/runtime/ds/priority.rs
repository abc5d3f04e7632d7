use std::{cmp::Ordering, collections::VecDeque};

use crate::runtime::{
    ds::{DsKind, compare::DsComparator},
    error::RuntimeError,
    gc::IntegrityCheck,
    value::Value,
};

/// Min-first priority queue of `(priority, value)` pairs.
///
/// Pairs are kept sorted by priority, then by value. Values that cannot be
/// ordered (arrays, handles) tie, and ties keep insertion order, so among equal
/// pairs the first added is removed first from either end.
#[derive(Debug, Clone, Default)]
pub struct DsPriority {
    entries: VecDeque<(Value, Value)>,
    epsilon: Option<f64>,
}

impl DsPriority {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_epsilon(epsilon: f64) -> Self {
        Self {
            entries: VecDeque::new(),
            epsilon: Some(epsilon),
        }
    }

    fn comparator(&self) -> DsComparator {
        self.epsilon.map_or_else(DsComparator::current, DsComparator::new)
    }

    pub fn push(&mut self, priority: Value, value: Value) -> Result<(), RuntimeError> {
        DsComparator::check_key(&priority)?;
        let cmp = self.comparator();
        let pair = (priority, value);

        // Upper bound: after every pair that does not order after the new one.
        let (mut lo, mut hi) = (0, self.entries.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if pair_order(&cmp, &self.entries[mid], &pair)? == Ordering::Greater {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        self.entries.insert(lo, pair);
        Ok(())
    }

    /// Removes the minimum pair.
    pub fn pop_min(&mut self) -> Result<(Value, Value), RuntimeError> {
        self.entries.pop_front().ok_or(RuntimeError::EmptyCollection {
            kind: DsKind::Priority,
            op: "pop_min",
        })
    }

    /// Removes the maximum pair.
    pub fn pop_max(&mut self) -> Result<(Value, Value), RuntimeError> {
        self.max_index()
            .and_then(|i| self.entries.remove(i))
            .ok_or(RuntimeError::EmptyCollection {
                kind: DsKind::Priority,
                op: "pop_max",
            })
    }

    pub fn peek_min(&self) -> Option<(&Value, &Value)> {
        self.entries.front().map(|(p, v)| (p, v))
    }

    pub fn peek_max(&self) -> Option<(&Value, &Value)> {
        let (p, v) = &self.entries[self.max_index()?];
        Some((p, v))
    }

    // First-added pair of the maximal group.
    fn max_index(&self) -> Option<usize> {
        let last = self.entries.len().checked_sub(1)?;
        let cmp = self.comparator();
        let mut i = last;
        while i > 0
            && matches!(
                pair_order(&cmp, &self.entries[i - 1], &self.entries[last]),
                Ok(Ordering::Equal)
            )
        {
            i -= 1;
        }
        Some(i)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Pairs in pop order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(p, v)| (p, v))
    }

    pub fn integrity_touch(&self, check: &mut IntegrityCheck) {
        for (priority, value) in &self.entries {
            check.touch(priority);
            check.touch(value);
        }
    }
}

fn pair_order(
    cmp: &DsComparator,
    a: &(Value, Value),
    b: &(Value, Value),
) -> Result<Ordering, RuntimeError> {
    match cmp.compare(&a.0, &b.0)? {
        Ordering::Equal => Ok(cmp.compare(&a.1, &b.1).unwrap_or(Ordering::Equal)),
        other => Ok(other),
    }
}
