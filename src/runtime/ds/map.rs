use crate::runtime::{
    ds::compare::DsComparator, error::RuntimeError, gc::IntegrityCheck, value::Value,
};

/// Ordered associative map.
///
/// Entries are kept sorted by [`DsComparator`] in a flat vector; keys the
/// comparator considers equal collapse to one entry, and the key first
/// inserted is the one that is kept.
#[derive(Debug, Clone, Default)]
pub struct DsMap {
    entries: Vec<(Value, Value)>,
    epsilon: Option<f64>,
}

impl DsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map ordered with a fixed tolerance instead of the process-wide one.
    pub fn with_epsilon(epsilon: f64) -> Self {
        Self {
            entries: Vec::new(),
            epsilon: Some(epsilon),
        }
    }

    fn comparator(&self) -> DsComparator {
        self.epsilon.map_or_else(DsComparator::current, DsComparator::new)
    }

    // Binary search that surfaces comparator failures.
    fn search(&self, key: &Value) -> Result<Result<usize, usize>, RuntimeError> {
        DsComparator::check_key(key)?;
        let cmp = self.comparator();
        let (mut lo, mut hi) = (0, self.entries.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if cmp.less(&self.entries[mid].0, key)? {
                lo = mid + 1;
            } else if cmp.less(key, &self.entries[mid].0)? {
                hi = mid;
            } else {
                return Ok(Ok(mid));
            }
        }
        Ok(Err(lo))
    }

    /// Inserts or replaces; returns the replaced value.
    pub fn insert(&mut self, key: Value, value: Value) -> Result<Option<Value>, RuntimeError> {
        match self.search(&key)? {
            Ok(i) => Ok(Some(std::mem::replace(&mut self.entries[i].1, value))),
            Err(i) => {
                self.entries.insert(i, (key, value));
                Ok(None)
            }
        }
    }

    /// Inserts only when the key is absent. Returns whether it was inserted.
    pub fn add(&mut self, key: Value, value: Value) -> Result<bool, RuntimeError> {
        match self.search(&key)? {
            Ok(_) => Ok(false),
            Err(i) => {
                self.entries.insert(i, (key, value));
                Ok(true)
            }
        }
    }

    /// Upsert. Returns whether an existing entry was replaced.
    pub fn replace(&mut self, key: Value, value: Value) -> Result<bool, RuntimeError> {
        Ok(self.insert(key, value)?.is_some())
    }

    pub fn find(&self, key: &Value) -> Result<Option<&Value>, RuntimeError> {
        Ok(self.search(key)?.ok().map(|i| &self.entries[i].1))
    }

    pub fn contains_key(&self, key: &Value) -> Result<bool, RuntimeError> {
        Ok(self.search(key)?.is_ok())
    }

    /// Removes the entry for `key`; returns whether one existed.
    pub fn erase(&mut self, key: &Value) -> Result<bool, RuntimeError> {
        match self.search(key)? {
            Ok(i) => {
                self.entries.remove(i);
                Ok(true)
            }
            Err(_) => Ok(false),
        }
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

    /// Replaces the contents with `other`'s entries. The epsilon override of
    /// `self` is kept.
    pub fn copy_from(&mut self, other: DsMap) {
        self.entries = other.entries;
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn first_key(&self) -> Option<&Value> {
        self.entries.first().map(|(k, _)| k)
    }

    pub fn last_key(&self) -> Option<&Value> {
        self.entries.last().map(|(k, _)| k)
    }

    /// Key following `key`, or `None` when `key` is absent or last.
    pub fn next_key(&self, key: &Value) -> Result<Option<&Value>, RuntimeError> {
        Ok(match self.search(key)? {
            Ok(i) => self.entries.get(i + 1).map(|(k, _)| k),
            Err(_) => None,
        })
    }

    /// Key preceding `key`, or `None` when `key` is absent or first.
    pub fn previous_key(&self, key: &Value) -> Result<Option<&Value>, RuntimeError> {
        Ok(match self.search(key)? {
            Ok(i) if i > 0 => Some(&self.entries[i - 1].0),
            _ => None,
        })
    }

    pub fn integrity_touch(&self, check: &mut IntegrityCheck) {
        for (key, value) in &self.entries {
            check.touch(key);
            check.touch(value);
        }
    }
}
