use crate::runtime::{ds::DsKind, error::RuntimeError};

pub type DsIndex = usize;

/// Handle table for one collection kind.
///
/// Destroyed slots become tombstones and are handed out again, lowest index
/// first, before the table grows. A lookup through a stale or never-issued
/// index is an [`RuntimeError::InvalidHandle`], never a panic.
#[derive(Debug)]
pub struct DataStructureManager<T> {
    kind: DsKind,
    slots: Vec<Option<T>>,
    // Smallest index that may be a tombstone.
    min_free: DsIndex,
}

impl<T> DataStructureManager<T> {
    pub fn new(kind: DsKind) -> Self {
        Self {
            kind,
            slots: Vec::new(),
            min_free: 0,
        }
    }

    pub fn kind(&self) -> DsKind {
        self.kind
    }

    /// Stores `ds` and returns its handle.
    pub fn ds_new(&mut self, ds: T) -> DsIndex {
        let index = self.next_index();
        self.slots[index] = Some(ds);
        tracing::debug!(kind = %self.kind, index, "ds created");
        index
    }

    pub fn ds_exists(&self, index: DsIndex) -> bool {
        matches!(self.slots.get(index), Some(Some(_)))
    }

    pub fn ds_get(&self, index: DsIndex) -> Result<&T, RuntimeError> {
        match self.slots.get(index) {
            Some(Some(ds)) => Ok(ds),
            _ => Err(self.invalid(index)),
        }
    }

    pub fn ds_get_mut(&mut self, index: DsIndex) -> Result<&mut T, RuntimeError> {
        let kind = self.kind;
        match self.slots.get_mut(index) {
            Some(Some(ds)) => Ok(ds),
            _ => Err(RuntimeError::InvalidHandle {
                kind,
                index: index as i64,
            }),
        }
    }

    /// Destroys the structure under `index`, releasing everything it holds.
    pub fn ds_delete(&mut self, index: DsIndex) -> Result<T, RuntimeError> {
        let ds = match self.slots.get_mut(index) {
            Some(slot) => slot.take(),
            None => None,
        };
        let ds = ds.ok_or_else(|| self.invalid(index))?;
        self.min_free = self.min_free.min(index);
        tracing::debug!(kind = %self.kind, index, "ds destroyed");
        Ok(ds)
    }

    /// Destroys every structure and forgets all handles.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.min_free = 0;
    }

    /// Live structures in handle order.
    pub fn iter(&self) -> impl Iterator<Item = (DsIndex, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|ds| (index, ds)))
    }

    /// Number of live structures.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn next_index(&mut self) -> DsIndex {
        if let Some(offset) = self.slots[self.min_free..]
            .iter()
            .position(Option::is_none)
        {
            self.min_free += offset;
            return self.min_free;
        }
        self.slots.push(None);
        self.min_free = self.slots.len() - 1;
        self.min_free
    }

    fn invalid(&self, index: DsIndex) -> RuntimeError {
        RuntimeError::InvalidHandle {
            kind: self.kind,
            index: index as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_sequential() {
        let mut manager = DataStructureManager::new(DsKind::Stack);
        assert_eq!(manager.ds_new("a"), 0);
        assert_eq!(manager.ds_new("b"), 1);
        assert_eq!(manager.ds_new("c"), 2);
        assert_eq!(manager.len(), 3);
    }

    #[test]
    fn lowest_tombstone_is_reused_first() {
        let mut manager = DataStructureManager::new(DsKind::Queue);
        for i in 0..5 {
            manager.ds_new(i);
        }
        assert_eq!(manager.ds_delete(3), Ok(3));
        assert_eq!(manager.ds_delete(1), Ok(1));
        assert!(!manager.ds_exists(1));

        assert_eq!(manager.ds_new(10), 1);
        assert_eq!(manager.ds_new(11), 3);
        assert_eq!(manager.ds_new(12), 5);
        assert_eq!(manager.ds_get(3), Ok(&11));
    }

    #[test]
    fn stale_handles_are_errors() {
        let mut manager = DataStructureManager::new(DsKind::Map);
        let index = manager.ds_new(());
        manager.ds_delete(index).unwrap();

        let expected = RuntimeError::InvalidHandle {
            kind: DsKind::Map,
            index: 0,
        };
        assert_eq!(manager.ds_get(index), Err(expected.clone()));
        assert_eq!(manager.ds_delete(index), Err(expected));
        assert!(manager.ds_get_mut(99).is_err());
        assert!(!manager.ds_exists(99));
    }

    #[test]
    fn clear_forgets_everything() {
        let mut manager = DataStructureManager::new(DsKind::Priority);
        manager.ds_new('x');
        manager.ds_new('y');
        manager.clear();
        assert!(manager.is_empty());
        assert_eq!(manager.ds_new('z'), 0);
    }

    #[test]
    fn iter_skips_tombstones() {
        let mut manager = DataStructureManager::new(DsKind::Stack);
        for i in 0..4 {
            manager.ds_new(i * 10);
        }
        manager.ds_delete(2).unwrap();
        let live: Vec<_> = manager.iter().map(|(i, v)| (i, *v)).collect();
        assert_eq!(live, vec![(0, 0), (1, 10), (3, 30)]);
    }
}
