use std::{rc::Rc, time::Instant};

use crate::runtime::{
    error::{OwnershipViolation, RuntimeError},
    gc::{
        array::{ArrayData, ArrayRef},
        gc_handle::GcHandle,
        heap_entry::HeapEntry,
        telemetry::{CollectReport, GcTelemetry},
    },
    value::Value,
};

const DEFAULT_GC_THRESHOLD: usize = 10_000;
const MIN_GC_THRESHOLD: usize = 1024;
const MAX_GC_THRESHOLD: usize = 1_000_000;
const MIN_PRUNE_AT: usize = 64;

/// Registry of array buffers plus a stop-the-world cycle collector.
///
/// Array buffers are owned by the values that alias them; acyclic buffers are
/// freed the moment their last owner goes away, without the heap being
/// involved. The heap keeps a weak entry per buffer so [`collect`](Self::collect)
/// can enumerate them and reclaim the cycles owner counts cannot.
///
/// A collection:
/// 1. marks every buffer reachable from the declared roots;
/// 2. for each unmarked buffer, subtracts the references held by other
///    unmarked buffers from its owner count; whatever is left is held from
///    outside the heap (a temporary, a value the caller did not declare) and is
///    marked together with everything it reaches;
/// 3. empties the buffers that are still unmarked. They form unreachable
///    cycles, so emptying them drops the cycle's internal references and the
///    owner counts fall to zero.
pub struct GcHeap {
    entries: Vec<Option<HeapEntry>>,
    free_list: Vec<u32>,
    allocation_count: usize,
    gc_threshold: usize,
    gc_enabled: bool,
    /// Registry length at which an allocation that finds the free-list empty
    /// first sweeps out entries whose buffers were freed by their owners.
    prune_at: usize,
    total_collections: usize,
    total_allocations: usize,
    telemetry: GcTelemetry,
}

impl Default for GcHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl GcHeap {
    /// Creates a new heap with default collection settings.
    ///
    /// Defaults:
    /// - threshold: `10_000` allocations
    /// - GC enabled: `true`
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            free_list: Vec::new(),
            allocation_count: 0,
            gc_threshold: DEFAULT_GC_THRESHOLD,
            gc_enabled: true,
            prune_at: MIN_PRUNE_AT,
            total_collections: 0,
            total_allocations: 0,
            telemetry: GcTelemetry::new(),
        }
    }

    /// Creates a new heap with a custom allocation threshold.
    ///
    /// Unlike [`Self::set_threshold`], this does not clamp to `MIN_GC_THRESHOLD`.
    pub fn with_threshold(threshold: usize) -> Self {
        let mut heap = Self::new();
        heap.gc_threshold = threshold;
        heap
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.gc_enabled = enabled
    }

    /// Sets the allocation threshold that triggers collection.
    ///
    /// Values below `MIN_GC_THRESHOLD` are clamped upward.
    pub fn set_threshold(&mut self, threshold: usize) {
        self.gc_threshold = threshold.max(MIN_GC_THRESHOLD)
    }

    pub fn threshold(&self) -> usize {
        self.gc_threshold
    }

    /// Returns `true` when GC is enabled and the threshold was reached.
    pub fn should_collect(&self) -> bool {
        self.gc_enabled && self.allocation_count >= self.gc_threshold
    }

    /// Allocates a new array buffer with an owner count of 1.
    ///
    /// Freed slots are reused through the free-list before the registry grows.
    /// Acyclic buffers die without the collector noticing, so when the
    /// free-list runs dry the registry is swept for their entries, which keeps
    /// it within a constant factor of the live count even with collection
    /// disabled.
    pub fn alloc_array(&mut self, elements: Vec<Value>) -> ArrayRef {
        self.allocation_count += 1;
        self.total_allocations += 1;

        if self.free_list.is_empty() && self.entries.len() >= self.prune_at {
            self.prune();
            let live = self.entries.len() - self.free_list.len();
            self.prune_at = (live * 2).max(MIN_PRUNE_AT);
        }

        let slot = match self.free_list.pop() {
            Some(idx) => idx,
            None => {
                self.entries.push(None);
                (self.entries.len() - 1) as u32
            }
        };

        let array = ArrayRef::new(elements, GcHandle(slot));
        self.entries[slot as usize] = Some(HeapEntry {
            cell: Rc::downgrade(&array.0),
        });
        array
    }

    pub fn make_array(&mut self, elements: Vec<Value>) -> Value {
        Value::Array(self.alloc_array(elements))
    }

    /// Returns the buffer registered under `handle`, if it is still alive.
    pub fn get(&self, handle: GcHandle) -> Option<ArrayRef> {
        self.entries
            .get(handle.0 as usize)?
            .as_ref()?
            .cell
            .upgrade()
            .map(ArrayRef)
    }

    /// Copy-on-write store: when `target` shares its buffer with other values,
    /// it is first pointed at a private copy, so sibling aliases never observe
    /// the write.
    pub fn array_set(
        &mut self,
        target: &mut Value,
        index: usize,
        value: Value,
    ) -> Result<(), RuntimeError> {
        let Value::Array(array) = target else {
            return Err(target.mismatch("Array"));
        };
        if array.is_shared() {
            let fork = self.alloc_array(array.to_vec());
            tracing::trace!(
                from = array.slot().index(),
                to = fork.slot().index(),
                owners = array.owner_count(),
                "copy-on-write fork"
            );
            *array = fork;
        }
        array.write(index, value);
        Ok(())
    }

    /// By-reference store: writes into the buffer every alias observes.
    ///
    /// This is the only write path that can close a reference cycle.
    pub fn array_set_shared(
        &mut self,
        target: &Value,
        index: usize,
        value: Value,
    ) -> Result<(), RuntimeError> {
        target.as_array()?.write(index, value);
        Ok(())
    }

    /// Copy-on-write append.
    pub fn array_push(&mut self, target: &mut Value, value: Value) -> Result<(), RuntimeError> {
        let len = target.as_array()?.len();
        self.array_set(target, len, value)
    }

    /// Number of array buffers currently alive.
    pub fn live_count(&self) -> usize {
        self.entries
            .iter()
            .flatten()
            .filter(|entry| entry.is_live())
            .count()
    }

    /// Returns the total number of allocations performed by this heap.
    pub fn total_allocations(&self) -> usize {
        self.total_allocations
    }

    /// Returns the total number of completed GC cycles.
    pub fn total_collections(&self) -> usize {
        self.total_collections
    }

    pub fn telemetry(&self) -> &GcTelemetry {
        &self.telemetry
    }

    /// Runs a full stop-the-world collection from the given roots.
    ///
    /// Must only be called between instructions, never while a value is
    /// half-built or a collection is mid-mutation.
    pub fn collect<'a, I>(&mut self, roots: I) -> CollectReport
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let started = Instant::now();
        let threshold_before = self.gc_threshold;

        let mut visited: Vec<ArrayRef> = Vec::new();
        let mut worklist: Vec<ArrayRef> = Vec::with_capacity(16);
        let mut roots_scanned = 0;
        for root in roots {
            roots_scanned += 1;
            if let Value::Array(array) = root {
                worklist.push(array.clone());
            }
        }
        mark(&mut worklist, &mut visited);

        let candidates = self.unmarked_buffers();
        let live_before = visited.len() + candidates.len();

        // Owner count minus the candidate list's own reference.
        for cell in &candidates {
            cell.gc_refs.set(Rc::strong_count(cell) - 1);
        }
        for cell in &candidates {
            for element in cell.elements.borrow().iter() {
                if let Value::Array(child) = element {
                    let child = &child.0;
                    if !child.marked.get() {
                        child.gc_refs.set(child.gc_refs.get().saturating_sub(1));
                    }
                }
            }
        }
        for cell in &candidates {
            if !cell.marked.get() && cell.gc_refs.get() > 0 {
                worklist.push(ArrayRef(Rc::clone(cell)));
            }
        }
        mark(&mut worklist, &mut visited);

        let mut garbage: Vec<Vec<Value>> = Vec::new();
        for cell in &candidates {
            if !cell.marked.get() {
                cell.reclaimed.set(true);
                garbage.push(std::mem::take(&mut *cell.elements.borrow_mut()));
            }
        }
        let reclaimed = garbage.len();

        for array in &visited {
            array.0.marked.set(false);
        }
        drop(visited);
        drop(candidates);
        // Releasing the emptied contents drops the last owners of every buffer
        // in the cycle.
        drop(garbage);

        self.prune();
        let live_after = self.live_count();

        self.total_collections += 1;
        self.allocation_count = 0;
        self.adapt_threshold(reclaimed, live_before);

        let report = CollectReport {
            cycle_index: self.total_collections - 1,
            live_before,
            live_after,
            reclaimed,
            roots_scanned,
            duration_micros: started.elapsed().as_micros() as u64,
            threshold_before,
            threshold_after: self.gc_threshold,
        };
        tracing::debug!(
            cycle = report.cycle_index,
            live_before,
            live_after,
            reclaimed,
            roots_scanned,
            "gc cycle complete"
        );
        self.telemetry.record(report.clone());
        report
    }

    /// Checks that every live buffer still records the slot it is registered
    /// under and has not been reclaimed.
    pub fn audit(&self) -> Result<usize, OwnershipViolation> {
        let mut live = 0;
        for (slot, entry) in self.entries.iter().enumerate() {
            let Some(cell) = entry.as_ref().and_then(|e| e.cell.upgrade()) else {
                continue;
            };
            live += 1;
            if cell.slot.index() as usize != slot {
                return Err(OwnershipViolation::SlotMismatch {
                    slot: slot as u32,
                    recorded: cell.slot.index(),
                });
            }
            if cell.reclaimed.get() {
                return Err(OwnershipViolation::ReclaimedBufferReachable {
                    slot: slot as u32,
                });
            }
        }
        Ok(live)
    }

    // Live buffers left unmarked by the root pass. Slots whose buffer has
    // already been released are recycled on the way.
    fn unmarked_buffers(&mut self) -> Vec<Rc<ArrayData>> {
        let mut out = Vec::new();
        for i in 0..self.entries.len() {
            let Some(entry) = &self.entries[i] else {
                continue;
            };
            match entry.cell.upgrade() {
                Some(cell) => {
                    if !cell.marked.get() {
                        out.push(cell);
                    }
                }
                None => {
                    self.entries[i] = None;
                    self.free_list.push(i as u32);
                }
            }
        }
        out
    }

    fn prune(&mut self) {
        for i in 0..self.entries.len() {
            let dead = matches!(&self.entries[i], Some(entry) if !entry.is_live());
            if dead {
                self.entries[i] = None;
                self.free_list.push(i as u32);
            }
        }
    }

    fn adapt_threshold(&mut self, collected: usize, total_before: usize) {
        if total_before == 0 {
            return;
        }

        let ratio = collected as f64 / total_before as f64;
        if ratio < 0.25 {
            self.gc_threshold = (self.gc_threshold * 2).min(MAX_GC_THRESHOLD);
        } else if ratio > 0.75 {
            self.gc_threshold = (self.gc_threshold / 2).max(MIN_GC_THRESHOLD)
        }
    }
}

// Marks everything reachable from the worklist, recording each newly marked
// buffer in `visited` so the marks can be cleared afterwards.
fn mark(worklist: &mut Vec<ArrayRef>, visited: &mut Vec<ArrayRef>) {
    while let Some(array) = worklist.pop() {
        if array.0.marked.replace(true) {
            continue;
        }
        for element in array.0.elements.borrow().iter() {
            if let Value::Array(child) = element {
                if !child.0.marked.get() {
                    worklist.push(child.clone());
                }
            }
        }
        visited.push(array);
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{
        gc::gc_heap::{GcHeap, MIN_GC_THRESHOLD, MIN_PRUNE_AT},
        leak_detector,
        value::Value,
    };

    #[test]
    fn test_alloc_and_get() {
        let mut heap = GcHeap::new();
        let array = heap.alloc_array(vec![Value::Integer(1)]);
        let found = heap.get(array.slot()).unwrap();
        assert!(found.ptr_eq(&array));
        assert_eq!(found.get(0), Some(Value::Integer(1)));
        drop(found);
        assert_eq!(heap.live_count(), 1);
    }

    #[test]
    fn test_acyclic_arrays_are_freed_without_collection() {
        let mut heap = GcHeap::new();
        let before = leak_detector::snapshot();
        for i in 0..100 {
            heap.make_array(vec![Value::Integer(i)]);
        }
        assert_eq!(heap.live_count(), 0);
        let after = leak_detector::snapshot();
        assert_eq!(after.arrays_allocated - before.arrays_allocated, 100);
        assert_eq!(after.arrays_freed - before.arrays_freed, 100);
        assert_eq!(heap.total_collections(), 0);
    }

    #[test]
    fn test_collect_frees_unreachable_self_cycle() {
        let mut heap = GcHeap::new();
        let before = leak_detector::snapshot();

        let array = heap.make_array(vec![Value::Integer(1)]);
        heap.array_set_shared(&array, 1, array.clone()).unwrap();
        drop(array);
        assert_eq!(heap.live_count(), 1);

        let report = heap.collect(std::iter::empty());
        assert_eq!(report.reclaimed, 1);
        assert_eq!(heap.live_count(), 0);
        let after = leak_detector::snapshot();
        assert_eq!(after.arrays_freed - before.arrays_freed, 1);
    }

    #[test]
    fn test_collect_frees_two_array_cycle() {
        let mut heap = GcHeap::new();
        let a = heap.make_array(vec![]);
        let b = heap.make_array(vec![]);
        heap.array_set_shared(&a, 0, b.clone()).unwrap();
        heap.array_set_shared(&b, 0, a.clone()).unwrap();
        drop(a);
        drop(b);
        assert_eq!(heap.live_count(), 2);

        let report = heap.collect(std::iter::empty());
        assert_eq!(report.reclaimed, 2);
        assert_eq!(heap.live_count(), 0);
        assert_eq!(heap.free_list.len(), 2);
    }

    #[test]
    fn test_collect_preserves_rooted_cycle() {
        let mut heap = GcHeap::new();
        let array = heap.make_array(vec![]);
        heap.array_set_shared(&array, 0, array.clone()).unwrap();

        let roots = vec![array.clone()];
        let report = heap.collect(&roots);
        assert_eq!(report.reclaimed, 0);
        assert_eq!(report.roots_scanned, 1);
        assert_eq!(heap.live_count(), 1);

        let inner = array.as_array().unwrap().get(0).unwrap();
        assert_eq!(inner, array);
        heap.audit().unwrap();
    }

    #[test]
    fn test_collect_preserves_cycle_held_outside_roots() {
        let mut heap = GcHeap::new();
        let array = heap.make_array(vec![Value::Integer(7)]);
        heap.array_set_shared(&array, 1, array.clone()).unwrap();

        // `array` is alive but deliberately not declared as a root.
        let report = heap.collect(std::iter::empty());
        assert_eq!(report.reclaimed, 0);
        assert_eq!(array.as_array().unwrap().get(0), Some(Value::Integer(7)));
        assert!(!array.as_array().unwrap().is_reclaimed());

        drop(array);
        assert_eq!(heap.collect(std::iter::empty()).reclaimed, 1);
    }

    #[test]
    fn test_collect_traces_nested_arrays() {
        let mut heap = GcHeap::new();
        let inner = heap.make_array(vec![Value::Integer(2)]);
        let outer = heap.make_array(vec![Value::Integer(1), inner]);
        heap.array_set_shared(&outer, 2, outer.clone()).unwrap();

        let garbage = heap.make_array(vec![]);
        heap.array_set_shared(&garbage, 0, garbage.clone()).unwrap();
        drop(garbage);
        assert_eq!(heap.live_count(), 3);

        let roots = [outer.clone()];
        let report = heap.collect(&roots);
        assert_eq!(report.reclaimed, 1);
        assert_eq!(heap.live_count(), 2);
        assert_eq!(outer.to_string(), "[1, [2], [...]]");
    }

    #[test]
    fn test_free_list_reuse() {
        let mut heap = GcHeap::new();
        let a = heap.alloc_array(vec![]);
        let slot = a.slot();
        drop(a);

        heap.collect(std::iter::empty());
        assert_eq!(heap.free_list.len(), 1);

        let b = heap.alloc_array(vec![]);
        assert_eq!(b.slot(), slot);
        assert_eq!(heap.entries.len(), 1);
    }

    #[test]
    fn test_registry_stays_bounded_without_collection() {
        let mut heap = GcHeap::new();
        heap.set_enabled(false);
        let kept: Vec<Value> = (0..10).map(|i| heap.make_array(vec![Value::Integer(i)])).collect();

        for i in 0..200_000 {
            heap.make_array(vec![Value::Integer(i)]);
        }

        assert_eq!(heap.total_collections(), 0);
        assert_eq!(heap.total_allocations(), 200_010);
        assert!(heap.entries.len() <= MIN_PRUNE_AT, "{} entries", heap.entries.len());
        assert_eq!(heap.live_count(), kept.len());
        for array in &kept {
            let array = array.as_array().unwrap();
            assert!(heap.get(array.slot()).unwrap().ptr_eq(array));
        }
        assert_eq!(heap.audit(), Ok(kept.len()));
    }

    #[test]
    fn test_registry_tracks_growing_live_set() {
        let mut heap = GcHeap::new();
        heap.set_enabled(false);
        let mut kept = Vec::new();
        for i in 0..1_000 {
            kept.push(heap.make_array(vec![Value::Integer(i)]));
            heap.make_array(vec![]);
        }
        assert_eq!(heap.live_count(), 1_000);
        assert!(heap.entries.len() <= 2 * 1_000 + 1, "{} entries", heap.entries.len());
        heap.audit().unwrap();
    }

    #[test]
    fn test_array_set_forks_shared_buffer() {
        let mut heap = GcHeap::new();
        let mut a = heap.make_array(vec![Value::Integer(1), Value::Integer(2)]);
        let b = a.clone();

        heap.array_set(&mut a, 0, Value::Integer(10)).unwrap();
        assert_eq!(a.to_string(), "[10, 2]");
        assert_eq!(b.to_string(), "[1, 2]");
        assert_ne!(a, b);
        assert_eq!(b.as_array().unwrap().owner_count(), 1);
    }

    #[test]
    fn test_array_set_writes_unique_buffer_in_place() {
        let mut heap = GcHeap::new();
        let mut a = heap.make_array(vec![Value::Integer(1)]);
        let slot = a.as_array().unwrap().slot();
        heap.array_set(&mut a, 3, Value::Integer(4)).unwrap();
        assert_eq!(a.as_array().unwrap().slot(), slot);
        assert_eq!(a.to_string(), "[1, undefined, undefined, 4]");
        assert_eq!(heap.total_allocations(), 1);
    }

    #[test]
    fn test_array_set_shared_is_visible_to_every_alias() {
        let mut heap = GcHeap::new();
        let a = heap.make_array(vec![Value::Integer(1)]);
        let b = a.clone();
        heap.array_set_shared(&a, 0, Value::Integer(5)).unwrap();
        assert_eq!(b.to_string(), "[5]");
    }

    #[test]
    fn test_array_writes_reject_scalars() {
        let mut heap = GcHeap::new();
        let mut scalar = Value::Integer(3);
        assert!(heap.array_set(&mut scalar, 0, Value::Undefined).is_err());
        assert!(heap.array_set_shared(&scalar, 0, Value::Undefined).is_err());
        assert_eq!(scalar, Value::Integer(3));
    }

    #[test]
    fn test_array_push_appends() {
        let mut heap = GcHeap::new();
        let mut a = heap.make_array(vec![]);
        heap.array_push(&mut a, Value::from("x")).unwrap();
        heap.array_push(&mut a, Value::from("y")).unwrap();
        assert_eq!(a.to_string(), "[\"x\", \"y\"]");
    }

    #[test]
    fn test_should_collect_respects_threshold() {
        let mut heap = GcHeap::with_threshold(5);
        assert!(!heap.should_collect());
        let mut keep = Vec::new();
        for _ in 0..5 {
            keep.push(heap.make_array(vec![]));
        }
        assert!(heap.should_collect());
    }

    #[test]
    fn test_should_collect_respects_enabled() {
        let mut heap = GcHeap::with_threshold(2);
        for _ in 0..5 {
            heap.make_array(vec![]);
        }
        assert!(heap.should_collect());

        heap.set_enabled(false);
        assert!(!heap.should_collect());
    }

    #[test]
    fn test_adaptive_threshold_doubles_on_low_collection() {
        let mut heap = GcHeap::with_threshold(MIN_GC_THRESHOLD);
        let initial = heap.gc_threshold;

        let roots: Vec<Value> = (0..10).map(|i| heap.make_array(vec![Value::Integer(i)])).collect();
        heap.collect(&roots);
        assert_eq!(heap.gc_threshold, initial * 2);
    }

    #[test]
    fn test_adaptive_threshold_halves_on_high_collection() {
        let mut heap = GcHeap::with_threshold(100_000);
        let initial = heap.gc_threshold;

        for _ in 0..100 {
            let array = heap.make_array(vec![]);
            heap.array_set_shared(&array, 0, array.clone()).unwrap();
        }

        heap.collect(std::iter::empty());
        assert_eq!(heap.gc_threshold, initial / 2);
    }

    #[test]
    fn test_stress_cycles_between_collections() {
        let mut heap = GcHeap::with_threshold(1024);
        let live = heap.make_array(vec![Value::Integer(0)]);

        for i in 1..20_000i64 {
            let a = heap.make_array(vec![Value::Integer(i)]);
            let b = heap.make_array(vec![a.clone()]);
            heap.array_set_shared(&a, 1, b).unwrap();
            drop(a);

            if heap.should_collect() {
                heap.collect(std::iter::once(&live));
            }
        }

        heap.collect(std::iter::once(&live));
        assert_eq!(heap.live_count(), 1);
        assert!(heap.total_collections() > 0);
        assert!(heap.telemetry().total_reclaimed() > 30_000);
        heap.audit().unwrap();
    }
}
