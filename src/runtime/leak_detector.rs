//! Per-thread allocation accounting for owned buffers.
//!
//! Values are `!Send`, so every buffer is created and released on the thread
//! that owns the runtime; counting per thread keeps concurrently running test
//! threads from disturbing each other's numbers.

use std::cell::Cell;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeakStats {
    pub strings: usize,
    pub arrays_allocated: usize,
    pub arrays_freed: usize,
}

impl LeakStats {
    /// Array buffers allocated but not yet released.
    pub fn live_arrays(&self) -> usize {
        self.arrays_allocated.saturating_sub(self.arrays_freed)
    }
}

thread_local! {
    static STATS: Cell<LeakStats> = const {
        Cell::new(LeakStats {
            strings: 0,
            arrays_allocated: 0,
            arrays_freed: 0,
        })
    };
}

fn update(f: impl FnOnce(&mut LeakStats)) {
    STATS.with(|cell| {
        let mut stats = cell.get();
        f(&mut stats);
        cell.set(stats);
    });
}

pub fn record_string() {
    update(|s| s.strings += 1);
}

pub fn record_array_alloc() {
    update(|s| s.arrays_allocated += 1);
}

pub fn record_array_free() {
    update(|s| s.arrays_freed += 1);
}

pub fn snapshot() -> LeakStats {
    STATS.with(Cell::get)
}

pub fn reset() {
    STATS.with(|cell| cell.set(LeakStats::default()));
}
