/// Slot index of an array buffer in the [`GcHeap`](super::GcHeap) registry.
///
/// Every array buffer records the slot it was registered under; the heap uses
/// it to find the buffer again during tracing and integrity audits. Slots are
/// recycled through a free-list once the buffer they tracked is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GcHandle(pub(crate) u32);

impl GcHandle {
    /// Returns the raw heap slot index backing this handle.
    pub fn index(self) -> u32 {
        self.0
    }
}
