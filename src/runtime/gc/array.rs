use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
};

use crate::runtime::{gc::gc_handle::GcHandle, leak_detector, value::Value};

/// Backing store of an array value.
///
/// The owner count is the `Rc` strong count. The remaining fields are private
/// to the collector: `marked` and `gc_refs` are scratch space for one tracing
/// pass, `reclaimed` is set once the collector has emptied the buffer as part
/// of an unreachable cycle.
pub struct ArrayData {
    pub(super) elements: RefCell<Vec<Value>>,
    pub(super) slot: GcHandle,
    pub(super) marked: Cell<bool>,
    pub(super) gc_refs: Cell<usize>,
    pub(super) reclaimed: Cell<bool>,
}

impl Drop for ArrayData {
    fn drop(&mut self) {
        leak_detector::record_array_free();
    }
}

/// Owning alias of an array buffer.
///
/// Reads go through `&self`. Writes go through the heap
/// ([`GcHeap::array_set`](super::GcHeap::array_set) forks a private copy when
/// the buffer is shared), so that every buffer, forks included, stays
/// registered with the collector.
#[derive(Clone)]
pub struct ArrayRef(pub(super) Rc<ArrayData>);

impl ArrayRef {
    pub(super) fn new(elements: Vec<Value>, slot: GcHandle) -> Self {
        leak_detector::record_array_alloc();
        Self(Rc::new(ArrayData {
            elements: RefCell::new(elements),
            slot,
            marked: Cell::new(false),
            gc_refs: Cell::new(0),
            reclaimed: Cell::new(false),
        }))
    }

    pub fn len(&self) -> usize {
        self.0.elements.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.elements.borrow().is_empty()
    }

    /// Returns an aliasing copy of the element at `index`.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.elements.borrow().get(index).cloned()
    }

    /// Snapshot of the elements; each element is cloned (O(1) per element).
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.elements.borrow().clone()
    }

    /// Number of live values aliasing this buffer.
    pub fn owner_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    /// A write through this alias would fork a private copy.
    pub fn is_shared(&self) -> bool {
        self.owner_count() > 1
    }

    pub fn slot(&self) -> GcHandle {
        self.0.slot
    }

    pub fn is_reclaimed(&self) -> bool {
        self.0.reclaimed.get()
    }

    pub fn ptr_eq(&self, other: &ArrayRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn downgrade(&self) -> WeakArrayRef {
        WeakArrayRef(Rc::downgrade(&self.0))
    }

    pub(crate) fn as_ptr(&self) -> *const () {
        Rc::as_ptr(&self.0).cast()
    }

    /// Writes in place, growing the array with `Undefined` up to `index`.
    ///
    /// The replaced element is dropped after the borrow is released, since
    /// dropping it may release other buffers.
    pub(super) fn write(&self, index: usize, value: Value) {
        let old = {
            let mut elements = self.0.elements.borrow_mut();
            if index >= elements.len() {
                elements.resize(index + 1, Value::Undefined);
            }
            std::mem::replace(&mut elements[index], value)
        };
        drop(old);
    }
}

/// Arrays compare by identity; structural comparison could recurse forever on
/// a cycle.
impl PartialEq for ArrayRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ArrayRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayRef")
            .field("slot", &self.0.slot.index())
            .field("len", &self.len())
            .field("owners", &self.owner_count())
            .finish()
    }
}

/// Non-owning observer of an array buffer.
#[derive(Clone)]
pub struct WeakArrayRef(Weak<ArrayData>);

impl WeakArrayRef {
    pub fn is_live(&self) -> bool {
        self.0.strong_count() > 0
    }

    pub fn upgrade(&self) -> Option<ArrayRef> {
        self.0.upgrade().map(ArrayRef)
    }
}
