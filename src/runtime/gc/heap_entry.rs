use std::rc::Weak;

use crate::runtime::gc::array::ArrayData;

/// Registry slot. The heap only observes its buffers: owners keep them alive,
/// the registry lets the tracing pass enumerate them.
pub struct HeapEntry {
    pub(super) cell: Weak<ArrayData>,
}

impl HeapEntry {
    pub(super) fn is_live(&self) -> bool {
        self.cell.strong_count() > 0
    }
}
