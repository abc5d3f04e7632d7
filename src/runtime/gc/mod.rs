pub mod array;
pub mod gc_handle;
pub mod gc_heap;
pub mod heap_entry;
pub mod integrity;
pub mod telemetry;

pub use array::{ArrayRef, WeakArrayRef};
pub use gc_handle::GcHandle;
pub use gc_heap::GcHeap;
pub use integrity::{IntegrityCheck, IntegrityReport};
pub use telemetry::{CollectReport, GcTelemetry};
