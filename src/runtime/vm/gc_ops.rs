use crate::runtime::{
    error::{OwnershipViolation, fatal},
    gc::{CollectReport, IntegrityCheck, IntegrityReport},
};

use super::VM;

impl VM {
    /// Runs a collection when the allocation threshold has been reached.
    /// Call only between instructions.
    pub fn safe_point(&mut self) -> Option<CollectReport> {
        if self.gc_heap.should_collect() {
            Some(self.collect_gc())
        } else {
            None
        }
    }

    /// Full collection. Roots are the evaluation stack, the globals, the last
    /// popped value and every value held by a script collection.
    pub fn collect_gc(&mut self) -> CollectReport {
        let roots = self
            .stack
            .iter()
            .chain(&self.globals)
            .chain(std::iter::once(&self.last_popped))
            .chain(self.collections.values());
        let report = self.gc_heap.collect(roots);
        if self.integrity_checks {
            self.assert_integrity();
        }
        report
    }

    /// Audits the heap registry and the owner counts of every root value.
    pub fn integrity_check(&self) -> Result<IntegrityReport, OwnershipViolation> {
        self.gc_heap.audit()?;
        let mut check = IntegrityCheck::new();
        check.touch_all(&self.stack);
        check.touch_all(&self.globals);
        check.touch(&self.last_popped);
        self.collections.integrity_touch(&mut check);
        check.finish()
    }

    /// Like [`integrity_check`](Self::integrity_check), but a violation
    /// terminates the process.
    pub fn assert_integrity(&self) -> IntegrityReport {
        match self.integrity_check() {
            Ok(report) => report,
            Err(violation) => fatal(&violation),
        }
    }

    pub fn gc_telemetry_report(&self) -> String {
        self.gc_heap.telemetry().report()
    }
}
