use std::collections::HashMap;

use crate::runtime::{error::OwnershipViolation, value::Value};

/// Outcome of a successful audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntegrityReport {
    pub values_checked: usize,
    pub arrays_checked: usize,
}

#[derive(Debug, Clone, Copy)]
struct Tally {
    slot: u32,
    aliases: usize,
    owners: usize,
}

/// Consistency audit over owner counts.
///
/// Structures under audit `touch` every value they hold. An array buffer
/// touched more often than its owner count would allow means some alias was
/// created without being counted, and a touched buffer that the collector has
/// reclaimed means the tracing pass freed something still reachable.
#[derive(Debug, Default)]
pub struct IntegrityCheck {
    tallies: HashMap<*const (), Tally>,
    values_checked: usize,
    violation: Option<OwnershipViolation>,
}

impl IntegrityCheck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touch(&mut self, value: &Value) {
        self.values_checked += 1;
        let Value::Array(array) = value else {
            return;
        };

        if array.is_reclaimed() && self.violation.is_none() {
            self.violation = Some(OwnershipViolation::ReclaimedBufferReachable {
                slot: array.slot().index(),
            });
        }

        let tally = self.tallies.entry(array.as_ptr()).or_insert(Tally {
            slot: array.slot().index(),
            aliases: 0,
            owners: 0,
        });
        tally.aliases += 1;
        tally.owners = array.owner_count();
    }

    pub fn touch_all<'a>(&mut self, values: impl IntoIterator<Item = &'a Value>) {
        for value in values {
            self.touch(value);
        }
    }

    pub fn finish(self) -> Result<IntegrityReport, OwnershipViolation> {
        if let Some(violation) = self.violation {
            return Err(violation);
        }

        let mut over: Vec<&Tally> = self
            .tallies
            .values()
            .filter(|t| t.aliases > t.owners)
            .collect();
        over.sort_by_key(|t| t.slot);
        if let Some(t) = over.first() {
            return Err(OwnershipViolation::OverCounted {
                slot: t.slot,
                aliases: t.aliases,
                owners: t.owners,
            });
        }

        Ok(IntegrityReport {
            values_checked: self.values_checked,
            arrays_checked: self.tallies.len(),
        })
    }
}
