//! Ordered collections reachable from scripts through integer handles.
//!
//! Each collection kind lives in its own [`DataStructureManager`]; the
//! [`Collections`] aggregate owns all four and is what the VM exposes to
//! builtins and to the collector as a root source.

use std::fmt;

use crate::runtime::{
    error::OwnershipViolation,
    gc::{IntegrityCheck, IntegrityReport},
    value::Value,
};

pub mod compare;
pub mod manager;
pub mod map;
pub mod priority;
pub mod queue;
pub mod stack;

pub use compare::{DEFAULT_EPSILON, DsComparator, epsilon, set_epsilon};
pub use manager::{DataStructureManager, DsIndex};
pub use map::DsMap;
pub use priority::DsPriority;
pub use queue::DsQueue;
pub use stack::DsStack;

/// Collection kind, with the numeric codes scripts pass to `ds_exists`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DsKind {
    Map,
    Stack,
    Queue,
    Priority,
}

impl DsKind {
    pub fn code(self) -> i64 {
        match self {
            DsKind::Map => 0,
            DsKind::Stack => 2,
            DsKind::Queue => 4,
            DsKind::Priority => 5,
        }
    }

    /// Kind for a script type code. Codes of kinds this runtime does not
    /// provide (lists, grids) yield `None`.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(DsKind::Map),
            2 => Some(DsKind::Stack),
            4 => Some(DsKind::Queue),
            5 => Some(DsKind::Priority),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DsKind::Map => "map",
            DsKind::Stack => "stack",
            DsKind::Queue => "queue",
            DsKind::Priority => "priority queue",
        }
    }
}

impl fmt::Display for DsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Every collection created by scripts, grouped by kind.
#[derive(Debug)]
pub struct Collections {
    pub maps: DataStructureManager<DsMap>,
    pub priorities: DataStructureManager<DsPriority>,
    pub queues: DataStructureManager<DsQueue>,
    pub stacks: DataStructureManager<DsStack>,
}

impl Default for Collections {
    fn default() -> Self {
        Self::new()
    }
}

impl Collections {
    pub fn new() -> Self {
        Self {
            maps: DataStructureManager::new(DsKind::Map),
            priorities: DataStructureManager::new(DsKind::Priority),
            queues: DataStructureManager::new(DsKind::Queue),
            stacks: DataStructureManager::new(DsKind::Stack),
        }
    }

    pub fn exists(&self, index: DsIndex, kind: DsKind) -> bool {
        match kind {
            DsKind::Map => self.maps.ds_exists(index),
            DsKind::Priority => self.priorities.ds_exists(index),
            DsKind::Queue => self.queues.ds_exists(index),
            DsKind::Stack => self.stacks.ds_exists(index),
        }
    }

    /// Destroys every collection of every kind.
    pub fn clear_all(&mut self) {
        self.maps.clear();
        self.priorities.clear();
        self.queues.clear();
        self.stacks.clear();
    }

    /// Every value held by any collection, map keys included.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        let maps = self
            .maps
            .iter()
            .flat_map(|(_, m)| m.iter().flat_map(|(k, v)| [k, v]));
        let priorities = self
            .priorities
            .iter()
            .flat_map(|(_, pq)| pq.iter().flat_map(|(p, v)| [p, v]));
        let queues = self.queues.iter().flat_map(|(_, q)| q.iter());
        let stacks = self.stacks.iter().flat_map(|(_, s)| s.iter());
        maps.chain(priorities).chain(queues).chain(stacks)
    }

    pub fn integrity_touch(&self, check: &mut IntegrityCheck) {
        for (_, map) in self.maps.iter() {
            map.integrity_touch(check);
        }
        for (_, pq) in self.priorities.iter() {
            pq.integrity_touch(check);
        }
        for (_, queue) in self.queues.iter() {
            queue.integrity_touch(check);
        }
        for (_, stack) in self.stacks.iter() {
            stack.integrity_touch(check);
        }
    }

    /// Integrity pass over every live collection.
    pub fn integrity_check(&self) -> Result<IntegrityReport, OwnershipViolation> {
        let mut check = IntegrityCheck::new();
        self.integrity_touch(&mut check);
        check.finish()
    }
}
