use common::protocol::Verdict;
use std::collections::{HashMap, HashSet};

use crate::error::PollError;

/// Result of comparing a freshly seen status with the stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    New,
    Changed { previous: Verdict },
    Unchanged,
}

/// Last observed status per homework name. Entries live for the whole
/// process and are never evicted.
#[derive(Debug, Default)]
pub struct TrackingTable {
    statuses: HashMap<String, Verdict>,
}

impl TrackingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `status` for `name` and report how it relates to what was
    /// stored before.
    pub fn observe(&mut self, name: &str, status: Verdict) -> Change {
        match self.statuses.insert(name.to_string(), status) {
            None => Change::New,
            Some(previous) if previous != status => Change::Changed { previous },
            Some(_) => Change::Unchanged,
        }
    }

    pub fn get(&self, name: &str) -> Option<Verdict> {
        self.statuses.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

/// Failures already announced in the chat during this run.
#[derive(Debug, Default)]
pub struct ReportedErrors {
    seen: HashSet<PollError>,
}

impl ReportedErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, err: &PollError) -> bool {
        self.seen.contains(err)
    }

    pub fn insert(&mut self, err: PollError) -> bool {
        self.seen.insert(err)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
