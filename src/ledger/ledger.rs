//! Generic append-only proposal ledger
//!
//! Stores entries in submission order with a monotonically increasing
//! id sequence starting at 1. Ids are never reused and entries are
//! never deleted, so the ledger doubles as a permanent audit trail.

use crate::ledger::entry::Entry;
use serde::{Deserialize, Serialize};

/// An append-only store of proposals with its own id sequence
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProposalLedger<E> {
    /// Entries in ascending id order
    entries: Vec<Entry<E>>,
    /// Next id to assign
    next_id: u64,
}

impl<E> Default for ProposalLedger<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> ProposalLedger<E> {
    /// Create an empty ledger; the first submission gets id 1
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Append a new entry, auto-confirmed by its submitter
    ///
    /// Returns the assigned id.
    pub fn submit(&mut self, effect: E, submitter: &str) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Entry::new(id, effect, submitter));
        id
    }

    /// Look up an entry by id
    pub fn get(&self, id: u64) -> Option<&Entry<E>> {
        // Ids are dense and ascending, so the entry for id n sits at n-1.
        let index = id.checked_sub(1)? as usize;
        self.entries.get(index)
    }

    /// Look up an entry by id, mutably
    pub fn get_mut(&mut self, id: u64) -> Option<&mut Entry<E>> {
        let index = id.checked_sub(1)? as usize;
        self.entries.get_mut(index)
    }

    /// Total number of entries ever submitted
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ledger has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &Entry<E>> {
        self.entries.iter()
    }

    /// Ids of entries matching the filter pair, in ascending order
    ///
    /// An entry matches if (`include_pending` and not executed) or
    /// (`include_executed` and executed). The `[from, to)` window is
    /// applied to the filtered sequence and clamped to its length.
    pub fn ids(
        &self,
        from: usize,
        to: usize,
        include_pending: bool,
        include_executed: bool,
    ) -> Vec<u64> {
        let matching: Vec<u64> = self
            .entries
            .iter()
            .filter(|e| (include_pending && !e.executed) || (include_executed && e.executed))
            .map(|e| e.id)
            .collect();

        let to = to.min(matching.len());
        let from = from.min(to);
        matching[from..to].to_vec()
    }

    /// Count of entries matching the filter pair, unbounded by any window
    pub fn count(&self, include_pending: bool, include_executed: bool) -> usize {
        self.entries
            .iter()
            .filter(|e| (include_pending && !e.executed) || (include_executed && e.executed))
            .count()
    }
}
