//! Operator-owned "in progress" markers.
//!
//! The remote bracket has no notion of a match being played right now, so the
//! markers live here and are re-applied on every refresh.

use std::collections::HashSet;

use crate::state::{queue::QueueError, record::MatchRecord};

/// Identifier codes the operator has marked as in progress.
#[derive(Debug, Clone, Default)]
pub struct OverrideStore {
    marked: HashSet<String>,
}

impl OverrideStore {
    /// Store with nothing marked.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `identifier` is marked in progress.
    pub fn is_marked(&self, identifier: &str) -> bool {
        self.marked.contains(identifier)
    }

    /// Flip the marker for a match of the current queue and return its new value.
    pub fn toggle(&mut self, identifier: &str, queue: &[MatchRecord]) -> Result<bool, QueueError> {
        if !queue.iter().any(|record| record.identifier == identifier) {
            return Err(QueueError::UnknownMatch(identifier.to_string()));
        }

        if self.marked.remove(identifier) {
            Ok(false)
        } else {
            self.marked.insert(identifier.to_string());
            Ok(true)
        }
    }

    /// Drop the marker for `identifier`, returning whether one existed.
    pub fn clear(&mut self, identifier: &str) -> bool {
        self.marked.remove(identifier)
    }

    /// Forget markers whose match is no longer in the queue.
    pub fn retain_only<'a>(&mut self, identifiers: impl IntoIterator<Item = &'a str>) -> usize {
        let live: HashSet<&str> = identifiers.into_iter().collect();
        let before = self.marked.len();
        self.marked.retain(|identifier| live.contains(identifier.as_str()));
        before - self.marked.len()
    }

    /// Number of marked matches.
    pub fn len(&self) -> usize {
        self.marked.len()
    }

    /// Whether nothing is marked.
    pub fn is_empty(&self) -> bool {
        self.marked.is_empty()
    }
}
