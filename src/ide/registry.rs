//! Per-occurrence bookkeeping of live fixes.
//!
//! A newer diagnostic pass for the same reference occurrence supersedes the
//! fix built by an older pass. The registry hands out a ticket per fix; a
//! ticket stays current until the same occurrence is registered again or
//! its file is invalidated. Entries live only as long as their current
//! ticket: dropping it, or invalidating the file, removes the entry.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::base::{FileId, TextRange};

/// Identifies one reference occurrence in a file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OccurrenceKey {
    pub file: FileId,
    pub range: TextRange,
}

impl OccurrenceKey {
    pub fn new(file: FileId, range: TextRange) -> Self {
        Self { file, range }
    }
}

/// Current generation per occurrence.
///
/// Generations come from one registry-wide counter, so a key that was
/// removed and registered again never reuses a generation an old ticket holds.
#[derive(Debug, Default)]
struct Generations {
    current: FxHashMap<OccurrenceKey, u64>,
    next: u64,
}

type SharedGenerations = Arc<Mutex<Generations>>;

/// Hands out tickets that go stale when their occurrence is re-registered.
///
/// Owned by the host (one per editor session); cheap to clone.
#[derive(Clone, Debug, Default)]
pub struct FixRegistry {
    generations: SharedGenerations,
}

impl FixRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fix for `key`, superseding any earlier one.
    pub fn register(&self, key: OccurrenceKey) -> FixTicket {
        let mut generations = self.generations.lock();
        generations.next += 1;
        let generation = generations.next;
        generations.current.insert(key, generation);
        tracing::trace!(file = %key.file, generation, "fix registered");
        FixTicket {
            key,
            generation,
            generations: Arc::clone(&self.generations),
        }
    }

    /// Supersede every fix in `file` (its diagnostics were recomputed).
    pub fn invalidate_file(&self, file: FileId) {
        let mut generations = self.generations.lock();
        let before = generations.current.len();
        generations.current.retain(|key, _| key.file != file);
        tracing::trace!(%file, removed = before - generations.current.len(), "fixes invalidated");
    }

    pub fn is_current(&self, ticket: &FixTicket) -> bool {
        ticket.is_current()
    }

    /// Number of occurrences with a live fix.
    pub fn len(&self) -> usize {
        self.generations.lock().current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Proof that a fix was the latest one registered for its occurrence.
///
/// Dropping the current ticket releases its occurrence.
#[derive(Debug)]
pub struct FixTicket {
    key: OccurrenceKey,
    generation: u64,
    generations: SharedGenerations,
}

impl FixTicket {
    pub fn key(&self) -> OccurrenceKey {
        self.key
    }

    pub fn is_current(&self) -> bool {
        self.generations.lock().current.get(&self.key) == Some(&self.generation)
    }
}

impl Drop for FixTicket {
    fn drop(&mut self) {
        let mut generations = self.generations.lock();
        if generations.current.get(&self.key) == Some(&self.generation) {
            generations.current.remove(&self.key);
        }
    }
}
