use std::collections::HashMap;

use crate::{event::EventRecord, types::EventHash};

/// Per-participant event store keyed by content hash.
///
/// Every participant owns its own store; events only enter it as value copies.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: HashMap<EventHash, EventRecord>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `event` unless an event with the same hash is already present.
    ///
    /// Returns `true` when the event was inserted. An existing copy keeps its votes,
    /// validity and consensus timestamp.
    pub fn insert_if_absent(&mut self, event: EventRecord) -> bool {
        if self.events.contains_key(event.hash()) {
            return false;
        }
        self.events.insert(event.hash().to_string(), event);
        true
    }

    pub fn contains(&self, hash: &str) -> bool {
        self.events.contains_key(hash)
    }

    pub fn get(&self, hash: &str) -> Option<&EventRecord> {
        self.events.get(hash)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventRecord> {
        self.events.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut EventRecord> {
        self.events.values_mut()
    }

    pub fn hashes(&self) -> impl Iterator<Item = &EventHash> {
        self.events.keys()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events sorted by hash, for stable rendering.
    pub fn sorted(&self) -> Vec<&EventRecord> {
        let mut events: Vec<&EventRecord> = self.events.values().collect();
        events.sort_by(|a, b| a.hash().cmp(b.hash()));
        events
    }
}
