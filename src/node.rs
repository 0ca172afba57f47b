use std::collections::HashMap;

use tracing::debug;

use crate::{
    event::EventRecord,
    storage::EventStore,
    types::ParticipantId,
    utils::short_hash,
};

/// One participant: its private view of the event graph and of account balances.
///
/// Nothing here is shared with other participants. Gossip hands over value copies and
/// the balances start as an independent copy of the initial distribution.
#[derive(Debug, Clone)]
pub struct NodeState {
    id: ParticipantId,
    events: EventStore,
    balances: HashMap<String, u64>,
}

impl NodeState {
    pub fn new<'a, I>(id: ParticipantId, initial_balances: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a u64)>,
    {
        let balances = initial_balances
            .into_iter()
            .map(|(account, balance)| (account.clone(), *balance))
            .collect();
        Self {
            id,
            events: EventStore::new(),
            balances,
        }
    }

    pub fn id(&self) -> ParticipantId {
        self.id
    }

    /// Add a previously unseen event. Re-inserting a known hash is a no-op.
    pub fn add_event(&mut self, event: EventRecord) -> bool {
        let hash = event.hash().to_string();
        let inserted = self.events.insert_if_absent(event);
        if inserted {
            debug!(participant = self.id, hash = short_hash(&hash), "event added");
        }
        inserted
    }

    pub fn events(&self) -> &EventStore {
        &self.events
    }

    pub(crate) fn events_mut(&mut self) -> &mut EventStore {
        &mut self.events
    }

    pub fn event(&self, hash: &str) -> Option<&EventRecord> {
        self.events.get(hash)
    }

    pub fn knows(&self, hash: &str) -> bool {
        self.events.contains(hash)
    }

    pub fn balances(&self) -> &HashMap<String, u64> {
        &self.balances
    }

    pub(crate) fn balances_mut(&mut self) -> &mut HashMap<String, u64> {
        &mut self.balances
    }

    /// Balance of `account`, `0` for accounts this participant has never seen.
    pub fn balance(&self, account: &str) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Balances sorted by account name, for stable rendering.
    pub fn sorted_balances(&self) -> Vec<(&str, u64)> {
        let mut balances: Vec<(&str, u64)> = self
            .balances
            .iter()
            .map(|(account, balance)| (account.as_str(), *balance))
            .collect();
        balances.sort_by(|a, b| a.0.cmp(b.0));
        balances
    }
}
