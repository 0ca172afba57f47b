use std::collections::HashMap;

use crate::{
    types::{EventHash, ParticipantId},
    utils::{compute_event_hash, current_timestamp},
};

/// A transfer (or mint) record exchanged between participants.
///
/// The creation fields and the content hash never change after construction. Votes,
/// validity and the consensus timestamp belong to the copy a participant holds and are
/// mutated only by that participant's voting pass or by the consensus time aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    sender: String,
    receiver: String,
    amount: u64,
    parents: Vec<EventHash>,
    timestamp: u64,
    consensus_time: u64,
    hash: EventHash,
    votes: HashMap<ParticipantId, bool>,
    valid: bool,
    // Reserved for round-based fame/witness ordering. Never read or written yet.
    round_received: u32,
    is_witness: bool,
}

impl EventRecord {
    /// Create a new event stamped with the current monotonic clock.
    ///
    /// An empty `sender` marks a mint: the receiver is credited without any debit.
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        amount: u64,
        parents: Vec<EventHash>,
    ) -> Self {
        Self::with_timestamp(sender, receiver, amount, parents, current_timestamp())
    }

    /// Create an event with an explicit creation timestamp.
    pub fn with_timestamp(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        amount: u64,
        parents: Vec<EventHash>,
        timestamp: u64,
    ) -> Self {
        let sender = sender.into();
        let receiver = receiver.into();
        let hash = compute_event_hash(&sender, &receiver, amount, timestamp, &parents);
        Self {
            sender,
            receiver,
            amount,
            parents,
            timestamp,
            consensus_time: 0,
            hash,
            votes: HashMap::new(),
            valid: false,
            round_received: 0,
            is_witness: false,
        }
    }

    /// Convenience constructor for a sender-less credit.
    pub fn mint(receiver: impl Into<String>, amount: u64) -> Self {
        Self::new(String::new(), receiver, amount, Vec::new())
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn receiver(&self) -> &str {
        &self.receiver
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn parents(&self) -> &[EventHash] {
        &self.parents
    }

    /// Creation timestamp in nanoseconds.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Consensus timestamp, `0` while unset.
    pub fn consensus_time(&self) -> u64 {
        self.consensus_time
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn votes(&self) -> &HashMap<ParticipantId, bool> {
        &self.votes
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_mint(&self) -> bool {
        self.sender.is_empty()
    }

    pub fn round_received(&self) -> u32 {
        self.round_received
    }

    pub fn is_witness(&self) -> bool {
        self.is_witness
    }

    pub fn has_consensus_time(&self) -> bool {
        self.consensus_time > 0
    }

    /// Number of entries in the vote map that are `true`.
    pub fn true_votes(&self) -> usize {
        self.votes.values().filter(|voted| **voted).count()
    }

    /// Record `participant`'s vote. A participant holds at most one entry.
    pub fn record_vote(&mut self, participant: ParticipantId, approve: bool) {
        self.votes.insert(participant, approve);
    }

    /// Promote the event to valid. Validity is never reset once set.
    pub(crate) fn mark_valid(&mut self) {
        self.valid = true;
    }

    pub(crate) fn set_consensus_time(&mut self, consensus_time: u64) {
        self.consensus_time = consensus_time;
    }
}
