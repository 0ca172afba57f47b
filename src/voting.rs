use tracing::info;

use crate::{
    node::NodeState,
    types::EventHash,
    utils::{has_quorum, short_hash},
};

impl NodeState {
    /// Run one virtual voting pass over every event this participant holds.
    ///
    /// The participant approves everything it has seen, then promotes each event whose
    /// local count of true votes reaches floor(2n/3) + 1. Votes from other participants
    /// only count once gossip has carried them here. Returns the hashes newly promoted
    /// by this pass. A `total_participants` of zero does nothing.
    pub fn virtual_vote(&mut self, total_participants: usize) -> Vec<EventHash> {
        if total_participants == 0 {
            return Vec::new();
        }

        let id = self.id();
        let mut promoted = Vec::new();
        for event in self.events_mut().iter_mut() {
            event.record_vote(id, true);

            let votes = event.true_votes();
            if !event.is_valid() && has_quorum(votes, total_participants) {
                event.mark_valid();
                info!(
                    participant = id,
                    hash = short_hash(event.hash()),
                    "event reached consensus with {votes}/{total_participants} votes"
                );
                promoted.push(event.hash().to_string());
            }
        }
        promoted.sort();
        promoted
    }
}
