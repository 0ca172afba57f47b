//! One-directional, copy-based event propagation.
//!
//! A sender pushes every event it holds to each peer that lacks the hash. The copy
//! carries the sender's current votes and validity, so gossip spreads state as well
//! as payload. Nothing is acknowledged or retried.

use tracing::debug;

use crate::{node::NodeState, utils::short_hash};

impl NodeState {
    /// Push every event `peer` does not know yet. Returns the number of copies made.
    ///
    /// Gossiping to a peer with the same id is a no-op.
    pub fn gossip_to(&self, peer: &mut NodeState) -> usize {
        if peer.id() == self.id() {
            return 0;
        }

        let mut copied = 0;
        for event in self.events().iter() {
            if peer.knows(event.hash()) {
                continue;
            }
            if peer.add_event(event.clone()) {
                debug!(
                    from = self.id(),
                    to = peer.id(),
                    hash = short_hash(event.hash()),
                    "gossiped event"
                );
                copied += 1;
            }
        }
        copied
    }
}

/// Gossip from `sender` to every participant in `peers`, skipping any entry with the
/// sender's own id.
pub fn gossip(sender: &NodeState, peers: &mut [NodeState]) -> usize {
    peers.iter_mut().map(|peer| sender.gossip_to(peer)).sum()
}

/// Gossip from the participant at `sender_index` to all other participants in the slice.
///
/// Returns `0` when the index is out of range.
pub fn gossip_from(participants: &mut [NodeState], sender_index: usize) -> usize {
    if sender_index >= participants.len() {
        return 0;
    }
    let (before, rest) = participants.split_at_mut(sender_index);
    let Some((sender, after)) = rest.split_first_mut() else {
        return 0;
    };
    gossip(sender, before) + gossip(sender, after)
}

/// Let every participant gossip once, in slice order. Later senders already forward
/// what earlier senders pushed to them during the same pass.
pub fn gossip_round(participants: &mut [NodeState]) -> usize {
    (0..participants.len())
        .map(|index| gossip_from(participants, index))
        .sum()
}
