//! Whole-network consensus timestamp assignment.
//!
//! This is a simulation oracle: it reads every participant's store at once, which no
//! peer in a real network could do. It is exposed as a free function over the
//! participant list and is never triggered by a message between participants.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::{node::NodeState, types::EventHash, utils::select_median};

/// Outcome of one aggregator invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsensusTimeAssignment {
    /// The shared consensus timestamp chosen for this invocation.
    pub timestamp: u64,
    /// Distinct hashes marked valid by at least one participant.
    pub valid_events: usize,
    /// Event copies, across all participants, that were stamped.
    pub stamped_copies: usize,
}

/// Creation timestamps of every distinct event that at least one participant holds as valid.
pub fn collect_valid_timestamps(participants: &[NodeState]) -> HashMap<EventHash, u64> {
    let mut valid = HashMap::new();
    for participant in participants {
        for event in participant.events().iter().filter(|e| e.is_valid()) {
            valid
                .entry(event.hash().to_string())
                .or_insert_with(|| event.timestamp());
        }
    }
    valid
}

/// Compute one consensus timestamp for the whole network and stamp it onto every copy
/// of every globally valid event.
///
/// The timestamp is the median creation time of the distinct valid events (the lower
/// middle value for an even count). Copies are overwritten even when a previous call
/// already stamped a different value. Returns `None`, and changes nothing, when no
/// participant holds a valid event.
pub fn aggregate_consensus_time(participants: &mut [NodeState]) -> Option<ConsensusTimeAssignment> {
    let valid = collect_valid_timestamps(participants);
    let Some(timestamp) = select_median(valid.values().copied().collect()) else {
        debug!("no valid events to derive a consensus timestamp from");
        return None;
    };

    let mut stamped_copies = 0;
    for participant in participants.iter_mut() {
        for event in participant.events_mut().iter_mut() {
            if valid.contains_key(event.hash()) {
                event.set_consensus_time(timestamp);
                stamped_copies += 1;
            }
        }
    }

    info!(
        timestamp,
        valid_events = valid.len(),
        stamped_copies,
        "global consensus timestamp assigned"
    );
    Some(ConsensusTimeAssignment {
        timestamp,
        valid_events: valid.len(),
        stamped_copies,
    })
}
