use std::collections::HashSet;

use crate::{
    events::NetworkEventBus,
    node::NodeState,
    simulation::Simulation,
    types::{EventHash, ParticipantId},
};

/// Snapshot of what one participant knows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantStats {
    pub participant: ParticipantId,
    pub known_events: usize,
    pub valid_events: usize,
    pub timestamped_events: usize,
    /// Balances sorted by account name.
    pub balances: Vec<(String, u64)>,
}

/// One event as a participant currently sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummary {
    pub hash: EventHash,
    /// `None` for a mint.
    pub sender: Option<String>,
    pub receiver: String,
    pub amount: u64,
    pub valid: bool,
    pub true_votes: usize,
    /// Entries in the vote map, true or not.
    pub total_votes: usize,
    pub consensus_time: u64,
    pub created_at: u64,
}

/// Snapshot of the whole simulated network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkStats {
    pub participants: Vec<ParticipantStats>,
    /// Distinct hashes held by at least one participant.
    pub distinct_events: usize,
    /// Whether every participant currently reports identical balances.
    pub balances_converged: bool,
}

impl NodeState {
    /// Every held event, sorted by hash.
    pub fn event_summaries(&self) -> Vec<EventSummary> {
        self.events()
            .sorted()
            .into_iter()
            .map(|event| EventSummary {
                hash: event.hash().to_string(),
                sender: (!event.is_mint()).then(|| event.sender().to_string()),
                receiver: event.receiver().to_string(),
                amount: event.amount(),
                valid: event.is_valid(),
                true_votes: event.true_votes(),
                total_votes: event.votes().len(),
                consensus_time: event.consensus_time(),
                created_at: event.timestamp(),
            })
            .collect()
    }

    pub fn stats(&self) -> ParticipantStats {
        let events = self.events();
        ParticipantStats {
            participant: self.id(),
            known_events: events.len(),
            valid_events: events.iter().filter(|e| e.is_valid()).count(),
            timestamped_events: events.iter().filter(|e| e.has_consensus_time()).count(),
            balances: self
                .sorted_balances()
                .into_iter()
                .map(|(account, balance)| (account.to_string(), balance))
                .collect(),
        }
    }
}

impl<E> Simulation<E>
where
    E: NetworkEventBus,
{
    pub fn network_stats(&self) -> NetworkStats {
        let participants: Vec<ParticipantStats> =
            self.participants().iter().map(NodeState::stats).collect();
        let distinct_events = self
            .participants()
            .iter()
            .flat_map(|p| p.events().hashes())
            .collect::<HashSet<_>>()
            .len();
        let balances_converged = participants
            .windows(2)
            .all(|pair| pair[0].balances == pair[1].balances);

        NetworkStats {
            participants,
            distinct_events,
            balances_converged,
        }
    }
}
