use crate::error::TransferRejection;

/// Identifier of a participant in the simulated network. Ids are dense and start at 1.
pub type ParticipantId = u32;

/// Hex-encoded SHA-256 content hash identifying one event everywhere.
pub type EventHash = String;

/// Notifications published while the round pipeline runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkEvent {
    /// A new event was added to its creator's store.
    EventCreated {
        creator: ParticipantId,
        hash: EventHash,
    },
    /// A participant's local tally promoted an event to valid.
    EventValidated {
        participant: ParticipantId,
        hash: EventHash,
        votes: usize,
    },
    /// The aggregator stamped a consensus timestamp onto every valid event.
    ConsensusTimeAssigned { timestamp: u64, events: usize },
    /// A transfer was applied to a participant's balances.
    TransferApplied {
        participant: ParticipantId,
        hash: EventHash,
    },
    /// A transfer was skipped by a participant's executor.
    TransferRejected {
        participant: ParticipantId,
        hash: EventHash,
        reason: TransferRejection,
    },
}

/// Result of settling one event on one participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// Sender-less event credited to the receiver.
    Minted,
    /// Sender debited, receiver credited.
    Transferred,
    Rejected(TransferRejection),
}

impl TransferOutcome {
    pub fn is_applied(&self) -> bool {
        !matches!(self, TransferOutcome::Rejected(_))
    }
}

/// One entry of an execution pass, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettledTransfer {
    pub hash: EventHash,
    pub consensus_time: u64,
    pub outcome: TransferOutcome,
}

/// What a single participant's executor did during one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    pub participant: ParticipantId,
    pub settled: Vec<SettledTransfer>,
}

impl ExecutionReport {
    pub fn new(participant: ParticipantId) -> Self {
        Self {
            participant,
            settled: Vec::new(),
        }
    }

    pub fn applied(&self) -> usize {
        self.settled.iter().filter(|t| t.outcome.is_applied()).count()
    }

    pub fn rejected(&self) -> usize {
        self.settled.len() - self.applied()
    }

    pub fn is_empty(&self) -> bool {
        self.settled.is_empty()
    }
}
