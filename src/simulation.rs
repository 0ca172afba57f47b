use std::collections::HashSet;

use tracing::{debug, info};

use crate::{
    config::SimulationConfig,
    consensus_time::{ConsensusTimeAssignment, aggregate_consensus_time},
    error::ConsensusError,
    event::EventRecord,
    events::{BroadcastEventBus, NetworkEventBus},
    gossip::gossip_round,
    node::NodeState,
    types::{EventHash, ExecutionReport, NetworkEvent, ParticipantId, TransferOutcome},
    utils::short_hash,
    workload::TransferWorkload,
};

/// Transfers each run opens with, created at participants 1 to 4 in that order.
pub const GENESIS_TRANSFERS: [(&str, &str, u64); 4] = [
    ("Alice", "Bob", 30),
    ("Bob", "Charlie", 20),
    ("Alice", "David", 800),
    ("Charlie", "Alice", 10),
];

/// Everything one pass of the round pipeline did.
#[derive(Debug, Clone)]
pub struct RoundReport {
    pub round: usize,
    /// Hash of the transfer generated at the start of the round, if any.
    pub created: Option<EventHash>,
    /// Event copies made by all gossip passes.
    pub gossiped: usize,
    /// Promotions to valid across all participants and voting passes.
    pub validated: usize,
    pub consensus: Option<ConsensusTimeAssignment>,
    pub executions: Vec<ExecutionReport>,
}

/// Owns the participant list and drives create, gossip, vote, aggregate and execute.
pub struct Simulation<E>
where
    E: NetworkEventBus,
{
    config: SimulationConfig,
    participants: Vec<NodeState>,
    workload: TransferWorkload,
    event_bus: E,
}

pub type DefaultSimulation = Simulation<BroadcastEventBus>;

impl DefaultSimulation {
    pub fn new(config: SimulationConfig) -> Result<Self, ConsensusError> {
        Self::new_with_event_bus(config, BroadcastEventBus::default())
    }
}

impl<E> Simulation<E>
where
    E: NetworkEventBus,
{
    /// Create `participant_count` participants with ids starting at 1, each holding an
    /// independent copy of the initial balances.
    pub fn new_with_event_bus(config: SimulationConfig, event_bus: E) -> Result<Self, ConsensusError> {
        config.validate()?;
        let participants = (1..=config.participant_count)
            .map(|index| -> Result<NodeState, ConsensusError> {
                let id = ParticipantId::try_from(index).map_err(|_| {
                    ConsensusError::InvalidConfiguration(format!(
                        "participant_count {} exceeds the id range",
                        config.participant_count
                    ))
                })?;
                Ok(NodeState::new(id, &config.initial_balances))
            })
            .collect::<Result<Vec<_>, ConsensusError>>()?;
        Self::from_participants(config, participants, event_bus)
    }

    /// Build a simulation over an explicit participant list.
    ///
    /// `config.participant_count` is overwritten with the list's length.
    pub fn from_participants(
        mut config: SimulationConfig,
        participants: Vec<NodeState>,
        event_bus: E,
    ) -> Result<Self, ConsensusError> {
        if participants.is_empty() {
            return Err(ConsensusError::EmptyNetwork);
        }
        let mut seen = HashSet::new();
        for participant in &participants {
            if !seen.insert(participant.id()) {
                return Err(ConsensusError::DuplicateParticipant(participant.id()));
            }
        }

        config.participant_count = participants.len();
        let workload = TransferWorkload::new(
            config.transfer_accounts.clone(),
            config.max_transfer_amount,
            config.seed,
        );
        Ok(Self {
            config,
            participants,
            workload,
            event_bus,
        })
    }

    pub fn subscribe_to_events(&self) -> E::Receiver {
        self.event_bus.subscribe()
    }

    fn emit_event(&self, event: NetworkEvent) {
        self.event_bus.publish(event);
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn participants(&self) -> &[NodeState] {
        &self.participants
    }

    pub fn participant(&self, id: ParticipantId) -> Result<&NodeState, ConsensusError> {
        self.participants
            .iter()
            .find(|p| p.id() == id)
            .ok_or(ConsensusError::UnknownParticipant(id))
    }

    fn participant_mut(&mut self, id: ParticipantId) -> Result<&mut NodeState, ConsensusError> {
        self.participants
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(ConsensusError::UnknownParticipant(id))
    }

    /// Add a freshly created event to its creator's store.
    pub fn submit_event(
        &mut self,
        creator: ParticipantId,
        event: EventRecord,
    ) -> Result<EventHash, ConsensusError> {
        let hash = event.hash().to_string();
        let participant = self.participant_mut(creator)?;
        info!(
            creator,
            hash = short_hash(&hash),
            "created event {} -> {} ({} coin)",
            event.sender(),
            event.receiver(),
            event.amount()
        );
        if participant.add_event(event) {
            self.emit_event(NetworkEvent::EventCreated {
                creator,
                hash: hash.clone(),
            });
        }
        Ok(hash)
    }

    /// Create the opening transfers, the i-th at the i-th participant. Transfers beyond
    /// the participant count are skipped.
    pub fn seed_genesis_transfers(&mut self) -> Vec<EventHash> {
        let creators: Vec<ParticipantId> = self.participants.iter().map(NodeState::id).collect();
        let mut created = Vec::new();
        for ((sender, receiver, amount), creator) in GENESIS_TRANSFERS.into_iter().zip(creators) {
            let event = EventRecord::new(sender, receiver, amount, Vec::new());
            if let Ok(hash) = self.submit_event(creator, event) {
                created.push(hash);
            }
        }
        created
    }

    /// Generate one random transfer at a random participant.
    pub fn generate_transfer(&mut self) -> Option<EventHash> {
        let request = self.workload.generate_one(self.participants.len())?;
        let creator = self.participants.get(request.creator_index)?.id();
        self.submit_event(creator, request.into_event()).ok()
    }

    pub fn gossip_phase(&mut self) -> usize {
        (0..self.config.gossip_iterations_per_round)
            .map(|_| gossip_round(&mut self.participants))
            .sum()
    }

    pub fn voting_phase(&mut self) -> usize {
        let total = self.participants.len();
        let mut validated = 0;
        for _ in 0..self.config.voting_iterations_per_round {
            for index in 0..self.participants.len() {
                let participant = &mut self.participants[index];
                let id = participant.id();
                let promoted = participant.virtual_vote(total);
                for hash in promoted {
                    let votes = self.participants[index]
                        .event(&hash)
                        .map(EventRecord::true_votes)
                        .unwrap_or(0);
                    self.emit_event(NetworkEvent::EventValidated {
                        participant: id,
                        hash,
                        votes,
                    });
                    validated += 1;
                }
            }
        }
        validated
    }

    pub fn consensus_time_phase(&mut self) -> Option<ConsensusTimeAssignment> {
        let assignment = aggregate_consensus_time(&mut self.participants)?;
        self.emit_event(NetworkEvent::ConsensusTimeAssigned {
            timestamp: assignment.timestamp,
            events: assignment.valid_events,
        });
        Some(assignment)
    }

    pub fn execution_phase(&mut self) -> Vec<ExecutionReport> {
        let reports: Vec<ExecutionReport> = self
            .participants
            .iter_mut()
            .map(NodeState::execute_transactions)
            .collect();

        for report in &reports {
            for transfer in &report.settled {
                let event = match &transfer.outcome {
                    TransferOutcome::Rejected(reason) => NetworkEvent::TransferRejected {
                        participant: report.participant,
                        hash: transfer.hash.clone(),
                        reason: reason.clone(),
                    },
                    _ => NetworkEvent::TransferApplied {
                        participant: report.participant,
                        hash: transfer.hash.clone(),
                    },
                };
                self.emit_event(event);
            }
        }
        reports
    }

    /// Run one pass of the pipeline. Every round but the first opens with a random transfer.
    pub fn run_round(&mut self, round: usize) -> RoundReport {
        let created = if round > 0 {
            self.generate_transfer()
        } else {
            None
        };
        let gossiped = self.gossip_phase();
        let validated = self.voting_phase();
        let consensus = self.consensus_time_phase();
        if consensus.is_none() {
            debug!(round, "no global consensus timestamp this round");
        }
        let executions = self.execution_phase();

        RoundReport {
            round,
            created,
            gossiped,
            validated,
            consensus,
            executions,
        }
    }

    /// Seed the opening transfers and run every configured round.
    pub fn run(&mut self) -> Vec<RoundReport> {
        self.seed_genesis_transfers();
        let rounds = self.config.rounds;
        (0..rounds)
            .map(|round| {
                info!("round {}/{rounds}", round + 1);
                self.run_round(round)
            })
            .collect()
    }
}
