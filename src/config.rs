use std::collections::BTreeMap;

use crate::error::ConsensusError;

/// Settings for one simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of participants, with ids `1..=participant_count`.
    pub participant_count: usize,
    /// Number of pipeline rounds `run()` executes.
    pub rounds: usize,
    /// Full gossip passes per round.
    pub gossip_iterations_per_round: usize,
    /// Virtual voting passes per round.
    pub voting_iterations_per_round: usize,
    /// Starting balances, copied into every participant.
    pub initial_balances: BTreeMap<String, u64>,
    /// Accounts the workload draws senders and receivers from.
    pub transfer_accounts: Vec<String>,
    /// Upper bound (inclusive) for generated transfer amounts.
    pub max_transfer_amount: u64,
    /// Seed for the transfer workload.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let initial_balances = [
            ("Alice", 1000),
            ("Bob", 500),
            ("Charlie", 750),
            ("David", 600),
            ("System", 0),
        ]
        .into_iter()
        .map(|(account, balance)| (account.to_string(), balance))
        .collect();

        Self {
            participant_count: 4,
            rounds: 10,
            gossip_iterations_per_round: 2,
            voting_iterations_per_round: 2,
            initial_balances,
            transfer_accounts: ["Alice", "Bob", "Charlie", "David"]
                .into_iter()
                .map(String::from)
                .collect(),
            max_transfer_amount: 50,
            seed: 12345,
        }
    }
}

impl SimulationConfig {
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::new()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConsensusError> {
        if self.participant_count == 0 {
            return Err(ConsensusError::InvalidConfiguration(
                "participant_count must be at least 1".to_string(),
            ));
        }
        if self.gossip_iterations_per_round == 0 || self.voting_iterations_per_round == 0 {
            return Err(ConsensusError::InvalidConfiguration(
                "gossip and voting iterations per round must be at least 1".to_string(),
            ));
        }
        if self.max_transfer_amount == 0 {
            return Err(ConsensusError::InvalidConfiguration(
                "max_transfer_amount must be at least 1".to_string(),
            ));
        }

        let mut accounts = self.transfer_accounts.clone();
        accounts.sort();
        accounts.dedup();
        if accounts.len() < 2 {
            return Err(ConsensusError::InvalidConfiguration(
                "at least two distinct transfer accounts are required".to_string(),
            ));
        }
        if accounts.len() != self.transfer_accounts.len() {
            return Err(ConsensusError::InvalidConfiguration(
                "transfer accounts must be distinct".to_string(),
            ));
        }
        Ok(())
    }
}

pub struct SimulationConfigBuilder {
    config: SimulationConfig,
}

impl SimulationConfigBuilder {
    pub(crate) fn new() -> Self {
        Self {
            config: SimulationConfig::default(),
        }
    }

    pub fn with_participants(mut self, participant_count: usize) -> Self {
        self.config.participant_count = participant_count;
        self
    }

    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.config.rounds = rounds;
        self
    }

    pub fn with_gossip_iterations(mut self, iterations: usize) -> Self {
        self.config.gossip_iterations_per_round = iterations;
        self
    }

    pub fn with_voting_iterations(mut self, iterations: usize) -> Self {
        self.config.voting_iterations_per_round = iterations;
        self
    }

    /// Replace the initial balance distribution.
    pub fn with_initial_balances<I, K>(mut self, balances: I) -> Self
    where
        I: IntoIterator<Item = (K, u64)>,
        K: Into<String>,
    {
        self.config.initial_balances = balances
            .into_iter()
            .map(|(account, balance)| (account.into(), balance))
            .collect();
        self
    }

    pub fn with_transfer_accounts<I, K>(mut self, accounts: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.config.transfer_accounts = accounts.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_transfer_amount(mut self, amount: u64) -> Self {
        self.config.max_transfer_amount = amount;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<SimulationConfig, ConsensusError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
