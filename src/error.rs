use crate::types::ParticipantId;

#[derive(Debug, thiserror::Error)]
pub enum ConsensusError {
    #[error("Invalid simulation configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Unknown participant {0}")]
    UnknownParticipant(ParticipantId),
    #[error("Duplicate participant {0}")]
    DuplicateParticipant(ParticipantId),
    #[error("Network has no participants")]
    EmptyNetwork,
}

/// Why a valid, timestamped transfer was not applied to a participant's ledger.
///
/// These are soft failures: they end up in an execution report and never abort a round.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransferRejection {
    #[error("insufficient balance on {account}: has {balance}, needs {amount}")]
    InsufficientBalance {
        account: String,
        balance: u64,
        amount: u64,
    },
    #[error("balance overflow on {account}")]
    BalanceOverflow { account: String },
}
