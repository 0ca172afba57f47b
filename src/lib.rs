//! A simulation of gossip-propagated, vote-based eventual consensus over transfer ledgers.
//!
//! A fixed set of participants each keep a private store of timestamped transfer records
//! ("events") and a private set of account balances. Events spread by one-directional
//! gossip that copies the sender's view of each event, votes included. Every participant
//! approves what it has seen and marks an event valid once its local tally reaches
//! floor(2n/3) + 1 distinct voters.
//!
//! ## Round pipeline
//!
//! 1. optionally create an event at one participant ([`event::EventRecord::new`])
//! 2. gossip across all participants ([`gossip::gossip_round`])
//! 3. vote at each participant ([`node::NodeState::virtual_vote`])
//! 4. assign one consensus timestamp across the network ([`consensus_time::aggregate_consensus_time`])
//! 5. execute valid, timestamped transfers at each participant ([`node::NodeState::execute_transactions`])
//!
//! Step 4 is a simulation oracle that reads every participant at once. [`simulation::Simulation`]
//! drives the whole pipeline and publishes [`types::NetworkEvent`] notifications.

pub mod config;
pub mod consensus_time;
pub mod error;
pub mod event;
pub mod events;
pub mod execution;
pub mod gossip;
pub mod node;
pub mod simulation;
pub mod stats;
pub mod storage;
pub mod types;
pub mod utils;
pub mod voting;
pub mod workload;
