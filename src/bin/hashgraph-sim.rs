//! Runs the gossip and virtual voting simulation and prints each participant's view.

use clap::Parser;
use hashgraph_gossip_sim::{
    config::SimulationConfig,
    error::ConsensusError,
    node::NodeState,
    simulation::{DefaultSimulation, RoundReport},
    stats::{EventSummary, ParticipantStats},
    utils::short_hash,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hashgraph-sim")]
#[command(about = "Simulate gossip propagation, virtual voting and transfer execution")]
#[command(version)]
struct Cli {
    /// Number of participants
    #[arg(short, long, default_value_t = 4)]
    participants: usize,

    /// Number of simulation rounds
    #[arg(short, long, default_value_t = 10)]
    rounds: usize,

    /// Gossip passes per round
    #[arg(long, default_value_t = 2)]
    gossip_iterations: usize,

    /// Voting passes per round
    #[arg(long, default_value_t = 2)]
    voting_iterations: usize,

    /// Upper bound for generated transfer amounts
    #[arg(long, default_value_t = 50)]
    max_amount: u64,

    /// Seed for the transfer workload
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Print every event held by participant 1 at the end
    #[arg(long)]
    show_events: bool,

    /// Print every participant's events after each round
    #[arg(long)]
    verbose_rounds: bool,
}

fn main() -> Result<(), ConsensusError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = SimulationConfig::builder()
        .with_participants(cli.participants)
        .with_rounds(cli.rounds)
        .with_gossip_iterations(cli.gossip_iterations)
        .with_voting_iterations(cli.voting_iterations)
        .with_max_transfer_amount(cli.max_amount)
        .with_seed(cli.seed)
        .build()?;

    let mut simulation = DefaultSimulation::new(config)?;
    println!("--- initial balances ---");
    for participant in simulation.participants() {
        print_balances(&participant.stats());
    }

    simulation.seed_genesis_transfers();
    let total = simulation.participants().len();
    for round in 0..simulation.config().rounds {
        let report = simulation.run_round(round);
        print_round(&report);
        if cli.verbose_rounds {
            for participant in simulation.participants() {
                print_events(participant, total);
            }
        }
    }

    println!("\n--- final state ---");
    let stats = simulation.network_stats();
    for participant in &stats.participants {
        print_balances(participant);
        println!(
            "   events: {} known, {} valid, {} timestamped",
            participant.known_events, participant.valid_events, participant.timestamped_events
        );
    }
    println!(
        "distinct events: {}, balances converged: {}",
        stats.distinct_events, stats.balances_converged
    );

    if cli.show_events {
        print_events(simulation.participant(1)?, total);
    }
    Ok(())
}

fn print_round(report: &RoundReport) {
    println!("\n=== round {} ===", report.round + 1);
    if let Some(hash) = &report.created {
        println!("new transfer {}", short_hash(hash));
    }
    println!(
        "gossiped copies: {}, newly valid: {}",
        report.gossiped, report.validated
    );
    match report.consensus {
        Some(assignment) => println!(
            "consensus timestamp {} over {} events",
            assignment.timestamp, assignment.valid_events
        ),
        None => println!("no valid events for a consensus timestamp"),
    }
    for execution in &report.executions {
        if execution.is_empty() {
            continue;
        }
        println!(
            "participant {}: {} applied, {} rejected",
            execution.participant,
            execution.applied(),
            execution.rejected()
        );
    }
}

fn print_balances(stats: &ParticipantStats) {
    println!("participant {} balances:", stats.participant);
    for (account, balance) in &stats.balances {
        println!("   - {account}: {balance}");
    }
}

fn print_events(participant: &NodeState, total_participants: usize) {
    println!("participant {} events:", participant.id());
    for summary in participant.event_summaries() {
        print_event(&summary, total_participants);
    }
}

fn print_event(event: &EventSummary, total_participants: usize) {
    println!(
        "   - {}... ({} -> {}, {}, valid: {}, votes: {}/{} of {}, CT: {}, created: {})",
        short_hash(&event.hash),
        event.sender.as_deref().unwrap_or("mint"),
        event.receiver,
        event.amount,
        event.valid,
        event.true_votes,
        event.total_votes,
        total_participants,
        event.consensus_time,
        event.created_at
    );
}
