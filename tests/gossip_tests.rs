use std::collections::BTreeMap;

use hashgraph_gossip_sim::{
    event::EventRecord,
    gossip::{gossip, gossip_from, gossip_round},
    node::NodeState,
};

const PARTICIPANTS: u32 = 4;

fn initial_balances() -> BTreeMap<String, u64> {
    BTreeMap::from([("Alice".to_string(), 1000), ("Bob".to_string(), 500)])
}

fn network(count: u32) -> Vec<NodeState> {
    let balances = initial_balances();
    (1..=count).map(|id| NodeState::new(id, &balances)).collect()
}

/// A single full gossip pass from the creator reaches every other participant.
#[test]
fn test_gossip_from_reaches_all_direct_peers() {
    let mut participants = network(PARTICIPANTS);
    let event = EventRecord::new("Alice", "Bob", 30, vec![]);
    let hash = event.hash().to_string();
    participants[1].add_event(event);

    let copies = gossip_from(&mut participants, 1);

    assert_eq!(copies, 3);
    assert!(participants.iter().all(|p| p.knows(&hash)));
}

/// Gossiping to oneself, or to a peer list that contains the sender's id, copies nothing to it.
#[test]
fn test_gossip_skips_self() {
    let balances = initial_balances();
    let mut sender = NodeState::new(1, &balances);
    sender.add_event(EventRecord::new("Alice", "Bob", 1, vec![]));

    let mut same_id = vec![NodeState::new(1, &balances), NodeState::new(2, &balances)];
    let copies = gossip(&sender, &mut same_id);

    assert_eq!(copies, 1);
    assert!(same_id[0].events().is_empty());
    assert_eq!(same_id[1].events().len(), 1);
}

/// Peers that already hold a hash are left untouched, and repeated gossip is a no-op.
#[test]
fn test_gossip_deduplicates_by_hash() {
    let mut participants = network(2);
    let event = EventRecord::new("Alice", "Bob", 5, vec![]);
    participants[0].add_event(event.clone());
    participants[1].add_event(event);

    assert_eq!(gossip_round(&mut participants), 0);
    assert_eq!(participants[1].events().len(), 1);
}

/// Events from different creators converge to the union after one full round.
#[test]
fn test_gossip_round_converges_to_union() {
    let mut participants = network(PARTICIPANTS);
    for (index, participant) in participants.iter_mut().enumerate() {
        participant.add_event(EventRecord::new("Alice", "Bob", index as u64 + 1, vec![]));
    }

    let copies = gossip_round(&mut participants);

    assert_eq!(copies, 12);
    for participant in &participants {
        assert_eq!(participant.events().len(), PARTICIPANTS as usize);
    }
}

/// Gossip carries the sender's votes and validity at copy time, but later changes on the
/// sender never reach a peer that already holds the hash.
#[test]
fn test_gossip_is_copy_based() {
    let mut participants = network(2);
    let event = EventRecord::new("Alice", "Bob", 30, vec![]);
    let hash = event.hash().to_string();
    participants[0].add_event(event);

    participants[0].virtual_vote(2);
    gossip_from(&mut participants, 0);
    let received = participants[1].event(&hash).expect("peer copy");
    assert_eq!(received.votes().get(&1), Some(&true));
    assert!(!received.is_valid());

    // Participant 2 votes, pushes nothing new back (participant 1 already has the hash).
    participants[1].virtual_vote(2);
    gossip_from(&mut participants, 1);

    let sender_copy = participants[0].event(&hash).expect("sender copy");
    let peer_copy = participants[1].event(&hash).expect("peer copy");
    assert_eq!(sender_copy.true_votes(), 1);
    assert!(!sender_copy.is_valid());
    assert_eq!(peer_copy.true_votes(), 2);
    assert!(peer_copy.is_valid());
}

#[test]
fn test_gossip_from_out_of_range_is_noop() {
    let mut participants = network(2);
    participants[0].add_event(EventRecord::new("Alice", "Bob", 1, vec![]));
    assert_eq!(gossip_from(&mut participants, 5), 0);
    assert!(participants[1].events().is_empty());
}
