//! Synthetic transfer generation for the simulation harness.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::event::EventRecord;

/// Parameters of one generated transfer, before it becomes an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    /// Index into the participant list of the participant that creates the event.
    pub creator_index: usize,
    pub sender: String,
    pub receiver: String,
    pub amount: u64,
}

impl TransferRequest {
    pub fn into_event(self) -> EventRecord {
        EventRecord::new(self.sender, self.receiver, self.amount, Vec::new())
    }
}

/// Generates random transfers between a fixed set of accounts.
///
/// The generator is seeded so a run can be replayed. Only the transfer parameters are
/// random; event timestamps still come from the clock.
pub struct TransferWorkload {
    accounts: Vec<String>,
    max_amount: u64,
    rng: ChaCha8Rng,
}

impl TransferWorkload {
    pub fn new(accounts: Vec<String>, max_amount: u64, seed: u64) -> Self {
        Self {
            accounts,
            max_amount: max_amount.max(1),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draw a creator, a distinct sender/receiver pair and an amount in `1..=max_amount`.
    ///
    /// Returns `None` when there are no participants or fewer than two accounts.
    pub fn generate_one(&mut self, participant_count: usize) -> Option<TransferRequest> {
        if participant_count == 0 || self.accounts.len() < 2 {
            return None;
        }

        let creator_index = self.rng.gen_range(0..participant_count);
        let sender_index = self.rng.gen_range(0..self.accounts.len());
        // Shift past the sender so the pair is always distinct.
        let mut receiver_index = self.rng.gen_range(0..self.accounts.len() - 1);
        if receiver_index >= sender_index {
            receiver_index += 1;
        }
        let amount = self.rng.gen_range(1..=self.max_amount);

        Some(TransferRequest {
            creator_index,
            sender: self.accounts[sender_index].clone(),
            receiver: self.accounts[receiver_index].clone(),
            amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accounts() -> Vec<String> {
        ["Alice", "Bob", "Charlie", "David"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn generated_transfers_stay_in_bounds() {
        let mut workload = TransferWorkload::new(accounts(), 50, 7);
        for _ in 0..500 {
            let request = workload.generate_one(4).expect("transfer");
            assert!(request.creator_index < 4);
            assert_ne!(request.sender, request.receiver);
            assert!((1..=50).contains(&request.amount));
        }
    }

    #[test]
    fn same_seed_replays_the_same_transfers() {
        let mut a = TransferWorkload::new(accounts(), 50, 99);
        let mut b = TransferWorkload::new(accounts(), 50, 99);
        for _ in 0..20 {
            assert_eq!(a.generate_one(4), b.generate_one(4));
        }
    }

    #[test]
    fn nothing_generated_without_participants_or_accounts() {
        let mut workload = TransferWorkload::new(accounts(), 50, 1);
        assert!(workload.generate_one(0).is_none());

        let mut single = TransferWorkload::new(vec!["Alice".to_string()], 50, 1);
        assert!(single.generate_one(4).is_none());
    }
}
