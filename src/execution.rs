use tracing::{info, warn};

use crate::{
    error::TransferRejection,
    event::EventRecord,
    node::NodeState,
    types::{ExecutionReport, SettledTransfer, TransferOutcome},
    utils::short_hash,
};

impl NodeState {
    /// Events ready to execute, in execution order: valid and stamped with a consensus
    /// timestamp, sorted by consensus timestamp then hash.
    pub fn executable_events(&self) -> Vec<&EventRecord> {
        let mut ready: Vec<&EventRecord> = self
            .events()
            .iter()
            .filter(|e| e.is_valid() && e.has_consensus_time())
            .collect();
        ready.sort_by(|a, b| {
            a.consensus_time()
                .cmp(&b.consensus_time())
                .then_with(|| a.hash().cmp(b.hash()))
        });
        ready
    }

    /// Apply every executable event to this participant's balances.
    ///
    /// Every pass walks the whole executable set again. An event applied by an earlier
    /// pass is applied once more, and a rejected one gets another try.
    pub fn execute_transactions(&mut self) -> ExecutionReport {
        let ready: Vec<EventRecord> = self.executable_events().into_iter().cloned().collect();
        let mut report = ExecutionReport::new(self.id());

        for (position, event) in ready.into_iter().enumerate() {
            let outcome = match self.apply_transfer(&event) {
                Ok(outcome) => {
                    let from = if event.is_mint() { "mint" } else { event.sender() };
                    info!(
                        participant = self.id(),
                        hash = short_hash(event.hash()),
                        "[{}] {from} -> {} ({} coin)",
                        position + 1,
                        event.receiver(),
                        event.amount()
                    );
                    outcome
                }
                Err(reason) => {
                    warn!(
                        participant = self.id(),
                        hash = short_hash(event.hash()),
                        "[{}] transfer rejected: {reason}",
                        position + 1
                    );
                    TransferOutcome::Rejected(reason)
                }
            };

            report.settled.push(SettledTransfer {
                hash: event.hash().to_string(),
                consensus_time: event.consensus_time(),
                outcome,
            });
        }
        report
    }

    /// Debit and credit both happen, or neither does.
    fn apply_transfer(&mut self, event: &EventRecord) -> Result<TransferOutcome, TransferRejection> {
        let amount = event.amount();
        let receiver = event.receiver();
        let overflow = || TransferRejection::BalanceOverflow {
            account: receiver.to_string(),
        };

        if event.is_mint() {
            let credited = self.balance(receiver).checked_add(amount).ok_or_else(overflow)?;
            self.balances_mut().insert(receiver.to_string(), credited);
            return Ok(TransferOutcome::Minted);
        }

        let sender = event.sender();
        let balance = self.balance(sender);
        if balance < amount {
            return Err(TransferRejection::InsufficientBalance {
                account: sender.to_string(),
                balance,
                amount,
            });
        }
        let credited = if sender == receiver {
            balance
        } else {
            self.balance(receiver).checked_add(amount).ok_or_else(overflow)?
        };

        let balances = self.balances_mut();
        balances.insert(sender.to_string(), balance - amount);
        balances.insert(receiver.to_string(), credited);
        Ok(TransferOutcome::Transferred)
    }
}
