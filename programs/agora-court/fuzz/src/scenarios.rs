//! Fuzz testing scenarios that simulate instruction execution
//!
//! The simulation drives the program's own state machine and settlement
//! code and replaces token CPIs with an in-memory ledger. Every operation is
//! all-or-nothing like a transaction: on error the whole court is restored.

use crate::invariants::*;
use agora_court::instructions::participation_helpers::{commit_vote, join_as_party, reveal_vote};
use agora_court::instructions::settlement_helpers::{settle_claim, Payout, Settlement};
use agora_court::state::{Dispute, DisputeConfiguration, VoterRecord};
use agora_court::utils::commitment::compute_commitment;
use anchor_lang::prelude::Pubkey;
use std::collections::BTreeMap;

/// Holder key used for the dispute vaults
pub const VAULT: Pubkey = Pubkey::new_from_array([0xAA; 32]);

/// Holder key used for the protocol funding the seed
pub const PROTOCOL: Pubkey = Pubkey::new_from_array([0xBB; 32]);

/// Deterministic participant key
pub fn participant(index: u8) -> Pubkey {
    Pubkey::new_from_array([index.wrapping_add(1); 32])
}

/// Token balances for one mint
#[derive(Debug, Clone, Default)]
pub struct SimulatedMint {
    pub balances: BTreeMap<Pubkey, u64>,
}

impl SimulatedMint {
    pub fn balance(&self, holder: &Pubkey) -> u64 {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    pub fn supply(&self) -> u64 {
        self.balances.values().sum()
    }

    pub fn mint_to(&mut self, holder: Pubkey, amount: u64) {
        *self.balances.entry(holder).or_default() += amount;
    }

    /// Mirrors the SPL token transfer: fails without moving anything when
    /// the source is short.
    pub fn transfer(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<(), String> {
        if amount == 0 {
            return Ok(());
        }
        let source = self.balance(from);
        if source < amount {
            return Err(format!("insufficient funds: {} < {}", source, amount));
        }
        self.balances.insert(*from, source - amount);
        self.mint_to(*to, amount);
        Ok(())
    }
}

/// One instruction against the simulated dispute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Interact { actor: u8 },
    SubmitCase { actor: u8 },
    Commit { voter: u8, candidate: u8, salt: String },
    Reveal { voter: u8, candidate: u8, salt: String },
    Close,
    Claim { actor: u8 },
    /// Move the clock forward to `to` (never backwards)
    Advance { to: i64 },
}

/// A single dispute with its vaults and every participant's record
#[derive(Debug, Clone)]
pub struct SimulatedCourt {
    pub dispute: Dispute,
    pub records: BTreeMap<Pubkey, VoterRecord>,
    pub reputation: SimulatedMint,
    pub payment: SimulatedMint,
    pub now: i64,
    pub reputation_supply: u64,
    pub payment_supply: u64,
    /// Settlements of every successful claim, in order
    pub settlements: Vec<(Pubkey, Settlement, Payout)>,
}

impl SimulatedCourt {
    /// Opens a dispute at time 0 and funds the protocol seed plus every
    /// participant's starting balances.
    pub fn open(
        config: DisputeConfiguration,
        max_parties: u16,
        balances: &[(u64, u64)],
    ) -> Result<Self, String> {
        config.validate(0).map_err(|e| e.to_string())?;

        let mut reputation = SimulatedMint::default();
        let mut payment = SimulatedMint::default();
        reputation.mint_to(PROTOCOL, config.protocol_rep);
        payment.mint_to(PROTOCOL, config.protocol_pay);
        for (index, (rep, pay)) in balances.iter().enumerate() {
            reputation.mint_to(participant(index as u8), *rep);
            payment.mint_to(participant(index as u8), *pay);
        }

        let mut dispute = Dispute {
            id: 0,
            max_parties,
            payment_mint: Some(Pubkey::new_from_array([0xCC; 32])),
            config,
            ..Default::default()
        };
        dispute
            .record_deposit(config.protocol_rep, config.protocol_pay)
            .map_err(|e| e.to_string())?;
        reputation.transfer(&PROTOCOL, &VAULT, config.protocol_rep)?;
        payment.transfer(&PROTOCOL, &VAULT, config.protocol_pay)?;

        Ok(Self {
            dispute,
            records: BTreeMap::new(),
            reputation_supply: reputation.supply(),
            payment_supply: payment.supply(),
            reputation,
            payment,
            now: 0,
            settlements: Vec::new(),
        })
    }

    /// Applies `operation` atomically and checks every invariant afterwards.
    pub fn apply(&mut self, operation: &Operation) -> SimulationResult {
        let before = self.clone();
        if let Err(error) = self.execute(operation) {
            *self = before;
            return SimulationResult::Error(error);
        }
        self.check_invariants(&before)
    }

    fn execute(&mut self, operation: &Operation) -> Result<(), String> {
        let now = self.now;
        match operation {
            Operation::Advance { to } => {
                self.now = self.now.max(*to);
                Ok(())
            }
            Operation::Interact { actor } => {
                let key = participant(*actor);
                let record = self.records.entry(key).or_default();
                let stake = join_as_party(&mut self.dispute, record, key, now)
                    .map_err(|e| e.to_string())?;
                self.reputation.transfer(&key, &VAULT, stake.reputation)?;
                self.payment.transfer(&key, &VAULT, stake.payment)
            }
            Operation::SubmitCase { actor } => self
                .dispute
                .submit_case(&participant(*actor), now)
                .map_err(|e| e.to_string()),
            Operation::Commit {
                voter,
                candidate,
                salt,
            } => {
                let key = participant(*voter);
                let balance = self.reputation.balance(&key);
                let record = self.records.entry(key).or_default();
                let hash = compute_commitment(&participant(*candidate), salt);
                let stake = commit_vote(&mut self.dispute, record, balance, hash, now)
                    .map_err(|e| e.to_string())?;
                self.reputation.transfer(&key, &VAULT, stake.reputation)
            }
            Operation::Reveal {
                voter,
                candidate,
                salt,
            } => {
                let record = self
                    .records
                    .get_mut(&participant(*voter))
                    .ok_or("record not initialized")?;
                reveal_vote(&mut self.dispute, record, participant(*candidate), salt, now)
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            }
            Operation::Close => self
                .dispute
                .conclude(now)
                .map(|_| ())
                .map_err(|e| e.to_string()),
            Operation::Claim { actor } => {
                let key = participant(*actor);
                let record = self
                    .records
                    .get_mut(&key)
                    .ok_or("record not initialized")?;
                let (_, settlement, payout) =
                    settle_claim(&mut self.dispute, record, &key).map_err(|e| e.to_string())?;
                self.reputation.transfer(&VAULT, &key, payout.reputation)?;
                self.payment.transfer(&VAULT, &key, payout.payment)?;
                self.settlements.push((key, settlement, payout));
                Ok(())
            }
        }
    }

    /// Checks every invariant against the state before the last operation.
    pub fn check_invariants(&self, before: &SimulatedCourt) -> SimulationResult {
        let dispute = &self.dispute;

        let vault = [
            check_vault_balance(
                dispute.reputation_escrowed,
                dispute.reputation_paid_out,
                self.reputation.balance(&VAULT),
            ),
            check_vault_balance(
                dispute.payment_escrowed,
                dispute.payment_paid_out,
                self.payment.balance(&VAULT),
            ),
            check_supply_conserved(self.reputation_supply, self.reputation.supply()),
            check_supply_conserved(self.payment_supply, self.payment.supply()),
        ];
        if let Some(violation) = vault.iter().find(|r| **r != VaultInvariantResult::Valid) {
            return SimulationResult::InvariantViolation(format!("{:?}", violation));
        }

        let lifecycle = [
            check_phase_transition(&before.dispute, dispute),
            check_party_counts(dispute),
            check_tally(dispute),
            check_ballots_back_tally(dispute, self.records.iter()),
        ];
        if let Some(violation) = lifecycle
            .iter()
            .find(|r| **r != DisputeInvariantResult::Valid)
        {
            return SimulationResult::InvariantViolation(format!("{:?}", violation));
        }

        for (owner, record) in &self.records {
            let result = check_record(record);
            if result != RecordInvariantResult::Valid {
                return SimulationResult::InvariantViolation(format!(
                    "{}: {:?}",
                    owner, result
                ));
            }
        }

        SimulationResult::Success
    }

    /// Runs `operations` in order, stopping at the first invariant violation.
    pub fn run(&mut self, operations: &[Operation]) -> SimulationResult {
        for operation in operations {
            let result = self.apply(operation);
            if result.is_invariant_violation() {
                return result;
            }
        }
        SimulationResult::Success
    }

    /// Keys of everyone holding a record
    pub fn participants(&self) -> Vec<Pubkey> {
        self.records.keys().copied().collect()
    }
}

/// Result of a simulated instruction execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationResult {
    Success,
    Error(String),
    InvariantViolation(String),
}

impl SimulationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SimulationResult::Success)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SimulationResult::Error(_))
    }

    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, SimulationResult::InvariantViolation(_))
    }
}

// ============================================================================
// Scripted scenarios
// ============================================================================

/// A voter's ballot in a scripted lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ballot {
    /// Index of the party voted for
    pub candidate: u8,
    pub salt: String,
    pub reveals: bool,
}

/// Builds the operations of a complete dispute: `parties` parties join and
/// submit, each ballot is committed and optionally revealed, the dispute is
/// closed and every participant claims in `claim_order`.
///
/// Participants `0..parties` are parties, the following indices are voters.
pub fn scripted_lifecycle(
    config: &DisputeConfiguration,
    parties: u8,
    ballots: &[Ballot],
    claim_order: &[u8],
) -> Vec<Operation> {
    let mut operations = Vec::new();
    for actor in 0..parties {
        operations.push(Operation::Interact { actor });
    }
    for actor in 0..parties {
        operations.push(Operation::SubmitCase { actor });
    }
    for (i, ballot) in ballots.iter().enumerate() {
        operations.push(Operation::Commit {
            voter: parties + i as u8,
            candidate: ballot.candidate,
            salt: ballot.salt.clone(),
        });
    }
    operations.push(Operation::Advance {
        to: config.commit_ends_at,
    });
    for (i, ballot) in ballots.iter().enumerate().filter(|(_, b)| b.reveals) {
        operations.push(Operation::Reveal {
            voter: parties + i as u8,
            candidate: ballot.candidate,
            salt: ballot.salt.clone(),
        });
    }
    operations.push(Operation::Advance {
        to: config.reveal_ends_at,
    });
    operations.push(Operation::Close);
    for actor in claim_order {
        operations.push(Operation::Claim { actor: *actor });
    }
    operations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DisputeConfiguration {
        DisputeConfiguration {
            grace_ends_at: 100,
            init_cases_ends_at: 200,
            commit_ends_at: 300,
            reveal_ends_at: 400,
            voter_rep_required: 5,
            voter_rep_cost: 0,
            party_rep_cost: 15,
            party_pay_cost: 0,
            min_votes: 1,
            protocol_rep: 5,
            protocol_pay: 0,
        }
    }

    #[test]
    fn test_reference_dispute() {
        let mut court = SimulatedCourt::open(config(), 2, &[(15, 0), (15, 0), (5, 0)]).unwrap();
        let ballots = [Ballot {
            candidate: 1,
            salt: "s".to_string(),
            reveals: true,
        }];
        let ops = scripted_lifecycle(&config(), 2, &ballots, &[0, 1, 2]);

        for op in &ops {
            assert!(court.apply(op).is_success(), "{:?} failed", op);
        }
        assert_eq!(court.dispute.winner(), Some(participant(1)));
        assert_eq!(court.reputation.balance(&participant(0)), 0);
        assert_eq!(court.reputation.balance(&participant(1)), 15);
        assert_eq!(court.reputation.balance(&participant(2)), 25);
        assert_eq!(court.reputation.balance(&VAULT), 0);
    }

    #[test]
    fn test_failed_operation_restores_state() {
        let mut court = SimulatedCourt::open(config(), 2, &[(10, 0)]).unwrap();
        // 10 < party cost 15: the transfer fails after the books were updated
        let result = court.apply(&Operation::Interact { actor: 0 });
        assert!(result.is_error());
        assert!(court.dispute.parties.is_empty());
        assert_eq!(court.dispute.reputation_escrowed, 5);
        assert!(court
            .records
            .get(&participant(0))
            .map_or(true, |record| record.claim_queue.is_empty()));
    }

    #[test]
    fn test_mint_transfer() {
        let mut mint = SimulatedMint::default();
        mint.mint_to(participant(0), 5);
        assert!(mint.transfer(&participant(0), &VAULT, 6).is_err());
        mint.transfer(&participant(0), &VAULT, 5).unwrap();
        assert_eq!(mint.balance(&VAULT), 5);
        assert_eq!(mint.supply(), 5);
    }
}
