//! Protocol invariant checking for fuzz testing
//!
//! Each check inspects program state produced by the real state and
//! settlement code and reports the first violation it finds.

use agora_court::state::{Commitment, Dispute, DisputeStatus, VoterRecord};
use anchor_lang::prelude::Pubkey;
use std::collections::BTreeSet;

/// Vault invariant results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultInvariantResult {
    Valid,
    /// Vault balance differs from escrowed minus paid out
    BalanceMismatch { expected: u64, actual: u64 },
    /// More paid out than was ever escrowed
    OverPaid { paid_out: u64, escrowed: u64 },
    /// Tokens were created or destroyed across all holders
    SupplyChanged { before: u64, after: u64 },
}

/// Dispute state machine invariant results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisputeInvariantResult {
    Valid,
    PhaseRegressed { from: DisputeStatus, to: DisputeStatus },
    ConcludedModified,
    InteractionCountMismatch { interactions: u16, parties: usize },
    SubmittedCountMismatch { submitted: u16, flagged: usize },
    PartiesExceedCapacity { parties: usize, max: u16 },
    TallyMismatch { total: u64, sum: u64 },
    DuplicateParty,
}

/// Voter record invariant results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordInvariantResult {
    Valid,
    StakedReputationMismatch { counter: u64, sum: u64 },
    StakedPaymentMismatch { counter: u64, sum: u64 },
    MisfiledEntry { key: u64, dispute_id: u64 },
}

// ============================================================================
// Vault Invariants
// ============================================================================

/// The vault holds exactly what the books say it holds.
pub fn check_vault_balance(escrowed: u64, paid_out: u64, vault_balance: u64) -> VaultInvariantResult {
    let Some(expected) = escrowed.checked_sub(paid_out) else {
        return VaultInvariantResult::OverPaid { paid_out, escrowed };
    };
    if expected != vault_balance {
        return VaultInvariantResult::BalanceMismatch {
            expected,
            actual: vault_balance,
        };
    }
    VaultInvariantResult::Valid
}

/// Transfers only move tokens between holders.
pub fn check_supply_conserved(before: u64, after: u64) -> VaultInvariantResult {
    if before != after {
        VaultInvariantResult::SupplyChanged { before, after }
    } else {
        VaultInvariantResult::Valid
    }
}

// ============================================================================
// Dispute Invariants
// ============================================================================

/// Phases never move backwards and a concluded dispute never changes.
pub fn check_phase_transition(old: &Dispute, new: &Dispute) -> DisputeInvariantResult {
    if old.status.is_concluded() {
        if old.status != new.status
            || old.total_revealed_votes != new.total_revealed_votes
            || old.parties != new.parties
        {
            return DisputeInvariantResult::ConcludedModified;
        }
        return DisputeInvariantResult::Valid;
    }
    if new.status.rank() < old.status.rank() {
        return DisputeInvariantResult::PhaseRegressed {
            from: old.status,
            to: new.status,
        };
    }
    DisputeInvariantResult::Valid
}

/// Party bookkeeping agrees with the party list.
pub fn check_party_counts(dispute: &Dispute) -> DisputeInvariantResult {
    if dispute.interactions as usize != dispute.parties.len() {
        return DisputeInvariantResult::InteractionCountMismatch {
            interactions: dispute.interactions,
            parties: dispute.parties.len(),
        };
    }
    let flagged = dispute
        .parties
        .iter()
        .filter(|party| party.case_submitted)
        .count();
    if dispute.submitted_cases as usize != flagged {
        return DisputeInvariantResult::SubmittedCountMismatch {
            submitted: dispute.submitted_cases,
            flagged,
        };
    }
    if dispute.parties.len() > dispute.max_parties as usize {
        return DisputeInvariantResult::PartiesExceedCapacity {
            parties: dispute.parties.len(),
            max: dispute.max_parties,
        };
    }
    let unique: BTreeSet<_> = dispute.parties.iter().map(|party| party.key).collect();
    if unique.len() != dispute.parties.len() {
        return DisputeInvariantResult::DuplicateParty;
    }
    DisputeInvariantResult::Valid
}

/// Revealed votes are exactly the per-party tallies.
pub fn check_tally(dispute: &Dispute) -> DisputeInvariantResult {
    let sum: u64 = dispute.parties.iter().map(|party| party.votes).sum();
    if sum != dispute.total_revealed_votes {
        return DisputeInvariantResult::TallyMismatch {
            total: dispute.total_revealed_votes,
            sum,
        };
    }
    DisputeInvariantResult::Valid
}

// ============================================================================
// Record Invariants
// ============================================================================

/// Staked counters equal the stakes on the queued entries, and each entry is
/// filed under its own dispute id.
pub fn check_record(record: &VoterRecord) -> RecordInvariantResult {
    let rep: u64 = record
        .claim_queue
        .values()
        .map(|entry| entry.staked_reputation)
        .sum();
    if rep != record.currently_staked_rep {
        return RecordInvariantResult::StakedReputationMismatch {
            counter: record.currently_staked_rep,
            sum: rep,
        };
    }
    let pay: u64 = record
        .claim_queue
        .values()
        .map(|entry| entry.staked_payment)
        .sum();
    if pay != record.currently_staked_pay {
        return RecordInvariantResult::StakedPaymentMismatch {
            counter: record.currently_staked_pay,
            sum: pay,
        };
    }
    for (dispute_id, entry) in &record.claim_queue {
        if *dispute_id != entry.dispute_id {
            return RecordInvariantResult::MisfiledEntry {
                key: *dispute_id,
                dispute_id: entry.dispute_id,
            };
        }
    }
    RecordInvariantResult::Valid
}

/// Before conclusion every tallied vote is backed by exactly one revealed
/// ballot in a non-party record.
pub fn check_ballots_back_tally<'a>(
    dispute: &Dispute,
    records: impl IntoIterator<Item = (&'a Pubkey, &'a VoterRecord)>,
) -> DisputeInvariantResult {
    if dispute.is_concluded() {
        return DisputeInvariantResult::Valid;
    }
    let ballots = records
        .into_iter()
        .filter(|(owner, _)| !dispute.is_party(owner))
        .filter_map(|(_, record)| record.entry(dispute.id))
        .filter(|entry| matches!(entry.commitment, Commitment::Revealed { .. }))
        .count() as u64;
    if ballots != dispute.total_revealed_votes {
        return DisputeInvariantResult::TallyMismatch {
            total: dispute.total_revealed_votes,
            sum: ballots,
        };
    }
    DisputeInvariantResult::Valid
}
