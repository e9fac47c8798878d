//! Joining, committing and revealing.
//!
//! These apply the bookkeeping side of `interact`, `select_vote` and
//! `reveal_vote` to the dispute and the participant's record. The handlers
//! move the returned stake with token CPIs afterwards; a failed transfer
//! aborts the whole transaction.

use crate::errors::CourtError;
use crate::state::{ClaimEntry, Commitment, Dispute, VoterRecord, HASH_SIZE};
use anchor_lang::prelude::*;

/// Amounts a participant must deposit into the dispute vaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stake {
    pub reputation: u64,
    pub payment: u64,
}

/// Registers `actor` as a party and queues its self-vote claim entry.
pub fn join_as_party(
    dispute: &mut Dispute,
    record: &mut VoterRecord,
    actor: Pubkey,
    now: i64,
) -> Result<Stake> {
    require!(
        !record.has_unclaimed_disputes(now),
        CourtError::UnclaimedDisputes
    );
    require!(
        !record.has_entry(dispute.id),
        CourtError::DuplicateParticipation
    );
    dispute.register_party(actor, now)?;

    let stake = Stake {
        reputation: dispute.config.party_rep_cost,
        payment: dispute.config.party_pay_cost,
    };
    record.push_entry(ClaimEntry {
        dispute_id: dispute.id,
        dispute_end_time: dispute.config.reveal_ends_at,
        staked_reputation: stake.reputation,
        staked_payment: stake.payment,
        commitment: Commitment::Revealed { candidate: actor },
    })?;
    dispute.record_deposit(stake.reputation, stake.payment)?;
    Ok(stake)
}

/// Queues a blind vote for the voter owning `record`.
///
/// `token_balance` is the voter's reputation token balance; reputation
/// already staked in the court counts towards the holding requirement.
pub fn commit_vote(
    dispute: &mut Dispute,
    record: &mut VoterRecord,
    token_balance: u64,
    commitment: [u8; HASH_SIZE],
    now: i64,
) -> Result<Stake> {
    dispute.require_commit_window(now)?;
    require!(
        !record.has_entry(dispute.id),
        CourtError::DuplicateParticipation
    );
    require!(
        !record.has_unclaimed_disputes(now),
        CourtError::UnclaimedDisputes
    );

    let holding = record.holding(token_balance)?;
    if holding < dispute.config.voter_rep_required {
        msg!(
            "Holding {} below required {}",
            holding,
            dispute.config.voter_rep_required
        );
        return err!(CourtError::InsufficientHolding);
    }

    let stake = Stake {
        reputation: dispute.config.voter_rep_cost,
        payment: 0,
    };
    record.push_entry(ClaimEntry {
        dispute_id: dispute.id,
        dispute_end_time: dispute.config.reveal_ends_at,
        staked_reputation: stake.reputation,
        staked_payment: 0,
        commitment: Commitment::Committed { hash: commitment },
    })?;
    dispute.record_deposit(stake.reputation, 0)?;
    Ok(stake)
}

/// Opens a blind vote and tallies it. Returns the candidate's new tally.
pub fn reveal_vote(
    dispute: &mut Dispute,
    record: &mut VoterRecord,
    candidate: Pubkey,
    salt: &str,
    now: i64,
) -> Result<u64> {
    dispute.require_reveal_window(now)?;
    dispute.candidate_index(&candidate)?;
    record.reveal(dispute.id, candidate, salt)?;
    dispute.record_reveal(&candidate)
}
