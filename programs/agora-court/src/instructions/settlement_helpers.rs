//! Settlement of claim entries after a dispute concludes.
//!
//! Every entry is paid out exactly once:
//! - Inconclusive dispute: every entry gets its stake back and the protocol
//!   seed stays in the vault.
//! - Winning party: stake back.
//! - Voter who revealed for the winner: stake back plus an equal share of the
//!   reward pool; the last of them also receives the division remainder.
//! - Losing party and every other voter: nothing.
//!
//! With these rules the sum of all payouts never exceeds what the vaults
//! hold, and a conclusive dispute with every entry claimed drains the
//! reputation vault to zero.

use crate::errors::CourtError;
use crate::state::{ClaimEntry, Commitment, Dispute, VoterRecord};
use anchor_lang::prelude::*;

/// How a claim entry settles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Refund,
    Reward,
    Forfeit,
}

/// Amounts released from the dispute vaults for one claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Payout {
    pub reputation: u64,
    pub payment: u64,
}

/// Classify an entry of a concluded dispute.
pub fn classify_entry(dispute: &Dispute, claimant: &Pubkey, entry: &ClaimEntry) -> Settlement {
    let Some(winner) = dispute.winner() else {
        return Settlement::Refund;
    };

    if dispute.is_party(claimant) {
        return if *claimant == winner {
            Settlement::Refund
        } else {
            Settlement::Forfeit
        };
    }

    match entry.commitment {
        Commitment::Revealed { candidate } if candidate == winner => Settlement::Reward,
        _ => Settlement::Forfeit,
    }
}

/// Share of `pool` for one of `claims` correct voters, `remaining` of whom
/// (this one included) have not claimed yet.
pub fn calculate_reward_share(pool: u64, claims: u64, remaining: u64) -> Result<u64> {
    require!(claims > 0 && remaining > 0, CourtError::ArithmeticOverflow);
    let share = pool
        .checked_div(claims)
        .ok_or(CourtError::ArithmeticOverflow)?;

    if remaining == 1 {
        let remainder = pool
            .checked_rem(claims)
            .ok_or(CourtError::ArithmeticOverflow)?;
        share
            .checked_add(remainder)
            .ok_or_else(|| error!(CourtError::ArithmeticOverflow))
    } else {
        Ok(share)
    }
}

/// Remove the claimant's entry for this dispute and work out its payout.
///
/// The payout is added to the dispute's books; the caller moves the tokens.
pub fn settle_claim(
    dispute: &mut Dispute,
    record: &mut VoterRecord,
    claimant: &Pubkey,
) -> Result<(ClaimEntry, Settlement, Payout)> {
    require!(dispute.is_concluded(), CourtError::InvalidPhase);

    let entry = record.take_entry(dispute.id)?;
    let settlement = classify_entry(dispute, claimant, &entry);

    let payout = match settlement {
        Settlement::Refund => Payout {
            reputation: entry.staked_reputation,
            payment: entry.staked_payment,
        },
        Settlement::Forfeit => Payout::default(),
        Settlement::Reward => {
            let winner = dispute.winner().ok_or(CourtError::InvalidPhase)?;
            let claims = dispute
                .party_index(&winner)
                .map(|index| dispute.parties[index].votes)
                .ok_or(CourtError::UnknownCandidate)?;
            let remaining = dispute.winning_claims_remaining;

            let reputation_share =
                calculate_reward_share(dispute.reputation_reward_pool, claims, remaining)?;
            let payment_share =
                calculate_reward_share(dispute.payment_reward_pool, claims, remaining)?;

            dispute.winning_claims_remaining = remaining
                .checked_sub(1)
                .ok_or(CourtError::ArithmeticOverflow)?;

            Payout {
                reputation: entry
                    .staked_reputation
                    .checked_add(reputation_share)
                    .ok_or(CourtError::ArithmeticOverflow)?,
                payment: entry
                    .staked_payment
                    .checked_add(payment_share)
                    .ok_or(CourtError::ArithmeticOverflow)?,
            }
        }
    };

    dispute.record_payout(payout.reputation, payout.payment)?;
    Ok((entry, settlement, payout))
}
