//! Events emitted by the Agora Court program
//!
//! Indexers follow a dispute's lifecycle through these; amounts are in the
//! smallest unit of the respective mint.

use crate::state::DisputeStatus;
use anchor_lang::prelude::*;

/// Emitted when a court is created
#[event]
pub struct CourtInitialized {
    pub court: Pubkey,
    pub name: String,
    pub edit_authority: Pubkey,
    pub protocol: Pubkey,
    pub reputation_mint: Pubkey,
    pub payment_mint: Option<Pubkey>,
    pub max_votes_per_dispute: u16,
}

/// Emitted when the edit authority changes court settings
#[event]
pub struct CourtEdited {
    pub court: Pubkey,
    pub edit_authority: Pubkey,
    pub protocol: Pubkey,
    pub reputation_mint: Pubkey,
    pub payment_mint: Option<Pubkey>,
    pub max_votes_per_dispute: u16,
}

#[event]
pub struct RecordInitialized {
    pub court: Pubkey,
    pub owner: Pubkey,
}

/// Emitted when the protocol opens a dispute
#[event]
pub struct DisputeCreated {
    pub court: Pubkey,
    pub dispute_id: u64,
    pub max_parties: u16,
    pub grace_ends_at: i64,
    pub init_cases_ends_at: i64,
    pub commit_ends_at: i64,
    pub reveal_ends_at: i64,
    pub protocol_rep: u64,
    pub protocol_pay: u64,
    pub timestamp: i64,
}

#[event]
pub struct PartyJoined {
    pub dispute_id: u64,
    pub party: Pubkey,
    pub reputation_staked: u64,
    pub payment_staked: u64,
    pub parties: u16,
    pub timestamp: i64,
}

#[event]
pub struct CaseSubmitted {
    pub dispute_id: u64,
    pub party: Pubkey,
    pub submitted_cases: u16,
    pub timestamp: i64,
}

/// Emitted on every phase change
#[event]
pub struct DisputeStatusChanged {
    pub dispute_id: u64,
    pub old_status: DisputeStatus,
    pub new_status: DisputeStatus,
    pub timestamp: i64,
}

/// Emitted when a blind vote is cast. The commitment hides the choice.
#[event]
pub struct VoteCommitted {
    pub dispute_id: u64,
    pub voter: Pubkey,
    pub reputation_staked: u64,
    pub timestamp: i64,
}

#[event]
pub struct VoteRevealed {
    pub dispute_id: u64,
    pub voter: Pubkey,
    pub candidate: Pubkey,
    pub candidate_votes: u64,
    pub total_revealed_votes: u64,
    pub timestamp: i64,
}

#[event]
pub struct DisputeConcluded {
    pub dispute_id: u64,
    pub winner: Option<Pubkey>,
    pub total_revealed_votes: u64,
    pub reputation_reward_pool: u64,
    pub payment_reward_pool: u64,
    pub timestamp: i64,
}

/// Emitted when a claim entry is settled, including forfeits
#[event]
pub struct StakeClaimed {
    pub dispute_id: u64,
    pub claimant: Pubkey,
    /// 0 = refund, 1 = reward, 2 = forfeit
    pub settlement: u8,
    pub reputation_paid: u64,
    pub payment_paid: u64,
    pub timestamp: i64,
}
