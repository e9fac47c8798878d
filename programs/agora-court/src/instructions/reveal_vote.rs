//! Disclose a blind vote and add it to the tally

use crate::events::{DisputeStatusChanged, VoteRevealed};
use crate::instructions::constants::{CASE_SEED, COURT_SEED, DISPUTE_SEED, RECORD_SEED};
use crate::instructions::participation_helpers::reveal_vote;
use crate::state::{Case, Court, Dispute, VoterRecord};
use anchor_lang::prelude::*;

#[derive(Accounts)]
#[instruction(court_name: String, dispute_id: u64, candidate: Pubkey)]
pub struct RevealVote<'info> {
    #[account(
        seeds = [COURT_SEED, court_name.as_bytes()],
        bump = court.bump
    )]
    pub court: Account<'info, Court>,

    #[account(
        mut,
        seeds = [DISPUTE_SEED, court.key().as_ref(), &dispute_id.to_be_bytes()],
        bump = dispute.bump
    )]
    pub dispute: Account<'info, Dispute>,

    #[account(
        mut,
        seeds = [CASE_SEED, dispute.key().as_ref(), candidate.as_ref()],
        bump = case.bump
    )]
    pub case: Account<'info, Case>,

    #[account(
        mut,
        seeds = [RECORD_SEED, court.key().as_ref(), voter.key().as_ref()],
        bump = record.bump
    )]
    pub record: Account<'info, VoterRecord>,

    pub voter: Signer<'info>,
}

pub fn handler(
    ctx: Context<RevealVote>,
    _court_name: String,
    _dispute_id: u64,
    candidate: Pubkey,
    salt: String,
) -> Result<()> {
    let clock = Clock::get()?;
    let old_status = ctx.accounts.dispute.status;

    let candidate_votes = reveal_vote(
        &mut ctx.accounts.dispute,
        &mut ctx.accounts.record,
        candidate,
        &salt,
        clock.unix_timestamp,
    )?;
    ctx.accounts.case.votes = candidate_votes;

    let dispute = &ctx.accounts.dispute;
    emit!(VoteRevealed {
        dispute_id: dispute.id,
        voter: ctx.accounts.voter.key(),
        candidate,
        candidate_votes,
        total_revealed_votes: dispute.total_revealed_votes,
        timestamp: clock.unix_timestamp,
    });
    if dispute.status != old_status {
        emit!(DisputeStatusChanged {
            dispute_id: dispute.id,
            old_status,
            new_status: dispute.status,
            timestamp: clock.unix_timestamp,
        });
    }

    Ok(())
}
