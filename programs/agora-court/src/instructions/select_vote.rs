//! Cast a blind vote on a dispute in the Voting phase

use crate::errors::CourtError;
use crate::events::VoteCommitted;
use crate::instructions::constants::{COURT_SEED, DISPUTE_SEED, RECORD_SEED};
use crate::instructions::participation_helpers::commit_vote;
use crate::instructions::token_helpers::transfer_to_vault;
use crate::state::{Court, Dispute, VoterRecord, HASH_SIZE};
use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

#[derive(Accounts)]
#[instruction(court_name: String, dispute_id: u64)]
pub struct SelectVote<'info> {
    #[account(
        seeds = [COURT_SEED, court_name.as_bytes()],
        bump = court.bump
    )]
    pub court: Box<Account<'info, Court>>,

    #[account(
        mut,
        seeds = [DISPUTE_SEED, court.key().as_ref(), &dispute_id.to_be_bytes()],
        bump = dispute.bump
    )]
    pub dispute: Box<Account<'info, Dispute>>,

    #[account(
        mut,
        associated_token::mint = reputation_mint,
        associated_token::authority = dispute
    )]
    pub reputation_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [RECORD_SEED, court.key().as_ref(), voter.key().as_ref()],
        bump = record.bump,
        realloc = VoterRecord::space(record.claim_queue.len() + 1),
        realloc::payer = voter,
        realloc::zero = false
    )]
    pub record: Box<Account<'info, VoterRecord>>,

    #[account(mut)]
    pub voter: Signer<'info>,

    #[account(
        mut,
        token::mint = reputation_mint,
        token::authority = voter
    )]
    pub voter_reputation_account: Box<Account<'info, TokenAccount>>,

    #[account(address = dispute.reputation_mint @ CourtError::ReputationMintMismatch)]
    pub reputation_mint: Box<Account<'info, Mint>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<SelectVote>,
    _court_name: String,
    _dispute_id: u64,
    commitment: [u8; HASH_SIZE],
) -> Result<()> {
    let clock = Clock::get()?;
    let voter = ctx.accounts.voter.key();

    let stake = commit_vote(
        &mut ctx.accounts.dispute,
        &mut ctx.accounts.record,
        ctx.accounts.voter_reputation_account.amount,
        commitment,
        clock.unix_timestamp,
    )?;

    transfer_to_vault(
        &ctx.accounts.voter_reputation_account.to_account_info(),
        &ctx.accounts.reputation_vault.to_account_info(),
        &ctx.accounts.voter.to_account_info(),
        stake.reputation,
        &ctx.accounts.token_program,
    )?;

    emit!(VoteCommitted {
        dispute_id: ctx.accounts.dispute.id,
        voter,
        reputation_staked: stake.reputation,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
