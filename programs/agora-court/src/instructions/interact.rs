//! Join a dispute as a party, staking the party costs

use crate::errors::CourtError;
use crate::events::PartyJoined;
use crate::instructions::constants::{COURT_SEED, DISPUTE_SEED, RECORD_SEED};
use crate::instructions::participation_helpers::join_as_party;
use crate::instructions::token_helpers::{payment_accounts, transfer_to_vault};
use crate::state::{Court, Dispute, VoterRecord};
use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

#[derive(Accounts)]
#[instruction(court_name: String, dispute_id: u64)]
pub struct Interact<'info> {
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

    #[account(mut)]
    pub payment_vault: Option<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [RECORD_SEED, court.key().as_ref(), user.key().as_ref()],
        bump = record.bump,
        realloc = VoterRecord::space(record.claim_queue.len() + 1),
        realloc::payer = user,
        realloc::zero = false
    )]
    pub record: Box<Account<'info, VoterRecord>>,

    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        token::mint = reputation_mint,
        token::authority = user
    )]
    pub user_reputation_account: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub user_payment_account: Option<Account<'info, TokenAccount>>,

    #[account(address = dispute.reputation_mint @ CourtError::ReputationMintMismatch)]
    pub reputation_mint: Box<Account<'info, Mint>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Interact>, _court_name: String, _dispute_id: u64) -> Result<()> {
    let clock = Clock::get()?;
    let user = ctx.accounts.user.key();

    let stake = join_as_party(
        &mut ctx.accounts.dispute,
        &mut ctx.accounts.record,
        user,
        clock.unix_timestamp,
    )?;

    transfer_to_vault(
        &ctx.accounts.user_reputation_account.to_account_info(),
        &ctx.accounts.reputation_vault.to_account_info(),
        &ctx.accounts.user.to_account_info(),
        stake.reputation,
        &ctx.accounts.token_program,
    )?;

    if let Some((from, vault)) = payment_accounts(
        &ctx.accounts.dispute,
        &user,
        ctx.accounts.user_payment_account.as_ref(),
        ctx.accounts.payment_vault.as_ref(),
        stake.payment,
    )? {
        transfer_to_vault(
            &from.to_account_info(),
            &vault.to_account_info(),
            &ctx.accounts.user.to_account_info(),
            stake.payment,
            &ctx.accounts.token_program,
        )?;
    }

    let dispute = &ctx.accounts.dispute;
    msg!("Party {} joined dispute {}", user, dispute.id);
    emit!(PartyJoined {
        dispute_id: dispute.id,
        party: user,
        reputation_staked: stake.reputation,
        payment_staked: stake.payment,
        parties: dispute.interactions,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
