//! Settle the caller's claim entry for a concluded dispute

use crate::errors::CourtError;
use crate::events::StakeClaimed;
use crate::instructions::constants::{COURT_SEED, DISPUTE_SEED, RECORD_SEED};
use crate::instructions::settlement_helpers::settle_claim;
use crate::instructions::token_helpers::{payment_accounts, transfer_from_vault};
use crate::state::{Court, Dispute, VoterRecord};
use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

#[derive(Accounts)]
#[instruction(court_name: String, dispute_id: u64)]
pub struct Claim<'info> {
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
        seeds = [RECORD_SEED, court.key().as_ref(), claimant.key().as_ref()],
        bump = record.bump,
        realloc = VoterRecord::space(record.claim_queue.len().saturating_sub(1)),
        realloc::payer = claimant,
        realloc::zero = false
    )]
    pub record: Box<Account<'info, VoterRecord>>,

    #[account(mut)]
    pub claimant: Signer<'info>,

    #[account(
        mut,
        token::mint = reputation_mint,
        token::authority = claimant
    )]
    pub claimant_reputation_account: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub claimant_payment_account: Option<Account<'info, TokenAccount>>,

    #[account(address = dispute.reputation_mint @ CourtError::ReputationMintMismatch)]
    pub reputation_mint: Box<Account<'info, Mint>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Claim>, _court_name: String, _dispute_id: u64) -> Result<()> {
    let clock = Clock::get()?;
    let claimant = ctx.accounts.claimant.key();

    let (_, settlement, payout) = settle_claim(
        &mut ctx.accounts.dispute,
        &mut ctx.accounts.record,
        &claimant,
    )?;

    transfer_from_vault(
        &ctx.accounts.reputation_vault,
        &ctx.accounts.claimant_reputation_account.to_account_info(),
        &ctx.accounts.dispute,
        payout.reputation,
        &ctx.accounts.token_program,
    )?;

    if let Some((to, vault)) = payment_accounts(
        &ctx.accounts.dispute,
        &claimant,
        ctx.accounts.claimant_payment_account.as_ref(),
        ctx.accounts.payment_vault.as_ref(),
        payout.payment,
    )? {
        transfer_from_vault(
            vault,
            &to.to_account_info(),
            &ctx.accounts.dispute,
            payout.payment,
            &ctx.accounts.token_program,
        )?;
    }

    emit!(StakeClaimed {
        dispute_id: ctx.accounts.dispute.id,
        claimant,
        settlement: settlement as u8,
        reputation_paid: payout.reputation,
        payment_paid: payout.payment,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
