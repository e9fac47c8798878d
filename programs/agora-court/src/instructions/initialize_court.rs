//! Create a court

use crate::events::CourtInitialized;
use crate::instructions::constants::COURT_SEED;
use crate::state::Court;
use crate::utils::validation::{validate_court_name, validate_max_parties};
use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

#[derive(Accounts)]
#[instruction(court_name: String)]
pub struct InitializeCourt<'info> {
    #[account(
        init,
        payer = authority,
        space = Court::SIZE,
        seeds = [COURT_SEED, court_name.as_bytes()],
        bump
    )]
    pub court: Account<'info, Court>,

    /// CHECK: Stored as the key allowed to create disputes in this court
    pub protocol: UncheckedAccount<'info>,

    pub reputation_mint: Account<'info, Mint>,

    pub payment_mint: Option<Account<'info, Mint>>,

    /// Becomes the court's edit authority
    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<InitializeCourt>,
    court_name: String,
    max_votes_per_dispute: u16,
) -> Result<()> {
    validate_court_name(&court_name)?;
    validate_max_parties(max_votes_per_dispute)?;

    let court = &mut ctx.accounts.court;
    court.edit_authority = ctx.accounts.authority.key();
    court.protocol = ctx.accounts.protocol.key();
    court.reputation_mint = ctx.accounts.reputation_mint.key();
    court.payment_mint = ctx.accounts.payment_mint.as_ref().map(|mint| mint.key());
    court.dispute_counter = 0;
    court.max_votes_per_dispute = max_votes_per_dispute;
    court.bump = ctx.bumps.court;

    emit!(CourtInitialized {
        court: court.key(),
        name: court_name,
        edit_authority: court.edit_authority,
        protocol: court.protocol,
        reputation_mint: court.reputation_mint,
        payment_mint: court.payment_mint,
        max_votes_per_dispute,
    });

    Ok(())
}
