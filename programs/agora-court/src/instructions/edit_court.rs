//! Edit court settings. Existing disputes keep the mints and party cap they
//! were created with.

use crate::errors::CourtError;
use crate::events::CourtEdited;
use crate::instructions::constants::COURT_SEED;
use crate::state::Court;
use crate::utils::validation::validate_max_parties;
use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

#[derive(Accounts)]
#[instruction(court_name: String)]
pub struct EditCourt<'info> {
    #[account(
        mut,
        seeds = [COURT_SEED, court_name.as_bytes()],
        bump = court.bump,
        has_one = edit_authority @ CourtError::UnauthorizedEditAuthority
    )]
    pub court: Account<'info, Court>,

    pub edit_authority: Signer<'info>,

    pub reputation_mint: Option<Account<'info, Mint>>,

    pub payment_mint: Option<Account<'info, Mint>>,
}

pub fn handler(
    ctx: Context<EditCourt>,
    _court_name: String,
    new_edit_authority: Option<Pubkey>,
    new_protocol: Option<Pubkey>,
    max_votes_per_dispute: Option<u16>,
) -> Result<()> {
    let court = &mut ctx.accounts.court;

    if let Some(max_votes) = max_votes_per_dispute {
        validate_max_parties(max_votes)?;
        court.max_votes_per_dispute = max_votes;
    }
    if let Some(mint) = &ctx.accounts.reputation_mint {
        court.reputation_mint = mint.key();
    }
    if let Some(mint) = &ctx.accounts.payment_mint {
        court.payment_mint = Some(mint.key());
    }
    if let Some(protocol) = new_protocol {
        court.protocol = protocol;
    }
    if let Some(authority) = new_edit_authority {
        court.edit_authority = authority;
    }

    emit!(CourtEdited {
        court: court.key(),
        edit_authority: court.edit_authority,
        protocol: court.protocol,
        reputation_mint: court.reputation_mint,
        payment_mint: court.payment_mint,
        max_votes_per_dispute: court.max_votes_per_dispute,
    });

    Ok(())
}
