//! Create a participant's stake ledger for a court

use crate::events::RecordInitialized;
use crate::instructions::constants::{COURT_SEED, RECORD_SEED};
use crate::state::{Court, VoterRecord};
use anchor_lang::prelude::*;
use std::collections::BTreeMap;

#[derive(Accounts)]
#[instruction(court_name: String)]
pub struct InitializeRecord<'info> {
    #[account(
        seeds = [COURT_SEED, court_name.as_bytes()],
        bump = court.bump
    )]
    pub court: Account<'info, Court>,

    #[account(
        init,
        payer = owner,
        space = VoterRecord::space(0),
        seeds = [RECORD_SEED, court.key().as_ref(), owner.key().as_ref()],
        bump
    )]
    pub record: Account<'info, VoterRecord>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeRecord>, _court_name: String) -> Result<()> {
    let record = &mut ctx.accounts.record;
    record.court = ctx.accounts.court.key();
    record.owner = ctx.accounts.owner.key();
    record.currently_staked_rep = 0;
    record.currently_staked_pay = 0;
    record.claim_queue = BTreeMap::new();
    record.bump = ctx.bumps.record;

    emit!(RecordInitialized {
        court: record.court,
        owner: record.owner,
    });

    Ok(())
}
