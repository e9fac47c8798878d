//! Conclude a dispute once its reveal window has ended. Anyone may call.

use crate::events::{DisputeConcluded, DisputeStatusChanged};
use crate::instructions::constants::{COURT_SEED, DISPUTE_SEED};
use crate::state::{Court, Dispute};
use anchor_lang::prelude::*;

#[derive(Accounts)]
#[instruction(court_name: String, dispute_id: u64)]
pub struct CloseDispute<'info> {
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

    pub payer: Signer<'info>,
}

pub fn handler(ctx: Context<CloseDispute>, _court_name: String, _dispute_id: u64) -> Result<()> {
    let clock = Clock::get()?;
    let dispute = &mut ctx.accounts.dispute;
    let old_status = dispute.status;

    let winner = dispute.conclude(clock.unix_timestamp)?;

    match winner {
        Some(winner) => msg!("Dispute {} concluded, winner {}", dispute.id, winner),
        None => msg!("Dispute {} concluded without a winner", dispute.id),
    }

    emit!(DisputeStatusChanged {
        dispute_id: dispute.id,
        old_status,
        new_status: dispute.status,
        timestamp: clock.unix_timestamp,
    });
    emit!(DisputeConcluded {
        dispute_id: dispute.id,
        winner,
        total_revealed_votes: dispute.total_revealed_votes,
        reputation_reward_pool: dispute.reputation_reward_pool,
        payment_reward_pool: dispute.payment_reward_pool,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
