//! Submit a party's case (evidence) for a dispute

use crate::events::{CaseSubmitted, DisputeStatusChanged};
use crate::instructions::constants::{CASE_SEED, COURT_SEED, DISPUTE_SEED};
use crate::state::{Case, Court, Dispute};
use crate::utils::validation::validate_evidence;
use anchor_lang::prelude::*;

#[derive(Accounts)]
#[instruction(court_name: String, dispute_id: u64, evidence: String)]
pub struct InitializeCase<'info> {
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
        init_if_needed,
        payer = user,
        space = Case::SIZE,
        seeds = [CASE_SEED, dispute.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub case: Account<'info, Case>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<InitializeCase>,
    _court_name: String,
    _dispute_id: u64,
    evidence: String,
) -> Result<()> {
    validate_evidence(&evidence)?;
    let clock = Clock::get()?;
    let user = ctx.accounts.user.key();

    let dispute = &mut ctx.accounts.dispute;
    let old_status = dispute.status;
    // Rejects a second submission before the case account is touched
    dispute.submit_case(&user, clock.unix_timestamp)?;

    let case = &mut ctx.accounts.case;
    case.dispute = dispute.key();
    case.owner = user;
    case.votes = 0;
    case.evidence = evidence;
    case.bump = ctx.bumps.case;

    emit!(CaseSubmitted {
        dispute_id: dispute.id,
        party: user,
        submitted_cases: dispute.submitted_cases,
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
