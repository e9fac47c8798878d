//! Open a dispute under a court. Signed by the court's protocol, which also
//! seeds the reward vaults.

use crate::errors::CourtError;
use crate::events::DisputeCreated;
use crate::instructions::constants::{COURT_SEED, DISPUTE_SEED};
use crate::instructions::token_helpers::{
    transfer_to_vault, validate_token_account, validate_vault_address,
};
use crate::state::{Court, Dispute, DisputeConfiguration, DisputeStatus};
use anchor_lang::prelude::*;
use anchor_spl::associated_token::{self, AssociatedToken, Create};
use anchor_spl::token::{Mint, Token, TokenAccount};

#[derive(Accounts)]
#[instruction(court_name: String)]
pub struct InitializeDispute<'info> {
    #[account(
        mut,
        seeds = [COURT_SEED, court_name.as_bytes()],
        bump = court.bump,
        has_one = protocol @ CourtError::UnauthorizedProtocol
    )]
    pub court: Box<Account<'info, Court>>,

    #[account(
        init,
        payer = payer,
        space = Dispute::space(court.max_votes_per_dispute),
        seeds = [DISPUTE_SEED, court.key().as_ref(), &court.dispute_counter.to_be_bytes()],
        bump
    )]
    pub dispute: Box<Account<'info, Dispute>>,

    #[account(
        init,
        payer = payer,
        associated_token::mint = reputation_mint,
        associated_token::authority = dispute
    )]
    pub reputation_vault: Box<Account<'info, TokenAccount>>,

    /// CHECK: Payment vault address, validated and created in the handler
    /// when the dispute uses the payment asset
    #[account(mut)]
    pub payment_vault: Option<UncheckedAccount<'info>>,

    #[account(address = court.reputation_mint @ CourtError::ReputationMintMismatch)]
    pub reputation_mint: Box<Account<'info, Mint>>,

    pub payment_mint: Option<Account<'info, Mint>>,

    pub protocol: Signer<'info>,

    #[account(
        mut,
        token::mint = reputation_mint,
        token::authority = protocol
    )]
    pub protocol_reputation_account: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub protocol_payment_account: Option<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<InitializeDispute>,
    _court_name: String,
    config: DisputeConfiguration,
) -> Result<()> {
    let clock = Clock::get()?;
    config.validate(clock.unix_timestamp)?;

    let court = &mut ctx.accounts.court;
    if config.uses_payment() {
        require!(
            court.payment_mint.is_some(),
            CourtError::PaymentAssetNotConfigured
        );
    }
    let dispute_id = court.next_dispute_id()?;

    let dispute = &mut ctx.accounts.dispute;
    dispute.id = dispute_id;
    dispute.court = court.key();
    dispute.reputation_mint = court.reputation_mint;
    dispute.payment_mint = court.payment_mint;
    dispute.max_parties = court.max_votes_per_dispute;
    dispute.parties = Vec::new();
    dispute.status = DisputeStatus::Grace;
    dispute.interactions = 0;
    dispute.submitted_cases = 0;
    dispute.total_revealed_votes = 0;
    dispute.config = config;
    dispute.created_at = clock.unix_timestamp;
    dispute.concluded_at = 0;
    dispute.bump = ctx.bumps.dispute;
    dispute.record_deposit(config.protocol_rep, config.protocol_pay)?;

    transfer_to_vault(
        &ctx.accounts.protocol_reputation_account.to_account_info(),
        &ctx.accounts.reputation_vault.to_account_info(),
        &ctx.accounts.protocol.to_account_info(),
        config.protocol_rep,
        &ctx.accounts.token_program,
    )?;

    if config.uses_payment() {
        create_payment_vault(&ctx, config.protocol_pay)?;
    }

    emit!(DisputeCreated {
        court: ctx.accounts.court.key(),
        dispute_id,
        max_parties: ctx.accounts.dispute.max_parties,
        grace_ends_at: config.grace_ends_at,
        init_cases_ends_at: config.init_cases_ends_at,
        commit_ends_at: config.commit_ends_at,
        reveal_ends_at: config.reveal_ends_at,
        protocol_rep: config.protocol_rep,
        protocol_pay: config.protocol_pay,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Create the dispute's payment vault and move the protocol's payment seed
/// into it.
fn create_payment_vault(ctx: &Context<InitializeDispute>, seed: u64) -> Result<()> {
    let accounts = &ctx.accounts;
    let mint_key = accounts
        .dispute
        .payment_mint
        .ok_or(CourtError::PaymentAssetNotConfigured)?;
    let mint = accounts
        .payment_mint
        .as_ref()
        .ok_or(CourtError::PaymentAccountMissing)?;
    require!(mint.key() == mint_key, CourtError::PaymentMintMismatch);
    let vault = accounts
        .payment_vault
        .as_ref()
        .ok_or(CourtError::PaymentAccountMissing)?;
    validate_vault_address(
        &vault.key(),
        &accounts.dispute.key(),
        &mint_key,
        CourtError::PaymentMintMismatch,
    )?;

    associated_token::create(CpiContext::new(
        accounts.associated_token_program.to_account_info(),
        Create {
            payer: accounts.payer.to_account_info(),
            associated_token: vault.to_account_info(),
            authority: accounts.dispute.to_account_info(),
            mint: mint.to_account_info(),
            system_program: accounts.system_program.to_account_info(),
            token_program: accounts.token_program.to_account_info(),
        },
    ))?;

    if seed > 0 {
        let source = accounts
            .protocol_payment_account
            .as_ref()
            .ok_or(CourtError::PaymentAccountMissing)?;
        validate_token_account(
            source,
            &mint_key,
            &accounts.protocol.key(),
            CourtError::PaymentMintMismatch,
        )?;
        transfer_to_vault(
            &source.to_account_info(),
            &vault.to_account_info(),
            &accounts.protocol.to_account_info(),
            seed,
            &accounts.token_program,
        )?;
    }

    Ok(())
}
