//! SPL token helpers for the dispute escrow vaults.
//!
//! Each dispute escrows into associated token accounts owned by the dispute
//! PDA. Deposits are signed by the depositor; payouts are signed by the
//! dispute PDA.

use crate::errors::CourtError;
use crate::instructions::constants::DISPUTE_SEED;
use crate::state::Dispute;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::get_associated_token_address;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

/// Transfer tokens from a depositor's account into a dispute vault.
///
/// # Arguments
/// * `from` - The depositor's token account (source)
/// * `vault` - The dispute's associated token account (destination)
/// * `authority` - The depositor, who must have signed
/// * `amount` - Number of tokens to transfer
/// * `token_program` - SPL Token program
pub fn transfer_to_vault<'info>(
    from: &AccountInfo<'info>,
    vault: &AccountInfo<'info>,
    authority: &AccountInfo<'info>,
    amount: u64,
    token_program: &Program<'info, Token>,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    token::transfer(
        CpiContext::new(
            token_program.to_account_info(),
            Transfer {
                from: from.clone(),
                to: vault.clone(),
                authority: authority.clone(),
            },
        ),
        amount,
    )
    .map_err(|_| CourtError::TokenTransferFailed)?;

    Ok(())
}

/// Transfer tokens from a dispute vault to a recipient using PDA-signed CPI.
///
/// The vault must hold at least `amount`; the check runs before the CPI so a
/// short vault surfaces as `InsufficientVaultFunds`.
pub fn transfer_from_vault<'info>(
    vault: &Account<'info, TokenAccount>,
    recipient: &AccountInfo<'info>,
    dispute: &Account<'info, Dispute>,
    amount: u64,
    token_program: &Program<'info, Token>,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    require!(vault.amount >= amount, CourtError::InsufficientVaultFunds);

    let id_bytes = dispute.id.to_be_bytes();
    let bump = [dispute.bump];
    let dispute_seeds: &[&[u8]] = &[DISPUTE_SEED, dispute.court.as_ref(), &id_bytes, &bump];
    let signer_seeds: &[&[&[u8]]] = &[dispute_seeds];

    token::transfer(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            Transfer {
                from: vault.to_account_info(),
                to: recipient.clone(),
                authority: dispute.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )
    .map_err(|_| CourtError::TokenTransferFailed)?;

    Ok(())
}

/// Validate that a token account has the expected mint and owner.
pub fn validate_token_account(
    token_account: &TokenAccount,
    expected_mint: &Pubkey,
    expected_owner: &Pubkey,
    error: CourtError,
) -> Result<()> {
    if token_account.mint != *expected_mint || token_account.owner != *expected_owner {
        return Err(error.into());
    }
    Ok(())
}

/// Validate that `vault` is the dispute's associated token account for `mint`.
pub fn validate_vault_address(
    vault: &Pubkey,
    dispute: &Pubkey,
    mint: &Pubkey,
    error: CourtError,
) -> Result<()> {
    if *vault != get_associated_token_address(dispute, mint) {
        return Err(error.into());
    }
    Ok(())
}

/// Resolve the payment-side accounts of an instruction.
///
/// Returns `None` when `amount` is zero. Otherwise both the user's account and
/// the dispute's vault must be present, use the dispute's payment mint, and be
/// owned by `user` and the dispute PDA respectively.
pub fn payment_accounts<'a, 'info>(
    dispute: &Account<'info, Dispute>,
    user: &Pubkey,
    user_account: Option<&'a Account<'info, TokenAccount>>,
    vault: Option<&'a Account<'info, TokenAccount>>,
    amount: u64,
) -> Result<Option<(&'a Account<'info, TokenAccount>, &'a Account<'info, TokenAccount>)>> {
    if amount == 0 {
        return Ok(None);
    }
    let mint = dispute
        .payment_mint
        .ok_or(CourtError::PaymentAssetNotConfigured)?;
    let user_account = user_account.ok_or(CourtError::PaymentAccountMissing)?;
    let vault = vault.ok_or(CourtError::PaymentAccountMissing)?;

    validate_token_account(user_account, &mint, user, CourtError::PaymentMintMismatch)?;
    validate_token_account(vault, &mint, &dispute.key(), CourtError::PaymentMintMismatch)?;
    validate_vault_address(&vault.key(), &dispute.key(), &mint, CourtError::PaymentMintMismatch)?;
    Ok(Some((user_account, vault)))
}
