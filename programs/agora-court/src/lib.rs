#![allow(unexpected_cfgs)]
//! Agora Court
//!
//! A dispute-resolution protocol. Protocols open disputes inside a court,
//! parties stake reputation (and optionally a payment asset) and submit
//! evidence, and reputation holders settle the outcome with commit-reveal
//! voting. Stakes are escrowed in vaults owned by the dispute and released
//! through per-participant claim queues once the dispute concludes.

use anchor_lang::prelude::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_utils;

use instructions::*;
use state::{DisputeConfiguration, HASH_SIZE};

#[program]
pub mod agora_court {
    use super::*;

    /// Create a court. The signer becomes its edit authority.
    ///
    /// # Arguments
    /// * `court_name` - PDA seed, 1-32 printable ASCII characters
    /// * `max_votes_per_dispute` - Party cap for disputes created under the court
    pub fn initialize_court(
        ctx: Context<InitializeCourt>,
        court_name: String,
        max_votes_per_dispute: u16,
    ) -> Result<()> {
        instructions::initialize_court::handler(ctx, court_name, max_votes_per_dispute)
    }

    /// Change court settings. Only the edit authority may call.
    /// Mints are taken from the optional mint accounts.
    pub fn edit_court(
        ctx: Context<EditCourt>,
        court_name: String,
        new_edit_authority: Option<Pubkey>,
        new_protocol: Option<Pubkey>,
        max_votes_per_dispute: Option<u16>,
    ) -> Result<()> {
        instructions::edit_court::handler(
            ctx,
            court_name,
            new_edit_authority,
            new_protocol,
            max_votes_per_dispute,
        )
    }

    /// Create the caller's voter record for a court.
    pub fn initialize_record(ctx: Context<InitializeRecord>, court_name: String) -> Result<()> {
        instructions::initialize_record::handler(ctx, court_name)
    }

    /// Open a dispute. Signed by the court's protocol, which funds the
    /// configured seed amounts into the new vaults.
    pub fn initialize_dispute(
        ctx: Context<InitializeDispute>,
        court_name: String,
        config: DisputeConfiguration,
    ) -> Result<()> {
        instructions::initialize_dispute::handler(ctx, court_name, config)
    }

    /// Join a dispute as a party, staking the party costs.
    pub fn interact(ctx: Context<Interact>, court_name: String, dispute_id: u64) -> Result<()> {
        instructions::interact::handler(ctx, court_name, dispute_id)
    }

    /// Submit the caller's case. Once every party has submitted, voting opens.
    pub fn initialize_case(
        ctx: Context<InitializeCase>,
        court_name: String,
        dispute_id: u64,
        evidence: String,
    ) -> Result<()> {
        instructions::initialize_case::handler(ctx, court_name, dispute_id, evidence)
    }

    /// Commit a blind vote: `commitment = keccak256(candidate ‖ salt)`.
    pub fn select_vote(
        ctx: Context<SelectVote>,
        court_name: String,
        dispute_id: u64,
        commitment: [u8; HASH_SIZE],
    ) -> Result<()> {
        instructions::select_vote::handler(ctx, court_name, dispute_id, commitment)
    }

    /// Reveal a committed vote during the reveal window.
    pub fn reveal_vote(
        ctx: Context<RevealVote>,
        court_name: String,
        dispute_id: u64,
        candidate: Pubkey,
        salt: String,
    ) -> Result<()> {
        instructions::reveal_vote::handler(ctx, court_name, dispute_id, candidate, salt)
    }

    /// Conclude a dispute after its reveal deadline. Permissionless.
    pub fn close_dispute(
        ctx: Context<CloseDispute>,
        court_name: String,
        dispute_id: u64,
    ) -> Result<()> {
        instructions::close_dispute::handler(ctx, court_name, dispute_id)
    }

    /// Settle the caller's claim entry for a concluded dispute.
    pub fn claim(ctx: Context<Claim>, court_name: String, dispute_id: u64) -> Result<()> {
        instructions::claim::handler(ctx, court_name, dispute_id)
    }
}
