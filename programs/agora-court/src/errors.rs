//! Error codes for the Agora Court program

use anchor_lang::prelude::*;

#[error_code]
pub enum CourtError {
    // Lifecycle errors
    #[msg("Operation is not permitted in the dispute's current phase or time window")]
    InvalidPhase,

    #[msg("Participant is already registered, has already submitted, or has already voted")]
    DuplicateParticipation,

    #[msg("Dispute has reached its maximum number of parties")]
    CapacityExceeded,

    #[msg("Revealed vote does not match the stored commitment")]
    CommitmentMismatch,

    #[msg("Voter does not hold the reputation required to vote")]
    InsufficientHolding,

    #[msg("No claim entry exists for this dispute")]
    EntryNotFound,

    #[msg("Dispute vault does not hold enough funds for this payout")]
    InsufficientVaultFunds,

    #[msg("Signer is not a party to this dispute")]
    NotAParty,

    #[msg("Candidate is not a party with a submitted case")]
    UnknownCandidate,

    #[msg("Participant has unclaimed stakes in a finished dispute")]
    UnclaimedDisputes,

    // Configuration errors
    #[msg("Dispute configuration is invalid")]
    InvalidConfiguration,

    #[msg("Court name must be 1-32 printable ASCII characters")]
    InvalidCourtName,

    #[msg("Evidence must be printable ASCII and at most 512 bytes")]
    InvalidEvidence,

    #[msg("Only the court's edit authority can perform this action")]
    UnauthorizedEditAuthority,

    #[msg("Only the court's protocol can create disputes")]
    UnauthorizedProtocol,

    // Token errors
    #[msg("Reputation mint does not match the court")]
    ReputationMintMismatch,

    #[msg("Payment mint does not match the court")]
    PaymentMintMismatch,

    #[msg("Court has no payment asset configured")]
    PaymentAssetNotConfigured,

    #[msg("A payment token account required for this operation is missing")]
    PaymentAccountMissing,

    #[msg("Token transfer failed")]
    TokenTransferFailed,

    // Arithmetic
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}
