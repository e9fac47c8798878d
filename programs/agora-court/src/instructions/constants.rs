//! Shared constants for instruction handlers

/// Maximum court name length in bytes (one PDA seed)
pub const MAX_COURT_NAME_LEN: usize = 32;

/// Maximum evidence length in bytes
pub const MAX_EVIDENCE_LEN: usize = 512;

/// Largest account a program can create through a system program CPI
pub const MAX_CPI_ACCOUNT_SIZE: usize = 10_240;

/// Party cap for a court. A dispute with this many parties still fits in
/// `MAX_CPI_ACCOUNT_SIZE`.
pub const MAX_PARTIES_PER_DISPUTE: u16 = 241;

// ============================================================================
// PDA Seeds
// ============================================================================

pub const COURT_SEED: &[u8] = b"court";
pub const DISPUTE_SEED: &[u8] = b"dispute";
pub const CASE_SEED: &[u8] = b"case";
pub const RECORD_SEED: &[u8] = b"record";
