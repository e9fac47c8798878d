//! Helpers shared by the unit test modules

use crate::errors::CourtError;
use anchor_lang::prelude::*;

/// Deterministic key for test fixtures.
pub fn key(n: u8) -> Pubkey {
    Pubkey::new_from_array([n; 32])
}

/// Asserts that `result` failed with `expected`.
pub fn assert_court_error<T: std::fmt::Debug>(result: Result<T>, expected: CourtError) {
    match result {
        Err(anchor_lang::error::Error::AnchorError(e)) => {
            assert_eq!(
                e.error_code_number,
                u32::from(expected),
                "unexpected error: {}",
                e.error_msg
            );
        }
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}
