//! Input validation utilities for Agora Court

use crate::errors::CourtError;
use crate::instructions::constants::{
    MAX_COURT_NAME_LEN, MAX_EVIDENCE_LEN, MAX_PARTIES_PER_DISPUTE,
};
use anchor_lang::prelude::*;

/// Validates that a string contains only printable ASCII characters.
///
/// Court names end up in PDA seeds and evidence is shown to voters, so both
/// are restricted to ASCII graphic characters plus space.
///
/// # Examples
/// ```
/// use agora_court::utils::validation::validate_string_input;
///
/// assert!(validate_string_input("ipfs://QmEvidence"));
/// assert!(!validate_string_input("line\nbreak"));
/// ```
pub fn validate_string_input(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_graphic() || c == ' ')
}

/// Court names are seeds: non-empty, at most 32 bytes, printable.
pub fn validate_court_name(name: &str) -> Result<()> {
    require!(
        !name.is_empty() && name.len() <= MAX_COURT_NAME_LEN && validate_string_input(name),
        CourtError::InvalidCourtName
    );
    Ok(())
}

pub fn validate_evidence(evidence: &str) -> Result<()> {
    require!(
        evidence.len() <= MAX_EVIDENCE_LEN && validate_string_input(evidence),
        CourtError::InvalidEvidence
    );
    Ok(())
}

/// Party cap for disputes created under a court.
pub fn validate_max_parties(max_parties: u16) -> Result<()> {
    require!(
        max_parties > 0 && max_parties <= MAX_PARTIES_PER_DISPUTE,
        CourtError::InvalidConfiguration
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_court_error;

    #[test]
    fn test_valid_strings() {
        assert!(validate_string_input("https://example.com/receipt?id=9"));
        assert!(validate_string_input("delivered late, see photos"));
        assert!(validate_string_input(""));
    }

    #[test]
    fn test_invalid_control_chars() {
        assert!(!validate_string_input("hello\x00world"));
        assert!(!validate_string_input("hello\tworld"));
        assert!(!validate_string_input("\x1b[31mred\x1b[0m"));
    }

    #[test]
    fn test_invalid_non_ascii() {
        assert!(!validate_string_input("caf\u{e9}"));
        assert!(!validate_string_input("\u{1f680}"));
    }

    #[test]
    fn test_court_name_bounds() {
        assert!(validate_court_name("main").is_ok());
        assert!(validate_court_name(&"a".repeat(MAX_COURT_NAME_LEN)).is_ok());
        assert_court_error(validate_court_name(""), CourtError::InvalidCourtName);
        assert_court_error(
            validate_court_name(&"a".repeat(MAX_COURT_NAME_LEN + 1)),
            CourtError::InvalidCourtName,
        );
        assert_court_error(validate_court_name("bad\nname"), CourtError::InvalidCourtName);
    }

    #[test]
    fn test_evidence_bounds() {
        assert!(validate_evidence("").is_ok());
        assert!(validate_evidence(&"x".repeat(MAX_EVIDENCE_LEN)).is_ok());
        assert_court_error(
            validate_evidence(&"x".repeat(MAX_EVIDENCE_LEN + 1)),
            CourtError::InvalidEvidence,
        );
    }

    #[test]
    fn test_max_parties_bounds() {
        assert!(validate_max_parties(1).is_ok());
        assert!(validate_max_parties(MAX_PARTIES_PER_DISPUTE).is_ok());
        assert_court_error(validate_max_parties(0), CourtError::InvalidConfiguration);
        assert_court_error(
            validate_max_parties(MAX_PARTIES_PER_DISPUTE + 1),
            CourtError::InvalidConfiguration,
        );
        assert_court_error(validate_max_parties(u16::MAX), CourtError::InvalidConfiguration);
    }
}
