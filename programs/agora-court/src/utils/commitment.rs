//! Blind-vote commitments
//!
//! A voter commits to `keccak256(candidate ‖ salt)` and later discloses the
//! candidate and salt. The salt is hashed as its UTF-8 bytes.

use crate::state::HASH_SIZE;
use anchor_lang::prelude::*;
use solana_keccak_hasher::hashv;

/// Computes the commitment a voter submits for `candidate` with `salt`.
pub fn compute_commitment(candidate: &Pubkey, salt: &str) -> [u8; HASH_SIZE] {
    hashv(&[candidate.as_ref(), salt.as_bytes()]).to_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::key;

    #[test]
    fn test_deterministic() {
        assert_eq!(
            compute_commitment(&key(1), "salt"),
            compute_commitment(&key(1), "salt")
        );
    }

    #[test]
    fn test_binds_candidate_and_salt() {
        let base = compute_commitment(&key(1), "salt");
        assert_ne!(base, compute_commitment(&key(2), "salt"));
        assert_ne!(base, compute_commitment(&key(1), "salt2"));
        assert_ne!(base, compute_commitment(&key(1), ""));
    }

    #[test]
    fn test_matches_keccak_of_concatenation() {
        let mut preimage = key(3).to_bytes().to_vec();
        preimage.extend_from_slice(b"pepper");
        assert_eq!(
            compute_commitment(&key(3), "pepper"),
            solana_keccak_hasher::hash(&preimage).to_bytes()
        );
    }

    #[test]
    fn test_known_keccak_vector() {
        // keccak256 of 32 zero bytes
        let expected: [u8; 32] = [
            0x29, 0x0d, 0xec, 0xd9, 0x54, 0x8b, 0x62, 0xa8, 0xd6, 0x03, 0x45, 0xa9, 0x88, 0x38,
            0x6f, 0xc8, 0x4b, 0xa6, 0xbc, 0x95, 0x48, 0x40, 0x08, 0xf6, 0x36, 0x2f, 0x93, 0x16,
            0x0e, 0xf3, 0xe5, 0x63,
        ];
        assert_eq!(compute_commitment(&Pubkey::default(), ""), expected);
    }
}
