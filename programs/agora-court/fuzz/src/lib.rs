//! Property-based fuzz testing library for Agora Court
//!
//! Drives the program's state machine and settlement engine through a
//! simulated token ledger and checks protocol invariants after every step.
//!
//! # Usage
//!
//! ```bash
//! # Run all property-based tests
//! cargo test --release -p agora-court-fuzz
//!
//! # Run the fuzz test runner
//! cargo run --release -p agora-court-fuzz
//!
//! # Run with more iterations
//! PROPTEST_CASES=10000 cargo test --release -p agora-court-fuzz
//! ```

pub mod arbitrary;
pub mod invariants;
pub mod scenarios;

pub use agora_court::instructions::settlement_helpers::Settlement;
pub use arbitrary::*;
pub use invariants::*;
pub use scenarios::*;

// Include fuzz targets as test modules
#[cfg(test)]
#[path = "../fuzz_targets/dispute_lifecycle.rs"]
mod dispute_lifecycle_tests;

#[cfg(test)]
#[path = "../fuzz_targets/random_operations.rs"]
mod random_operations_tests;

#[cfg(test)]
#[path = "../fuzz_targets/commit_reveal.rs"]
mod commit_reveal_tests;
