//! Fuzz target for arbitrary operation sequences
//!
//! Throws interleaved, mostly invalid operations at a dispute. Operations
//! may fail, but no sequence may break an invariant, and failures must leave
//! the dispute untouched.
//!
//! Run with: cargo test --release -p agora-court-fuzz random_operations

use crate::*;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn fuzz_random_operations(input in any::<OperationsInput>()) {
        let mut court = SimulatedCourt::open(input.config, input.max_parties, &input.balances)
            .expect("valid configuration");

        for operation in &input.operations {
            let before = court.dispute.clone();
            let result = court.apply(operation);
            prop_assert!(!result.is_invariant_violation(), "{:?} -> {:?}", operation, result);
            if result.is_error() {
                prop_assert_eq!(format!("{:?}", court.dispute), format!("{:?}", before));
            }
        }
    }

    /// Every successful claim consumes the entry; claiming again always fails
    #[test]
    fn fuzz_claims_are_single_use(input in any::<OperationsInput>()) {
        let mut court = SimulatedCourt::open(input.config, input.max_parties, &input.balances)
            .expect("valid configuration");
        prop_assert!(court.run(&input.operations).is_success());

        court.apply(&Operation::Advance { to: REVEAL_ENDS_AT });
        court.apply(&Operation::Close);
        prop_assert!(court.dispute.is_concluded());

        for actor in 0..MAX_PARTICIPANTS {
            court.apply(&Operation::Claim { actor });
            let again = court.apply(&Operation::Claim { actor });
            prop_assert!(again.is_error());
        }
        for record in court.records.values() {
            prop_assert!(record.entry(court.dispute.id).is_none());
        }
    }

    /// Phases only advance while the clock moves forward
    #[test]
    fn fuzz_phase_monotonic(input in any::<OperationsInput>()) {
        let mut court = SimulatedCourt::open(input.config, input.max_parties, &input.balances)
            .expect("valid configuration");
        let mut rank = court.dispute.status.rank();
        for operation in &input.operations {
            court.apply(operation);
            let next = court.dispute.status.rank();
            prop_assert!(next >= rank);
            rank = next;
        }
    }
}
