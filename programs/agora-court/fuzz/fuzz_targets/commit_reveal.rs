//! Fuzz target for commit-reveal voting
//!
//! Tests invariants:
//! - A reveal succeeds only with the committed candidate and salt
//! - A failed reveal leaves the tally and the entry unchanged
//! - A vote can be revealed once
//!
//! Run with: cargo test --release -p agora-court-fuzz commit_reveal

use crate::*;
use agora_court::state::{Commitment, DisputeConfiguration};
use proptest::prelude::*;

const VOTER: u8 = 2;

fn voting_court(candidate: u8, salt: &str) -> SimulatedCourt {
    let config = DisputeConfiguration {
        grace_ends_at: GRACE_ENDS_AT,
        init_cases_ends_at: INIT_CASES_ENDS_AT,
        commit_ends_at: COMMIT_ENDS_AT,
        reveal_ends_at: REVEAL_ENDS_AT,
        voter_rep_required: 1,
        voter_rep_cost: 1,
        party_rep_cost: 5,
        min_votes: 1,
        protocol_rep: 3,
        ..Default::default()
    };
    let mut court = SimulatedCourt::open(config, 2, &[(5, 0), (5, 0), (1, 0)]).unwrap();
    let setup = [
        Operation::Interact { actor: 0 },
        Operation::Interact { actor: 1 },
        Operation::SubmitCase { actor: 0 },
        Operation::SubmitCase { actor: 1 },
        Operation::Commit { voter: VOTER, candidate, salt: salt.to_string() },
        Operation::Advance { to: COMMIT_ENDS_AT },
    ];
    for operation in &setup {
        assert!(court.apply(operation).is_success(), "{:?}", operation);
    }
    court
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn fuzz_reveal_soundness(input in any::<CommitRevealInput>()) {
        let mut court = voting_court(input.candidate, &input.salt);
        let entry_before = *court.records[&participant(VOTER)].entry(0).unwrap();

        let result = court.apply(&Operation::Reveal {
            voter: VOTER,
            candidate: input.revealed_candidate,
            salt: input.revealed_salt.clone(),
        });

        let honest = input.revealed_candidate == input.candidate && input.revealed_salt == input.salt;
        if honest {
            prop_assert!(result.is_success());
            prop_assert_eq!(court.dispute.total_revealed_votes, 1);
            prop_assert_eq!(
                court.records[&participant(VOTER)].entry(0).unwrap().commitment,
                Commitment::Revealed { candidate: participant(input.candidate) }
            );
            let again = court.apply(&Operation::Reveal {
                voter: VOTER,
                candidate: input.revealed_candidate,
                salt: input.revealed_salt,
            });
            prop_assert!(again.is_error());
            prop_assert_eq!(court.dispute.total_revealed_votes, 1);
        } else {
            prop_assert!(result.is_error());
            prop_assert_eq!(court.dispute.total_revealed_votes, 0);
            prop_assert_eq!(*court.records[&participant(VOTER)].entry(0).unwrap(), entry_before);
        }
    }

    /// Reveals outside [commit_ends_at, reveal_ends_at] are rejected
    #[test]
    fn fuzz_reveal_window(at in arb_timestamp()) {
        let mut court = voting_court(0, "salt");
        court.now = at;
        let result = court.apply(&Operation::Reveal {
            voter: VOTER,
            candidate: 0,
            salt: "salt".to_string(),
        });
        let in_window = (COMMIT_ENDS_AT..=REVEAL_ENDS_AT).contains(&at);
        prop_assert_eq!(result.is_success(), in_window);
    }
}
