//! Arbitrary input generators for fuzz testing
//!
//! Deadlines are fixed so that generated operations land in every window;
//! costs and balances stay small so sums never overflow.

use crate::scenarios::{Ballot, Operation};
use agora_court::state::DisputeConfiguration;
use proptest::prelude::*;

pub const GRACE_ENDS_AT: i64 = 100;
pub const INIT_CASES_ENDS_AT: i64 = 200;
pub const COMMIT_ENDS_AT: i64 = 300;
pub const REVEAL_ENDS_AT: i64 = 400;

/// Number of distinct participants generated operations refer to
pub const MAX_PARTICIPANTS: u8 = 8;

/// Arbitrary stake amount with edge cases
pub fn arb_cost() -> impl Strategy<Value = u64> {
    prop_oneof![Just(0u64), Just(1u64), 2u64..50u64]
}

/// Arbitrary salt, including the empty string
pub fn arb_salt() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[a-z0-9]{1,12}"]
}

/// Arbitrary timestamp around the dispute's windows
pub fn arb_timestamp() -> impl Strategy<Value = i64> {
    prop_oneof![
        Just(GRACE_ENDS_AT),
        Just(INIT_CASES_ENDS_AT - 1),
        Just(INIT_CASES_ENDS_AT),
        Just(COMMIT_ENDS_AT - 1),
        Just(COMMIT_ENDS_AT),
        Just(REVEAL_ENDS_AT),
        Just(REVEAL_ENDS_AT + 1),
        0i64..500i64,
    ]
}

/// Arbitrary dispute configuration with the fixed deadlines
pub fn arb_configuration() -> impl Strategy<Value = DisputeConfiguration> {
    (
        0u64..40u64,
        arb_cost(),
        arb_cost(),
        arb_cost(),
        0u64..4u64,
        arb_cost(),
        arb_cost(),
    )
        .prop_map(
            |(
                voter_rep_required,
                voter_rep_cost,
                party_rep_cost,
                party_pay_cost,
                min_votes,
                protocol_rep,
                protocol_pay,
            )| DisputeConfiguration {
                grace_ends_at: GRACE_ENDS_AT,
                init_cases_ends_at: INIT_CASES_ENDS_AT,
                commit_ends_at: COMMIT_ENDS_AT,
                reveal_ends_at: REVEAL_ENDS_AT,
                voter_rep_required,
                voter_rep_cost,
                party_rep_cost,
                party_pay_cost,
                min_votes,
                protocol_rep,
                protocol_pay,
            },
        )
}

pub fn arb_participant() -> impl Strategy<Value = u8> {
    0u8..MAX_PARTICIPANTS
}

/// Arbitrary operation, valid or not
pub fn arb_operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => arb_participant().prop_map(|actor| Operation::Interact { actor }),
        3 => arb_participant().prop_map(|actor| Operation::SubmitCase { actor }),
        3 => (arb_participant(), arb_participant(), arb_salt())
            .prop_map(|(voter, candidate, salt)| Operation::Commit { voter, candidate, salt }),
        3 => (arb_participant(), arb_participant(), arb_salt())
            .prop_map(|(voter, candidate, salt)| Operation::Reveal { voter, candidate, salt }),
        1 => Just(Operation::Close),
        2 => arb_participant().prop_map(|actor| Operation::Claim { actor }),
        2 => arb_timestamp().prop_map(|to| Operation::Advance { to }),
    ]
}

/// Arbitrary ballot for one of `parties` parties
pub fn arb_ballot(parties: u8) -> impl Strategy<Value = Ballot> {
    (0..parties, arb_salt(), prop::bool::weighted(0.85)).prop_map(
        |(candidate, salt, reveals)| Ballot {
            candidate,
            salt,
            reveals,
        },
    )
}

/// Input for a complete, well-formed dispute
#[derive(Debug, Clone)]
pub struct LifecycleInput {
    pub config: DisputeConfiguration,
    pub parties: u8,
    pub ballots: Vec<Ballot>,
    /// Every participant index exactly once
    pub claim_order: Vec<u8>,
}

impl LifecycleInput {
    /// Starting balances that cover every stake and the holding requirement.
    pub fn balances(&self) -> Vec<(u64, u64)> {
        let party = (self.config.party_rep_cost, self.config.party_pay_cost);
        let voter = (
            self.config
                .voter_rep_cost
                .max(self.config.voter_rep_required),
            0,
        );
        (0..self.parties)
            .map(|_| party)
            .chain(self.ballots.iter().map(|_| voter))
            .collect()
    }
}

impl Arbitrary for LifecycleInput {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (arb_configuration(), 1u8..=4u8)
            .prop_flat_map(|(config, parties)| {
                (
                    Just(config),
                    Just(parties),
                    prop::collection::vec(arb_ballot(parties), 0..8),
                )
            })
            .prop_flat_map(|(config, parties, ballots)| {
                let participants = parties + ballots.len() as u8;
                let order: Vec<u8> = (0..participants).collect();
                (
                    Just(config),
                    Just(parties),
                    Just(ballots),
                    Just(order).prop_shuffle(),
                )
            })
            .prop_map(|(config, parties, ballots, claim_order)| LifecycleInput {
                config,
                parties,
                ballots,
                claim_order,
            })
            .boxed()
    }
}

/// Input for an arbitrary operation sequence
#[derive(Debug, Clone)]
pub struct OperationsInput {
    pub config: DisputeConfiguration,
    pub max_parties: u16,
    pub balances: Vec<(u64, u64)>,
    pub operations: Vec<Operation>,
}

impl Arbitrary for OperationsInput {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            arb_configuration(),
            1u16..=4u16,
            prop::collection::vec((0u64..80u64, 0u64..80u64), MAX_PARTICIPANTS as usize),
            prop::collection::vec(arb_operation(), 1..60),
        )
            .prop_map(|(config, max_parties, balances, operations)| OperationsInput {
                config,
                max_parties,
                balances,
                operations,
            })
            .boxed()
    }
}

/// Input for commit-reveal soundness checks
#[derive(Debug, Clone)]
pub struct CommitRevealInput {
    pub candidate: u8,
    pub salt: String,
    pub revealed_candidate: u8,
    pub revealed_salt: String,
}

impl Arbitrary for CommitRevealInput {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (0u8..2u8, arb_salt(), 0u8..3u8, arb_salt(), prop::bool::ANY)
            .prop_map(|(candidate, salt, other_candidate, other_salt, honest)| {
                if honest {
                    CommitRevealInput {
                        candidate,
                        revealed_candidate: candidate,
                        revealed_salt: salt.clone(),
                        salt,
                    }
                } else {
                    CommitRevealInput {
                        candidate,
                        salt,
                        revealed_candidate: other_candidate,
                        revealed_salt: other_salt,
                    }
                }
            })
            .boxed()
    }
}
