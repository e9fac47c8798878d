//! Fuzz target for complete dispute lifecycles
//!
//! Tests invariants:
//! - Every step of a well-formed dispute succeeds
//! - Vault balances match the books after every step
//! - A conclusive dispute drains its vaults once every entry is claimed
//! - An inconclusive dispute refunds every stake and keeps the protocol seed
//! - The winner is the unique top-voted party
//!
//! Run with: cargo test --release -p agora-court-fuzz dispute_lifecycle

use crate::*;
use proptest::prelude::*;

fn expected_winner(input: &LifecycleInput) -> Option<u8> {
    let mut tallies = vec![0u64; input.parties as usize];
    for ballot in input.ballots.iter().filter(|b| b.reveals) {
        tallies[ballot.candidate as usize] += 1;
    }
    let total: u64 = tallies.iter().sum();
    let top = *tallies.iter().max()?;
    if total < input.config.min_votes || top == 0 {
        return None;
    }
    let leaders: Vec<usize> = (0..tallies.len()).filter(|&i| tallies[i] == top).collect();
    match leaders.as_slice() {
        [only] => Some(*only as u8),
        _ => None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn fuzz_dispute_lifecycle(input in any::<LifecycleInput>()) {
        let mut court = SimulatedCourt::open(input.config, input.parties as u16, &input.balances())
            .expect("valid configuration");
        let operations = scripted_lifecycle(&input.config, input.parties, &input.ballots, &input.claim_order);

        for operation in &operations {
            let result = court.apply(operation);
            prop_assert!(result.is_success(), "{:?} -> {:?}", operation, result);
        }

        let winner = expected_winner(&input).map(participant);
        prop_assert_eq!(court.dispute.winner(), winner);

        let vault_rep = court.reputation.balance(&VAULT);
        let vault_pay = court.payment.balance(&VAULT);
        if winner.is_some() {
            prop_assert_eq!(vault_rep, 0);
            prop_assert_eq!(vault_pay, 0);
        } else {
            prop_assert_eq!(vault_rep, input.config.protocol_rep);
            prop_assert_eq!(vault_pay, input.config.protocol_pay);
        }

        for record in court.records.values() {
            prop_assert!(record.claim_queue.is_empty());
            prop_assert_eq!(record.currently_staked_rep, 0);
            prop_assert_eq!(record.currently_staked_pay, 0);
        }
        prop_assert_eq!(court.dispute.winning_claims_remaining, 0);
    }

    /// Nobody who voted against the winner or lost the dispute gains anything
    #[test]
    fn fuzz_only_correct_voters_profit(input in any::<LifecycleInput>()) {
        let balances = input.balances();
        let mut court = SimulatedCourt::open(input.config, input.parties as u16, &balances)
            .expect("valid configuration");
        let operations = scripted_lifecycle(&input.config, input.parties, &input.ballots, &input.claim_order);
        prop_assert!(court.run(&operations).is_success());

        for (key, settlement, _) in &court.settlements {
            let index = (0..balances.len()).find(|&i| participant(i as u8) == *key).unwrap();
            let start = balances[index].0;
            let end = court.reputation.balance(key);
            match settlement {
                Settlement::Refund => prop_assert_eq!(end, start),
                Settlement::Forfeit => prop_assert!(end <= start),
                Settlement::Reward => prop_assert!(end >= start),
            }
        }
    }
}

#[test]
fn test_tie_refunds_everyone() {
    let config = agora_court::state::DisputeConfiguration {
        grace_ends_at: GRACE_ENDS_AT,
        init_cases_ends_at: INIT_CASES_ENDS_AT,
        commit_ends_at: COMMIT_ENDS_AT,
        reveal_ends_at: REVEAL_ENDS_AT,
        voter_rep_required: 0,
        voter_rep_cost: 2,
        party_rep_cost: 10,
        party_pay_cost: 3,
        min_votes: 0,
        protocol_rep: 7,
        protocol_pay: 1,
    };
    let ballots = [
        Ballot { candidate: 0, salt: "a".into(), reveals: true },
        Ballot { candidate: 1, salt: "b".into(), reveals: true },
    ];
    let balances = [(10, 3), (10, 3), (2, 0), (2, 0)];
    let mut court = SimulatedCourt::open(config, 2, &balances).unwrap();
    let ops = scripted_lifecycle(&config, 2, &ballots, &[3, 2, 1, 0]);
    assert!(court.run(&ops).is_success());

    assert_eq!(court.dispute.winner(), None);
    for (i, (rep, pay)) in balances.iter().enumerate() {
        assert_eq!(court.reputation.balance(&participant(i as u8)), *rep);
        assert_eq!(court.payment.balance(&participant(i as u8)), *pay);
    }
    assert_eq!(court.reputation.balance(&VAULT), 7);
}
