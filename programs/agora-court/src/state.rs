//! Account state structures for the Agora Court program

use crate::errors::CourtError;
use crate::instructions::constants::MAX_EVIDENCE_LEN;
use crate::utils::commitment::compute_commitment;
use anchor_lang::prelude::*;
use std::collections::BTreeMap;

// ============================================================================
// Size Constants
// ============================================================================

/// Size of commitment hashes
pub const HASH_SIZE: usize = 32;

/// Dispute phase.
///
/// Phases only move forward: Grace → Waiting → Voting → Reveal → Concluded.
/// A dispute may be closed from any earlier phase once the reveal deadline
/// has passed, which skips straight to `Concluded`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, Debug, InitSpace)]
pub enum DisputeStatus {
    /// Parties may join; no case submitted yet
    #[default]
    Grace,
    /// At least one case submitted, waiting on the rest
    Waiting,
    /// Every joined party submitted a case; commitments accepted
    Voting,
    /// At least one commitment has been revealed
    Reveal,
    /// Terminal. `winner` is `None` for an inconclusive dispute.
    Concluded { winner: Option<Pubkey> },
}

impl DisputeStatus {
    pub const SIZE: usize = 1 + 1 + 32;

    /// Validates whether a status transition is allowed.
    ///
    /// Valid transitions:
    /// - Grace → Waiting (first case submitted)
    /// - Waiting → Voting (all joined parties submitted a case)
    /// - Voting → Reveal (first reveal)
    /// - any non-terminal phase → Concluded (close after the reveal deadline)
    ///
    /// Concluded is absorbing.
    pub fn can_transition_to(&self, next: DisputeStatus) -> bool {
        use DisputeStatus::*;
        matches!(
            (self, next),
            (Grace, Waiting)
                | (Waiting, Voting)
                | (Voting, Reveal)
                | (Grace, Concluded { .. })
                | (Waiting, Concluded { .. })
                | (Voting, Concluded { .. })
                | (Reveal, Concluded { .. })
        )
    }

    /// Position of the phase in the lifecycle, used for monotonicity checks.
    pub fn rank(&self) -> u8 {
        match self {
            DisputeStatus::Grace => 0,
            DisputeStatus::Waiting => 1,
            DisputeStatus::Voting => 2,
            DisputeStatus::Reveal => 3,
            DisputeStatus::Concluded { .. } => 4,
        }
    }

    pub fn is_concluded(&self) -> bool {
        matches!(self, DisputeStatus::Concluded { .. })
    }
}

/// Court account. Owns configuration and the dispute counter.
/// PDA seeds: ["court", court_name]
#[account]
#[derive(Default, Debug, InitSpace)]
pub struct Court {
    /// Can edit the court
    pub edit_authority: Pubkey,
    /// Must sign every dispute creation; funds the protocol seed
    pub protocol: Pubkey,
    /// Reputation asset staked by parties and voters
    pub reputation_mint: Pubkey,
    /// Optional payment asset staked by parties
    pub payment_mint: Option<Pubkey>,
    /// Next dispute id. Never reused.
    pub dispute_counter: u64,
    /// Maximum number of parties in a dispute created under this court
    pub max_votes_per_dispute: u16,
    /// Bump seed
    pub bump: u8,
}

impl Court {
    pub const SIZE: usize = 8 + // discriminator
        32 + // edit_authority
        32 + // protocol
        32 + // reputation_mint
        (1 + 32) + // payment_mint
        8 +  // dispute_counter
        2 +  // max_votes_per_dispute
        1; // bump

    /// Hands out the next dispute id and advances the counter.
    pub fn next_dispute_id(&mut self) -> Result<u64> {
        let id = self.dispute_counter;
        self.dispute_counter = self
            .dispute_counter
            .checked_add(1)
            .ok_or(CourtError::ArithmeticOverflow)?;
        Ok(id)
    }
}

/// Immutable per-dispute configuration, supplied wholesale at creation.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, Debug, InitSpace)]
pub struct DisputeConfiguration {
    pub grace_ends_at: i64,
    /// Last moment (exclusive) to join or submit a case
    pub init_cases_ends_at: i64,
    /// Last moment (exclusive) to commit a vote; reveals open here
    pub commit_ends_at: i64,
    /// Reveals close (inclusive); the dispute can be closed from here on
    pub reveal_ends_at: i64,
    /// Minimum holding to be eligible to vote
    pub voter_rep_required: u64,
    /// Reputation staked per vote (may be zero)
    pub voter_rep_cost: u64,
    /// Reputation staked by each party
    pub party_rep_cost: u64,
    /// Payment asset staked by each party
    pub party_pay_cost: u64,
    /// Revealed votes needed for a conclusive result
    pub min_votes: u64,
    /// Reputation seeded into the vault by the protocol
    pub protocol_rep: u64,
    /// Payment asset seeded into the vault by the protocol
    pub protocol_pay: u64,
}

impl DisputeConfiguration {
    pub const SIZE: usize = 4 * 8 + 7 * 8;

    /// Deadlines must be strictly increasing and still ahead of `now`.
    pub fn validate(&self, now: i64) -> Result<()> {
        require!(
            now < self.grace_ends_at
                && self.grace_ends_at < self.init_cases_ends_at
                && self.init_cases_ends_at < self.commit_ends_at
                && self.commit_ends_at < self.reveal_ends_at,
            CourtError::InvalidConfiguration
        );
        Ok(())
    }

    pub fn uses_payment(&self) -> bool {
        self.party_pay_cost > 0 || self.protocol_pay > 0
    }
}

/// A participant that joined a dispute as a party
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, Debug, InitSpace)]
pub struct Party {
    pub key: Pubkey,
    /// Revealed votes for this party's case
    pub votes: u64,
    pub case_submitted: bool,
}

impl Party {
    pub const SIZE: usize = 32 + 8 + 1;
}

/// Dispute account
/// PDA seeds: ["dispute", court, dispute_id (big-endian)]
///
/// Owns the escrow vaults (associated token accounts of this PDA). The
/// `*_escrowed` counters track everything deposited into the vaults and the
/// `*_paid_out` counters everything the settlement engine released, so the
/// vault balance always equals `escrowed - paid_out`.
#[account]
#[derive(Default, Debug)]
pub struct Dispute {
    pub id: u64,
    pub court: Pubkey,
    /// Snapshot of the court's reputation mint at creation
    pub reputation_mint: Pubkey,
    /// Snapshot of the court's payment mint at creation
    pub payment_mint: Option<Pubkey>,
    /// Snapshot of the court's party cap at creation
    pub max_parties: u16,
    /// Append-only, in join order
    pub parties: Vec<Party>,
    pub status: DisputeStatus,
    pub interactions: u16,
    pub submitted_cases: u16,
    pub total_revealed_votes: u64,
    pub config: DisputeConfiguration,
    pub reputation_escrowed: u64,
    pub payment_escrowed: u64,
    pub reputation_paid_out: u64,
    pub payment_paid_out: u64,
    /// Set at conclusion: reputation shared among correct voters
    pub reputation_reward_pool: u64,
    /// Set at conclusion: payment asset shared among correct voters
    pub payment_reward_pool: u64,
    /// Correct-voter entries that have not claimed yet
    pub winning_claims_remaining: u64,
    pub created_at: i64,
    pub concluded_at: i64,
    pub bump: u8,
}

impl Dispute {
    /// Account space for a dispute that can hold `max_parties` parties.
    pub fn space(max_parties: u16) -> usize {
        8 + // discriminator
        8 +  // id
        32 + // court
        32 + // reputation_mint
        (1 + 32) + // payment_mint
        2 +  // max_parties
        (4 + Party::SIZE * max_parties as usize) + // parties
        DisputeStatus::SIZE + // status
        2 +  // interactions
        2 +  // submitted_cases
        8 +  // total_revealed_votes
        DisputeConfiguration::SIZE + // config
        8 +  // reputation_escrowed
        8 +  // payment_escrowed
        8 +  // reputation_paid_out
        8 +  // payment_paid_out
        8 +  // reputation_reward_pool
        8 +  // payment_reward_pool
        8 +  // winning_claims_remaining
        8 +  // created_at
        8 +  // concluded_at
        1 // bump
    }

    pub fn party_index(&self, key: &Pubkey) -> Option<usize> {
        self.parties.iter().position(|party| party.key == *key)
    }

    pub fn is_party(&self, key: &Pubkey) -> bool {
        self.party_index(key).is_some()
    }

    /// Winner of a concluded dispute; `None` while open or when inconclusive.
    pub fn winner(&self) -> Option<Pubkey> {
        match self.status {
            DisputeStatus::Concluded { winner } => winner,
            _ => None,
        }
    }

    pub fn is_concluded(&self) -> bool {
        self.status.is_concluded()
    }

    fn transition(&mut self, next: DisputeStatus) -> Result<()> {
        require!(
            self.status.can_transition_to(next),
            CourtError::InvalidPhase
        );
        self.status = next;
        Ok(())
    }

    fn require_case_window(&self, now: i64) -> Result<()> {
        require!(
            matches!(self.status, DisputeStatus::Grace | DisputeStatus::Waiting),
            CourtError::InvalidPhase
        );
        require!(
            now < self.config.init_cases_ends_at,
            CourtError::InvalidPhase
        );
        Ok(())
    }

    /// Registers `actor` as a party. Does not move any funds.
    pub fn register_party(&mut self, actor: Pubkey, now: i64) -> Result<()> {
        require!(!self.is_party(&actor), CourtError::DuplicateParticipation);
        require!(
            self.parties.len() < self.max_parties as usize,
            CourtError::CapacityExceeded
        );
        self.require_case_window(now)?;

        self.parties.push(Party {
            key: actor,
            votes: 0,
            case_submitted: false,
        });
        self.interactions = self
            .interactions
            .checked_add(1)
            .ok_or(CourtError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Records `actor`'s case and applies the Grace → Waiting and
    /// Waiting → Voting transitions.
    pub fn submit_case(&mut self, actor: &Pubkey, now: i64) -> Result<()> {
        let index = self.party_index(actor).ok_or(CourtError::NotAParty)?;
        require!(
            !self.parties[index].case_submitted,
            CourtError::DuplicateParticipation
        );
        self.require_case_window(now)?;

        self.parties[index].case_submitted = true;
        self.submitted_cases = self
            .submitted_cases
            .checked_add(1)
            .ok_or(CourtError::ArithmeticOverflow)?;

        if self.status == DisputeStatus::Grace {
            self.transition(DisputeStatus::Waiting)?;
        }
        if self.submitted_cases == self.interactions {
            self.transition(DisputeStatus::Voting)?;
        }
        Ok(())
    }

    pub fn require_commit_window(&self, now: i64) -> Result<()> {
        require!(
            self.status == DisputeStatus::Voting,
            CourtError::InvalidPhase
        );
        require!(now < self.config.commit_ends_at, CourtError::InvalidPhase);
        Ok(())
    }

    pub fn require_reveal_window(&self, now: i64) -> Result<()> {
        require!(
            matches!(self.status, DisputeStatus::Voting | DisputeStatus::Reveal),
            CourtError::InvalidPhase
        );
        require!(
            now >= self.config.commit_ends_at && now <= self.config.reveal_ends_at,
            CourtError::InvalidPhase
        );
        Ok(())
    }

    /// Index of `candidate` if it is a party with a submitted case.
    pub fn candidate_index(&self, candidate: &Pubkey) -> Result<usize> {
        self.party_index(candidate)
            .filter(|&index| self.parties[index].case_submitted)
            .ok_or_else(|| error!(CourtError::UnknownCandidate))
    }

    /// Tallies a revealed vote. The first reveal opens the Reveal phase.
    /// Returns the candidate's new tally.
    pub fn record_reveal(&mut self, candidate: &Pubkey) -> Result<u64> {
        let index = self.candidate_index(candidate)?;

        let votes = self.parties[index]
            .votes
            .checked_add(1)
            .ok_or(CourtError::ArithmeticOverflow)?;
        self.parties[index].votes = votes;
        self.total_revealed_votes = self
            .total_revealed_votes
            .checked_add(1)
            .ok_or(CourtError::ArithmeticOverflow)?;

        if self.status == DisputeStatus::Voting {
            self.transition(DisputeStatus::Reveal)?;
        }
        Ok(votes)
    }

    /// Adds a deposit into the escrow vaults to the books.
    pub fn record_deposit(&mut self, reputation: u64, payment: u64) -> Result<()> {
        self.reputation_escrowed = self
            .reputation_escrowed
            .checked_add(reputation)
            .ok_or(CourtError::ArithmeticOverflow)?;
        self.payment_escrowed = self
            .payment_escrowed
            .checked_add(payment)
            .ok_or(CourtError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Adds a payout from the escrow vaults to the books. Paying out more than
    /// was ever escrowed is an accounting bug.
    pub fn record_payout(&mut self, reputation: u64, payment: u64) -> Result<()> {
        let reputation_paid_out = self
            .reputation_paid_out
            .checked_add(reputation)
            .ok_or(CourtError::ArithmeticOverflow)?;
        let payment_paid_out = self
            .payment_paid_out
            .checked_add(payment)
            .ok_or(CourtError::ArithmeticOverflow)?;
        require!(
            reputation_paid_out <= self.reputation_escrowed
                && payment_paid_out <= self.payment_escrowed,
            CourtError::InsufficientVaultFunds
        );
        self.reputation_paid_out = reputation_paid_out;
        self.payment_paid_out = payment_paid_out;
        Ok(())
    }

    /// Reputation currently held in escrow according to the books.
    pub fn reputation_in_vault(&self) -> u64 {
        self.reputation_escrowed
            .saturating_sub(self.reputation_paid_out)
    }

    /// Payment asset currently held in escrow according to the books.
    pub fn payment_in_vault(&self) -> u64 {
        self.payment_escrowed.saturating_sub(self.payment_paid_out)
    }

    /// The single party with the strictly greatest nonzero tally, provided
    /// enough votes were revealed.
    pub fn leading_party(&self) -> Option<&Party> {
        if self.total_revealed_votes < self.config.min_votes {
            return None;
        }
        let top = self.parties.iter().map(|party| party.votes).max()?;
        if top == 0 {
            return None;
        }
        let mut leaders = self.parties.iter().filter(|party| party.votes == top);
        match (leaders.next(), leaders.next()) {
            (Some(leader), None) => Some(leader),
            _ => None,
        }
    }

    /// Closes the dispute, fixing the winner and snapshotting the reward
    /// pools the settlement engine splits among correct voters.
    pub fn conclude(&mut self, now: i64) -> Result<Option<Pubkey>> {
        require!(!self.is_concluded(), CourtError::InvalidPhase);
        require!(now >= self.config.reveal_ends_at, CourtError::InvalidPhase);

        let leader = self.leading_party().copied();
        let winner = leader.map(|party| party.key);

        if let Some(leader) = leader {
            let voter_stakes = leader
                .votes
                .checked_mul(self.config.voter_rep_cost)
                .ok_or(CourtError::ArithmeticOverflow)?;
            self.reputation_reward_pool = self
                .reputation_escrowed
                .checked_sub(self.config.party_rep_cost)
                .and_then(|rest| rest.checked_sub(voter_stakes))
                .ok_or(CourtError::InsufficientVaultFunds)?;
            self.payment_reward_pool = self
                .payment_escrowed
                .checked_sub(self.config.party_pay_cost)
                .ok_or(CourtError::InsufficientVaultFunds)?;
            self.winning_claims_remaining = leader.votes;
        }

        self.transition(DisputeStatus::Concluded { winner })?;
        self.concluded_at = now;
        Ok(winner)
    }
}

/// Case account, one per party
/// PDA seeds: ["case", dispute, owner]
#[account]
#[derive(Default, Debug)]
pub struct Case {
    pub dispute: Pubkey,
    pub owner: Pubkey,
    pub votes: u64,
    pub evidence: String,
    pub bump: u8,
}

impl Case {
    /// Sized for the longest evidence so a resubmission with different
    /// evidence still reaches the duplicate check.
    pub const SIZE: usize = 8 + // discriminator
        32 + // dispute
        32 + // owner
        8 +  // votes
        (4 + MAX_EVIDENCE_LEN) + // evidence
        1; // bump
}

/// How a claim entry voted
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum Commitment {
    /// Blind vote: hash(candidate ‖ salt)
    Committed { hash: [u8; HASH_SIZE] },
    /// Disclosed vote. Parties hold `Revealed` for themselves.
    Revealed { candidate: Pubkey },
}

/// Pending settlement for one dispute
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub struct ClaimEntry {
    pub dispute_id: u64,
    pub dispute_end_time: i64,
    pub staked_reputation: u64,
    pub staked_payment: u64,
    pub commitment: Commitment,
}

impl ClaimEntry {
    pub const SIZE: usize = 8 + 8 + 8 + 8 + (1 + 32);
}

/// Per-(court, participant) stake ledger and claim queue
/// PDA seeds: ["record", court, owner]
///
/// `currently_staked_rep` and `currently_staked_pay` always equal the sums of
/// the stakes recorded on the queued entries. Dispute ids are handed out in
/// creation order, so the queue iterates oldest dispute first.
#[account]
#[derive(Default, Debug)]
pub struct VoterRecord {
    pub court: Pubkey,
    pub owner: Pubkey,
    pub currently_staked_rep: u64,
    pub currently_staked_pay: u64,
    /// Keyed by dispute id; at most one entry per dispute
    pub claim_queue: BTreeMap<u64, ClaimEntry>,
    pub bump: u8,
}

impl VoterRecord {
    /// Account space for a record holding `entries` queued claims.
    pub fn space(entries: usize) -> usize {
        8 + // discriminator
        32 + // court
        32 + // owner
        8 +  // currently_staked_rep
        8 +  // currently_staked_pay
        (4 + (8 + ClaimEntry::SIZE) * entries) + // claim_queue
        1 // bump
    }

    pub fn entry(&self, dispute_id: u64) -> Option<&ClaimEntry> {
        self.claim_queue.get(&dispute_id)
    }

    pub fn has_entry(&self, dispute_id: u64) -> bool {
        self.claim_queue.contains_key(&dispute_id)
    }

    /// True when any queued dispute has passed its reveal deadline. Such
    /// stakes must be claimed before the participant joins or votes again.
    pub fn has_unclaimed_disputes(&self, now: i64) -> bool {
        self.claim_queue
            .values()
            .any(|entry| entry.dispute_end_time < now)
    }

    /// Token balance plus reputation already staked in this court.
    pub fn holding(&self, token_balance: u64) -> Result<u64> {
        token_balance
            .checked_add(self.currently_staked_rep)
            .ok_or_else(|| error!(CourtError::ArithmeticOverflow))
    }

    /// Queues `entry` and adds its stakes to the staked counters.
    pub fn push_entry(&mut self, entry: ClaimEntry) -> Result<()> {
        require!(
            !self.has_entry(entry.dispute_id),
            CourtError::DuplicateParticipation
        );
        self.currently_staked_rep = self
            .currently_staked_rep
            .checked_add(entry.staked_reputation)
            .ok_or(CourtError::ArithmeticOverflow)?;
        self.currently_staked_pay = self
            .currently_staked_pay
            .checked_add(entry.staked_payment)
            .ok_or(CourtError::ArithmeticOverflow)?;
        self.claim_queue.insert(entry.dispute_id, entry);
        Ok(())
    }

    /// Opens the blind vote queued for `dispute_id`. The entry is left
    /// untouched unless the hash matches.
    pub fn reveal(&mut self, dispute_id: u64, candidate: Pubkey, salt: &str) -> Result<()> {
        let entry = self
            .claim_queue
            .get_mut(&dispute_id)
            .ok_or(CourtError::EntryNotFound)?;

        match entry.commitment {
            Commitment::Committed { hash } => {
                require!(
                    compute_commitment(&candidate, salt) == hash,
                    CourtError::CommitmentMismatch
                );
                entry.commitment = Commitment::Revealed { candidate };
                Ok(())
            }
            Commitment::Revealed { .. } => err!(CourtError::DuplicateParticipation),
        }
    }

    /// Removes the entry for `dispute_id` and releases its stakes from the
    /// staked counters. A second call for the same dispute fails.
    pub fn take_entry(&mut self, dispute_id: u64) -> Result<ClaimEntry> {
        let entry = *self.entry(dispute_id).ok_or(CourtError::EntryNotFound)?;
        let staked_rep = self
            .currently_staked_rep
            .checked_sub(entry.staked_reputation)
            .ok_or(CourtError::ArithmeticOverflow)?;
        let staked_pay = self
            .currently_staked_pay
            .checked_sub(entry.staked_payment)
            .ok_or(CourtError::ArithmeticOverflow)?;

        self.claim_queue.remove(&dispute_id);
        self.currently_staked_rep = staked_rep;
        self.currently_staked_pay = staked_pay;
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_court_error, key};

    fn config() -> DisputeConfiguration {
        DisputeConfiguration {
            grace_ends_at: 100,
            init_cases_ends_at: 200,
            commit_ends_at: 300,
            reveal_ends_at: 400,
            voter_rep_required: 5,
            voter_rep_cost: 0,
            party_rep_cost: 15,
            party_pay_cost: 0,
            min_votes: 1,
            protocol_rep: 5,
            protocol_pay: 0,
        }
    }

    fn dispute(max_parties: u16) -> Dispute {
        Dispute {
            max_parties,
            config: config(),
            ..Default::default()
        }
    }

    fn serialized_len<T: AnchorSerialize>(value: &T) -> usize {
        let mut buf = Vec::new();
        AnchorSerialize::serialize(value, &mut buf).unwrap();
        buf.len()
    }

    mod sizes {
        use super::*;
        use crate::instructions::constants::{MAX_CPI_ACCOUNT_SIZE, MAX_PARTIES_PER_DISPUTE};

        #[test]
        fn test_court_size() {
            assert_eq!(Court::SIZE, <Court as anchor_lang::Space>::INIT_SPACE + 8);
        }

        #[test]
        fn test_status_size() {
            assert_eq!(
                DisputeStatus::SIZE,
                <DisputeStatus as anchor_lang::Space>::INIT_SPACE
            );
        }

        #[test]
        fn test_configuration_size() {
            assert_eq!(
                DisputeConfiguration::SIZE,
                <DisputeConfiguration as anchor_lang::Space>::INIT_SPACE
            );
        }

        #[test]
        fn test_party_and_entry_size() {
            assert_eq!(Party::SIZE, <Party as anchor_lang::Space>::INIT_SPACE);
            assert_eq!(ClaimEntry::SIZE, <ClaimEntry as anchor_lang::Space>::INIT_SPACE);
        }

        #[test]
        fn test_full_dispute_fits_its_space() {
            let mut full = dispute(3);
            full.payment_mint = Some(key(9));
            for i in 0..3 {
                full.parties.push(Party {
                    key: key(i),
                    votes: 1,
                    case_submitted: true,
                });
            }
            full.status = DisputeStatus::Concluded {
                winner: Some(key(1)),
            };
            assert_eq!(serialized_len(&full) + 8, Dispute::space(3));
        }

        #[test]
        fn test_largest_dispute_fits_cpi_allocation() {
            assert!(Dispute::space(MAX_PARTIES_PER_DISPUTE) <= MAX_CPI_ACCOUNT_SIZE);
            assert!(Dispute::space(MAX_PARTIES_PER_DISPUTE + 1) > MAX_CPI_ACCOUNT_SIZE);
        }

        #[test]
        fn test_record_fits_its_space() {
            let mut record = VoterRecord::default();
            for id in 0..4 {
                record
                    .push_entry(ClaimEntry {
                        dispute_id: id,
                        dispute_end_time: 0,
                        staked_reputation: 1,
                        staked_payment: 0,
                        commitment: Commitment::Revealed { candidate: key(1) },
                    })
                    .unwrap();
            }
            assert_eq!(serialized_len(&record) + 8, VoterRecord::space(4));
        }

        #[test]
        fn test_case_holds_longest_evidence() {
            let case = Case {
                evidence: "x".repeat(MAX_EVIDENCE_LEN),
                ..Default::default()
            };
            assert_eq!(serialized_len(&case) + 8, Case::SIZE);

            let short = Case {
                evidence: "a".to_string(),
                ..Default::default()
            };
            assert!(serialized_len(&short) + 8 < Case::SIZE);
        }
    }

    mod transitions {
        use super::*;
        use DisputeStatus::*;

        #[test]
        fn test_forward_transitions_allowed() {
            assert!(Grace.can_transition_to(Waiting));
            assert!(Waiting.can_transition_to(Voting));
            assert!(Voting.can_transition_to(Reveal));
            assert!(Reveal.can_transition_to(Concluded { winner: None }));
            assert!(Grace.can_transition_to(Concluded { winner: None }));
        }

        #[test]
        fn test_regressions_rejected() {
            assert!(!Waiting.can_transition_to(Grace));
            assert!(!Reveal.can_transition_to(Voting));
            assert!(!Voting.can_transition_to(Waiting));
            assert!(!Grace.can_transition_to(Voting));
        }

        #[test]
        fn test_concluded_is_absorbing() {
            let done = Concluded { winner: Some(key(1)) };
            for next in [Grace, Waiting, Voting, Reveal, Concluded { winner: None }] {
                assert!(!done.can_transition_to(next));
            }
        }

        #[test]
        fn test_rank_follows_lifecycle() {
            let order = [Grace, Waiting, Voting, Reveal, Concluded { winner: None }];
            for pair in order.windows(2) {
                assert!(pair[0].rank() < pair[1].rank());
            }
        }
    }

    mod court {
        use super::*;

        #[test]
        fn test_dispute_ids_are_sequential() {
            let mut court = Court::default();
            assert_eq!(court.next_dispute_id().unwrap(), 0);
            assert_eq!(court.next_dispute_id().unwrap(), 1);
            assert_eq!(court.dispute_counter, 2);
        }

        #[test]
        fn test_counter_overflow() {
            let mut court = Court {
                dispute_counter: u64::MAX,
                ..Default::default()
            };
            assert_court_error(court.next_dispute_id(), CourtError::ArithmeticOverflow);
        }
    }

    mod configuration {
        use super::*;

        #[test]
        fn test_valid_configuration() {
            assert!(config().validate(0).is_ok());
        }

        #[test]
        fn test_deadlines_must_increase() {
            let mut bad = config();
            bad.commit_ends_at = bad.init_cases_ends_at;
            assert_court_error(bad.validate(0), CourtError::InvalidConfiguration);
        }

        #[test]
        fn test_grace_must_be_in_future() {
            assert_court_error(config().validate(100), CourtError::InvalidConfiguration);
        }
    }

    mod lifecycle {
        use super::*;

        #[test]
        fn test_register_party() {
            let mut d = dispute(2);
            d.register_party(key(1), 10).unwrap();
            assert_eq!(d.parties.len(), 1);
            assert_eq!(d.interactions, 1);
            assert_eq!(d.status, DisputeStatus::Grace);
        }

        #[test]
        fn test_register_twice_rejected() {
            let mut d = dispute(2);
            d.register_party(key(1), 10).unwrap();
            assert_court_error(
                d.register_party(key(1), 11),
                CourtError::DuplicateParticipation,
            );
            assert_eq!(d.interactions, 1);
        }

        #[test]
        fn test_capacity() {
            let mut d = dispute(1);
            d.register_party(key(1), 10).unwrap();
            assert_court_error(d.register_party(key(2), 10), CourtError::CapacityExceeded);
        }

        #[test]
        fn test_join_after_case_window() {
            let mut d = dispute(2);
            assert_court_error(d.register_party(key(1), 200), CourtError::InvalidPhase);
        }

        #[test]
        fn test_cases_drive_grace_waiting_voting() {
            let mut d = dispute(2);
            d.register_party(key(1), 10).unwrap();
            d.register_party(key(2), 10).unwrap();

            d.submit_case(&key(1), 20).unwrap();
            assert_eq!(d.status, DisputeStatus::Waiting);
            assert_eq!(d.submitted_cases, 1);

            d.submit_case(&key(2), 30).unwrap();
            assert_eq!(d.status, DisputeStatus::Voting);
            assert_eq!(d.submitted_cases, d.interactions);
        }

        #[test]
        fn test_second_case_is_duplicate() {
            let mut d = dispute(2);
            d.register_party(key(1), 10).unwrap();
            d.register_party(key(2), 10).unwrap();
            d.submit_case(&key(1), 20).unwrap();
            d.submit_case(&key(2), 20).unwrap();
            assert_court_error(
                d.submit_case(&key(1), 30),
                CourtError::DuplicateParticipation,
            );
        }

        #[test]
        fn test_resubmission_with_longer_evidence_is_duplicate() {
            let mut d = dispute(2);
            d.register_party(key(1), 10).unwrap();
            d.register_party(key(2), 10).unwrap();
            d.submit_case(&key(1), 20).unwrap();

            // The case account is allocated at its maximum size, so the
            // existing account accepts any valid evidence length and the
            // resubmission reaches the duplicate check.
            let longer = "b".repeat(MAX_EVIDENCE_LEN);
            crate::utils::validation::validate_evidence(&longer).unwrap();
            assert!(8 + 32 + 32 + 8 + 4 + longer.len() + 1 <= Case::SIZE);
            assert_court_error(
                d.submit_case(&key(1), 30),
                CourtError::DuplicateParticipation,
            );
            assert_eq!(d.submitted_cases, 1);
            assert_eq!(d.status, DisputeStatus::Waiting);
        }

        #[test]
        fn test_case_from_outsider() {
            let mut d = dispute(2);
            d.register_party(key(1), 10).unwrap();
            assert_court_error(d.submit_case(&key(7), 20), CourtError::NotAParty);
        }

        #[test]
        fn test_case_after_deadline() {
            let mut d = dispute(2);
            d.register_party(key(1), 10).unwrap();
            assert_court_error(d.submit_case(&key(1), 200), CourtError::InvalidPhase);
        }

        #[test]
        fn test_commit_window() {
            let mut d = dispute(1);
            d.register_party(key(1), 10).unwrap();
            assert_court_error(d.require_commit_window(20), CourtError::InvalidPhase);
            d.submit_case(&key(1), 20).unwrap();
            assert!(d.require_commit_window(250).is_ok());
            assert_court_error(d.require_commit_window(300), CourtError::InvalidPhase);
        }

        #[test]
        fn test_reveal_window_bounds() {
            let mut d = dispute(1);
            d.register_party(key(1), 10).unwrap();
            d.submit_case(&key(1), 20).unwrap();
            assert_court_error(d.require_reveal_window(299), CourtError::InvalidPhase);
            assert!(d.require_reveal_window(300).is_ok());
            assert!(d.require_reveal_window(400).is_ok());
            assert_court_error(d.require_reveal_window(401), CourtError::InvalidPhase);
        }

        #[test]
        fn test_first_reveal_opens_reveal_phase() {
            let mut d = dispute(2);
            d.register_party(key(1), 10).unwrap();
            d.register_party(key(2), 10).unwrap();
            d.submit_case(&key(1), 20).unwrap();
            d.submit_case(&key(2), 20).unwrap();

            assert_eq!(d.record_reveal(&key(2)).unwrap(), 1);
            assert_eq!(d.status, DisputeStatus::Reveal);
            assert_eq!(d.record_reveal(&key(2)).unwrap(), 2);
            assert_eq!(d.status, DisputeStatus::Reveal);
            assert_eq!(d.total_revealed_votes, 2);
        }

        #[test]
        fn test_reveal_for_non_party() {
            let mut d = dispute(2);
            d.register_party(key(1), 10).unwrap();
            d.submit_case(&key(1), 20).unwrap();
            assert_court_error(d.record_reveal(&key(5)), CourtError::UnknownCandidate);
            assert_eq!(d.total_revealed_votes, 0);
        }

        #[test]
        fn test_conclude_before_deadline() {
            let mut d = dispute(1);
            assert_court_error(d.conclude(399), CourtError::InvalidPhase);
        }

        #[test]
        fn test_conclude_is_terminal() {
            let mut d = dispute(1);
            d.conclude(400).unwrap();
            assert_court_error(d.conclude(500), CourtError::InvalidPhase);
        }

        #[test]
        fn test_winner_needs_strict_majority() {
            let mut d = dispute(2);
            d.register_party(key(1), 10).unwrap();
            d.register_party(key(2), 10).unwrap();
            d.submit_case(&key(1), 20).unwrap();
            d.submit_case(&key(2), 20).unwrap();
            d.record_reveal(&key(1)).unwrap();
            d.record_reveal(&key(2)).unwrap();
            assert_eq!(d.conclude(400).unwrap(), None);
            assert_eq!(d.status, DisputeStatus::Concluded { winner: None });
        }

        #[test]
        fn test_winner_needs_min_votes() {
            let mut d = dispute(2);
            d.config.min_votes = 2;
            d.register_party(key(1), 10).unwrap();
            d.register_party(key(2), 10).unwrap();
            d.submit_case(&key(1), 20).unwrap();
            d.submit_case(&key(2), 20).unwrap();
            d.record_reveal(&key(1)).unwrap();
            assert_eq!(d.conclude(400).unwrap(), None);
        }

        #[test]
        fn test_no_votes_is_inconclusive_even_without_minimum() {
            let mut d = dispute(1);
            d.config.min_votes = 0;
            d.register_party(key(1), 10).unwrap();
            d.submit_case(&key(1), 20).unwrap();
            assert_eq!(d.conclude(400).unwrap(), None);
        }

        #[test]
        fn test_conclusion_snapshots_reward_pool() {
            let mut d = dispute(2);
            d.config.voter_rep_cost = 3;
            d.config.party_pay_cost = 7;
            d.register_party(key(1), 10).unwrap();
            d.register_party(key(2), 10).unwrap();
            // seed 5 + two parties at 15 + two voters at 3
            d.record_deposit(5 + 15 + 15 + 3 + 3, 14).unwrap();
            d.submit_case(&key(1), 20).unwrap();
            d.submit_case(&key(2), 20).unwrap();
            d.record_reveal(&key(2)).unwrap();
            d.record_reveal(&key(2)).unwrap();

            assert_eq!(d.conclude(400).unwrap(), Some(key(2)));
            assert_eq!(d.reputation_reward_pool, 41 - 15 - 6);
            assert_eq!(d.payment_reward_pool, 7);
            assert_eq!(d.winning_claims_remaining, 2);
            assert_eq!(d.concluded_at, 400);
        }

        #[test]
        fn test_close_from_waiting() {
            let mut d = dispute(2);
            d.register_party(key(1), 10).unwrap();
            d.register_party(key(2), 10).unwrap();
            d.submit_case(&key(1), 20).unwrap();
            assert_eq!(d.status, DisputeStatus::Waiting);
            assert_eq!(d.conclude(400).unwrap(), None);
            assert!(d.is_concluded());
        }
    }

    mod escrow_books {
        use super::*;

        #[test]
        fn test_payout_bounded_by_escrow() {
            let mut d = dispute(1);
            d.record_deposit(10, 0).unwrap();
            d.record_payout(6, 0).unwrap();
            assert_eq!(d.reputation_in_vault(), 4);
            assert_court_error(d.record_payout(5, 0), CourtError::InsufficientVaultFunds);
            assert_eq!(d.reputation_paid_out, 6);
        }
    }

    mod voter_record {
        use super::*;
        use crate::utils::commitment::compute_commitment;

        fn committed(dispute_id: u64, candidate: Pubkey, salt: &str, stake: u64) -> ClaimEntry {
            ClaimEntry {
                dispute_id,
                dispute_end_time: 400,
                staked_reputation: stake,
                staked_payment: 0,
                commitment: Commitment::Committed {
                    hash: compute_commitment(&candidate, salt),
                },
            }
        }

        #[test]
        fn test_push_tracks_stakes() {
            let mut record = VoterRecord::default();
            record.push_entry(committed(0, key(1), "salt", 4)).unwrap();
            record.push_entry(committed(1, key(1), "salt", 6)).unwrap();
            assert_eq!(record.currently_staked_rep, 10);
            assert_eq!(record.claim_queue.len(), 2);
        }

        #[test]
        fn test_one_entry_per_dispute() {
            let mut record = VoterRecord::default();
            record.push_entry(committed(0, key(1), "salt", 4)).unwrap();
            assert_court_error(
                record.push_entry(committed(0, key(2), "other", 4)),
                CourtError::DuplicateParticipation,
            );
            assert_eq!(record.currently_staked_rep, 4);
        }

        #[test]
        fn test_reveal_with_matching_salt() {
            let mut record = VoterRecord::default();
            record.push_entry(committed(3, key(2), "pepper", 0)).unwrap();
            record.reveal(3, key(2), "pepper").unwrap();
            assert_eq!(
                record.entry(3).unwrap().commitment,
                Commitment::Revealed { candidate: key(2) }
            );
        }

        #[test]
        fn test_reveal_mismatch_leaves_entry() {
            let mut record = VoterRecord::default();
            let entry = committed(3, key(2), "pepper", 0);
            record.push_entry(entry).unwrap();

            assert_court_error(record.reveal(3, key(2), "paprika"), CourtError::CommitmentMismatch);
            assert_court_error(record.reveal(3, key(1), "pepper"), CourtError::CommitmentMismatch);
            assert_eq!(record.entry(3), Some(&entry));
        }

        #[test]
        fn test_reveal_twice() {
            let mut record = VoterRecord::default();
            record.push_entry(committed(3, key(2), "pepper", 0)).unwrap();
            record.reveal(3, key(2), "pepper").unwrap();
            assert_court_error(
                record.reveal(3, key(2), "pepper"),
                CourtError::DuplicateParticipation,
            );
        }

        #[test]
        fn test_reveal_without_entry() {
            let mut record = VoterRecord::default();
            assert_court_error(record.reveal(3, key(2), "pepper"), CourtError::EntryNotFound);
        }

        #[test]
        fn test_take_entry_once() {
            let mut record = VoterRecord::default();
            record.push_entry(committed(0, key(1), "a", 4)).unwrap();
            record.push_entry(committed(1, key(1), "b", 6)).unwrap();

            let taken = record.take_entry(0).unwrap();
            assert_eq!(taken.staked_reputation, 4);
            assert_eq!(record.currently_staked_rep, 6);
            assert_eq!(record.claim_queue.keys().copied().collect::<Vec<_>>(), vec![1]);
            assert_court_error(record.take_entry(0), CourtError::EntryNotFound);
        }

        #[test]
        fn test_unclaimed_after_reveal_deadline() {
            let mut record = VoterRecord::default();
            assert!(!record.has_unclaimed_disputes(1_000));

            record.push_entry(committed(0, key(1), "a", 4)).unwrap();
            assert!(!record.has_unclaimed_disputes(399));
            assert!(!record.has_unclaimed_disputes(400));
            assert!(record.has_unclaimed_disputes(401));

            record.take_entry(0).unwrap();
            assert!(!record.has_unclaimed_disputes(401));
        }

        #[test]
        fn test_holding_includes_stake() {
            let mut record = VoterRecord::default();
            record.push_entry(committed(0, key(1), "a", 4)).unwrap();
            assert_eq!(record.holding(3).unwrap(), 7);
        }
    }
}
