use tracing::{debug, info, trace};

use crate::core::{
    error::MatchError,
    partition::RolePartition,
    preferences::{check_dimensions, derive, PreferenceLists},
};
use crate::models::{
    GenderIdentity, GenderPreference, MatchOutcome, MatchPair, ParticipantId, Role, ScoreMatrix,
    Unmatched, UnmatchedReason,
};

/// Result of one matching run
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub partition: RolePartition,
    /// Preference lists as derived, before the engine trimmed them
    pub preferences: PreferenceLists,
    /// Seed behind the role split; `None` when the partition was injected
    pub seed: Option<u64>,
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Input validation
/// 2. Seeded role partition
/// 3. Preference derivation with the gender filter
/// 4. Deferred acceptance
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    seed: Option<u64>,
}

impl Matcher {
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Match a population using a random role split
    ///
    /// Without a configured seed one is drawn from entropy and returned in
    /// the result, so the run can be replayed.
    pub fn run(
        &self,
        scores: &ScoreMatrix,
        identities: &[GenderIdentity],
        preferences: &[GenderPreference],
    ) -> Result<MatchResult, MatchError> {
        check_dimensions(scores, identities, preferences)?;

        let seed = self.seed.unwrap_or_else(|| {
            let seed: u64 = rand::random();
            info!(seed, "No seed configured, drew one from entropy");
            seed
        });

        let partition = RolePartition::seeded(scores.len(), seed);
        let mut result = self.run_with_partition(scores, identities, preferences, partition)?;
        result.seed = Some(seed);
        Ok(result)
    }

    /// Match a population using a caller-supplied role split
    pub fn run_with_partition(
        &self,
        scores: &ScoreMatrix,
        identities: &[GenderIdentity],
        preferences: &[GenderPreference],
        partition: RolePartition,
    ) -> Result<MatchResult, MatchError> {
        let lists = derive(scores, &partition, identities, preferences)?;

        info!(
            population = partition.population(),
            proposers = partition.proposers().len(),
            receivers = partition.receivers().len(),
            "Running deferred acceptance"
        );

        let outcome = deferred_acceptance(&partition, lists.clone())?;

        info!(
            pairs = outcome.pairs.len(),
            unmatched = outcome.unmatched.len(),
            "Matching complete"
        );

        Ok(MatchResult {
            outcome,
            partition,
            preferences: lists,
            seed: None,
        })
    }
}

/// Match a population from raw inputs with a seeded role split
pub fn run_matching(
    scores: &[Vec<f64>],
    gender_identity: &[GenderIdentity],
    gender_preference: &[GenderPreference],
    seed: u64,
) -> Result<MatchOutcome, MatchError> {
    let scores = ScoreMatrix::new(scores.to_vec())?;
    let result = Matcher::with_seed(seed).run(&scores, gender_identity, gender_preference)?;
    Ok(result.outcome)
}

/// Deferred acceptance over gender-filtered preference lists
///
/// Takes ownership of the lists and consumes them: every proposal pops the
/// proposer's best remaining candidate, and every acceptance trims the
/// receiver's list so the accepted proposer sits at its tail. A proposer is
/// therefore acceptable to a receiver exactly when it still appears in that
/// receiver's list.
///
/// Fails with [`MatchError::InvalidPartition`] when the lists do not fit
/// `partition`: one list per role member, candidates drawn from the other role.
pub fn deferred_acceptance(
    partition: &RolePartition,
    mut lists: PreferenceLists,
) -> Result<MatchOutcome, MatchError> {
    check_lists(partition, &lists)?;

    let proposer_count = partition.proposers().len();

    // rank of each proposer (by slot) in each receiver's full list
    let receiver_ranks: Vec<Vec<Option<usize>>> = lists
        .receivers
        .iter()
        .map(|list| {
            let mut ranks = vec![None; proposer_count];
            for (rank, &proposer) in list.iter().enumerate() {
                ranks[partition.slot_of(proposer)] = Some(rank);
            }
            ranks
        })
        .collect();

    let proposer_started_empty: Vec<bool> = lists.proposers.iter().map(Vec::is_empty).collect();
    let receiver_started_empty: Vec<bool> = lists.receivers.iter().map(Vec::is_empty).collect();

    let mut held: Vec<Option<ParticipantId>> = vec![None; partition.receivers().len()];
    // lowest id proposes first
    let mut free: Vec<ParticipantId> = partition.proposers().iter().rev().copied().collect();
    let mut proposals = 0usize;

    while let Some(proposer) = free.pop() {
        let p_slot = partition.slot_of(proposer);

        let Some(receiver) = lists.proposers[p_slot].pop() else {
            trace!(proposer, "Preference list exhausted");
            continue;
        };
        proposals += 1;

        let r_slot = partition.slot_of(receiver);
        let remaining = &mut lists.receivers[r_slot];

        match receiver_ranks[r_slot][p_slot] {
            Some(rank) if rank < remaining.len() => {
                if let Some(displaced) = held[r_slot].replace(proposer) {
                    trace!(receiver, proposer, displaced, "Proposal accepted, displacing");
                    free.push(displaced);
                } else {
                    trace!(receiver, proposer, "Proposal accepted");
                }
                remaining.truncate(rank + 1);
            }
            _ => {
                trace!(receiver, proposer, "Proposal rejected");
                free.push(proposer);
            }
        }
    }

    debug!(proposals, "Deferred acceptance terminated");

    let mut matched_proposer = vec![false; proposer_count];
    let mut pairs = Vec::new();
    let mut unmatched = Vec::new();

    for (r_slot, &receiver) in partition.receivers().iter().enumerate() {
        match held[r_slot] {
            Some(proposer) => {
                matched_proposer[partition.slot_of(proposer)] = true;
                pairs.push(MatchPair { proposer, receiver });
            }
            None => unmatched.push(Unmatched {
                id: receiver,
                role: Role::Receiver,
                reason: if receiver_started_empty[r_slot] {
                    UnmatchedReason::NoCompatibleCandidates
                } else {
                    UnmatchedReason::NoAcceptableProposal
                },
            }),
        }
    }

    for (p_slot, &proposer) in partition.proposers().iter().enumerate() {
        if !matched_proposer[p_slot] {
            unmatched.push(Unmatched {
                id: proposer,
                role: Role::Proposer,
                reason: if proposer_started_empty[p_slot] {
                    UnmatchedReason::NoCompatibleCandidates
                } else {
                    UnmatchedReason::CandidatesExhausted
                },
            });
        }
    }

    unmatched.sort_by_key(|u| u.id);

    Ok(MatchOutcome { pairs, unmatched })
}

fn check_lists(partition: &RolePartition, lists: &PreferenceLists) -> Result<(), MatchError> {
    let sides = [
        (Role::Proposer, &lists.proposers, partition.proposers(), Role::Receiver),
        (Role::Receiver, &lists.receivers, partition.receivers(), Role::Proposer),
    ];

    for (role, owned, members, other) in sides {
        if owned.len() != members.len() {
            return Err(MatchError::InvalidPartition(format!(
                "{:?} lists: got {}, partition has {} members",
                role,
                owned.len(),
                members.len()
            )));
        }

        for (&owner, list) in members.iter().zip(owned) {
            if let Some(&bad) = list
                .iter()
                .find(|&&c| c >= partition.population() || partition.role_of(c) != other)
            {
                return Err(MatchError::InvalidPartition(format!(
                    "{:?} {} lists {} outside the {:?} role",
                    role, owner, bad, other
                )));
            }
        }
    }

    Ok(())
}
