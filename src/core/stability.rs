use crate::core::{partition::RolePartition, preferences::PreferenceLists};
use crate::models::{MatchOutcome, MatchPair, ParticipantId};

/// Find every blocking pair in `outcome`
///
/// A blocking pair is a proposer and receiver, each on the other's list and
/// not matched together, who both strictly prefer each other to their current
/// assignment. Being unmatched ranks below every listed candidate.
pub fn blocking_pairs(
    outcome: &MatchOutcome,
    preferences: &PreferenceLists,
    partition: &RolePartition,
) -> Vec<MatchPair> {
    let mut partner: Vec<Option<ParticipantId>> = vec![None; partition.population()];
    for pair in &outcome.pairs {
        partner[pair.proposer] = Some(pair.receiver);
        partner[pair.receiver] = Some(pair.proposer);
    }

    let mut blocking = Vec::new();

    for &proposer in partition.proposers() {
        for receiver in preferences.best_first(partition, proposer) {
            // everything from the current partner down is no improvement
            if partner[proposer] == Some(receiver) {
                break;
            }

            let Some(rank) = preferences.rank_of(partition, receiver, proposer) else {
                continue;
            };

            let receiver_improves = match partner[receiver] {
                None => true,
                Some(current) => preferences
                    .rank_of(partition, receiver, current)
                    .map_or(true, |current_rank| rank < current_rank),
            };

            if receiver_improves {
                blocking.push(MatchPair { proposer, receiver });
            }
        }
    }

    blocking
}

/// Check that `outcome` has no blocking pair
pub fn is_stable(
    outcome: &MatchOutcome,
    preferences: &PreferenceLists,
    partition: &RolePartition,
) -> bool {
    blocking_pairs(outcome, preferences, partition).is_empty()
}
