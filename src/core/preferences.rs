use std::cmp::Ordering;

use crate::core::{error::MatchError, filters::accepts_identity, partition::RolePartition};
use crate::models::{GenderIdentity, GenderPreference, ParticipantId, Role, ScoreMatrix};

/// Gender-filtered, score-ranked candidate lists for both roles
///
/// Both sides encode "more preferred" the same way; only the orientation
/// differs so each side's access pattern in the engine stays cheap:
/// - proposer lists are ascending (best candidate last, taken with `pop`)
/// - receiver lists are descending (best candidate first, trimmed from the tail)
///
/// Lists are indexed by the owner's slot within its role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceLists {
    pub proposers: Vec<Vec<ParticipantId>>,
    pub receivers: Vec<Vec<ParticipantId>>,
}

impl PreferenceLists {
    /// Raw list of `id`, in its role's orientation
    pub fn list_of(&self, partition: &RolePartition, id: ParticipantId) -> &[ParticipantId] {
        let slot = partition.slot_of(id);
        match partition.role_of(id) {
            Role::Proposer => &self.proposers[slot],
            Role::Receiver => &self.receivers[slot],
        }
    }

    /// Candidates of `id`, most preferred first
    pub fn best_first(&self, partition: &RolePartition, id: ParticipantId) -> Vec<ParticipantId> {
        let list = self.list_of(partition, id);
        match partition.role_of(id) {
            Role::Proposer => list.iter().rev().copied().collect(),
            Role::Receiver => list.to_vec(),
        }
    }

    /// Position of `candidate` in `owner`'s ranking (0 = most preferred)
    pub fn rank_of(
        &self,
        partition: &RolePartition,
        owner: ParticipantId,
        candidate: ParticipantId,
    ) -> Option<usize> {
        let list = self.list_of(partition, owner);
        let pos = list.iter().position(|&c| c == candidate)?;
        match partition.role_of(owner) {
            Role::Proposer => Some(list.len() - 1 - pos),
            Role::Receiver => Some(pos),
        }
    }
}

/// Check that the score matrix and both gender arrays describe the same population
pub fn check_dimensions(
    scores: &ScoreMatrix,
    identities: &[GenderIdentity],
    preferences: &[GenderPreference],
) -> Result<(), MatchError> {
    if scores.len() != identities.len() || scores.len() != preferences.len() {
        return Err(MatchError::DimensionMismatch {
            scores: scores.len(),
            identities: identities.len(),
            preferences: preferences.len(),
        });
    }
    Ok(())
}

/// Derive both roles' preference lists from the raw score matrix
///
/// Each participant ranks only members of the opposite role whose identity
/// its own gender preference admits. Incompatible candidates are dropped
/// outright, never ranked last. Equal scores rank the lower id first.
pub fn derive(
    scores: &ScoreMatrix,
    partition: &RolePartition,
    identities: &[GenderIdentity],
    preferences: &[GenderPreference],
) -> Result<PreferenceLists, MatchError> {
    check_dimensions(scores, identities, preferences)?;
    if partition.population() != scores.len() {
        return Err(MatchError::InvalidPartition(format!(
            "partition covers {} participants, input has {}",
            partition.population(),
            scores.len()
        )));
    }

    let proposers = partition
        .proposers()
        .iter()
        .map(|&p| {
            let mut list =
                ranked_candidates(p, partition.receivers(), scores, identities, preferences);
            list.reverse();
            list
        })
        .collect();

    let receivers = partition
        .receivers()
        .iter()
        .map(|&r| ranked_candidates(r, partition.proposers(), scores, identities, preferences))
        .collect();

    Ok(PreferenceLists {
        proposers,
        receivers,
    })
}

/// Compatible members of `pool`, most preferred first
fn ranked_candidates(
    owner: ParticipantId,
    pool: &[ParticipantId],
    scores: &ScoreMatrix,
    identities: &[GenderIdentity],
    preferences: &[GenderPreference],
) -> Vec<ParticipantId> {
    let preference = preferences[owner];

    let mut candidates: Vec<(f64, ParticipantId)> = pool
        .iter()
        .filter(|&&candidate| accepts_identity(preference, identities[candidate]))
        .map(|&candidate| (scores.score(owner, candidate), candidate))
        .collect();

    candidates.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.1.cmp(&b.1))
    });

    candidates.into_iter().map(|(_, candidate)| candidate).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use GenderIdentity::*;
    use GenderPreference::*;

    fn matrix(rows: Vec<Vec<f64>>) -> ScoreMatrix {
        ScoreMatrix::new(rows).unwrap()
    }

    #[test]
    fn test_orientation_per_role() {
        // 0, 1 propose; 2, 3 receive
        let scores = matrix(vec![
            vec![0.0, 0.0, 0.9, 0.1],
            vec![0.0, 0.0, 0.2, 0.8],
            vec![0.3, 0.6, 0.0, 0.0],
            vec![0.7, 0.4, 0.0, 0.0],
        ]);
        let partition = RolePartition::from_proposers(4, [0, 1]).unwrap();
        let ids = [Male, Male, Female, Female];
        let prefs = [Women, Women, Men, Men];

        let lists = derive(&scores, &partition, &ids, &prefs).unwrap();

        // ascending for proposers
        assert_eq!(lists.proposers, vec![vec![3, 2], vec![2, 3]]);
        // descending for receivers
        assert_eq!(lists.receivers, vec![vec![1, 0], vec![0, 1]]);

        assert_eq!(lists.best_first(&partition, 0), vec![2, 3]);
        assert_eq!(lists.rank_of(&partition, 0, 2), Some(0));
        assert_eq!(lists.rank_of(&partition, 3, 1), Some(1));
    }

    #[test]
    fn test_incompatible_candidates_removed() {
        let scores = matrix(vec![
            vec![0.0, 0.0, 5.0, 1.0],
            vec![0.0, 0.0, 1.0, 1.0],
            vec![1.0, 1.0, 0.0, 0.0],
            vec![1.0, 1.0, 0.0, 0.0],
        ]);
        let partition = RolePartition::from_proposers(4, [0, 1]).unwrap();
        // proposer 0 wants women; receiver 2 is male despite the top score
        let ids = [Male, Female, Male, Female];
        let prefs = [Women, Bisexual, Women, Men];

        let lists = derive(&scores, &partition, &ids, &prefs).unwrap();

        assert_eq!(lists.list_of(&partition, 0), &[3]);
        assert_eq!(lists.rank_of(&partition, 0, 2), None);
        // receiver 2 wants women: only proposer 1 qualifies
        assert_eq!(lists.list_of(&partition, 2), &[1]);
        // receiver 3 wants men: only proposer 0 qualifies
        assert_eq!(lists.list_of(&partition, 3), &[0]);
    }

    #[test]
    fn test_ties_rank_lower_id_first() {
        let scores = matrix(vec![
            vec![0.0, 0.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0, 0.0],
            vec![0.5, 0.5, 0.0, 0.0],
            vec![0.0, 0.0, 0.0, 0.0],
        ]);
        let partition = RolePartition::from_proposers(4, [0, 1]).unwrap();
        let ids = [NonBinary; 4];
        let prefs = [Bisexual; 4];

        let lists = derive(&scores, &partition, &ids, &prefs).unwrap();

        assert_eq!(lists.best_first(&partition, 2), vec![0, 1]);
        assert_eq!(lists.best_first(&partition, 0), vec![2, 3]);
    }

    #[test]
    fn test_empty_list_when_nobody_compatible() {
        let scores = matrix(vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
        let partition = RolePartition::from_proposers(2, [0]).unwrap();
        let lists = derive(&scores, &partition, &[Male, Male], &[Women, Men]).unwrap();

        assert!(lists.list_of(&partition, 0).is_empty());
        assert_eq!(lists.list_of(&partition, 1), &[0]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let scores = matrix(vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
        let partition = RolePartition::from_proposers(2, [0]).unwrap();
        let err = derive(&scores, &partition, &[Male], &[Women, Men]).unwrap_err();

        assert_eq!(
            err,
            MatchError::DimensionMismatch {
                scores: 2,
                identities: 1,
                preferences: 2
            }
        );
    }

    #[test]
    fn test_partition_size_mismatch() {
        let scores = matrix(vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
        let partition = RolePartition::from_proposers(3, [0]).unwrap();
        let err = derive(&scores, &partition, &[Male, Female], &[Women, Men]).unwrap_err();

        assert!(matches!(err, MatchError::InvalidPartition(_)));
    }
}
