use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::error::MatchError;
use crate::models::{ParticipantId, Role};

/// Split of the population into Proposers and Receivers
///
/// Fixed for the whole run. With an odd population the Receiver role holds
/// the extra member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePartition {
    proposers: Vec<ParticipantId>,
    receivers: Vec<ParticipantId>,
    /// Role and index within that role, per participant id
    slots: Vec<(Role, usize)>,
}

impl RolePartition {
    /// Random split driven by a ChaCha8 stream seeded with `seed`
    pub fn seeded(population: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::random(population, &mut rng)
    }

    /// Uniform random split: `population / 2` proposers, the rest receivers
    pub fn random<R: Rng + ?Sized>(population: usize, rng: &mut R) -> Self {
        let mut ids: Vec<ParticipantId> = (0..population).collect();
        ids.shuffle(rng);
        ids.truncate(population / 2);
        Self::build(population, ids)
    }

    /// Explicit split; every id not listed becomes a receiver
    pub fn from_proposers<I>(population: usize, proposers: I) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = ParticipantId>,
    {
        let mut seen = vec![false; population];
        let mut ids = Vec::new();
        for id in proposers {
            if id >= population {
                return Err(MatchError::InvalidPartition(format!(
                    "proposer id {} out of range for population {}",
                    id, population
                )));
            }
            if seen[id] {
                return Err(MatchError::InvalidPartition(format!(
                    "proposer id {} listed twice",
                    id
                )));
            }
            seen[id] = true;
            ids.push(id);
        }

        Ok(Self::build(population, ids))
    }

    fn build(population: usize, mut proposers: Vec<ParticipantId>) -> Self {
        proposers.sort_unstable();

        let mut slots = vec![(Role::Receiver, 0); population];
        for (index, &id) in proposers.iter().enumerate() {
            slots[id] = (Role::Proposer, index);
        }

        let mut receivers = Vec::with_capacity(population - proposers.len());
        for id in 0..population {
            if slots[id].0 == Role::Receiver {
                slots[id].1 = receivers.len();
                receivers.push(id);
            }
        }

        Self {
            proposers,
            receivers,
            slots,
        }
    }

    /// Proposer ids in ascending order
    pub fn proposers(&self) -> &[ParticipantId] {
        &self.proposers
    }

    /// Receiver ids in ascending order
    pub fn receivers(&self) -> &[ParticipantId] {
        &self.receivers
    }

    pub fn population(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn role_of(&self, id: ParticipantId) -> Role {
        self.slots[id].0
    }

    /// Index of `id` within its own role
    #[inline]
    pub fn slot_of(&self, id: ParticipantId) -> usize {
        self.slots[id].1
    }
}
