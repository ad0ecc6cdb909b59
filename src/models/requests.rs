use serde::{Deserialize, Serialize};

use crate::core::scoring::score_matrix;
use crate::models::domain::{GenderIdentity, GenderPreference, Participant, ScoringWeights};

/// Input to one matching run; an empty population is valid
///
/// ```json
/// {
///   "scores": [[0.0, 0.4], [0.7, 0.0]],
///   "genderIdentity": ["Male", "Female"],
///   "genderPreference": ["Women", "Men"]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    pub scores: Vec<Vec<f64>>,
    #[serde(rename = "genderIdentity")]
    pub gender_identity: Vec<GenderIdentity>,
    #[serde(rename = "genderPreference")]
    pub gender_preference: Vec<GenderPreference>,
}

impl MatchRequest {
    /// Build a request from survey records, scoring every ordered pair
    pub fn from_participants(participants: &[Participant], weights: &ScoringWeights) -> Self {
        Self {
            scores: score_matrix(participants, weights),
            gender_identity: participants.iter().map(|p| p.gender_identity).collect(),
            gender_preference: participants.iter().map(|p| p.gender_preference).collect(),
        }
    }

    pub fn population(&self) -> usize {
        self.gender_identity.len()
    }
}

/// Survey document: `{ "participants": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyDocument {
    pub participants: Vec<Participant>,
}
