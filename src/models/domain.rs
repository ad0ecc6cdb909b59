use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use validator::Validate;

use crate::core::error::MatchError;

/// Participant identity: the index of the participant in the input arrays
pub type ParticipantId = usize;

/// Error returned when a gender label cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseGenderError {
    #[error("unknown gender identity: {0:?}")]
    UnknownIdentity(String),

    #[error("unknown gender preference: {0:?}")]
    UnknownPreference(String),
}

/// Gender a participant identifies as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenderIdentity {
    Male,
    Female,
    #[serde(rename = "Non-binary")]
    NonBinary,
}

impl GenderIdentity {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenderIdentity::Male => "Male",
            GenderIdentity::Female => "Female",
            GenderIdentity::NonBinary => "Non-binary",
        }
    }
}

impl fmt::Display for GenderIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenderIdentity {
    type Err = ParseGenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Male" => Ok(GenderIdentity::Male),
            "Female" => Ok(GenderIdentity::Female),
            "Non-binary" => Ok(GenderIdentity::NonBinary),
            other => Err(ParseGenderError::UnknownIdentity(other.to_string())),
        }
    }
}

/// Set of identities a participant is willing to be matched with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenderPreference {
    Men,
    Women,
    Bisexual,
}

impl GenderPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenderPreference::Men => "Men",
            GenderPreference::Women => "Women",
            GenderPreference::Bisexual => "Bisexual",
        }
    }
}

impl fmt::Display for GenderPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenderPreference {
    type Err = ParseGenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Men" => Ok(GenderPreference::Men),
            "Women" => Ok(GenderPreference::Women),
            "Bisexual" => Ok(GenderPreference::Bisexual),
            other => Err(ParseGenderError::UnknownPreference(other.to_string())),
        }
    }
}

/// Matching role a participant plays for the whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Proposer,
    Receiver,
}

/// Survey record used to compute compatibility scores
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Participant {
    #[serde(skip)]
    pub id: ParticipantId,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(rename = "gender")]
    pub gender_identity: GenderIdentity,
    #[serde(rename = "preference")]
    pub gender_preference: GenderPreference,
    #[validate(range(min = 1900, max = 2200))]
    #[serde(rename = "gradYear")]
    pub grad_year: u16,
    #[serde(default)]
    pub responses: Vec<u8>,
}

/// Square compatibility-score matrix
///
/// `score(a, b)` is how much `a` likes `b`; symmetry is not required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreMatrix {
    rows: Vec<Vec<f64>>,
}

impl ScoreMatrix {
    /// Build a matrix, rejecting ragged rows and negative or non-finite scores
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, MatchError> {
        let n = rows.len();
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(MatchError::NonSquareMatrix {
                    row: row_idx,
                    len: row.len(),
                    expected: n,
                });
            }
            for (col_idx, &value) in row.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(MatchError::InvalidScore {
                        row: row_idx,
                        col: col_idx,
                        value,
                    });
                }
            }
        }

        Ok(Self { rows })
    }

    /// Number of participants covered by the matrix
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub fn score(&self, from: ParticipantId, to: ParticipantId) -> f64 {
        self.rows[from][to]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
}

/// One matched couple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchPair {
    pub proposer: ParticipantId,
    pub receiver: ParticipantId,
}

/// Why a participant ended the run without a partner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedReason {
    /// The gender filter left no candidate in the opposite role
    NoCompatibleCandidates,
    /// Proposer was turned down by every candidate on its list
    CandidatesExhausted,
    /// Receiver had candidates, but all of them settled elsewhere
    NoAcceptableProposal,
}

/// A participant left without a partner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unmatched {
    pub id: ParticipantId,
    pub role: Role,
    pub reason: UnmatchedReason,
}

/// Final pairing produced by the deferred-acceptance engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Matched couples, ordered by receiver id
    pub pairs: Vec<MatchPair>,
    /// Participants without a partner, ordered by id
    pub unmatched: Vec<Unmatched>,
}

impl MatchOutcome {
    /// Partner of `id`, if matched
    pub fn partner_of(&self, id: ParticipantId) -> Option<ParticipantId> {
        self.pairs.iter().find_map(|pair| {
            if pair.proposer == id {
                Some(pair.receiver)
            } else if pair.receiver == id {
                Some(pair.proposer)
            } else {
                None
            }
        })
    }

    pub fn is_matched(&self, id: ParticipantId) -> bool {
        self.partner_of(id).is_some()
    }

    pub fn unmatched_entry(&self, id: ParticipantId) -> Option<&Unmatched> {
        self.unmatched.iter().find(|u| u.id == id)
    }
}

/// Weights for the survey-based compatibility scorer
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringWeights {
    /// Multiplier indexed by absolute graduation-year difference
    pub grad_year: Vec<f64>,
    /// Added when both participants accept each other's identity
    pub mutual_bonus: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            grad_year: vec![1.0, 0.9, 0.7, 0.5],
            mutual_bonus: 1.0,
        }
    }
}
