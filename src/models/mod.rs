// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    GenderIdentity, GenderPreference, MatchOutcome, MatchPair, ParseGenderError, Participant,
    ParticipantId, Role, ScoreMatrix, ScoringWeights, Unmatched, UnmatchedReason,
};
pub use requests::{MatchRequest, SurveyDocument};
pub use responses::{MatchReport, PairReport};
