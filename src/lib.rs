//! Stable Match - gender-aware stable matching for batch pairing runs
//!
//! This library derives per-participant preference rankings from a raw
//! compatibility-score matrix, splits the population into proposers and
//! receivers, and runs deferred acceptance to produce a stable one-to-one
//! pairing that honors everyone's gender preference.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{is_stable, run_matching, MatchError, MatchResult, Matcher, RolePartition};
pub use crate::models::{
    GenderIdentity, GenderPreference, MatchOutcome, MatchPair, MatchReport, MatchRequest,
    Participant, ScoreMatrix, ScoringWeights,
};
