use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::matcher::MatchResult;
use crate::models::domain::{ParticipantId, ScoreMatrix, Unmatched};

/// Report written at the end of a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    #[serde(rename = "runId")]
    pub run_id: Uuid,
    #[serde(rename = "generatedAt")]
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub seed: Option<u64>,
    pub population: usize,
    pub proposers: usize,
    pub receivers: usize,
    pub stable: bool,
    pub pairs: Vec<PairReport>,
    pub unmatched: Vec<Unmatched>,
}

/// Matched couple with the raw score each side gave the other
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairReport {
    pub proposer: ParticipantId,
    pub receiver: ParticipantId,
    #[serde(rename = "proposerScore")]
    pub proposer_score: f64,
    #[serde(rename = "receiverScore")]
    pub receiver_score: f64,
}

impl MatchReport {
    pub fn build(result: &MatchResult, scores: &ScoreMatrix, stable: bool) -> Self {
        let pairs = result
            .outcome
            .pairs
            .iter()
            .map(|pair| PairReport {
                proposer: pair.proposer,
                receiver: pair.receiver,
                proposer_score: scores.score(pair.proposer, pair.receiver),
                receiver_score: scores.score(pair.receiver, pair.proposer),
            })
            .collect();

        Self {
            run_id: Uuid::new_v4(),
            generated_at: chrono::Utc::now(),
            seed: result.seed,
            population: result.partition.population(),
            proposers: result.partition.proposers().len(),
            receivers: result.partition.receivers().len(),
            stable,
            pairs,
            unmatched: result.outcome.unmatched.clone(),
        }
    }
}
