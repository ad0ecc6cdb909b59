use thiserror::Error;

/// Errors raised before any matching work starts
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("dimension mismatch: {scores} score rows, {identities} gender identities, {preferences} gender preferences")]
    DimensionMismatch {
        scores: usize,
        identities: usize,
        preferences: usize,
    },

    #[error("score matrix is not square: row {row} has {len} entries, expected {expected}")]
    NonSquareMatrix {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("invalid score {value} at ({row}, {col}): scores must be finite and non-negative")]
    InvalidScore { row: usize, col: usize, value: f64 },

    #[error("invalid role partition: {0}")]
    InvalidPartition(String),
}
