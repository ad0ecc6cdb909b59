use crate::core::filters::mutually_compatible;
use crate::models::{Participant, ScoringWeights};

/// Calculate how compatible `b` is from `a`'s point of view
///
/// Scoring formula:
/// score = (
///     shared_answers +             # identical survey responses
///     same_initial                 # names share a first letter, worth one question
/// ) / (questions + 1)
///   * grad_year_weight             # looked up by graduation-year gap
///   + mutual_bonus                 # both accept each other's identity
///
/// Scores therefore fall in `[0, 1]` for pairs that are not mutually
/// compatible and in `[bonus, bonus + 1]` for pairs that are.
pub fn calculate_compatibility(a: &Participant, b: &Participant, weights: &ScoringWeights) -> f64 {
    let shared_answers = a
        .responses
        .iter()
        .zip(&b.responses)
        .filter(|(x, y)| x == y)
        .count();

    let mut response_score = shared_answers as f64;
    if same_initial(&a.name, &b.name) {
        response_score += 1.0;
    }

    let questions = a.responses.len().max(b.responses.len()) as f64 + 1.0;
    let grad_weight = grad_year_weight(a.grad_year.abs_diff(b.grad_year), &weights.grad_year);

    let mut score = response_score / questions * grad_weight;

    if mutually_compatible(
        a.gender_identity,
        a.gender_preference,
        b.gender_identity,
        b.gender_preference,
    ) {
        score += weights.mutual_bonus;
    }

    score
}

/// Build the full N×N score matrix; the diagonal is zero
pub fn score_matrix(participants: &[Participant], weights: &ScoringWeights) -> Vec<Vec<f64>> {
    participants
        .iter()
        .enumerate()
        .map(|(i, a)| {
            participants
                .iter()
                .enumerate()
                .map(|(j, b)| {
                    if i == j {
                        0.0
                    } else {
                        calculate_compatibility(a, b, weights)
                    }
                })
                .collect()
        })
        .collect()
}

/// Weight for a graduation-year gap; gaps past the table use its last entry
#[inline]
fn grad_year_weight(diff: u16, table: &[f64]) -> f64 {
    table
        .get(diff as usize)
        .or_else(|| table.last())
        .copied()
        .unwrap_or(1.0)
}

#[inline]
fn same_initial(a: &str, b: &str) -> bool {
    match (a.chars().next(), b.chars().next()) {
        (Some(x), Some(y)) => x.to_lowercase().eq(y.to_lowercase()),
        _ => false,
    }
}
