use serde::Serialize;
use std::cmp::Ordering;

use super::config::DEFAULT_TIE_TOLERANCE;
use super::validation::Distribution;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub expected_value: f64,
    pub variance: f64, // Always >= 0
    pub score: f64,    // expected_value - lambda * variance
}

/// Which of two alternatives scored higher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Preference {
    First,
    Second,
    Tie,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    pub first: EvaluationResult,
    pub second: EvaluationResult,
    pub preference: Preference,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedAlternative {
    pub index: usize, // Position in the caller's input
    pub rank: usize,  // 1-based, shared by alternatives tied with their predecessor
    pub result: EvaluationResult,
}

/// Expected value and variance of paired outcomes and probabilities.
///
/// Variance is a second pass over the deviations from the already computed
/// expected value, so every term is non-negative.
pub(crate) fn moments(outcomes: &[f64], probabilities: &[f64]) -> (f64, f64) {
    let expected_value: f64 = outcomes
        .iter()
        .zip(probabilities)
        .map(|(x, p)| p * x)
        .sum();

    let variance: f64 = outcomes
        .iter()
        .zip(probabilities)
        .map(|(x, p)| {
            let deviation = x - expected_value;
            p * deviation * deviation
        })
        .sum();

    (expected_value, variance)
}

/// Compute expected value, variance and risk-adjusted score.
///
/// Validation guarantees both moments are finite, so the score is never NaN.
pub fn evaluate(distribution: &Distribution, lambda: f64) -> EvaluationResult {
    let (expected_value, variance) = moments(distribution.outcomes(), distribution.probabilities());

    EvaluationResult {
        expected_value,
        variance,
        score: expected_value - lambda * variance,
    }
}

/// Compare two alternatives under the same lambda with the default tie tolerance.
pub fn compare_alternatives(a: &Distribution, b: &Distribution, lambda: f64) -> Comparison {
    compare_alternatives_with(a, b, lambda, DEFAULT_TIE_TOLERANCE)
}

pub fn compare_alternatives_with(
    a: &Distribution,
    b: &Distribution,
    lambda: f64,
    tie_tolerance: f64,
) -> Comparison {
    let first = evaluate(a, lambda);
    let second = evaluate(b, lambda);

    let preference = if (first.score - second.score).abs() <= tie_tolerance {
        Preference::Tie
    } else if first.score > second.score {
        Preference::First
    } else {
        Preference::Second
    };

    Comparison {
        first,
        second,
        preference,
    }
}

/// Evaluate every alternative and order them by score, highest first.
///
/// The sort is stable, so alternatives with equal scores keep their input order.
/// An alternative within `tie_tolerance` of the one ranked just above it shares
/// that rank.
pub fn rank_alternatives(
    alternatives: &[Distribution],
    lambda: f64,
    tie_tolerance: f64,
) -> Vec<RankedAlternative> {
    let mut evaluated: Vec<(usize, EvaluationResult)> = alternatives
        .iter()
        .map(|dist| evaluate(dist, lambda))
        .enumerate()
        .collect();

    // Primary: score descending. Ties: stable sort keeps input order.
    evaluated.sort_by(|a, b| b.1.score.partial_cmp(&a.1.score).unwrap_or(Ordering::Equal));

    let mut ranked: Vec<RankedAlternative> = Vec::with_capacity(evaluated.len());
    for (position, (index, result)) in evaluated.into_iter().enumerate() {
        let rank = match ranked.last() {
            Some(prev) if (prev.result.score - result.score).abs() <= tie_tolerance => prev.rank,
            _ => position + 1,
        };
        ranked.push(RankedAlternative { index, rank, result });
    }
    ranked
}
