use thiserror::Error;

use super::config::{RiskPolicy, ScoringConfig};
use super::engine::moments;

/// A malformed distribution or risk-aversion input.
///
/// Each variant names the violated constraint and carries the offending values,
/// so callers can show a precise message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("outcomes and probabilities must not be empty")]
    Empty,

    #[error(
        "outcomes and probabilities must have the same length ({outcomes} outcomes, {probabilities} probabilities)"
    )]
    LengthMismatch { outcomes: usize, probabilities: usize },

    #[error("outcome #{} must be a finite number, got {value}", .index + 1)]
    NonFiniteOutcome { index: usize, value: f64 },

    #[error("probability #{} must be within [0, 1], got {value}", .index + 1)]
    ProbabilityOutOfRange { index: usize, value: f64 },

    #[error("probabilities must sum to 1 (current sum = {sum:.6}, tolerance {tolerance:e})")]
    SumNotOne { sum: f64, tolerance: f64 },

    #[error(
        "outcomes are too large to evaluate (expected value {expected_value}, variance {variance})"
    )]
    MomentOverflow { expected_value: f64, variance: f64 },

    #[error("risk aversion must be a finite number, got {0}")]
    NonFiniteRiskAversion(f64),

    #[error("risk aversion must be non-negative, got {0} (set risk_policy: risk_seeking to allow)")]
    NegativeRiskAversion(f64),
}

/// A validated discrete probability distribution over outcomes.
///
/// Can only be built through [`validate`] or [`validate_with`], so every value
/// of this type satisfies the distribution invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    outcomes: Vec<f64>,
    probabilities: Vec<f64>,
}

impl Distribution {
    pub fn outcomes(&self) -> &[f64] {
        &self.outcomes
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Always false for a validated distribution.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// (outcome, probability) pairs in input order.
    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.outcomes
            .iter()
            .copied()
            .zip(self.probabilities.iter().copied())
    }
}

/// Validate a distribution with the default tolerances.
pub fn validate(outcomes: Vec<f64>, probabilities: Vec<f64>) -> Result<Distribution, ValidationError> {
    validate_with(outcomes, probabilities, &ScoringConfig::default())
}

/// Validate a distribution, failing on the first violated constraint.
///
/// Order: non-empty, equal length, finite outcomes, each probability in [0, 1],
/// probabilities summing to 1 within `config.sum_tolerance`, and finite
/// expected value and variance.
pub fn validate_with(
    outcomes: Vec<f64>,
    probabilities: Vec<f64>,
    config: &ScoringConfig,
) -> Result<Distribution, ValidationError> {
    if outcomes.is_empty() || probabilities.is_empty() {
        return Err(ValidationError::Empty);
    }

    if outcomes.len() != probabilities.len() {
        return Err(ValidationError::LengthMismatch {
            outcomes: outcomes.len(),
            probabilities: probabilities.len(),
        });
    }

    if let Some((index, &value)) = outcomes.iter().enumerate().find(|(_, x)| !x.is_finite()) {
        return Err(ValidationError::NonFiniteOutcome { index, value });
    }

    // NaN fails the range check too
    if let Some((index, &value)) = probabilities
        .iter()
        .enumerate()
        .find(|(_, p)| !(0.0..=1.0).contains(*p))
    {
        return Err(ValidationError::ProbabilityOutOfRange { index, value });
    }

    let sum: f64 = probabilities.iter().sum();
    if (sum - 1.0).abs() > config.sum_tolerance {
        return Err(ValidationError::SumNotOne {
            sum,
            tolerance: config.sum_tolerance,
        });
    }

    let (expected_value, variance) = moments(&outcomes, &probabilities);
    if !expected_value.is_finite() || !variance.is_finite() {
        return Err(ValidationError::MomentOverflow {
            expected_value,
            variance,
        });
    }

    Ok(Distribution {
        outcomes,
        probabilities,
    })
}

/// Check a risk-aversion coefficient against the configured policy.
pub fn validate_risk_aversion(lambda: f64, config: &ScoringConfig) -> Result<f64, ValidationError> {
    if !lambda.is_finite() {
        return Err(ValidationError::NonFiniteRiskAversion(lambda));
    }
    if lambda < 0.0 && config.risk_policy == RiskPolicy::Averse {
        return Err(ValidationError::NegativeRiskAversion(lambda));
    }
    Ok(lambda)
}

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if !config.sum_tolerance.is_finite() || config.sum_tolerance < 0.0 {
        errors.push(format!(
            "scoring.sum_tolerance: must be a non-negative number, got {}",
            config.sum_tolerance
        ));
    } else if config.sum_tolerance >= 1.0 {
        errors.push(format!(
            "scoring.sum_tolerance: must be below 1, got {}",
            config.sum_tolerance
        ));
    }

    if !config.tie_tolerance.is_finite() || config.tie_tolerance < 0.0 {
        errors.push(format!(
            "scoring.tie_tolerance: must be a non-negative number, got {}",
            config.tie_tolerance
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
