use serde::{Deserialize, Serialize};

/// Default tolerance when checking that probabilities sum to 1.
pub const DEFAULT_SUM_TOLERANCE: f64 = 1e-6;

/// Default tolerance under which two scores count as a tie.
pub const DEFAULT_TIE_TOLERANCE: f64 = 1e-9;

/// How a negative risk-aversion coefficient is treated.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiskPolicy {
    /// Negative lambda is rejected during validation.
    #[default]
    Averse,
    /// Negative lambda is accepted and rewards variance.
    RiskSeeking,
}

/// Numeric policy for validation and comparison.
///
/// Owned by the caller and passed into the engine; nothing here is global.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   sum_tolerance: 1.0e-6
///   tie_tolerance: 1.0e-9
///   risk_policy: averse
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Allowed distance between the probability sum and 1.0
    #[serde(default = "default_sum_tolerance")]
    pub sum_tolerance: f64,

    /// Score difference at or below which two alternatives tie
    #[serde(default = "default_tie_tolerance")]
    pub tie_tolerance: f64,

    #[serde(default)]
    pub risk_policy: RiskPolicy,
}

fn default_sum_tolerance() -> f64 {
    DEFAULT_SUM_TOLERANCE
}

fn default_tie_tolerance() -> f64 {
    DEFAULT_TIE_TOLERANCE
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            sum_tolerance: DEFAULT_SUM_TOLERANCE,
            tie_tolerance: DEFAULT_TIE_TOLERANCE,
            risk_policy: RiskPolicy::Averse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring_config() {
        let config = ScoringConfig::default();

        assert_eq!(config.sum_tolerance, 1e-6);
        assert_eq!(config.tie_tolerance, 1e-9);
        assert_eq!(config.risk_policy, RiskPolicy::Averse);
    }

    #[test]
    fn test_scoring_config_serde_roundtrip() {
        let config = ScoringConfig {
            sum_tolerance: 1e-3,
            tie_tolerance: 0.5,
            risk_policy: RiskPolicy::RiskSeeking,
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: ScoringConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_scoring_config_parse() {
        let yaml = r#"
risk_policy: risk_seeking
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.risk_policy, RiskPolicy::RiskSeeking);
        assert_eq!(config.sum_tolerance, DEFAULT_SUM_TOLERANCE);
        assert_eq!(config.tie_tolerance, DEFAULT_TIE_TOLERANCE);
    }

    #[test]
    fn test_empty_scoring_config_parse() {
        let config: ScoringConfig = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, ScoringConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "tolerance: 0.1\n";
        assert!(serde_saphyr::from_str::<ScoringConfig>(yaml).is_err());
    }
}
