use serde::{Deserialize, Serialize};

use crate::input::NumberList;
use crate::scoring::ScoringConfig;

pub const DEFAULT_RISK_AVERSION: f64 = 0.10;

/// A set of alternatives evaluated under one shared risk aversion.
///
/// Example YAML:
/// ```yaml
/// unit: "€"
/// risk_aversion: 0.1
/// options:
///   - name: Startup bet
///     outcomes: "2000€, -500€"
///     probs: [0.2, 0.8]
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Display unit for EV and score ("€", "hours", ...). "None" means no unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Shared lambda for every option (default: 0.10)
    #[serde(default = "default_risk_aversion")]
    pub risk_aversion: f64,

    /// Only the first N options are evaluated when set; every option when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_options: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring: Option<ScoringConfig>,

    pub options: Vec<OptionConfig>,
}

fn default_risk_aversion() -> f64 {
    DEFAULT_RISK_AVERSION
}

/// One alternative as entered by the user, before parsing and validation.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OptionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub outcomes: NumberList,

    #[serde(default)]
    pub probs: NumberList,
}

impl OptionConfig {
    pub fn new(name: &str, outcomes: &str, probs: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            outcomes: outcomes.into(),
            probs: probs.into(),
        }
    }

    /// The option's name, or "Option N" (1-based) when unnamed.
    pub fn display_name(&self, index: usize) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Option {}", index + 1),
        }
    }
}

impl Scenario {
    pub fn unit_label(&self) -> Option<&str> {
        match self.unit.as_deref().map(str::trim) {
            None | Some("") | Some("None") => None,
            Some(unit) => Some(unit),
        }
    }

    pub fn active_options(&self) -> &[OptionConfig] {
        match self.num_options {
            Some(n) if n < self.options.len() => &self.options[..n],
            _ => &self.options,
        }
    }

    pub fn scoring_config(&self) -> ScoringConfig {
        self.scoring.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::RiskPolicy;

    #[test]
    fn test_full_scenario_parse() {
        let yaml = r#"
unit: "€"
risk_aversion: 0.2
scoring:
  risk_policy: risk_seeking
options:
  - name: Startup bet
    outcomes: "2000€, -500€"
    probs: [0.2, 0.8]
  - outcomes: [100, 100]
    probs: "1, 0"
"#;
        let scenario: Scenario = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(scenario.unit_label(), Some("€"));
        assert_eq!(scenario.risk_aversion, 0.2);
        assert_eq!(scenario.scoring_config().risk_policy, RiskPolicy::RiskSeeking);
        assert_eq!(scenario.options.len(), 2);
        assert_eq!(scenario.options[0].outcomes.values(), vec![2000.0, -500.0]);
        assert_eq!(scenario.options[1].probs.values(), vec![1.0, 0.0]);
        assert_eq!(scenario.options[1].display_name(1), "Option 2");
    }

    #[test]
    fn test_minimal_scenario_defaults() {
        let yaml = r#"
options:
  - name: A
    outcomes: "1"
    probs: "1"
"#;
        let scenario: Scenario = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(scenario.risk_aversion, DEFAULT_RISK_AVERSION);
        assert_eq!(scenario.unit_label(), None);
        assert_eq!(scenario.scoring_config(), ScoringConfig::default());
    }

    #[test]
    fn test_unit_none_means_no_unit() {
        let scenario = Scenario {
            unit: Some("None".to_string()),
            risk_aversion: 0.1,
            num_options: None,
            scoring: None,
            options: vec![],
        };
        assert_eq!(scenario.unit_label(), None);
    }

    #[test]
    fn test_missing_num_options_evaluates_every_option() {
        let yaml = r#"
options:
  - outcomes: "1"
    probs: "1"
  - outcomes: "2"
    probs: "1"
  - outcomes: "3"
    probs: "1"
"#;
        let scenario: Scenario = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(scenario.num_options, None);
        assert_eq!(scenario.active_options().len(), 3);
    }

    #[test]
    fn test_num_options_limits_active_options() {
        let scenario = Scenario {
            unit: None,
            risk_aversion: 0.1,
            num_options: Some(1),
            scoring: None,
            options: vec![
                OptionConfig::new("A", "1", "1"),
                OptionConfig::new("B", "2", "1"),
            ],
        };
        assert_eq!(scenario.active_options().len(), 1);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "options: []\ncolour: blue\n";
        assert!(serde_saphyr::from_str::<Scenario>(yaml).is_err());
    }

    #[test]
    fn test_blank_name_falls_back() {
        let option = OptionConfig::new("  ", "1", "1");
        assert_eq!(option.display_name(4), "Option 5");
    }
}
