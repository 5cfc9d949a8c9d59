mod presets;
mod schema;

pub use presets::{default_scenario, examples, find_example, Example, MAX_OPTIONS, MIN_OPTIONS};
pub use schema::{OptionConfig, Scenario, DEFAULT_RISK_AVERSION};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::scoring::{validate_with, Distribution};

/// Get the config directory path (~/.config/decision-engine/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("decision-engine"))
}

/// Get the default scenario file path (~/.config/decision-engine/scenario.yaml)
pub fn get_scenario_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("scenario.yaml"))
}

/// Load a scenario from a YAML or JSON file
///
/// # Arguments
///
/// * `path` - Optional path to the scenario file. If None, uses the default path
///   (~/.config/decision-engine/scenario.yaml)
///
/// Files ending in `.json` are parsed as JSON, everything else as YAML.
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist
/// - The file cannot be read
/// - The contents cannot be parsed
pub fn load_scenario(path: Option<PathBuf>) -> Result<Scenario> {
    let scenario_path = match path {
        Some(p) => p,
        None => get_scenario_path()?,
    };

    if !scenario_path.exists() {
        anyhow::bail!(
            "Scenario file not found at {}. Pass --scenario or --example",
            scenario_path.display()
        );
    }

    let content = fs::read_to_string(&scenario_path)
        .with_context(|| format!("Failed to read scenario file at {}", scenario_path.display()))?;

    parse_scenario(&content, &scenario_path)
}

fn parse_scenario(content: &str, path: &Path) -> Result<Scenario> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(content)
            .with_context(|| format!("Failed to parse scenario: invalid JSON in {}", path.display()))
    } else {
        serde_saphyr::from_str(content)
            .with_context(|| format!("Failed to parse scenario: invalid YAML in {}", path.display()))
    }
}

/// Serialize a scenario as pretty JSON, the export format.
///
/// Only the active options are written, with `num_options` matching their count.
pub fn scenario_to_json(scenario: &Scenario) -> Result<String> {
    let options = scenario.active_options().to_vec();
    let exported = Scenario {
        num_options: Some(options.len()),
        options,
        ..scenario.clone()
    };
    serde_json::to_string_pretty(&exported).context("Failed to serialize scenario")
}

/// Parse and validate every active option of a scenario.
///
/// Returns (name, distribution) pairs in input order. The first invalid option
/// fails the whole scenario, with its name in the error context.
pub fn build_distributions(scenario: &Scenario) -> Result<Vec<(String, Distribution)>> {
    let scoring = scenario.scoring_config();

    scenario
        .active_options()
        .iter()
        .enumerate()
        .map(|(i, option)| -> Result<(String, Distribution)> {
            let name = option.display_name(i);
            let dist = validate_with(option.outcomes.values(), option.probs.values(), &scoring)
                .with_context(|| name.clone())?;
            Ok((name, dist))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_yaml_scenario() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "unit: hours\noptions:\n  - name: A\n    outcomes: \"8, 0\"\n    probs: \"0.6, 0.4\""
        )
        .unwrap();

        let scenario = load_scenario(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(scenario.unit_label(), Some("hours"));
        assert_eq!(scenario.options.len(), 1);
    }

    #[test]
    fn test_load_json_scenario() {
        // Payload shape of an exported scenario
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"unit": "None", "risk_aversion": 0.25, "num_options": 2,
                "options": [{{"name": "A", "outcomes": "10, 0", "probs": "0.5, 0.5"}},
                            {{"name": "B", "outcomes": "6", "probs": "1"}}]}}"#
        )
        .unwrap();

        let scenario = load_scenario(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(scenario.risk_aversion, 0.25);
        assert_eq!(scenario.unit_label(), None);
        assert_eq!(scenario.active_options().len(), 2);
    }

    #[test]
    fn test_missing_scenario_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_scenario(Some(dir.path().join("missing.yaml"))).unwrap_err();
        assert!(err.to_string().contains("Scenario file not found"));
    }

    #[test]
    fn test_invalid_yaml() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "options: [unclosed").unwrap();
        let err = load_scenario(Some(file.path().to_path_buf())).unwrap_err();
        assert!(err.to_string().contains("invalid YAML"));
    }

    #[test]
    fn test_export_roundtrip() {
        let scenario = find_example("investment").unwrap();
        let json = scenario_to_json(&scenario).unwrap();
        let parsed: Scenario = serde_json::from_str(&json).unwrap();
        assert_eq!(scenario, parsed);
    }

    #[test]
    fn test_export_writes_only_active_options() {
        let json = scenario_to_json(&default_scenario(2)).unwrap();
        let parsed: Scenario = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.num_options, Some(2));
        assert_eq!(parsed.options.len(), 2);
        assert_eq!(parsed.options[1].display_name(1), "Option 2");
    }

    #[test]
    fn test_build_distributions() {
        let scenario = find_example("investment").unwrap();
        let dists = build_distributions(&scenario).unwrap();
        assert_eq!(dists.len(), 3);
        assert_eq!(dists[0].0, "Startup bet");
        assert_eq!(dists[0].1.outcomes(), &[2000.0, -500.0]);
    }

    #[test]
    fn test_build_distributions_names_invalid_option() {
        let mut scenario = default_scenario(2);
        scenario.options[1] = OptionConfig::new("Shaky", "1, 2", "0.5, 0.6");

        let err = build_distributions(&scenario).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.starts_with("Shaky: probabilities must sum to 1"));
    }
}
