use super::schema::{OptionConfig, Scenario, DEFAULT_RISK_AVERSION};

/// Upper bound on the number of default options.
pub const MAX_OPTIONS: usize = 6;
pub const MIN_OPTIONS: usize = 2;

/// A built-in scenario that can be loaded by its slug.
pub struct Example {
    pub slug: &'static str,
    pub title: &'static str,
    pub scenario: Scenario,
}

/// All built-in examples, in display order.
pub fn examples() -> Vec<Example> {
    vec![
        Example {
            slug: "investment",
            title: "Investment (risky vs stable)",
            scenario: Scenario {
                unit: Some("€".to_string()),
                risk_aversion: 0.10,
                num_options: Some(3),
                scoring: None,
                options: vec![
                    OptionConfig::new("Startup bet", "2000€, -500€", "0.2, 0.8"),
                    OptionConfig::new("Index fund", "300€, 50€", "0.6, 0.4"),
                    OptionConfig::new("Savings", "100€, 100€", "1, 0"),
                ],
            },
        },
        Example {
            slug: "study-plan",
            title: "Study plan (time payoff)",
            scenario: Scenario {
                unit: Some("hours".to_string()),
                risk_aversion: 0.15,
                num_options: Some(2),
                scoring: None,
                options: vec![
                    OptionConfig::new("Plan A", "8 hours saved, 0", "0.6, 0.4"),
                    OptionConfig::new("Plan B", "5 hours saved, 5 hours saved", "1, 0"),
                ],
            },
        },
    ]
}

/// Look up a built-in example by slug (case-insensitive).
pub fn find_example(slug: &str) -> Option<Scenario> {
    examples()
        .into_iter()
        .find(|e| e.slug.eq_ignore_ascii_case(slug.trim()))
        .map(|e| e.scenario)
}

/// The starter options used when no scenario is given.
///
/// `num_options` is clamped to `MIN_OPTIONS..=MAX_OPTIONS`.
pub fn default_scenario(num_options: usize) -> Scenario {
    let options = vec![
        OptionConfig::new("Option 1", "10€, 0€", "0.5, 0.5"),
        OptionConfig::new("Option 2", "6€, 6€", "1, 0"),
        OptionConfig::new("Option 3", "12€, -2€", "0.7, 0.3"),
        OptionConfig::new("Option 4", "8€, 3€", "0.6, 0.4"),
        OptionConfig::new("Option 5", "15€, -5€", "0.5, 0.5"),
        OptionConfig::new("Option 6", "5€, 5€", "1, 0"),
    ];

    Scenario {
        unit: None,
        risk_aversion: DEFAULT_RISK_AVERSION,
        num_options: Some(num_options.clamp(MIN_OPTIONS, MAX_OPTIONS)),
        scoring: None,
        options,
    }
}
