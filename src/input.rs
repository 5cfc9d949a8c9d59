use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

static NUMBER: OnceLock<Regex> = OnceLock::new();

fn number_pattern() -> &'static Regex {
    NUMBER.get_or_init(|| {
        Regex::new(r"-?(?:\d+\.?\d*|\.\d+)").expect("number pattern is a valid regex")
    })
}

/// Extract every number from free text.
///
/// Units and words are ignored, so "2000€, -500€" gives [2000.0, -500.0]
/// and "8 hours saved, 0" gives [8.0, 0.0].
pub fn parse_list(text: &str) -> Vec<f64> {
    number_pattern()
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// A list of numbers as written in a scenario file: either free text
/// (`"10€, 0€"`) or a plain list (`[10, 0]`).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum NumberList {
    Values(Vec<f64>),
    Text(String),
}

impl NumberList {
    pub fn values(&self) -> Vec<f64> {
        match self {
            NumberList::Values(values) => values.clone(),
            NumberList::Text(text) => parse_list(text),
        }
    }
}

impl Default for NumberList {
    fn default() -> Self {
        NumberList::Text(String::new())
    }
}

impl From<&str> for NumberList {
    fn from(text: &str) -> Self {
        NumberList::Text(text.to_string())
    }
}
