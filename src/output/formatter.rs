use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::scoring::{Comparison, Distribution, EvaluationResult, Preference};

/// An evaluated option ready for display, in ranked order
#[derive(Debug, Clone, Serialize)]
pub struct ScoredOption<'a> {
    pub name: &'a str,
    pub rank: usize,
    #[serde(flatten)]
    pub result: EvaluationResult,
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Round to 2 decimals for display
pub fn format_value(value: f64) -> String {
    let rounded = format!("{:.2}", value);
    // Avoid "-0.00"
    if rounded == "-0.00" {
        "0.00".to_string()
    } else {
        rounded
    }
}

/// Column header with an optional unit suffix: "EV €", "Score hours"
pub fn header_with_unit(label: &str, unit: Option<&str>) -> String {
    match unit {
        Some(u) => format!("{} {}", label, u),
        None => label.to_string(),
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format ranked options as a table: Rank, Option, EV, Var, Score
/// Numeric columns are right-aligned; names are cut to the terminal width
pub fn format_results_table(options: &[ScoredOption], unit: Option<&str>, use_colors: bool) -> String {
    if options.is_empty() {
        return "No options to compare.".to_string();
    }

    let ev_header = header_with_unit("EV", unit);
    let score_header = header_with_unit("Score", unit);

    let rows: Vec<(String, String, String, String)> = options
        .iter()
        .map(|o| {
            (
                format!("{:>2}.", o.rank),
                format_value(o.result.expected_value),
                format_value(o.result.variance),
                format_value(o.result.score),
            )
        })
        .collect();

    let ev_width = rows.iter().map(|r| r.1.len()).chain([ev_header.chars().count()]).max().unwrap_or(0);
    let var_width = rows.iter().map(|r| r.2.len()).chain([3]).max().unwrap_or(0);
    let score_width = rows.iter().map(|r| r.3.len()).chain([score_header.chars().count()]).max().unwrap_or(0);
    let separator = "  ";

    // Index column: 3 chars + 1 space
    let fixed_width = 4 + ev_width + var_width + score_width + separator.len() * 3;
    let longest_name = options.iter().map(|o| o.name.chars().count()).max().unwrap_or(0).max(6);
    let name_width = match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => longest_name.min(width - fixed_width),
        // Very narrow terminal
        Some(_) => longest_name.min(20),
        // No terminal (pipe), don't truncate
        None => longest_name,
    };

    let header = format!(
        "    {:<nw$}{sep}{:>ew$}{sep}{:>vw$}{sep}{:>sw$}",
        "Option",
        ev_header,
        "Var",
        score_header,
        nw = name_width,
        ew = ev_width,
        vw = var_width,
        sw = score_width,
        sep = separator
    );

    let mut lines = Vec::with_capacity(options.len() + 1);
    lines.push(if use_colors {
        header.dimmed().to_string()
    } else {
        header
    });

    for (option, (index, ev, var, score)) in options.iter().zip(rows) {
        let name = format!("{:<nw$}", truncate_name(option.name, name_width), nw = name_width);
        let ev = format!("{:>w$}", ev, w = ev_width);
        let var = format!("{:>w$}", var, w = var_width);
        let score = format!("{:>w$}", score, w = score_width);

        let line = if use_colors {
            format!(
                "{} {}{sep}{}{sep}{}{sep}{}",
                index.dimmed(),
                name,
                ev,
                var,
                score.bold(),
                sep = separator
            )
        } else {
            format!(
                "{} {}{sep}{}{sep}{}{sep}{}",
                index,
                name,
                ev,
                var,
                score,
                sep = separator
            )
        };
        lines.push(line);
    }

    lines.join("\n")
}

/// One-line description of a validated distribution, for verbose output
pub fn format_distribution_summary(name: &str, distribution: &Distribution) -> String {
    let sum: f64 = distribution.probabilities().iter().sum();
    format!(
        "{}: {} outcomes, probabilities sum to {:.6}",
        name,
        distribution.len(),
        sum
    )
}

/// Format ranked options as tab-separated values for scripting
/// Columns: rank, option, ev, var, score (no headers, no colors)
pub fn format_tsv(options: &[ScoredOption]) -> String {
    options
        .iter()
        .map(|o| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                o.rank,
                o.name,
                format_value(o.result.expected_value),
                format_value(o.result.variance),
                format_value(o.result.score)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Quote a CSV field when it contains a delimiter, quote or newline
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Format ranked options as CSV with a header row
/// Header: Option,EV <unit>,Var,Score <unit>
pub fn format_csv(options: &[ScoredOption], unit: Option<&str>) -> String {
    let mut lines = vec![[
        "Option".to_string(),
        csv_field(&header_with_unit("EV", unit)),
        "Var".to_string(),
        csv_field(&header_with_unit("Score", unit)),
    ]
    .join(",")];

    lines.extend(options.iter().map(|o| {
        format!(
            "{},{},{},{}",
            csv_field(o.name),
            format_value(o.result.expected_value),
            format_value(o.result.variance),
            format_value(o.result.score)
        )
    }));

    lines.join("\n")
}

#[derive(Serialize)]
struct JsonReport<'a> {
    risk_aversion: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<&'a str>,
    results: &'a [ScoredOption<'a>],
}

/// Format ranked options as pretty JSON at full precision
pub fn format_json(options: &[ScoredOption], risk_aversion: f64, unit: Option<&str>) -> Result<String> {
    let report = JsonReport {
        risk_aversion,
        unit,
        results: options,
    };
    serde_json::to_string_pretty(&report).context("Failed to serialize results")
}

/// Recommendation line for ranked options: the single best one, or all tied leaders
pub fn format_recommendation(options: &[ScoredOption], use_colors: bool) -> String {
    let leaders: Vec<&str> = options
        .iter()
        .filter(|o| o.rank == 1)
        .map(|o| o.name)
        .collect();

    let line = match leaders.as_slice() {
        [] => return String::new(),
        [best] => {
            let best = if use_colors {
                best.bold().green().to_string()
            } else {
                best.to_string()
            };
            format!("Best choice: {} (highest risk-adjusted score).", best)
        }
        tied => format!("Tie between {} (equal risk-adjusted scores).", tied.join(", ")),
    };

    format!("{}\nModel: Score = EV − λ · Var", line)
}

/// Format a two-way comparison: both results, then the preferred alternative
pub fn format_comparison(
    comparison: &Comparison,
    names: (&str, &str),
    unit: Option<&str>,
    use_colors: bool,
) -> String {
    let (first_rank, second_rank) = match comparison.preference {
        Preference::First => (1, 2),
        Preference::Second => (2, 1),
        Preference::Tie => (1, 1),
    };

    let mut options = vec![
        ScoredOption {
            name: names.0,
            rank: first_rank,
            result: comparison.first,
        },
        ScoredOption {
            name: names.1,
            rank: second_rank,
            result: comparison.second,
        },
    ];
    // Stable: a tie keeps input order
    options.sort_by_key(|o| o.rank);

    format!(
        "{}\n\n{}",
        format_results_table(&options, unit, use_colors),
        format_recommendation(&options, use_colors)
    )
}
