use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use decision_engine::config::{self, Scenario};
use decision_engine::output::{self, ScoredOption};
use decision_engine::scoring::{self, Distribution, RiskPolicy, ScoringConfig};

const EXIT_SUCCESS: i32 = 0;
const EXIT_VALIDATION: i32 = 1;
const EXIT_CONFIG: i32 = 4;

const MODEL_HELP: &str = "\
Compare options under uncertainty by risk-adjusted score.

For each option, from its outcomes and their probabilities:

  Expected Value (EV)  average result if you repeated the decision many times
  Variance (Var)       how unpredictable the outcomes are (higher = more uncertainty)
  Risk aversion (λ)    how much uncertainty is penalized; λ = 0 cares only about EV

  Model: Score = EV − λ · Var

Options are ranked by score, highest first. Variance is a simplified risk proxy,
probabilities are your own estimates, and each decision is evaluated one-shot.";

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum Format {
    /// Aligned table with a recommendation line
    #[default]
    Table,
    /// Tab-separated: rank, option, ev, var, score
    Tsv,
    /// CSV with a header row
    Csv,
    /// Full-precision JSON
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank options by risk-adjusted score (default if no subcommand)
    Rank {
        /// Load a built-in example scenario instead of a file
        #[arg(short, long)]
        example: Option<String>,

        /// How many options to evaluate (2-6)
        #[arg(short = 'n', long)]
        options: Option<usize>,

        /// Risk aversion (λ); overrides the scenario's value
        #[arg(short, long, allow_negative_numbers = true)]
        lambda: Option<f64>,

        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Compare two alternatives given inline
    Compare {
        /// Outcomes of alternative A, e.g. "100, -50"
        #[arg(long, allow_hyphen_values = true)]
        a: String,

        /// Probabilities of alternative A, e.g. "0.5, 0.5"
        #[arg(long)]
        a_probs: String,

        /// Outcomes of alternative B
        #[arg(long, allow_hyphen_values = true)]
        b: String,

        /// Probabilities of alternative B
        #[arg(long)]
        b_probs: String,

        /// Risk aversion (λ)
        #[arg(short, long, allow_negative_numbers = true, default_value_t = config::DEFAULT_RISK_AVERSION)]
        lambda: f64,

        /// Allow a negative λ (risk-seeking)
        #[arg(long)]
        risk_seeking: bool,
    },
    /// List built-in example scenarios
    Examples,
    /// Print a scenario as JSON
    Export {
        /// Export a built-in example instead of a file
        #[arg(short, long)]
        example: Option<String>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "decision-engine")]
#[command(about = "Compare options under uncertainty by risk-adjusted score")]
#[command(long_about = MODEL_HELP)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to scenario file (defaults to ~/.config/decision-engine/scenario.yaml)
    #[arg(short = 'c', long = "scenario", global = true)]
    scenario: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Pick the scenario: built-in example, explicit file, default file, or the starter options.
fn resolve_scenario(
    example: Option<&str>,
    path: Option<PathBuf>,
    num_options: Option<usize>,
    verbose: bool,
) -> anyhow::Result<Scenario> {
    if let Some(slug) = example {
        let scenario = config::find_example(slug).ok_or_else(|| {
            let known: Vec<&str> = config::examples().iter().map(|e| e.slug).collect();
            anyhow::anyhow!("Unknown example '{}'. Available: {}", slug, known.join(", "))
        })?;
        if verbose {
            eprintln!("Loaded example '{}'", slug);
        }
        return Ok(scenario);
    }

    if path.is_some() || config::get_scenario_path().is_ok_and(|p| p.exists()) {
        let scenario = config::load_scenario(path)?;
        if verbose {
            eprintln!("Loaded scenario with {} options", scenario.options.len());
        }
        return Ok(scenario);
    }

    if verbose {
        eprintln!("No scenario file, using starter options");
    }
    Ok(config::default_scenario(num_options.unwrap_or(config::MIN_OPTIONS)))
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Rank {
        example: None,
        options: None,
        lambda: None,
        format: Format::Table,
    });
    let start_time = Instant::now();
    let scenario_path = cli.scenario.map(PathBuf::from);

    match command {
        Commands::Rank {
            example,
            options,
            lambda,
            format,
        } => {
            if let Some(n) = options {
                if !(config::MIN_OPTIONS..=config::MAX_OPTIONS).contains(&n) {
                    eprintln!(
                        "Invalid option count {}. Must be between {} and {}.",
                        n,
                        config::MIN_OPTIONS,
                        config::MAX_OPTIONS
                    );
                    std::process::exit(EXIT_CONFIG);
                }
            }

            let mut scenario =
                match resolve_scenario(example.as_deref(), scenario_path, options, cli.verbose) {
                    Ok(s) => s,
                    Err(e) => {
                        eprintln!("Config error: {:#}", e);
                        std::process::exit(EXIT_CONFIG);
                    }
                };
            if options.is_some() {
                scenario.num_options = options;
            }

            // Validate scoring config at startup
            let scoring_config = scenario.scoring_config();
            if let Err(errors) = scoring::validate_scoring(&scoring_config) {
                eprintln!("Scoring config errors:");
                for error in errors {
                    eprintln!("  - {}", error);
                }
                std::process::exit(EXIT_CONFIG);
            }

            let lambda = lambda.unwrap_or(scenario.risk_aversion);
            let lambda = match scoring::validate_risk_aversion(lambda, &scoring_config) {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("Invalid input: {}", e);
                    std::process::exit(EXIT_VALIDATION);
                }
            };

            let named = match config::build_distributions(&scenario) {
                Ok(n) => n,
                Err(e) => {
                    eprintln!("Invalid input: {:#}", e);
                    std::process::exit(EXIT_VALIDATION);
                }
            };

            if cli.verbose {
                eprintln!("Evaluating {} options at λ = {}", named.len(), lambda);
            }

            let (names, distributions): (Vec<String>, Vec<Distribution>) = named.into_iter().unzip();
            let ranked =
                scoring::rank_alternatives(&distributions, lambda, scoring_config.tie_tolerance);
            let scored: Vec<ScoredOption> = ranked
                .iter()
                .map(|r| ScoredOption {
                    name: &names[r.index],
                    rank: r.rank,
                    result: r.result,
                })
                .collect();

            let unit = scenario.unit_label();
            match format {
                Format::Table => {
                    let use_colors = output::should_use_colors();
                    println!("{}", output::format_results_table(&scored, unit, use_colors));
                    println!();
                    println!("{}", output::format_recommendation(&scored, use_colors));
                }
                Format::Tsv => println!("{}", output::format_tsv(&scored)),
                Format::Csv => println!("{}", output::format_csv(&scored, unit)),
                Format::Json => match output::format_json(&scored, lambda, unit) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("{:#}", e);
                        std::process::exit(EXIT_CONFIG);
                    }
                },
            }

            if cli.verbose {
                eprintln!();
                eprintln!("Total: {} options in {:?}", scored.len(), start_time.elapsed());
            }
        }
        Commands::Compare {
            a,
            a_probs,
            b,
            b_probs,
            lambda,
            risk_seeking,
        } => {
            let scoring_config = ScoringConfig {
                risk_policy: if risk_seeking {
                    RiskPolicy::RiskSeeking
                } else {
                    RiskPolicy::Averse
                },
                ..ScoringConfig::default()
            };

            let lambda = match scoring::validate_risk_aversion(lambda, &scoring_config) {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("Invalid input: {}", e);
                    std::process::exit(EXIT_VALIDATION);
                }
            };

            if cli.verbose {
                eprintln!("Comparing A and B at λ = {}", lambda);
            }

            let mut parsed = Vec::with_capacity(2);
            for (name, outcomes, probs) in [("A", &a, &a_probs), ("B", &b, &b_probs)] {
                let outcomes = decision_engine::input::parse_list(outcomes);
                let probs = decision_engine::input::parse_list(probs);
                match scoring::validate_with(outcomes, probs, &scoring_config) {
                    Ok(dist) => {
                        if cli.verbose {
                            eprintln!("{}", output::format_distribution_summary(name, &dist));
                        }
                        parsed.push(dist);
                    }
                    Err(e) => {
                        eprintln!("Invalid input: {}: {}", name, e);
                        std::process::exit(EXIT_VALIDATION);
                    }
                }
            }

            let comparison = scoring::compare_alternatives_with(
                &parsed[0],
                &parsed[1],
                lambda,
                scoring_config.tie_tolerance,
            );
            let use_colors = output::should_use_colors();
            println!(
                "{}",
                output::format_comparison(&comparison, ("A", "B"), None, use_colors)
            );

            if cli.verbose {
                eprintln!();
                eprintln!("Compared in {:?}", start_time.elapsed());
            }
        }
        Commands::Examples => {
            let examples = config::examples();
            if cli.verbose {
                eprintln!("{} built-in examples", examples.len());
            }
            for example in examples {
                println!("{:<12} {}", example.slug, example.title);
            }
        }
        Commands::Export { example } => {
            let scenario = match resolve_scenario(example.as_deref(), scenario_path, None, cli.verbose) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Config error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };
            if cli.verbose {
                eprintln!(
                    "Exporting {} active options",
                    scenario.active_options().len()
                );
            }
            match config::scenario_to_json(&scenario) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("{:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
