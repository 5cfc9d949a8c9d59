pub mod config;
pub mod engine;
pub mod validation;

pub use config::*;
pub use engine::{
    compare_alternatives, compare_alternatives_with, evaluate, rank_alternatives, Comparison,
    EvaluationResult, Preference, RankedAlternative,
};
pub use validation::{
    validate, validate_risk_aversion, validate_scoring, validate_with, Distribution,
    ValidationError,
};
