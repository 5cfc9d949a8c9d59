pub mod formatter;

pub use formatter::{
    format_comparison, format_csv, format_distribution_summary, format_json,
    format_recommendation, format_results_table, format_tsv, format_value, header_with_unit,
    should_use_colors, ScoredOption,
};
