//! Proptest strategies for casewright property-based testing
//!
//! Reusable strategies for generating valid issues, steps, test data, cases
//! and patterns across all casewright crates.

pub mod strategies;

pub use strategies::{
    strategy_data_pattern, strategy_issue_text, strategy_json_value, strategy_keyword_free_issue,
    strategy_pattern, strategy_step, strategy_test_case, strategy_test_data, strategy_ticket_text,
    strategy_value_type,
};
