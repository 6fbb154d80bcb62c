// Parsing utilities
pub mod parse_date;
pub mod parse_float;

// URL handling utilities
pub mod query_string;

// Re-export all utilities for convenient access
pub use parse_date::{parse_date, parse_optional_date, InvalidDate};
pub use parse_float::parse_float;
pub use query_string::{build_query_string, with_search_query};
