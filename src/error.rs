use thiserror::Error;

use crate::{filter::Comparator, record::Field};

/// Failures raised by the filter engine and the derived-metric queries.
///
/// A lookup that finds nothing is not an error; queries report that as
/// `None` so callers can branch on it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("Invalid predicate '{field} {comparator}': {reason}")]
    InvalidPredicate {
        field: Field,
        comparator: Comparator,
        reason: String,
    },

    #[error("Cannot divide by {field} for '{name}' in {year}: value is missing or zero")]
    DivisionFault { name: String, year: i64, field: Field },

    #[error("Value of {field} is missing for '{name}' in {year}")]
    MissingValue { name: String, year: i64, field: Field },

    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Unknown comparator '{0}' (expected less_than, equal or greater_than)")]
    UnknownComparator(String),

    #[error("Failed to parse predicate expression '{0}'")]
    MalformedPredicate(String),
}

pub type QueryResult<T> = std::result::Result<T, QueryError>;
