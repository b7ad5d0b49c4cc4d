use std::{fmt, str::FromStr};

use crate::{
    collection::RecordList,
    error::{QueryError, QueryResult},
    record::{Field, Record},
};

/// Absolute difference under which two emission figures compare `equal`.
pub const FLOAT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    LessThan,
    Equal,
    GreaterThan,
}

impl Comparator {
    pub fn as_str(self) -> &'static str {
        match self {
            Comparator::LessThan => "less_than",
            Comparator::Equal => "equal",
            Comparator::GreaterThan => "greater_than",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Comparator {
    type Err = QueryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "less_than" | "<" => Ok(Comparator::LessThan),
            "equal" | "=" | "==" => Ok(Comparator::Equal),
            "greater_than" | ">" => Ok(Comparator::GreaterThan),
            other => Err(QueryError::UnknownComparator(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PredicateValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl PredicateValue {
    fn kind(&self) -> &'static str {
        match self {
            PredicateValue::Text(_) => "text",
            PredicateValue::Integer(_) => "integer",
            PredicateValue::Float(_) => "float",
        }
    }
}

impl fmt::Display for PredicateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredicateValue::Text(s) => write!(f, "'{s}'"),
            PredicateValue::Integer(i) => write!(f, "{i}"),
            PredicateValue::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for PredicateValue {
    fn from(value: &str) -> Self {
        PredicateValue::Text(value.to_string())
    }
}

impl From<String> for PredicateValue {
    fn from(value: String) -> Self {
        PredicateValue::Text(value)
    }
}

impl From<i32> for PredicateValue {
    fn from(value: i32) -> Self {
        PredicateValue::Integer(i64::from(value))
    }
}

impl From<i64> for PredicateValue {
    fn from(value: i64) -> Self {
        PredicateValue::Integer(value)
    }
}

impl From<f64> for PredicateValue {
    fn from(value: f64) -> Self {
        PredicateValue::Float(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Test {
    Name(String),
    Year(i64),
    Emission(f64),
}

/// A validated `(field, comparator, value)` triple.
///
/// Construction enforces the per-field rules, so a `Predicate` that exists
/// can always be evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    field: Field,
    comparator: Comparator,
    test: Test,
}

impl Predicate {
    pub fn new(
        field: Field,
        comparator: Comparator,
        value: impl Into<PredicateValue>,
    ) -> QueryResult<Self> {
        let value = value.into();
        let invalid = |reason: String| QueryError::InvalidPredicate {
            field,
            comparator,
            reason,
        };
        let test = match (field, value) {
            (Field::Name, PredicateValue::Text(name)) => {
                if comparator != Comparator::Equal {
                    return Err(invalid("name only supports the equal comparator".into()));
                }
                Test::Name(name)
            }
            (Field::Name, other) => {
                return Err(invalid(format!(
                    "name expects a text value, got {} {other}",
                    other.kind()
                )));
            }
            (Field::Year, PredicateValue::Integer(year)) => Test::Year(year),
            (Field::Year, other) => {
                return Err(invalid(format!(
                    "year expects an integer value, got {} {other}",
                    other.kind()
                )));
            }
            (_, PredicateValue::Integer(i)) => Test::Emission(i as f64),
            (_, PredicateValue::Float(v)) if v.is_finite() => Test::Emission(v),
            (_, other) => {
                return Err(invalid(format!(
                    "{field} expects a finite number, got {} {other}",
                    other.kind()
                )));
            }
        };
        Ok(Predicate {
            field,
            comparator,
            test,
        })
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn comparator(&self) -> Comparator {
        self.comparator
    }

    pub fn matches(&self, record: &Record) -> bool {
        match &self.test {
            Test::Name(name) => record.name == *name,
            Test::Year(year) => match self.comparator {
                Comparator::LessThan => record.year < *year,
                Comparator::Equal => record.year == *year,
                Comparator::GreaterThan => record.year > *year,
            },
            Test::Emission(target) => {
                let Some(actual) = record.emission(self.field) else {
                    return false;
                };
                match self.comparator {
                    Comparator::LessThan => actual < *target,
                    Comparator::Equal => (actual - target).abs() <= FLOAT_TOLERANCE,
                    Comparator::GreaterThan => actual > *target,
                }
            }
        }
    }

    /// Returns a new list holding the matching records in their original order.
    pub fn apply(&self, rows: &RecordList) -> RecordList {
        rows.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match &self.test {
            Test::Name(name) => PredicateValue::Text(name.clone()),
            Test::Year(year) => PredicateValue::Integer(*year),
            Test::Emission(v) => PredicateValue::Float(*v),
        };
        write!(f, "{} {} {}", self.field, self.comparator, value)
    }
}

pub fn filter(
    rows: &RecordList,
    field: Field,
    comparator: Comparator,
    value: impl Into<PredicateValue>,
) -> QueryResult<RecordList> {
    Ok(Predicate::new(field, comparator, value)?.apply(rows))
}

/// Keeps the records that satisfy every predicate.
pub fn filter_all(rows: &RecordList, predicates: &[Predicate]) -> RecordList {
    rows.iter()
        .filter(|r| predicates.iter().all(|p| p.matches(r)))
        .cloned()
        .collect()
}

pub fn count(rows: &RecordList) -> usize {
    rows.iter().count()
}

pub fn parse_predicates(expressions: &[String]) -> QueryResult<Vec<Predicate>> {
    expressions.iter().map(|e| parse_predicate(e)).collect()
}

const REJECTED_OPERATORS: [&str; 3] = ["!=", ">=", "<="];
const SYMBOL_OPERATORS: [&str; 4] = ["==", "=", ">", "<"];
const WORD_OPERATORS: [&str; 3] = [" less_than ", " greater_than ", " equal "];

/// Parses `field <op> value`, e.g. `year = 1990` or `country equal 'Mexico'`.
///
/// The expression splits at the first comparator outside quotes. Quoted
/// values are always text. Unquoted values are read as an integer, then a
/// float, then text.
pub fn parse_predicate(expression: &str) -> QueryResult<Predicate> {
    let trimmed = expression.trim();
    if trimmed.is_empty() {
        return Err(QueryError::MalformedPredicate(String::new()));
    }

    let Some((idx, needle)) = find_operator(trimmed) else {
        return Err(QueryError::MalformedPredicate(trimmed.to_string()));
    };
    if REJECTED_OPERATORS.contains(&needle) {
        return Err(QueryError::UnknownComparator(needle.to_string()));
    }
    let left = &trimmed[..idx];
    let right = &trimmed[idx + needle.len()..];
    build_predicate(left, needle, right)
}

/// Byte offset and text of the earliest operator outside single or double
/// quotes. Word operators match case-insensitively.
fn find_operator(expression: &str) -> Option<(usize, &'static str)> {
    let lowered = expression.to_ascii_lowercase();
    let mut quote: Option<char> = None;
    for (idx, ch) in expression.char_indices() {
        match quote {
            Some(open) => {
                if ch == open {
                    quote = None;
                }
                continue;
            }
            None if ch == '\'' || ch == '"' => {
                quote = Some(ch);
                continue;
            }
            None => {}
        }
        let rest = &lowered[idx..];
        let found = REJECTED_OPERATORS
            .iter()
            .chain(&SYMBOL_OPERATORS)
            .chain(&WORD_OPERATORS)
            .copied()
            .find(|needle| rest.starts_with(*needle));
        if let Some(needle) = found {
            return Some((idx, needle));
        }
    }
    None
}

fn build_predicate(left: &str, op: &str, right: &str) -> QueryResult<Predicate> {
    let field: Field = left.parse()?;
    let comparator: Comparator = op.parse()?;
    Predicate::new(field, comparator, parse_literal(right.trim()))
}

fn parse_literal(raw: &str) -> PredicateValue {
    if let Some(text) = unquote(raw) {
        return PredicateValue::Text(text.to_string());
    }
    if let Ok(i) = raw.parse::<i64>() {
        return PredicateValue::Integer(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return PredicateValue::Float(f);
    }
    PredicateValue::Text(raw.to_string())
}

fn unquote(value: &str) -> Option<&str> {
    if value.len() >= 2 {
        let bytes = value.as_bytes();
        if (bytes[0] == b'"' && bytes[value.len() - 1] == b'"')
            || (bytes[0] == b'\'' && bytes[value.len() - 1] == b'\'')
        {
            return Some(&value[1..value.len() - 1]);
        }
    }
    None
}
