//! Derived-metric queries composed from filters over the full dataset.
//!
//! Every query reports "no matching row" as `None`. Errors are reserved for
//! rows that exist but cannot produce a number.

use crate::{
    collection::RecordList,
    error::{QueryError, QueryResult},
    filter::{Comparator, PredicateValue, count, filter},
    record::{Field, Record},
};

/// A year every entity in the dataset reports exactly once.
pub const CENSUS_YEAR: i64 = 2000;
pub const REFERENCE_ENTITY: &str = "United States";
pub const LOOKUP_ENTITY: &str = "Mexico";
pub const POPULATION_ENTITY: &str = "Luxembourg";
pub const POPULATION_YEAR: i64 = 2014;
pub const GROWTH_ENTITY: &str = "China";
pub const GROWTH_FIELD: Field = Field::ElectricityAndHeat;
pub const GROWTH_EARLIER_YEAR: i64 = 1990;
pub const GROWTH_LATER_YEAR: i64 = 2020;
pub const GROWTH_SPAN_YEARS: i64 = 30;
pub const PROJECTION_HORIZON_YEARS: i64 = 50;

/// Rows for `name` in `year`, in collection order.
pub fn entity_year(rows: &RecordList, name: &str, year: i64) -> QueryResult<RecordList> {
    let named = filter(rows, Field::Name, Comparator::Equal, name)?;
    filter(&named, Field::Year, Comparator::Equal, year)
}

fn first_entity_year(rows: &RecordList, name: &str, year: i64) -> QueryResult<Option<Record>> {
    Ok(entity_year(rows, name, year)?.first().cloned())
}

/// A figure that is absent or not finite cannot feed a calculation.
fn required(record: &Record, field: Field) -> QueryResult<f64> {
    record
        .emission(field)
        .filter(|value| value.is_finite())
        .ok_or_else(|| QueryError::MissingValue {
        name: record.name.clone(),
        year: record.year,
        field,
    })
}

fn divisor(record: &Record, field: Field) -> QueryResult<f64> {
    match record.emission(field) {
        Some(value) if value != 0.0 => Ok(value),
        _ => Err(QueryError::DivisionFault {
            name: record.name.clone(),
            year: record.year,
            field,
        }),
    }
}

pub fn entity_count(rows: &RecordList, year: i64) -> QueryResult<usize> {
    Ok(count(&filter(rows, Field::Year, Comparator::Equal, year)?))
}

pub fn entity_rows(rows: &RecordList, name: &str) -> QueryResult<RecordList> {
    filter(rows, Field::Name, Comparator::Equal, name)
}

/// Rows from `year` whose total per-capita emissions strictly exceed the
/// reference entity's value for that year.
pub fn exceeding_reference(
    rows: &RecordList,
    reference: &str,
    year: i64,
) -> QueryResult<Option<RecordList>> {
    let field = Field::TotalExcludingLucfPerCapita;
    let Some(reference_row) = first_entity_year(rows, reference, year)? else {
        return Ok(None);
    };
    let threshold = required(&reference_row, field)?;
    let same_year = filter(rows, Field::Year, Comparator::Equal, year)?;
    let above = filter(
        &same_year,
        field,
        Comparator::GreaterThan,
        PredicateValue::Float(threshold),
    )?;
    Ok(Some(above))
}

/// Total emissions divided by per-capita emissions for one entity-year.
pub fn implied_population(rows: &RecordList, name: &str, year: i64) -> QueryResult<Option<f64>> {
    let Some(record) = first_entity_year(rows, name, year)? else {
        return Ok(None);
    };
    let per_capita = divisor(&record, Field::TotalExcludingLucfPerCapita)?;
    let total = required(&record, Field::TotalExcludingLucf)?;
    Ok(Some(total / per_capita))
}

fn growth_endpoints(
    rows: &RecordList,
    name: &str,
    field: Field,
    earlier: i64,
    later: i64,
) -> QueryResult<Option<(f64, f64)>> {
    let named = filter(rows, Field::Name, Comparator::Equal, name)?;
    let earlier_rows = filter(&named, Field::Year, Comparator::Equal, earlier)?;
    let later_rows = filter(&named, Field::Year, Comparator::Equal, later)?;
    let (Some(start), Some(finish)) = (earlier_rows.first(), later_rows.first()) else {
        return Ok(None);
    };
    let base = divisor(start, field)?;
    let end = required(finish, field)?;
    Ok(Some((base, end)))
}

/// `value(later) / value(earlier)` for one entity.
pub fn growth_multiplier(
    rows: &RecordList,
    name: &str,
    field: Field,
    earlier: i64,
    later: i64,
) -> QueryResult<Option<f64>> {
    Ok(growth_endpoints(rows, name, field, earlier, later)?.map(|(base, end)| end / base))
}

/// Extends the constant annual growth rate seen between `earlier` and
/// `later` for `horizon` more years past `later`.
pub fn projected_value(
    rows: &RecordList,
    name: &str,
    field: Field,
    earlier: i64,
    later: i64,
    horizon: i64,
) -> QueryResult<Option<f64>> {
    let Some((base, end)) = growth_endpoints(rows, name, field, earlier, later)? else {
        return Ok(None);
    };
    Ok(Some(project(base, end, later - earlier, horizon)))
}

fn project(base: f64, end: f64, span_years: i64, horizon_years: i64) -> f64 {
    let annual_rate = (end / base).powf(1.0 / span_years as f64);
    end * annual_rate.powf(horizon_years as f64)
}

/// Number of countries, counted as the rows reported for [`CENSUS_YEAR`].
pub fn country_count(rows: &RecordList) -> QueryResult<usize> {
    entity_count(rows, CENSUS_YEAR)
}

pub fn mexico_rows(rows: &RecordList) -> QueryResult<Option<RecordList>> {
    lookup(rows, LOOKUP_ENTITY)
}

/// Rows for `name`, or `None` when the entity does not appear at all.
pub fn lookup(rows: &RecordList, name: &str) -> QueryResult<Option<RecordList>> {
    let found = entity_rows(rows, name)?;
    Ok((!found.is_empty()).then_some(found))
}

pub fn above_us_per_capita_1990(rows: &RecordList) -> QueryResult<Option<RecordList>> {
    exceeding_reference(rows, REFERENCE_ENTITY, 1990)
}

pub fn above_us_per_capita_2020(rows: &RecordList) -> QueryResult<Option<RecordList>> {
    exceeding_reference(rows, REFERENCE_ENTITY, 2020)
}

pub fn luxembourg_population_2014(rows: &RecordList) -> QueryResult<Option<f64>> {
    implied_population(rows, POPULATION_ENTITY, POPULATION_YEAR)
}

pub fn china_electricity_multiplier(rows: &RecordList) -> QueryResult<Option<f64>> {
    growth_multiplier(
        rows,
        GROWTH_ENTITY,
        GROWTH_FIELD,
        GROWTH_EARLIER_YEAR,
        GROWTH_LATER_YEAR,
    )
}

/// China's electricity-and-heat emissions projected to 2070.
pub fn china_electricity_projection(rows: &RecordList) -> QueryResult<Option<f64>> {
    let Some((base, end)) = growth_endpoints(
        rows,
        GROWTH_ENTITY,
        GROWTH_FIELD,
        GROWTH_EARLIER_YEAR,
        GROWTH_LATER_YEAR,
    )?
    else {
        return Ok(None);
    };
    Ok(Some(project(
        base,
        end,
        GROWTH_SPAN_YEARS,
        PROJECTION_HORIZON_YEARS,
    )))
}
