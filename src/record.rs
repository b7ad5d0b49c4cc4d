//! The country-year observation and the names of its fields.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::error::QueryError;

/// One country-year row of the emissions dataset.
///
/// `name` and `year` are always present. Each emission figure is `None`
/// when the source left the cell empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    #[serde(rename = "country")]
    pub name: String,
    pub year: i64,
    pub electricity_and_heat_co2_emissions: Option<f64>,
    pub electricity_and_heat_co2_emissions_per_capita: Option<f64>,
    pub energy_co2_emissions: Option<f64>,
    pub energy_co2_emissions_per_capita: Option<f64>,
    pub total_co2_emissions_excluding_lucf: Option<f64>,
    pub total_co2_emissions_excluding_lucf_per_capita: Option<f64>,
}

impl Record {
    /// A record with no emission figures; handy as a starting point in tests.
    pub fn new(name: impl Into<String>, year: i64) -> Self {
        Record {
            name: name.into(),
            year,
            electricity_and_heat_co2_emissions: None,
            electricity_and_heat_co2_emissions_per_capita: None,
            energy_co2_emissions: None,
            energy_co2_emissions_per_capita: None,
            total_co2_emissions_excluding_lucf: None,
            total_co2_emissions_excluding_lucf_per_capita: None,
        }
    }

    /// Returns a copy of this record with one emission field replaced.
    ///
    /// Passing `Field::Name` or `Field::Year` leaves the record unchanged.
    pub fn with_emission(mut self, field: Field, value: Option<f64>) -> Self {
        if let Some(slot) = self.emission_slot(field) {
            *slot = value;
        }
        self
    }

    pub fn emission(&self, field: Field) -> Option<f64> {
        match field {
            Field::Name | Field::Year => None,
            Field::ElectricityAndHeat => self.electricity_and_heat_co2_emissions,
            Field::ElectricityAndHeatPerCapita => {
                self.electricity_and_heat_co2_emissions_per_capita
            }
            Field::Energy => self.energy_co2_emissions,
            Field::EnergyPerCapita => self.energy_co2_emissions_per_capita,
            Field::TotalExcludingLucf => self.total_co2_emissions_excluding_lucf,
            Field::TotalExcludingLucfPerCapita => {
                self.total_co2_emissions_excluding_lucf_per_capita
            }
        }
    }

    fn emission_slot(&mut self, field: Field) -> Option<&mut Option<f64>> {
        match field {
            Field::Name | Field::Year => None,
            Field::ElectricityAndHeat => Some(&mut self.electricity_and_heat_co2_emissions),
            Field::ElectricityAndHeatPerCapita => {
                Some(&mut self.electricity_and_heat_co2_emissions_per_capita)
            }
            Field::Energy => Some(&mut self.energy_co2_emissions),
            Field::EnergyPerCapita => Some(&mut self.energy_co2_emissions_per_capita),
            Field::TotalExcludingLucf => Some(&mut self.total_co2_emissions_excluding_lucf),
            Field::TotalExcludingLucfPerCapita => {
                Some(&mut self.total_co2_emissions_excluding_lucf_per_capita)
            }
        }
    }
}

/// Declaration order matches [`Field::ALL`], so `field as usize` indexes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Year,
    ElectricityAndHeat,
    ElectricityAndHeatPerCapita,
    Energy,
    EnergyPerCapita,
    TotalExcludingLucf,
    TotalExcludingLucfPerCapita,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Name,
        Field::Year,
        Field::ElectricityAndHeat,
        Field::ElectricityAndHeatPerCapita,
        Field::Energy,
        Field::EnergyPerCapita,
        Field::TotalExcludingLucf,
        Field::TotalExcludingLucfPerCapita,
    ];

    pub const EMISSIONS: [Field; 6] = [
        Field::ElectricityAndHeat,
        Field::ElectricityAndHeatPerCapita,
        Field::Energy,
        Field::EnergyPerCapita,
        Field::TotalExcludingLucf,
        Field::TotalExcludingLucfPerCapita,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Year => "year",
            Field::ElectricityAndHeat => "electricity_and_heat_co2_emissions",
            Field::ElectricityAndHeatPerCapita => "electricity_and_heat_co2_emissions_per_capita",
            Field::Energy => "energy_co2_emissions",
            Field::EnergyPerCapita => "energy_co2_emissions_per_capita",
            Field::TotalExcludingLucf => "total_co2_emissions_excluding_lucf",
            Field::TotalExcludingLucfPerCapita => "total_co2_emissions_excluding_lucf_per_capita",
        }
    }

    /// Column header used by the CSV source. Only `name` differs.
    pub fn header(self) -> &'static str {
        match self {
            Field::Name => "country",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = QueryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("country") {
            return Ok(Field::Name);
        }
        Field::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| QueryError::UnknownField(trimmed.to_string()))
    }
}
