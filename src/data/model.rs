use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::DISPLAY_DATE_FORMAT;

use super::error::DataError;

// ---------------------------------------------------------------------------
// Variable – the five selectable categories
// ---------------------------------------------------------------------------

/// Category labels exactly as they appear in the `Nombre de la variable` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Variable {
    TemperaturaMinima,
    TemperaturaMaxima,
    HumedadMinima,
    HumedadMaxima,
    LluviaMaxima,
}

impl Variable {
    /// Dropdown order.
    pub const ALL: [Variable; 5] = [
        Variable::TemperaturaMinima,
        Variable::TemperaturaMaxima,
        Variable::HumedadMinima,
        Variable::HumedadMaxima,
        Variable::LluviaMaxima,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Variable::TemperaturaMinima => "Temperatura Mínima",
            Variable::TemperaturaMaxima => "Temperatura Máxima",
            Variable::HumedadMinima => "Humedad Mínima",
            Variable::HumedadMaxima => "Humedad Máxima",
            Variable::LluviaMaxima => "Lluvia máxima",
        }
    }

    pub fn from_label(label: &str) -> Option<Variable> {
        Self::ALL.into_iter().find(|v| v.label() == label)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Observation – one normalized row
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub variable_name: String,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// DateRange – inclusive query window
// ---------------------------------------------------------------------------

/// Inclusive `[start, end]` window. `start > end` is allowed and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parse `yyyy-mm-dd` boundaries coming from outside the dashboard.
    ///
    /// The date pickers hand over typed dates, so the binary itself never
    /// calls this.
    #[allow(dead_code)]
    pub fn parse(start: &str, end: &str) -> Result<Self, DataError> {
        Ok(Self::new(parse_boundary(start)?, parse_boundary(end)?))
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

fn parse_boundary(value: &str) -> Result<NaiveDate, DataError> {
    NaiveDate::parse_from_str(value.trim(), DISPLAY_DATE_FORMAT).map_err(|_| {
        DataError::InvalidDateBoundary {
            value: value.to_string(),
        }
    })
}

// ---------------------------------------------------------------------------
// Dataset – the immutable, concatenated collection
// ---------------------------------------------------------------------------

/// All observations from every loaded source. Built once, never mutated.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    observations: Vec<Observation>,
}

impl Dataset {
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Earliest and latest date present, used to seed the date pickers.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.observations.iter().map(|o| o.date).min()?;
        let max = self.observations.iter().map(|o| o.date).max()?;
        Some((min, max))
    }

    /// Distinct category labels present in the data.
    pub fn variables(&self) -> BTreeSet<&str> {
        self.observations
            .iter()
            .map(|o| o.variable_name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}
