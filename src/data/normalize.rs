use chrono::NaiveDate;
use log::debug;

use crate::config::SOURCE_DATE_FORMAT;

use super::error::DataError;
use super::loader::{CombinedTable, RawTable};
use super::model::{Dataset, Observation};

/// Convert every record of the combined table into an [`Observation`].
///
/// Fail-fast: the first row with the wrong number of fields, an unparseable
/// date or an unparseable value aborts the whole conversion. Rows are numbered from 1, not counting the header.
pub fn normalize(combined: &CombinedTable) -> Result<Dataset, DataError> {
    let capacity = combined.tables.iter().map(|t| t.records.len()).sum();
    let mut observations = Vec::with_capacity(capacity);
    debug!(
        "Normalizing {} tables with columns {:?}",
        combined.tables.len(),
        combined.columns
    );

    for table in &combined.tables {
        normalize_table(table, &mut observations)?;
    }

    debug!("Normalized {} observations", observations.len());
    Ok(Dataset::from_observations(observations))
}

fn normalize_table(table: &RawTable, out: &mut Vec<Observation>) -> Result<(), DataError> {
    let columns = table.columns;
    let expected = table.headers.len();

    for (i, record) in table.records.iter().enumerate() {
        let row = i + 1;
        if record.len() != expected {
            return Err(DataError::MalformedRow {
                source_name: table.source_name.clone(),
                row,
                expected,
                found: record.len(),
            });
        }

        let raw_date = &record[columns.date];
        let raw_value = &record[columns.value];

        let date = parse_date(raw_date).ok_or_else(|| DataError::DateParse {
            source_name: table.source_name.clone(),
            row,
            value: raw_date.to_string(),
        })?;
        let value = parse_value(raw_value).ok_or_else(|| DataError::ValueParse {
            source_name: table.source_name.clone(),
            row,
            value: raw_value.to_string(),
        })?;

        out.push(Observation {
            date,
            variable_name: record[columns.variable].trim().to_string(),
            value,
        });
    }
    Ok(())
}

/// Parse a `dd-mm-yyyy` date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), SOURCE_DATE_FORMAT).ok()
}

/// Parse a decimal-comma number such as `"12,5"`. Non-finite results are rejected.
pub fn parse_value(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
