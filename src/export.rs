use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::aggregate::{AnnualMean, CorrelationPair};
use crate::data::model::{DateRange, Observation};

/// Snapshot of the three chart queries for the current selection.
#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub variable: String,
    pub range: DateRange,
    pub time_series: Vec<Observation>,
    pub annual_means: Vec<AnnualMean>,
    pub correlation: Vec<CorrelationPair>,
}

/// Write `data` as pretty-printed JSON.
pub fn write_json(path: &Path, data: &ChartData) -> Result<()> {
    let text = serde_json::to_string_pretty(data).context("serializing chart data")?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
