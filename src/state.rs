use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::config::DashboardConfig;
use crate::data::aggregate::{annual_means, correlation_pairs, time_series};
use crate::data::loader::LoadReport;
use crate::data::model::{Dataset, DateRange, Variable};
use crate::export::ChartData;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Built once at startup and only read afterwards.
    dataset: Dataset,

    /// Selectable variables that have at least one observation.
    pub available: BTreeSet<Variable>,

    /// Sources that made it into the dataset.
    pub loaded_sources: Vec<String>,

    /// Per-source load defects, already formatted for display.
    pub defects: Vec<String>,

    /// Variable shown in the time series chart.
    pub variable: Variable,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    /// Query results for the current selection (cached until it changes).
    pub charts: ChartData,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: &DashboardConfig, report: LoadReport) -> Self {
        let LoadReport {
            dataset,
            loaded,
            defects,
        } = report;

        let today = chrono::Local::now().date_naive();
        let (start_date, end_date) = dataset.date_bounds().unwrap_or((today, today));
        let available: BTreeSet<Variable> = dataset
            .variables()
            .into_iter()
            .filter_map(Variable::from_label)
            .collect();
        let variable = config.default_variable;

        let mut state = Self {
            dataset,
            available,
            loaded_sources: loaded,
            defects: defects.iter().map(|e| e.to_string()).collect(),
            variable,
            start_date,
            end_date,
            charts: empty_charts(variable, DateRange::new(start_date, end_date)),
            status_message: None,
        };
        state.refresh();
        state
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }

    pub fn set_variable(&mut self, variable: Variable) {
        if self.variable != variable {
            self.variable = variable;
            self.refresh();
        }
    }

    pub fn set_range(&mut self, start: NaiveDate, end: NaiveDate) {
        if (start, end) != (self.start_date, self.end_date) {
            self.start_date = start;
            self.end_date = end;
            self.refresh();
        }
    }

    /// Re-run the three chart queries for the current selection.
    pub fn refresh(&mut self) {
        let range = self.range();
        self.charts = ChartData {
            variable: self.variable.label().to_string(),
            range,
            time_series: time_series(&self.dataset, self.variable.label(), range),
            annual_means: annual_means(&self.dataset, range),
            correlation: correlation_pairs(&self.dataset, range),
        };
    }
}

fn empty_charts(variable: Variable, range: DateRange) -> ChartData {
    ChartData {
        variable: variable.label().to_string(),
        range,
        time_series: Vec::new(),
        annual_means: Vec::new(),
        correlation: Vec::new(),
    }
}
