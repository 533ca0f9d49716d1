use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use log::debug;
use serde::Serialize;

use super::model::{Dataset, DateRange, Observation, Variable};

// ---------------------------------------------------------------------------
// Result rows
// ---------------------------------------------------------------------------

/// Mean of the daily minimum and maximum temperature for one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnnualMean {
    pub year: i32,
    pub mean_min: f64,
    pub mean_max: f64,
    /// `(mean_min + mean_max) / 2`
    pub mean_avg: f64,
}

/// Minimum temperature and maximum humidity observed on the same day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrelationPair {
    pub date: NaiveDate,
    pub temperature: f64,
    pub humidity: f64,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Observations of `variable_name` inside `range`, ordered by date.
///
/// Rows sharing a date keep their load order.
pub fn time_series(dataset: &Dataset, variable_name: &str, range: DateRange) -> Vec<Observation> {
    let mut series: Vec<Observation> = select(dataset, variable_name, range)
        .cloned()
        .collect();
    series.sort_by_key(|o| o.date);
    debug!("time_series({variable_name}): {} points", series.len());
    series
}

/// Per-year mean of minimum and maximum temperature inside `range`.
///
/// Years missing from either series are dropped. Ordered by year.
pub fn annual_means(dataset: &Dataset, range: DateRange) -> Vec<AnnualMean> {
    let mins = yearly_mean(dataset, Variable::TemperaturaMinima.label(), range);
    let maxs = yearly_mean(dataset, Variable::TemperaturaMaxima.label(), range);

    let rows: Vec<AnnualMean> = mins
        .into_iter()
        .filter_map(|(year, mean_min)| {
            let mean_max = *maxs.get(&year)?;
            Some(AnnualMean {
                year,
                mean_min,
                mean_max,
                mean_avg: (mean_min + mean_max) / 2.0,
            })
        })
        .collect();
    debug!("annual_means: {} years", rows.len());
    rows
}

/// Minimum temperature paired with maximum humidity by exact date inside `range`.
///
/// Only dates present in both series survive. A date repeated on either side
/// yields one pair per combination.
pub fn correlation_pairs(dataset: &Dataset, range: DateRange) -> Vec<CorrelationPair> {
    let mut humidity: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for o in select(dataset, Variable::HumedadMaxima.label(), range) {
        humidity.entry(o.date).or_default().push(o.value);
    }

    let pairs: Vec<CorrelationPair> = select(dataset, Variable::TemperaturaMinima.label(), range)
        .flat_map(|t| {
            humidity
                .get(&t.date)
                .into_iter()
                .flatten()
                .map(move |&h| CorrelationPair {
                    date: t.date,
                    temperature: t.value,
                    humidity: h,
                })
        })
        .collect();
    debug!("correlation_pairs: {} pairs", pairs.len());
    pairs
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn select<'a>(
    dataset: &'a Dataset,
    variable_name: &'a str,
    range: DateRange,
) -> impl Iterator<Item = &'a Observation> + 'a {
    dataset
        .observations()
        .iter()
        .filter(move |o| o.variable_name == variable_name && range.contains(o.date))
}

fn yearly_mean(dataset: &Dataset, variable_name: &str, range: DateRange) -> BTreeMap<i32, f64> {
    let mut sums: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
    for o in select(dataset, variable_name, range) {
        let entry = sums.entry(o.date.year()).or_insert((0.0, 0));
        entry.0 += o.value;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(year, (sum, n))| (year, sum / n as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const T_MIN: &str = "Temperatura Mínima";
    const T_MAX: &str = "Temperatura Máxima";
    const H_MAX: &str = "Humedad Máxima";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn obs(d: NaiveDate, variable: &str, value: f64) -> Observation {
        Observation {
            date: d,
            variable_name: variable.to_string(),
            value,
        }
    }

    fn all_time() -> DateRange {
        DateRange::new(date(2000, 1, 1), date(2100, 1, 1))
    }

    #[test]
    fn time_series_is_filtered_and_ordered() {
        let ds = Dataset::from_observations(vec![
            obs(date(2020, 1, 3), T_MIN, 6.0),
            obs(date(2020, 1, 1), T_MIN, 5.0),
            obs(date(2020, 1, 1), T_MAX, 15.0),
            obs(date(2020, 1, 2), T_MIN, 7.5),
            obs(date(2020, 2, 1), T_MIN, 1.0),
        ]);
        let range = DateRange::new(date(2020, 1, 1), date(2020, 1, 31));

        let series = time_series(&ds, T_MIN, range);
        let values: Vec<f64> = series.iter().map(|o| o.value).collect();
        assert_eq!(values, vec![5.0, 7.5, 6.0]);
        assert!(series.iter().all(|o| o.variable_name == T_MIN));
    }

    #[test]
    fn time_series_range_is_inclusive() {
        let ds = Dataset::from_observations(vec![
            obs(date(2020, 1, 1), T_MIN, 1.0),
            obs(date(2020, 1, 31), T_MIN, 2.0),
        ]);
        let range = DateRange::new(date(2020, 1, 1), date(2020, 1, 31));
        assert_eq!(time_series(&ds, T_MIN, range).len(), 2);
    }

    #[test]
    fn time_series_is_idempotent() {
        let ds = Dataset::from_observations(vec![
            obs(date(2021, 5, 2), T_MIN, 3.0),
            obs(date(2021, 5, 1), T_MIN, 4.0),
        ]);
        assert_eq!(
            time_series(&ds, T_MIN, all_time()),
            time_series(&ds, T_MIN, all_time())
        );
    }

    #[test]
    fn unknown_variable_yields_empty_series() {
        let ds = Dataset::from_observations(vec![obs(date(2021, 5, 1), T_MIN, 4.0)]);
        assert!(time_series(&ds, "Viento", all_time()).is_empty());
    }

    #[test]
    fn inverted_range_yields_empty_results() {
        let ds = Dataset::from_observations(vec![
            obs(date(2020, 6, 1), T_MIN, 10.0),
            obs(date(2020, 6, 1), T_MAX, 20.0),
            obs(date(2020, 6, 1), H_MAX, 90.0),
        ]);
        let range = DateRange::new(date(2021, 1, 1), date(2020, 1, 1));

        assert!(time_series(&ds, T_MIN, range).is_empty());
        assert!(annual_means(&ds, range).is_empty());
        assert!(correlation_pairs(&ds, range).is_empty());
    }

    #[test]
    fn annual_means_keeps_only_shared_years() {
        let ds = Dataset::from_observations(vec![
            obs(date(2020, 1, 1), T_MIN, 2.0),
            obs(date(2021, 1, 1), T_MIN, 4.0),
            obs(date(2021, 7, 1), T_MIN, 8.0),
            obs(date(2021, 1, 1), T_MAX, 10.0),
            obs(date(2022, 1, 1), T_MAX, 12.0),
        ]);

        let rows = annual_means(&ds, all_time());
        assert_eq!(rows.len(), 1);
        let row = rows[0];
        assert_eq!(row.year, 2021);
        assert_eq!(row.mean_min, 6.0);
        assert_eq!(row.mean_max, 10.0);
        assert_eq!(row.mean_avg, 8.0);
    }

    #[test]
    fn annual_means_ignores_selected_variable_and_orders_by_year() {
        let ds = Dataset::from_observations(vec![
            obs(date(2023, 1, 1), T_MIN, 1.0),
            obs(date(2023, 1, 1), T_MAX, 3.0),
            obs(date(2019, 1, 1), T_MIN, 0.0),
            obs(date(2019, 1, 1), T_MAX, 4.0),
            obs(date(2019, 1, 1), H_MAX, 99.0),
        ]);

        let years: Vec<i32> = annual_means(&ds, all_time()).iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2019, 2023]);
    }

    #[test]
    fn correlation_keeps_only_shared_dates() {
        let (d1, d2, d3) = (date(2020, 1, 1), date(2020, 1, 2), date(2020, 1, 3));
        let ds = Dataset::from_observations(vec![
            obs(d1, T_MIN, 1.0),
            obs(d2, T_MIN, 2.0),
            obs(d2, H_MAX, 80.0),
            obs(d3, H_MAX, 85.0),
            obs(d1, T_MAX, 9.0),
        ]);

        let pairs = correlation_pairs(&ds, all_time());
        assert_eq!(
            pairs,
            vec![CorrelationPair {
                date: d2,
                temperature: 2.0,
                humidity: 80.0
            }]
        );
    }

    #[test]
    fn correlation_respects_range() {
        let d = date(2020, 1, 2);
        let ds = Dataset::from_observations(vec![obs(d, T_MIN, 2.0), obs(d, H_MAX, 80.0)]);
        let range = DateRange::new(date(2020, 1, 3), date(2020, 12, 31));
        assert!(correlation_pairs(&ds, range).is_empty());
    }
}
