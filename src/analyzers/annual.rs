use crate::error::{Result, WeatherError};
use crate::models::{AnnualAverage, AnnualTable, ObservationTable};
use std::collections::BTreeMap;
use tracing::debug;

/// Running mean that skips missing values.
#[derive(Debug, Clone, Copy, Default)]
struct MeanAccumulator {
    sum: f64,
    count: usize,
}

impl MeanAccumulator {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

#[derive(Debug, Default)]
struct YearAccumulator {
    tmax: MeanAccumulator,
    tmin: MeanAccumulator,
    af: MeanAccumulator,
    rain: MeanAccumulator,
    sun: MeanAccumulator,
    tmean: MeanAccumulator,
}

/// Group observations by year and average every measurement.
///
/// Mean temperature is derived per observation first, so a month missing
/// either max or min contributes nothing to the year's `tmean`. Years come
/// out in ascending order and `tmean_trend` is left empty.
pub fn calculate_annual_averages(table: &ObservationTable) -> AnnualTable {
    let mut years: BTreeMap<i32, YearAccumulator> = BTreeMap::new();

    for obs in table {
        let acc = years.entry(obs.year).or_default();
        acc.tmax.push(obs.tmax);
        acc.tmin.push(obs.tmin);
        acc.af.push(obs.af);
        acc.rain.push(obs.rain);
        acc.sun.push(obs.sun);
        acc.tmean.push(obs.mean_temperature());
    }

    let rows = years
        .into_iter()
        .map(|(year, acc)| AnnualAverage {
            year,
            tmax: acc.tmax.mean(),
            tmin: acc.tmin.mean(),
            af: acc.af.mean(),
            rain: acc.rain.mean(),
            sun: acc.sun.mean(),
            tmean: acc.tmean.mean(),
            tmean_trend: None,
        })
        .collect();

    let annual = AnnualTable::new(rows);
    debug!(
        "Aggregated {} observations into {} years",
        table.len(),
        annual.len()
    );
    annual
}

/// Annual averages plus a trailing rolling mean of `tmean` over `window` years.
///
/// Until the window fills, the trend is the mean of all years so far. Missing
/// `tmean` values inside a window are ignored; the trend is only `None` when
/// every year in the window lacks a mean temperature.
pub fn calculate_rolling_trends(table: &ObservationTable, window: usize) -> Result<AnnualTable> {
    if window == 0 {
        return Err(WeatherError::InvalidParameter(
            "rolling window must be at least 1 year".to_string(),
        ));
    }

    let mut annual = calculate_annual_averages(table);
    let means: Vec<Option<f64>> = annual.rows().iter().map(|r| r.tmean).collect();
    let trend = trailing_mean(&means, window);

    for (row, value) in annual.rows_mut().iter_mut().zip(trend) {
        row.tmean_trend = value;
    }
    annual.set_trend_window(window);

    Ok(annual)
}

/// Trailing mean with a minimum of one available point.
fn trailing_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|idx| {
            let start = (idx + 1).saturating_sub(window);
            let mut acc = MeanAccumulator::default();
            for value in &values[start..=idx] {
                acc.push(*value);
            }
            acc.mean()
        })
        .collect()
}
