use serde::{Deserialize, Serialize};

/// Yearly means of every measurement, plus the derived temperature fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnualAverage {
    #[serde(rename = "yyyy")]
    pub year: i32,
    pub tmax: Option<f64>,
    pub tmin: Option<f64>,
    pub af: Option<f64>,
    pub rain: Option<f64>,
    pub sun: Option<f64>,
    pub tmean: Option<f64>,
    /// Trailing rolling mean of `tmean`, filled by the trend calculation
    pub tmean_trend: Option<f64>,
}

impl AnnualAverage {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            tmax: None,
            tmin: None,
            af: None,
            rain: None,
            sun: None,
            tmean: None,
            tmean_trend: None,
        }
    }
}

/// Annual rows in ascending year order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnnualTable {
    rows: Vec<AnnualAverage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trend_window: Option<usize>,
}

impl AnnualTable {
    /// Builds a table, sorting rows by year.
    pub fn new(mut rows: Vec<AnnualAverage>) -> Self {
        rows.sort_by_key(|r| r.year);
        Self {
            rows,
            trend_window: None,
        }
    }

    pub fn rows(&self) -> &[AnnualAverage] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [AnnualAverage] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn years(&self) -> Vec<i32> {
        self.rows.iter().map(|r| r.year).collect()
    }

    pub fn get(&self, year: i32) -> Option<&AnnualAverage> {
        self.rows
            .binary_search_by_key(&year, |r| r.year)
            .ok()
            .map(|idx| &self.rows[idx])
    }

    /// Window used for `tmean_trend`, if trends were computed.
    pub fn trend_window(&self) -> Option<usize> {
        self.trend_window
    }

    pub(crate) fn set_trend_window(&mut self, window: usize) {
        self.trend_window = Some(window);
    }
}
