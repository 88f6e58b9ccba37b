use crate::error::{Result, WeatherError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One monthly observation from the station record.
///
/// Every measurement is nullable: the source marks missing readings with
/// sentinel tokens, and those become `None`, never zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(rename = "yyyy")]
    pub year: i32,

    #[serde(rename = "mm")]
    pub month: u32,

    /// Mean daily maximum temperature (°C)
    #[serde(deserialize_with = "csv::invalid_option")]
    pub tmax: Option<f64>,

    /// Mean daily minimum temperature (°C)
    #[serde(deserialize_with = "csv::invalid_option")]
    pub tmin: Option<f64>,

    /// Days of air frost
    #[serde(deserialize_with = "csv::invalid_option")]
    pub af: Option<f64>,

    /// Total rainfall (mm)
    #[serde(deserialize_with = "csv::invalid_option")]
    pub rain: Option<f64>,

    /// Total sunshine duration (hours)
    #[serde(deserialize_with = "csv::invalid_option")]
    pub sun: Option<f64>,
}

impl Observation {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            tmax: None,
            tmin: None,
            af: None,
            rain: None,
            sun: None,
        }
    }

    pub fn with_temperatures(mut self, tmax: Option<f64>, tmin: Option<f64>) -> Self {
        self.tmax = tmax;
        self.tmin = tmin;
        self
    }

    pub fn with_air_frost(mut self, af: Option<f64>) -> Self {
        self.af = af;
        self
    }

    pub fn with_rain(mut self, rain: Option<f64>) -> Self {
        self.rain = rain;
        self
    }

    pub fn with_sun(mut self, sun: Option<f64>) -> Self {
        self.sun = sun;
        self
    }

    /// Mean of max and min temperature, `None` if either is missing.
    pub fn mean_temperature(&self) -> Option<f64> {
        match (self.tmax, self.tmin) {
            (Some(max), Some(min)) => Some((max + min) / 2.0),
            _ => None,
        }
    }

    pub fn value(&self, column: Column) -> Option<f64> {
        match column {
            Column::Year => Some(f64::from(self.year)),
            Column::Month => Some(f64::from(self.month)),
            Column::Tmax => self.tmax,
            Column::Tmin => self.tmin,
            Column::AirFrost => self.af,
            Column::Rain => self.rain,
            Column::Sun => self.sun,
        }
    }

    pub fn is_complete(&self) -> bool {
        Column::MEASUREMENTS
            .iter()
            .all(|column| self.value(*column).is_some())
    }
}

/// Named column of an [`ObservationTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Year,
    Month,
    Tmax,
    Tmin,
    AirFrost,
    Rain,
    Sun,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Year,
        Column::Month,
        Column::Tmax,
        Column::Tmin,
        Column::AirFrost,
        Column::Rain,
        Column::Sun,
    ];

    /// The nullable measurement columns.
    pub const MEASUREMENTS: [Column; 5] = [
        Column::Tmax,
        Column::Tmin,
        Column::AirFrost,
        Column::Rain,
        Column::Sun,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Column::Year => "yyyy",
            Column::Month => "mm",
            Column::Tmax => "tmax",
            Column::Tmin => "tmin",
            Column::AirFrost => "af",
            Column::Rain => "rain",
            Column::Sun => "sun",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Column {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yyyy" | "year" => Ok(Column::Year),
            "mm" | "month" => Ok(Column::Month),
            "tmax" => Ok(Column::Tmax),
            "tmin" => Ok(Column::Tmin),
            "af" | "air_frost" => Ok(Column::AirFrost),
            "rain" => Ok(Column::Rain),
            "sun" => Ok(Column::Sun),
            _ => Err(WeatherError::UnknownColumn(s.to_string())),
        }
    }
}

/// Ordered collection of observations, as loaded from the source or cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ObservationTable {
    rows: Vec<Observation>,
}

impl ObservationTable {
    pub fn new(rows: Vec<Observation>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Smallest and largest year present.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let min = self.rows.iter().map(|r| r.year).min()?;
        let max = self.rows.iter().map(|r| r.year).max()?;
        Some((min, max))
    }
}

impl From<Vec<Observation>> for ObservationTable {
    fn from(rows: Vec<Observation>) -> Self {
        Self::new(rows)
    }
}

impl FromIterator<Observation> for ObservationTable {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ObservationTable {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
