use crate::error::{Result, WeatherError};
use crate::models::ObservationTable;
use serde::{Deserialize, Serialize};

/// Inclusive year selection; a missing bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
}

impl YearRange {
    pub fn new(min_year: Option<i32>, max_year: Option<i32>) -> Result<Self> {
        if let (Some(min), Some(max)) = (min_year, max_year) {
            if min > max {
                return Err(WeatherError::InvalidParameter(format!(
                    "min_year {} is after max_year {}",
                    min, max
                )));
            }
        }
        Ok(Self { min_year, max_year })
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn contains(&self, year: i32) -> bool {
        self.min_year.map_or(true, |min| year >= min) && self.max_year.map_or(true, |max| year <= max)
    }

    pub fn is_unbounded(&self) -> bool {
        self.min_year.is_none() && self.max_year.is_none()
    }

    /// Fill open bounds from the data, for display.
    pub fn resolve(&self, table: &ObservationTable) -> Option<(i32, i32)> {
        let (data_min, data_max) = table.year_bounds()?;
        Some((
            self.min_year.unwrap_or(data_min),
            self.max_year.unwrap_or(data_max),
        ))
    }
}

/// Rows whose year falls inside `range`, original order kept.
pub fn filter_by_year_range(table: &ObservationTable, range: YearRange) -> ObservationTable {
    if range.is_unbounded() {
        return table.clone();
    }
    table.iter().filter(|r| range.contains(r.year)).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Observation;

    fn table() -> ObservationTable {
        (1995..=2005).rev().map(|y| Observation::new(y, 1)).collect()
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let range = YearRange::new(Some(1998), Some(2000)).unwrap();
        let filtered = filter_by_year_range(&table(), range);

        let years: Vec<i32> = filtered.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2000, 1999, 1998]);
    }

    #[test]
    fn test_open_bounds() {
        let from = filter_by_year_range(&table(), YearRange::new(Some(2004), None).unwrap());
        assert_eq!(from.len(), 2);

        let until = filter_by_year_range(&table(), YearRange::new(None, Some(1995)).unwrap());
        assert_eq!(until.len(), 1);

        assert_eq!(filter_by_year_range(&table(), YearRange::all()), table());
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert!(YearRange::new(Some(2001), Some(2000)).is_err());
    }

    #[test]
    fn test_resolve() {
        let range = YearRange::new(Some(2000), None).unwrap();
        assert_eq!(range.resolve(&table()), Some((2000, 2005)));
        assert_eq!(range.resolve(&ObservationTable::default()), None);
    }
}
