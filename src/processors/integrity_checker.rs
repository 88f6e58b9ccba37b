use crate::models::{Column, ObservationTable};
use std::collections::{BTreeMap, BTreeSet};

/// Completeness of a loaded table.
///
/// Parsing never reports problems directly; missing readings and unreadable
/// values surface here as null counts.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegrityReport {
    pub total_records: usize,
    pub complete_records: usize,
    pub distinct_years: usize,
    pub year_span: Option<(i32, i32)>,
    pub null_counts: BTreeMap<&'static str, usize>,
}

impl IntegrityReport {
    /// Calendar years covered, counting gaps
    pub fn years_covered(&self) -> usize {
        self.year_span
            .map_or(0, |(min, max)| (max - min + 1) as usize)
    }

    pub fn null_percentage(&self, column: Column) -> f64 {
        if self.total_records == 0 {
            return 0.0;
        }
        let nulls = self.null_counts.get(column.name()).copied().unwrap_or(0);
        (nulls as f64 / self.total_records as f64) * 100.0
    }
}

pub struct IntegrityChecker;

impl IntegrityChecker {
    pub fn new() -> Self {
        Self
    }

    pub fn check_integrity(&self, table: &ObservationTable) -> IntegrityReport {
        let mut null_counts: BTreeMap<&'static str, usize> = Column::MEASUREMENTS
            .iter()
            .map(|c| (c.name(), 0))
            .collect();
        let mut years = BTreeSet::new();
        let mut complete_records = 0;

        for obs in table {
            years.insert(obs.year);
            if obs.is_complete() {
                complete_records += 1;
            }
            for column in Column::MEASUREMENTS {
                if obs.value(column).is_none() {
                    *null_counts.entry(column.name()).or_default() += 1;
                }
            }
        }

        IntegrityReport {
            total_records: table.len(),
            complete_records,
            distinct_years: years.len(),
            year_span: table.year_bounds(),
            null_counts,
        }
    }

    /// Generate a human-readable summary of the report
    pub fn generate_summary(&self, report: &IntegrityReport) -> String {
        let mut summary = String::new();

        summary.push_str("Data Summary\n");
        summary.push_str("============\n");
        match report.year_span {
            Some((min, max)) => summary.push_str(&format!(
                "Period: {} - {} ({} years, {} with data)\n",
                min,
                max,
                report.years_covered(),
                report.distinct_years
            )),
            None => summary.push_str("Period: no data\n"),
        }
        summary.push_str(&format!("Measurements: {}\n", report.total_records));
        summary.push_str(&format!(
            "Complete records: {}\n",
            report.complete_records
        ));

        summary.push_str("\nMissing values:\n");
        for column in Column::MEASUREMENTS {
            let nulls = report.null_counts.get(column.name()).copied().unwrap_or(0);
            summary.push_str(&format!(
                "  {:<5} {:>6} ({:.1}%)\n",
                column.name(),
                nulls,
                report.null_percentage(column)
            ));
        }

        summary
    }
}

impl Default for IntegrityChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Observation;

    #[test]
    fn test_counts_nulls_per_column() {
        let table = ObservationTable::new(vec![
            Observation::new(2000, 1)
                .with_temperatures(Some(8.0), Some(1.0))
                .with_air_frost(Some(4.0))
                .with_rain(Some(40.0))
                .with_sun(Some(55.0)),
            Observation::new(2000, 2).with_temperatures(Some(9.0), None),
            Observation::new(2003, 1),
        ]);

        let report = IntegrityChecker::new().check_integrity(&table);

        assert_eq!(report.total_records, 3);
        assert_eq!(report.complete_records, 1);
        assert_eq!(report.distinct_years, 2);
        assert_eq!(report.year_span, Some((2000, 2003)));
        assert_eq!(report.years_covered(), 4);
        assert_eq!(report.null_counts["tmax"], 1);
        assert_eq!(report.null_counts["tmin"], 2);
        assert_eq!(report.null_counts["sun"], 2);
        assert!((report.null_percentage(Column::Sun) - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_summary_for_empty_table() {
        let checker = IntegrityChecker::new();
        let report = checker.check_integrity(&ObservationTable::default());
        let summary = checker.generate_summary(&report);

        assert_eq!(report.years_covered(), 0);
        assert!(summary.contains("Period: no data"));
        assert!(summary.contains("Measurements: 0"));
    }
}
