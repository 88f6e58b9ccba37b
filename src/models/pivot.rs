use super::Column;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotRow {
    #[serde(rename = "yyyy")]
    pub year: i32,
    /// One cell per entry of [`MonthlyPivot::months`]
    pub values: Vec<Option<f64>>,
}

/// Year by month grid of a single column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPivot {
    pub column: String,
    pub months: Vec<u32>,
    pub rows: Vec<PivotRow>,
}

impl MonthlyPivot {
    pub fn new(column: Column, months: Vec<u32>, rows: Vec<PivotRow>) -> Self {
        Self {
            column: column.name().to_string(),
            months,
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell(&self, year: i32, month: u32) -> Option<f64> {
        let col = self.months.iter().position(|m| *m == month)?;
        self.rows
            .iter()
            .find(|r| r.year == year)
            .and_then(|r| r.values[col])
    }
}

/// Short English month name, falling back to the number.
pub fn month_label(month: u32) -> String {
    const NAMES: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    match month {
        1..=12 => NAMES[(month - 1) as usize].to_string(),
        other => other.to_string(),
    }
}
