use crate::models::{Column, MonthlyPivot, ObservationTable, PivotRow};
use std::collections::{BTreeMap, BTreeSet};

/// Mean of `column` for every (year, month) pair.
///
/// Years and months without a single value are left out, so the grid only
/// spans data that exists. Duplicate (year, month) rows are averaged.
pub fn pivot_monthly(table: &ObservationTable, column: Column) -> MonthlyPivot {
    let mut cells: BTreeMap<(i32, u32), (f64, usize)> = BTreeMap::new();

    for obs in table {
        if let Some(value) = obs.value(column) {
            let cell = cells.entry((obs.year, obs.month)).or_insert((0.0, 0));
            cell.0 += value;
            cell.1 += 1;
        }
    }

    let months: Vec<u32> = cells
        .keys()
        .map(|(_, month)| *month)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let years: BTreeSet<i32> = cells.keys().map(|(year, _)| *year).collect();

    let rows = years
        .into_iter()
        .map(|year| PivotRow {
            year,
            values: months
                .iter()
                .map(|month| {
                    cells
                        .get(&(year, *month))
                        .map(|(sum, count)| sum / *count as f64)
                })
                .collect(),
        })
        .collect();

    MonthlyPivot::new(column, months, rows)
}
