use crate::models::{Column, Observation, ObservationTable};
use std::cmp::Ordering;

/// The `n` observations with the highest values in `column`.
///
/// Rows are ordered by descending value with missing values last; ties keep
/// their original order. Missing values only appear when fewer than `n` rows
/// have a value.
pub fn get_top_records(table: &ObservationTable, column: Column, n: usize) -> ObservationTable {
    if n == 0 {
        return ObservationTable::default();
    }

    let mut rows: Vec<Observation> = table.rows().to_vec();
    // sort_by is stable
    rows.sort_by(|a, b| descending_nulls_last(a.value(column), b.value(column)));
    rows.truncate(n);

    ObservationTable::new(rows)
}

fn descending_nulls_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        // values are finite; -0.0 and 0.0 compare equal
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rain_table(values: &[Option<f64>]) -> ObservationTable {
        values
            .iter()
            .enumerate()
            .map(|(i, rain)| Observation::new(2000, i as u32 + 1).with_rain(*rain))
            .collect()
    }

    fn rain_values(table: &ObservationTable) -> Vec<Option<f64>> {
        table.iter().map(|r| r.rain).collect()
    }

    #[test]
    fn test_top_three_excludes_null() {
        let table = rain_table(&[Some(10.0), None, Some(30.0), Some(20.0)]);
        let top = get_top_records(&table, Column::Rain, 3);

        assert_eq!(rain_values(&top), vec![Some(30.0), Some(20.0), Some(10.0)]);
        assert_eq!(
            top.iter().map(|r| r.month).collect::<Vec<_>>(),
            vec![3, 4, 1]
        );
    }

    #[test]
    fn test_nulls_fill_tail_when_short() {
        let table = rain_table(&[None, Some(5.0), None]);
        let top = get_top_records(&table, Column::Rain, 3);

        assert_eq!(rain_values(&top), vec![Some(5.0), None, None]);
        // nulls keep original order
        assert_eq!(
            top.iter().map(|r| r.month).collect::<Vec<_>>(),
            vec![2, 1, 3]
        );
    }

    #[test]
    fn test_ties_are_stable() {
        let table = rain_table(&[Some(7.0), Some(9.0), Some(7.0), Some(7.0)]);
        let top = get_top_records(&table, Column::Rain, 10);

        assert_eq!(
            top.iter().map(|r| r.month).collect::<Vec<_>>(),
            vec![2, 1, 3, 4]
        );
    }

    #[test]
    fn test_signed_zeros_tie_in_original_order() {
        let reader = crate::readers::StationTextReader::with_header_lines(0);
        let table: ObservationTable = ["1963 1 1.0 -0.0 31 20.0 40.0", "1963 2 1.0 0.0 28 15.0 60.0"]
            .iter()
            .filter_map(|line| reader.parse_line(line))
            .collect();

        let top = get_top_records(&table, Column::Tmin, 2);

        assert_eq!(
            top.iter().map(|r| r.month).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_zero_and_oversized_n() {
        let table = rain_table(&[Some(1.0), Some(2.0)]);

        assert!(get_top_records(&table, Column::Rain, 0).is_empty());
        assert_eq!(get_top_records(&table, Column::Rain, 50).len(), 2);
    }

    #[test]
    fn test_preserves_all_columns_and_input() {
        let hottest = Observation::new(1976, 7)
            .with_temperatures(Some(26.1), Some(13.2))
            .with_air_frost(Some(0.0))
            .with_rain(Some(10.4))
            .with_sun(Some(270.9));
        let table = ObservationTable::new(vec![
            Observation::new(1963, 1).with_temperatures(Some(-0.4), Some(-6.0)),
            hottest,
        ]);
        let before = table.clone();

        let top = get_top_records(&table, Column::Tmax, 1);

        assert_eq!(top.rows(), &[hottest]);
        assert_eq!(table, before);
    }

    #[test]
    fn test_negative_values_sort_correctly() {
        let table = ObservationTable::new(vec![
            Observation::new(1963, 1).with_temperatures(Some(-0.4), None),
            Observation::new(1963, 2).with_temperatures(Some(-2.5), None),
            Observation::new(1963, 3).with_temperatures(Some(3.0), None),
        ]);
        let top = get_top_records(&table, Column::Tmax, 2);

        assert_eq!(
            top.iter().map(|r| r.tmax).collect::<Vec<_>>(),
            vec![Some(3.0), Some(-0.4)]
        );
    }
}
